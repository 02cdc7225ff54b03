use std::{
    io,
    path::PathBuf,
    thread::{self, JoinHandle},
};

use log::debug;

use crate::{
    address::Endpoint,
    config::SendConfig,
    stream::{
        cancel::CancelToken,
        send::{TransferOutcome, send_file_with_cancel},
    },
};

/// A transfer running on its own thread.
pub struct TransferHandle {
    thread: JoinHandle<TransferOutcome>,
    cancel: CancelToken,
}

impl TransferHandle {
    /// Asks the transfer to stop after the chunk in flight.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// A token that cancels this transfer, for use from another thread or a signal handler.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Waits for the transfer to end and returns its outcome.
    pub fn join(self) -> TransferOutcome {
        match self.thread.join() {
            Ok(outcome) => outcome,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}

/// Runs [send_file_with_cancel] on a dedicated thread so the caller is not
/// blocked for the duration of the copy.
///
/// Fails only if the OS refuses to create the thread.
pub fn spawn_send(
    endpoint: Endpoint,
    file_path: PathBuf,
    config: SendConfig,
) -> io::Result<TransferHandle> {
    let cancel = CancelToken::new();
    let worker_cancel = cancel.clone();

    let thread = thread::Builder::new()
        .name(format!("filepush-send-{}", endpoint))
        .spawn(move || {
            debug!("Worker started for {:?}", file_path);
            send_file_with_cancel(&endpoint, &file_path, &config, &worker_cancel)
        })?;

    Ok(TransferHandle { thread, cancel })
}
