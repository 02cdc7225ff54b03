use std::{
    io::Read,
    net::{Shutdown, TcpStream},
    path::Path,
    time::{Duration, Instant},
};

use log::{debug, info, warn};

use crate::{
    address::Endpoint,
    config::SendConfig,
    file::TransferSource,
    stream::{
        cancel::CancelToken,
        error::TransferError,
        utils::{copy_in_chunks, to_hex},
    },
};

/// The single terminal result of one transfer attempt.
pub type TransferOutcome = Result<TransferReport, TransferError>;

/// Summary of a successful transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReport {
    pub endpoint: Endpoint,
    pub bytes_sent: u64,
    /// SHA-256 of the bytes sent. Informational only, the peer never sees it.
    pub sha256: [u8; 32],
    pub elapsed: Duration,
}

impl TransferReport {
    pub fn sha256_hex(&self) -> String {
        to_hex(&self.sha256)
    }
}

/// Sends the file at `file_path` to `endpoint`.
///
/// The file is opened before any connection is attempted, so a missing file
/// never reaches the network.
pub fn send_file(endpoint: &Endpoint, file_path: &Path, config: &SendConfig) -> TransferOutcome {
    send_file_with_cancel(endpoint, file_path, config, &CancelToken::new())
}

pub fn send_file_with_cancel(
    endpoint: &Endpoint,
    file_path: &Path,
    config: &SendConfig,
    cancel: &CancelToken,
) -> TransferOutcome {
    let source = TransferSource::open(file_path)?;
    info!(
        "Sending {:?} ({} bytes) to {}",
        source.name(),
        source.size(),
        endpoint
    );
    send(endpoint, source, config, cancel)
}

/// Streams `source` to `endpoint` over a fresh TCP connection.
///
/// Takes ownership of `source`; it and the connection are dropped before this
/// returns, on success and on every failure.
///
/// ## Errors
/// - [TransferError::ConnectionFailed]: connect, timeout, or socket setup failed.
/// - [TransferError::ReadError], [TransferError::WriteError],
///   [TransferError::Cancelled]: see [copy_in_chunks].
pub fn send<S: Read>(
    endpoint: &Endpoint,
    mut source: S,
    config: &SendConfig,
    cancel: &CancelToken,
) -> TransferOutcome {
    let started = Instant::now();
    let mut sink = open_sink(endpoint, config)?;
    debug!("Connected to {}", endpoint);

    let chunk_size = config.effective_chunk_size();
    let copy = match copy_in_chunks(&mut source, &mut sink, chunk_size, cancel) {
        Ok(copy) => copy,
        Err(e) => {
            warn!("Transfer to {} aborted: {}", endpoint, e);
            return Err(e);
        }
    };

    // Half-close so the peer reads EOF right after the last byte
    if let Err(e) = sink.shutdown(Shutdown::Write) {
        debug!("Shutdown of connection to {} failed: {}", endpoint, e);
    }

    let report = TransferReport {
        endpoint: *endpoint,
        bytes_sent: copy.bytes,
        sha256: copy.sha256,
        elapsed: started.elapsed(),
    };
    info!(
        "Sent {} bytes to {} in {:?}",
        report.bytes_sent, endpoint, report.elapsed
    );
    Ok(report)
}

fn open_sink(endpoint: &Endpoint, config: &SendConfig) -> Result<TcpStream, TransferError> {
    let connection_failed = |source| TransferError::ConnectionFailed {
        endpoint: *endpoint,
        source,
    };

    let address = endpoint.socket_addr();
    debug!("Connecting to {}", address);
    let stream = match config.effective_connect_timeout() {
        Some(timeout) => TcpStream::connect_timeout(&address, timeout),
        None => TcpStream::connect(address),
    }
    .map_err(connection_failed)?;

    stream
        .set_write_timeout(config.effective_write_timeout())
        .map_err(connection_failed)?;

    Ok(stream)
}
