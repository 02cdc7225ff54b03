use std::{
    fs::File,
    io::Write,
    net::{SocketAddr, TcpListener},
    path::{Path, PathBuf},
};

use log::{debug, info};

use crate::{
    config::ReceiveConfig,
    stream::{
        cancel::CancelToken,
        error::ReceiveError,
        utils::{copy_in_chunks, to_hex},
    },
};

/// File name used when the output path is a directory. The wire carries no name.
pub const DEFAULT_OUTPUT_NAME: &str = "received.bin";

/// Summary of one received connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiveReport {
    pub peer: SocketAddr,
    pub bytes_received: u64,
    pub sha256: [u8; 32],
}

impl ReceiveReport {
    pub fn sha256_hex(&self) -> String {
        to_hex(&self.sha256)
    }
}

/// Listens on `bind_addr`, accepts a single sender and writes everything it
/// sends to `path` until the sender closes the connection.
///
/// If `path` is an existing directory the data lands in
/// [DEFAULT_OUTPUT_NAME] inside it.
pub fn receive_file(
    bind_addr: (&str, u16),
    path: &Path,
    config: &ReceiveConfig,
) -> Result<ReceiveReport, ReceiveError> {
    let listener = TcpListener::bind(bind_addr).map_err(|source| ReceiveError::Bind {
        address: format!("{}:{}", bind_addr.0, bind_addr.1),
        source,
    })?;
    info!("Listening on {}:{}", bind_addr.0, bind_addr.1);

    let final_path = determine_final_path(path);
    let mut output = File::create(&final_path).map_err(|source| ReceiveError::Output {
        path: final_path.clone(),
        source,
    })?;
    info!("Writing incoming data to {:?}", final_path);

    accept_one(&listener, &mut output, config)
}

/// Accepts one connection on `listener` and copies it into `sink` until EOF.
pub fn accept_one<W: Write>(
    listener: &TcpListener,
    sink: &mut W,
    config: &ReceiveConfig,
) -> Result<ReceiveReport, ReceiveError> {
    let (mut stream, peer) = listener.accept().map_err(ReceiveError::Accept)?;
    info!("Accepted connection from {}", peer);

    stream
        .set_read_timeout(config.effective_read_timeout())
        .map_err(ReceiveError::Socket)?;

    let copy = copy_in_chunks(
        &mut stream,
        sink,
        config.effective_chunk_size(),
        &CancelToken::new(),
    )?;
    debug!("Peer {} closed the connection", peer);

    let report = ReceiveReport {
        peer,
        bytes_received: copy.bytes,
        sha256: copy.sha256,
    };
    info!("Received {} bytes from {}", report.bytes_received, peer);
    Ok(report)
}

/// A directory gets [DEFAULT_OUTPUT_NAME] appended; anything else is used as is.
pub fn determine_final_path(output_path: &Path) -> PathBuf {
    if output_path.is_dir() {
        output_path.join(DEFAULT_OUTPUT_NAME)
    } else {
        output_path.to_path_buf()
    }
}
