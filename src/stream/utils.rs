use std::io::{self, Read, Write};

use log::trace;
use sha2::{Digest, Sha256};

use crate::stream::{cancel::CancelToken, error::TransferError};

/// What a finished copy moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkCopy {
    pub bytes: u64,
    /// SHA-256 of every byte written, in order.
    pub sha256: [u8; 32],
}

/// Copies `source` into `sink` through one reusable buffer of `chunk_size` bytes
/// until `source` reports end of input, then flushes `sink`.
///
/// ## Write policy
/// A short write is not an error: the rest of the chunk is written until it is
/// all accepted (`write_all` semantics). A sink that accepts zero bytes, or
/// reports any error other than `Interrupted`, ends the copy with
/// [TransferError::WriteError].
///
/// ## Errors
/// - [TransferError::ReadError]: `source` failed. `Interrupted` reads are retried.
/// - [TransferError::WriteError]: `sink` failed to write or flush.
/// - [TransferError::Cancelled]: `cancel` was set before a read.
///
/// `cancel` is not seen while a write is blocked. A stalled sink delays
/// cancellation until its write timeout fires, if it has one.
///
/// Every error carries the number of bytes fully written so far.
pub fn copy_in_chunks<R: Read, W: Write>(
    source: &mut R,
    sink: &mut W,
    chunk_size: usize,
    cancel: &CancelToken,
) -> Result<ChunkCopy, TransferError> {
    let mut buffer = vec![0u8; chunk_size.max(1)];
    let mut hasher = Sha256::new();
    let mut bytes_sent: u64 = 0;

    loop {
        if cancel.is_cancelled() {
            return Err(TransferError::Cancelled { bytes_sent });
        }

        let bytes_read = match source.read(&mut buffer) {
            Ok(0) => break, // EOF
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => return Err(TransferError::ReadError { bytes_sent, source }),
        };

        let chunk = &buffer[..bytes_read];
        sink.write_all(chunk)
            .map_err(|source| TransferError::WriteError { bytes_sent, source })?;

        hasher.update(chunk);
        bytes_sent += bytes_read as u64;
        trace!("Copied chunk of {} bytes ({} total)", bytes_read, bytes_sent);
    }

    sink.flush()
        .map_err(|source| TransferError::WriteError { bytes_sent, source })?;

    Ok(ChunkCopy {
        bytes: bytes_sent,
        sha256: hasher.finalize().into(),
    })
}

/// Lowercase hex rendering of a digest.
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
