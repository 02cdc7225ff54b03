use std::{io, path::PathBuf};

use thiserror::Error;

use crate::address::Endpoint;

/// Every way a transfer attempt can end other than success.
#[derive(Error, Debug)]
pub enum TransferError {
    #[error("Invalid host address {host:?}: expected four dot-separated octets in 0-255")]
    InvalidHost { host: String },

    #[error("Invalid port {port}: expected a value in 1-65535")]
    InvalidPort { port: u32 },

    #[error("Failed to connect to {endpoint}: {source}")]
    ConnectionFailed {
        endpoint: Endpoint,
        #[source]
        source: io::Error,
    },

    #[error("Source file {path:?} is unavailable: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error reading from source after {bytes_sent} bytes: {source}")]
    ReadError {
        bytes_sent: u64,
        #[source]
        source: io::Error,
    },

    #[error("Error writing to connection after {bytes_sent} bytes: {source}")]
    WriteError {
        bytes_sent: u64,
        #[source]
        source: io::Error,
    },

    #[error("Transfer cancelled after {bytes_sent} bytes")]
    Cancelled { bytes_sent: u64 },
}

/// Category of a [TransferError], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidHost,
    InvalidPort,
    ConnectionFailed,
    SourceUnavailable,
    ReadError,
    WriteError,
    Cancelled,
}

impl TransferError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TransferError::InvalidHost { .. } => ErrorKind::InvalidHost,
            TransferError::InvalidPort { .. } => ErrorKind::InvalidPort,
            TransferError::ConnectionFailed { .. } => ErrorKind::ConnectionFailed,
            TransferError::SourceUnavailable { .. } => ErrorKind::SourceUnavailable,
            TransferError::ReadError { .. } => ErrorKind::ReadError,
            TransferError::WriteError { .. } => ErrorKind::WriteError,
            TransferError::Cancelled { .. } => ErrorKind::Cancelled,
        }
    }

    /// Bytes delivered to the sink before the failure, for mid-transfer errors.
    pub fn bytes_sent(&self) -> Option<u64> {
        match self {
            TransferError::ReadError { bytes_sent, .. }
            | TransferError::WriteError { bytes_sent, .. }
            | TransferError::Cancelled { bytes_sent } => Some(*bytes_sent),
            _ => None,
        }
    }
}

/// Errors of the one-shot receiving peer.
#[derive(Error, Debug)]
pub enum ReceiveError {
    #[error("Failed to listen on {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to accept a connection: {0}")]
    Accept(#[source] io::Error),

    #[error("Failed to configure connection from peer: {0}")]
    Socket(#[source] io::Error),

    #[error("Failed to open output file {path:?}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error reading from peer after {bytes_received} bytes: {source}")]
    Read {
        bytes_received: u64,
        #[source]
        source: io::Error,
    },

    #[error("Error writing received data after {bytes_received} bytes: {source}")]
    Write {
        bytes_received: u64,
        #[source]
        source: io::Error,
    },

    #[error("Transfer from peer failed: {0}")]
    Transfer(TransferError),
}

impl From<TransferError> for ReceiveError {
    /// On the receiving side the source is the peer and the sink is the output.
    fn from(err: TransferError) -> Self {
        match err {
            TransferError::ReadError { bytes_sent, source } => ReceiveError::Read {
                bytes_received: bytes_sent,
                source,
            },
            TransferError::WriteError { bytes_sent, source } => ReceiveError::Write {
                bytes_received: bytes_sent,
                source,
            },
            other => ReceiveError::Transfer(other),
        }
    }
}
