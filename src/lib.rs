//! Point-to-point file transfer over a single, unframed TCP connection.
//!
//! [`address`] validates the destination before anything touches the network,
//! and [`stream`] owns the connection lifecycle and the chunked copy loop.

pub mod address;
pub mod cli;
pub mod config;
pub mod file;
pub mod stream;

pub use address::{Endpoint, HostPolicy};
pub use config::{ReceiveConfig, SendConfig};
pub use stream::error::{ErrorKind, ReceiveError, TransferError};
pub use stream::send::{TransferOutcome, TransferReport};
