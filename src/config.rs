//! Tunables for sending and receiving.
use std::time::Duration;

/// Port used when the caller does not pick one.
pub const DEFAULT_PORT: u16 = 9020;
/// Bytes moved per read/write cycle.
pub const DEFAULT_CHUNK_SIZE: usize = 8192;
/// Upper bound on a single chunk, to keep a mistyped flag from allocating gigabytes.
pub const MAX_CHUNK_SIZE: usize = 4 * 1024 * 1024; // 4 MB

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for one outgoing transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendConfig {
    /// Size of the reusable copy buffer, clamped to `1..=MAX_CHUNK_SIZE`.
    pub chunk_size: usize,
    /// `None` falls back to the operating system's connect timeout.
    pub connect_timeout: Option<Duration>,
    /// `None` lets a write block until the OS gives up.
    ///
    /// Cancellation is only observed between chunks, so this timeout is also
    /// the bound on how long a cancel can wait behind a write to a stalled
    /// peer. With `None` (or zero) that wait is unbounded.
    pub write_timeout: Option<Duration>,
}

impl Default for SendConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            connect_timeout: Some(DEFAULT_CONNECT_TIMEOUT),
            write_timeout: Some(DEFAULT_WRITE_TIMEOUT),
        }
    }
}

impl SendConfig {
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_write_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.write_timeout = timeout;
        self
    }

    /// The chunk size actually used by the copy loop.
    pub fn effective_chunk_size(&self) -> usize {
        clamp_chunk_size(self.chunk_size)
    }

    /// Zero durations are rejected by the socket API, so they mean "no timeout" here.
    pub(crate) fn effective_connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout.filter(|t| !t.is_zero())
    }

    pub(crate) fn effective_write_timeout(&self) -> Option<Duration> {
        self.write_timeout.filter(|t| !t.is_zero())
    }
}

/// Settings for the one-shot receiving peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiveConfig {
    pub chunk_size: usize,
    /// Maximum silence from the sender before the read fails.
    pub read_timeout: Option<Duration>,
}

impl Default for ReceiveConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            read_timeout: None,
        }
    }
}

impl ReceiveConfig {
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn effective_chunk_size(&self) -> usize {
        clamp_chunk_size(self.chunk_size)
    }

    pub(crate) fn effective_read_timeout(&self) -> Option<Duration> {
        self.read_timeout.filter(|t| !t.is_zero())
    }
}

fn clamp_chunk_size(requested: usize) -> usize {
    requested.clamp(1, MAX_CHUNK_SIZE)
}
