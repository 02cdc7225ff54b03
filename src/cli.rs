use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{
    address::HostPolicy,
    config::{DEFAULT_CHUNK_SIZE, DEFAULT_PORT, ReceiveConfig, SendConfig},
};

#[derive(Parser)]
#[command(name = "filepush")]
#[command(about = "Stream a file to a listening peer over raw TCP", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send a file to a listening peer
    Send(SendArgs),
    /// Accept one connection and write what it sends to a path
    Receive(ReceiveArgs),
}

#[derive(Args)]
pub struct SendArgs {
    /// Path to the file to send
    #[arg(name = "FILE")]
    pub file: PathBuf,

    /// Receiver IP address (dotted-decimal IPv4)
    #[arg(name = "HOST")]
    pub host: String,

    /// Receiver port
    #[arg(short, long, env = "FILEPUSH_PORT", default_value_t = DEFAULT_PORT as u32)]
    pub port: u32,

    /// Bytes per read/write cycle
    #[arg(short, long, env = "FILEPUSH_CHUNK_SIZE", default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Connect timeout in seconds, 0 for the OS default
    #[arg(long, env = "FILEPUSH_CONNECT_TIMEOUT", default_value_t = 10)]
    pub connect_timeout: u64,

    /// Write timeout in seconds, 0 to wait indefinitely.
    /// Ctrl-C cannot interrupt a write that is blocked, so 0 can delay cancellation.
    #[arg(long, env = "FILEPUSH_WRITE_TIMEOUT", default_value_t = 30)]
    pub write_timeout: u64,

    /// Also accept IPv6 literals for HOST
    #[arg(long)]
    pub allow_ipv6: bool,
}

impl SendArgs {
    pub fn host_policy(&self) -> HostPolicy {
        if self.allow_ipv6 {
            HostPolicy::AllowIpv6
        } else {
            HostPolicy::Ipv4Only
        }
    }

    pub fn send_config(&self) -> SendConfig {
        SendConfig::default()
            .with_chunk_size(self.chunk_size)
            .with_connect_timeout(Some(std::time::Duration::from_secs(self.connect_timeout)))
            .with_write_timeout(Some(std::time::Duration::from_secs(self.write_timeout)))
    }
}

#[derive(Args)]
pub struct ReceiveArgs {
    /// Output path. If a directory, write `received.bin` inside it.
    /// If a file path, write to that exact path.
    #[arg(name = "PATH")]
    pub file: PathBuf,

    /// Address to listen on
    #[arg(short, long, default_value = "0.0.0.0")]
    pub bind: String,

    /// Port to listen on
    #[arg(short, long, env = "FILEPUSH_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Bytes per read/write cycle
    #[arg(short, long, env = "FILEPUSH_CHUNK_SIZE", default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Give up after this many seconds without data, 0 to wait indefinitely
    #[arg(long, default_value_t = 0)]
    pub read_timeout: u64,
}

impl ReceiveArgs {
    pub fn receive_config(&self) -> ReceiveConfig {
        ReceiveConfig::default()
            .with_chunk_size(self.chunk_size)
            .with_read_timeout(Some(std::time::Duration::from_secs(self.read_timeout)))
    }
}
