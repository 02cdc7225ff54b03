use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};

use crate::stream::error::TransferError;

/// The local file being sent, opened for reading at offset 0.
///
/// Owns the file handle; dropping the source closes it.
#[derive(Debug)]
pub struct TransferSource {
    file: File,
    path: PathBuf,
    /// File name, for display purposes only. Never sent to the peer.
    name: String,
    /// Size in bytes at the time the file was opened
    size: u64,
}

impl TransferSource {
    /// Opens `path` for reading.
    ///
    /// Missing files, permission problems and directories all map to
    /// [TransferError::SourceUnavailable].
    pub fn open(path: &Path) -> Result<Self, TransferError> {
        let unavailable = |source: io::Error| TransferError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(unavailable)?;
        let metadata = file.metadata().map_err(unavailable)?;
        if metadata.is_dir() {
            return Err(unavailable(io::Error::new(
                io::ErrorKind::InvalidInput,
                "path is a directory",
            )));
        }

        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("unnamed_file")
            .to_string();

        Ok(Self {
            file,
            path: path.to_path_buf(),
            name,
            size: metadata.len(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

impl Read for TransferSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}
