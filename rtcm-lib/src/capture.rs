use std::path::Path;

use tracing::debug;

use crate::{Error, Result};

/// A captured RTCM3 byte stream held entirely in memory.
#[derive(Debug, Clone)]
pub struct Capture {
    name: String,
    data: Vec<u8>,
}

impl Capture {
    /// Read the whole file at `path`.
    ///
    /// # Errors
    /// [Error::InputNotFound] if `path` does not exist, otherwise any ``std::io::Error``
    /// reading the file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::InputNotFound(path.to_path_buf()));
        }
        let data = std::fs::read(path)?;
        let name = path.file_name().map_or_else(
            || path.to_string_lossy().to_string(),
            |n| n.to_string_lossy().to_string(),
        );
        debug!("read {} bytes from {path:?}", data.len());
        Ok(Self { name, data })
    }

    pub fn from_bytes<S: Into<String>>(name: S, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Source identity, the file name for captures read from disk.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
