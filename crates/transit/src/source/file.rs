//! Feed content read from disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::models::types::Result;
use crate::source::traits::DataSource;

#[derive(Clone, Debug)]
pub struct FileDataSource {
    path: PathBuf,
}

impl FileDataSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for FileDataSource {
    fn read_bytes(&self) -> Result<Vec<u8>> {
        debug!(path = %self.path.display(), "reading feed file");
        Ok(fs::read(&self.path)?)
    }
}
