//! Pluggable data source trait.
//!
//! Parsers never fetch anything themselves. Anything that can hand over the
//! raw feed content (a file, an HTTP response body, a test string) implements
//! [`DataSource`].

use std::io;

use crate::models::types::{Result, TransitError};

/// Raw feed content
pub trait DataSource: Send + Sync {
    fn read_bytes(&self) -> Result<Vec<u8>>;

    /// Content as UTF-8 text
    fn read_string(&self) -> Result<String> {
        String::from_utf8(self.read_bytes()?)
            .map_err(|e| TransitError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }
}

impl DataSource for str {
    fn read_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.as_bytes().to_vec())
    }

    fn read_string(&self) -> Result<String> {
        Ok(self.to_owned())
    }
}

impl DataSource for String {
    fn read_bytes(&self) -> Result<Vec<u8>> {
        self.as_str().read_bytes()
    }

    fn read_string(&self) -> Result<String> {
        Ok(self.clone())
    }
}

impl DataSource for [u8] {
    fn read_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.to_vec())
    }
}
