//! Configuration source adapters.

use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::PathBuf;

use crate::infrastructure::ports::{ConfigSourceError, ConfigSourcePort};

/// Default game configuration compiled into the binary.
pub const DEFAULT_CONFIG: &str = include_str!("../../config.yml");

/// Reads the configuration from a file on disk.
pub struct FileConfigSource {
    path: PathBuf,
}

impl FileConfigSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigSourcePort for FileConfigSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn open(&self) -> Result<Box<dyn BufRead + Send>, ConfigSourceError> {
        let file = File::open(&self.path)
            .map_err(|e| ConfigSourceError::unavailable(self.describe(), e))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Serves configuration text held in memory, by default the bundled `config.yml`.
pub struct EmbeddedConfigSource {
    name: &'static str,
    contents: &'static str,
}

impl EmbeddedConfigSource {
    pub fn new(name: &'static str, contents: &'static str) -> Self {
        Self { name, contents }
    }
}

impl Default for EmbeddedConfigSource {
    fn default() -> Self {
        Self::new("embedded config.yml", DEFAULT_CONFIG)
    }
}

impl ConfigSourcePort for EmbeddedConfigSource {
    fn describe(&self) -> String {
        self.name.to_string()
    }

    fn open(&self) -> Result<Box<dyn BufRead + Send>, ConfigSourceError> {
        Ok(Box::new(Cursor::new(self.contents)))
    }
}
