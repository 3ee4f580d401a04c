//! Pop sound asset.
//!
//! The clip is read into memory at start-up so a missing file fails fast,
//! but nothing plays it: pops are silent.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::ShooterError;

#[derive(Debug)]
pub struct PopSound {
    path:  PathBuf,
    bytes: Vec<u8>,
}

impl PopSound {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ShooterError> {
        let path = path.as_ref().to_path_buf();
        let bytes = fs::read(&path)
            .map_err(|source| ShooterError::PopSound { path: path.clone(), source })?;
        info!("pop sound loaded: {} ({} bytes)", path.display(), bytes.len());
        Ok(PopSound { path, bytes })
    }

    pub fn path(&self) -> &Path { &self.path }
    pub fn len(&self)  -> usize { self.bytes.len() }
    pub fn is_empty(&self) -> bool { self.bytes.is_empty() }
}
