use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use tempfile::NamedTempFile;

use crate::error::StoreError;

/// A set of named slots, each holding one string
pub trait Storage {
    /// Current contents of the slot, `None` if it was never written or cannot be read
    fn read(&self, key: &str) -> Option<String>;

    /// Replace the whole contents of the slot
    fn write(&mut self, key: &str, contents: &str) -> Result<(), StoreError>;
}

/// Slots kept as `<key>.json` files in a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Option<String> {
        let path = self.slot_path(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Some(contents),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Could not read {}: {}", path.display(), e);
                None
            }
        }
    }

    fn write(&mut self, key: &str, contents: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;

        // Write next to the target and rename so readers see old or new, never half
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.as_file().sync_all()?;

        let path = self.slot_path(key);
        tmp.persist(&path)?;
        debug!("Wrote {} bytes to {}", contents.len(), path.display());
        Ok(())
    }
}

/// Slots held in memory only
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.slots.get(key).cloned()
    }

    fn write(&mut self, key: &str, contents: &str) -> Result<(), StoreError> {
        self.slots.insert(key.to_string(), contents.to_string());
        Ok(())
    }
}
