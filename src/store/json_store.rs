use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::relay::message::Message;

/// Represents the kind of error that can occur accessing the store file.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store file could not be read or written.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The store file does not hold a valid JSON mapping.
    #[error("store file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// The mapping persisted on disk: receipt timestamp to message.
pub type StoreMap = BTreeMap<String, Message>;

/// The JSON file persisting all received messages.
///
/// Whole-file granularity: every insert is a full read-decode-merge-encode-
/// write cycle. Correctness relies on a single writer; only the relay
/// listener writes.
#[derive(Clone, Debug)]
pub struct MessageStore {
    path: PathBuf,
}

impl MessageStore {
    /// Creates a handle for the store file at the passed path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the backing file holding an empty mapping if it is absent,
    /// along with its parent directory.
    ///
    /// # Errors
    ///
    /// Throws a `StoreError` if the directory or file cannot be created.
    pub fn init(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !self.path.exists() {
            fs::write(&self.path, "{}")?;
        }
        Ok(())
    }

    /// Reads the whole mapping; an absent file is an empty mapping.
    ///
    /// # Errors
    ///
    /// Throws a `StoreError` if the file cannot be read or does not decode.
    pub fn load(&self) -> Result<StoreMap, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(StoreMap::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&text)?)
    }

    /// Merges one entry into the mapping and rewrites the whole file.
    ///
    /// An entry under an identical timestamp is overwritten (last write
    /// wins). The rewrite is pretty-printed and keeps non-ASCII characters
    /// unescaped. The rewrite is not atomic; a crash mid-write can truncate
    /// the file.
    ///
    /// # Errors
    ///
    /// Throws a `StoreError` if the read-modify-write cycle fails.
    pub fn insert(&self, timestamp: &str, message: &Message) -> Result<(), StoreError> {
        let mut entries = self.load()?;
        entries.insert(timestamp.to_string(), message.clone());
        fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }
}
