//! Key-value persistence medium
//!
//! The record store persists opaque text blobs under string keys. Any
//! implementation of [`StorageMedium`] will do; the store never assumes
//! more than `get`/`set` semantics.
//!
//! [`FileMedium`] is the production implementation: one file per key under
//! a data directory, written atomically (write to a temp file, then rename)
//! so a crash mid-write never leaves a half-written blob behind.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::error::MediumError;

/// A string-keyed store of opaque serialized blobs
#[async_trait]
pub trait StorageMedium: Send + Sync {
    /// Read the blob under `key`, or `None` if the key has never been set
    async fn get(&self, key: &str) -> Result<Option<String>, MediumError>;

    /// Write `value` under `key`, replacing any prior content wholesale
    async fn set(&self, key: &str, value: &str) -> Result<(), MediumError>;
}

/// File-backed medium: one `<key>.json` file per key under a data directory
#[derive(Debug, Clone)]
pub struct FileMedium {
    data_dir: PathBuf,
}

impl FileMedium {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The file backing a given key
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl StorageMedium for FileMedium {
    async fn get(&self, key: &str) -> Result<Option<String>, MediumError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(MediumError::new(key, err)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), MediumError> {
        let path = self.path_for(key);
        atomic_write(&path, value.as_bytes())
            .await
            .map_err(|err| MediumError::new(key, err))
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
async fn atomic_write(path: &Path, data: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    // Temp file in the same directory so the rename stays on one filesystem.
    let temp_path = path.with_extension("tmp");

    let mut file = fs::File::create(&temp_path).await?;
    file.write_all(data).await?;
    file.sync_all().await?;
    drop(file);

    fs::rename(&temp_path, path).await
}

/// In-memory medium for tests and ephemeral sessions
///
/// Reads and writes can be independently switched into a failing mode to
/// exercise storage-error paths.
#[derive(Debug, Default)]
pub struct MemoryMedium {
    entries: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `get` fail
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `set` fail
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Current raw blob under a key, bypassing failure injection
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().expect("medium lock poisoned").get(key).cloned()
    }

    /// Seed a raw blob under a key, bypassing failure injection
    pub fn insert_raw(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries
            .lock()
            .expect("medium lock poisoned")
            .insert(key.into(), value.into());
    }
}

#[async_trait]
impl StorageMedium for MemoryMedium {
    async fn get(&self, key: &str) -> Result<Option<String>, MediumError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(MediumError::message(key, "simulated read failure"));
        }
        Ok(self.entries.lock().expect("medium lock poisoned").get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), MediumError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(MediumError::message(key, "simulated write failure"));
        }
        self.entries
            .lock()
            .expect("medium lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
