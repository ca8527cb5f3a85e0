use super::hash::compute_hash;
use crate::error::StoreError;
use ahash::AHashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Durable key-value storage for cache records, addressed by subject id.
///
/// Values are opaque bytes; decoding and the cache policy live in
/// [`FlowCache`](super::FlowCache).
pub trait CacheStore {
    fn load(&self, subject_id: &str) -> Result<Option<Vec<u8>>, StoreError>;
    fn save(&mut self, subject_id: &str, bytes: &[u8]) -> Result<(), StoreError>;
    fn remove(&mut self, subject_id: &str) -> Result<(), StoreError>;
}

/// A process-local store, mainly for tests and short-lived tools.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: AHashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl CacheStore for MemoryStore {
    fn load(&self, subject_id: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.records.get(subject_id).cloned())
    }

    fn save(&mut self, subject_id: &str, bytes: &[u8]) -> Result<(), StoreError> {
        self.records.insert(subject_id.to_string(), bytes.to_vec());
        Ok(())
    }

    fn remove(&mut self, subject_id: &str) -> Result<(), StoreError> {
        self.records.remove(subject_id);
        Ok(())
    }
}

/// Stores one file per subject inside a directory.
///
/// Records are written to a temporary file and renamed into place, so an
/// interrupted write never replaces a good record with a partial one.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens (and creates if needed) the cache directory.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| StoreError::Io {
            subject_id: String::new(),
            source: e,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the record of a subject. The readable prefix is
    /// sanitized; the hash suffix keeps distinct ids from sharing a file.
    pub fn path_for(&self, subject_id: &str) -> PathBuf {
        let readable: String = subject_id
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
            .take(48)
            .collect();
        self.dir
            .join(format!("{}-{}.flow", readable, compute_hash(subject_id)))
    }
}

impl CacheStore for FileStore {
    fn load(&self, subject_id: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(self.path_for(subject_id)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io {
                subject_id: subject_id.to_string(),
                source: e,
            }),
        }
    }

    fn save(&mut self, subject_id: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let io_error = |e| StoreError::Io {
            subject_id: subject_id.to_string(),
            source: e,
        };
        let path = self.path_for(subject_id);
        let tmp_path = path.with_extension("flow.tmp");

        let mut file = fs::File::create(&tmp_path).map_err(io_error)?;
        file.write_all(bytes).map_err(io_error)?;
        file.sync_all().map_err(io_error)?;
        fs::rename(&tmp_path, &path).map_err(io_error)
    }

    fn remove(&mut self, subject_id: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(subject_id)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io {
                subject_id: subject_id.to_string(),
                source: e,
            }),
        }
    }
}
