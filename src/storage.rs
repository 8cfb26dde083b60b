// Key-value persistence - the local-storage analogue behind the tracker
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("could not determine data directory")]
    NoDataDir,
}

/// String-keyed, string-valued persistence. Writes are synchronous; a
/// failing store degrades the tracker to in-memory state, never to a panic.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Volatile store for tests and hosts that bring their own persistence.
#[derive(Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object file. The whole map is rewritten on
/// every mutation; the payloads are a handful of short strings.
pub struct FileStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl FileStore {
    /// Opens the store at `path`, starting empty when the file is missing
    /// or unreadable. A corrupt file is discarded rather than propagated.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = Self::read_map(&path).unwrap_or_else(|e| {
            log::warn!("discarding unreadable storage file {}: {e}", path.display());
            HashMap::new()
        });
        Self { path, values }
    }

    /// Opens the store at the platform data directory.
    pub fn open_default() -> Result<Self, StorageError> {
        let proj_dirs =
            directories::ProjectDirs::from("", "", "navtrack").ok_or(StorageError::NoDataDir)?;
        Ok(Self::open(proj_dirs.data_dir().join("storage.json")))
    }

    fn read_map(path: &Path) -> Result<HashMap<String, String>, StorageError> {
        if !path.exists() {
            return Ok(HashMap::new());
        }
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn write_map(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        self.write_map()
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.values.remove(key).is_some() {
            self.write_map()?;
        }
        Ok(())
    }
}
