//! Persisted key-value storage for the session token. The session store only
//! needs `get`, `set` and `remove`, so any durable backend can sit behind
//! [`TokenStorage`]. Values are bearer credentials: backends must not log them.

use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};
use tracing::warn;

/// Key under which the bearer token is persisted.
pub const TOKEN_KEY: &str = "token";

#[derive(Debug)]
pub enum StorageError {
    Io(io::Error),
    Serialization(serde_json::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(err) => write!(formatter, "Storage I/O error: {err}"),
            StorageError::Serialization(err) => {
                write!(formatter, "Storage encoding error: {err}")
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(err) => Some(err),
            StorageError::Serialization(err) => Some(err),
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        StorageError::Io(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err)
    }
}

/// Synchronous key-value capability backing session persistence.
pub trait TokenStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    /// Returns an error if the backend cannot persist the value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// # Errors
    /// Returns an error if the backend cannot drop the value.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Process-local storage, useful for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

/// JSON object on disk, one string value per key. The file is created
/// owner-only on unix and replaced atomically on every write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let payload = serde_json::to_vec_pretty(entries)?;
        let staging = self.path.with_extension("tmp");
        write_private(&staging, &payload)?;
        fs::rename(&staging, &self.path)?;

        Ok(())
    }
}

fn write_private(path: &Path, payload: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(payload)?;
    file.sync_all()
}

impl TokenStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self.read_all() {
            Ok(entries) => entries.get(key).cloned(),
            Err(err) => {
                warn!(path = %self.path.display(), "Failed to read storage: {err}");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_path(label: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("waypoint-storage-test-{label}-{}", Uuid::new_v4()))
            .join("storage.json")
    }

    #[test]
    fn memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get(TOKEN_KEY), None);

        storage.set(TOKEN_KEY, "T1").unwrap();
        assert_eq!(storage.get(TOKEN_KEY), Some("T1".to_string()));

        storage.remove(TOKEN_KEY).unwrap();
        assert_eq!(storage.get(TOKEN_KEY), None);
    }

    #[test]
    fn file_storage_survives_reopen() {
        let path = temp_path("reopen");

        FileStorage::new(&path).set(TOKEN_KEY, "T1").unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get(TOKEN_KEY), Some("T1".to_string()));

        reopened.remove(TOKEN_KEY).unwrap();
        assert_eq!(FileStorage::new(&path).get(TOKEN_KEY), None);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn file_storage_keeps_other_keys() {
        let path = temp_path("keys");
        let storage = FileStorage::new(&path);

        storage.set("theme", "dark").unwrap();
        storage.set(TOKEN_KEY, "T1").unwrap();
        storage.remove(TOKEN_KEY).unwrap();

        assert_eq!(storage.get("theme"), Some("dark".to_string()));
        assert_eq!(storage.get(TOKEN_KEY), None);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn file_storage_missing_file_is_empty() {
        let storage = FileStorage::new(temp_path("missing"));
        assert_eq!(storage.get(TOKEN_KEY), None);
        assert!(storage.remove(TOKEN_KEY).is_ok());
    }

    #[test]
    fn file_storage_reports_corrupt_file_on_write() {
        let path = temp_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"not json").unwrap();

        let storage = FileStorage::new(&path);
        assert_eq!(storage.get(TOKEN_KEY), None);
        assert!(matches!(
            storage.set(TOKEN_KEY, "T1"),
            Err(StorageError::Serialization(_))
        ));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn file_storage_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let path = temp_path("perms");
        FileStorage::new(&path).set(TOKEN_KEY, "T1").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
