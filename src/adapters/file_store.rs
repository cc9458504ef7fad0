//! File-based key-value store.
//!
//! Each key is one JSON file under the data directory
//! (`<data_dir>/seiun/<key>.json` by default).

use async_trait::async_trait;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::traits::{KeyValueStore, StoreError};

/// The directory name under the platform data directory.
const STORE_DIR: &str = "seiun";

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create a store in the platform data directory.
    ///
    /// Returns `None` if the data directory cannot be determined.
    pub fn in_data_dir() -> Option<Self> {
        let base = dirs::data_dir()?;
        Some(Self::new(base.join(STORE_DIR)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn write_file(path: &Path, value: &str) -> std::io::Result<()> {
        let mut file = File::create(path)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            // Session tokens and the login password live here.
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(value.as_bytes())?;
        file.flush()
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| StoreError::LoadFailed {
                key: key.to_string(),
                message: e.to_string(),
            })
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|e| StoreError::Io(e.to_string()))?;
        }

        Self::write_file(&self.path_for(key), value).map_err(|e| StoreError::SaveFailed {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(());
        }

        fs::remove_file(&path).map_err(|e| StoreError::DeleteFailed {
            key: key.to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store(temp_dir: &TempDir) -> FileStore {
        FileStore::new(temp_dir.path().join(STORE_DIR))
    }

    #[tokio::test]
    async fn test_load_missing_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);
        assert_eq!(store.load("session").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_creates_dir_and_roundtrips() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);
        assert!(!store.dir().exists());

        store.save("session", "{\"a\":1}").await.unwrap();

        assert!(store.path_for("session").exists());
        assert_eq!(
            store.load("session").await.unwrap().as_deref(),
            Some("{\"a\":1}")
        );
    }

    #[tokio::test]
    async fn test_save_replaces_previous_value() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);

        store.save("credential", "old").await.unwrap();
        store.save("credential", "new").await.unwrap();

        assert_eq!(
            store.load("credential").await.unwrap().as_deref(),
            Some("new")
        );
    }

    #[tokio::test]
    async fn test_delete_missing_key_succeeds() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);
        assert!(store.delete("session").await.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_saved_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);
        store.save("credential", "secret").await.unwrap();

        let mode = fs::metadata(store.path_for("credential"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
