use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, instrument};

use super::{Storage, StorageError};

/// File-backed storage.
///
/// Each key maps to `<dir>/<encoded-key>.json`. Keys are URL-encoded so that
/// characters like `@` and `:` (and path separators) never reach the
/// filesystem verbatim. Writes go to a temporary sibling file which is then
/// renamed over the target, so readers see either the old or the new value.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a storage rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file holding `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidKey` if the key is empty.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", urlencoding::encode(key))))
    }
}

#[async_trait]
impl Storage for FileStorage {
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No stored value");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, value), fields(dir = %self.dir.display(), bytes = value.len()))]
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await?;

        debug!(path = %path.display(), "Stored value");
        Ok(())
    }

    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_path_for_encodes_key() {
        let storage = FileStorage::new("/tmp/carts");
        assert_eq!(
            storage.path_for("@GoMarketplace:cart").unwrap(),
            PathBuf::from("/tmp/carts/%40GoMarketplace%3Acart.json")
        );
        assert_eq!(
            storage.path_for("plain_key-1").unwrap(),
            PathBuf::from("/tmp/carts/plain_key-1.json")
        );
    }

    #[test]
    fn test_path_for_stays_in_dir() {
        let storage = FileStorage::new("/tmp/carts");
        let path = storage.path_for("../../etc/passwd").unwrap();
        assert_eq!(path.parent(), Some(Path::new("/tmp/carts")));
    }

    #[test]
    fn test_path_for_rejects_empty_key() {
        let storage = FileStorage::new("/tmp/unused");
        assert!(matches!(
            storage.path_for(""),
            Err(StorageError::InvalidKey(_))
        ));
    }

    #[tokio::test]
    async fn test_roundtrip_in_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));

        assert_eq!(storage.get_item("@app:cart").await.unwrap(), None);

        storage.set_item("@app:cart", "[1]").await.unwrap();
        storage.set_item("@app:cart", "[2]").await.unwrap();
        assert_eq!(
            storage.get_item("@app:cart").await.unwrap().as_deref(),
            Some("[2]")
        );

        let path = storage.path_for("@app:cart").unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.remove_item("k").await.unwrap();
        storage.set_item("k", "v").await.unwrap();
        storage.remove_item("k").await.unwrap();
        assert_eq!(storage.get_item("k").await.unwrap(), None);
    }
}
