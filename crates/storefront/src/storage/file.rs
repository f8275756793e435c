//! File-backed blob store.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::{BlobStore, StorageError};

/// A blob store persisting each key as a file under a data directory.
///
/// The directory is created on first write. Keys are plain names (the cart
/// store uses a single fixed key), so they map directly to file names.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory does not need to
    /// exist yet.
    #[must_use]
    pub const fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> FileStore {
        let dir = std::env::temp_dir().join(format!("tienda-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        FileStore::new(dir)
    }

    #[test]
    fn test_missing_key_is_none() {
        let store = temp_store("missing");
        assert_eq!(store.get("cart").unwrap(), None);
    }

    #[test]
    fn test_round_trip_through_the_filesystem() {
        let store = temp_store("round-trip");
        store.set("cart", "[{\"product_id\":1}]").unwrap();
        assert_eq!(
            store.get("cart").unwrap().as_deref(),
            Some("[{\"product_id\":1}]")
        );

        // A fresh store over the same directory sees the same value
        let reopened = FileStore::new(store.dir.clone());
        assert_eq!(
            reopened.get("cart").unwrap().as_deref(),
            Some("[{\"product_id\":1}]")
        );
    }

    #[test]
    fn test_set_replaces_previous_value() {
        let store = temp_store("replace");
        store.set("cart", "first").unwrap();
        store.set("cart", "second").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("second"));
    }
}
