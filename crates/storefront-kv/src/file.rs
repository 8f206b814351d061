//! Directory-backed key-value store.

use crate::{KvError, KvStore};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const EXTENSION: &str = "json";

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes go through a temporary file followed by a rename, so a reader
/// never observes a partially written value.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, KvError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| KvError::OpenError(format!("{}: {}", dir.display(), e)))?;
        Ok(Self { dir })
    }

    /// The directory backing this store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, KvError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.{}", key, EXTENSION)))
    }

    fn staging_path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!(".{}.{}.tmp", key, EXTENSION))
    }

    fn stage(&self, key: &str, value: &[u8]) -> Result<PathBuf, KvError> {
        let staging = self.staging_path_for(key);
        let mut file = fs::File::create(&staging)?;
        file.write_all(value)?;
        file.sync_all()?;
        Ok(staging)
    }
}

fn validate_key(key: &str) -> Result<(), KvError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(KvError::InvalidKey(key.to_string()))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KvError> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KvError> {
        let path = self.path_for(key)?;
        let staging = self.stage(key, value)?;
        fs::rename(&staging, &path)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), KvError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> Result<Vec<String>, KvError> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|e| e == EXTENSION) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    if !stem.starts_with('.') {
                        keys.push(stem.to_string());
                    }
                }
            }
        }
        keys.sort();
        Ok(keys)
    }

    /// Check every key, stage every value, and only start renaming once
    /// all of them were written successfully.
    fn set_many(&self, entries: &[(String, Vec<u8>)]) -> Result<(), KvError> {
        let paths = entries
            .iter()
            .map(|(key, _)| self.path_for(key))
            .collect::<Result<Vec<_>, _>>()?;

        let mut staged = Vec::with_capacity(entries.len());
        for ((key, value), path) in entries.iter().zip(paths) {
            match self.stage(key, value) {
                Ok(staging) => staged.push((staging, path)),
                Err(e) => {
                    for (staging, _) in &staged {
                        let _ = fs::remove_file(staging);
                    }
                    return Err(e);
                }
            }
        }
        for (staging, path) in staged {
            fs::rename(&staging, &path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store.set("products", b"[1,2,3]").unwrap();
        assert_eq!(store.get("products").unwrap(), Some(b"[1,2,3]".to_vec()));
        assert!(dir.path().join("products.json").exists());

        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get("products").unwrap(), Some(b"[1,2,3]".to_vec()));
    }

    #[test]
    fn test_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.get("cart").unwrap(), None);
        assert!(store.delete("cart").is_ok());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(matches!(
            store.set("../escape", b"x"),
            Err(KvError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_keys_skip_staging_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store
            .set_many(&[
                ("orders".to_string(), b"[]".to_vec()),
                ("vendorOrders".to_string(), b"[]".to_vec()),
            ])
            .unwrap();
        fs::write(dir.path().join(".cart.json.tmp"), b"[]").unwrap();

        assert_eq!(store.keys().unwrap(), vec!["orders", "vendorOrders"]);
    }

    #[test]
    fn test_set_many_invalid_key_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        let entries = vec![
            ("products".to_string(), b"[]".to_vec()),
            ("../cart".to_string(), b"[]".to_vec()),
        ];
        assert!(matches!(store.set_many(&entries), Err(KvError::InvalidKey(_))));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
