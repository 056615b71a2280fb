use std::fs;
use std::path::{Path, PathBuf};

use super::KeyValueStore;
use crate::error::MentorError;

/// Stores every key as `<base_dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    pub fn with_dir(base_dir: impl Into<PathBuf>) -> Result<Self, MentorError> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).map_err(|e| {
            MentorError::Config(format!(
                "Failed to create data directory {}: {}",
                base_dir.display(),
                e
            ))
        })?;

        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base_dir.join(format!("{}.json", safe))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, MentorError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }

        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| MentorError::storage(key, format!("Failed to read record: {}", e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), MentorError> {
        let path = self.key_path(key);
        let tmp_path = path.with_extension("json.tmp");

        fs::write(&tmp_path, value).map_err(|e| {
            MentorError::storage(key, format!("Failed to write temporary record: {}", e))
        })?;

        fs::rename(&tmp_path, &path)
            .map_err(|e| MentorError::storage(key, format!("Failed to rename record: {}", e)))?;

        tracing::debug!("Persisted {} ({} bytes)", key, value.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_key_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::with_dir(dir.path()).unwrap();
        assert!(store.get("smp_chats_v1").unwrap().is_none());
    }

    #[test]
    fn set_then_get_survives_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let mut store = FileStore::with_dir(dir.path()).unwrap();
            store.set("smp_style_v1", "direct").unwrap();
        }
        let store = FileStore::with_dir(dir.path()).unwrap();
        assert_eq!(store.get("smp_style_v1").unwrap().as_deref(), Some("direct"));
        assert!(!dir.path().join("smp_style_v1.json.tmp").exists());
    }

    #[test]
    fn keys_are_sanitised_into_file_names() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::with_dir(dir.path()).unwrap();
        store.set("../escape", "x").unwrap();
        assert!(dir.path().join("___escape.json").exists());
        assert_eq!(store.get("../escape").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn creates_nested_base_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileStore::with_dir(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(store.base_dir(), nested.as_path());
    }
}
