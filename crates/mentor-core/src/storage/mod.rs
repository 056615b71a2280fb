mod file;

pub use file::FileStore;

use crate::error::MentorError;
use std::collections::HashMap;

/// Durable key -> document storage. Each key holds one self-contained
/// document; writes to different keys are independent.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, MentorError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), MentorError>;
}

/// Volatile store, used by tests and one-shot runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, MentorError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), MentorError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, MentorError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), MentorError> {
        (**self).set(key, value)
    }
}
