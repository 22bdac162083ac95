use std::collections::HashMap;

use super::{StorageBackend, check_quota, item_size};
use crate::errors::StorageError;

/// In-process store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    items: HashMap<String, String>,
    capacity: Option<u64>,
}

impl MemoryBackend {
    pub fn new(capacity: Option<u64>) -> Self {
        Self {
            items: HashMap::new(),
            capacity,
        }
    }

    pub fn unbounded() -> Self {
        Self::new(None)
    }

    pub fn used_bytes(&self) -> u64 {
        self.items
            .iter()
            .map(|(k, v)| item_size(k, v.len() as u64))
            .sum()
    }
}

impl StorageBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let current = self
            .items
            .get(key)
            .map(|v| item_size(key, v.len() as u64))
            .unwrap_or_default();
        let others = self.used_bytes() - current;

        check_quota(self.capacity, others, item_size(key, value.len() as u64))?;

        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }

    fn medium(&self) -> &str {
        "memory"
    }
}
