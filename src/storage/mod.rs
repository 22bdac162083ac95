pub mod adapter;
pub mod file;
pub mod memory;

use std::path::PathBuf;

use crate::errors::{AppError, StorageError};

/// Browser local storage caps an origin at roughly five megabytes.
pub const DEFAULT_QUOTA_BYTES: u64 = 5 * 1024 * 1024;

/// A synchronous, capacity-bounded key-value store holding string blobs.
pub trait StorageBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the value under `key`. On `QuotaExceeded` the old value stays.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;

    fn medium(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMediums {
    Memory,
    File,
}

impl StorageMediums {
    pub fn from(str: &str) -> Result<Self, AppError> {
        match str.to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(StorageMediums::Memory),
            "file" | "json" => Ok(StorageMediums::File),
            _ => Err(AppError::Config(format!(
                "'{}' is not a recognized storage medium (memory, file)",
                str
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub medium: StorageMediums,
    pub data_dir: PathBuf,
    pub quota_bytes: Option<u64>,
}

pub fn parse_storage_backend(config: &StorageConfig) -> Box<dyn StorageBackend> {
    match config.medium {
        StorageMediums::Memory => Box::new(memory::MemoryBackend::new(config.quota_bytes)),
        StorageMediums::File => Box::new(file::FileBackend::new(
            config.data_dir.clone(),
            config.quota_bytes,
        )),
    }
}

/// Bytes an item occupies in the quota: key plus value.
pub(crate) fn item_size(key: &str, value_len: u64) -> u64 {
    key.len() as u64 + value_len
}

pub(crate) fn check_quota(
    capacity: Option<u64>,
    used_by_others: u64,
    requested: u64,
) -> Result<(), StorageError> {
    match capacity {
        Some(capacity) if used_by_others + requested > capacity => {
            Err(StorageError::QuotaExceeded {
                requested: used_by_others + requested,
                capacity,
            })
        }
        _ => Ok(()),
    }
}
