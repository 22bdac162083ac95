use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{StorageBackend, check_quota, item_size};
use crate::errors::StorageError;

const ITEM_EXTENSION: &str = "json";

/// Keeps each item in `<dir>/<key>.json`.
pub struct FileBackend {
    dir: PathBuf,
    capacity: Option<u64>,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>, capacity: Option<u64>) -> Self {
        Self {
            dir: dir.into(),
            capacity,
        }
    }

    pub fn item_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", key, ITEM_EXTENSION))
    }

    /// Quota usage of every item except `skip_key`.
    fn used_by_others(&self, skip_key: &str) -> Result<u64, StorageError> {
        if !fs::exists(&self.dir)? {
            return Ok(0);
        }

        let mut used = 0;
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();

            if path.extension().is_none_or(|ext| ext != ITEM_EXTENSION) {
                continue;
            }
            let Some(key) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if key == skip_key {
                continue;
            }

            used += item_size(key, fs::metadata(&path)?.len());
        }
        Ok(used)
    }
}

impl StorageBackend for FileBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.item_path(key);
        if !fs::exists(&path)? {
            return Ok(None);
        }

        // Bytes that are not UTF-8 are kept lossily so the caller sees a
        // malformed blob instead of an I/O failure
        let bytes = fs::read(&path)?;
        Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        check_quota(
            self.capacity,
            self.used_by_others(key)?,
            item_size(key, value.len() as u64),
        )?;

        create_dir(&self.dir)?;

        // Write a sibling first, then rename over the old item
        let tmp_path = self.dir.join(format!("{}.{}.tmp", key, ITEM_EXTENSION));
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&tmp_path)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, self.item_path(key))?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.item_path(key);
        if fs::exists(&path)? {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn medium(&self) -> &str {
        "file"
    }
}

fn create_dir(dir: &Path) -> Result<(), StorageError> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}
