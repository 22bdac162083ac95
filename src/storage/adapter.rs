use log::{debug, error, info};

use super::StorageBackend;
use crate::errors::{SaveError, StorageError};
use crate::prelude::Contact;

/// Key under which the whole collection is stored.
pub const STORAGE_KEY: &str = "contacts";

/// Reads and writes the contact collection as one JSON blob.
///
/// This is the only type that touches the backend. Every call makes a
/// single attempt; failures are logged and, for saves, returned.
pub struct PersistenceAdapter {
    backend: Box<dyn StorageBackend>,
    key: String,
}

impl PersistenceAdapter {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self::with_key(backend, STORAGE_KEY)
    }

    pub fn with_key(backend: Box<dyn StorageBackend>, key: &str) -> Self {
        Self {
            backend,
            key: key.to_string(),
        }
    }

    pub fn medium(&self) -> &str {
        self.backend.medium()
    }

    /// Returns the stored collection, or an empty one.
    ///
    /// A blob that does not deserialize is removed from the store, so a
    /// corrupt entry can never keep the directory from starting.
    pub fn load(&mut self) -> Vec<Contact> {
        let data = match self.backend.get_item(&self.key) {
            Ok(Some(data)) => data,
            Ok(None) => {
                debug!("No stored contacts under '{}'", self.key);
                return Vec::new();
            }
            Err(e) => {
                error!("Error loading contacts: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Contact>>(&data) {
            Ok(contacts) => {
                info!(
                    "Loaded {} contacts from {} storage",
                    contacts.len(),
                    self.backend.medium()
                );
                contacts
            }
            Err(e) => {
                error!("Error loading contacts: {}; discarding stored data", e);
                if let Err(e) = self.backend.remove_item(&self.key) {
                    error!("Could not remove corrupt contacts blob: {}", e);
                }
                Vec::new()
            }
        }
    }

    /// Replaces the stored collection with `contacts`.
    pub fn save(&mut self, contacts: &[Contact]) -> Result<(), SaveError> {
        let data = serde_json::to_string(contacts).map_err(|e| {
            error!("Error saving contacts: {}", e);
            SaveError::Unknown(e.to_string())
        })?;

        match self.backend.set_item(&self.key, &data) {
            Ok(()) => {
                debug!("Saved {} contacts ({} bytes)", contacts.len(), data.len());
                Ok(())
            }
            Err(e @ StorageError::QuotaExceeded { .. }) => {
                error!("Contacts storage quota exceeded: {}", e);
                Err(SaveError::QuotaExceeded)
            }
            Err(e) => {
                error!("Error saving contacts: {}", e);
                Err(SaveError::Unknown(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::ContactFields;
    use crate::storage::memory::MemoryBackend;

    fn contact(id: &str, name: &str) -> Contact {
        Contact::new(
            id.to_string(),
            ContactFields::new(name, "123-4567890", "a@b.com", "1 Rd", "https://x.com/i.png"),
        )
    }

    fn adapter_with(blob: &str) -> PersistenceAdapter {
        let mut backend = MemoryBackend::unbounded();
        backend
            .set_item(STORAGE_KEY, blob)
            .expect("unbounded backend accepts writes");
        PersistenceAdapter::new(Box::new(backend))
    }

    #[test]
    fn missing_key_loads_empty() {
        let mut adapter = PersistenceAdapter::new(Box::new(MemoryBackend::unbounded()));
        assert!(adapter.load().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() -> Result<(), SaveError> {
        let mut adapter = PersistenceAdapter::new(Box::new(MemoryBackend::unbounded()));
        let mut blocked = contact("2", "Bob");
        blocked.blocked = true;
        let contacts = vec![contact("1", "Ann"), blocked, contact("3", "Cy")];

        adapter.save(&contacts)?;
        let loaded = adapter.load();
        adapter.save(&loaded)?;

        assert_eq!(adapter.load(), contacts);
        Ok(())
    }

    #[test]
    fn corrupt_blob_is_discarded() {
        for blob in ["{not json", r#"{"id":"1"}"#, r#"[{"id":"1"}]"#, "\"text\""] {
            let mut adapter = adapter_with(blob);

            assert!(adapter.load().is_empty(), "blob {blob} should be corrupt");
            assert_eq!(
                adapter.backend.get_item(STORAGE_KEY).unwrap_or_default(),
                None,
                "blob {blob} should be removed"
            );
        }
    }

    #[test]
    fn accepts_blob_written_by_the_browser_version() {
        let blob = r#"[{"id":"lq2x9k3abc","name":"Ann","phone":"123-4567890",
            "email":"a@b.com","address":"1 Rd","imageUrl":"https://x.com/i.png",
            "blocked":true}]"#;
        let mut adapter = adapter_with(blob);

        let contacts = adapter.load();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].id, "lq2x9k3abc");
        assert!(contacts[0].blocked);
    }

    #[test]
    fn quota_failure_is_returned_not_raised() {
        let mut adapter = PersistenceAdapter::new(Box::new(MemoryBackend::new(Some(64))));

        let contacts = vec![contact("1", "Ann"), contact("2", "Bob")];
        assert_eq!(adapter.save(&contacts), Err(SaveError::QuotaExceeded));

        // Nothing was written
        assert!(adapter.load().is_empty());
    }
}
