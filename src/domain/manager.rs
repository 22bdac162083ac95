use std::collections::HashSet;

use log::{debug, warn};

use super::contact::generate_id;
use super::notification::{NotificationEvent, Observer, messages};
use super::search;
use crate::errors::{EditError, NotFoundError, SaveError, ValidationError};
use crate::prelude::{Contact, ContactFields};
use crate::storage::adapter::PersistenceAdapter;

/// The authoritative, ordered collection of contacts.
///
/// Every mutation validates, changes the collection, saves the whole
/// collection and then emits exactly one [`NotificationEvent`].
pub struct ContactStore {
    contacts: Vec<Contact>,
    persistence: PersistenceAdapter,
    observers: Vec<Observer>,
    last_save_error: Option<SaveError>,
}

impl ContactStore {
    /// Loads the collection once from `persistence`.
    pub fn new(mut persistence: PersistenceAdapter) -> Self {
        let contacts = sanitize(persistence.load());

        Self {
            contacts,
            persistence,
            observers: Vec::new(),
            last_save_error: None,
        }
    }

    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&NotificationEvent) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn get(&self, id: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    pub fn count(&self) -> usize {
        self.contacts.len()
    }

    /// Result of the most recent save attempt; `None` after a durable write.
    pub fn last_save_error(&self) -> Option<&SaveError> {
        self.last_save_error.as_ref()
    }

    pub fn storage_medium(&self) -> &str {
        self.persistence.medium()
    }

    pub fn create(&mut self, fields: ContactFields) -> Result<Contact, ValidationError> {
        let fields = self.validate(&fields)?;

        let contact = Contact::new(self.unique_id(), fields);
        debug!("Creating contact {}", contact.id);
        self.contacts.push(contact.clone());

        self.persist(messages::CONTACT_ADDED);
        Ok(contact)
    }

    pub fn edit(&mut self, id: &str, fields: ContactFields) -> Result<Contact, EditError> {
        let fields = self.validate(&fields)?;

        let Some(index) = self.position(id) else {
            return Err(self.not_found(id).into());
        };

        let contact = &mut self.contacts[index];
        contact.apply(fields);
        let contact = contact.clone();

        self.persist(messages::CONTACT_UPDATED);
        Ok(contact)
    }

    pub fn delete(&mut self, id: &str) -> Result<(), NotFoundError> {
        let Some(index) = self.position(id) else {
            return Err(self.not_found(id));
        };

        self.contacts.remove(index);

        self.persist(messages::CONTACT_DELETED);
        Ok(())
    }

    pub fn delete_all(&mut self) {
        debug!("Deleting all {} contacts", self.contacts.len());
        self.contacts.clear();

        self.persist(messages::ALL_DELETED);
    }

    pub fn toggle_block(&mut self, id: &str) -> Result<Contact, NotFoundError> {
        let Some(index) = self.position(id) else {
            return Err(self.not_found(id));
        };

        let contact = &mut self.contacts[index];
        contact.blocked = !contact.blocked;
        let contact = contact.clone();

        let message = if contact.blocked {
            messages::CONTACT_BLOCKED
        } else {
            messages::CONTACT_UNBLOCKED
        };
        self.persist(message);
        Ok(contact)
    }

    /// Contacts whose name contains `query`, ignoring case, in stored order.
    pub fn search(&self, query: &str) -> Vec<Contact> {
        search::search_by_name(&self.contacts, query)
    }

    fn validate(&mut self, fields: &ContactFields) -> Result<ContactFields, ValidationError> {
        fields.validated().inspect_err(|e| {
            self.notify(NotificationEvent::warning(e.to_string()));
        })
    }

    fn not_found(&mut self, id: &str) -> NotFoundError {
        debug!("No contact with id {}", id);
        self.notify(NotificationEvent::warning(messages::NOT_FOUND));
        NotFoundError::new(id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.contacts.iter().position(|c| c.id == id)
    }

    fn unique_id(&self) -> String {
        loop {
            let id = generate_id();
            if self.position(&id).is_none() {
                return id;
            }
        }
    }

    /// Saves the full collection and reports the outcome.
    ///
    /// A quota failure replaces the success message with a warning; other
    /// save failures are only logged by the adapter.
    fn persist(&mut self, success_message: &str) {
        let result = self.persistence.save(&self.contacts);

        let event = match &result {
            Err(SaveError::QuotaExceeded) => NotificationEvent::warning(messages::QUOTA_EXCEEDED),
            Ok(()) | Err(SaveError::Unknown(_)) => NotificationEvent::success(success_message),
        };

        self.last_save_error = result.err();
        self.notify(event);
    }

    fn notify(&mut self, event: NotificationEvent) {
        for observer in self.observers.iter_mut() {
            observer(&event);
        }
    }
}

/// Drops loaded records that would break the collection invariants.
fn sanitize(loaded: Vec<Contact>) -> Vec<Contact> {
    let mut seen: HashSet<String> = HashSet::with_capacity(loaded.len());

    loaded
        .into_iter()
        .filter(|contact| {
            if !contact.is_complete() {
                warn!("Dropping stored contact {} with empty fields", contact.id);
                return false;
            }
            if !seen.insert(contact.id.clone()) {
                warn!("Dropping stored contact with duplicate id {}", contact.id);
                return false;
            }
            true
        })
        .collect()
}
