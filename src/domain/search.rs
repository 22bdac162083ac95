use crate::prelude::Contact;

/// Case-insensitive substring match on the contact name.
///
/// An empty query matches every contact.
pub fn name_matches(contact: &Contact, query: &str) -> bool {
    contact.name.to_lowercase().contains(&query.to_lowercase())
}

/// Filters `contacts` by name, keeping their order. The result is an owned copy.
pub fn search_by_name(contacts: &[Contact], query: &str) -> Vec<Contact> {
    contacts
        .iter()
        .filter(|contact| name_matches(contact, query))
        .cloned()
        .collect()
}
