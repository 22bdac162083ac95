use std::fmt;

/// User-facing texts for every outcome the store reports.
pub mod messages {
    pub const CONTACT_ADDED: &str = "Contact added successfully!";
    pub const CONTACT_UPDATED: &str = "Contact updated successfully!";
    pub const CONTACT_DELETED: &str = "Contact deleted successfully!";
    pub const ALL_DELETED: &str = "All contacts deleted!";
    pub const CONTACT_BLOCKED: &str = "Contact blocked successfully!";
    pub const CONTACT_UNBLOCKED: &str = "Contact unblocked successfully!";

    pub const EMPTY_FIELD: &str = "Kindly fill all fields";
    pub const INVALID_EMAIL: &str = "Please enter a valid email address";
    pub const INVALID_PHONE: &str = "Please enter a valid phone number";
    pub const INVALID_IMAGE_URL: &str = "Please enter a valid image URL";
    pub const NOT_FOUND: &str = "Contact not found";
    pub const QUOTA_EXCEEDED: &str = "Storage quota exceeded. Please delete some contacts.";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Warning,
}

/// One event per completed store operation, handed to every observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationEvent {
    pub kind: NotificationKind,
    pub message: String,
}

impl NotificationEvent {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Warning,
            message: message.into(),
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self.kind, NotificationKind::Warning)
    }
}

impl fmt::Display for NotificationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

pub type Observer = Box<dyn FnMut(&NotificationEvent)>;
