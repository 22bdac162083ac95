pub mod contact;
pub mod manager;
pub mod notification;
pub mod search;

pub use contact::{Contact, ContactFields};
pub use manager::ContactStore;
pub use notification::{NotificationEvent, NotificationKind};
