pub use crate::domain::{
    Contact, ContactFields, ContactStore, NotificationEvent, NotificationKind,
    contact, notification::messages,
};
pub use crate::errors::{AppError, EditError, NotFoundError, SaveError, StorageError, ValidationError};
pub use crate::storage::{
    self, StorageBackend, StorageConfig, StorageMediums,
    adapter::{PersistenceAdapter, STORAGE_KEY},
    file::FileBackend,
    memory::MemoryBackend,
    parse_storage_backend,
};
