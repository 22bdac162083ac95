//! A personal contact directory persisted in a capacity-bounded local store.
//!
//! [`ContactStore`](domain::ContactStore) owns the collection and enforces
//! its invariants; [`PersistenceAdapter`](storage::adapter::PersistenceAdapter)
//! writes it to a [`StorageBackend`](storage::StorageBackend).

pub mod cli;
pub mod domain;
pub mod errors;
pub mod prelude;
pub mod storage;
