//! TTL read cache for entity lists and lookups.
//!
//! This module provides the `CacheStore` used by the entity services to
//! keep recently fetched data. Entries are stored as JSON together with the
//! time they were written and are treated as absent once older than the
//! store's TTL.
//!
//! Storage and time are injected:
//! - `MemoryStorage`: session-scoped in-process map
//! - `FileStorage`: one JSON file per key in a cache directory
//! - `SystemClock` / `ManualClock`: wall clock and a hand-driven test clock

pub mod clock;
pub mod storage;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use storage::{CacheStorage, FileStorage, MemoryStorage, StorageError};
pub use store::{CacheEntry, CacheStore};
