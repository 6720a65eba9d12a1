//! Storage layer (key-value).

pub mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore, StorageError};

/// Storage keys as constants.
pub mod keys {
    /// The full workout log, serialized as a JSON array
    pub const WORKOUTS: &str = "workouts";
}
