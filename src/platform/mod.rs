//! Platform abstraction layer
//!
//! Handles browser/native differences for durable key-value storage
//! (LocalStorage on web, a JSON file on native).

pub mod storage;

pub use storage::{FileStore, KeyValueStore, MemoryStore};
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
