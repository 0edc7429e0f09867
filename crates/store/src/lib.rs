//! # AI Oversight Store
//!
//! Persistence for the admin editor's working copy.
//!
//! Every key carries the `ai-oversight:` prefix so the store can share a
//! namespace (browser storage, a settings file) with other applications and
//! still be cleared without touching their entries.
//!
//! ## Components
//!
//! - `StoreKey` - Prefixed key construction and detection
//! - `KeyValueStore` - Storage abstraction, `MemoryStore` and `FileStore`
//! - `AdminRepository` - Typed, versioned admin state on top of a store

mod admin;
mod error;
mod file;
mod key;
mod memory;

pub use admin::{AdminRepository, AdminState, CURRENT_SCHEMA_VERSION};
pub use error::{Result, StoreError};
pub use file::FileStore;
pub use key::{is_product_key, StoreKey, KEY_PREFIX};
pub use memory::{KeyValueStore, MemoryStore};
