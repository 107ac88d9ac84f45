//! Admissions Storage Library
//!
//! Storage abstraction for files uploaded with an application (birth certificate,
//! transcript) and a local filesystem implementation.
//!
//! # Storage key format
//!
//! Keys are generated by the server as `{uuid}_{sanitized original name}`. The client
//! filename never decides where a file lands, so two uploads can never overwrite each
//! other. Keys are flat: no `/`, no `..`.

pub mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use keys::{generate_storage_key, sanitize_filename};
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult, StoredFile};
