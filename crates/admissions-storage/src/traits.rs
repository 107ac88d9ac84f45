//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Where an uploaded file ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Internal identifier, used for delete.
    pub key: String,
    /// Path under which the file is publicly served, e.g. `/uploads/{key}`.
    pub url: String,
    pub size_bytes: usize,
}

/// Storage abstraction trait
///
/// The gateway only depends on this trait, so tests can swap the backend.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store `data` under a newly generated key derived from `filename`.
    async fn upload(
        &self,
        filename: &str,
        content_type: Option<&str>,
        data: Bytes,
    ) -> StorageResult<StoredFile>;

    /// Delete a file by its storage key
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;
}
