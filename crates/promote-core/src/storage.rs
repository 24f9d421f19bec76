//! Storage client trait for the promotion orchestrator.
//!
//! The orchestrator only ever needs three operations against the bucket:
//! an existence check, a server-side copy, and one-shot region detection.
//! Backends implement this trait; an in-memory fake for tests lives in
//! the `fakes` module.

use async_trait::async_trait;

/// Errors raised by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backend rejected the call for lack of permissions.
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// Transport, throttling, or any other backend failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Narrow gateway to the object store.
///
/// Guarantees expected of implementations:
/// - `exists` must not mutate anything and should require list-only
///   permissions (listing filtered by exact key, not a metadata fetch).
/// - `copy` is a server-side copy preserving content type and metadata,
///   overwriting any existing destination object unconditionally.
/// - `detect_region` is called at most once per run, and only when the
///   caller did not pin a region explicitly.
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Whether an object with exactly this key exists in the bucket.
    async fn exists(&self, bucket: &str, key: &str) -> StorageResult<bool>;

    /// Server-side copy within the bucket.
    async fn copy(
        &self,
        bucket: &str,
        source_key: &str,
        destination_key: &str,
    ) -> StorageResult<()>;

    /// Region the bucket lives in.
    async fn detect_region(&self, bucket: &str) -> StorageResult<String>;
}
