//! In-memory fake storage backend for tests.
//!
//! No network, no credentials. Tests seed objects, run the orchestrator,
//! then assert on recorded calls.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::storage::{StorageClient, StorageError, StorageResult};

/// In-memory `StorageClient` backed by a set of `bucket/key` entries.
///
/// Records every existence check and copy so tests can assert that
/// dry-run never copies and that checks still happen.
#[derive(Debug, Default)]
pub struct MemoryStorageClient {
    objects: Mutex<HashSet<String>>,
    exists_calls: Mutex<Vec<String>>,
    copy_calls: Mutex<Vec<(String, String)>>,
    fail_copies: Mutex<bool>,
    fail_checks: Mutex<bool>,
    region: String,
}

impl MemoryStorageClient {
    pub fn new() -> Self {
        Self {
            region: "us-east-1".to_string(),
            ..Self::default()
        }
    }

    fn entry(bucket: &str, key: &str) -> String {
        format!("{}/{}", bucket, key)
    }

    /// Seed an object into the fake bucket.
    pub fn put_object(&self, bucket: &str, key: &str) {
        self.objects.lock().unwrap().insert(Self::entry(bucket, key));
    }

    /// Make every subsequent `copy` call fail.
    pub fn fail_copies(&self) {
        *self.fail_copies.lock().unwrap() = true;
    }

    /// Make every subsequent `exists` call fail.
    pub fn fail_checks(&self) {
        *self.fail_checks.lock().unwrap() = true;
    }

    /// Keys passed to `exists`, in call order.
    pub fn exists_calls(&self) -> Vec<String> {
        self.exists_calls.lock().unwrap().clone()
    }

    /// `(source_key, destination_key)` pairs passed to `copy`, in order.
    pub fn copy_calls(&self) -> Vec<(String, String)> {
        self.copy_calls.lock().unwrap().clone()
    }

    /// Whether the fake bucket currently holds the key.
    pub fn contains(&self, bucket: &str, key: &str) -> bool {
        self.objects.lock().unwrap().contains(&Self::entry(bucket, key))
    }
}

#[async_trait]
impl StorageClient for MemoryStorageClient {
    async fn exists(&self, bucket: &str, key: &str) -> StorageResult<bool> {
        self.exists_calls.lock().unwrap().push(key.to_string());
        if *self.fail_checks.lock().unwrap() {
            return Err(StorageError::Backend("injected check failure".to_string()));
        }
        Ok(self.objects.lock().unwrap().contains(&Self::entry(bucket, key)))
    }

    async fn copy(
        &self,
        bucket: &str,
        source_key: &str,
        destination_key: &str,
    ) -> StorageResult<()> {
        self.copy_calls
            .lock()
            .unwrap()
            .push((source_key.to_string(), destination_key.to_string()));
        if *self.fail_copies.lock().unwrap() {
            return Err(StorageError::AccessDenied(format!(
                "injected copy failure for {}",
                destination_key
            )));
        }

        let mut objects = self.objects.lock().unwrap();
        if !objects.contains(&Self::entry(bucket, source_key)) {
            return Err(StorageError::Backend(format!(
                "source object missing: {}",
                source_key
            )));
        }
        objects.insert(Self::entry(bucket, destination_key));
        Ok(())
    }

    async fn detect_region(&self, _bucket: &str) -> StorageResult<String> {
        Ok(self.region.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_exists_reflects_seeded_objects() {
        let client = MemoryStorageClient::new();
        client.put_object("bucket", "dev/a.js");

        assert!(client.exists("bucket", "dev/a.js").await.unwrap());
        assert!(!client.exists("bucket", "dev/b.js").await.unwrap());
        assert_eq!(client.exists_calls(), vec!["dev/a.js", "dev/b.js"]);
    }

    #[tokio::test]
    async fn test_copy_creates_destination() {
        let client = MemoryStorageClient::new();
        client.put_object("bucket", "dev/a.js");

        client.copy("bucket", "dev/a.js", "stage/a.js").await.unwrap();
        assert!(client.contains("bucket", "stage/a.js"));
        assert_eq!(client.copy_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_injected_copy_failure() {
        let client = MemoryStorageClient::new();
        client.put_object("bucket", "dev/a.js");
        client.fail_copies();

        let err = client.copy("bucket", "dev/a.js", "stage/a.js").await.unwrap_err();
        assert!(matches!(err, StorageError::AccessDenied(_)));
        assert!(!client.contains("bucket", "stage/a.js"));
    }
}
