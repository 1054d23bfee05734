//! Storage collaborators behind injectable traits.
//!
//! Three key-value tables (employees by email, leave requests by request_id,
//! documents by document_id) plus one blob bucket. The core only ever does
//! point get/put/delete and full scans; all filtering happens in-process.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{document::Document, employee::Employee, leave_request::LeaveRequest};

pub mod dynamo;
#[cfg(test)]
pub mod memory;
pub mod s3;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage read failed: {0}")]
    Read(String),
    #[error("storage write failed: {0}")]
    Write(String),
}

#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn get(&self, email: &str) -> Result<Option<Employee>, StorageError>;
    async fn put(&self, employee: &Employee) -> Result<(), StorageError>;
    async fn scan(&self) -> Result<Vec<Employee>, StorageError>;
    async fn delete(&self, email: &str) -> Result<(), StorageError>;
}

#[async_trait]
pub trait LeaveRequestStore: Send + Sync {
    async fn get(&self, request_id: &str) -> Result<Option<LeaveRequest>, StorageError>;
    async fn put(&self, request: &LeaveRequest) -> Result<(), StorageError>;
    async fn scan(&self) -> Result<Vec<LeaveRequest>, StorageError>;
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, document_id: &str) -> Result<Option<Document>, StorageError>;
    async fn put(&self, document: &Document) -> Result<(), StorageError>;
    async fn scan(&self) -> Result<Vec<Document>, StorageError>;
    async fn delete(&self, document_id: &str) -> Result<(), StorageError>;
}

/// Downloaded blob payload
#[derive(Debug)]
pub struct BlobObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError>;
    async fn get(&self, key: &str) -> Result<BlobObject, StorageError>;
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
    /// Time-boxed direct-access URL for downloads
    async fn presign_get(&self, key: &str, ttl_secs: u64) -> Result<String, StorageError>;
}
