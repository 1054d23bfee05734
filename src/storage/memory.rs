//! In-memory stores, substituted for the AWS collaborators in tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::model::document::Document;
use crate::model::employee::Employee;
use crate::model::leave_request::LeaveRequest;
use crate::storage::{
    BlobObject, BlobStore, DocumentStore, EmployeeStore, LeaveRequestStore, StorageError,
};

#[derive(Default)]
pub struct MemEmployeeStore {
    records: Mutex<HashMap<String, Employee>>,
}

#[async_trait]
impl EmployeeStore for MemEmployeeStore {
    async fn get(&self, email: &str) -> Result<Option<Employee>, StorageError> {
        Ok(self.records.lock().unwrap().get(email).cloned())
    }

    async fn put(&self, employee: &Employee) -> Result<(), StorageError> {
        self.records
            .lock()
            .unwrap()
            .insert(employee.email.clone(), employee.clone());
        Ok(())
    }

    async fn scan(&self) -> Result<Vec<Employee>, StorageError> {
        Ok(self.records.lock().unwrap().values().cloned().collect())
    }

    async fn delete(&self, email: &str) -> Result<(), StorageError> {
        self.records.lock().unwrap().remove(email);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemLeaveRequestStore {
    records: Mutex<HashMap<String, LeaveRequest>>,
}

impl MemLeaveRequestStore {
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl LeaveRequestStore for MemLeaveRequestStore {
    async fn get(&self, request_id: &str) -> Result<Option<LeaveRequest>, StorageError> {
        Ok(self.records.lock().unwrap().get(request_id).cloned())
    }

    async fn put(&self, request: &LeaveRequest) -> Result<(), StorageError> {
        self.records
            .lock()
            .unwrap()
            .insert(request.request_id.clone(), request.clone());
        Ok(())
    }

    async fn scan(&self) -> Result<Vec<LeaveRequest>, StorageError> {
        Ok(self.records.lock().unwrap().values().cloned().collect())
    }
}

#[derive(Default)]
pub struct MemDocumentStore {
    records: Mutex<HashMap<String, Document>>,
}

#[async_trait]
impl DocumentStore for MemDocumentStore {
    async fn get(&self, document_id: &str) -> Result<Option<Document>, StorageError> {
        Ok(self.records.lock().unwrap().get(document_id).cloned())
    }

    async fn put(&self, document: &Document) -> Result<(), StorageError> {
        self.records
            .lock()
            .unwrap()
            .insert(document.document_id.clone(), document.clone());
        Ok(())
    }

    async fn scan(&self) -> Result<Vec<Document>, StorageError> {
        Ok(self.records.lock().unwrap().values().cloned().collect())
    }

    async fn delete(&self, document_id: &str) -> Result<(), StorageError> {
        self.records.lock().unwrap().remove(document_id);
        Ok(())
    }
}

/// Blob fake with failure injection for the partial-failure paths.
#[derive(Default)]
pub struct MemBlobStore {
    blobs: Mutex<HashMap<String, (Vec<u8>, String)>>,
    fail_puts: AtomicBool,
    fail_deletes: AtomicBool,
}

impl MemBlobStore {
    pub fn fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::Relaxed);
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::Relaxed);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.blobs.lock().unwrap().contains_key(key)
    }
}

#[async_trait]
impl BlobStore for MemBlobStore {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        if self.fail_puts.load(Ordering::Relaxed) {
            return Err(StorageError::Write(format!("injected put failure for {key}")));
        }
        self.blobs
            .lock()
            .unwrap()
            .insert(key.to_string(), (bytes, content_type.to_string()));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<BlobObject, StorageError> {
        self.blobs
            .lock()
            .unwrap()
            .get(key)
            .map(|(bytes, content_type)| BlobObject {
                bytes: bytes.clone(),
                content_type: content_type.clone(),
            })
            .ok_or_else(|| StorageError::Read(format!("no blob at {key}")))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_deletes.load(Ordering::Relaxed) {
            return Err(StorageError::Write(format!(
                "injected delete failure for {key}"
            )));
        }
        self.blobs.lock().unwrap().remove(key);
        Ok(())
    }

    async fn presign_get(&self, key: &str, ttl_secs: u64) -> Result<String, StorageError> {
        Ok(format!("mem://{key}?expires_in={ttl_secs}"))
    }
}
