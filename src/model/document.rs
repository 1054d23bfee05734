use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Document metadata record, keyed by document_id in the documents table.
/// Tied 1:1 to a blob stored under `blob_key`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub document_id: String,
    pub employee_id: String,
    /// Sanitized original filename, reused on download
    pub filename: String,
    pub description: String,
    /// `{employee_id}/{document_id}/{filename}` in the document bucket
    pub blob_key: String,
    pub content_type: String,
    pub created_at: DateTime<Utc>,
    /// Public documents are downloadable by any employee
    pub is_public: bool,
}
