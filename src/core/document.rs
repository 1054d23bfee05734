//! Document records: upload, list, download, delete.
//!
//! Each metadata record is tied 1:1 to a blob stored under
//! `{employee_id}/{document_id}/{filename}`. The blob is written before the
//! metadata record; a metadata write failure after a successful blob write
//! leaves an orphaned blob, and a failed blob delete leaves one too. Both
//! are logged, neither is reconciled.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::auth::AuthUser;
use crate::error::AppError;
use crate::model::document::Document;
use crate::storage::{BlobObject, BlobStore, DocumentStore};

/// Upload payload, already pulled out of the multipart form
pub struct NewDocument {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub description: String,
    pub is_public: bool,
}

/// Document metadata enriched with a time-boxed download URL
#[derive(Debug, Serialize, ToSchema)]
pub struct DocumentView {
    pub document_id: String,
    pub employee_id: String,
    #[schema(example = "contract.pdf")]
    pub filename: String,
    pub description: String,
    #[schema(example = "application/pdf")]
    pub content_type: String,
    #[schema(example = "2026-01-01T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
    pub is_public: bool,
    /// Presigned URL, valid for the configured TTL only
    pub download_url: String,
}

/// Keep only the final path segment and drop characters that do not
/// survive a storage key or a Content-Disposition header.
pub fn sanitize_filename(raw: &str) -> String {
    let name = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '.' | '-' | '_' | ' '))
        .collect();
    let cleaned = cleaned.trim().replace(' ', "_");

    if cleaned.is_empty() {
        "unnamed".to_string()
    } else {
        cleaned
    }
}

fn can_download(doc: &Document, ctx: &AuthUser) -> bool {
    doc.employee_id == ctx.employee_id || ctx.is_admin() || doc.is_public
}

fn can_delete(doc: &Document, ctx: &AuthUser) -> bool {
    // the public flag grants download, never delete
    doc.employee_id == ctx.employee_id || ctx.is_admin()
}

/// Write the blob, then the metadata record. The blob write failing aborts
/// the upload; the metadata record is not created in that case.
pub async fn upload(
    documents: &dyn DocumentStore,
    blobs: &dyn BlobStore,
    ctx: &AuthUser,
    new: NewDocument,
) -> Result<Document, AppError> {
    if new.bytes.is_empty() {
        return Err(AppError::Validation("No file selected".into()));
    }

    let filename = sanitize_filename(&new.filename);
    let document_id = Uuid::new_v4().to_string();
    // namespacing by owner and document id prevents filename collisions
    let blob_key = format!("{}/{}/{}", ctx.employee_id, document_id, filename);

    blobs
        .put(&blob_key, new.bytes, &new.content_type)
        .await?;

    let document = Document {
        document_id,
        employee_id: ctx.employee_id.clone(),
        filename,
        description: new.description,
        blob_key,
        content_type: new.content_type,
        created_at: Utc::now(),
        is_public: new.is_public,
    };

    if let Err(e) = documents.put(&document).await {
        // blob already landed; orphaned blob accepted, no rollback
        warn!(
            document_id = %document.document_id,
            blob_key = %document.blob_key,
            error = %e,
            "Metadata write failed after blob upload"
        );
        return Err(e.into());
    }

    info!(
        document_id = %document.document_id,
        employee_id = %ctx.employee_id,
        filename = %document.filename,
        "Document uploaded"
    );

    Ok(document)
}

/// List documents visible to the caller: admins see all, employees see
/// their own plus anything flagged public.
pub async fn list(
    documents: &dyn DocumentStore,
    blobs: &dyn BlobStore,
    ctx: &AuthUser,
    download_url_ttl_secs: u64,
) -> Result<Vec<DocumentView>, AppError> {
    let mut records = documents.scan().await?;

    if !ctx.is_admin() {
        records.retain(|d| d.employee_id == ctx.employee_id || d.is_public);
    }

    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let mut views = Vec::with_capacity(records.len());
    for doc in records {
        let download_url = blobs
            .presign_get(&doc.blob_key, download_url_ttl_secs)
            .await?;
        views.push(DocumentView {
            document_id: doc.document_id,
            employee_id: doc.employee_id,
            filename: doc.filename,
            description: doc.description,
            content_type: doc.content_type,
            created_at: doc.created_at,
            is_public: doc.is_public,
            download_url,
        });
    }

    Ok(views)
}

/// Fetch the blob for a document the caller may read.
pub async fn download(
    documents: &dyn DocumentStore,
    blobs: &dyn BlobStore,
    ctx: &AuthUser,
    document_id: &str,
) -> Result<(Document, BlobObject), AppError> {
    let doc = documents
        .get(document_id)
        .await?
        .ok_or(AppError::NotFound("Document"))?;

    if !can_download(&doc, ctx) {
        return Err(AppError::Forbidden("Permission denied"));
    }

    let blob = blobs.get(&doc.blob_key).await?;
    Ok((doc, blob))
}

/// Delete blob then metadata. A failed blob delete is logged and the
/// metadata delete proceeds anyway; an orphaned blob is accepted.
pub async fn delete(
    documents: &dyn DocumentStore,
    blobs: &dyn BlobStore,
    ctx: &AuthUser,
    document_id: &str,
) -> Result<(), AppError> {
    let doc = documents
        .get(document_id)
        .await?
        .ok_or(AppError::NotFound("Document"))?;

    if !can_delete(&doc, ctx) {
        return Err(AppError::Forbidden("Permission denied"));
    }

    if let Err(e) = blobs.delete(&doc.blob_key).await {
        warn!(
            document_id = %doc.document_id,
            blob_key = %doc.blob_key,
            error = %e,
            "Blob delete failed, removing metadata record anyway"
        );
    }

    documents.delete(document_id).await?;

    info!(
        document_id = %doc.document_id,
        deleted_by = %ctx.email,
        "Document deleted"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::role::Role;
    use crate::storage::memory::{MemBlobStore, MemDocumentStore};

    fn ctx(employee_id: &str, role: Role) -> AuthUser {
        AuthUser {
            email: format!("{employee_id}@co.com"),
            employee_id: employee_id.to_string(),
            name: employee_id.to_uppercase(),
            department: "Engineering".into(),
            role,
        }
    }

    fn pdf_upload(is_public: bool) -> NewDocument {
        NewDocument {
            filename: "contract.pdf".into(),
            content_type: "application/pdf".into(),
            bytes: b"%PDF-1.4 fake payload".to_vec(),
            description: "signed contract".into(),
            is_public,
        }
    }

    #[actix_web::test]
    async fn upload_then_download_round_trip() {
        let documents = MemDocumentStore::default();
        let blobs = MemBlobStore::default();
        let owner = ctx("emp-1", Role::Employee);

        let doc = upload(&documents, &blobs, &owner, pdf_upload(false))
            .await
            .unwrap();

        let (meta, blob) = download(&documents, &blobs, &owner, &doc.document_id)
            .await
            .unwrap();
        assert_eq!(meta.filename, "contract.pdf");
        assert_eq!(blob.bytes, b"%PDF-1.4 fake payload".to_vec());
        assert_eq!(blob.content_type, "application/pdf");
    }

    #[actix_web::test]
    async fn blob_write_failure_creates_no_metadata() {
        let documents = MemDocumentStore::default();
        let blobs = MemBlobStore::default();
        blobs.fail_puts(true);

        let err = upload(&documents, &blobs, &ctx("emp-1", Role::Employee), pdf_upload(false))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        assert!(documents.scan().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn private_documents_are_owner_or_admin_only() {
        let documents = MemDocumentStore::default();
        let blobs = MemBlobStore::default();
        let owner = ctx("emp-1", Role::Employee);
        let doc = upload(&documents, &blobs, &owner, pdf_upload(false))
            .await
            .unwrap();

        let stranger = ctx("emp-2", Role::Employee);
        let err = download(&documents, &blobs, &stranger, &doc.document_id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let admin = ctx("adm-1", Role::Admin);
        assert!(download(&documents, &blobs, &admin, &doc.document_id)
            .await
            .is_ok());
    }

    #[actix_web::test]
    async fn public_flag_grants_download_but_not_delete() {
        let documents = MemDocumentStore::default();
        let blobs = MemBlobStore::default();
        let owner = ctx("emp-1", Role::Employee);
        let doc = upload(&documents, &blobs, &owner, pdf_upload(true))
            .await
            .unwrap();

        let stranger = ctx("emp-2", Role::Employee);
        assert!(download(&documents, &blobs, &stranger, &doc.document_id)
            .await
            .is_ok());

        let err = delete(&documents, &blobs, &stranger, &doc.document_id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        assert!(documents.get(&doc.document_id).await.unwrap().is_some());
    }

    #[actix_web::test]
    async fn failed_blob_delete_still_removes_the_record() {
        let documents = MemDocumentStore::default();
        let blobs = MemBlobStore::default();
        let owner = ctx("emp-1", Role::Employee);
        let doc = upload(&documents, &blobs, &owner, pdf_upload(false))
            .await
            .unwrap();

        blobs.fail_deletes(true);
        delete(&documents, &blobs, &owner, &doc.document_id)
            .await
            .unwrap();

        assert!(documents.get(&doc.document_id).await.unwrap().is_none());
        // the blob is orphaned, as documented
        assert!(blobs.contains(&doc.blob_key));
    }

    #[actix_web::test]
    async fn listing_respects_visibility() {
        let documents = MemDocumentStore::default();
        let blobs = MemBlobStore::default();
        let alice = ctx("emp-1", Role::Employee);
        let bob = ctx("emp-2", Role::Employee);

        upload(&documents, &blobs, &alice, pdf_upload(false)).await.unwrap();
        upload(&documents, &blobs, &alice, pdf_upload(true)).await.unwrap();
        upload(&documents, &blobs, &bob, pdf_upload(false)).await.unwrap();

        let for_bob = list(&documents, &blobs, &bob, 3600).await.unwrap();
        assert_eq!(for_bob.len(), 2); // own private + alice's public
        assert!(for_bob.iter().all(|v| !v.download_url.is_empty()));

        let for_admin = list(&documents, &blobs, &ctx("adm-1", Role::Admin), 3600)
            .await
            .unwrap();
        assert_eq!(for_admin.len(), 3);
    }

    #[test]
    fn filenames_are_sanitized() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("my report (final).pdf"), "my_report_final.pdf");
        assert_eq!(sanitize_filename("///"), "unnamed");
        assert_eq!(sanitize_filename("plain.txt"), "plain.txt");
    }
}
