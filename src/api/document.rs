use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use futures::StreamExt;

use crate::auth::auth::AuthUser;
use crate::config::Config;
use crate::core::document::{self, NewDocument};
use crate::error::AppError;
use crate::state::Stores;

/// Upload size cap (20MB)
const MAX_FILE_SIZE: usize = 20 * 1024 * 1024;

/// Append a chunk, enforcing the size cap. Every part is capped, not just
/// the file: text parts are buffered too and must not grow unbounded.
fn push_chunk(data: &mut Vec<u8>, chunk: &[u8]) -> Result<(), AppError> {
    if data.len() + chunk.len() > MAX_FILE_SIZE {
        return Err(AppError::Validation(format!(
            "File too large (max {MAX_FILE_SIZE} bytes)"
        )));
    }
    data.extend_from_slice(chunk);
    Ok(())
}

/// Pull the upload out of the multipart form: a `file` part plus optional
/// `description` and `is_public` text parts.
async fn read_upload(mut payload: Multipart) -> Result<NewDocument, AppError> {
    let mut filename = String::new();
    let mut content_type = "application/octet-stream".to_string();
    let mut bytes: Vec<u8> = Vec::new();
    let mut description = String::new();
    let mut is_public = false;
    let mut saw_file = false;

    while let Some(field) = payload.next().await {
        let mut field =
            field.map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?;

        let name = field.name().unwrap_or("").to_string();

        let mut data: Vec<u8> = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| AppError::Validation(format!("Upload error: {e}")))?;
            push_chunk(&mut data, &chunk)?;
        }

        match name.as_str() {
            "file" => {
                saw_file = true;
                filename = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename())
                    .unwrap_or("unnamed")
                    .to_string();
                if let Some(mime) = field.content_type() {
                    content_type = mime.to_string();
                }
                bytes = data;
            }
            "description" => {
                description = String::from_utf8_lossy(&data).into_owned();
            }
            "is_public" => {
                let value = String::from_utf8_lossy(&data);
                is_public = matches!(value.trim(), "on" | "true" | "1");
            }
            _ => {} // unknown parts are ignored
        }
    }

    if !saw_file {
        return Err(AppError::Validation("No file selected".into()));
    }

    Ok(NewDocument {
        filename,
        content_type,
        bytes,
        description,
        is_public,
    })
}

/* =========================
Upload document
========================= */
#[utoipa::path(
    post,
    path = "/api/documents",
    request_body(
        content = Vec<u8>,
        description = "Multipart form: `file`, optional `description` and `is_public`",
        content_type = "multipart/form-data"
    ),
    responses(
        (status = 200, description = "Document uploaded successfully", body = Object, example = json!({
            "message": "Document uploaded",
            "document_id": "7b0c7d6e-2f4a-4b1e-9c3d-1a2b3c4d5e6f"
        })),
        (status = 400, description = "Missing or oversized file"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Documents"
)]
pub async fn upload_document(
    auth: AuthUser,
    stores: web::Data<Stores>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let new = read_upload(payload).await?;

    let doc = document::upload(
        stores.documents.as_ref(),
        stores.blobs.as_ref(),
        &auth,
        new,
    )
    .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Document uploaded",
        "document_id": doc.document_id,
    })))
}

/* =========================
List documents
========================= */
#[utoipa::path(
    get,
    path = "/api/documents",
    responses(
        (status = 200, description = "Documents visible to the caller, each with a time-boxed download URL",
         body = [crate::core::document::DocumentView]),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Documents"
)]
pub async fn list_documents(
    auth: AuthUser,
    stores: web::Data<Stores>,
    config: web::Data<Config>,
) -> Result<HttpResponse, AppError> {
    let views = document::list(
        stores.documents.as_ref(),
        stores.blobs.as_ref(),
        &auth,
        config.download_url_ttl_secs,
    )
    .await?;

    Ok(HttpResponse::Ok().json(views))
}

/* =========================
Download document
========================= */
#[utoipa::path(
    get,
    path = "/api/documents/{document_id}/download",
    params(
        ("document_id" = String, Path, description = "ID of the document to download")
    ),
    responses(
        (status = 200, description = "File content with its original filename"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Document not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Documents"
)]
pub async fn download_document(
    auth: AuthUser,
    stores: web::Data<Stores>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let document_id = path.into_inner();
    let (doc, blob) = document::download(
        stores.documents.as_ref(),
        stores.blobs.as_ref(),
        &auth,
        &document_id,
    )
    .await?;

    Ok(HttpResponse::Ok()
        .content_type(blob.content_type)
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", doc.filename),
        ))
        .body(blob.bytes))
}

/* =========================
Delete document
========================= */
#[utoipa::path(
    delete,
    path = "/api/documents/{document_id}",
    params(
        ("document_id" = String, Path, description = "ID of the document to delete")
    ),
    responses(
        (status = 200, description = "Document deleted", body = Object, example = json!({
            "message": "Document deleted"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Document not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Documents"
)]
pub async fn delete_document(
    auth: AuthUser,
    stores: web::Data<Stores>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let document_id = path.into_inner();
    document::delete(
        stores.documents.as_ref(),
        stores.blobs.as_ref(),
        &auth,
        &document_id,
    )
    .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Document deleted"
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_cap_applies_to_every_buffered_part() {
        // a text part just under the cap is fine
        let mut data = vec![0u8; MAX_FILE_SIZE - 1];
        assert!(push_chunk(&mut data, b"x").is_ok());

        // one more byte tips any part over, file or not
        let err = push_chunk(&mut data, b"x").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(data.len(), MAX_FILE_SIZE); // rejected chunk is not appended
    }
}
