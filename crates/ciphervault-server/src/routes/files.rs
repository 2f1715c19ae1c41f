use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection, Multipart, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use ciphervault_crypto::{base64_decode, base64_encode, decrypt_file, encrypt_file};
use ciphervault_storage::{stored_file_name, validate_name};
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

use super::unix_timestamp;

/// Multipart field carrying the uploaded file.
const UPLOAD_FIELD: &str = "file";

#[derive(Serialize)]
pub struct UploadResponse {
    pub encrypted_filename: String,
    pub key: String,
    pub timestamp: i64,
}

#[derive(Deserialize)]
pub struct DownloadRequest {
    pub filename: String,
    pub key: String,
}

#[derive(Deserialize)]
pub struct EncryptedQuery {
    pub filename: Option<String>,
}

#[derive(Serialize)]
pub struct FileListResponse {
    pub files: Vec<String>,
}

/// POST /file/upload
///
/// Encrypts the `file` field with AES-256-GCM and stores the result. The key
/// is returned once and never kept.
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ServerResult<Json<UploadResponse>> {
    let mut multipart = multipart.map_err(|e| {
        tracing::debug!("Rejected upload: {}", e.body_text());
        ServerError::BadRequest("No file uploaded".into())
    })?;

    let contents = loop {
        let field = multipart.next_field().await.map_err(upload_error)?;
        match field {
            Some(field) if field.name() == Some(UPLOAD_FIELD) => {
                break field.bytes().await.map_err(upload_error)?;
            }
            Some(_) => continue,
            None => return Err(ServerError::BadRequest("No file uploaded".into())),
        }
    };

    let sealed = encrypt_file(&contents)?;
    let name = stored_file_name(&sealed.ciphertext);
    state
        .store
        .put(&name, &sealed.ciphertext)
        .await
        .map_err(|e| ServerError::internal("Failed to save file", e))?;

    tracing::info!(
        "Stored encrypted upload {} ({} bytes)",
        name,
        sealed.ciphertext.len()
    );

    Ok(Json(UploadResponse {
        encrypted_filename: name,
        key: base64_encode(sealed.key.as_bytes()),
        timestamp: unix_timestamp(),
    }))
}

fn upload_error(err: axum::extract::multipart::MultipartError) -> ServerError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ServerError::BadRequest("File too large".into())
    } else {
        tracing::debug!("Malformed multipart body: {}", err.body_text());
        ServerError::BadRequest("Failed to read file".into())
    }
}

/// POST /file/download
pub async fn download_file(
    State(state): State<AppState>,
    payload: Result<Json<DownloadRequest>, JsonRejection>,
) -> ServerResult<Response> {
    let Json(req) = payload?;

    validate_name(&req.filename)?;
    let key = base64_decode("key", &req.key).map_err(ServerError::decryption)?;
    let stored = state.store.get(&req.filename).await?;
    let plaintext = decrypt_file(&stored, &key).map_err(ServerError::decryption)?;

    Ok(attachment("decrypted_file", plaintext))
}

/// GET /file/encrypted?filename=
pub async fn download_encrypted(
    State(state): State<AppState>,
    Query(query): Query<EncryptedQuery>,
) -> ServerResult<Response> {
    let filename = query
        .filename
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ServerError::BadRequest("Filename not specified".into()))?;

    validate_name(&filename)?;
    let stored = state.store.get(&filename).await?;

    Ok(attachment(&filename, stored))
}

/// GET /files/list
pub async fn list_files(State(state): State<AppState>) -> ServerResult<Json<FileListResponse>> {
    let files = state
        .store
        .list()
        .await
        .map_err(|e| ServerError::internal("Failed to read directory", e))?;
    Ok(Json(FileListResponse { files }))
}

fn attachment(filename: &str, body: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={filename}"),
            ),
        ],
        body,
    )
        .into_response()
}
