use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ciphervault_crypto::CryptoError;
use ciphervault_storage::StorageError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// `message` is returned to the client; `detail` is only logged.
    #[error("{message}: {detail}")]
    Internal {
        message: &'static str,
        detail: String,
    },

    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ServerError {
    pub fn internal(message: &'static str, detail: impl ToString) -> Self {
        ServerError::Internal {
            message,
            detail: detail.to_string(),
        }
    }

    /// Any failure to decrypt caller-supplied data is the caller's fault.
    pub fn decryption(err: CryptoError) -> Self {
        ServerError::BadRequest(format!("Decryption failed: {err}"))
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        ServerError::BadRequest("Invalid request".into())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServerError::Internal { message, detail } => {
                tracing::error!("{}: {}", message, detail);
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
            ServerError::Crypto(err) => match err {
                CryptoError::InvalidMode(_)
                | CryptoError::InvalidEncoding { .. }
                | CryptoError::InvalidKeyPrefixEncoding(_) => {
                    (StatusCode::BAD_REQUEST, err.to_string())
                }
                other => {
                    tracing::error!("Encryption failed: {}", other);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Encryption failed".to_string(),
                    )
                }
            },
            ServerError::Storage(err) => match err {
                StorageError::NotFound(_) => (StatusCode::NOT_FOUND, "File not found".to_string()),
                StorageError::InvalidName(name) => (
                    StatusCode::BAD_REQUEST,
                    format!("Invalid filename: {name}"),
                ),
                StorageError::Io(e) => {
                    tracing::error!("Storage I/O failed: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Storage error".to_string(),
                    )
                }
            },
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
