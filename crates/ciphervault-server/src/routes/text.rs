use axum::{extract::rejection::JsonRejection, Json};
use ciphervault_crypto::{
    base64_decode, base64_encode, decrypt_text as decrypt, encrypt_text as encrypt, CipherMode,
};
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

use super::unix_timestamp;

#[derive(Deserialize)]
pub struct EncryptRequest {
    pub text: String,
    pub mode: String,
}

#[derive(Serialize)]
pub struct EncryptResponse {
    pub ciphertext: String,
    pub key: String,
    pub mode: String,
    pub timestamp: i64,
}

#[derive(Deserialize)]
pub struct DecryptRequest {
    pub ciphertext: String,
    pub key: String,
    pub mode: String,
}

#[derive(Serialize)]
pub struct DecryptResponse {
    pub plaintext: String,
    pub timestamp: i64,
}

/// POST /text/encrypt
pub async fn encrypt_text(
    payload: Result<Json<EncryptRequest>, JsonRejection>,
) -> ServerResult<Json<EncryptResponse>> {
    let Json(req) = payload?;
    let mode: CipherMode = req.mode.parse()?;

    let sealed = encrypt(&req.text, mode)?;
    tracing::debug!("Encrypted {} bytes of text with {}", req.text.len(), mode);

    Ok(Json(EncryptResponse {
        ciphertext: base64_encode(&sealed.ciphertext),
        key: base64_encode(sealed.key.as_bytes()),
        mode: mode.to_string(),
        timestamp: unix_timestamp(),
    }))
}

/// POST /text/decrypt
pub async fn decrypt_text(
    payload: Result<Json<DecryptRequest>, JsonRejection>,
) -> ServerResult<Json<DecryptResponse>> {
    let Json(req) = payload?;
    let mode: CipherMode = req.mode.parse()?;

    let plaintext = base64_decode("ciphertext", &req.ciphertext)
        .and_then(|ciphertext| {
            let key = base64_decode("key", &req.key)?;
            decrypt(&ciphertext, &key, mode)
        })
        .map_err(ServerError::decryption)?;

    Ok(Json(DecryptResponse {
        plaintext,
        timestamp: unix_timestamp(),
    }))
}
