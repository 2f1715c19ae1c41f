use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use ciphervault_crypto::{
    base64_decode, base64_encode, brute_force as recover_key, decode_key_prefix, CryptoError,
};
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct BruteForceRequest {
    pub ciphertext: String,
    pub known_key_part: String,
    /// Accepted for compatibility; the search always assumes ECB.
    #[serde(default)]
    pub mode: Option<String>,
}

#[derive(Serialize, Default)]
pub struct BruteForceResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plaintext: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub time_taken: String,
}

/// POST /bruteforce
///
/// A search that finds nothing is still a 200; the body carries
/// `"error": "Brute force failed"`. Undecodable base64 in `ciphertext` is
/// rejected with a 400 instead of that 200 failure body.
pub async fn brute_force(
    State(state): State<AppState>,
    payload: Result<Json<BruteForceRequest>, JsonRejection>,
) -> ServerResult<Json<BruteForceResponse>> {
    let Json(req) = payload?;

    let known_prefix = decode_key_prefix(&req.known_key_part)?;
    let ciphertext = base64_decode("ciphertext", &req.ciphertext)?;
    if let Some(mode) = req.mode.as_deref().filter(|m| *m != "ecb") {
        tracing::debug!("Ignoring brute-force mode {:?}; searching as ecb", mode);
    }

    let started = Instant::now();
    let outcome = recover_key(ciphertext, known_prefix, &state.search_options()).await;
    let time_taken = format!("{:?}", started.elapsed());

    match outcome {
        Ok(found) => Ok(Json(BruteForceResponse {
            plaintext: Some(found.plaintext),
            key: Some(base64_encode(found.key.as_bytes())),
            error: None,
            time_taken,
        })),
        Err(CryptoError::SearchNotFound) => Ok(Json(BruteForceResponse {
            error: Some("Brute force failed".into()),
            time_taken,
            ..Default::default()
        })),
        Err(other) => Err(ServerError::from(other)),
    }
}
