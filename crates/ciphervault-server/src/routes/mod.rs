use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::state::AppState;

mod brute_force;
mod files;
mod health;
mod text;

pub fn router(state: AppState) -> Router {
    let max_file_size = state.config.max_file_size;

    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/file/upload",
            post(files::upload_file).layer(DefaultBodyLimit::max(max_file_size)),
        )
        .route("/file/download", post(files::download_file))
        .route("/file/encrypted", get(files::download_encrypted))
        .route("/files/list", get(files::list_files))
        .route("/text/encrypt", post(text::encrypt_text))
        .route("/text/decrypt", post(text::decrypt_text))
        .route("/bruteforce", post(brute_force::brute_force))
        .layer(cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::POST,
            Method::GET,
            Method::OPTIONS,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Current Unix time in seconds, for response timestamps.
fn unix_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}
