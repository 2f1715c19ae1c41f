//! HTTP integration tests for ciphervault-server

use ciphervault_crypto::{base64_decode, base64_encode, ecb_encrypt_with_key};
use ciphervault_server::config::{Config, StorageConfig};
use reqwest::{multipart, Client};
use serde_json::{json, Value};

mod common;

async fn post_json(server: &common::TestServer, path: &str, body: Value) -> (u16, Value) {
    let response = Client::new()
        .post(format!("{}{}", server.url, path))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status().as_u16();
    let body = response.json().await.expect("Failed to parse JSON");
    (status, body)
}

async fn upload(server: &common::TestServer, contents: &[u8]) -> reqwest::Response {
    let form = multipart::Form::new().part(
        "file",
        multipart::Part::bytes(contents.to_vec()).file_name("report.txt"),
    );
    Client::new()
        .post(format!("{}/file/upload", server.url))
        .multipart(form)
        .send()
        .await
        .expect("Failed to send request")
}

#[tokio::test]
async fn test_health_check() {
    let server = common::TestServer::start().await;

    let response = Client::new()
        .get(format!("{}/health", server.url))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_text_round_trip_both_modes() {
    let server = common::TestServer::start().await;

    for mode in ["gcm", "ecb"] {
        let (status, sealed) = post_json(
            &server,
            "/text/encrypt",
            json!({ "text": "HELLO WORLD", "mode": mode }),
        )
        .await;
        assert_eq!(status, 200);
        assert_eq!(sealed["mode"], mode);
        assert!(sealed["timestamp"].as_i64().unwrap() > 0);

        let key = base64_decode("key", sealed["key"].as_str().unwrap()).unwrap();
        assert_eq!(key.len(), 32);

        let (status, opened) = post_json(
            &server,
            "/text/decrypt",
            json!({
                "ciphertext": sealed["ciphertext"],
                "key": sealed["key"],
                "mode": mode,
            }),
        )
        .await;
        assert_eq!(status, 200);
        assert_eq!(opened["plaintext"], "HELLO WORLD");
    }
}

#[tokio::test]
async fn test_ecb_ciphertext_is_block_aligned() {
    let server = common::TestServer::start().await;

    let (_, sealed) = post_json(
        &server,
        "/text/encrypt",
        json!({ "text": "0123456789abcdef", "mode": "ecb" }),
    )
    .await;
    let ciphertext = base64_decode("ciphertext", sealed["ciphertext"].as_str().unwrap()).unwrap();
    assert_eq!(ciphertext.len(), 32);
}

#[tokio::test]
async fn test_invalid_mode_is_rejected() {
    let server = common::TestServer::start().await;

    let (status, body) = post_json(
        &server,
        "/text/encrypt",
        json!({ "text": "HELLO WORLD", "mode": "cbc" }),
    )
    .await;
    assert_eq!(status, 400);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid mode"));

    let (status, _) = post_json(
        &server,
        "/text/decrypt",
        json!({ "ciphertext": "", "key": "", "mode": "GCM" }),
    )
    .await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let server = common::TestServer::start().await;

    let (status, body) = post_json(&server, "/text/encrypt", json!({ "text": 42 })).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Invalid request");
}

#[tokio::test]
async fn test_decrypt_with_wrong_key_fails() {
    let server = common::TestServer::start().await;

    let (_, sealed) = post_json(
        &server,
        "/text/encrypt",
        json!({ "text": "HELLO WORLD", "mode": "gcm" }),
    )
    .await;

    let (status, body) = post_json(
        &server,
        "/text/decrypt",
        json!({
            "ciphertext": sealed["ciphertext"],
            "key": base64_encode(&[7u8; 32]),
            "mode": "gcm",
        }),
    )
    .await;
    assert_eq!(status, 400);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Decryption failed: "));
}

#[tokio::test]
async fn test_decrypt_with_bad_base64_fails() {
    let server = common::TestServer::start().await;

    let (status, body) = post_json(
        &server,
        "/text/decrypt",
        json!({ "ciphertext": "not base64!", "key": "", "mode": "ecb" }),
    )
    .await;
    assert_eq!(status, 400);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Decryption failed: "));
}

#[tokio::test]
async fn test_file_upload_list_and_download() {
    let server = common::TestServer::start().await;
    let client = Client::new();
    let contents = b"quarterly numbers\n\x00\x01\x02";

    let response = upload(&server, contents).await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    let filename = body["encrypted_filename"].as_str().unwrap().to_string();
    let key = body["key"].as_str().unwrap().to_string();
    assert!(filename.ends_with(".enc"));
    assert_eq!(filename.len(), 16 + 4);
    assert!(body["timestamp"].as_i64().unwrap() > 0);

    let (status, list) = {
        let response = client
            .get(format!("{}/files/list", server.url))
            .send()
            .await
            .unwrap();
        (response.status(), response.json::<Value>().await.unwrap())
    };
    assert_eq!(status, 200);
    assert_eq!(list["files"], json!([filename]));

    let response = client
        .post(format!("{}/file/download", server.url))
        .json(&json!({ "filename": filename, "key": key }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["content-disposition"],
        "attachment; filename=decrypted_file"
    );
    assert_eq!(response.bytes().await.unwrap().as_ref(), contents);

    let response = client
        .get(format!("{}/file/encrypted", server.url))
        .query(&[("filename", &filename)])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["content-disposition"],
        format!("attachment; filename={filename}").as_str()
    );
    let stored = response.bytes().await.unwrap();
    // nonce + ciphertext + tag
    assert_eq!(stored.len(), 12 + contents.len() + 16);
    assert_eq!(hex_head(&stored), filename.trim_end_matches(".enc"));
}

fn hex_head(bytes: &[u8]) -> String {
    bytes[..8].iter().map(|b| format!("{b:02x}")).collect()
}

#[tokio::test]
async fn test_download_with_wrong_key_fails() {
    let server = common::TestServer::start().await;

    let body: Value = upload(&server, b"secret").await.json().await.unwrap();
    let (status, body) = post_json(
        &server,
        "/file/download",
        json!({
            "filename": body["encrypted_filename"],
            "key": base64_encode(&[0u8; 32]),
        }),
    )
    .await;
    assert_eq!(status, 400);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Decryption failed: "));
}

#[tokio::test]
async fn test_missing_files_are_not_found() {
    let server = common::TestServer::start().await;
    let client = Client::new();

    let (status, _) = post_json(
        &server,
        "/file/download",
        json!({ "filename": "0000000000000000.enc", "key": base64_encode(&[0u8; 32]) }),
    )
    .await;
    assert_eq!(status, 404);

    let response = client
        .get(format!("{}/file/encrypted?filename=ffffffffffffffff.enc", server.url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);

    let response = client
        .get(format!("{}/file/encrypted", server.url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Filename not specified");
}

#[tokio::test]
async fn test_path_traversal_is_rejected() {
    let server = common::TestServer::start().await;

    let response = Client::new()
        .get(format!("{}/file/encrypted", server.url))
        .query(&[("filename", "../Cargo.toml")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let server = common::TestServer::start().await;

    let form = multipart::Form::new().text("note", "no file here");
    let response = Client::new()
        .post(format!("{}/file/upload", server.url))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "No file uploaded");
}

#[tokio::test]
async fn test_upload_too_large() {
    let server = common::TestServer::start_with(Config {
        host: "127.0.0.1".into(),
        port: 0,
        storage: StorageConfig {
            backend: "memory".into(),
            ..Default::default()
        },
        max_file_size: 1024,
        ..Default::default()
    })
    .await;

    let response = upload(&server, &[b'x'; 4096]).await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "File too large");
}

#[tokio::test]
async fn test_brute_force_recovers_last_byte() {
    let server = common::TestServer::start().await;

    let mut key = [0u8; 32];
    for (i, byte) in key.iter_mut().enumerate() {
        *byte = (i as u8).wrapping_mul(13).wrapping_add(5);
    }
    let ciphertext = ecb_encrypt_with_key(b"SECRET MESSAGE", &key).unwrap();

    let (status, body) = post_json(
        &server,
        "/bruteforce",
        json!({
            "ciphertext": base64_encode(&ciphertext),
            "known_key_part": base64_encode(&key[..31]),
            "mode": "ecb",
        }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["plaintext"], "SECRET MESSAGE");
    assert_eq!(body["key"], base64_encode(&key));
    assert!(body["time_taken"].is_string());
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_brute_force_not_found_is_ok() {
    let server = common::TestServer::start().await;

    let mut key = [0x5Au8; 32];
    key[28..].copy_from_slice(&[0x10, 0x20, 0x30, 0x40]);
    let ciphertext = ecb_encrypt_with_key(b"SECRET MESSAGE", &key).unwrap();

    let (status, body) = post_json(
        &server,
        "/bruteforce",
        json!({
            "ciphertext": base64_encode(&ciphertext),
            "known_key_part": base64_encode(&key[..28]),
        }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["error"], "Brute force failed");
    assert!(body["time_taken"].is_string());
    assert!(body.get("plaintext").is_none());
}

#[tokio::test]
async fn test_brute_force_unsupported_prefix_length() {
    let server = common::TestServer::start().await;

    let ciphertext = ecb_encrypt_with_key(b"SECRET MESSAGE", &[1u8; 32]).unwrap();
    let (status, body) = post_json(
        &server,
        "/bruteforce",
        json!({
            "ciphertext": base64_encode(&ciphertext),
            "known_key_part": base64_encode(&[1u8; 20]),
        }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["error"], "Brute force failed");
}

#[tokio::test]
async fn test_brute_force_invalid_prefix_encoding() {
    let server = common::TestServer::start().await;

    let (status, body) = post_json(
        &server,
        "/bruteforce",
        json!({ "ciphertext": "", "known_key_part": "%%%" }),
    )
    .await;
    assert_eq!(status, 400);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid known key part encoding"));
}

#[tokio::test]
async fn test_brute_force_invalid_ciphertext_encoding() {
    let server = common::TestServer::start().await;

    let (status, body) = post_json(
        &server,
        "/bruteforce",
        json!({ "ciphertext": "not base64!", "known_key_part": base64_encode(&[1u8; 31]) }),
    )
    .await;
    assert_eq!(status, 400);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid ciphertext encoding"));
    assert!(body.get("time_taken").is_none());
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let server = common::TestServer::start().await;

    let response = Client::new()
        .get(format!("{}/health", server.url))
        .header("Origin", "http://localhost:3000")
        .send()
        .await
        .unwrap();
    assert_eq!(response.headers()["access-control-allow-origin"], "*");

    let preflight = Client::new()
        .request(reqwest::Method::OPTIONS, format!("{}/text/encrypt", server.url))
        .header("Origin", "http://localhost:3000")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .unwrap();
    assert!(preflight.status().is_success());
    let methods = preflight.headers()["access-control-allow-methods"]
        .to_str()
        .unwrap()
        .to_string();
    for method in ["POST", "GET", "OPTIONS", "PUT", "DELETE"] {
        assert!(methods.contains(method), "{methods}");
    }
}

#[tokio::test]
async fn test_local_backend_writes_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("encrypted");
    let server = common::TestServer::start_with(Config {
        host: "127.0.0.1".into(),
        port: 0,
        storage: StorageConfig {
            backend: "local".into(),
            local_path: root.to_string_lossy().into_owned(),
        },
        ..Default::default()
    })
    .await;

    let body: Value = upload(&server, b"on disk").await.json().await.unwrap();
    let filename = body["encrypted_filename"].as_str().unwrap();

    let stored = std::fs::read(root.join(filename)).unwrap();
    assert_eq!(stored.len(), 12 + 7 + 16);
}

#[tokio::test]
async fn test_unknown_backend_fails_startup() {
    let config = Config {
        storage: StorageConfig {
            backend: "s3".into(),
            ..Default::default()
        },
        ..Default::default()
    };
    let err = ciphervault_server::state::AppState::new(&config)
        .await
        .err()
        .unwrap();
    assert!(err.to_string().contains("Unknown storage backend 's3'"));
}
