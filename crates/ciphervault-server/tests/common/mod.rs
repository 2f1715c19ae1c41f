use std::net::SocketAddr;
use std::time::Duration;

use ciphervault_server::config::{Config, StorageConfig};
use tokio::net::TcpListener;

pub struct TestServer {
    pub url: String,
    #[allow(dead_code)]
    pub addr: SocketAddr,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(Config {
            host: "127.0.0.1".into(),
            port: 0,
            storage: StorageConfig {
                backend: "memory".into(),
                ..Default::default()
            },
            search_timeout_secs: 10,
            ..Default::default()
        })
        .await
    }

    pub async fn start_with(config: Config) -> Self {
        let state = ciphervault_server::state::AppState::new(&config)
            .await
            .unwrap();
        let app = ciphervault_server::routes::router(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        tokio::time::sleep(Duration::from_millis(50)).await;

        Self {
            url: format!("http://{addr}"),
            addr,
        }
    }
}
