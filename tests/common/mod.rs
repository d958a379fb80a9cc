//! Shared mock endpoints for integration tests.
//!
//! All helpers bind `127.0.0.1:0` and return the chosen address.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use axum_server::Handle;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// What a programmable backend answers.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub location: Option<String>,
    pub delay: Duration,
}

impl MockResponse {
    pub fn status(status: u16) -> Self {
        Self {
            status,
            location: None,
            delay: Duration::ZERO,
        }
    }

    pub fn redirect(location: impl Into<String>) -> Self {
        Self {
            status: 302,
            location: Some(location.into()),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Path of the request line, e.g. `/hop/1`.
pub fn request_path(head: &str) -> &str {
    head.lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
}

async fn bind() -> (TcpListener, SocketAddr) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    (listener, addr)
}

/// Start a backend that answers every request via `f(request_head)`.
pub async fn start_programmable_backend<F>(f: F) -> SocketAddr
where
    F: Fn(&str) -> MockResponse + Send + Sync + 'static,
{
    let (listener, addr) = bind().await;
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let mut buf = vec![0u8; 8192];
                        let n = socket.read(&mut buf).await.unwrap_or(0);
                        let head = String::from_utf8_lossy(&buf[..n]).to_string();

                        let response = f(&head);
                        tokio::time::sleep(response.delay).await;

                        let location = response
                            .location
                            .map(|l| format!("Location: {}\r\n", l))
                            .unwrap_or_default();
                        let response_str = format!(
                            "HTTP/1.1 {} Mock\r\n{}Content-Length: 0\r\nConnection: close\r\n\r\n",
                            response.status, location
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a backend that always answers `status`.
pub async fn start_status_backend(status: u16) -> SocketAddr {
    start_programmable_backend(move |_| MockResponse::status(status)).await
}

/// Start a backend that accepts connections but never answers.
pub async fn start_silent_backend() -> SocketAddr {
    let (listener, addr) = bind().await;

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(60)).await;
                drop(socket);
            });
        }
    });

    addr
}

/// Start a backend that reads the request and closes without answering.
pub async fn start_hangup_backend() -> SocketAddr {
    let (listener, addr) = bind().await;

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = vec![0u8; 8192];
                let _ = socket.read(&mut buf).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

/// Start an HTTPS backend answering 200 with a self-signed certificate
/// issued to `wronghost`, so it fails both chain and hostname checks.
pub async fn start_tls_backend() -> SocketAddr {
    let config = RustlsConfig::from_pem(
        include_bytes!("../fixtures/wronghost_cert.pem").to_vec(),
        include_bytes!("../fixtures/wronghost_key.pem").to_vec(),
    )
    .await
    .unwrap();

    let app = Router::new().route("/", get(|| async { "ok" }));
    let handle = Handle::new();
    let server = axum_server::bind_rustls(SocketAddr::from(([127, 0, 0, 1], 0)), config)
        .handle(handle.clone());
    tokio::spawn(async move {
        let _ = server.serve(app.into_make_service()).await;
    });

    handle.listening().await.unwrap()
}

/// An address nothing is listening on.
pub async fn refused_addr() -> SocketAddr {
    let (listener, addr) = bind().await;
    drop(listener);
    addr
}
