//! Local site for trying the monitor by hand.
//!
//! ```text
//! cargo run --example mock_site
//! site-monitor --config demos/mock_site.toml --once
//! ```

use std::net::SocketAddr;
use std::time::Duration;

use axum::http::StatusCode;
use axum::response::Redirect;
use axum::{routing::get, Router};

#[tokio::main]
async fn main() {
    let app = Router::new()
        .route("/", get(|| async { "Site is up" }))
        .route("/down", get(|| async { StatusCode::SERVICE_UNAVAILABLE }))
        .route("/moved", get(|| async { Redirect::temporary("/") }))
        .route("/loop", get(|| async { Redirect::temporary("/loop") }))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                "Finally"
            }),
        );

    let addr = SocketAddr::from(([127, 0, 0, 1], 8081));
    println!("Mock site listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
