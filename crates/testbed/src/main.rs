//! Attest Testbed binary
//!
//! Runs the fixture server standalone. The port comes from `PORT` and
//! defaults to 8080; log verbosity follows `RUST_LOG`.

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("testbed listening on {addr}");
    attest_testbed::run(listener).await
}
