//! DocChat mock backend: answers the client's three endpoints without any
//! document processing.
//!
//! Uploads are validated the way the real backend does (multipart field
//! `file`, name ending in `.pdf`) and remembered by name; chat turns get a
//! canned reply mentioning the uploaded documents. `MOCK_FAIL_UPLOADS` and
//! `MOCK_FAIL_CHAT` force 500s to exercise the client's failure paths.

mod config;
mod error;
mod routes;

use clap::Parser;
use tracing::info;

use crate::config::MockConfig;

#[derive(Parser, Debug)]
#[command(name = "docchat-mock-backend", about = "Local stand-in for the DocChat backend")]
struct Args {
    /// Listen port (overrides MOCK_BACKEND_PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut config = MockConfig::from_env();
    if let Some(port) = args.port {
        config.port = port;
    }
    info!(
        fail_uploads = config.fail_uploads,
        fail_chat = config.fail_chat,
        "mock backend configured"
    );

    let addr = format!("0.0.0.0:{}", config.port);
    let app = routes::router(routes::AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "mock backend listening");
    axum::serve(listener, app).await?;
    Ok(())
}
