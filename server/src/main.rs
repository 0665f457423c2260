use anyhow::{Context, Result};
use axum::Router;
use clap::Parser;
use retrieval::ChatConfig;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};
use server::{build_app, AppState, DEFAULT_MAX_UPLOAD_BYTES};
use tokio::net::TcpListener;

#[derive(Parser)]
struct Args {
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Document to load at startup
    #[arg(long)]
    document: Option<PathBuf>,
    /// Largest accepted document upload, in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    max_upload_bytes: usize,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => ChatConfig::load(path)?,
        None => ChatConfig::default(),
    };
    let state = AppState::new(config).with_max_upload_bytes(args.max_upload_bytes);
    if let Some(path) = &args.document {
        let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let session = state.load(path.display().to_string(), &text);
        tracing::info!(document = %path.display(), sentences = session.sentences().len(), "preloaded document");
    }
    let app: Router = build_app(state)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
