use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use service::sequence::SequenceStore;

fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks.
fn load_bind_addr() -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(5000);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Resolve the durable storage path: configs first, then `SEQUENCE_FILE`,
/// then the stock relative filename.
fn load_sequence_file() -> String {
    match configs::load_default() {
        Ok(cfg) => cfg.storage.sequence_file,
        Err(_) => env::var("SEQUENCE_FILE").unwrap_or_else(|_| "sequences.json".to_string()),
    }
}

/// Public entry: build the app and run the HTTP server.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let sequence_file = load_sequence_file();
    let store = SequenceStore::new(&sequence_file);

    let cors = build_cors();
    let app: Router = routes::build_router(Arc::clone(&store), cors);

    let addr = load_bind_addr()?;
    info!(%addr, %sequence_file, "starting sequence server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
