mod api;
mod dto;
mod provider;
mod state;

use crate::{provider::Provider, state::AppState};
use axum::routing::get;
use pendler::{catalog::Catalog, repository::Repository};
use std::{sync::Arc, time::Instant};
use tracing::{error, info};

const PORT: u32 = 3000;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    info!("Starting server...");
    let args: Vec<_> = std::env::args().collect();
    if args.len() < 2 {
        error!("Missing catalog zip");
        std::process::exit(1);
    }
    let path = std::path::Path::new(&args[1]).canonicalize().unwrap();

    let api_key = match std::env::var("ROUTING_API_KEY") {
        Ok(key) => key,
        Err(_) => {
            error!("Missing ROUTING_API_KEY environment variable");
            std::process::exit(1);
        }
    };

    info!("Loading catalog...");
    let now = Instant::now();
    let catalog = Catalog::new().from_zip(path);
    let repository = Repository::new().load_catalog(&catalog).unwrap();
    info!("Loading catalog took {:?}", now.elapsed());

    let state = Arc::new(AppState::new(repository, Provider::new(api_key)));

    let app = axum::Router::new()
        .route("/near", get(api::near))
        .route("/near/summary", get(api::near_summary))
        .route("/search", get(api::search))
        .route("/geocode", get(api::geocode))
        .route("/explore", get(api::explore))
        .route("/analyze", get(api::analyze))
        .route("/schedules", get(api::schedules))
        .with_state(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", PORT))
        .await
        .unwrap();
    info!("Listening to port {PORT}");
    axum::serve(listener, app).await.unwrap();
}
