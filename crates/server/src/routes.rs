use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::{Health, NextValue};
use service::sequence::SequenceStore;

use crate::errors::ApiError;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// `GET /next/:sequence_id`: increment the named counter and return its new
/// value. An empty identifier never reaches here; `/next/` matches no route
/// and the router answers 404.
async fn next_value(
    State(store): State<Arc<SequenceStore>>,
    Path(sequence_id): Path<String>,
) -> Result<Json<NextValue>, ApiError> {
    let next_value = store.next(&sequence_id).await?;
    Ok(Json(NextValue { sequence_id, next_value }))
}

/// Build the full application router with the store injected as state.
pub fn build_router(store: Arc<SequenceStore>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/next/:sequence_id", get(next_value))
        .with_state(store)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
