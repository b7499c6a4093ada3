pub mod prices;

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

/// Assemble the service router
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(prices::routes())
        .route("/health", get(health))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
