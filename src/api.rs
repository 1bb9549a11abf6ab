// src/api.rs
//! Public HTTP surface: the aggregation endpoint and a health probe.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tower_http::cors::CorsLayer;

use crate::aggregate::Aggregator;
use crate::model::PulseEnvelope;

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/pulse", get(pulse))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// One aggregation pass per request. Upstream failures have already been
/// degraded inside the aggregator, so this always answers `success: true`;
/// the envelope's error arm exists for consumers of the wire contract.
async fn pulse(State(state): State<AppState>) -> Json<PulseEnvelope> {
    // StdRng rather than the thread rng: the handler future must be Send.
    let mut rng = StdRng::from_os_rng();
    let data = state.aggregator.assemble(Utc::now(), &mut rng).await;
    Json(PulseEnvelope::ok(data, Utc::now()))
}
