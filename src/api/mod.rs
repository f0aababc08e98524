pub mod routes;
pub mod models;
pub mod errors;

use std::sync::Arc;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::batch::Dashboard;

#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
}

impl AppState {
    pub fn new(dashboard: Dashboard) -> Self {
        Self { dashboard: Arc::new(dashboard) }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", axum::routing::get(routes::health::health_check))
        .route("/api/metrics", axum::routing::get(routes::metrics::list_metrics))
        .route("/api/batches", axum::routing::post(routes::batches::submit_batch))
        .route("/api/batches/current", axum::routing::get(routes::batches::current_batch))
        .route("/api/report", axum::routing::get(routes::reports::download_report))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
