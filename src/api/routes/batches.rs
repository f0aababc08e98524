use axum::{extract::{rejection::JsonRejection, State}, http::StatusCode, Json};
use crate::api::models::{SubmitBatchRequest, SubmitBatchResponse};
use crate::api::AppState;
use crate::batch::BatchSnapshot;
use crate::errors::PagescopeError;
use crate::models::Metric;

pub async fn submit_batch(
    State(state): State<AppState>,
    payload: Result<Json<SubmitBatchRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmitBatchResponse>), PagescopeError> {
    let Json(req) = payload?;
    let metric = match req.metric.as_deref() {
        Some(m) => m.parse::<Metric>()?,
        None => Metric::default(),
    };
    let targets = req.urls.into_targets();
    let total = targets.len();
    let generation = state.dashboard.submit(targets, metric);

    Ok((
        StatusCode::ACCEPTED,
        Json(SubmitBatchResponse {
            generation,
            total,
            metric: metric.to_string(),
        }),
    ))
}

pub async fn current_batch(State(state): State<AppState>) -> Json<BatchSnapshot> {
    Json(state.dashboard.snapshot())
}
