use axum::Json;
use crate::api::models::MetricOption;
use crate::models::Metric;

pub async fn list_metrics() -> Json<Vec<MetricOption>> {
    Json(
        Metric::ALL
            .iter()
            .map(|m| MetricOption { value: m.as_str(), label: m.label() })
            .collect(),
    )
}
