use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};
use crate::api::AppState;
use crate::errors::PagescopeError;

/// Export the current batch as a downloadable JSON document.
pub async fn download_report(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, PagescopeError> {
    let report = state.dashboard.report();
    let body = report.to_json()?;
    let disposition = format!("attachment; filename=\"{}\"", report.suggested_filename());

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}
