use serde_json::Value;
use crate::errors::PagescopeError;
use crate::models::Metric;

/// Extract the 0-100 score for `metric` from a raw response.
///
/// A missing or null category score yields 0, the same value as a genuine zero.
pub fn category_score(response: &Value, metric: Metric) -> Result<u8, PagescopeError> {
    let raw = &response["lighthouseResult"]["categories"][metric.as_str()]["score"];

    if raw.is_null() {
        return Ok(0);
    }

    let score = raw.as_f64().ok_or_else(|| {
        PagescopeError::MalformedResponse(format!("{} score is not a number: {}", metric, raw))
    })?;

    if !(0.0..=1.0).contains(&score) {
        return Err(PagescopeError::MalformedResponse(format!(
            "{} score {} is outside [0, 1]",
            metric, score
        )));
    }

    Ok((score * 100.0).round() as u8)
}
