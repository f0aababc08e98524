use serde_json::{Map, Value};
use crate::models::Problem;

/// Derive the failing audits from a raw response, in the order the response lists them.
///
/// Audits with a null score (not applicable) or a perfect score of 1 are skipped. A
/// response without an audits mapping yields no problems.
pub fn extract_problems(response: &Value, category: &str) -> Vec<Problem> {
    let Some(audits) = audits_of(response) else {
        return Vec::new();
    };

    audits
        .iter()
        .filter_map(|(id, audit)| problem_from_audit(id, audit, category))
        .collect()
}

fn audits_of(response: &Value) -> Option<&Map<String, Value>> {
    response
        .get("lighthouseResult")
        .and_then(|lr| lr.get("audits"))
        .or_else(|| response.get("audits"))
        .and_then(Value::as_object)
}

fn problem_from_audit(id: &str, audit: &Value, category: &str) -> Option<Problem> {
    let score = audit.get("score").and_then(Value::as_f64)?;
    if !(0.0..1.0).contains(&score) {
        return None;
    }

    let impact_summary = if audit["scoreDisplayMode"].as_str() == Some("metricSavings") {
        audit["displayValue"].as_str().map(str::to_string)
    } else {
        None
    };

    let has_savings = audit.get("metricSavings").is_some_and(|s| !s.is_null());
    let (savings_bytes, savings_millis) = if has_savings {
        (savings_figure(audit, "overallSavingsBytes"), savings_figure(audit, "overallSavingsMs"))
    } else {
        (None, None)
    };

    Some(Problem {
        id: audit["id"].as_str().unwrap_or(id).to_string(),
        title: audit["title"].as_str().unwrap_or_default().to_string(),
        description: audit["description"].as_str().unwrap_or_default().to_string(),
        raw_score: score,
        category: category.to_string(),
        impact_summary,
        savings_bytes,
        savings_millis,
    })
}

/// Savings live on the record itself or under `details`, depending on the response version.
fn savings_figure(audit: &Value, key: &str) -> Option<u64> {
    audit
        .get(key)
        .or_else(|| audit.get("details").and_then(|d| d.get(key)))
        .and_then(Value::as_f64)
        .filter(|v| *v >= 0.0)
        .map(|v| v.round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn audits(audits: Value) -> Value {
        json!({"lighthouseResult": {"audits": audits}})
    }

    #[test]
    fn test_score_boundaries() {
        let data = audits(json!({
            "perfect": {"title": "Perfect", "description": "", "score": 1},
            "not-applicable": {"title": "N/A", "description": "", "score": null},
            "almost": {"title": "Almost", "description": "", "score": 0.99},
            "failing": {"title": "Failing", "description": "", "score": 0}
        }));
        let problems = extract_problems(&data, "performance");
        let ids: Vec<&str> = problems.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["almost", "failing"]);
        assert_eq!(problems[0].raw_score, 0.99);
    }

    #[test]
    fn test_absent_score_excluded() {
        let data = audits(json!({"manual": {"title": "Manual check", "scoreDisplayMode": "manual"}}));
        assert!(extract_problems(&data, "accessibility").is_empty());
    }

    #[test]
    fn test_preserves_response_order() {
        let data = audits(json!({
            "zeta": {"title": "Z", "score": 0.1},
            "alpha": {"title": "A", "score": 0.9},
            "mid": {"title": "M", "score": 0.5}
        }));
        let ids: Vec<String> = extract_problems(&data, "seo").into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_metric_savings_fields() {
        let data = audits(json!({
            "render-blocking-resources": {
                "id": "render-blocking-resources",
                "title": "Eliminate render-blocking resources",
                "description": "Resources are blocking the first paint.",
                "score": 0.5,
                "scoreDisplayMode": "metricSavings",
                "displayValue": "Potential savings of 1,230 ms",
                "metricSavings": {"FCP": 1230, "LCP": 1230},
                "details": {"overallSavingsMs": 1230.4, "overallSavingsBytes": 20480}
            }
        }));
        let problems = extract_problems(&data, "performance");
        assert_eq!(problems.len(), 1);
        let p = &problems[0];
        assert_eq!(p.category, "performance");
        assert_eq!(p.impact_summary.as_deref(), Some("Potential savings of 1,230 ms"));
        assert_eq!(p.savings_millis, Some(1230));
        assert_eq!(p.savings_bytes, Some(20480));
    }

    #[test]
    fn test_savings_require_metric_savings_declaration() {
        let data = audits(json!({
            "uses-long-cache-ttl": {
                "title": "Serve static assets with an efficient cache policy",
                "score": 0.3,
                "scoreDisplayMode": "numeric",
                "displayValue": "12 resources found",
                "overallSavingsBytes": 5000
            }
        }));
        let p = &extract_problems(&data, "performance")[0];
        assert!(p.impact_summary.is_none());
        assert!(p.savings_bytes.is_none());
        assert!(p.savings_millis.is_none());
    }

    #[test]
    fn test_top_level_savings_fields() {
        let data = audits(json!({
            "unused-javascript": {
                "title": "Reduce unused JavaScript",
                "score": 0.2,
                "metricSavings": {"LCP": 300},
                "overallSavingsBytes": 150000,
                "overallSavingsMs": 300
            }
        }));
        let p = &extract_problems(&data, "performance")[0];
        assert_eq!(p.savings_bytes, Some(150000));
        assert_eq!(p.savings_millis, Some(300));
        assert!(p.impact_summary.is_none());
    }

    #[test]
    fn test_missing_or_malformed_audits_degrade_to_empty() {
        assert!(extract_problems(&json!({}), "seo").is_empty());
        assert!(extract_problems(&json!({"lighthouseResult": {"audits": []}}), "seo").is_empty());
        assert!(extract_problems(&json!("not an object"), "seo").is_empty());
        assert!(extract_problems(&Value::Null, "seo").is_empty());
    }

    #[test]
    fn test_bare_lighthouse_result_accepted() {
        let data = json!({"audits": {"viewport": {"title": "Has a viewport", "score": 0}}});
        assert_eq!(extract_problems(&data, "seo").len(), 1);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let data = audits(json!({
            "a": {"title": "A", "score": 0.4, "scoreDisplayMode": "metricSavings", "displayValue": "1 s"},
            "b": {"title": "B", "score": 1},
            "c": {"title": "C", "score": 0.0}
        }));
        assert_eq!(extract_problems(&data, "performance"), extract_problems(&data, "performance"));
    }
}
