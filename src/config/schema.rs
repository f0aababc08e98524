use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "properties": {
            "api": {
                "type": "object",
                "properties": {
                    "key": { "type": "string" },
                    "endpoint": { "type": "string", "format": "uri" },
                    "strategy": { "type": "string", "enum": ["mobile", "desktop"] },
                    "locale": { "type": "string" },
                    "timeout_secs": { "type": "integer", "minimum": 1 },
                    "max_retries": { "type": "integer", "minimum": 0, "maximum": 10 }
                },
                "additionalProperties": false
            },
            "audit": {
                "type": "object",
                "properties": {
                    "metric": {
                        "type": "string",
                        "enum": ["performance", "accessibility", "best-practices", "seo"]
                    }
                },
                "additionalProperties": false
            },
            "output": {
                "type": "object",
                "properties": {
                    "report": { "type": "string" }
                },
                "additionalProperties": false
            }
        },
        "additionalProperties": false
    })
});
