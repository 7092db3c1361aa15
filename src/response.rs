//! Client-facing response bodies for resource endpoints.

use chrono::Utc;
use serde_json::{json, Value};

/// Body for a store-reported failure. The message text is part of the API
/// contract consumed by existing dashboards and must not change.
pub fn store_error(details: &str) -> Value {
    json!({
        "error": "Erro interno do servidor ao buscar dados",
        "details": details,
    })
}

/// Body for an unexpected failure: generic message plus the ISO-8601 instant
/// of the failure. No internal details are leaked.
pub fn unexpected_error() -> Value {
    json!({
        "error": "Erro interno do servidor",
        "timestamp": Utc::now().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_carries_details() {
        let body = store_error("relation not found");
        assert_eq!(body["error"], "Erro interno do servidor ao buscar dados");
        assert_eq!(body["details"], "relation not found");
    }

    #[test]
    fn unexpected_error_carries_parseable_timestamp() {
        let body = unexpected_error();
        assert_eq!(body["error"], "Erro interno do servidor");
        let ts = body["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
    }
}
