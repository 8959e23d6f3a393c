use serde_json::Value;
use uuid::Uuid;

use crate::runtime::contract::{LookupRequest, ValidationError, EMAIL_PARAMETER};

pub const CORRELATION_ID_HEADER: &str = "X_CORRELATION_ID";

/// Reads a query string parameter from an API Gateway proxy event.
pub fn query_parameter<'a>(event: &'a Value, name: &str) -> Option<&'a str> {
    event
        .get("queryStringParameters")
        .and_then(Value::as_object)
        .and_then(|parameters| parameters.get(name))
        .and_then(Value::as_str)
}

/// Reads a header, ignoring case and treating `-` and `_` as equivalent.
///
/// HTTP APIs lowercase header names and most proxies rewrite underscores, so
/// `X_CORRELATION_ID` may arrive as `x-correlation-id`.
pub fn header<'a>(event: &'a Value, name: &str) -> Option<&'a str> {
    let headers = event.get("headers").and_then(Value::as_object)?;
    headers
        .iter()
        .find(|(key, _)| same_header_name(key, name))
        .and_then(|(_, value)| value.as_str())
}

/// Caller-supplied correlation id, else the invocation id, else a fresh UUID.
pub fn resolve_correlation_id(event: &Value, invocation_id: &str) -> String {
    header(event, CORRELATION_ID_HEADER)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .or_else(|| Some(invocation_id.trim()).filter(|value| !value.is_empty()))
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

pub fn parse_lookup_request(
    event: &Value,
    correlation_id: &str,
) -> Result<LookupRequest, ValidationError> {
    LookupRequest::new(query_parameter(event, EMAIL_PARAMETER), correlation_id)
}

fn same_header_name(candidate: &str, expected: &str) -> bool {
    candidate.len() == expected.len()
        && candidate
            .bytes()
            .zip(expected.bytes())
            .all(|(left, right)| normalize_header_byte(left) == normalize_header_byte(right))
}

fn normalize_header_byte(byte: u8) -> u8 {
    match byte {
        b'-' => b'_',
        other => other.to_ascii_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reads_email_from_query_string_parameters() {
        let event = json!({"queryStringParameters": {"email": " jo@example.com "}});
        let request = parse_lookup_request(&event, "corr").expect("email should parse");
        assert_eq!(request.email, "jo@example.com");
    }

    #[test]
    fn missing_or_null_parameters_fail_validation() {
        for event in [
            json!({}),
            json!({"queryStringParameters": null}),
            json!({"queryStringParameters": {"mail": "jo@example.com"}}),
            json!({"queryStringParameters": {"email": "  "}}),
            json!({"queryStringParameters": {"email": 42}}),
        ] {
            assert_eq!(
                parse_lookup_request(&event, "corr").unwrap_err(),
                ValidationError::MissingEmail
            );
        }
    }

    #[test]
    fn correlation_header_matches_case_and_separator_insensitively() {
        for name in ["X_CORRELATION_ID", "x_correlation_id", "x-correlation-id"] {
            let event = json!({"headers": {name: "abc-123"}});
            assert_eq!(resolve_correlation_id(&event, "req-1"), "abc-123");
        }
    }

    #[test]
    fn correlation_id_falls_back_to_invocation_id() {
        let event = json!({"headers": {"X_CORRELATION_ID": "  ", "Host": "api"}});
        assert_eq!(resolve_correlation_id(&event, "req-1"), "req-1");
        assert_eq!(resolve_correlation_id(&json!({"headers": null}), "req-2"), "req-2");
    }

    #[test]
    fn correlation_id_is_generated_when_nothing_is_available() {
        let generated = resolve_correlation_id(&json!({}), "");
        assert!(Uuid::parse_str(&generated).is_ok());
    }

    #[test]
    fn header_lookup_does_not_match_prefixes() {
        let event = json!({"headers": {"X_CORRELATION_ID_OLD": "stale"}});
        assert_eq!(header(&event, CORRELATION_ID_HEADER), None);
    }
}
