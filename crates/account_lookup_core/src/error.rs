use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::contract::{ErrorEnvelope, ValidationError, CREDENTIALS_NOT_CONFIGURED};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("SALESFORCE_INSTANCE_URL is not configured")]
    MissingInstanceUrl,
    #[error("SALESFORCE_ACCESS_TOKEN is not configured")]
    MissingAccessToken,
}

/// Terminal failure of a single lookup invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("{0}")]
    UpstreamTransport(String),
    #[error("Salesforce responded with status {status}")]
    UpstreamStatus { status: u16, body: String },
    #[error("invalid Salesforce response: {0}")]
    InvalidPayload(String),
}

impl LookupError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Configuration(_) => 500,
            Self::UpstreamTransport(_) | Self::UpstreamStatus { .. } | Self::InvalidPayload(_) => {
                502
            }
        }
    }

    /// Body returned to the caller. The upstream status code is never leaked,
    /// only the raw upstream body.
    pub fn envelope(&self, now: DateTime<Utc>) -> ErrorEnvelope {
        match self {
            Self::Validation(error) => ErrorEnvelope::bad_request(error.to_string(), now),
            Self::Configuration(_) => ErrorEnvelope::bare(CREDENTIALS_NOT_CONFIGURED),
            Self::UpstreamTransport(message) => ErrorEnvelope::bare(message.clone()),
            Self::UpstreamStatus { body, .. } => ErrorEnvelope::bare(body.clone()),
            Self::InvalidPayload(_) => ErrorEnvelope::bare(self.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn maps_each_failure_to_its_status() {
        assert_eq!(
            LookupError::from(ValidationError::MissingEmail).status_code(),
            400
        );
        assert_eq!(
            LookupError::from(ConfigurationError::MissingAccessToken).status_code(),
            500
        );
        assert_eq!(
            LookupError::UpstreamTransport("connection reset".to_string()).status_code(),
            502
        );
        assert_eq!(
            LookupError::UpstreamStatus {
                status: 401,
                body: "expired".to_string(),
            }
            .status_code(),
            502
        );
    }

    #[test]
    fn configuration_envelope_hides_which_variable_is_missing() {
        let envelope =
            LookupError::from(ConfigurationError::MissingInstanceUrl).envelope(fixed_now());
        assert_eq!(
            envelope,
            ErrorEnvelope::bare("Salesforce credentials not configured")
        );
    }

    #[test]
    fn upstream_status_envelope_carries_raw_body() {
        let error = LookupError::UpstreamStatus {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(error.envelope(fixed_now()), ErrorEnvelope::bare("boom"));
    }

    #[test]
    fn validation_envelope_is_structured() {
        let envelope = LookupError::from(ValidationError::MissingEmail).envelope(fixed_now());
        let ErrorEnvelope::Structured { error } = envelope else {
            panic!("validation failures use the structured envelope");
        };
        assert_eq!(error.error_code, 400);
        assert_eq!(error.error_message, "BAD REQUEST");
        assert_eq!(error.error_description, "email query parameter is required");
        assert_eq!(error.error_date_time, "2026-01-02T03:04:05Z");
    }
}
