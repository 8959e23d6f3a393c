use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const BAD_REQUEST_MESSAGE: &str = "BAD REQUEST";
pub const CREDENTIALS_NOT_CONFIGURED: &str = "Salesforce credentials not configured";
pub const EMAIL_PARAMETER: &str = "email";

/// Normalized view of one Salesforce person-account.
///
/// Absent fields are skipped on serialization. `account_source` is the only
/// field that is always emitted, as an empty string when Salesforce has no
/// value for it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salutation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_birthdate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_email: Option<String>,
    #[serde(flatten)]
    pub mailing_address: MailingAddress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotlisted: Option<bool>,
    #[serde(default)]
    pub account_source: String,
}

/// Mailing address flattened into the owning [`AccountRecord`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MailingAddress {
    #[serde(
        rename = "mailingStreet",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub street: Option<String>,
    #[serde(
        rename = "mailingPostalCode",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub postal_code: Option<String>,
    #[serde(
        rename = "mailingCity",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub city: Option<String>,
    #[serde(
        rename = "mailingCountry",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub country: Option<String>,
}

/// Error bodies returned to callers.
///
/// Two shapes coexist: the structured one is only used for a missing `email`
/// parameter, everything else uses the bare `{"error": "..."}` form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ErrorEnvelope {
    Structured { error: ErrorDetail },
    Bare { error: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    pub error_code: u16,
    pub error_date_time: String,
    pub error_message: String,
    pub error_description: String,
}

impl ErrorEnvelope {
    pub fn bad_request(description: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self::Structured {
            error: ErrorDetail {
                error_code: 400,
                error_date_time: now.to_rfc3339_opts(SecondsFormat::Secs, true),
                error_message: BAD_REQUEST_MESSAGE.to_string(),
                error_description: description.into(),
            },
        }
    }

    pub fn bare(message: impl Into<String>) -> Self {
        Self::Bare {
            error: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("email query parameter is required")]
    MissingEmail,
}

/// A validated inbound lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub email: String,
    pub correlation_id: String,
}

impl LookupRequest {
    pub fn new(
        raw_email: Option<&str>,
        correlation_id: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let email = raw_email.map(str::trim).unwrap_or_default();
        if email.is_empty() {
            return Err(ValidationError::MissingEmail);
        }

        Ok(Self {
            email: email.to_string(),
            correlation_id: correlation_id.into(),
        })
    }
}
