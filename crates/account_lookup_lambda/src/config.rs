use std::fmt;
use std::time::Duration;

use crate::runtime::error::ConfigurationError;

pub const INSTANCE_URL_ENV: &str = "SALESFORCE_INSTANCE_URL";
pub const ACCESS_TOKEN_ENV: &str = "SALESFORCE_ACCESS_TOKEN";
pub const REQUEST_TIMEOUT_ENV: &str = "SALESFORCE_REQUEST_TIMEOUT_SECS";

/// Salesforce settings as read at cold start.
///
/// Missing credentials are not a startup failure: every invocation resolves
/// them through [`SalesforceSettings::credentials`] and reports a 500 when
/// they are absent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SalesforceSettings {
    pub instance_url: Option<String>,
    pub access_token: Option<String>,
    pub request_timeout: Option<Duration>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SalesforceCredentials<'a> {
    pub instance_url: &'a str,
    pub access_token: &'a str,
}

impl SalesforceSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            instance_url: non_blank(lookup(INSTANCE_URL_ENV)),
            access_token: non_blank(lookup(ACCESS_TOKEN_ENV)),
            request_timeout: non_blank(lookup(REQUEST_TIMEOUT_ENV))
                .and_then(|raw| parse_timeout(&raw)),
        }
    }

    pub fn credentials(&self) -> Result<SalesforceCredentials<'_>, ConfigurationError> {
        let instance_url = self
            .instance_url
            .as_deref()
            .ok_or(ConfigurationError::MissingInstanceUrl)?;
        let access_token = self
            .access_token
            .as_deref()
            .ok_or(ConfigurationError::MissingAccessToken)?;

        Ok(SalesforceCredentials {
            instance_url,
            access_token,
        })
    }
}

impl fmt::Debug for SalesforceSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SalesforceSettings")
            .field("instance_url", &self.instance_url)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl fmt::Debug for SalesforceCredentials<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SalesforceCredentials")
            .field("instance_url", &self.instance_url)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

fn parse_timeout(raw: &str) -> Option<Duration> {
    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
        _ => {
            tracing::warn!(
                component = "config",
                variable = REQUEST_TIMEOUT_ENV,
                value = raw,
                "ignoring request timeout, expected a positive number of seconds"
            );
            None
        }
    }
}
