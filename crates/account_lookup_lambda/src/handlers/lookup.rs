use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info};

use crate::adapters::salesforce::AccountQueryClient;
use crate::config::SalesforceSettings;
use crate::handlers::request::{parse_lookup_request, resolve_correlation_id};
use crate::runtime::error::LookupError;
use crate::runtime::mapping::{map_query_response, QueryOutcome};
use crate::runtime::soql::{account_by_email_query, query_url, SoqlLiteral};

const COMPONENT: &str = "account_lookup";
const EMPTY_RESULT_BODY: &str = "[]";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

/// Runs one lookup end to end and always produces a response.
///
/// Credentials are checked before the request is validated, so a broken
/// deployment answers 500 without touching Salesforce whatever the caller
/// sent.
pub async fn handle_lookup_event(
    event: &Value,
    invocation_id: &str,
    settings: &SalesforceSettings,
    client: &impl AccountQueryClient,
) -> ApiGatewayResponse {
    let correlation_id = resolve_correlation_id(event, invocation_id);
    let started_at = Instant::now();
    info!(
        component = COMPONENT,
        event = "lookup_started",
        correlation_id = %correlation_id
    );

    match lookup_accounts(event, &correlation_id, settings, client).await {
        Ok(outcome) => {
            let response = outcome_response(&outcome);
            info!(
                component = COMPONENT,
                event = "lookup_completed",
                correlation_id = %correlation_id,
                status_code = response.status_code,
                records = record_count(&outcome),
                duration_ms = started_at.elapsed().as_millis() as u64
            );
            response
        }
        Err(lookup_error) => {
            let response = lookup_error_response(&lookup_error, Utc::now());
            error!(
                component = COMPONENT,
                event = "lookup_failed",
                correlation_id = %correlation_id,
                status_code = response.status_code,
                upstream_status = upstream_status(&lookup_error),
                duration_ms = started_at.elapsed().as_millis() as u64,
                error = %lookup_error
            );
            response
        }
    }
}

async fn lookup_accounts(
    event: &Value,
    correlation_id: &str,
    settings: &SalesforceSettings,
    client: &impl AccountQueryClient,
) -> Result<QueryOutcome, LookupError> {
    let credentials = settings.credentials()?;
    let request = parse_lookup_request(event, correlation_id)?;

    let soql = account_by_email_query(&SoqlLiteral::escape(&request.email));
    let url = query_url(credentials.instance_url, &soql);

    let upstream = client
        .get_query(&url, credentials.access_token)
        .await
        .map_err(LookupError::UpstreamTransport)?;
    if !upstream.is_success() {
        return Err(LookupError::UpstreamStatus {
            status: upstream.status,
            body: upstream.body,
        });
    }

    map_query_response(&upstream.body)
        .map_err(|error| LookupError::InvalidPayload(error.to_string()))
}

fn outcome_response(outcome: &QueryOutcome) -> ApiGatewayResponse {
    match outcome {
        QueryOutcome::NoRecords => json_response(204, EMPTY_RESULT_BODY.to_string()),
        QueryOutcome::Accounts(accounts) => json_response(
            200,
            serde_json::to_string(accounts).expect("account records should serialize"),
        ),
    }
}

fn lookup_error_response(error: &LookupError, now: DateTime<Utc>) -> ApiGatewayResponse {
    json_response(
        error.status_code(),
        serde_json::to_string(&error.envelope(now)).expect("error envelope should serialize"),
    )
}

fn json_response(status_code: u16, body: String) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: json!({"Content-Type": "application/json"}),
        body,
    }
}

fn record_count(outcome: &QueryOutcome) -> usize {
    match outcome {
        QueryOutcome::NoRecords => 0,
        QueryOutcome::Accounts(accounts) => accounts.len(),
    }
}

fn upstream_status(error: &LookupError) -> Option<u16> {
    match error {
        LookupError::UpstreamStatus { status, .. } => Some(*status),
        _ => None,
    }
}
