use std::collections::HashMap;

use account_lookup_lambda::adapters::salesforce::ReqwestQueryClient;
use account_lookup_lambda::config::SalesforceSettings;
use account_lookup_lambda::handlers::lookup::handle_lookup_event;
use axum::extract::Query;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use tokio::net::TcpListener;

const QUERY_PATH: &str = "/services/data/v57.0/query";
const TOKEN: &str = "00Dxx0000001gPL!stub";

async fn spawn_stub(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("stub listener should bind");
    let address = listener.local_addr().expect("stub address");
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("stub server should run");
    });
    format!("http://{address}")
}

fn settings_for(instance_url: &str) -> SalesforceSettings {
    SalesforceSettings {
        instance_url: Some(instance_url.to_string()),
        access_token: Some(TOKEN.to_string()),
        request_timeout: None,
    }
}

fn lookup_event(email: &str) -> Value {
    json!({
        "queryStringParameters": {"email": email},
        "headers": {"x-correlation-id": "it-corr"}
    })
}

async fn salesforce_query(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, String) {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        == Some(format!("Bearer {TOKEN}").as_str());
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            r#"[{"errorCode":"INVALID_SESSION_ID"}]"#.to_string(),
        );
    }

    let soql = params.get("q").cloned().unwrap_or_default();
    if !soql.ends_with("FROM account WHERE PersonEmail = 'o''neil@example.com'") {
        return (
            StatusCode::OK,
            r#"{"totalSize":0,"done":true,"records":[]}"#.to_string(),
        );
    }

    let body = json!({
        "totalSize": 1,
        "done": true,
        "records": [{
            "attributes": {"type": "Account", "url": "/services/data/v57.0/sobjects/Account/001"},
            "Id": "001",
            "LastName": " O'Neil ",
            "PersonEmail": "o'neil@example.com",
            "PersonMailingAddress": {"city": "Cork", "country": "Ireland"},
            "Source__c": null,
            "Hotlisted__c": false
        }]
    });
    (StatusCode::OK, body.to_string())
}

#[tokio::test]
async fn fetches_and_maps_accounts_through_reqwest() {
    let base = spawn_stub(Router::new().route(QUERY_PATH, get(salesforce_query))).await;
    let client = ReqwestQueryClient::build(None).expect("client should build");

    let response = handle_lookup_event(
        &lookup_event("o'neil@example.com"),
        "req-1",
        &settings_for(&format!("{base}/")),
        &client,
    )
    .await;

    assert_eq!(response.status_code, 200);
    assert_eq!(
        response.body,
        r#"[{"id":"001","lastName":"O'Neil","personEmail":"o'neil@example.com","mailingCity":"Cork","mailingCountry":"Ireland","hotlisted":false,"accountSource":""}]"#
    );
}

#[tokio::test]
async fn no_matches_return_204() {
    let base = spawn_stub(Router::new().route(QUERY_PATH, get(salesforce_query))).await;
    let client = ReqwestQueryClient::build(None).expect("client should build");

    let response = handle_lookup_event(
        &lookup_event("nobody@example.com"),
        "req-1",
        &settings_for(&base),
        &client,
    )
    .await;

    assert_eq!(response.status_code, 204);
    assert_eq!(response.body, "[]");
}

#[tokio::test]
async fn upstream_failure_status_is_reported_as_502_with_raw_body() {
    let router = Router::new().route(
        QUERY_PATH,
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base = spawn_stub(router).await;
    let client = ReqwestQueryClient::build(None).expect("client should build");

    let response = handle_lookup_event(
        &lookup_event("jo@example.com"),
        "req-1",
        &settings_for(&base),
        &client,
    )
    .await;

    assert_eq!(response.status_code, 502);
    assert_eq!(response.body, r#"{"error":"boom"}"#);
}

#[tokio::test]
async fn rejected_token_is_reported_as_502() {
    let base = spawn_stub(Router::new().route(QUERY_PATH, get(salesforce_query))).await;
    let client = ReqwestQueryClient::build(None).expect("client should build");
    let settings = SalesforceSettings {
        access_token: Some("expired".to_string()),
        ..settings_for(&base)
    };

    let response =
        handle_lookup_event(&lookup_event("jo@example.com"), "req-1", &settings, &client).await;

    assert_eq!(response.status_code, 502);
    assert_eq!(
        response.body,
        json!({"error": r#"[{"errorCode":"INVALID_SESSION_ID"}]"#}).to_string()
    );
}

#[tokio::test]
async fn unreachable_instance_is_reported_as_502() {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let address = listener.local_addr().expect("listener address");
    drop(listener);

    let client = ReqwestQueryClient::build(None).expect("client should build");
    let response = handle_lookup_event(
        &lookup_event("jo@example.com"),
        "req-1",
        &settings_for(&format!("http://{address}")),
        &client,
    )
    .await;

    assert_eq!(response.status_code, 502);
    let body: Value = serde_json::from_str(&response.body).expect("body should be json");
    assert!(!body["error"].as_str().unwrap_or_default().is_empty());
}
