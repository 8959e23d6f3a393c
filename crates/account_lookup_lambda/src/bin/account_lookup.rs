use account_lookup_lambda::adapters::salesforce::ReqwestQueryClient;
use account_lookup_lambda::config::SalesforceSettings;
use account_lookup_lambda::handlers::lookup::{handle_lookup_event, ApiGatewayResponse};
use account_lookup_lambda::logging::init_logging;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

struct RuntimeDependencies {
    settings: SalesforceSettings,
    client: ReqwestQueryClient,
}

async fn handle_request(
    event: LambdaEvent<Value>,
    deps: &RuntimeDependencies,
) -> Result<ApiGatewayResponse, Error> {
    let response = handle_lookup_event(
        &event.payload,
        &event.context.request_id,
        &deps.settings,
        &deps.client,
    )
    .await;
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging()?;

    let settings = SalesforceSettings::from_env();
    let client = ReqwestQueryClient::build(settings.request_timeout)
        .map_err(|error| Error::from(format!("failed to build Salesforce client: {error}")))?;
    let deps = RuntimeDependencies { settings, client };
    let deps = &deps;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_request(event, deps).await
    }))
    .await
}
