use std::future::Future;
use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::Client;

/// Status and raw body of a Salesforce REST response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Outbound seam for the Salesforce query endpoint.
///
/// `Err` is reserved for transport failures; any HTTP status, including
/// errors, comes back as an [`UpstreamResponse`].
pub trait AccountQueryClient {
    fn get_query(
        &self,
        url: &str,
        access_token: &str,
    ) -> impl Future<Output = Result<UpstreamResponse, String>> + Send;
}

/// Pooled `reqwest` client shared across invocations.
#[derive(Debug, Clone)]
pub struct ReqwestQueryClient {
    client: Client,
}

impl ReqwestQueryClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn build(request_timeout: Option<Duration>) -> reqwest::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::new(builder.build()?))
    }
}

impl AccountQueryClient for ReqwestQueryClient {
    async fn get_query(&self, url: &str, access_token: &str) -> Result<UpstreamResponse, String> {
        let response = self
            .client
            .get(url)
            .bearer_auth(access_token)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|error| error.to_string())?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|error| format!("failed to read Salesforce response body: {error}"))?;

        Ok(UpstreamResponse { status, body })
    }
}
