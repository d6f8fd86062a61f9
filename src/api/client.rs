use super::constants::{self, headers};
use super::error::RequestFailure;
use crate::auth::TokenManager;
use crate::config::HttpSettings;
use anyhow::{Context, Result};
use log::{debug, error, info};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Build the shared HTTP client used by the token issuer and the request layer
pub fn build_http_client(settings: &HttpSettings) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .timeout(Duration::from_secs(settings.timeout_secs))
        .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
        .user_agent(concat!("jamf-cli/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")
}

/// Authenticated request layer for the classic (XML) and modern (JSON) API surfaces
#[derive(Clone)]
pub struct JamfClient {
    http_client: reqwest::Client,
    tokens: Arc<TokenManager>,
    renew_on_unauthorized: bool,
}

impl JamfClient {
    pub fn new(http_client: reqwest::Client, tokens: Arc<TokenManager>) -> Self {
        Self {
            http_client,
            tokens,
            renew_on_unauthorized: false,
        }
    }

    /// Answer a 401 from the modern surface with one forced renewal and a single retry
    pub fn with_renew_on_unauthorized(mut self, enabled: bool) -> Self {
        self.renew_on_unauthorized = enabled;
        self
    }

    /// GET a classic API resource with the given token, returning the raw XML body
    pub async fn make_classic_api_request(&self, base_url: &str, endpoint: &str, token: &str) -> Option<String> {
        if token.is_empty() {
            error!("No token found!");
            return None;
        }

        let url = constants::classic_endpoint(base_url, endpoint);
        debug!("Making Classic API request to {}", url);

        match self.get(&url, token, headers::ACCEPT_XML).await {
            Ok(response) => match response.text().await {
                Ok(body) => Some(body),
                Err(e) => {
                    error!("Failed to read response from {}: {}", url, RequestFailure::from_reqwest_error(&e));
                    None
                }
            },
            Err(e) => {
                error!("Classic API request to {} failed: {:#}", url, e);
                None
            }
        }
    }

    /// GET a modern API resource, resolving the token through the lifecycle manager
    pub async fn make_api_request(&self, base_url: &str, endpoint: &str) -> Option<Value> {
        let url = constants::modern_endpoint(base_url, endpoint);

        let Some(token) = self.tokens.load_token(base_url).await else {
            error!("Request to {} skipped: {}", url, RequestFailure::MissingToken);
            return None;
        };

        debug!("Making Jamf Pro API request to {}", url);
        match self.get_json(&url, &token).await {
            Ok(value) => Some(value),
            Err(e) if self.renew_on_unauthorized && RequestFailure::of(&e) == Some(&RequestFailure::Unauthorized) => {
                info!("Token rejected by {}, renewing and retrying once", url);
                let token = self.tokens.renew(base_url).await?;
                match self.get_json(&url, &token).await {
                    Ok(value) => Some(value),
                    Err(e) => {
                        error!("Jamf Pro API request to {} failed after renewal: {:#}", url, e);
                        None
                    }
                }
            }
            Err(e) => {
                error!("Jamf Pro API request to {} failed: {:#}", url, e);
                None
            }
        }
    }

    async fn get_json(&self, url: &str, token: &str) -> Result<Value> {
        let response = self.get(url, token, headers::ACCEPT_JSON).await?;
        response
            .json::<Value>()
            .await
            .map_err(|e| RequestFailure::Decode.into_error(e))
    }

    /// Issue the GET and turn transport errors and non-2xx statuses into classified errors
    async fn get(&self, url: &str, token: &str, accept: &str) -> Result<reqwest::Response> {
        let response = self
            .http_client
            .get(url)
            .bearer_auth(token)
            .header("Accept", accept)
            .send()
            .await
            .map_err(|e| RequestFailure::from_reqwest_error(&e).into_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RequestFailure::from_status_code(status.as_u16()).into_error(body.trim().to_string()));
        }

        Ok(response)
    }
}
