//! OAuth client-credentials exchange against `{base_url}/api/oauth/token`

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde_json::Value;

use super::models::{Credentials, IssuedToken};
use crate::api::constants::{self, headers};
use crate::api::error::RequestFailure;

/// Source of fresh access tokens
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Exchange credentials for a token. Any failure is logged and reported as `None`.
    async fn get_token(&self, base_url: &str, credentials: &Credentials) -> Option<IssuedToken>;
}

/// Token issuer talking to the server's OAuth endpoint over HTTP
#[derive(Clone)]
pub struct HttpTokenIssuer {
    http_client: Client,
}

impl HttpTokenIssuer {
    pub fn new(http_client: Client) -> Self {
        Self { http_client }
    }

    async fn request_token(&self, token_url: &str, credentials: &Credentials) -> Result<IssuedToken> {
        let response = self
            .http_client
            .post(token_url)
            .header("Accept", headers::ACCEPT_JSON)
            .form(&[
                ("client_id", credentials.client_id.as_str()),
                ("client_secret", credentials.client_secret.as_str()),
                ("grant_type", credentials.grant_type.as_str()),
            ])
            .send()
            .await
            .map_err(|e| RequestFailure::from_reqwest_error(&e).into_error(e))?;

        let status = response.status();
        debug!("Token request status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(RequestFailure::from_status_code(status.as_u16()).into_error(error_text));
        }

        let token_data: Value = response
            .json()
            .await
            .map_err(|e| RequestFailure::Decode.into_error(e))?;

        parse_token_response(&token_data)
    }
}

#[async_trait]
impl TokenIssuer for HttpTokenIssuer {
    async fn get_token(&self, base_url: &str, credentials: &Credentials) -> Option<IssuedToken> {
        let token_url = constants::token_endpoint(base_url);
        debug!(
            "Requesting token from {} with client_id {}",
            token_url, credentials.client_id
        );

        match self.request_token(&token_url, credentials).await {
            Ok(token) => {
                debug!("Token received, expires in {}s", token.expires_in);
                Some(token)
            }
            Err(e) => {
                error!("An error occurred while requesting the token: {:#}", e);
                None
            }
        }
    }
}

/// Pull `access_token` and `expires_in` out of a token response body
pub fn parse_token_response(token_data: &Value) -> Result<IssuedToken> {
    let access_token = token_data
        .get("access_token")
        .and_then(|t| t.as_str())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| anyhow::anyhow!("No access token in response"))?;

    let expires_in = token_data
        .get("expires_in")
        .and_then(|e| e.as_u64())
        .ok_or_else(|| anyhow::anyhow!("No expires_in in response"))?;

    Ok(IssuedToken {
        access_token: access_token.to_string(),
        expires_in,
    })
}
