//! HTTP client for the hosted Code Meet Hub backend.
//!
//! Talks to a PostgREST-style REST endpoint (`{url}/rest/v1/{table}`) with the
//! project's public API key. Without a user access token every request runs as
//! the backend's anonymous role, and `user_id` in an insert is taken as sent;
//! [`BackendClient::with_access_token`] makes requests run as the signed-in user
//! so row-level policies can check it. Failed responses are decoded into
//! [`BackendError`] so callers can classify them without seeing raw text.
//! The CLI uses this client as its [`codemeet_core::EventStore`].

pub mod api;

use anyhow::{Context, Result};
use codemeet_core::{BackendError, Config};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP client for one table of the hosted backend.
#[derive(Clone, Debug)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    api_key: String,
    access_token: Option<String>,
    table: String,
}

impl BackendClient {
    pub fn new(base_url: String, api_key: String, table: String) -> Result<Self> {
        Self::with_timeout(
            base_url,
            api_key,
            table,
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn with_timeout(
        base_url: String,
        api_key: String,
        table: String,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            access_token: None,
            table,
        })
    }

    /// Send `token` (the signed-in user's JWT) as the Bearer instead of the API key.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_timeout(
            config.backend_url.clone(),
            config.backend_key.clone(),
            config.events_table.clone(),
            config.request_timeout(),
        )
    }

    /// Create client from environment (see [`Config::from_env`]).
    pub fn from_env() -> Result<Self> {
        let config = Config::from_env().context("Failed to load backend configuration")?;
        Self::from_config(&config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// REST endpoint for the configured table
    pub fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.api_key);
        request
            .header("apikey", self.api_key.as_str())
            .header("Authorization", format!("Bearer {}", bearer))
    }

    /// GET the table with query parameters. Deserializes the JSON response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        query: &[(&str, String)],
    ) -> Result<T, BackendError> {
        let mut request = self.apply_auth(self.client.get(self.table_url()));
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await.map_err(transport_error)?;
        decode(response).await
    }

    /// POST a JSON body to the table, asking for the stored rows back.
    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        body: &B,
    ) -> Result<T, BackendError> {
        let request = self
            .client
            .post(self.table_url())
            .header("Prefer", "return=representation")
            .json(body);
        let request = self.apply_auth(request);

        let response = request.send().await.map_err(transport_error)?;
        decode(response).await
    }
}

fn transport_error(err: reqwest::Error) -> BackendError {
    BackendError::transport(format!("Failed to send request: {}", err))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let status = response.status();
    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(parse_error_body(status.as_u16(), &error_text));
    }

    response.json().await.map_err(|e| {
        BackendError::transport(format!("Failed to parse response as JSON: {}", e))
            .with_status(status.as_u16())
    })
}

/// Decode a `{ code, message, details, hint }` error body. Bodies in any other
/// shape keep their text as the message and carry no code.
pub fn parse_error_body(status: u16, body: &str) -> BackendError {
    let parsed = serde_json::from_str::<BackendError>(body)
        .ok()
        .filter(|err| err.code.is_some() || !err.message.is_empty());

    let error = match parsed {
        Some(err) => err,
        None => BackendError::new(
            None,
            format!("API request failed with status {}: {}", status, body),
        ),
    };
    error.with_status(status)
}
