//! src/email/brevo/client.rs
use crate::configuration::ProviderConfig;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum RequestError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{message}")]
    Provider { status: u16, message: String },
}

/// Brevo error bodies look like `{"code": "unauthorized", "message": "..."}`.
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug)]
pub struct EmailClient {
    pub http_client: Client,
    pub url: String,
    pub api_key: Secret<String>,
    pub timeout: Duration,
}

impl EmailClient {
    pub fn new(http_client: Client, config: &ProviderConfig) -> Self {
        Self {
            http_client,
            url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            timeout: config.timeout(),
        }
    }

    /// Posts `payload` once. A status of 400 or above is an error, any other
    /// response yields its JSON body (`Null` when there is none).
    #[tracing::instrument(name = "Post request to Brevo", skip(self, payload), fields(url = %self.url))]
    pub async fn send_request<T>(&self, payload: &T) -> Result<Value, RequestError>
    where
        T: Serialize,
    {
        let response = self
            .http_client
            .post(&self.url)
            .header("api-key", self.api_key.expose_secret())
            .header("accept", "application/json")
            .header("content-type", "application/json")
            .timeout(self.timeout)
            .json(payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        if status >= 400 {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|error| error.message)
                .unwrap_or_else(|_| format!("HTTP Error: {}", status));
            return Err(RequestError::Provider { status, message });
        }

        Ok(serde_json::from_str(&body).unwrap_or_else(|e| {
            if !body.is_empty() {
                tracing::warn!(error = %e, "Brevo accepted the request but returned a non-JSON body");
            }
            Value::Null
        }))
    }
}
