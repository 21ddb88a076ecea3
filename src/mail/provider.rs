use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::{
    foundation::error::{SiteError, SiteResult},
    mail::templates::OutgoingEmail,
};

const USER_AGENT: &str = concat!("anthracite/", env!("CARGO_PKG_VERSION"));
/// Provider error bodies are echoed into responses; keep them short.
const MAX_ERROR_CHARS: usize = 300;

/// Transactional email service.
#[async_trait]
pub trait MailProvider: Send + Sync {
    /// Short name reported by the health check.
    fn name(&self) -> &'static str;

    /// Send one message and return the provider-assigned id.
    async fn send(&self, email: &OutgoingEmail) -> SiteResult<String>;
}

/// Resend HTTP API client.
pub struct ResendProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for ResendProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResendProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[derive(serde::Deserialize)]
struct SendResponse {
    id: String,
}

#[derive(serde::Deserialize)]
struct ErrorResponse {
    message: String,
}

impl ResendProvider {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>, timeout: Duration) -> SiteResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(SiteError::config("provider api key is empty"));
        }
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SiteError::config(format!("build http client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            api_key,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/emails", self.base_url)
    }
}

#[async_trait]
impl MailProvider for ResendProvider {
    fn name(&self) -> &'static str {
        "resend"
    }

    #[tracing::instrument(skip_all, fields(subject = %email.subject))]
    async fn send(&self, email: &OutgoingEmail) -> SiteResult<String> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(email)
            .send()
            .await
            .map_err(|e| SiteError::provider(format!("request failed: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            let detail: String = detail.chars().take(MAX_ERROR_CHARS).collect();
            return Err(SiteError::provider(format!("status {}: {detail}", status.as_u16())));
        }

        let parsed: SendResponse = response
            .json()
            .await
            .map_err(|e| SiteError::provider(format!("unexpected response body: {}", e.without_url())))?;
        tracing::debug!(id = %parsed.id, "provider accepted message");
        Ok(parsed.id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mail/provider.rs"]
mod tests;
