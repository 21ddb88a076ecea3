use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::{
    foundation::error::{SiteError, SiteResult},
    mail::payload::ContactPayload,
};

pub const SEND_EMAIL_PATH: &str = "/api/send-email";

/// Provider ids returned by a successful submission.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub notification_id: String,
    pub auto_reply_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionResult {
    Success(SubmissionReceipt),
    /// `message` is the server's explanation when one was returned.
    Failure { message: Option<String> },
}

/// Carries a form submission to the email endpoint.
#[async_trait]
pub trait ContactTransport: Send + Sync {
    async fn submit(&self, payload: &ContactPayload) -> SubmissionResult;
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    error: String,
}

/// Posts JSON to `<base>/api/send-email`.
#[derive(Clone, Debug)]
pub struct HttpContactClient {
    client: Client,
    base_url: String,
}

impl HttpContactClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> SiteResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SiteError::config(format!("build http client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}{SEND_EMAIL_PATH}", self.base_url)
    }
}

#[async_trait]
impl ContactTransport for HttpContactClient {
    #[tracing::instrument(skip_all)]
    async fn submit(&self, payload: &ContactPayload) -> SubmissionResult {
        let response = match self.client.post(self.endpoint()).json(payload).send().await {
            Ok(r) => r,
            Err(err) => {
                tracing::warn!(error = %err, "contact submission failed to reach the server");
                return SubmissionResult::Failure { message: None };
            }
        };

        let status = response.status();
        if status.is_success() {
            return match response.json::<SubmissionReceipt>().await {
                Ok(receipt) => SubmissionResult::Success(receipt),
                Err(err) => {
                    tracing::warn!(error = %err, "unreadable success response");
                    SubmissionResult::Failure { message: None }
                }
            };
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .map(|b| b.error)
            .filter(|m| !m.trim().is_empty());
        tracing::warn!(status = status.as_u16(), ?message, "contact submission rejected");
        SubmissionResult::Failure { message }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/contact/transport.rs"]
mod tests;
