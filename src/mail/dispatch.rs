use std::sync::Arc;

use axum::http::StatusCode;

use crate::mail::{
    payload::{ContactPayload, validate_payload},
    provider::MailProvider,
    templates::{MailIdentities, auto_reply, owner_notification},
};

/// Id returned for both messages when no provider is configured.
pub const DEV_MODE_ID: &str = "dev_mode_no_email_sent";
pub const MSG_SENT: &str = "Message envoyé avec succès";
pub const MSG_SEND_FAILED: &str = "Une erreur est survenue lors de l'envoi du message";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// Rejected before any send; the message is shown to the visitor.
    #[error("{0}")]
    InvalidInput(String),

    /// At least one message could not be delivered.
    #[error("{details}")]
    Delivery { details: String },
}

impl DispatchError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Delivery { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchReceipt {
    pub notification_id: String,
    pub auto_reply_id: String,
}

impl DispatchReceipt {
    pub fn dev_mode() -> Self {
        Self {
            notification_id: DEV_MODE_ID.to_owned(),
            auto_reply_id: DEV_MODE_ID.to_owned(),
        }
    }

    pub fn is_dev_mode(&self) -> bool {
        self.notification_id == DEV_MODE_ID && self.auto_reply_id == DEV_MODE_ID
    }
}

/// Validates a submission and fans it out to the owner and the submitter.
#[derive(Clone)]
pub struct Dispatcher {
    provider: Option<Arc<dyn MailProvider>>,
    identities: MailIdentities,
}

impl Dispatcher {
    pub fn new(provider: Option<Arc<dyn MailProvider>>, identities: MailIdentities) -> Self {
        if provider.is_none() {
            tracing::warn!("no mail provider configured; submissions will not send email");
        }
        Self {
            provider,
            identities,
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.as_ref().map_or("disabled", |p| p.name())
    }

    pub fn identities(&self) -> &MailIdentities {
        &self.identities
    }

    #[tracing::instrument(
        skip_all,
        fields(
            name_len = payload.name.len(),
            has_phone = payload.phone().is_some(),
            has_subject = payload.subject().is_some(),
        )
    )]
    pub async fn dispatch(&self, payload: &ContactPayload) -> Result<DispatchReceipt, DispatchError> {
        validate_payload(payload)?;

        let Some(provider) = &self.provider else {
            tracing::info!("provider disabled; returning sentinel ids");
            return Ok(DispatchReceipt::dev_mode());
        };

        let notification = owner_notification(payload, &self.identities);
        let reply = auto_reply(payload, &self.identities);
        let (owner, submitter) = tokio::join!(provider.send(&notification), provider.send(&reply));

        match (owner, submitter) {
            (Ok(notification_id), Ok(auto_reply_id)) => {
                tracing::info!(%notification_id, %auto_reply_id, "contact emails sent");
                Ok(DispatchReceipt {
                    notification_id,
                    auto_reply_id,
                })
            }
            (owner, submitter) => {
                let mut failed = Vec::new();
                match owner {
                    Ok(id) => tracing::warn!(%id, "owner notification sent but auto-reply failed"),
                    Err(err) => {
                        tracing::error!(error = %err, "owner notification failed");
                        failed.push(format!("notification: {err}"));
                    }
                }
                match submitter {
                    Ok(id) => tracing::warn!(%id, "auto-reply sent but owner notification failed"),
                    Err(err) => {
                        tracing::error!(error = %err, "auto-reply failed");
                        failed.push(format!("auto-reply: {err}"));
                    }
                }
                Err(DispatchError::Delivery {
                    details: failed.join("; "),
                })
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mail/dispatch.rs"]
mod tests;
