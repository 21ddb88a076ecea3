use serde::Deserialize;

use crate::{contact::email::is_valid_email, mail::dispatch::DispatchError};

pub const MSG_REQUIRED_FIELDS: &str = "Le nom, l'email et le message sont requis";
pub const MSG_INVALID_EMAIL: &str = "Format d'email invalide";

/// Body of `POST /api/send-email`.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ContactPayload {
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub message: String,
}

impl ContactPayload {
    /// Phone with blank values treated as absent.
    pub fn phone(&self) -> Option<&str> {
        non_blank(self.phone.as_deref())
    }

    /// Subject with blank values treated as absent.
    pub fn subject(&self) -> Option<&str> {
        non_blank(self.subject.as_deref())
    }
}

fn non_blank(v: Option<&str>) -> Option<&str> {
    v.map(str::trim).filter(|s| !s.is_empty())
}

fn null_as_empty<'de, D>(d: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

/// Server-side checks; the client is never trusted.
pub fn validate_payload(p: &ContactPayload) -> Result<(), DispatchError> {
    if [&p.name, &p.email, &p.message]
        .iter()
        .any(|s| s.trim().is_empty())
    {
        return Err(DispatchError::InvalidInput(MSG_REQUIRED_FIELDS.to_owned()));
    }
    if !is_valid_email(p.email.trim()) {
        return Err(DispatchError::InvalidInput(MSG_INVALID_EMAIL.to_owned()));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/mail/payload.rs"]
mod tests;
