//! Runtime settings for the email endpoint, read from the environment.

use std::{env, sync::Arc, time::Duration};

use crate::{
    foundation::error::SiteResult,
    mail::{
        dispatch::Dispatcher,
        provider::{MailProvider, ResendProvider},
        templates::MailIdentities,
    },
};

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com";
pub const DEFAULT_PROVIDER_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Clone)]
pub struct SiteConfig {
    pub bind: String,
    /// `None` runs the endpoint without sending email.
    pub resend_api_key: Option<String>,
    pub resend_api_url: String,
    pub identities: MailIdentities,
    pub provider_timeout: Duration,
    pub max_body_bytes: usize,
}

impl std::fmt::Debug for SiteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteConfig")
            .field("bind", &self.bind)
            .field("resend_api_key", &self.resend_api_key.as_ref().map(|_| "<redacted>"))
            .field("resend_api_url", &self.resend_api_url)
            .field("identities", &self.identities)
            .field("provider_timeout", &self.provider_timeout)
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_owned(),
            resend_api_key: None,
            resend_api_url: DEFAULT_RESEND_API_URL.to_owned(),
            identities: MailIdentities::default(),
            provider_timeout: Duration::from_millis(DEFAULT_PROVIDER_TIMEOUT_MS),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

fn env_string<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn env_u64<F>(lookup: &F, name: &str, default: u64) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    env_string(lookup, name)
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize<F>(lookup: &F, name: &str, default: usize) -> usize
where
    F: Fn(&str) -> Option<String>,
{
    env_string(lookup, name)
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

impl SiteConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let ids = defaults.identities;
        Self {
            bind: env_string(&lookup, "SITE_BIND").unwrap_or(defaults.bind),
            resend_api_key: env_string(&lookup, "RESEND_API_KEY"),
            resend_api_url: env_string(&lookup, "RESEND_API_URL").unwrap_or(defaults.resend_api_url),
            identities: MailIdentities {
                notification_from: env_string(&lookup, "SITE_NOTIFICATION_FROM")
                    .unwrap_or(ids.notification_from),
                auto_reply_from: env_string(&lookup, "SITE_AUTO_REPLY_FROM")
                    .unwrap_or(ids.auto_reply_from),
                owner_inbox: env_string(&lookup, "CONTACT_EMAIL").unwrap_or(ids.owner_inbox),
            },
            provider_timeout: Duration::from_millis(env_u64(
                &lookup,
                "SITE_PROVIDER_TIMEOUT_MS",
                DEFAULT_PROVIDER_TIMEOUT_MS,
            )),
            max_body_bytes: env_usize(&lookup, "SITE_MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES),
        }
    }

    pub fn email_enabled(&self) -> bool {
        self.resend_api_key.is_some()
    }

    /// Dispatcher backed by Resend when a key is set, or in dev mode otherwise.
    pub fn dispatcher(&self) -> SiteResult<Dispatcher> {
        let provider = match &self.resend_api_key {
            Some(key) => {
                let p: Arc<dyn MailProvider> = Arc::new(ResendProvider::new(
                    key.clone(),
                    self.resend_api_url.clone(),
                    self.provider_timeout,
                )?);
                Some(p)
            }
            None => None,
        };
        Ok(Dispatcher::new(provider, self.identities.clone()))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
