//! Owner notification and auto-reply messages.
//!
//! Every user-supplied value is HTML-escaped before it reaches the `html` body.

use std::fmt::Write as _;

use crate::mail::payload::ContactPayload;

pub const DEFAULT_SUBJECT: &str = "Demande de contact";
pub const DEFAULT_AUTO_REPLY_TOPIC: &str = "votre message";
pub const PHONE_NOT_PROVIDED: &str = "Non renseigné";
pub const AUTO_REPLY_SUBJECT: &str = "Votre message a bien été reçu - Anthracite Applications";

/// One message ready for the provider.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    pub html: String,
    pub text: String,
}

/// Sender and recipient addresses used by the two messages.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MailIdentities {
    pub notification_from: String,
    pub auto_reply_from: String,
    pub owner_inbox: String,
}

impl Default for MailIdentities {
    fn default() -> Self {
        Self {
            notification_from: "Contact Form <onboarding@resend.dev>".to_owned(),
            auto_reply_from: "Anthracite Applications <onboarding@resend.dev>".to_owned(),
            owner_inbox: "contact@anthracite.app".to_owned(),
        }
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Message to the site owner carrying every submitted field.
pub fn owner_notification(p: &ContactPayload, ids: &MailIdentities) -> OutgoingEmail {
    let name = p.name.trim();
    let email = p.email.trim();
    let subject = p.subject().unwrap_or(DEFAULT_SUBJECT);
    let phone = p.phone().unwrap_or(PHONE_NOT_PROVIDED);
    let message = p.message.trim();

    let rows = [
        ("Nom", name),
        ("Email", email),
        ("Téléphone", phone),
        ("Sujet", subject),
    ];

    let mut html = String::new();
    let _ = write!(
        html,
        "<h1>Nouveau message de {}</h1>\
         <p>Un nouveau message a été transmis via le portail de contact d'Anthracite Applications.</p>\
         <h2>Informations du contact</h2>",
        escape_html(name)
    );
    for (label, value) in rows {
        let _ = write!(html, "<p><strong>{label} :</strong> {}</p>", escape_html(value));
    }
    let _ = write!(
        html,
        "<h2>Message</h2><p style=\"white-space:pre-wrap\">{}</p>",
        escape_html(message)
    );

    let mut text = format!("Nouveau message de {name}\n\n");
    for (label, value) in rows {
        let _ = writeln!(text, "{label} : {value}");
    }
    let _ = write!(text, "\nMessage :\n{message}\n");

    OutgoingEmail {
        from: ids.notification_from.clone(),
        to: ids.owner_inbox.clone(),
        subject: format!("Nouveau message de {name}: {subject}"),
        reply_to: Some(email.to_owned()),
        html,
        text,
    }
}

/// Acknowledgment to the submitter. Only the name and subject are echoed back.
pub fn auto_reply(p: &ContactPayload, ids: &MailIdentities) -> OutgoingEmail {
    let name = p.name.trim();
    let topic = p
        .subject()
        .unwrap_or(DEFAULT_AUTO_REPLY_TOPIC)
        .to_lowercase();

    let greeting = format!("Bonjour {name},");
    let thanks = format!("Merci d'avoir pris contact avec moi concernant les {topic}.");
    let body = "J'ai bien reçu votre message et je vous répondrai personnellement dans les plus \
                brefs délais, généralement sous 24h ouvrées.";
    let closing = "Bien cordialement,\nAnthracite Applications";

    let html = format!(
        "<h1>Bonjour {},</h1>\
         <p>Merci d'avoir pris contact avec moi concernant les {}.</p>\
         <p>{body}</p>\
         <p>Bien cordialement,<br />Anthracite Applications</p>",
        escape_html(name),
        escape_html(&topic),
    );
    let text = format!("{greeting}\n\n{thanks}\n\n{body}\n\n{closing}\n");

    OutgoingEmail {
        from: ids.auto_reply_from.clone(),
        to: p.email.trim().to_owned(),
        subject: AUTO_REPLY_SUBJECT.to_owned(),
        reply_to: None,
        html,
        text,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mail/templates.rs"]
mod tests;
