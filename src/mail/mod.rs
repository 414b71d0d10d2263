//! Contact email relay
//!
//! Builds the plain-text contact email and submits it over an
//! authenticated, STARTTLS-upgraded SMTP session. The transport is
//! created, used, and dropped per call; there is no pooling and no
//! retry.

use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::config::SmtpConfig;

/// Fixed subject line for relayed submissions
const CONTACT_SUBJECT: &str = "🚨 New Message from Portfolio Contact Form";

/// One contact-form submission.
///
/// All fields are opaque text. Absent fields deserialize to empty
/// strings and render as empty text in the email body.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ContactMessage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

/// Errors on the send path.
///
/// The handler does not distinguish between them; they all surface as
/// the same failure acknowledgment with the display text attached.
#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid mailbox address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("failed to build email message: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("smtp transport failed: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Render the fixed plain-text body, embedding all fields verbatim
pub fn format_body(msg: &ContactMessage) -> String {
    format!(
        "\nNew message from your website:\n\nName: {}\nEmail: {}\nSubject: {}\n\nMessage:\n{}\n",
        msg.name, msg.email, msg.subject, msg.message
    )
}

/// Build the email message from configuration and payload
fn build_email(cfg: &SmtpConfig, msg: &ContactMessage) -> Result<Message, MailError> {
    let from: Mailbox = cfg.from_address.parse()?;
    let to: Mailbox = cfg.recipient().parse()?;

    Ok(Message::builder()
        .from(from)
        .to(to)
        .subject(CONTACT_SUBJECT)
        .header(ContentType::TEXT_PLAIN)
        .body(format_body(msg))?)
}

/// Relay one submission through the configured SMTP relay.
///
/// Blocking: call from `spawn_blocking` in async context. The session
/// starts plaintext and upgrades via STARTTLS before authenticating.
pub fn send_contact_message(cfg: &SmtpConfig, msg: &ContactMessage) -> Result<(), MailError> {
    let email = build_email(cfg, msg)?;

    let credentials = Credentials::new(cfg.username.clone(), cfg.password.clone());
    let mailer = SmtpTransport::starttls_relay(&cfg.host)?
        .port(cfg.port)
        .credentials(credentials)
        .timeout(Some(Duration::from_secs(cfg.timeout)))
        .build();

    mailer.send(&email)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SmtpConfig {
        SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: "owner@example.com".to_string(),
            password: "app-password".to_string(),
            from_address: "owner@example.com".to_string(),
            to_address: String::new(),
            timeout: 5,
        }
    }

    fn full_message() -> ContactMessage {
        ContactMessage {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Analytical engines".to_string(),
            message: "I have a proposal.".to_string(),
        }
    }

    #[test]
    fn test_body_embeds_all_fields_verbatim() {
        let body = format_body(&full_message());
        assert!(body.contains("New message from your website:"));
        assert!(body.contains("Name: Ada Lovelace"));
        assert!(body.contains("Email: ada@example.com"));
        assert!(body.contains("Subject: Analytical engines"));
        assert!(body.contains("Message:\nI have a proposal.\n"));
    }

    #[test]
    fn test_body_with_absent_fields_renders_empty() {
        let body = format_body(&ContactMessage::default());
        assert!(body.contains("Name: \n"));
        assert!(body.contains("Email: \n"));
        assert!(body.contains("Subject: \n"));
        assert!(body.ends_with("Message:\n\n"));
    }

    #[test]
    fn test_build_email_sender_equals_recipient() {
        let email = build_email(&test_config(), &full_message()).unwrap();
        let formatted = String::from_utf8(email.formatted()).unwrap();
        assert!(formatted.contains("Name: Ada Lovelace"));
        // to_address unset, so the sender mailbox is also the recipient
        assert!(formatted.contains("From: owner@example.com"));
        assert!(formatted.contains("To: owner@example.com"));
    }

    #[test]
    fn test_invalid_sender_address_is_an_error() {
        let mut cfg = test_config();
        cfg.from_address = "not an address".to_string();
        let err = build_email(&cfg, &full_message()).unwrap_err();
        assert!(matches!(err, MailError::Address(_)));
    }

    #[test]
    fn test_unreachable_relay_fails_without_panicking() {
        // Nothing listens on port 1; the connect fails fast
        let mut cfg = test_config();
        cfg.host = "127.0.0.1".to_string();
        cfg.port = 1;

        let err = send_contact_message(&cfg, &full_message()).unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
