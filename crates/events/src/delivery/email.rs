//! SMTP delivery of admin notification emails.
//!
//! Configured from the environment; when `SMTP_HOST` or
//! `ADMIN_NOTIFY_EMAIL` is missing, [`EmailConfig::from_env`] returns `None`
//! and notifications are only logged.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::bus::PlatformEvent;

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Email build error: {0}")]
    Build(#[from] lettre::error::Error),
}

const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_FROM_ADDRESS: &str = "noreply@sadaqah.local";

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub from_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    /// Recipient of every admin notification.
    pub admin_email: String,
}

impl EmailConfig {
    /// | Variable             | Required | Default                  |
    /// |----------------------|----------|--------------------------|
    /// | `SMTP_HOST`          | yes      |                          |
    /// | `ADMIN_NOTIFY_EMAIL` | yes      |                          |
    /// | `SMTP_PORT`          | no       | `587`                    |
    /// | `SMTP_FROM`          | no       | `noreply@sadaqah.local`  |
    /// | `SMTP_USER`          | no       |                          |
    /// | `SMTP_PASSWORD`      | no       |                          |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        let admin_email = std::env::var("ADMIN_NOTIFY_EMAIL").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
            admin_email,
        })
    }
}

/// Sends plain-text notification emails to the configured admin address.
pub struct EmailDelivery {
    config: EmailConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailDelivery {
    pub fn new(config: EmailConfig) -> Result<Self, EmailError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port);
        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }
        Ok(Self {
            transport: builder.build(),
            config,
        })
    }

    pub async fn deliver(&self, event: &PlatformEvent) -> Result<(), EmailError> {
        let (subject, body) = render(event);
        let message = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(self.config.admin_email.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)?;

        self.transport.send(message).await?;
        tracing::info!(
            to = %self.config.admin_email,
            event_type = %event.event_type,
            "Notification email sent"
        );
        Ok(())
    }
}

/// Subject and plain-text body for an event.
pub fn render(event: &PlatformEvent) -> (String, String) {
    let subject = match event.event_type.as_str() {
        crate::bus::CONTACT_SUBMITTED => "New contact message".to_string(),
        crate::bus::VOLUNTEER_SUBMITTED => "New volunteer application".to_string(),
        crate::bus::TESTIMONIAL_SUBMITTED => "New testimonial awaiting review".to_string(),
        crate::bus::DONATION_COMPLETED => "Donation received".to_string(),
        other => other.to_string(),
    };

    let mut body = format!("{subject}\n\n");
    if let Some(fields) = event.payload.as_object() {
        for (key, value) in fields {
            let value = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            body.push_str(&format!("{key}: {value}\n"));
        }
    }
    body.push_str(&format!("\nTime: {}\n", event.occurred_at.to_rfc3339()));

    (format!("[Sadaqah] {subject}"), body)
}
