//! Background task that turns bus events into admin notifications.

use tokio::sync::broadcast;

use crate::bus::PlatformEvent;
use crate::delivery::email::{EmailConfig, EmailDelivery};

/// Subscribes to the bus and emails the admin inbox, or only logs when
/// SMTP is not configured.
pub struct EmailNotifier {
    mailer: Option<EmailDelivery>,
}

impl EmailNotifier {
    pub fn new(mailer: Option<EmailDelivery>) -> Self {
        Self { mailer }
    }

    /// Build from `SMTP_*` / `ADMIN_NOTIFY_EMAIL`. A broken SMTP setup is
    /// logged and downgraded to log-only.
    pub fn from_env() -> Self {
        let mailer = match EmailConfig::from_env().map(EmailDelivery::new) {
            Some(Ok(mailer)) => Some(mailer),
            Some(Err(e)) => {
                tracing::error!(error = %e, "Invalid SMTP configuration, emails disabled");
                None
            }
            None => {
                tracing::info!("SMTP not configured, admin notifications will only be logged");
                None
            }
        };
        Self::new(mailer)
    }

    pub fn is_enabled(&self) -> bool {
        self.mailer.is_some()
    }

    /// Run until the bus is dropped.
    pub async fn run(self, mut receiver: broadcast::Receiver<PlatformEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => self.handle(&event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notifier lagged, some events were not delivered");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notifier shutting down");
                    break;
                }
            }
        }
    }

    async fn handle(&self, event: &PlatformEvent) {
        let Some(mailer) = &self.mailer else {
            tracing::info!(
                event_type = %event.event_type,
                entity_id = ?event.entity_id,
                "Admin notification (email disabled)"
            );
            return;
        };
        if let Err(e) = mailer.deliver(event).await {
            tracing::error!(error = %e, event_type = %event.event_type, "Failed to send notification email");
        }
    }
}
