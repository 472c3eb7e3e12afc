//! Console backend for development
//!
//! Logs messages instead of sending them, so flows can be exercised without
//! an SMTP server or credentials.

use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;

use super::{Delivery, MailTransport};
use crate::error::MailError;
use crate::message::Envelope;

/// Development backend that logs messages instead of delivering them
#[derive(Debug, Clone, Default)]
pub struct ConsoleTransport {
    verbose: bool,
}

impl ConsoleTransport {
    /// Create a console transport
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a console transport that also logs full message content
    #[must_use]
    pub const fn verbose() -> Self {
        Self { verbose: true }
    }
}

#[async_trait]
impl MailTransport for ConsoleTransport {
    async fn verify(&self) -> Result<bool, MailError> {
        Ok(true)
    }

    async fn deliver(&self, envelope: &Envelope) -> Result<Delivery, MailError> {
        envelope.validate()?;

        info!(
            to = %envelope.to,
            from = %envelope.from,
            subject = %envelope.subject,
            attachments = envelope.attachments.len(),
            "console delivery"
        );

        if self.verbose {
            debug!(html = %envelope.html, "message body");

            for attachment in &envelope.attachments {
                debug!(
                    filename = %attachment.filename,
                    bytes = attachment.content.len(),
                    "attachment"
                );
            }
        }

        // Echo to stdout for visibility during development
        println!("--- outgoing mail (console) ---");
        println!("To:      {}", envelope.to);
        println!("From:    {}", envelope.from);
        println!("Subject: {}", envelope.subject);
        for attachment in &envelope.attachments {
            println!(
                "Attach:  {} ({} bytes)",
                attachment.filename,
                attachment.content.len()
            );
        }
        println!("-------------------------------");

        Ok(Delivery {
            message_id: format!("<{}@console>", Uuid::new_v4()),
            response: "250 accepted (console)".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn verify_always_succeeds() {
        let transport = ConsoleTransport::new();
        assert!(transport.verify().await.unwrap());
    }

    #[tokio::test]
    async fn deliver_returns_a_message_id() {
        let transport = ConsoleTransport::new();
        let envelope = Envelope::new("user@example.com", "robot@example.com", "<p>hi</p>");

        let delivery = transport.deliver(&envelope).await.unwrap();
        assert!(delivery.message_id.ends_with("@console>"));
        assert!(delivery.response.starts_with("250"));
    }

    #[tokio::test]
    async fn deliver_validates_the_envelope() {
        let transport = ConsoleTransport::verbose();
        let envelope = Envelope::new("", "robot@example.com", "<p>hi</p>");

        let result = transport.deliver(&envelope).await;
        assert!(matches!(result, Err(MailError::NoRecipient)));
    }
}
