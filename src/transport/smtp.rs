//! SMTP delivery backend
//!
//! Uses the `lettre` crate to submit messages to an SMTP server.

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Attachment as AttachmentPart, Body, Mailbox, MultiPart, SinglePart},
    transport::smtp::{authentication::Credentials, extension::ClientId},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::debug;
use uuid::Uuid;

use super::{Delivery, MailTransport};
use crate::config::MailerConfig;
use crate::error::MailError;
use crate::message::Envelope;

/// Delivery backend over an asynchronous SMTP connection
///
/// Built from a [`MailerConfig`]; the underlying connection handling and
/// pooling belong to `lettre`. The transport is safe to share across
/// concurrent sends.
pub struct SmtpTransport {
    config: MailerConfig,
    inner: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpTransport {
    /// Build the transport described by `config`
    ///
    /// No connection is opened yet; use [`MailTransport::verify`] to check
    /// reachability.
    ///
    /// # Errors
    ///
    /// Returns `MailError::Transport` when the relay parameters are
    /// rejected by `lettre`.
    pub fn new(config: MailerConfig) -> Result<Self, MailError> {
        let mut builder = if config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| MailError::transport(e.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };

        builder = builder
            .port(config.port)
            .hello_name(ClientId::Domain(config.name.clone()))
            .timeout(Some(config.timeout));

        if let Some((username, password)) = &config.credentials {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            inner: builder.build(),
            config,
        })
    }

    fn next_message_id(&self) -> String {
        format!("<{}@{}>", Uuid::new_v4(), self.config.name)
    }

    fn build_message(&self, envelope: &Envelope) -> Result<(Message, String), MailError> {
        envelope.validate()?;

        let to: Mailbox = envelope
            .to
            .parse()
            .map_err(|_| MailError::InvalidAddress(envelope.to.clone()))?;
        let from: Mailbox = envelope
            .from
            .parse()
            .map_err(|_| MailError::InvalidAddress(envelope.from.clone()))?;

        let message_id = self.next_message_id();
        let builder = Message::builder()
            .from(from)
            .to(to)
            .subject(&envelope.subject)
            .message_id(Some(message_id.clone()));

        let html_part = SinglePart::builder()
            .header(ContentType::TEXT_HTML)
            .body(envelope.html.clone());

        let message = if envelope.attachments.is_empty() {
            builder
                .header(ContentType::TEXT_HTML)
                .body(envelope.html.clone())
                .map_err(|e| MailError::assembly(e.to_string()))?
        } else {
            let mut parts = MultiPart::mixed().singlepart(html_part);

            for attachment in &envelope.attachments {
                let mime = mime_guess::from_path(&attachment.filename).first_or_octet_stream();
                let content_type = ContentType::parse(mime.essence_str())
                    .map_err(|e| MailError::assembly(e.to_string()))?;

                parts = parts.singlepart(
                    AttachmentPart::new(attachment.filename.clone())
                        .body(Body::new(attachment.content.clone()), content_type),
                );
            }

            builder
                .multipart(parts)
                .map_err(|e| MailError::assembly(e.to_string()))?
        };

        Ok((message, message_id))
    }
}

#[async_trait]
impl MailTransport for SmtpTransport {
    async fn verify(&self) -> Result<bool, MailError> {
        self.inner
            .test_connection()
            .await
            .map_err(|e| MailError::transport(e.to_string()))
    }

    async fn deliver(&self, envelope: &Envelope) -> Result<Delivery, MailError> {
        let (message, message_id) = self.build_message(envelope)?;

        let response = self
            .inner
            .send(message)
            .await
            .map_err(|e| MailError::send(e.to_string()))?;

        let accepted = format!(
            "{} {}",
            response.code(),
            response.message().collect::<Vec<_>>().join(" ")
        );

        debug!(%message_id, to = %envelope.to, "message accepted by server");

        Ok(Delivery {
            message_id,
            response: accepted,
        })
    }
}

// AsyncSmtpTransport does not implement Debug
impl std::fmt::Debug for SmtpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpTransport")
            .field("host", &self.config.host)
            .field("port", &self.config.port)
            .field("secure", &self.config.secure)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Attachment;

    fn transport() -> SmtpTransport {
        SmtpTransport::new(MailerConfig::new("test.local", "smtp.example.com", 587)).unwrap()
    }

    #[tokio::test]
    async fn builds_simple_html_message() {
        let envelope = Envelope::new("user@example.com", "robot@example.com", "<p>hi</p>")
            .subject("Test");

        let result = transport().build_message(&envelope);
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn builds_message_with_display_name_sender() {
        let envelope = Envelope::new(
            "user@example.com",
            "App Robot <robot@example.com>",
            "<p>hi</p>",
        );

        let result = transport().build_message(&envelope);
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn builds_multipart_message_with_attachments() {
        let envelope = Envelope::new("user@example.com", "robot@example.com", "<p>hi</p>")
            .attach(Attachment::new("report.txt", "plain text"))
            .attach(Attachment::new("data.bin", vec![0u8, 1, 2]));

        let result = transport().build_message(&envelope);
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn rejects_unparseable_recipient() {
        let envelope = Envelope::new("not an address", "robot@example.com", "<p>hi</p>");

        let result = transport().build_message(&envelope);
        assert!(matches!(result, Err(MailError::InvalidAddress(_))));
    }

    #[tokio::test]
    async fn rejects_empty_recipient() {
        let envelope = Envelope::new("", "robot@example.com", "<p>hi</p>");

        let result = transport().build_message(&envelope);
        assert!(matches!(result, Err(MailError::NoRecipient)));
    }

    #[tokio::test]
    async fn message_ids_carry_the_client_name() {
        let (_, message_id) = transport()
            .build_message(&Envelope::new(
                "user@example.com",
                "robot@example.com",
                "<p>hi</p>",
            ))
            .unwrap();

        assert!(message_id.starts_with('<'));
        assert!(message_id.ends_with("@test.local>"));
    }

    #[tokio::test]
    async fn secure_config_builds() {
        let config = MailerConfig::new("test.local", "smtp.example.com", 465).secure(true);
        assert!(SmtpTransport::new(config).is_ok());
    }
}
