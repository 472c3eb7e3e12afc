//! Mailer façade
//!
//! Owns the shared transport handle and exposes the initialize, verify,
//! send, and render operations.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::MailerConfig;
use crate::error::MailError;
use crate::message::{Attachment, Envelope};
use crate::template;
use crate::transport::{Delivery, MailTransport, SmtpTransport};

/// Façade for sending email through a shared transport
///
/// One transport handle is held for the lifetime of the mailer: written by
/// [`Mailer::initialize`], read by every other operation. Concurrent sends
/// share the handle; connection management belongs to the underlying client
/// library. Each send is a single immediate attempt with no queuing or
/// retries.
///
/// ```rust,no_run
/// use postbox::Mailer;
///
/// # async fn example() -> Result<(), postbox::MailError> {
/// let mailer = Mailer::new();
/// mailer.initialize("app.example.com", "localhost", 1025).await?;
///
/// mailer
///     .send(
///         "user@example.com",
///         "App Robot <robot@example.com>",
///         "<h1>Hello!</h1>",
///         "Welcome",
///         Vec::new(),
///     )
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct Mailer {
    transport: RwLock<Option<Arc<dyn MailTransport>>>,
}

impl Mailer {
    /// Create a mailer with no transport installed
    ///
    /// Every operation except [`Mailer::render`] fails with
    /// [`MailError::NotInitialized`] until [`Mailer::initialize`] succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mailer with a pre-installed transport
    ///
    /// Useful for development and tests, where a
    /// [`ConsoleTransport`](crate::ConsoleTransport) or
    /// [`MemoryTransport`](crate::testing::MemoryTransport) stands in for a
    /// real SMTP server.
    #[must_use]
    pub fn with_transport<T: MailTransport + 'static>(transport: T) -> Self {
        Self {
            transport: RwLock::new(Some(Arc::new(transport))),
        }
    }

    /// Configure the SMTP transport and verify connectivity
    ///
    /// Builds a plaintext transport for `host:port` announcing `name` in
    /// the EHLO greeting, with a 5 second session timeout, then runs
    /// [`Mailer::verify`]. Use [`Mailer::initialize_with`] to override the
    /// TLS mode, timeout, or credentials.
    ///
    /// Concurrent initializations serialize on the internal lock; the last
    /// writer wins.
    ///
    /// # Errors
    ///
    /// Returns `MailError::Transport` when the verification fails.
    pub async fn initialize(&self, name: &str, host: &str, port: u16) -> Result<bool, MailError> {
        self.initialize_with(MailerConfig::new(name, host, port)).await
    }

    /// Configure the SMTP transport from a full configuration and verify
    ///
    /// # Errors
    ///
    /// Returns `MailError::Transport` when the transport cannot be built or
    /// the verification fails.
    pub async fn initialize_with(&self, config: MailerConfig) -> Result<bool, MailError> {
        let host = config.host.clone();
        let transport = SmtpTransport::new(config)?;

        {
            let mut slot = self.transport.write().await;
            *slot = Some(Arc::new(transport));
        }

        let verified = self.verify().await?;
        info!(%host, "mail transport initialized");
        Ok(verified)
    }

    async fn current(&self) -> Result<Arc<dyn MailTransport>, MailError> {
        self.transport
            .read()
            .await
            .clone()
            .ok_or(MailError::NotInitialized)
    }

    /// Confirm the stored transport can reach its delivery endpoint
    ///
    /// # Errors
    ///
    /// Returns `MailError::NotInitialized` before initialization and
    /// `MailError::Transport` when the connectivity check fails (auth
    /// failure, timeout, DNS failure, connection refused).
    pub async fn verify(&self) -> Result<bool, MailError> {
        self.current().await?.verify().await
    }

    /// Send a single HTML message immediately
    ///
    /// One attempt, no queuing; retrying is the caller's responsibility.
    /// `from` may carry a display name (`"App Robot <robot@example.com>"`).
    ///
    /// # Errors
    ///
    /// Returns `MailError::NotInitialized` before initialization,
    /// `MailError::Send` when the server rejects the message or the
    /// submission times out, and the validation variants for incomplete
    /// addresses.
    pub async fn send(
        &self,
        to: &str,
        from: &str,
        html: &str,
        subject: &str,
        attachments: Vec<Attachment>,
    ) -> Result<Delivery, MailError> {
        self.dispatch(
            Envelope::new(to, from, html)
                .subject(subject)
                .attachments(attachments),
        )
        .await
    }

    /// Send a composed envelope
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Mailer::send`].
    pub async fn dispatch(&self, envelope: Envelope) -> Result<Delivery, MailError> {
        let transport = self.current().await?;
        let delivery = transport.deliver(&envelope).await?;

        debug!(
            message_id = %delivery.message_id,
            to = %envelope.to,
            "message dispatched"
        );

        Ok(delivery)
    }

    /// Render a template file against a context
    ///
    /// Synchronous, and independent of the transport: works before
    /// [`Mailer::initialize`].
    ///
    /// # Errors
    ///
    /// Returns `MailError::TemplateRead` if the file is missing or
    /// unreadable, and `MailError::Template` if the template is malformed.
    pub fn render(
        &self,
        view: impl AsRef<Path>,
        context: impl Serialize,
    ) -> Result<String, MailError> {
        template::render_file(view, context)
    }

    /// Render a template file and send the result as the HTML body
    ///
    /// A render failure prevents the send from being attempted; no state is
    /// retained between the two steps.
    ///
    /// # Errors
    ///
    /// Returns whichever of the render or send failure modes occurs first.
    pub async fn send_rendered(
        &self,
        to: &str,
        from: &str,
        view: impl AsRef<Path>,
        context: impl Serialize,
        subject: &str,
        attachments: Vec<Attachment>,
    ) -> Result<Delivery, MailError> {
        let html = template::render_file(view, context)?;
        self.send(to, from, &html, subject, attachments).await
    }
}

impl std::fmt::Debug for Mailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mailer").finish_non_exhaustive()
    }
}
