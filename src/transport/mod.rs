//! Mail delivery backends
//!
//! The [`MailTransport`] trait separates the [`Mailer`](crate::Mailer)
//! façade from the concrete delivery mechanism:
//! - [`SmtpTransport`] submits messages to an SMTP server (production)
//! - [`ConsoleTransport`] logs messages instead of sending them
//!   (development)

pub mod console;
pub mod smtp;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::MailError;
use crate::message::Envelope;

pub use console::ConsoleTransport;
pub use smtp::SmtpTransport;

/// Acceptance metadata returned by a successful submission
#[derive(Debug, Clone, Serialize)]
pub struct Delivery {
    /// Message identifier stamped on the outgoing message
    pub message_id: String,

    /// Acceptance line reported by the backend
    pub response: String,
}

/// Trait implemented by mail delivery backends
///
/// Backends perform a single delivery attempt per call; retrying is the
/// caller's responsibility.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Confirm the backend can reach its delivery endpoint
    ///
    /// # Errors
    ///
    /// Returns `MailError::Transport` when the connectivity check fails.
    async fn verify(&self) -> Result<bool, MailError>;

    /// Submit a single message immediately
    ///
    /// # Errors
    ///
    /// Returns `MailError::Send` when the backend rejects the message, and
    /// the validation variants when the envelope is incomplete.
    async fn deliver(&self, envelope: &Envelope) -> Result<Delivery, MailError>;
}
