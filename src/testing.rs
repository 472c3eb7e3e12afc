//! Testing utilities
//!
//! An in-memory transport that captures messages for assertions instead of
//! delivering them.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::MailError;
use crate::message::Envelope;
use crate::transport::{Delivery, MailTransport};

/// Capturing transport for tests
///
/// Clones share the captured message list, so keep a clone around for
/// assertions after handing the transport to a
/// [`Mailer`](crate::Mailer).
///
/// ```rust
/// use postbox::testing::MemoryTransport;
/// use postbox::Mailer;
///
/// # async fn example() -> Result<(), postbox::MailError> {
/// let memory = MemoryTransport::new();
/// let mailer = Mailer::with_transport(memory.clone());
///
/// mailer
///     .send("user@example.com", "robot@example.com", "<p>hi</p>", "", Vec::new())
///     .await?;
///
/// assert_eq!(memory.sent_count(), 1);
/// assert!(memory.was_sent_to("user@example.com"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    sent: Arc<Mutex<Vec<Envelope>>>,
    fail_sends: bool,
}

impl MemoryTransport {
    /// Create a capturing transport
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport whose deliveries always fail, for error-path tests
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail_sends: true,
            ..Self::default()
        }
    }

    /// Number of captured messages
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned (should never happen in tests)
    #[must_use]
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// All captured messages, in send order
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned (should never happen in tests)
    #[must_use]
    pub fn sent(&self) -> Vec<Envelope> {
        self.sent.lock().unwrap().clone()
    }

    /// Whether a message was captured for the given recipient
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned (should never happen in tests)
    #[must_use]
    pub fn was_sent_to(&self, address: &str) -> bool {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .any(|envelope| envelope.to == address)
    }

    /// Discard all captured messages
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned (should never happen in tests)
    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

#[async_trait]
impl MailTransport for MemoryTransport {
    async fn verify(&self) -> Result<bool, MailError> {
        Ok(true)
    }

    async fn deliver(&self, envelope: &Envelope) -> Result<Delivery, MailError> {
        envelope.validate()?;

        if self.fail_sends {
            return Err(MailError::send("injected delivery failure"));
        }

        self.sent.lock().unwrap().push(envelope.clone());

        Ok(Delivery {
            message_id: format!("<{}@memory>", Uuid::new_v4()),
            response: "250 captured".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_messages_in_order() {
        let transport = MemoryTransport::new();

        transport
            .deliver(&Envelope::new("a@example.com", "robot@example.com", "1"))
            .await
            .unwrap();
        transport
            .deliver(&Envelope::new("b@example.com", "robot@example.com", "2"))
            .await
            .unwrap();

        let sent = transport.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, "a@example.com");
        assert_eq!(sent[1].to, "b@example.com");

        transport.clear();
        assert_eq!(transport.sent_count(), 0);
    }

    #[tokio::test]
    async fn failing_transport_rejects_and_captures_nothing() {
        let transport = MemoryTransport::failing();

        let result = transport
            .deliver(&Envelope::new("a@example.com", "robot@example.com", "1"))
            .await;

        assert!(matches!(result, Err(MailError::Send(_))));
        assert_eq!(transport.sent_count(), 0);
    }
}
