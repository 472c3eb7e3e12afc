//! Outgoing message model

use serde::Serialize;

use crate::error::MailError;

/// A named payload bundled with an outgoing message
#[derive(Debug, Clone, Serialize)]
pub struct Attachment {
    /// File name presented to the recipient
    pub filename: String,

    /// Raw content
    pub content: Vec<u8>,
}

impl Attachment {
    /// Create an attachment from a file name and its content
    pub fn new(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }
}

/// A single outgoing email message
///
/// Constructed per send call and never persisted.
///
/// ```rust
/// use postbox::{Attachment, Envelope};
///
/// let envelope = Envelope::new(
///     "user@example.com",
///     "Robot <robot@example.com>",
///     "<h1>Hello!</h1>",
/// )
/// .subject("Welcome")
/// .attach(Attachment::new("notes.txt", "see attached"));
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct Envelope {
    /// Recipient address
    pub to: String,

    /// Sender address, optionally `"Display Name <address>"`
    pub from: String,

    /// Subject line (empty by default)
    pub subject: String,

    /// HTML body
    pub html: String,

    /// Attachments, delivered in insertion order
    pub attachments: Vec<Attachment>,
}

impl Envelope {
    /// Create an envelope with an empty subject and no attachments
    pub fn new(to: impl Into<String>, from: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            from: from.into(),
            subject: String::new(),
            html: html.into(),
            attachments: Vec::new(),
        }
    }

    /// Set the subject line
    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Append one attachment
    #[must_use]
    pub fn attach(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Replace the attachment list
    #[must_use]
    pub fn attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }

    /// Check that the required fields are present
    ///
    /// # Errors
    ///
    /// Returns `MailError::NoRecipient` or `MailError::NoSender` when the
    /// corresponding address is empty.
    pub fn validate(&self) -> Result<(), MailError> {
        if self.to.is_empty() {
            return Err(MailError::NoRecipient);
        }

        if self.from.is_empty() {
            return Err(MailError::NoSender);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_builder() {
        let envelope = Envelope::new("user@example.com", "robot@example.com", "<p>hi</p>")
            .subject("Test");

        assert_eq!(envelope.to, "user@example.com");
        assert_eq!(envelope.from, "robot@example.com");
        assert_eq!(envelope.subject, "Test");
        assert_eq!(envelope.html, "<p>hi</p>");
        assert!(envelope.attachments.is_empty());
    }

    #[test]
    fn subject_defaults_to_empty() {
        let envelope = Envelope::new("user@example.com", "robot@example.com", "<p>hi</p>");
        assert_eq!(envelope.subject, "");
    }

    #[test]
    fn attachments_keep_insertion_order() {
        let envelope = Envelope::new("user@example.com", "robot@example.com", "<p>hi</p>")
            .attach(Attachment::new("first.txt", "one"))
            .attach(Attachment::new("second.txt", "two"));

        assert_eq!(envelope.attachments.len(), 2);
        assert_eq!(envelope.attachments[0].filename, "first.txt");
        assert_eq!(envelope.attachments[1].filename, "second.txt");
    }

    #[test]
    fn validate_rejects_missing_recipient() {
        let envelope = Envelope::new("", "robot@example.com", "<p>hi</p>");
        assert!(matches!(envelope.validate(), Err(MailError::NoRecipient)));
    }

    #[test]
    fn validate_rejects_missing_sender() {
        let envelope = Envelope::new("user@example.com", "", "<p>hi</p>");
        assert!(matches!(envelope.validate(), Err(MailError::NoSender)));
    }

    #[test]
    fn validate_accepts_complete_envelope() {
        let envelope = Envelope::new("user@example.com", "robot@example.com", "<p>hi</p>");
        assert!(envelope.validate().is_ok());
    }
}
