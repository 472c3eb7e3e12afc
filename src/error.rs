//! Mailer error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while configuring, rendering, or sending mail
#[derive(Debug, Error)]
pub enum MailError {
    /// Transport used before it was initialized
    #[error("mail transport has not been initialized")]
    NotInitialized,

    /// SMTP connectivity or verification failure
    #[error("SMTP connection check failed: {0}")]
    Transport(String),

    /// The server rejected the message or the submission timed out
    #[error("message submission failed: {0}")]
    Send(String),

    /// Template file could not be read
    #[error("failed to read template '{path}': {source}")]
    TemplateRead {
        /// Path of the template file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Template could not be parsed or rendered
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Address could not be parsed
    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    /// Message has no recipient
    #[error("message must have a recipient")]
    NoRecipient,

    /// Message has no from address
    #[error("message must have a from address")]
    NoSender,

    /// MIME assembly failed
    #[error("could not assemble message: {0}")]
    Assembly(String),

    /// Bad or missing configuration
    #[error("mailer configuration error: {0}")]
    Config(String),
}

impl MailError {
    /// Create a transport error from a string message
    #[must_use]
    pub fn transport<T: Into<String>>(msg: T) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a send error from a string message
    #[must_use]
    pub fn send<T: Into<String>>(msg: T) -> Self {
        Self::Send(msg.into())
    }

    /// Create an assembly error from a string message
    #[must_use]
    pub fn assembly<T: Into<String>>(msg: T) -> Self {
        Self::Assembly(msg.into())
    }

    /// Create a configuration error from a string message
    #[must_use]
    pub fn config<T: Into<String>>(msg: T) -> Self {
        Self::Config(msg.into())
    }
}
