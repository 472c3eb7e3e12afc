//! Transport configuration

use std::time::Duration;

use crate::error::MailError;

/// Timeout applied to the connect, greeting, and command phases of the
/// SMTP session.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// SMTP transport configuration
///
/// [`MailerConfig::new`] covers the common case: a plaintext connection with
/// a 5 second timeout. Use the builder-style setters for anything else.
#[derive(Debug, Clone)]
pub struct MailerConfig {
    /// Client name announced in the EHLO greeting
    pub name: String,

    /// SMTP server hostname
    pub host: String,

    /// SMTP server port
    pub port: u16,

    /// Use implicit TLS from the first byte (default: false)
    pub secure: bool,

    /// Timeout for the SMTP session phases (default: 5 seconds)
    pub timeout: Duration,

    /// Optional username and password for SMTP AUTH
    pub credentials: Option<(String, String)>,
}

impl MailerConfig {
    /// Create a configuration for an unencrypted connection to `host:port`
    pub fn new(name: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            port,
            secure: false,
            timeout: DEFAULT_TIMEOUT,
            credentials: None,
        }
    }

    /// Enable or disable implicit TLS
    #[must_use]
    pub const fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Override the session timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set authentication credentials
    #[must_use]
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }

    /// Create a configuration from environment variables
    ///
    /// Reads from:
    /// - `SMTP_HOST` (required)
    /// - `SMTP_PORT` (optional, default: 587)
    /// - `SMTP_CLIENT_NAME` (optional, default: "localhost")
    /// - `SMTP_SECURE` (optional, default: false)
    /// - `SMTP_USERNAME` / `SMTP_PASSWORD` (optional, both or neither)
    ///
    /// # Errors
    ///
    /// Returns `MailError::Config` if `SMTP_HOST` is missing or `SMTP_PORT`
    /// is not a valid port number.
    pub fn from_env() -> Result<Self, MailError> {
        let host = std::env::var("SMTP_HOST")
            .map_err(|_| MailError::config("SMTP_HOST environment variable not set"))?;

        let port = std::env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse()
            .map_err(|_| MailError::config("SMTP_PORT must be a valid port number"))?;

        let name =
            std::env::var("SMTP_CLIENT_NAME").unwrap_or_else(|_| "localhost".to_string());

        let secure = std::env::var("SMTP_SECURE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let credentials = match (std::env::var("SMTP_USERNAME"), std::env::var("SMTP_PASSWORD")) {
            (Ok(username), Ok(password)) => Some((username, password)),
            _ => None,
        };

        Ok(Self {
            name,
            host,
            port,
            secure,
            timeout: DEFAULT_TIMEOUT,
            credentials,
        })
    }
}
