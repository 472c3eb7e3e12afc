//! postbox: a small SMTP mailer with file-based HTML templates
//!
//! postbox is a thin convenience layer over [`lettre`] and [`minijinja`]:
//! configure a transport once, verify connectivity, and send HTML messages,
//! optionally rendering the body from a template file first.
//!
//! There is no queueing, retrying, batching, or delivery tracking here.
//! Each send is a single immediate attempt; the SMTP protocol, connection
//! management, and template syntax belong to the underlying libraries.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use postbox::Mailer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), postbox::MailError> {
//!     let mailer = Mailer::new();
//!     mailer.initialize("app.example.com", "localhost", 1025).await?;
//!
//!     let delivery = mailer
//!         .send(
//!             "user@example.com",
//!             "App Robot <robot@example.com>",
//!             "<h1>Hello!</h1>",
//!             "Welcome",
//!             Vec::new(),
//!         )
//!         .await?;
//!
//!     println!("accepted: {}", delivery.message_id);
//!     Ok(())
//! }
//! ```
//!
//! # Templates
//!
//! Templates are plain files with `{{ variable }}` placeholders, rendered
//! against any serializable context:
//!
//! ```rust,no_run
//! use postbox::Mailer;
//! use serde_json::json;
//!
//! # async fn example(mailer: &Mailer) -> Result<(), postbox::MailError> {
//! mailer
//!     .send_rendered(
//!         "alice@example.com",
//!         "robot@example.com",
//!         "templates/welcome.html",
//!         json!({ "name": "Alice" }),
//!         "Welcome!",
//!         Vec::new(),
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Development backends
//!
//! [`ConsoleTransport`] logs messages instead of sending them, and
//! [`testing::MemoryTransport`] captures them for assertions; hand either
//! to [`Mailer::with_transport`].

pub mod config;
pub mod error;
pub mod mailer;
pub mod message;
pub mod template;
pub mod testing;
pub mod transport;

pub use config::MailerConfig;
pub use error::MailError;
pub use mailer::Mailer;
pub use message::{Attachment, Envelope};
pub use transport::{ConsoleTransport, Delivery, MailTransport, SmtpTransport};
