//! Mailer demo
//!
//! Exercises the send and render flows against the console transport, so no
//! SMTP server is needed.
//!
//! Run with: `cargo run --example email_demo`

use postbox::{Attachment, ConsoleTransport, Mailer};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mailer = Mailer::with_transport(ConsoleTransport::verbose());

    // A plain HTML message
    mailer
        .send(
            "user@example.com",
            "Postbox Robot <robot@example.com>",
            "<h1>Hello!</h1><p>A plain HTML message.</p>",
            "Hello from postbox",
            Vec::new(),
        )
        .await?;

    // A message rendered from the sample template, with an attachment
    let delivery = mailer
        .send_rendered(
            "alice@example.com",
            "Postbox Robot <robot@example.com>",
            "templates/welcome.html",
            json!({
                "app_name": "Postbox Demo",
                "name": "Alice",
                "verification_url": "https://example.com/verify/abc123",
            }),
            "Welcome to Postbox Demo!",
            vec![Attachment::new("getting-started.txt", "1. Verify your address\n2. Log in\n")],
        )
        .await?;

    println!("accepted: {} ({})", delivery.message_id, delivery.response);

    Ok(())
}
