//! Report delivery seam.
//!
//! The pipeline hands the rendered report to a [`Deliverer`]. Real email
//! transport lives behind this trait as an external collaborator; the
//! built-in console deliverer is the credential-free fallback. A failed
//! delivery is recovered by surfacing the body locally; the report is
//! never silently dropped.

use docreply_core::{AppError, AppResult};

/// Default subject line for the reply email.
pub const DEFAULT_SUBJECT: &str = "Message from a friendly bot";

/// A composed message ready for delivery.
#[derive(Debug, Clone)]
pub struct OutboundMessage {
    /// Recipient address
    pub to: String,

    /// Subject line
    pub subject: String,

    /// Plain-text body (the rendered report)
    pub body: String,
}

impl OutboundMessage {
    /// Create a message with the default subject.
    pub fn new(to: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: DEFAULT_SUBJECT.to_string(),
            body: body.into(),
        }
    }
}

/// Trait for delivery channels.
#[async_trait::async_trait]
pub trait Deliverer: Send + Sync {
    /// Get the channel name (e.g., "console", "smtp").
    fn channel_name(&self) -> &str;

    /// Deliver the message; a failure is a delivery error.
    async fn deliver(&self, message: &OutboundMessage) -> AppResult<()>;
}

/// Deliverer that prints the message to stdout.
///
/// Used when no email credentials are configured.
pub struct ConsoleDeliverer;

#[async_trait::async_trait]
impl Deliverer for ConsoleDeliverer {
    fn channel_name(&self) -> &str {
        "console"
    }

    async fn deliver(&self, message: &OutboundMessage) -> AppResult<()> {
        println!("To: {}", message.to);
        println!("Subject: {}\n", message.subject);
        println!("{}", message.body);
        Ok(())
    }
}

/// Deliver a message, falling back to the console on failure.
///
/// The fallback keeps the report visible even when the requested channel
/// is down or credentials are missing.
pub async fn deliver_or_fallback(
    deliverer: &dyn Deliverer,
    message: &OutboundMessage,
) -> AppResult<()> {
    match deliverer.deliver(message).await {
        Ok(()) => Ok(()),
        Err(AppError::Delivery(reason)) => {
            tracing::error!(
                "Delivery via {} failed ({}); printing report instead",
                deliverer.channel_name(),
                reason
            );
            println!("{}", message.body);
            Ok(())
        }
        Err(other) => Err(other),
    }
}
