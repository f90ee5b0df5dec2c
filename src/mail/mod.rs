//! Mail composition, templating and background delivery.
//!
//! Notifiers build a [`Message`] and hand it to a [`MailQueue`]. The
//! [`MailDispatcher`] worker drains the queue and delivers each message
//! through an injected [`Transport`], outside the caller's flow.
//!
//! ```ignore
//! let transport = Arc::new(SmtpTransport::from_config(&settings.smtp)?);
//! let (queue, dispatcher) = MailDispatcher::start(transport, &settings.dispatcher);
//!
//! let message = Message::builder()
//!     .to("user@example.com")
//!     .subject("Welcome!")
//!     .body("Thanks for joining.")
//!     .build()?;
//! let handle = queue.enqueue(message).await?;
//!
//! // Optional: wait for the transport result.
//! handle.wait().await?;
//! ```

pub mod dispatcher;
pub mod message;
pub mod template;
pub mod transport;

pub use dispatcher::{DeliveryHandle, MailDispatcher, MailQueue};
pub use message::{Message, MessageBuilder, MessageSubtype};
pub use template::{TemplateParams, TemplateRegistry, INVITE_TEMPLATE, RESET_PASSWORD_TEMPLATE};
pub use transport::{LogTransport, MemoryTransport, SmtpTransport, Transport};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("template error: {0}")]
    Template(String),

    #[error("attachment error: {0}")]
    Attachment(String),

    #[error("SMTP error: {0}")]
    Smtp(String),

    #[error("mail queue is closed")]
    QueueClosed,
}

impl MailError {
    /// Whether retrying the same message could succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, MailError::Smtp(_) | MailError::Attachment(_))
    }
}
