//! Transport trait and its implementations.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use tracing::info;

use super::{MailError, Message, MessageSubtype};
use crate::config::{SmtpConfig, TransportKind};

/// Performs the network delivery of a composed message.
///
/// Implement this trait to provide alternative backends.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn send(&self, message: &Message) -> Result<(), MailError>;
}

/// Build the transport selected by configuration.
pub fn from_config(config: &SmtpConfig) -> Result<Arc<dyn Transport>, MailError> {
    match config.transport {
        TransportKind::Smtp => Ok(Arc::new(SmtpTransport::from_config(config)?)),
        TransportKind::Log => Ok(Arc::new(LogTransport)),
    }
}

/// SMTP transport using lettre.
#[derive(Clone)]
pub struct SmtpTransport {
    transport: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    from: Mailbox,
}

impl SmtpTransport {
    pub fn from_config(config: &SmtpConfig) -> Result<Self, MailError> {
        let from: Mailbox = config
            .from
            .parse()
            .map_err(|_| MailError::InvalidAddress(config.from.clone()))?;

        let mut builder = match config.tls.as_str() {
            "none" => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host),
            "tls" => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| MailError::Smtp(e.to_string()))?,
            _ => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|e| MailError::Smtp(e.to_string()))?,
        };

        builder = builder
            .port(config.port)
            .timeout(Some(Duration::from_secs(config.timeout_seconds)));

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: Arc::new(builder.build()),
            from,
        })
    }
}

#[async_trait]
impl Transport for SmtpTransport {
    async fn send(&self, message: &Message) -> Result<(), MailError> {
        let email = compose(&self.from, message).await?;

        self.transport
            .send(email)
            .await
            .map_err(|e| MailError::Smtp(e.to_string()))?;

        Ok(())
    }
}

/// Turn a [`Message`] into a MIME message, reading attachments from disk.
pub async fn compose(from: &Mailbox, message: &Message) -> Result<lettre::Message, MailError> {
    let mut builder = lettre::Message::builder()
        .from(from.clone())
        .subject(message.subject.as_str());

    for to in &message.recipients {
        let mailbox: Mailbox = to
            .parse()
            .map_err(|_| MailError::InvalidAddress(to.clone()))?;
        builder = builder.to(mailbox);
    }

    let body = match message.subtype {
        MessageSubtype::Plain => SinglePart::plain(message.body.clone()),
        MessageSubtype::Html => SinglePart::html(message.body.clone()),
    };

    let email = if message.attachments.is_empty() {
        builder.singlepart(body)
    } else {
        let mut parts = MultiPart::mixed().singlepart(body);
        for path in &message.attachments {
            parts = parts.singlepart(read_attachment(path).await?);
        }
        builder.multipart(parts)
    };

    email.map_err(|e| MailError::Build(e.to_string()))
}

async fn read_attachment(path: &Path) -> Result<SinglePart, MailError> {
    let content = tokio::fs::read(path)
        .await
        .map_err(|e| MailError::Attachment(format!("{}: {}", path.display(), e)))?;

    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "attachment".to_string());

    let content_type = ContentType::parse("application/octet-stream")
        .map_err(|e| MailError::Attachment(e.to_string()))?;

    Ok(Attachment::new(filename).body(content, content_type))
}

/// Writes messages to the log instead of sending them.
#[derive(Debug, Clone, Default)]
pub struct LogTransport;

#[async_trait]
impl Transport for LogTransport {
    async fn send(&self, message: &Message) -> Result<(), MailError> {
        info!(
            subject = %message.subject,
            recipients = ?message.recipients,
            subtype = ?message.subtype,
            attachments = message.attachments.len(),
            "Mail not sent (log transport)"
        );
        Ok(())
    }
}

/// Keeps every message in memory. Used by tests to assert on sent mail.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    sent: Arc<Mutex<Vec<Message>>>,
    failing: Arc<AtomicBool>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent sends fail with an SMTP error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Messages delivered so far, in completion order.
    pub fn sent(&self) -> Vec<Message> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().map(|sent| sent.len()).unwrap_or_default()
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn send(&self, message: &Message) -> Result<(), MailError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(MailError::Smtp("connection refused".to_string()));
        }

        self.sent
            .lock()
            .map_err(|_| MailError::Smtp("memory transport poisoned".to_string()))?
            .push(message.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sender() -> Mailbox {
        "calendar@example.com".parse().unwrap()
    }

    #[tokio::test]
    async fn test_compose_html_message() {
        let message = Message::builder()
            .to("bob@example.com")
            .subject("Invitation")
            .html("<p>Join us</p>")
            .build()
            .unwrap();

        let email = compose(&sender(), &message).await.unwrap();
        let raw = String::from_utf8(email.formatted()).unwrap();

        assert!(raw.contains("Subject: Invitation"));
        assert!(raw.contains("To: bob@example.com"));
        assert!(raw.contains("Content-Type: text/html"));
    }

    #[tokio::test]
    async fn test_compose_with_attachment() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "quarterly report").unwrap();

        let message = Message::builder()
            .to("bob@example.com")
            .subject("File")
            .body("file")
            .attach(file.path())
            .build()
            .unwrap();

        let email = compose(&sender(), &message).await.unwrap();
        let raw = String::from_utf8(email.formatted()).unwrap();

        assert!(raw.contains("multipart/mixed"));
        assert!(raw.contains("Content-Disposition: attachment"));
    }

    #[tokio::test]
    async fn test_compose_missing_attachment_fails() {
        let message = Message::builder()
            .to("bob@example.com")
            .subject("File")
            .body("file")
            .attach("/no/such/file")
            .build()
            .unwrap();

        let result = compose(&sender(), &message).await;
        assert!(matches!(result, Err(MailError::Attachment(_))));
    }

    #[tokio::test]
    async fn test_memory_transport_records_and_fails() {
        let transport = MemoryTransport::new();
        let message = Message::builder()
            .to("a@b.com")
            .subject("Hi")
            .body("Body")
            .build()
            .unwrap();

        transport.send(&message).await.unwrap();
        assert_eq!(transport.sent_count(), 1);

        transport.set_failing(true);
        assert!(transport.send(&message).await.is_err());
        assert_eq!(transport.sent_count(), 1);
    }

    #[tokio::test]
    async fn test_smtp_transport_from_config() {
        let mut config = crate::config::Settings::default().smtp;
        config.transport = TransportKind::Smtp;
        config.tls = "none".to_string();
        assert!(SmtpTransport::from_config(&config).is_ok());

        config.from = "not an address".to_string();
        assert!(matches!(
            SmtpTransport::from_config(&config),
            Err(MailError::InvalidAddress(_))
        ));
    }
}
