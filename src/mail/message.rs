//! Outgoing message type and builder.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::MailError;

/// How the body of a [`Message`] is rendered by mail clients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSubtype {
    #[default]
    Plain,
    Html,
}

/// A composed message ready to be queued. Lives only until it is sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub subject: String,
    pub recipients: Vec<String>,
    pub body: String,
    pub subtype: MessageSubtype,
    /// Files read from disk and attached at send time.
    #[serde(default)]
    pub attachments: Vec<PathBuf>,
}

impl Message {
    pub fn builder() -> MessageBuilder {
        MessageBuilder::default()
    }

    pub fn is_html(&self) -> bool {
        self.subtype == MessageSubtype::Html
    }
}

/// Builder for [`Message`].
#[derive(Debug, Default)]
pub struct MessageBuilder {
    subject: Option<String>,
    recipients: Vec<String>,
    body: Option<String>,
    subtype: MessageSubtype,
    attachments: Vec<PathBuf>,
}

impl MessageBuilder {
    /// Add a recipient.
    pub fn to(mut self, address: impl Into<String>) -> Self {
        self.recipients.push(address.into());
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set a plain text body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self.subtype = MessageSubtype::Plain;
        self
    }

    /// Set an HTML body.
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.body = Some(html.into());
        self.subtype = MessageSubtype::Html;
        self
    }

    pub fn attach(mut self, path: impl Into<PathBuf>) -> Self {
        self.attachments.push(path.into());
        self
    }

    /// Build the message, validating required fields.
    pub fn build(self) -> Result<Message, MailError> {
        if self.recipients.is_empty() {
            return Err(MailError::Build("at least one recipient required".into()));
        }

        let subject = self
            .subject
            .ok_or_else(|| MailError::Build("subject required".into()))?;

        let body = self
            .body
            .ok_or_else(|| MailError::Build("body required".into()))?;

        Ok(Message {
            subject,
            recipients: self.recipients,
            body,
            subtype: self.subtype,
            attachments: self.attachments,
        })
    }
}
