//! Email notification service
//!
//! Every notifier validates its inputs, composes a [`Message`] and queues it
//! on the [`MailQueue`]. Callers learn whether the message was accepted for
//! sending, never whether it was delivered. A [`SendOutcome::Queued`] carries
//! a [`DeliveryHandle`] for callers that want to wait anyway.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;
use url::Url;

use crate::config::SiteConfig;
use crate::database::CalendarStore;
use crate::mail::{
    DeliveryHandle, MailQueue, Message, TemplateParams, TemplateRegistry, INVITE_TEMPLATE,
    RESET_PASSWORD_TEMPLATE,
};
use crate::models::{ForgotPassword, User};
use crate::utils::errors::Result;
use crate::utils::helpers::{format_timestamp, strip_mention, verify_email_pattern};
use crate::utils::logging::{log_mail_queued, log_mail_rejected, log_unauthorized_mailing};

/// Why a notifier refused to queue a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MissingEvent,
    MissingUser,
    InvalidEmail,
    EmptyName,
    MissingFile,
}

impl Rejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rejection::MissingEvent => "event not found",
            Rejection::MissingUser => "user not found",
            Rejection::InvalidEmail => "invalid email address",
            Rejection::EmptyName => "empty name",
            Rejection::MissingFile => "file not found",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a notifier call
#[derive(Debug)]
pub enum SendOutcome {
    Queued(DeliveryHandle),
    Rejected(Rejection),
}

impl SendOutcome {
    pub fn is_queued(&self) -> bool {
        matches!(self, SendOutcome::Queued(_))
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            SendOutcome::Queued(_) => None,
            SendOutcome::Rejected(reason) => Some(*reason),
        }
    }

    pub fn into_handle(self) -> Option<DeliveryHandle> {
        match self {
            SendOutcome::Queued(handle) => Some(handle),
            SendOutcome::Rejected(_) => None,
        }
    }
}

/// Composes notification mail and hands it to the dispatcher
#[derive(Clone)]
pub struct EmailService {
    queue: MailQueue,
    templates: Arc<TemplateRegistry>,
    site: SiteConfig,
}

impl EmailService {
    pub fn new(queue: MailQueue, templates: TemplateRegistry, site: SiteConfig) -> Self {
        Self {
            queue,
            templates: Arc::new(templates),
            site,
        }
    }

    /// Notify one user about an event.
    ///
    /// Subject is `"{title} {event.title}"`, the plain text body
    /// `"begins at:{event.start} : {event.content}{content}"`.
    pub async fn send<S>(
        &self,
        store: &S,
        event_id: i64,
        user_id: i64,
        title: &str,
        content: &str,
    ) -> Result<SendOutcome>
    where
        S: CalendarStore + ?Sized,
    {
        let Some(event) = store.find_event(event_id).await? else {
            return Ok(reject("event", Rejection::MissingEvent));
        };
        let Some(user) = store.find_user(user_id).await? else {
            return Ok(reject("event", Rejection::MissingUser));
        };
        if !verify_email_pattern(&user.email) {
            return Ok(reject("event", Rejection::InvalidEmail));
        }

        let subject = format!("{} {}", title, event.title);
        let body = format!(
            "begins at:{} : {}{}",
            format_timestamp(event.start),
            event.content.as_deref().unwrap_or_default(),
            content
        );

        let message = Message::builder()
            .to(user.email)
            .subject(subject)
            .body(body)
            .build()?;

        self.dispatch("event", message).await
    }

    /// Notify every participant of an event. Only the event owner may do this.
    ///
    /// Returns the number of participants with a valid address, each of
    /// which got a message queued. Zero when the requester is not the owner,
    /// the event does not exist or no participant address is valid.
    pub async fn send_email_to_event_participants<S>(
        &self,
        store: &S,
        requester_id: i64,
        event_id: i64,
        title: &str,
        content: &str,
    ) -> Result<usize>
    where
        S: CalendarStore + ?Sized,
    {
        let Some(event) = store.find_event(event_id).await? else {
            return Ok(0);
        };
        if !event.is_owned_by(requester_id) {
            log_unauthorized_mailing(event_id, requester_id);
            return Ok(0);
        }

        let mailing_list: Vec<User> = store
            .event_participants(event_id)
            .await?
            .into_iter()
            .filter(|participant| verify_email_pattern(&participant.email))
            .collect();
        if mailing_list.is_empty() {
            debug!(event_id = event_id, "No valid participant addresses");
            return Ok(0);
        }

        for participant in &mailing_list {
            self.send(store, event_id, participant.id, title, content).await?;
        }

        Ok(mailing_list.len())
    }

    /// Invite someone to register, as an HTML mail.
    pub async fn send_email_invitation(
        &self,
        sender_name: &str,
        recipient_name: &str,
        recipient_mail: &str,
    ) -> Result<SendOutcome> {
        if !verify_email_pattern(recipient_mail) {
            return Ok(reject("invitation", Rejection::InvalidEmail));
        }
        if recipient_name.trim().is_empty() || sender_name.trim().is_empty() {
            return Ok(reject("invitation", Rejection::EmptyName));
        }

        let params = params(&[
            ("recipient", recipient_name),
            ("sender", sender_name),
            ("site_name", self.site.site_name.as_str()),
            ("registration_link", self.site.registration_page.as_str()),
            ("home_link", self.site.home_page.as_str()),
            ("addr_to", recipient_mail),
        ]);
        let html = self.templates.render(INVITE_TEMPLATE, &params)?;

        let message = Message::builder()
            .to(recipient_mail)
            .subject("Invitation")
            .html(html)
            .build()?;

        self.dispatch("invitation", message).await
    }

    /// Send a local file as an attachment.
    pub async fn send_email_file(
        &self,
        file_path: impl AsRef<Path>,
        recipient_mail: &str,
    ) -> Result<SendOutcome> {
        if !verify_email_pattern(recipient_mail) {
            return Ok(reject("file", Rejection::InvalidEmail));
        }

        let path = file_path.as_ref();
        let is_file = tokio::fs::metadata(path)
            .await
            .map(|metadata| metadata.is_file())
            .unwrap_or(false);
        if !is_file {
            return Ok(reject("file", Rejection::MissingFile));
        }

        let message = Message::builder()
            .to(recipient_mail)
            .subject("File")
            .body("file")
            .attach(path)
            .build()?;

        self.dispatch("file", message).await
    }

    /// Mail a password reset link.
    pub async fn send_reset_password_mail(&self, user: &ForgotPassword) -> Result<SendOutcome> {
        if !verify_email_pattern(&user.email) {
            return Ok(reject("reset_password", Rejection::InvalidEmail));
        }

        let link = self.reset_password_link(&user.email_verification_token)?;
        let params = params(&[
            ("recipient", strip_mention(&user.username)),
            ("link", link.as_str()),
            ("email", user.email.as_str()),
        ]);
        let html = self.templates.render(RESET_PASSWORD_TEMPLATE, &params)?;

        let message = Message::builder()
            .to(user.email.as_str())
            .subject("Calendar reset password")
            .html(html)
            .build()?;

        self.dispatch("reset_password", message).await
    }

    /// `{domain}/reset-password?email_verification_token={token}`
    pub fn reset_password_link(&self, token: &str) -> Result<String> {
        let base = format!("{}/reset-password", self.site.domain.trim_end_matches('/'));
        let mut link = Url::parse(&base)?;
        link.query_pairs_mut()
            .append_pair("email_verification_token", token);
        Ok(link.to_string())
    }

    async fn dispatch(&self, kind: &str, message: Message) -> Result<SendOutcome> {
        let recipients = message.recipients.len();
        let handle = self.queue.enqueue(message).await?;
        log_mail_queued(handle.id(), kind, recipients);
        Ok(SendOutcome::Queued(handle))
    }
}

fn reject(kind: &str, reason: Rejection) -> SendOutcome {
    log_mail_rejected(kind, reason.as_str());
    SendOutcome::Rejected(reason)
}

fn params(pairs: &[(&str, &str)]) -> TemplateParams {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}
