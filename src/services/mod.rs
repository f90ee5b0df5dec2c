//! Services module
//!
//! This module contains business logic services

pub mod email;

pub use email::{EmailService, Rejection, SendOutcome};

use tracing::info;

use crate::config::settings::Settings;
use crate::mail::{MailQueue, TemplateRegistry};
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub email_service: EmailService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory, loading template overrides if configured
    pub async fn new(settings: &Settings, queue: MailQueue) -> Result<Self> {
        let mut templates = TemplateRegistry::new();
        if let Some(directory) = &settings.templates.directory {
            let loaded = templates.load_dir(directory).await?;
            info!(directory = %directory, loaded = loaded, "Loaded mail templates");
        }

        let email_service = EmailService::new(queue, templates, settings.site.clone());

        Ok(Self { email_service })
    }
}
