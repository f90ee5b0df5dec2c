//! Test context for unified test setup
//!
//! Wires the mail dispatcher to a [`MemoryTransport`] so tests can inspect
//! what was actually handed to the transport.

use std::path::PathBuf;
use std::sync::Arc;

use calendar_mail::config::Settings;
use calendar_mail::mail::{MailDispatcher, MemoryTransport};
use calendar_mail::services::{EmailService, ServiceFactory};
use tempfile::TempDir;

use super::init_test_logging;
use super::session::TestSession;

/// Test configuration options
#[derive(Debug, Clone, Default)]
pub struct TestConfig {
    pub template_dir: Option<PathBuf>,
    pub failing_transport: bool,
}

/// Unified test context that manages all test components
pub struct TestContext {
    pub settings: Settings,
    pub session: TestSession,
    pub transport: MemoryTransport,
    pub email: EmailService,
    pub temp_dir: TempDir,
    dispatcher: MailDispatcher,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::new_with_config(TestConfig::default()).await
    }

    pub async fn new_with_config(config: TestConfig) -> Self {
        init_test_logging();

        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mut settings = Settings::default();
        settings.dispatcher.queue_capacity = 16;
        settings.dispatcher.concurrency = 2;
        settings.templates.directory = config
            .template_dir
            .map(|dir| dir.to_string_lossy().to_string());

        let transport = MemoryTransport::new();
        transport.set_failing(config.failing_transport);

        let (queue, dispatcher) =
            MailDispatcher::start(Arc::new(transport.clone()), &settings.dispatcher);
        let services = ServiceFactory::new(&settings, queue)
            .await
            .expect("Failed to create services");

        Self {
            settings,
            session: TestSession::new(),
            transport,
            email: services.email_service,
            temp_dir,
            dispatcher,
        }
    }

    /// Write a file into the context's temp dir and return its path
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Close the queue, wait for every queued send and return the transport
    pub async fn drain(self) -> MemoryTransport {
        let Self {
            email,
            dispatcher,
            transport,
            ..
        } = self;

        drop(email);
        dispatcher.join().await;
        transport
    }
}
