//! Background mail dispatcher
//!
//! Notifiers push messages into a [`MailQueue`] and return immediately. A
//! single worker task drains the queue and runs every send as its own task,
//! bounded by a semaphore, so there is no ordering between deliveries. A
//! failed send is logged and reported to its [`DeliveryHandle`] only; nothing
//! is retried.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, Semaphore};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, Instrument};
use uuid::Uuid;

use super::{MailError, Message, Transport};
use crate::config::DispatcherConfig;
use crate::utils::logging::log_delivery;

struct MailJob {
    id: Uuid,
    message: Message,
    done: oneshot::Sender<Result<(), MailError>>,
}

/// Sending side of the dispatcher. Cheap to clone.
#[derive(Clone)]
pub struct MailQueue {
    tx: mpsc::Sender<MailJob>,
}

impl MailQueue {
    /// Queue a message for deferred delivery.
    ///
    /// Waits only for room in the queue, never for the transport.
    pub async fn enqueue(&self, message: Message) -> Result<DeliveryHandle, MailError> {
        let id = Uuid::new_v4();
        let (done, rx) = oneshot::channel();

        self.tx
            .send(MailJob { id, message, done })
            .await
            .map_err(|_| MailError::QueueClosed)?;

        Ok(DeliveryHandle { id, rx })
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Completion signal for one queued message. Dropping it is fine.
#[derive(Debug)]
pub struct DeliveryHandle {
    id: Uuid,
    rx: oneshot::Receiver<Result<(), MailError>>,
}

impl DeliveryHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Wait for the transport to finish with this message.
    pub async fn wait(self) -> Result<(), MailError> {
        self.rx.await.unwrap_or(Err(MailError::QueueClosed))
    }
}

/// Owns the worker task draining the queue.
pub struct MailDispatcher {
    worker: JoinHandle<()>,
}

impl MailDispatcher {
    /// Spawn the worker on the current tokio runtime.
    pub fn start(transport: Arc<dyn Transport>, config: &DispatcherConfig) -> (MailQueue, Self) {
        let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
        let concurrency = config.concurrency.max(1);

        let worker = tokio::spawn(run(rx, transport, concurrency));
        info!(
            queue_capacity = config.queue_capacity,
            concurrency = concurrency,
            "Mail dispatcher running"
        );

        (MailQueue { tx }, Self { worker })
    }

    /// Wait until every [`MailQueue`] clone is dropped and in-flight sends finish.
    pub async fn join(self) {
        if let Err(e) = self.worker.await {
            error!(error = %e, "Mail dispatcher worker crashed");
        }
    }
}

async fn run(mut rx: mpsc::Receiver<MailJob>, transport: Arc<dyn Transport>, concurrency: usize) {
    let semaphore = Arc::new(Semaphore::new(concurrency));

    while let Some(job) = rx.recv().await {
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };
        let transport = transport.clone();

        tokio::spawn(async move {
            let _permit = permit;
            let MailJob { id, message, done } = job;

            let span = tracing::info_span!("mail", delivery_id = %id);
            let result = transport.send(&message).instrument(span).await;

            let error = result.as_ref().err().map(|e| e.to_string());
            log_delivery(id, &message.subject, error.as_deref());

            let _ = done.send(result);
        });
    }

    // Every permit back means every spawned send has finished.
    let _ = semaphore.acquire_many(concurrency as u32).await;
    debug!("Mail dispatcher stopped");
}
