// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Asynchronous invoice pipeline.
//!
//! Order creation hands a snapshot of the placed order to `submit` and
//! returns immediately. A fixed pool of workers drains a bounded queue;
//! each job renders the invoice, writes the artifact, dispatches the email
//! and removes the artifact whether or not dispatch succeeded. Failures at
//! any step, including a full queue, end up in the dead-letter log and never
//! reach the order's caller.

use crate::artifact::{ArtifactStore, InvoiceArtifact};
use crate::config::InvoiceConfig;
use crate::dead_letter::DeadLetterLog;
use crate::error::{InvoiceError, JobStage};
use crate::mail::{Attachment, MailMessage, MailTransport, compose_invoice_email};
use crate::render::{InvoiceTotals, RenderedInvoice, render_invoice};
use pillora_domain::Order;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// An invoice produced on demand for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegeneratedInvoice {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub totals: InvoiceTotals,
}

/// Renders, stores and dispatches invoices for single orders.
pub struct InvoiceService {
    config: InvoiceConfig,
    store: ArtifactStore,
    transport: Arc<dyn MailTransport>,
}

impl InvoiceService {
    #[must_use]
    pub fn new(config: InvoiceConfig, transport: Arc<dyn MailTransport>) -> Self {
        let store: ArtifactStore = ArtifactStore::new(config.artifact_dir.clone());
        Self {
            config,
            store,
            transport,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &InvoiceConfig {
        &self.config
    }

    #[must_use]
    pub const fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Runs one full job: render, write, dispatch, clean up.
    ///
    /// # Errors
    ///
    /// Returns the first failing step's error. A dispatch error wins over a
    /// cleanup error.
    pub async fn process(&self, order: &Order) -> Result<(), InvoiceError> {
        let rendered: RenderedInvoice = render_invoice(order, &self.config)?;
        let artifact: InvoiceArtifact = self
            .store
            .write(order.order_number(), &rendered.text)
            .await?;

        let attachment: Attachment = Attachment {
            filename: artifact.filename().to_string(),
            path: artifact.path().to_path_buf(),
            content_type: "text/plain; charset=utf-8",
        };
        let message: MailMessage = compose_invoice_email(order, &rendered, &self.config, attachment);

        let dispatched = self.transport.send(&message).await;
        let cleaned = artifact.remove().await;

        dispatched?;
        cleaned?;
        debug!(order_number = %order.order_number(), "Invoice job completed");
        Ok(())
    }

    /// Produces the invoice document for download.
    ///
    /// The artifact is written, read back and removed before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or any file operation fails.
    pub async fn regenerate(&self, order: &Order) -> Result<RegeneratedInvoice, InvoiceError> {
        let rendered: RenderedInvoice = render_invoice(order, &self.config)?;
        let artifact: InvoiceArtifact = self
            .store
            .write(order.order_number(), &rendered.text)
            .await?;
        let filename: String = artifact.filename().to_string();
        let bytes = artifact.read().await;
        artifact.remove().await?;

        Ok(RegeneratedInvoice {
            filename,
            bytes: bytes?,
            totals: rendered.totals,
        })
    }
}

/// Bounded queue plus worker pool for invoice jobs.
pub struct InvoicePipeline {
    sender: Mutex<Option<mpsc::Sender<Order>>>,
    workers: tokio::sync::Mutex<Vec<JoinHandle<()>>>,
    dead_letters: DeadLetterLog,
}

impl InvoicePipeline {
    /// Spawns the workers. Must be called inside a Tokio runtime.
    #[must_use]
    pub fn start(service: Arc<InvoiceService>, dead_letters: DeadLetterLog) -> Self {
        let worker_count: usize = service.config().workers.max(1);
        let capacity: usize = service.config().queue_capacity.max(1);
        let (sender, receiver) = mpsc::channel::<Order>(capacity);
        let receiver = Arc::new(tokio::sync::Mutex::new(receiver));

        let workers: Vec<JoinHandle<()>> = (0..worker_count)
            .map(|worker_id| {
                tokio::spawn(run_worker(
                    worker_id,
                    Arc::clone(&receiver),
                    Arc::clone(&service),
                    dead_letters.clone(),
                ))
            })
            .collect();

        info!(workers = worker_count, capacity, "Invoice pipeline started");

        Self {
            sender: Mutex::new(Some(sender)),
            workers: tokio::sync::Mutex::new(workers),
            dead_letters,
        }
    }

    /// Enqueues an invoice job without waiting.
    ///
    /// # Errors
    ///
    /// Returns `InvoiceError::QueueFull` or `InvoiceError::QueueClosed`; the
    /// job is dead-lettered in both cases.
    pub fn submit(&self, order: Order) -> Result<(), InvoiceError> {
        let guard = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        let order_number: String = order.order_number().to_string();

        let result: Result<(), InvoiceError> = match guard.as_ref() {
            None => Err(InvoiceError::QueueClosed(order_number.clone())),
            Some(sender) => match sender.try_send(order) {
                Ok(()) => Ok(()),
                Err(TrySendError::Full(_)) => Err(InvoiceError::QueueFull(order_number.clone())),
                Err(TrySendError::Closed(_)) => {
                    Err(InvoiceError::QueueClosed(order_number.clone()))
                }
            },
        };
        drop(guard);

        if let Err(e) = &result {
            self.dead_letters
                .record(&order_number, JobStage::Queue, &e.to_string());
        }
        result
    }

    #[must_use]
    pub const fn dead_letters(&self) -> &DeadLetterLog {
        &self.dead_letters
    }

    /// Closes the queue and waits for queued jobs to finish.
    pub async fn shutdown(&self) {
        let sender = self
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        drop(sender);

        let handles: Vec<JoinHandle<()>> = std::mem::take(&mut *self.workers.lock().await);
        for result in futures::future::join_all(handles).await {
            if let Err(e) = result {
                warn!(error = %e, "Invoice worker ended abnormally");
            }
        }
        info!("Invoice pipeline stopped");
    }
}

async fn run_worker(
    worker_id: usize,
    receiver: Arc<tokio::sync::Mutex<mpsc::Receiver<Order>>>,
    service: Arc<InvoiceService>,
    dead_letters: DeadLetterLog,
) {
    loop {
        let next: Option<Order> = receiver.lock().await.recv().await;
        let Some(order) = next else {
            break;
        };

        debug!(worker_id, order_number = %order.order_number(), "Processing invoice job");
        if let Err(e) = service.process(&order).await {
            dead_letters.record(order.order_number().as_str(), e.stage(), &e.to_string());
        }
    }
    debug!(worker_id, "Invoice worker exiting");
}
