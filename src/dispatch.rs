//! Plan dispatch: optimistic local apply plus ordered host playback.
//!
//! DESIGN
//! ======
//! The local payload of a plan is applied to the caller's document
//! immediately, so the UI never waits on the host. Host requests are queued
//! to a single worker task that plays them strictly in dispatch order, then
//! fetches authoritative bounds for the plan's refresh list. The caller gets
//! a [`PendingConfirmation`] it may await or drop.
//!
//! ERROR HANDLING
//! ==============
//! A host rejection is logged and reported as [`Confirmation::Rejected`].
//! It never unwinds the optimistic update: the next confirmed refresh of the
//! same layers is what brings the local copy back in line.

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod dispatch_test;

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::bounds::Bounds;
use crate::doc::{Document, DocumentId, LayerId};
use crate::error::HostError;
use crate::host::HostAdapter;
use crate::payload::{Command, HostRequest, TransformPlan};

/// Outcome of one dispatched plan, as reported by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Confirmation {
    /// Requests were played. Carries refreshed bounds, if any were requested.
    Confirmed(Vec<(LayerId, Bounds)>),
    /// The host declined, failed, or the worker went away.
    Rejected(HostError),
}

/// Handle to a plan whose host playback has not been confirmed yet.
#[derive(Debug)]
pub struct PendingConfirmation {
    pub command: Command,
    reply: oneshot::Receiver<Confirmation>,
}

impl PendingConfirmation {
    /// Wait for the host's answer.
    pub async fn wait(self) -> Confirmation {
        match self.reply.await {
            Ok(confirmation) => confirmation,
            Err(_) => Confirmation::Rejected(HostError::Cancelled),
        }
    }
}

struct Job {
    command: Command,
    document_id: DocumentId,
    requests: Vec<HostRequest>,
    refresh: Vec<LayerId>,
    reply: oneshot::Sender<Confirmation>,
}

/// Applies plans locally and forwards their requests to a host.
pub struct Dispatcher {
    tx: mpsc::UnboundedSender<Job>,
    worker: JoinHandle<()>,
}

impl Dispatcher {
    /// Spawn the playback worker. Must be called inside a Tokio runtime.
    pub fn new(host: Arc<dyn HostAdapter>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_worker(host, rx));
        Self { tx, worker }
    }

    /// Apply `plan` to `document` and queue its host requests.
    ///
    /// Returns `None` when there is nothing to confirm: empty plans and
    /// purely local plans such as live drag bounds.
    pub fn dispatch(&self, document: &mut Document, plan: TransformPlan) -> Option<PendingConfirmation> {
        if plan.document_id != document.id {
            warn!(command = ?plan.command, "plan targets another document; dropped");
            return None;
        }
        if let Some(payload) = &plan.payload {
            let changed = document.apply_payload(payload);
            debug!(command = ?plan.command, changed, "optimistic payload applied");
        }
        if plan.requests.is_empty() && plan.refresh.is_empty() {
            return None;
        }

        let (reply_tx, reply_rx) = oneshot::channel();
        let job = Job {
            command: plan.command,
            document_id: plan.document_id,
            requests: plan.requests,
            refresh: plan.refresh,
            reply: reply_tx,
        };
        if let Err(err) = self.tx.send(job) {
            warn!(command = ?plan.command, "playback worker stopped; request dropped");
            let job = err.0;
            if job.reply.send(Confirmation::Rejected(HostError::Cancelled)).is_err() {
                debug!("confirmation receiver already dropped");
            }
        }
        Some(PendingConfirmation { command: plan.command, reply: reply_rx })
    }

    /// Stop accepting plans and wait for queued playback to drain.
    pub async fn shutdown(self) {
        drop(self.tx);
        if let Err(err) = self.worker.await {
            warn!(error = %err, "playback worker ended abnormally");
        }
    }
}

async fn run_worker(host: Arc<dyn HostAdapter>, mut rx: mpsc::UnboundedReceiver<Job>) {
    while let Some(job) = rx.recv().await {
        let outcome = play(host.as_ref(), &job).await;
        if job.reply.send(outcome).is_err() {
            debug!(command = ?job.command, "confirmation receiver dropped");
        }
    }
    info!("playback worker stopped");
}

async fn play(host: &dyn HostAdapter, job: &Job) -> Confirmation {
    if !job.requests.is_empty() {
        if let Err(err) = host.play(&job.requests).await {
            warn!(command = ?job.command, error = %err, "host rejected requests");
            return Confirmation::Rejected(err);
        }
        info!(command = job.command.history_name(), count = job.requests.len(), "host requests played");
    }
    if job.refresh.is_empty() {
        return Confirmation::Confirmed(Vec::new());
    }
    match host.fetch_bounds(job.document_id, &job.refresh).await {
        Ok(bounds) => Confirmation::Confirmed(bounds),
        Err(err) => {
            warn!(command = ?job.command, error = %err, "bounds refresh failed");
            Confirmation::Rejected(err)
        }
    }
}

/// Fold a confirmation into `document`. Returns the number of layers updated;
/// a rejection changes nothing.
pub fn reconcile(document: &mut Document, confirmation: &Confirmation) -> usize {
    match confirmation {
        Confirmation::Confirmed(bounds) => document.reconcile(bounds),
        Confirmation::Rejected(_) => 0,
    }
}
