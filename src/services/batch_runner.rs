// Batch Runner
// Sequential classification of split email units with explicit state

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::ClassificationResult;
use crate::services::classifier_client::{Classifier, ClientError};
use crate::services::email_splitter::split_emails;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Idle,
    Running,
    Completed,
    Failed,
}

#[derive(Error, Debug)]
pub enum BatchError {
    /// No endpoint configured; user-correctable, no calls are made.
    #[error("no classification endpoint configured")]
    NoEndpoint,
    /// Raw input produced zero email units; user-correctable.
    #[error("no emails found in the pasted text")]
    EmptyInput,
    /// The first failing classify call; remaining units were not attempted.
    #[error("{0}")]
    Classify(#[from] ClientError),
    /// Operator cancelled mid-batch; results gathered so far are kept.
    #[error("batch cancelled")]
    Cancelled,
}

/// Drives one batch at a time over a [`Classifier`], strictly in input
/// order and one call in flight at most. Each unit costs money and the
/// backend rate-limits, so there is deliberately no concurrent dispatch.
///
/// Accumulator and busy flag are owned here exclusively; results are
/// appended as calls succeed and survive a mid-batch failure, so the
/// operator keeps whatever was already paid for. The busy flag is the
/// caller's re-entrancy guard: invoking `run` again while a batch is in
/// flight is not supported.
pub struct BatchRunner<C: Classifier> {
    classifier: Option<C>,
    state: BatchState,
    results: Vec<ClassificationResult>,
    busy: bool,
    cancel: Arc<AtomicBool>,
}

impl<C: Classifier> BatchRunner<C> {
    /// `classifier` is `None` when no endpoint has been configured yet;
    /// running in that state fails fast without any network traffic.
    pub fn new(classifier: Option<C>) -> Self {
        Self {
            classifier,
            state: BatchState::Idle,
            results: Vec::new(),
            busy: false,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn state(&self) -> BatchState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Results accumulated so far, in input order. Mid-run this reflects
    /// completed calls; after a failure it holds the paid-for prefix.
    pub fn results(&self) -> &[ClassificationResult] {
        &self.results
    }

    /// Handle for cooperative cancellation; checked before each dispatch.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Split `raw` and run the full batch protocol over the units.
    pub async fn run(&mut self, raw: &str) -> Result<usize, BatchError> {
        let units = split_emails(raw);
        self.run_units(&units).await
    }

    /// Run one batch over pre-split units, strictly in order, awaiting each
    /// call before issuing the next. First failure aborts the rest.
    pub async fn run_units(&mut self, units: &[String]) -> Result<usize, BatchError> {
        let Some(classifier) = self.classifier.as_ref() else {
            self.state = BatchState::Failed;
            return Err(BatchError::NoEndpoint);
        };
        if units.is_empty() {
            self.state = BatchState::Failed;
            return Err(BatchError::EmptyInput);
        }

        let batch_id = Uuid::new_v4();
        info!(%batch_id, units = units.len(), "batch started");

        self.state = BatchState::Running;
        self.busy = true;
        self.results.clear();
        self.cancel.store(false, Ordering::SeqCst);

        for (index, unit) in units.iter().enumerate() {
            if self.cancel.load(Ordering::SeqCst) {
                warn!(%batch_id, at = index, "batch cancelled by operator");
                self.busy = false;
                self.state = BatchState::Failed;
                return Err(BatchError::Cancelled);
            }

            match classifier.classify(unit).await {
                Ok(result) => {
                    info!(%batch_id, index, category = %result.category, "unit classified");
                    self.results.push(result);
                }
                Err(e) => {
                    warn!(%batch_id, index, error = %e, "batch aborted on first failure");
                    self.busy = false;
                    self.state = BatchState::Failed;
                    return Err(BatchError::Classify(e));
                }
            }
        }

        self.busy = false;
        self.state = BatchState::Completed;
        info!(%batch_id, results = self.results.len(), "batch completed");
        Ok(self.results.len())
    }
}
