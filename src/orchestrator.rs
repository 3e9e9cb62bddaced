//! Batch orchestrator for concurrent per-dependency analysis
//!
//! This module provides:
//! - Fan-out of independent per-dependency analyses with bounded
//!   parallelism (backpressure against the registry's rate limits)
//! - Per-fetch and overall deadlines with best-effort cancellation
//! - Partial-failure containment: one dependency's failure never
//!   aborts its siblings
//! - Input-order-preserving result assembly

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::domain::{BatchAnalysis, DependencyAnalysisResult};

/// Default concurrency limit for registry requests
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Default timeout for a single per-dependency analysis
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Default overall deadline for a whole batch
pub const DEFAULT_BATCH_TIMEOUT: Duration = Duration::from_secs(120);

/// One batch input: a dependency identifier plus its current version,
/// if the caller knows one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchInput {
    pub dependency: String,
    pub current: Option<String>,
}

impl BatchInput {
    pub fn new(dependency: impl Into<String>, current: Option<String>) -> Self {
        Self {
            dependency: dependency.into(),
            current,
        }
    }
}

/// Orchestrator for concurrent batch analysis
#[derive(Debug, Clone)]
pub struct BatchOrchestrator {
    concurrency: usize,
    fetch_timeout: Duration,
    batch_timeout: Duration,
}

impl Default for BatchOrchestrator {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            batch_timeout: DEFAULT_BATCH_TIMEOUT,
        }
    }
}

impl BatchOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound the number of in-flight analyses (minimum 1)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Deadline for each individual analysis
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Deadline for the batch as a whole
    pub fn with_batch_timeout(mut self, timeout: Duration) -> Self {
        self.batch_timeout = timeout;
        self
    }

    /// Run one analysis per input with bounded parallelism.
    ///
    /// The returned results correspond one-to-one with the inputs
    /// regardless of completion order. Work still pending when the
    /// batch deadline passes is cancelled and recorded as a
    /// timeout-classified `Error` entry; completed results are kept.
    pub async fn run<F, Fut>(&self, inputs: Vec<BatchInput>, analyze: F) -> BatchAnalysis
    where
        F: Fn(BatchInput) -> Fut,
        Fut: Future<Output = DependencyAnalysisResult> + Send + 'static,
    {
        let results = self
            .run_with(inputs, analyze, |label, timeout| {
                DependencyAnalysisResult::error(label, format!("timeout: exceeded {:?}", timeout))
            })
            .await;
        BatchAnalysis::new(results)
    }

    /// Generic fan-out core.
    ///
    /// `on_timeout(dependency, deadline)` builds the placeholder for
    /// analyses cancelled by either deadline.
    pub async fn run_with<T, F, Fut, G>(
        &self,
        inputs: Vec<BatchInput>,
        analyze: F,
        on_timeout: G,
    ) -> Vec<T>
    where
        T: Send + 'static,
        F: Fn(BatchInput) -> Fut,
        Fut: Future<Output = T> + Send + 'static,
        G: Fn(&str, Duration) -> T + Clone + Send + 'static,
    {
        let total = inputs.len();
        let labels: Vec<String> = inputs.iter().map(|input| input.dependency.clone()).collect();
        let mut slots: Vec<Option<T>> = Vec::new();
        slots.resize_with(total, || None);

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks: JoinSet<(usize, T)> = JoinSet::new();

        debug!(total, concurrency = self.concurrency, "starting batch analysis");

        for (index, input) in inputs.into_iter().enumerate() {
            let semaphore = Arc::clone(&semaphore);
            let label = input.dependency.clone();
            let fetch_timeout = self.fetch_timeout;
            let analysis = analyze(input);
            let on_timeout = on_timeout.clone();

            tasks.spawn(async move {
                // The analysis future does no work until polled, so the
                // permit bounds actual in-flight fetches
                let _permit = semaphore.acquire_owned().await.expect("semaphore closed");
                let result = match tokio::time::timeout(fetch_timeout, analysis).await {
                    Ok(result) => result,
                    Err(_) => {
                        warn!(dependency = %label, "per-dependency analysis timed out");
                        on_timeout(&label, fetch_timeout)
                    }
                };
                (index, result)
            });
        }

        let deadline = tokio::time::Instant::now() + self.batch_timeout;
        loop {
            match tokio::time::timeout_at(deadline, tasks.join_next()).await {
                Ok(Some(Ok((index, result)))) => slots[index] = Some(result),
                Ok(Some(Err(join_error))) => {
                    // A cancelled or panicked task; its slot is filled
                    // below from the pending labels
                    warn!(%join_error, "batch analysis task did not complete");
                }
                Ok(None) => break,
                Err(_) => {
                    warn!("batch deadline exceeded, cancelling outstanding analyses");
                    tasks.abort_all();
                    // Keep anything that finished before the deadline
                    // but had not been joined yet
                    while let Some(joined) = tasks.try_join_next() {
                        if let Ok((index, result)) = joined {
                            slots[index] = Some(result);
                        }
                    }
                    break;
                }
            }
        }

        let batch_timeout = self.batch_timeout;
        let results: Vec<T> = slots
            .into_iter()
            .zip(labels)
            .map(|(slot, label)| slot.unwrap_or_else(|| on_timeout(&label, batch_timeout)))
            .collect();

        debug!(total = results.len(), "batch analysis complete");
        results
    }
}
