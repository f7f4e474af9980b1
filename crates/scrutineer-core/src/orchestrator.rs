//! Concurrent validation runs.
//!
//! The orchestrator owns a [`ValidatorRegistry`] and drives whole batches of
//! candidates through it. It implements:
//! - Fan-out: one task per applicable (candidate, validator) pair, capped by
//!   a concurrency limit
//! - Fan-in: a shared channel collects results until every pair has reported
//! - Deadline: a run that outlives its timeout faults as a whole, with no
//!   partial summary

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use crate::model::{ValidationCandidate, ValidationResult, ValidationSummary};
use crate::registry::ValidatorRegistry;
use crate::validators::Validator;

/// Default wall-clock bound on a validation run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Default cap on validations in flight within a run.
pub const DEFAULT_MAX_CONCURRENT: usize = 64;

/// Errors from a validation run.
///
/// The only way a run fails is by outrunning its deadline; everything a
/// validator reports, including its own internal errors, lands in the
/// summary as a `Failure` result instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrchestratorError {
    #[error(
        "validation exceeded timeout after {timeout:?}: received {received} of {expected} results"
    )]
    Timeout {
        timeout: Duration,
        received: usize,
        expected: usize,
    },
}

/// Tuning for validation runs.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Wall-clock bound on an entire run.
    pub timeout: Duration,

    /// Cap on validations in flight at once. Values below 1 act as 1.
    pub max_concurrent: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }
}

/// The orchestrator fans candidate batches out across registered validators.
///
/// # Architecture
/// - Pairing: each candidate is offered to every registered validator and
///   paired with the ones that claim it
/// - Parallel fan-out: pairs run as independent tasks behind a semaphore
/// - Fan-in: results stream into one channel and are bucketed by verdict
/// - Atomic outcome: the caller gets a complete summary or a timeout error,
///   never both
pub struct Orchestrator {
    registry: ValidatorRegistry,
    config: OrchestratorConfig,
}

impl Orchestrator {
    /// Create an orchestrator over the given registry.
    pub fn new(registry: ValidatorRegistry, config: OrchestratorConfig) -> Self {
        Self { registry, config }
    }

    /// An orchestrator with the built-in validators and default tuning.
    pub fn with_defaults() -> Self {
        Self::new(ValidatorRegistry::with_defaults(), OrchestratorConfig::default())
    }

    /// Validate a batch of candidates against every applicable validator.
    ///
    /// # Execution Flow
    /// 1. Pair each candidate with the validators that claim it
    /// 2. An empty pairing returns an empty `Success` summary immediately
    /// 3. Spawn one task per pair; the semaphore bounds how many validate
    ///    at once, the deadline is already ticking while tasks queue
    /// 4. Collect results until every pair reported, bucketing by verdict
    /// 5. On deadline expiry, abort whatever is still in flight and return
    ///    [`OrchestratorError::Timeout`] with the collection progress
    ///
    /// Candidates no validator claims contribute nothing to the summary.
    pub async fn validate_all(
        &self,
        candidates: &[ValidationCandidate],
    ) -> Result<ValidationSummary, OrchestratorError> {
        let units = self.applicable_units(candidates);
        let expected = units.len();
        if expected == 0 {
            return Ok(ValidationSummary::from_results(Vec::new(), Vec::new()));
        }

        tracing::debug!(
            candidates = candidates.len(),
            expected,
            "starting validation run"
        );

        let limiter = Arc::new(Semaphore::new(self.config.max_concurrent.max(1)));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let deadline = Instant::now() + self.config.timeout;

        let handles: Vec<JoinHandle<()>> = units
            .into_iter()
            .map(|(candidate, validator)| {
                let limiter = Arc::clone(&limiter);
                let tx = tx.clone();
                tokio::spawn(async move {
                    // The limiter is never closed.
                    let Ok(_permit) = limiter.acquire_owned().await else {
                        return;
                    };
                    let result = validator.validate(&candidate).await;
                    let _ = tx.send(result);
                })
            })
            .collect();
        drop(tx);

        let mut successes = Vec::new();
        let mut failures = Vec::new();

        while successes.len() + failures.len() < expected {
            match time::timeout_at(deadline, rx.recv()).await {
                Ok(Some(result)) => {
                    if result.is_success() {
                        successes.push(result);
                    } else {
                        failures.push(result);
                    }
                }
                Ok(None) => {
                    // Every sender is gone yet results are missing, so a
                    // validation died without reporting. The run holds to
                    // its deadline and faults like any other overrun.
                    let received = successes.len() + failures.len();
                    tracing::warn!(
                        received,
                        expected,
                        "validation ended without reporting every result"
                    );
                    time::sleep_until(deadline).await;
                    return Err(self.timeout_error(received, expected));
                }
                Err(_) => {
                    for handle in &handles {
                        handle.abort();
                    }
                    let received = successes.len() + failures.len();
                    tracing::warn!(
                        received,
                        expected,
                        timeout = ?self.config.timeout,
                        "validation run timed out"
                    );
                    return Err(self.timeout_error(received, expected));
                }
            }
        }

        tracing::debug!(
            successes = successes.len(),
            failures = failures.len(),
            "validation run complete"
        );

        Ok(ValidationSummary::from_results(successes, failures))
    }

    /// Pair candidates with the validators claiming them, in candidate order
    /// and registration order within each candidate.
    fn applicable_units(
        &self,
        candidates: &[ValidationCandidate],
    ) -> Vec<(Arc<ValidationCandidate>, Arc<dyn Validator>)> {
        let mut units = Vec::new();
        for candidate in candidates {
            let candidate = Arc::new(candidate.clone());
            for validator in self.registry.validators() {
                if validator.applies(&candidate) {
                    units.push((Arc::clone(&candidate), Arc::clone(validator)));
                }
            }
        }
        units
    }

    fn timeout_error(&self, received: usize, expected: usize) -> OrchestratorError {
        OrchestratorError::Timeout {
            timeout: self.config.timeout,
            received,
            expected,
        }
    }
}
