//! # scrutineer-core
//!
//! Concurrent validation engine: a batch of candidates in, one summary out.
//!
//! This crate pairs every submitted candidate with the registered validators
//! that claim it. The pairs run concurrently and their results fold into a
//! single [`ValidationSummary`].
//!
//! ## Key Guarantees
//!
//! 1. **Complete**: the summary accounts for every applicable
//!    (candidate, validator) pair
//! 2. **Atomic**: a run that misses its deadline returns an error, never a
//!    partial summary
//! 3. **Isolated**: a validator can only fail its own result; the sole
//!    run-level fault is the timeout
//! 4. **Bounded**: fan-out is capped, so large batches cannot exhaust the
//!    runtime
//!
//! ## Example
//!
//! ```rust,ignore
//! use scrutineer_core::{Orchestrator, Verdict};
//!
//! let orchestrator = Orchestrator::with_defaults();
//! let summary = orchestrator.validate_all(&candidates).await?;
//!
//! match summary.result {
//!     Verdict::Success => println!("all {} validations passed", summary.successes.len()),
//!     Verdict::Failure => println!("{} validations failed", summary.failures.len()),
//! }
//! ```

pub mod model;
pub mod orchestrator;
pub mod registry;
pub mod validators;

// Re-export main types at crate root
pub use model::{ValidationCandidate, ValidationResult, ValidationSummary, Verdict};
pub use orchestrator::{
    Orchestrator, OrchestratorConfig, OrchestratorError, DEFAULT_MAX_CONCURRENT, DEFAULT_TIMEOUT,
};
pub use registry::ValidatorRegistry;
pub use validators::{ExampleValidator, Validator};

/// Validate a batch of candidates with the built-in validators and default
/// tuning.
///
/// This is the entry point for one-off runs. Services that validate
/// repeatedly should build an [`Orchestrator`] once and reuse it.
pub async fn validate_all(
    candidates: &[ValidationCandidate],
) -> Result<ValidationSummary, OrchestratorError> {
    Orchestrator::with_defaults().validate_all(candidates).await
}
