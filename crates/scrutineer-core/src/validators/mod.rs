//! The validator capability and the validators shipped with the engine.

use async_trait::async_trait;

use crate::model::{ValidationCandidate, ValidationResult};

pub mod example;

pub use example::ExampleValidator;

/// What every validator must implement to join the registry.
///
/// The orchestrator only ever sees this trait: it never names a concrete
/// validator type, so new variants plug in without touching dispatch logic.
///
/// # Isolation contract
/// Validator instances are shared, read-only, across concurrent dispatch
/// units. They must not hold per-run mutable state and must not block on
/// each other.
#[async_trait]
pub trait Validator: Send + Sync {
    /// Whether this validator should run against the given candidate.
    ///
    /// Pure and cheap: no I/O, typically a membership test on
    /// `candidate.kind`.
    fn applies(&self, candidate: &ValidationCandidate) -> bool;

    /// Validate the candidate and produce exactly one result.
    ///
    /// May be arbitrarily expensive. Must never panic or propagate a fault:
    /// any internal problem (including a defective validator configuration)
    /// is reported as a `Failure` result with a descriptive `error`.
    async fn validate(&self, candidate: &ValidationCandidate) -> ValidationResult;
}
