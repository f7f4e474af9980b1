//! Value types exchanged between callers, the orchestrator, and validators.
//!
//! Wire casing is camelCase to match the service's JSON contract; the
//! `error` field of a result is omitted entirely when absent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The outcome of a single validation, or of a whole run.
///
/// There is no partial or unknown state: a dispatch unit either passes or
/// fails, and a summary is `Success` exactly when no unit failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Success,
    Failure,
}

/// One unit of data submitted for validation.
///
/// `kind` selects which validators apply; `data` is an opaque payload
/// interpreted only by the validators themselves. Candidates are read-only
/// to the orchestrator and to every validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationCandidate {
    /// Candidate type, e.g. `"xyz"` (wire field `type`).
    #[serde(rename = "type")]
    pub kind: String,

    /// Caller-chosen identifier, echoed back on every result.
    pub id: String,

    /// Arbitrary structured payload.
    #[serde(default)]
    pub data: Map<String, Value>,
}

/// The outcome of validating one candidate against one validator.
///
/// Produced exactly once per applicable (candidate, validator) pair and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Which validator produced this result, e.g. `"example"`.
    pub validator_source: String,

    pub result: Verdict,

    /// `id` of the candidate this result refers to.
    pub candidate_id: String,

    /// Failure detail; present iff `result` is `Failure`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    /// A passing result.
    pub fn success(validator_source: impl Into<String>, candidate_id: impl Into<String>) -> Self {
        Self {
            validator_source: validator_source.into(),
            result: Verdict::Success,
            candidate_id: candidate_id.into(),
            error: None,
        }
    }

    /// A failing result carrying a descriptive error.
    pub fn failure(
        validator_source: impl Into<String>,
        candidate_id: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            validator_source: validator_source.into(),
            result: Verdict::Failure,
            candidate_id: candidate_id.into(),
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result == Verdict::Success
    }
}

/// The aggregated outcome of an entire validation run.
///
/// Each bucket preserves the order in which results arrived; arrival order
/// across concurrent units is not deterministic and callers must not rely
/// on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub result: Verdict,
    pub successes: Vec<ValidationResult>,
    pub failures: Vec<ValidationResult>,
}

impl ValidationSummary {
    /// Build a summary from classified results.
    ///
    /// The run verdict is `Success` iff `failures` is empty.
    pub fn from_results(successes: Vec<ValidationResult>, failures: Vec<ValidationResult>) -> Self {
        let result = if failures.is_empty() {
            Verdict::Success
        } else {
            Verdict::Failure
        };
        Self {
            result,
            successes,
            failures,
        }
    }
}
