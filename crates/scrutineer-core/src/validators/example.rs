//! The reference validator: JSON Schema evaluation of candidate payloads.
//!
//! This variant is the template for future validators: it claims a fixed
//! set of candidate kinds and checks `candidate.data` against an immutable
//! schema. The orchestrator only ever sees it through the [`Validator`]
//! trait.

use std::collections::HashSet;
use std::sync::OnceLock;

use async_trait::async_trait;
use serde_json::Value;

use crate::model::{ValidationCandidate, ValidationResult};

use super::Validator;

/// Schema shipped with the crate (loaded at compile time).
const EXAMPLE_SCHEMA_JSON: &str = include_str!("example.schema.json");

/// Source string stamped on every result this validator produces.
const EXAMPLE_SOURCE: &str = "example";

/// A simple JSON Schema validator.
pub struct ExampleValidator {
    source: String,
    target_kinds: HashSet<String>,
    schema: Value,
    /// Compiled schema (initialized on first use, reused afterwards).
    compiled: OnceLock<Result<jsonschema::Validator, String>>,
}

impl ExampleValidator {
    /// The validator as registered by default: the embedded mission schema,
    /// claiming candidate kinds `abc` and `xyz`.
    pub fn new() -> Self {
        let schema = serde_json::from_str(EXAMPLE_SCHEMA_JSON)
            .expect("embedded example schema is valid JSON");
        Self::with_schema(schema, ["abc", "xyz"])
    }

    /// A variant holding an arbitrary schema and claim set.
    ///
    /// The schema is compiled on first validation, so a defective definition
    /// surfaces as a `Failure` result on the candidate being validated, not
    /// as a construction error.
    pub fn with_schema<I, S>(schema: Value, target_kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            source: EXAMPLE_SOURCE.to_string(),
            target_kinds: target_kinds.into_iter().map(Into::into).collect(),
            schema,
            compiled: OnceLock::new(),
        }
    }

    /// Get or initialize the compiled schema.
    fn compiled(&self) -> Result<&jsonschema::Validator, String> {
        let result = self
            .compiled
            .get_or_init(|| jsonschema::options().build(&self.schema).map_err(|e| e.to_string()));

        match result {
            Ok(validator) => Ok(validator),
            Err(error) => Err(error.clone()),
        }
    }
}

impl Default for ExampleValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Validator for ExampleValidator {
    fn applies(&self, candidate: &ValidationCandidate) -> bool {
        self.target_kinds.contains(&candidate.kind)
    }

    async fn validate(&self, candidate: &ValidationCandidate) -> ValidationResult {
        let validator = match self.compiled() {
            Ok(validator) => validator,
            Err(error) => {
                return ValidationResult::failure(&self.source, &candidate.id, error);
            }
        };

        let instance = Value::Object(candidate.data.clone());
        let violations: Vec<String> = validator
            .iter_errors(&instance)
            .map(|error| format_violation(&error))
            .collect();

        if violations.is_empty() {
            ValidationResult::success(&self.source, &candidate.id)
        } else {
            ValidationResult::failure(&self.source, &candidate.id, violations.join("; "))
        }
    }
}

/// Render one schema violation as `<instance-path>: <message>`.
///
/// Violations at the document root have an empty path and are rendered as
/// the bare message.
fn format_violation(error: &jsonschema::ValidationError<'_>) -> String {
    let path = error.instance_path.to_string();
    if path.is_empty() {
        error.to_string()
    } else {
        format!("{path}: {error}")
    }
}
