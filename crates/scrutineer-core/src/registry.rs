//! Validator registration.
//!
//! The registry is the seam for adding new validators without touching the
//! orchestrator: register the validators a deployment wants and hand the
//! registry to [`Orchestrator::new`](crate::Orchestrator::new).

use std::sync::Arc;

use crate::validators::{ExampleValidator, Validator};

/// The set of validators a run draws from.
///
/// Cloning is cheap; the registry shares the registered validators.
#[derive(Default, Clone)]
pub struct ValidatorRegistry {
    validators: Vec<Arc<dyn Validator>>,
}

impl ValidatorRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a validator.
    ///
    /// Registration order is preserved; within a single candidate, validators
    /// are dispatched in this order.
    pub fn register(&mut self, validator: Arc<dyn Validator>) {
        self.validators.push(validator);
    }

    /// Create a registry with all built-in validators registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(ExampleValidator::new()));
        registry
    }

    /// The registered validators, in registration order.
    pub fn validators(&self) -> &[Arc<dyn Validator>] {
        &self.validators
    }

    /// Number of registered validators.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Whether the registry has no validators.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl std::fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("validators", &self.validators.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ValidationCandidate, ValidationResult};
    use async_trait::async_trait;

    // Minimal validator claiming a single kind.
    struct KindValidator {
        kind: &'static str,
    }

    #[async_trait]
    impl Validator for KindValidator {
        fn applies(&self, candidate: &ValidationCandidate) -> bool {
            candidate.kind == self.kind
        }

        async fn validate(&self, candidate: &ValidationCandidate) -> ValidationResult {
            ValidationResult::success(self.kind, &candidate.id)
        }
    }

    fn candidate(kind: &str) -> ValidationCandidate {
        ValidationCandidate {
            kind: kind.to_string(),
            id: "1".to_string(),
            data: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry = ValidatorRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.validators().is_empty());
    }

    #[test]
    fn test_register_preserves_order() {
        let mut registry = ValidatorRegistry::new();
        registry.register(Arc::new(KindValidator { kind: "abc" }));
        registry.register(Arc::new(KindValidator { kind: "xyz" }));

        assert_eq!(registry.len(), 2);
        assert!(registry.validators()[0].applies(&candidate("abc")));
        assert!(registry.validators()[1].applies(&candidate("xyz")));
    }

    #[test]
    fn test_with_defaults_registers_the_example_validator() {
        let registry = ValidatorRegistry::with_defaults();
        assert_eq!(registry.len(), 1);
        assert!(registry.validators()[0].applies(&candidate("xyz")));
        assert!(!registry.validators()[0].applies(&candidate("def")));
    }

    #[test]
    fn test_clone_shares_validators() {
        let mut registry = ValidatorRegistry::with_defaults();
        let clone = registry.clone();
        registry.register(Arc::new(KindValidator { kind: "def" }));

        assert_eq!(registry.len(), 2);
        assert_eq!(clone.len(), 1);
    }
}
