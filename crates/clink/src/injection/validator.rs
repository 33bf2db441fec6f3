//! Ahead-of-time satisfiability checks for declared constructors.

use std::collections::HashSet;

use super::parameter::{DependencyKind, Parameter};
use super::repository::Repository;

/// Decides whether a declared constructor could be satisfied.
///
/// Validation never instantiates anything. It only compares the declared
/// parameters with the repository's current contents and the kinds that were
/// explicitly allowed because they are supplied later (the request).
#[derive(Debug, Clone, Default)]
pub struct Validator {
    allowed: HashSet<DependencyKind>,
}

impl Validator {
    /// Creates a validator with no allowed placeholders.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Treats `kind` as always satisfiable.
    pub fn allow(&mut self, kind: DependencyKind) -> &mut Self {
        self.allowed.insert(kind);
        self
    }

    /// Whether `kind` was explicitly allowed.
    #[must_use]
    pub fn is_allowed(&self, kind: DependencyKind) -> bool {
        self.allowed.contains(&kind)
    }

    /// Whether a single parameter could be satisfied.
    #[must_use]
    pub fn is_satisfiable(&self, parameter: &Parameter, repository: &Repository) -> bool {
        self.is_allowed(parameter.kind())
            || repository.provides(parameter.kind(), parameter.name())
            || parameter.has_default()
    }

    /// Returns every parameter that cannot be satisfied.
    ///
    /// An empty result means the constructor is valid.
    #[must_use]
    pub fn unsatisfied<'p>(
        &self,
        parameters: &'p [Parameter],
        repository: &Repository,
    ) -> Vec<&'p Parameter> {
        parameters
            .iter()
            .filter(|parameter| !self.is_satisfiable(parameter, repository))
            .collect()
    }

    /// Whether every parameter could be satisfied.
    #[must_use]
    pub fn validate(&self, parameters: &[Parameter], repository: &Repository) -> bool {
        parameters
            .iter()
            .all(|parameter| self.is_satisfiable(parameter, repository))
    }
}
