//! Per-call options for the validator facade.

use crate::rule::RuleSet;

/// Options accepted by every [`Validator`](crate::Validator) operation.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Rules to use instead of the validator's own.
    pub rules: Option<RuleSet>,
    /// Report stored errors instead of re-validating.
    pub skip_rules: bool,
    /// State scope handed to the binding.
    pub scope: Option<String>,
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn skip_rules(mut self) -> Self {
        self.skip_rules = true;
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }
}
