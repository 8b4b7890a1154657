//! Validator facade over a host binding.

use std::collections::BTreeSet;

use fieldcheck_model::{
    ErrorFlags, ErrorState, FieldErrors, NO_VALUE, Result, State, Value,
};
use tracing::{debug, info};

use crate::binding::Binding;
use crate::execute::{self, DisplayMap};
use crate::flatten::{find, flatten};
use crate::options::RunOptions;
use crate::rule::{DEFAULT_LABEL, FieldRule, Rule, RuleSet};

/// Runs rules against one host.
///
/// Holds no state of its own beyond the rule set: every call reads the
/// host through the binding and writes results back through it.
#[derive(Debug)]
pub struct Validator<B> {
    binding: B,
    rules: RuleSet,
}

impl<B: Binding> Validator<B> {
    pub fn new(binding: B, rules: RuleSet) -> Self {
        Self { binding, rules }
    }

    pub fn binding(&self) -> &B {
        &self.binding
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn set_rules(&mut self, rules: RuleSet) {
        self.rules = rules;
    }

    fn rules_for<'a>(&'a self, options: &'a RunOptions) -> &'a [Rule] {
        options.rules.as_ref().unwrap_or(&self.rules).rules()
    }

    fn rule_for<'a>(&'a self, field: &str, options: &'a RunOptions) -> Option<&'a FieldRule> {
        let state = self.binding.state(options);
        find(&state, self.rules_for(options), field)
    }

    /// Field rules applicable to the current state, in document order.
    pub fn applicable<'a>(&'a self, options: &'a RunOptions) -> Vec<&'a FieldRule> {
        let state = self.binding.state(options);
        flatten(&state, self.rules_for(options))
    }

    /// Clear the flag word and all field errors.
    pub fn reset(&self) {
        self.binding.set_errors(ErrorState::new());
    }

    /// Whether the host currently has surfaced errors.
    ///
    /// Unless `skip_rules` is set this re-validates first with the primary
    /// bit raised, keeping any other bits.
    pub fn has_errors(&self, options: &RunOptions) -> bool {
        if !options.skip_rules {
            let preserved = self.binding.errors().flags;
            let flags = ErrorFlags::from_bits(preserved.bits() | ErrorFlags::PRIMARY.bits());
            self.run_validation(options, None, Some(flags));
        }
        self.binding.errors().has_errors()
    }

    /// Validate and store the result.
    ///
    /// An explicit `flag` replaces the stored flag word; otherwise it is kept.
    /// A single-field run only replaces that field's entry. With `skip_rules`
    /// the stored errors are returned untouched.
    pub fn run_validation(
        &self,
        options: &RunOptions,
        field: Option<&str>,
        flag: Option<ErrorFlags>,
    ) -> FieldErrors {
        let stored = self.binding.errors();
        if options.skip_rules {
            return stored.fields;
        }
        let state = self.binding.state(options);
        let found = execute::validate(&state, self.rules_for(options), field);
        let fields = match field {
            Some(name) => {
                let mut fields = stored.fields;
                fields.remove(name);
                fields.extend(found);
                fields
            }
            None => found,
        };
        let flags = flag.unwrap_or(stored.flags);
        debug!(field, flags = flags.bits(), errors = fields.len(), "stored validation result");
        self.binding.set_errors(ErrorState {
            flags,
            fields: fields.clone(),
        });
        fields
    }

    /// Format and write the display text back into host state.
    pub fn run_formatting(&self, options: &RunOptions, field: Option<&str>) -> Result<DisplayMap> {
        let state = self.binding.state(options);
        let display = execute::format(&state, self.rules_for(options), field)?;
        if !display.is_empty() {
            let values: State = display
                .iter()
                .map(|(name, text)| (name.clone(), Value::text(text.as_str())))
                .collect();
            self.binding.set_state(options, values);
        }
        Ok(display)
    }

    /// Blank every state key not covered by a current rule or listed in `except`.
    pub fn reduce_state(&self, options: &RunOptions, except: &[&str]) -> State {
        let mut state = self.binding.state(options);
        let covered: BTreeSet<&str> = flatten(&state, self.rules_for(options))
            .into_iter()
            .map(|rule| rule.name.as_str())
            .collect();
        let mut blanked = 0_usize;
        for (key, value) in &mut state {
            if !covered.contains(key.as_str()) && !except.contains(&key.as_str()) {
                *value = Value::text(NO_VALUE);
                blanked += 1;
            }
        }
        info!(blanked, "reduced state");
        self.binding.set_state(options, state.clone());
        state
    }

    pub fn label_for(&self, field: &str, options: &RunOptions) -> String {
        self.rule_for(field, options)
            .map_or(DEFAULT_LABEL, FieldRule::label)
            .to_string()
    }

    /// State value, else the rule's default, else empty text.
    pub fn value_for(&self, field: &str, options: &RunOptions) -> Value {
        match self.binding.state(options).remove(field) {
            Some(value) if value != Value::Null => value,
            _ => self
                .rule_for(field, options)
                .and_then(|rule| rule.default_value.clone())
                .unwrap_or_else(|| Value::text(NO_VALUE)),
        }
    }

    pub fn required_for(&self, field: &str, options: &RunOptions) -> bool {
        self.rule_for(field, options)
            .is_some_and(FieldRule::is_required)
    }

    /// The field's error text, visible only while the primary bit is set.
    pub fn error_for(&self, field: &str) -> Option<String> {
        let errors = self.binding.errors();
        errors.flags.is_primary().then(|| {
            errors
                .field(field)
                .map(|error| error.message().to_string())
                .unwrap_or_default()
        })
    }

    /// Display text for one field, `None` when it is already formatted.
    pub fn format_for(&self, field: &str, options: &RunOptions) -> Result<Option<String>> {
        let state = self.binding.state(options);
        let mut display = execute::format(&state, self.rules_for(options), Some(field))?;
        Ok(display.remove(field))
    }

    /// Callback that reformats `field` in place, for blur handlers.
    pub fn on_blur_for<'a>(
        &'a self,
        field: &'a str,
        options: &'a RunOptions,
    ) -> impl Fn() -> Result<DisplayMap> + 'a {
        move || self.run_formatting(options, Some(field))
    }

    pub fn has_error_flag(&self, bit: u8) -> Result<bool> {
        self.binding.errors().flags.contains(bit)
    }

    pub fn set_error_flag(&self, bit: u8) -> Result<()> {
        let mut errors = self.binding.errors();
        errors.flags = errors.flags.with(bit)?;
        self.binding.set_errors(errors);
        Ok(())
    }

    pub fn clear_error_flag(&self, bit: u8) -> Result<()> {
        let mut errors = self.binding.errors();
        errors.flags = errors.flags.without(bit)?;
        self.binding.set_errors(errors);
        Ok(())
    }
}
