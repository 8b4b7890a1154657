//! Validation and formatting passes over a flat state.
//!
//! Both passes are pure: they read the state, consult the applicable rules,
//! and return a map. Writing results back is the facade's job.

use std::collections::BTreeMap;

use fieldcheck_model::{FieldError, FieldErrors, Result, State, Value};
use tracing::{debug, trace};

use crate::flatten::flatten;
use crate::rule::{FieldRule, Rule};

/// Field name → display text.
pub type DisplayMap = BTreeMap<String, String>;

static NULL: Value = Value::Null;

fn selected<'a>(
    state: &State,
    rules: &'a [Rule],
    field: Option<&'a str>,
) -> impl Iterator<Item = &'a FieldRule> {
    flatten(state, rules)
        .into_iter()
        .filter(move |rule| field.is_none_or(|field| rule.name == field))
}

/// Validate every applicable field, or only `field` when given.
///
/// Passing fields are absent from the result.
pub fn validate(state: &State, rules: &[Rule], field: Option<&str>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for rule in selected(state, rules, field) {
        if let Some(error) = check_field(rule, state.get(&rule.name).unwrap_or(&NULL)) {
            trace!(field = %rule.name, kind = rule.kind.name(), "field failed");
            errors.insert(rule.name.clone(), error);
        }
    }
    debug!(field, failed = errors.len(), "validation pass");
    errors
}

fn check_field(rule: &FieldRule, value: &Value) -> Option<FieldError> {
    let result = rule.kind.parse_value(value, rule.message.clone());
    let failed = !result.is_success() || (value.is_empty() && rule.is_required());
    failed.then(|| match result.error {
        Some(message) => FieldError::Message(message.resolve()),
        None => FieldError::Invalid,
    })
}

/// Render every applicable field, or only `field` when given.
///
/// When a single field is requested and its display text already equals the
/// raw text in state, the result is empty so callers skip the write-back.
pub fn format(state: &State, rules: &[Rule], field: Option<&str>) -> Result<DisplayMap> {
    let mut display = DisplayMap::new();
    for rule in selected(state, rules, field) {
        let text = rule.kind.format(state.get(&rule.name).unwrap_or(&NULL))?;
        display.insert(rule.name.clone(), text);
    }
    if let Some(field) = field
        && let Some(text) = display.get(field)
        && state.get(field).and_then(Value::as_text) == Some(text.as_str())
    {
        trace!(field, "display text unchanged");
        return Ok(DisplayMap::new());
    }
    let formatted = display.len();
    debug!(field, formatted, "format pass");
    Ok(display)
}
