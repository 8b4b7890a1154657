//! Predicates over host state that decide whether a rule applies.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use fieldcheck_codec::FieldKind;
use fieldcheck_model::{State, Value};

use crate::rule::Rule;

/// Condition gating a field or group.
///
/// Declarative variants can be written in rule documents; [`Condition::Custom`]
/// is only available in code.
#[derive(Clone)]
pub enum Condition {
    /// The field's value equals `value`.
    ///
    /// When the field has a rule both sides are parsed by its codec first, so
    /// `"yes"` and the formatted `"Yes"` compare equal for a boolean field.
    /// Otherwise, or when either side fails to parse, canonical text is compared.
    Equals { field: String, value: Value },
    /// Negation of [`Condition::Equals`].
    NotEquals { field: String, value: Value },
    /// The field holds a non-empty value.
    Present { field: String },
    /// The field is missing, null or empty text.
    Blank { field: String },
    All(Vec<Condition>),
    Any(Vec<Condition>),
    Not(Box<Condition>),
    Custom(Arc<dyn Fn(&State) -> bool + Send + Sync>),
}

impl Condition {
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn present(field: impl Into<String>) -> Self {
        Self::Present {
            field: field.into(),
        }
    }

    pub fn custom(predicate: impl Fn(&State) -> bool + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(predicate))
    }

    /// Evaluate against the current state, comparing values as text.
    pub fn evaluate(&self, state: &State) -> bool {
        self.evaluate_in(state, &FieldKinds::default())
    }

    /// Evaluate against the current state, normalizing compared values
    /// through the codecs in `kinds`.
    pub fn evaluate_in(&self, state: &State, kinds: &FieldKinds<'_>) -> bool {
        match self {
            Self::Equals { field, value } => same_value(state, kinds, field, value),
            Self::NotEquals { field, value } => !same_value(state, kinds, field, value),
            Self::Present { field } => state.get(field).is_some_and(|value| !value.is_empty()),
            Self::Blank { field } => state.get(field).is_none_or(Value::is_empty),
            Self::All(conditions) => conditions.iter().all(|c| c.evaluate_in(state, kinds)),
            Self::Any(conditions) => conditions.iter().any(|c| c.evaluate_in(state, kinds)),
            Self::Not(condition) => !condition.evaluate_in(state, kinds),
            Self::Custom(predicate) => predicate(state),
        }
    }
}

/// Field name → codec, across a whole rule tree.
///
/// Covers every field whether or not its conditions hold. When the same name
/// appears under different groups the first one in document order wins.
#[derive(Debug, Default)]
pub struct FieldKinds<'a>(BTreeMap<&'a str, &'a FieldKind>);

impl<'a> FieldKinds<'a> {
    pub fn of(rules: &'a [Rule]) -> Self {
        let mut kinds = Self::default();
        kinds.collect(rules);
        kinds
    }

    fn collect(&mut self, rules: &'a [Rule]) {
        for rule in rules {
            match rule {
                Rule::Field(field) => {
                    self.0.entry(field.name.as_str()).or_insert(&field.kind);
                }
                Rule::Group(group) => self.collect(&group.children),
            }
        }
    }

    pub fn get(&self, field: &str) -> Option<&'a FieldKind> {
        self.0.get(field).copied()
    }
}

static NULL: Value = Value::Null;

fn same_value(state: &State, kinds: &FieldKinds<'_>, field: &str, value: &Value) -> bool {
    let current = state.get(field).unwrap_or(&NULL);
    if let Some(kind) = kinds.get(field)
        && let Some(left) = normalized(kind, current)
        && let Some(right) = normalized(kind, value)
    {
        return left == right;
    }
    current.to_string() == value.to_string()
}

fn normalized(kind: &FieldKind, value: &Value) -> Option<Value> {
    if value.is_empty() {
        return Some(Value::Null);
    }
    kind.parse_value(value, None).into_value()
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equals { field, value } => f
                .debug_struct("Equals")
                .field("field", field)
                .field("value", value)
                .finish(),
            Self::NotEquals { field, value } => f
                .debug_struct("NotEquals")
                .field("field", field)
                .field("value", value)
                .finish(),
            Self::Present { field } => f.debug_struct("Present").field("field", field).finish(),
            Self::Blank { field } => f.debug_struct("Blank").field("field", field).finish(),
            Self::All(conditions) => f.debug_tuple("All").field(conditions).finish(),
            Self::Any(conditions) => f.debug_tuple("Any").field(conditions).finish(),
            Self::Not(condition) => f.debug_tuple("Not").field(condition).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
