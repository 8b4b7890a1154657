//! Rule tree: field leaves and conditional groups.

use std::collections::BTreeSet;
use std::sync::Arc;

use fieldcheck_codec::FieldKind;
use fieldcheck_model::{ConfigError, Message, Result, State, Value};

use crate::condition::{Condition, FieldKinds};

/// Label used when a rule does not set one.
pub const DEFAULT_LABEL: &str = "Label";

/// A named marker attached to a field.
///
/// Only presence matters; [`Predicate::Required`] is the one the engine
/// acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Required,
    Marker(String),
}

impl Predicate {
    pub fn name(&self) -> &str {
        match self {
            Self::Required => "required",
            Self::Marker(name) => name,
        }
    }
}

impl From<&str> for Predicate {
    fn from(name: &str) -> Self {
        match name {
            "required" => Self::Required,
            other => Self::Marker(other.to_string()),
        }
    }
}

/// A leaf rule describing one field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub name: String,
    pub label: Option<String>,
    pub kind: FieldKind,
    pub predicates: Vec<Predicate>,
    pub condition: Option<Condition>,
    pub default_value: Option<Value>,
    /// Producer for the failure message; resolved only when the field fails.
    pub message: Option<Message>,
}

impl FieldRule {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: None,
            kind,
            predicates: Vec::new(),
            condition: None,
            default_value: None,
            message: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn required(self) -> Self {
        self.with_predicate(Predicate::Required)
    }

    pub fn with_predicate(mut self, predicate: Predicate) -> Self {
        if !self.predicates.contains(&predicate) {
            self.predicates.push(predicate);
        }
        self
    }

    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.message = Some(message);
        self
    }

    /// Display label, falling back to [`DEFAULT_LABEL`].
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(DEFAULT_LABEL)
    }

    pub fn is_required(&self) -> bool {
        self.predicates.contains(&Predicate::Required)
    }
}

/// Children that apply together under an optional condition.
#[derive(Debug, Clone, Default)]
pub struct GroupRule {
    pub condition: Option<Condition>,
    pub children: Vec<Rule>,
}

impl GroupRule {
    pub fn new(children: Vec<Rule>) -> Self {
        Self {
            condition: None,
            children,
        }
    }

    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }
}

/// A node in the rule tree.
#[derive(Debug, Clone)]
pub enum Rule {
    Field(FieldRule),
    Group(GroupRule),
}

impl Rule {
    pub fn condition(&self) -> Option<&Condition> {
        match self {
            Self::Field(field) => field.condition.as_ref(),
            Self::Group(group) => group.condition.as_ref(),
        }
    }

    /// True when the node has no condition or its condition holds.
    pub fn applies(&self, state: &State, kinds: &FieldKinds<'_>) -> bool {
        self.condition()
            .is_none_or(|condition| condition.evaluate_in(state, kinds))
    }
}

impl From<FieldRule> for Rule {
    fn from(field: FieldRule) -> Self {
        Self::Field(field)
    }
}

impl From<GroupRule> for Rule {
    fn from(group: GroupRule) -> Self {
        Self::Group(group)
    }
}

/// An immutable, cheaply clonable rule tree.
#[derive(Debug, Clone, Default)]
pub struct RuleSet(Arc<[Rule]>);

impl RuleSet {
    /// Build a rule set, checking sibling names and codec options.
    pub fn new(rules: Vec<Rule>) -> Result<Self> {
        check_level(&rules)?;
        Ok(Self(rules.into()))
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn check_level(rules: &[Rule]) -> Result<()> {
    let mut names = BTreeSet::new();
    for rule in rules {
        match rule {
            Rule::Field(field) => {
                if !names.insert(field.name.as_str()) {
                    return Err(ConfigError::DuplicateField {
                        name: field.name.clone(),
                    });
                }
                field.kind.check()?;
            }
            Rule::Group(group) => check_level(&group.children)?,
        }
    }
    Ok(())
}
