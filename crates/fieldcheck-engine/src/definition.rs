//! Rule documents.
//!
//! A rule document is a JSON array of nodes. Field nodes carry `kind` and the
//! codec's option keys side by side; group nodes carry `children`:
//!
//! ```json
//! [
//!   {"name": "age", "label": "Age", "kind": "integer", "minValue": 18,
//!    "predicates": ["required"], "message": "Adults only"},
//!   {"when": {"equals": {"field": "married", "value": "yes"}},
//!    "children": [{"name": "spouse", "kind": "boolean"}]}
//! ]
//! ```

use std::collections::BTreeMap;

use fieldcheck_codec::FieldKind;
use fieldcheck_model::{ConfigError, Message, Result, State, Value};
use serde::Deserialize;
use serde_json::Map;

use crate::condition::Condition;
use crate::rule::{FieldRule, GroupRule, Predicate, Rule, RuleSet};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RuleDef {
    name: Option<String>,
    label: Option<String>,
    kind: Option<String>,
    #[serde(default)]
    predicates: Vec<String>,
    when: Option<ConditionDef>,
    default_value: Option<serde_json::Value>,
    message: Option<String>,
    children: Option<Vec<RuleDef>>,
    /// Codec option keys, handed to [`FieldKind`] together with `kind`.
    #[serde(flatten)]
    options: Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
enum ConditionDef {
    Equals { field: String, value: serde_json::Value },
    NotEquals { field: String, value: serde_json::Value },
    Present { field: String },
    Blank { field: String },
    All(Vec<ConditionDef>),
    Any(Vec<ConditionDef>),
    Not(Box<ConditionDef>),
}

impl From<ConditionDef> for Condition {
    fn from(def: ConditionDef) -> Self {
        match def {
            ConditionDef::Equals { field, value } => Self::Equals {
                field,
                value: value_from_json(&value),
            },
            ConditionDef::NotEquals { field, value } => Self::NotEquals {
                field,
                value: value_from_json(&value),
            },
            ConditionDef::Present { field } => Self::Present { field },
            ConditionDef::Blank { field } => Self::Blank { field },
            ConditionDef::All(defs) => Self::All(defs.into_iter().map(Self::from).collect()),
            ConditionDef::Any(defs) => Self::Any(defs.into_iter().map(Self::from).collect()),
            ConditionDef::Not(def) => Self::Not(Box::new(Self::from(*def))),
        }
    }
}

impl RuleDef {
    fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| "<group>".to_string())
    }

    fn into_rule(self) -> Result<Rule> {
        let is_group = self.children.is_some();
        let is_field = self.kind.is_some();
        if is_group == is_field {
            return Err(ConfigError::MixedRuleNode {
                name: self.display_name(),
            });
        }
        let condition = self.when.map(Condition::from);

        let Some(kind) = self.kind else {
            let has_field_keys = self.name.is_some()
                || self.label.is_some()
                || !self.predicates.is_empty()
                || self.default_value.is_some()
                || self.message.is_some()
                || !self.options.is_empty();
            if has_field_keys {
                return Err(ConfigError::MixedRuleNode {
                    name: self.name.unwrap_or_else(|| "<group>".to_string()),
                });
            }
            let children = self
                .children
                .unwrap_or_default()
                .into_iter()
                .map(RuleDef::into_rule)
                .collect::<Result<Vec<_>>>()?;
            return Ok(Rule::Group(GroupRule {
                condition,
                children,
            }));
        };

        let Some(name) = self.name else {
            return Err(ConfigError::UnnamedField { kind });
        };
        if let Some(serde_json::Value::String(variant)) = self.options.get("format") {
            FieldKind::check_format(&kind, variant)?;
        }
        let mut options = self.options;
        options.insert("kind".to_string(), serde_json::Value::String(kind));
        let kind: FieldKind = serde_json::from_value(serde_json::Value::Object(options))?;

        Ok(Rule::Field(FieldRule {
            name,
            label: self.label,
            kind,
            predicates: self
                .predicates
                .iter()
                .map(|name| Predicate::from(name.as_str()))
                .collect(),
            condition,
            default_value: self.default_value.as_ref().map(value_from_json),
            message: self.message.map(Message::text),
        }))
    }
}

impl RuleSet {
    /// Load a rule set from a JSON rule document.
    pub fn from_json(text: &str) -> Result<Self> {
        let defs: Vec<RuleDef> = serde_json::from_str(text)?;
        let rules = defs
            .into_iter()
            .map(RuleDef::into_rule)
            .collect::<Result<Vec<_>>>()?;
        Self::new(rules)
    }
}

/// Convert a JSON value into a raw state value.
///
/// Strings and numbers become text, as if typed by a user; booleans stay
/// typed; arrays and objects keep their JSON text.
pub fn value_from_json(value: &serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(flag) => Value::Boolean(*flag),
        serde_json::Value::Number(number) => Value::Text(number.to_string()),
        serde_json::Value::String(text) => Value::Text(text.clone()),
        other => Value::Text(other.to_string()),
    }
}

/// Load host state from a JSON object document.
pub fn state_from_json(text: &str) -> Result<State> {
    let object: BTreeMap<String, serde_json::Value> = serde_json::from_str(text)?;
    Ok(object
        .iter()
        .map(|(key, value)| (key.clone(), value_from_json(value)))
        .collect())
}
