//! Command implementations.
//!
//! Each command builds a [`Validator`] over an in-memory binding seeded from
//! the state document, runs one facade operation, and returns a report. The
//! binary decides how to print it.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use fieldcheck_engine::{
    ErrorFlags, FieldRule, MemoryBinding, RuleSet, RunOptions, State, Validator, state_from_json,
};
use serde::Serialize;
use tracing::{debug, info, info_span};

/// A rule document and a state document, both parsed.
#[derive(Debug, Clone)]
pub struct Documents {
    pub rules: RuleSet,
    pub state: State,
}

/// Read and parse the rule and state documents.
pub fn load_documents(rules: &Path, state: &Path) -> Result<Documents> {
    let text = fs::read_to_string(rules)
        .with_context(|| format!("read rule document {}", rules.display()))?;
    let rule_set = RuleSet::from_json(&text)
        .with_context(|| format!("parse rule document {}", rules.display()))?;
    let text = fs::read_to_string(state)
        .with_context(|| format!("read state document {}", state.display()))?;
    let state_map = state_from_json(&text)
        .with_context(|| format!("parse state document {}", state.display()))?;
    debug!(
        top_level_rules = rule_set.rules().len(),
        state_keys = state_map.len(),
        "loaded documents"
    );
    Ok(Documents {
        rules: rule_set,
        state: state_map,
    })
}

fn validator(documents: &Documents) -> Validator<MemoryBinding> {
    Validator::new(
        MemoryBinding::with_state(documents.state.clone()),
        documents.rules.clone(),
    )
}

fn selected<'a>(rules: Vec<&'a FieldRule>, field: Option<&str>) -> Vec<&'a FieldRule> {
    rules
        .into_iter()
        .filter(|rule| field.is_none_or(|field| rule.name == field))
        .collect()
}

fn raw_text(state: &State, name: &str) -> String {
    state.get(name).map(ToString::to_string).unwrap_or_default()
}

/// One applicable field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRow {
    pub name: String,
    pub label: String,
    pub kind: &'static str,
    pub required: bool,
    pub default_value: Option<String>,
}

pub fn run_fields(documents: &Documents, field: Option<&str>) -> Vec<FieldRow> {
    let _span = info_span!("fields").entered();
    let validator = validator(documents);
    let options = RunOptions::new();
    let rows: Vec<FieldRow> = selected(validator.applicable(&options), field)
        .into_iter()
        .map(|rule| FieldRow {
            name: rule.name.clone(),
            label: rule.label().to_string(),
            kind: rule.kind.name(),
            required: rule.is_required(),
            default_value: rule.default_value.as_ref().map(ToString::to_string),
        })
        .collect();
    info!(applicable = rows.len(), "listed fields");
    rows
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pass,
    Fail,
}

/// Validation outcome for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationRow {
    pub name: String,
    pub label: String,
    pub kind: &'static str,
    pub value: String,
    pub status: Status,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub checked: usize,
    pub failed: usize,
    pub fields: Vec<ValidationRow>,
}

impl ValidationReport {
    pub fn has_errors(&self) -> bool {
        self.failed > 0
    }
}

/// Validate with the primary flag raised, as a form submit would.
pub fn run_validate(documents: &Documents, field: Option<&str>) -> ValidationReport {
    let _span = info_span!("validate", field).entered();
    let validator = validator(documents);
    let options = RunOptions::new();
    let errors = validator.run_validation(&options, field, Some(ErrorFlags::PRIMARY));
    let fields: Vec<ValidationRow> = selected(validator.applicable(&options), field)
        .into_iter()
        .map(|rule| {
            let error = errors.get(&rule.name);
            ValidationRow {
                name: rule.name.clone(),
                label: rule.label().to_string(),
                kind: rule.kind.name(),
                value: raw_text(&documents.state, &rule.name),
                status: if error.is_some() {
                    Status::Fail
                } else {
                    Status::Pass
                },
                message: error
                    .map(|error| error.message().to_string())
                    .filter(|message| !message.is_empty()),
            }
        })
        .collect();
    let failed = fields
        .iter()
        .filter(|row| row.status == Status::Fail)
        .count();
    info!(checked = fields.len(), failed, "validation finished");
    ValidationReport {
        checked: fields.len(),
        failed,
        fields,
    }
}

/// Display text for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatRow {
    pub name: String,
    pub kind: &'static str,
    pub raw: String,
    pub display: String,
    pub changed: bool,
}

/// Format every selected field and report raw against display text.
pub fn run_format(documents: &Documents, field: Option<&str>) -> Result<Vec<FormatRow>> {
    let _span = info_span!("format", field).entered();
    let validator = validator(documents);
    let options = RunOptions::new();
    let applicable = selected(validator.applicable(&options), field);
    let display = validator
        .run_formatting(&options, field)
        .context("format fields")?;
    let rows: Vec<FormatRow> = applicable
        .into_iter()
        .map(|rule| {
            let raw = raw_text(&documents.state, &rule.name);
            let shown = display.get(&rule.name).cloned().unwrap_or_else(|| raw.clone());
            FormatRow {
                name: rule.name.clone(),
                kind: rule.kind.name(),
                changed: shown != raw,
                raw,
                display: shown,
            }
        })
        .collect();
    info!(
        formatted = rows.len(),
        changed = rows.iter().filter(|row| row.changed).count(),
        "formatting finished"
    );
    Ok(rows)
}
