//! Parse results shared by every codec.

use fieldcheck_model::{Message, Value};

/// Whether a parse produced a value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// Parsed value. Empty input parses to itself.
    Ok(Value),
    /// Parse failed; carries the original input so the UI can keep showing it.
    Failed(String),
}

/// Outcome of a codec parse plus the caller's message producer.
///
/// The producer is passed through unchanged and never invoked by the codec.
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub outcome: ParseOutcome,
    pub error: Option<Message>,
}

impl ParseResult {
    pub fn ok(value: Value, error: Option<Message>) -> Self {
        Self {
            outcome: ParseOutcome::Ok(value),
            error,
        }
    }

    pub fn failed(text: impl Into<String>, error: Option<Message>) -> Self {
        Self {
            outcome: ParseOutcome::Failed(text.into()),
            error,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ParseOutcome::Ok(_))
    }

    /// The parsed value, or the echoed input as text on failure.
    pub fn value(&self) -> Value {
        match &self.outcome {
            ParseOutcome::Ok(value) => value.clone(),
            ParseOutcome::Failed(text) => Value::Text(text.clone()),
        }
    }

    /// The parsed value when the parse succeeded.
    pub fn into_value(self) -> Option<Value> {
        match self.outcome {
            ParseOutcome::Ok(value) => Some(value),
            ParseOutcome::Failed(_) => None,
        }
    }
}
