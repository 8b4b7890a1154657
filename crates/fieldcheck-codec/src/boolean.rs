//! Boolean codec.

use fieldcheck_model::{ConfigError, Message, NO_VALUE, Result, Value};

use crate::options::{BooleanFormat, BooleanOptions};
use crate::outcome::ParseResult;

/// Read one of the recognized spellings, ignoring case.
fn read(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "1" | "y" | "true" | "yes" | "on" => Some(true),
        "0" | "n" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub(crate) fn parse(text: &str, error: Option<Message>) -> ParseResult {
    if text.is_empty() {
        return ParseResult::ok(Value::text(text), error);
    }
    match read(text) {
        Some(value) => ParseResult::ok(Value::Boolean(value), error),
        None => ParseResult::failed(text, error),
    }
}

fn coerce(value: &Value) -> Option<bool> {
    match value {
        Value::Boolean(value) => Some(*value),
        Value::Integer(value) => Some(*value != 0),
        Value::Text(text) => read(text.trim())
            .or_else(|| text.trim().parse::<i64>().ok().map(|value| value != 0)),
        _ => None,
    }
}

pub(crate) fn check(options: &BooleanOptions) -> Result<()> {
    if options.format == Some(BooleanFormat::Values) {
        let found = options.values.as_ref().map_or(0, Vec::len);
        if found != 2 {
            return Err(ConfigError::InvalidBooleanValues { found });
        }
    }
    Ok(())
}

pub(crate) fn format(value: &Value, options: &BooleanOptions) -> Result<String> {
    check(options)?;
    let Some(value) = coerce(value) else {
        return Ok(NO_VALUE.to_string());
    };
    let (when_true, when_false) = match options.format {
        Some(BooleanFormat::TrueFalse) => ("True", "False"),
        Some(BooleanFormat::Values) => match options.values.as_deref() {
            Some([when_true, when_false]) => (when_true.as_str(), when_false.as_str()),
            _ => {
                return Err(ConfigError::InvalidBooleanValues {
                    found: options.values.as_ref().map_or(0, Vec::len),
                });
            }
        },
        Some(BooleanFormat::YesNo) | None => ("Yes", "No"),
    };
    Ok(if value { when_true } else { when_false }.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_spellings() {
        for text in ["1", "y", "TRUE", "Yes", "on"] {
            assert_eq!(parse(text, None).into_value(), Some(Value::Boolean(true)), "{text}");
        }
        for text in ["0", "N", "false", "no", "OFF"] {
            assert_eq!(parse(text, None).into_value(), Some(Value::Boolean(false)), "{text}");
        }
    }

    #[test]
    fn unknown_text_fails_and_echoes() {
        let result = parse("maybe", None);
        assert!(!result.is_success());
        assert_eq!(result.value(), Value::text("maybe"));
    }

    #[test]
    fn values_variant_needs_two_entries() {
        let options = BooleanOptions {
            format: Some(BooleanFormat::Values),
            values: Some(vec!["A".into()]),
        };
        assert!(matches!(
            format(&Value::Boolean(true), &options),
            Err(ConfigError::InvalidBooleanValues { found: 1 })
        ));
        let options = BooleanOptions::default().with_values("On", "Off");
        assert_eq!(format(&Value::Boolean(false), &options).unwrap(), "Off");
    }
}
