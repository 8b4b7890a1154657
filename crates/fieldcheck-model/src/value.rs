//! Field values flowing between host state and the codecs.
//!
//! Raw user input lives in state as [`Value::Text`]; every other variant is the
//! typed result of a successful parse. Each typed variant renders to a canonical
//! text form that its own codec accepts back.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

/// Display text produced when a field has no value.
pub const NO_VALUE: &str = "";

/// Flat field name → value map owned by the host.
pub type State = BTreeMap<String, Value>;

/// A field value, raw or parsed.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value at all.
    #[default]
    Null,
    /// Raw text as typed by the user (or written back by formatting).
    Text(String),
    Boolean(bool),
    Integer(i64),
    Decimal(Decimal),
    Real(f64),
    Money(Decimal),
    /// Fraction of one: `0.12` is twelve percent.
    Percent(f64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    /// Month and day anchored to the reference year.
    MonthDay(NaiveDate),
    Time(NaiveTime),
}

impl Value {
    /// Build a text value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// True for `Null` and for empty text.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(text) => text.is_empty(),
            _ => false,
        }
    }

    /// Borrow the raw text when this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Short name of the variant, used in logs and CLI output.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Text(_) => "text",
            Self::Boolean(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Decimal(_) => "decimal",
            Self::Real(_) => "real",
            Self::Money(_) => "money",
            Self::Percent(_) => "percent",
            Self::Date(_) => "date",
            Self::DateTime(_) => "dateTime",
            Self::MonthDay(_) => "monthAndDay",
            Self::Time(_) => "time",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str(NO_VALUE),
            Self::Text(text) => f.write_str(text),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Decimal(value) | Self::Money(value) => write!(f, "{value}"),
            Self::Real(value) => write!(f, "{value}"),
            Self::Percent(value) => write!(f, "{}%", scale_percent(*value)),
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Self::MonthDay(date) => write!(f, "{}", date.format("%m/%d")),
            Self::Time(time) => write!(f, "{}", time.format("%H:%M:%S")),
        }
    }
}

/// Multiply a fraction by 100 in decimal space so `0.12` prints as `12`.
fn scale_percent(value: f64) -> String {
    Decimal::from_str(&value.to_string())
        .ok()
        .and_then(|fraction| fraction.checked_mul(Decimal::ONE_HUNDRED))
        .map_or_else(
            || (value * 100.0).to_string(),
            |scaled| scaled.normalize().to_string(),
        )
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
