//! The codec registry.
//!
//! [`FieldKind`] names a codec together with its typed options. It is the
//! only entry point the rule engine uses.

use fieldcheck_model::{Message, Result, Value};
use serde::Deserialize;
use tracing::trace;

use crate::options::{
    BooleanFormat, BooleanOptions, DateFormat, DateOptions, DateTimeFormat, DateTimeOptions,
    DecimalOptions, IntegerFormat, IntegerOptions, MoneyFormat, MoneyOptions, MonthDayFormat,
    MonthDayOptions, NumberFormat, PercentFormat, PercentOptions, RealOptions, TimeFormat,
    TimeOptions, require_pattern,
};
use crate::outcome::ParseResult;
use crate::{boolean, number, temporal};

/// A codec and its options.
///
/// Rule documents spell it as a `kind` tag with the option keys beside it:
/// `{"kind": "integer", "format": "byte", "maxValue": 1024}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldKind {
    Boolean(BooleanOptions),
    Integer(IntegerOptions),
    Decimal(DecimalOptions),
    Real(RealOptions),
    Money(MoneyOptions),
    Percent(PercentOptions),
    Date(DateOptions),
    DateTime(DateTimeOptions),
    #[serde(rename = "monthAndDay")]
    MonthAndDay(MonthDayOptions),
    Time(TimeOptions),
}

impl FieldKind {
    pub fn boolean() -> Self {
        Self::Boolean(BooleanOptions::default())
    }

    pub fn integer() -> Self {
        Self::Integer(IntegerOptions::default())
    }

    pub fn decimal() -> Self {
        Self::Decimal(DecimalOptions::default())
    }

    pub fn real() -> Self {
        Self::Real(RealOptions::default())
    }

    pub fn money() -> Self {
        Self::Money(MoneyOptions::default())
    }

    pub fn percent() -> Self {
        Self::Percent(PercentOptions::default())
    }

    pub fn date() -> Self {
        Self::Date(DateOptions::default())
    }

    pub fn date_time() -> Self {
        Self::DateTime(DateTimeOptions::default())
    }

    pub fn month_and_day() -> Self {
        Self::MonthAndDay(MonthDayOptions::default())
    }

    pub fn time() -> Self {
        Self::Time(TimeOptions::default())
    }

    /// Codec name as written in rule documents.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Decimal(_) => "decimal",
            Self::Real(_) => "real",
            Self::Money(_) => "money",
            Self::Percent(_) => "percent",
            Self::Date(_) => "date",
            Self::DateTime(_) => "dateTime",
            Self::MonthAndDay(_) => "monthAndDay",
            Self::Time(_) => "time",
        }
    }

    /// Check a `format` variant name against the codec named `kind`.
    ///
    /// Lets document loaders report [`ConfigError::UnknownFormat`] directly.
    /// An unknown codec name passes here and is rejected when `kind` itself
    /// is deserialized.
    ///
    /// [`ConfigError::UnknownFormat`]: fieldcheck_model::ConfigError::UnknownFormat
    pub fn check_format(kind: &str, variant: &str) -> Result<()> {
        match kind {
            "boolean" => variant.parse::<BooleanFormat>().map(drop),
            "integer" => variant.parse::<IntegerFormat>().map(drop),
            "decimal" | "real" => variant.parse::<NumberFormat>().map(drop),
            "money" => variant.parse::<MoneyFormat>().map(drop),
            "percent" => variant.parse::<PercentFormat>().map(drop),
            "date" => variant.parse::<DateFormat>().map(drop),
            "dateTime" => variant.parse::<DateTimeFormat>().map(drop),
            "monthAndDay" => variant.parse::<MonthDayFormat>().map(drop),
            "time" => variant.parse::<TimeFormat>().map(drop),
            _ => Ok(()),
        }
    }

    /// Validate option combinations that serde cannot express.
    ///
    /// Called when rules are built so that a bad `pattern`/`values` setup
    /// fails once at load time rather than on the first format.
    pub fn check(&self) -> Result<()> {
        let (selected, pattern, codec) = match self {
            Self::Boolean(options) => return boolean::check(options),
            Self::Integer(options) => (
                options.format == Some(IntegerFormat::Pattern),
                options.pattern.as_deref(),
                IntegerFormat::CODEC,
            ),
            Self::Decimal(options) => (
                options.format == Some(NumberFormat::Pattern),
                options.pattern.as_deref(),
                NumberFormat::CODEC,
            ),
            Self::Real(options) => (
                options.format == Some(NumberFormat::Pattern),
                options.pattern.as_deref(),
                NumberFormat::CODEC,
            ),
            Self::Money(options) => (
                options.format == Some(MoneyFormat::Pattern),
                options.pattern.as_deref(),
                MoneyFormat::CODEC,
            ),
            Self::Percent(options) => (
                options.format == Some(PercentFormat::Pattern),
                options.pattern.as_deref(),
                PercentFormat::CODEC,
            ),
            Self::Date(options) => (
                options.format == Some(DateFormat::Pattern),
                options.pattern.as_deref(),
                DateFormat::CODEC,
            ),
            Self::DateTime(options) => (
                options.format == Some(DateTimeFormat::Pattern),
                options.pattern.as_deref(),
                DateTimeFormat::CODEC,
            ),
            Self::MonthAndDay(options) => (
                options.format == Some(MonthDayFormat::Pattern),
                options.pattern.as_deref(),
                MonthDayFormat::CODEC,
            ),
            Self::Time(options) => (
                options.format == Some(TimeFormat::Pattern),
                options.pattern.as_deref(),
                TimeFormat::CODEC,
            ),
        };
        if selected {
            require_pattern(pattern, codec)?;
        }
        Ok(())
    }

    /// Parse raw input. `error` is handed back untouched in the result.
    pub fn parse(&self, text: &str, error: Option<Message>) -> ParseResult {
        let result = match self {
            Self::Boolean(_) => boolean::parse(text, error),
            Self::Integer(options) => number::parse_integer(text, options, error),
            Self::Decimal(options) => number::parse_decimal(text, options, error),
            Self::Real(options) => number::parse_real(text, options, error),
            Self::Money(options) => number::parse_money(text, options, error),
            Self::Percent(options) => number::parse_percent(text, options, error),
            Self::Date(options) => temporal::parse_date(text, options, error),
            Self::DateTime(options) => temporal::parse_date_time(text, options, error),
            Self::MonthAndDay(_) => temporal::parse_month_day(text, error),
            Self::Time(options) => temporal::parse_time(text, options, error),
        };
        trace!(kind = self.name(), text, success = result.is_success(), "parsed");
        result
    }

    /// Parse a state value.
    ///
    /// `Null` passes as empty input. Typed values are re-read through their
    /// canonical text, so bounds apply to them as well.
    pub fn parse_value(&self, value: &Value, error: Option<Message>) -> ParseResult {
        match value {
            Value::Null => ParseResult::ok(Value::Null, error),
            Value::Text(text) => self.parse(text, error),
            typed => self.parse(&typed.to_string(), error),
        }
    }

    /// Render a value as display text.
    pub fn format(&self, value: &Value) -> Result<String> {
        match self {
            Self::Boolean(options) => boolean::format(value, options),
            Self::Integer(options) => number::format_integer(value, options),
            Self::Decimal(options) => number::format_decimal(value, options),
            Self::Real(options) => number::format_real(value, options),
            Self::Money(options) => number::format_money(value, options),
            Self::Percent(options) => number::format_percent(value, options),
            Self::Date(options) => temporal::format_date(value, options),
            Self::DateTime(options) => temporal::format_date_time(value, options),
            Self::MonthAndDay(options) => temporal::format_month_day(value, options),
            Self::Time(options) => temporal::format_time(value, options),
        }
    }
}
