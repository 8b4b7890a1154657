//! Typed codec options.
//!
//! Every codec has one options struct listing the keys it understands. Rule
//! documents deserialize into these with unknown keys rejected. Numeric bounds
//! use a zero sentinel: `Some(0)` is treated exactly like `None`.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use fieldcheck_model::{ConfigError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use crate::temporal;

macro_rules! format_variants {
    (
        $(#[$meta:meta])*
        $name:ident for $codec:literal {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
        #[serde(try_from = "String")]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Codec name used in error messages.
            pub const CODEC: &'static str = $codec;

            /// Variant name as written in rule documents.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(ConfigError::UnknownFormat {
                        codec: $codec,
                        variant: other.to_string(),
                    }),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = ConfigError;

            fn try_from(value: String) -> Result<Self> {
                value.parse()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

format_variants! {
    /// Boolean display variants. Default is `Yes`/`No`.
    BooleanFormat for "boolean" {
        TrueFalse => "trueFalse",
        YesNo => "yesNo",
        /// Caller-supplied `[whenTrue, whenFalse]`.
        Values => "values",
    }
}

format_variants! {
    /// Integer display variants. Default is the plain integer.
    IntegerFormat for "integer" {
        Comma => "comma",
        Byte => "byte",
        Pattern => "pattern",
    }
}

format_variants! {
    /// Decimal and real display variants. Default is grouped with four places.
    NumberFormat for "number" {
        Comma => "comma",
        N2 => "n2",
        N3 => "n3",
        Pattern => "pattern",
    }
}

format_variants! {
    /// Money display variants. Default is `c2`.
    MoneyFormat for "money" {
        C2 => "c2",
        C3 => "c3",
        Pattern => "pattern",
    }
}

format_variants! {
    /// Percent display variants. Default is `p2`.
    PercentFormat for "percent" {
        P2 => "p2",
        P3 => "p3",
        P4 => "p4",
        Pattern => "pattern",
    }
}

format_variants! {
    /// Date display variants. Default is `YYYY-MM-DD`.
    DateFormat for "date" {
        Date => "date",
        LongDate => "longDate",
        /// Omits the year when it is the current one.
        LongDate2 => "longDate2",
        ShortDate => "shortDate",
        ShorterDate => "shorterDate",
        MonthDay => "monthDay",
        MonthYear => "monthYear",
        Pattern => "pattern",
    }
}

format_variants! {
    /// Date-time display variants. Default is `MM/DD/YYYY hh:mm:ss a`.
    DateTimeFormat for "dateTime" {
        DateTime => "dateTime",
        LongDateTime => "longDateTime",
        LongDate => "longDate",
        LongTime => "longTime",
        ShortDate => "shortDate",
        ShorterDate => "shorterDate",
        ShortTime => "shortTime",
        TinyDate => "tinyDate",
        TinyDateTime => "tinyDateTime",
        Pattern => "pattern",
    }
}

format_variants! {
    /// Month/day display variants. Default is `MM/DD`.
    MonthDayFormat for "monthAndDay" {
        Pattern => "pattern",
    }
}

format_variants! {
    /// Time display variants. Default is `hh:mm:ss a`.
    TimeFormat for "time" {
        LongTime => "longTime",
        ShortTime => "shortTime",
        Pattern => "pattern",
    }
}

/// A numeric option where zero means "not set".
pub(crate) trait Sentinel: Copy {
    fn is_unset(self) -> bool;
}

impl Sentinel for i64 {
    fn is_unset(self) -> bool {
        self == 0
    }
}

impl Sentinel for u32 {
    fn is_unset(self) -> bool {
        self == 0
    }
}

impl Sentinel for f64 {
    fn is_unset(self) -> bool {
        self == 0.0
    }
}

impl Sentinel for Decimal {
    fn is_unset(self) -> bool {
        self.is_zero()
    }
}

/// The option value when it is present and non-zero.
pub(crate) fn active<T: Sentinel>(option: Option<T>) -> Option<T> {
    option.filter(|value| !value.is_unset())
}

/// The `pattern` option, required once the `pattern` variant is selected.
pub(crate) fn require_pattern<'a>(pattern: Option<&'a str>, codec: &'static str) -> Result<&'a str> {
    pattern.ok_or(ConfigError::MissingPattern { codec })
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct BooleanOptions {
    pub format: Option<BooleanFormat>,
    /// `[whenTrue, whenFalse]` for the `values` variant.
    pub values: Option<Vec<String>>,
}

impl BooleanOptions {
    /// Use custom display text for true and false.
    pub fn with_values(mut self, when_true: impl Into<String>, when_false: impl Into<String>) -> Self {
        self.format = Some(BooleanFormat::Values);
        self.values = Some(vec![when_true.into(), when_false.into()]);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct IntegerOptions {
    pub format: Option<IntegerFormat>,
    pub pattern: Option<String>,
    pub min_value: Option<i64>,
    pub max_value: Option<i64>,
}

impl IntegerOptions {
    pub fn with_format(mut self, format: IntegerFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_bounds(mut self, min_value: Option<i64>, max_value: Option<i64>) -> Self {
        self.min_value = min_value;
        self.max_value = max_value;
        self
    }
}

/// Options shared by the decimal codec.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct DecimalOptions {
    pub format: Option<NumberFormat>,
    pub pattern: Option<String>,
    pub min_value: Option<Decimal>,
    pub max_value: Option<Decimal>,
    /// Reject values that would change when rounded to this many places.
    pub precision: Option<u32>,
    /// Round parsed values to this many places.
    pub round: Option<u32>,
}

impl DecimalOptions {
    pub fn with_format(mut self, format: NumberFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_min_value(mut self, min_value: Decimal) -> Self {
        self.min_value = Some(min_value);
        self
    }

    pub fn with_max_value(mut self, max_value: Decimal) -> Self {
        self.max_value = Some(max_value);
        self
    }

    pub fn with_precision(mut self, places: u32) -> Self {
        self.precision = Some(places);
        self
    }

    pub fn with_round(mut self, places: u32) -> Self {
        self.round = Some(places);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct RealOptions {
    pub format: Option<NumberFormat>,
    pub pattern: Option<String>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub precision: Option<u32>,
    pub round: Option<u32>,
}

impl RealOptions {
    pub fn with_format(mut self, format: NumberFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_bounds(mut self, min_value: Option<f64>, max_value: Option<f64>) -> Self {
        self.min_value = min_value;
        self.max_value = max_value;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct MoneyOptions {
    pub format: Option<MoneyFormat>,
    pub pattern: Option<String>,
    pub min_value: Option<Decimal>,
    pub max_value: Option<Decimal>,
    pub precision: Option<u32>,
    pub round: Option<u32>,
}

impl MoneyOptions {
    pub fn with_format(mut self, format: MoneyFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_round(mut self, places: u32) -> Self {
        self.round = Some(places);
        self
    }
}

/// Percent options. Bounds apply to the fraction (`0.5` is fifty percent).
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct PercentOptions {
    pub format: Option<PercentFormat>,
    pub pattern: Option<String>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
}

impl PercentOptions {
    pub fn with_format(mut self, format: PercentFormat) -> Self {
        self.format = Some(format);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct DateOptions {
    pub format: Option<DateFormat>,
    pub pattern: Option<String>,
    #[serde(deserialize_with = "bound::date")]
    pub min_value: Option<NaiveDate>,
    #[serde(deserialize_with = "bound::date")]
    pub max_value: Option<NaiveDate>,
}

impl DateOptions {
    pub fn with_format(mut self, format: DateFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.format = Some(DateFormat::Pattern);
        self.pattern = Some(pattern.into());
        self
    }

    /// Set the lower bound from text in the date grammar.
    pub fn with_min_value(mut self, text: &str) -> Result<Self> {
        self.min_value = Some(bound::parse_date("minValue", text)?);
        Ok(self)
    }

    /// Set the upper bound from text in the date grammar.
    pub fn with_max_value(mut self, text: &str) -> Result<Self> {
        self.max_value = Some(bound::parse_date("maxValue", text)?);
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct DateTimeOptions {
    pub format: Option<DateTimeFormat>,
    pub pattern: Option<String>,
    #[serde(deserialize_with = "bound::date_time")]
    pub min_value: Option<NaiveDateTime>,
    #[serde(deserialize_with = "bound::date_time")]
    pub max_value: Option<NaiveDateTime>,
}

impl DateTimeOptions {
    pub fn with_format(mut self, format: DateTimeFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_min_value(mut self, text: &str) -> Result<Self> {
        self.min_value = Some(bound::parse_date_time("minValue", text)?);
        Ok(self)
    }

    pub fn with_max_value(mut self, text: &str) -> Result<Self> {
        self.max_value = Some(bound::parse_date_time("maxValue", text)?);
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct MonthDayOptions {
    pub format: Option<MonthDayFormat>,
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct TimeOptions {
    pub format: Option<TimeFormat>,
    pub pattern: Option<String>,
    #[serde(deserialize_with = "bound::time")]
    pub min_value: Option<NaiveTime>,
    #[serde(deserialize_with = "bound::time")]
    pub max_value: Option<NaiveTime>,
}

impl TimeOptions {
    pub fn with_format(mut self, format: TimeFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_min_value(mut self, text: &str) -> Result<Self> {
        self.min_value = Some(bound::parse_time("minValue", text)?);
        Ok(self)
    }

    pub fn with_max_value(mut self, text: &str) -> Result<Self> {
        self.max_value = Some(bound::parse_time("maxValue", text)?);
        Ok(self)
    }
}

/// Temporal bounds are written as text and read with the codec grammar.
mod bound {
    use super::{
        ConfigError, Deserialize, Deserializer, NaiveDate, NaiveDateTime, NaiveTime, Result,
        temporal,
    };

    fn invalid(option: &'static str, text: &str) -> ConfigError {
        ConfigError::InvalidBound {
            option,
            value: text.to_string(),
        }
    }

    pub(super) fn parse_date(option: &'static str, text: &str) -> Result<NaiveDate> {
        temporal::read_date_time(text)
            .map(|dt| dt.date())
            .ok_or_else(|| invalid(option, text))
    }

    pub(super) fn parse_date_time(option: &'static str, text: &str) -> Result<NaiveDateTime> {
        temporal::read_date_time(text).ok_or_else(|| invalid(option, text))
    }

    pub(super) fn parse_time(option: &'static str, text: &str) -> Result<NaiveTime> {
        temporal::read_time(text).ok_or_else(|| invalid(option, text))
    }

    fn text<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<String>, D::Error> {
        Option::<String>::deserialize(deserializer)
    }

    pub(super) fn date<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Option<NaiveDate>, D::Error> {
        text(deserializer)?
            .map(|value| parse_date("bound", &value).map_err(serde::de::Error::custom))
            .transpose()
    }

    pub(super) fn date_time<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Option<NaiveDateTime>, D::Error> {
        text(deserializer)?
            .map(|value| parse_date_time("bound", &value).map_err(serde::de::Error::custom))
            .transpose()
    }

    pub(super) fn time<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Option<NaiveTime>, D::Error> {
        text(deserializer)?
            .map(|value| parse_time("bound", &value).map_err(serde::de::Error::custom))
            .transpose()
    }
}
