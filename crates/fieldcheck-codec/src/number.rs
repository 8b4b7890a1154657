//! Numeric codecs: integer, decimal, real, money and percent.
//!
//! All of them share one input grammar: surrounding whitespace, an optional
//! sign, digits with optional `,` group separators and an optional `.`
//! fraction. Exponents and `NaN`/`Infinity` literals are not numbers here.
//!
//! Parse-time `precision` and `round` use banker's rounding. Display rounding
//! (see [`crate::numfmt`]) rounds midpoints away from zero.

use std::str::FromStr;

use fieldcheck_model::{Message, NO_VALUE, Result, Value};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::warn;

use crate::numfmt::{self, NumberTemplate};
use crate::options::{
    DecimalOptions, IntegerFormat, IntegerOptions, MoneyFormat, MoneyOptions, NumberFormat,
    PercentFormat, PercentOptions, RealOptions, Sentinel, active, require_pattern,
};
use crate::outcome::ParseResult;

/// Rendering used when a value cannot be read as a number.
pub const NOT_A_NUMBER: &str = "NaN";

const CURRENCY_SYMBOL: &str = "$";

/// Places money is rounded to before any option applies.
const MONEY_PLACES: u32 = 4;

/// Normalize text in the number grammar to plain `-123.45` form.
pub(crate) fn clean_number(text: &str) -> Option<String> {
    let trimmed = text.trim();
    let (sign, body) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (body, ""),
    };
    if int_part.starts_with(',')
        || int_part.ends_with(',')
        || int_part.contains(",,")
        || !int_part.chars().all(|c| c.is_ascii_digit() || c == ',')
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }
    let digits: String = int_part.chars().filter(|c| *c != ',').collect();
    if digits.is_empty() && frac_part.is_empty() {
        return None;
    }
    let int_digits = if digits.is_empty() { "0" } else { digits.as_str() };
    Some(if frac_part.is_empty() {
        format!("{sign}{int_digits}")
    } else {
        format!("{sign}{int_digits}.{frac_part}")
    })
}

pub(crate) fn read_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(&clean_number(text)?).ok()
}

pub(crate) fn read_real(text: &str) -> Option<f64> {
    f64::from_str(&clean_number(text)?)
        .ok()
        .filter(|value| value.is_finite())
}

fn within<T: PartialOrd + Sentinel>(value: T, min: Option<T>, max: Option<T>) -> bool {
    active(min).is_none_or(|min| value >= min) && active(max).is_none_or(|max| value <= max)
}

/// Banker's rounding of a real through its decimal text.
fn round_real(value: f64, places: u32) -> f64 {
    numfmt::real_to_decimal(value)
        .and_then(|decimal| decimal.round_dp(places).to_f64())
        .unwrap_or(value)
}

fn constrain_decimal(
    value: Decimal,
    min: Option<Decimal>,
    max: Option<Decimal>,
    precision: Option<u32>,
    round: Option<u32>,
) -> Option<Decimal> {
    if !within(value, min, max) {
        return None;
    }
    if let Some(places) = active(precision)
        && value != value.round_dp(places)
    {
        return None;
    }
    Some(match active(round) {
        Some(places) => value.round_dp(places),
        None => value,
    })
}

fn render_template(pattern: &str, value: Decimal, codec: &'static str) -> Option<String> {
    let template = NumberTemplate::parse(pattern);
    if template.is_none() {
        warn!(codec, pattern, "unrecognized number pattern, rendering unformatted");
    }
    template.map(|template| template.render(value))
}

/// Shared empty/uncoercible handling for the numeric formatters.
fn render<T>(
    value: &Value,
    coerce: impl FnOnce(&Value) -> Option<T>,
    fallback: &str,
    draw: impl FnOnce(T) -> Result<String>,
) -> Result<String> {
    if value.is_empty() {
        return Ok(NO_VALUE.to_string());
    }
    match coerce(value) {
        Some(number) => draw(number),
        None => Ok(fallback.to_string()),
    }
}

fn coerce_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Integer(number) => Some(Decimal::from(*number)),
        Value::Decimal(number) | Value::Money(number) => Some(*number),
        Value::Real(number) | Value::Percent(number) => numfmt::real_to_decimal(*number),
        Value::Text(text) => read_decimal(text),
        _ => None,
    }
}

// integer

pub(crate) fn parse_integer(text: &str, options: &IntegerOptions, error: Option<Message>) -> ParseResult {
    if text.is_empty() {
        return ParseResult::ok(Value::text(text), error);
    }
    let Some(value) = read_decimal(text).and_then(|number| number.trunc().to_i64()) else {
        return ParseResult::failed(text, error);
    };
    if !within(value, options.min_value, options.max_value) {
        return ParseResult::failed(text, error);
    }
    ParseResult::ok(Value::Integer(value), error)
}

pub(crate) fn format_integer(value: &Value, options: &IntegerOptions) -> Result<String> {
    let coerce = |value: &Value| coerce_decimal(value).and_then(|number| number.trunc().to_i64());
    render(value, coerce, NOT_A_NUMBER, |number| {
        Ok(match options.format {
            None => number.to_string(),
            Some(IntegerFormat::Comma) => numfmt::comma(Decimal::from(number)),
            Some(IntegerFormat::Byte) => numfmt::byte_size(number),
            Some(IntegerFormat::Pattern) => {
                let pattern = require_pattern(options.pattern.as_deref(), IntegerFormat::CODEC)?;
                match NumberTemplate::parse(pattern) {
                    Some(NumberTemplate::Places(_)) => number.to_string(),
                    Some(template) => template.render(Decimal::from(number)),
                    None => render_template(pattern, Decimal::from(number), IntegerFormat::CODEC)
                        .unwrap_or_else(|| number.to_string()),
                }
            }
        })
    })
}

// decimal

pub(crate) fn parse_decimal(text: &str, options: &DecimalOptions, error: Option<Message>) -> ParseResult {
    if text.is_empty() {
        return ParseResult::ok(Value::text(text), error);
    }
    read_decimal(text)
        .and_then(|value| {
            constrain_decimal(
                value,
                options.min_value,
                options.max_value,
                options.precision,
                options.round,
            )
        })
        .map_or_else(
            || ParseResult::failed(text, error.clone()),
            |value| ParseResult::ok(Value::Decimal(value), error.clone()),
        )
}

fn draw_number(number: Decimal, format: Option<NumberFormat>, pattern: Option<&str>) -> Result<String> {
    Ok(match format {
        None => numfmt::fixed(number, 4, true),
        Some(NumberFormat::Comma) => numfmt::comma(number),
        Some(NumberFormat::N2) => numfmt::fixed(number, 2, true),
        Some(NumberFormat::N3) => numfmt::fixed(number, 3, true),
        Some(NumberFormat::Pattern) => {
            let pattern = require_pattern(pattern, NumberFormat::CODEC)?;
            render_template(pattern, number, NumberFormat::CODEC)
                .unwrap_or_else(|| numfmt::plain(number))
        }
    })
}

pub(crate) fn format_decimal(value: &Value, options: &DecimalOptions) -> Result<String> {
    render(value, coerce_decimal, NOT_A_NUMBER, |number| {
        draw_number(number, options.format, options.pattern.as_deref())
    })
}

// real

pub(crate) fn parse_real(text: &str, options: &RealOptions, error: Option<Message>) -> ParseResult {
    if text.is_empty() {
        return ParseResult::ok(Value::text(text), error);
    }
    let Some(mut value) = read_real(text) else {
        return ParseResult::failed(text, error);
    };
    if !within(value, options.min_value, options.max_value) {
        return ParseResult::failed(text, error);
    }
    if let Some(places) = active(options.precision)
        && value != round_real(value, places)
    {
        return ParseResult::failed(text, error);
    }
    if let Some(places) = active(options.round) {
        value = round_real(value, places);
    }
    ParseResult::ok(Value::Real(value), error)
}

fn coerce_real(value: &Value) -> Option<f64> {
    match value {
        Value::Real(number) | Value::Percent(number) => Some(*number),
        Value::Integer(number) => number.to_f64(),
        Value::Decimal(number) | Value::Money(number) => number.to_f64(),
        Value::Text(text) => read_real(text),
        _ => None,
    }
}

pub(crate) fn format_real(value: &Value, options: &RealOptions) -> Result<String> {
    if matches!(value, Value::Real(number) if number.is_nan()) {
        return Ok(NO_VALUE.to_string());
    }
    render(value, coerce_real, NOT_A_NUMBER, |number| {
        match numfmt::real_to_decimal(number) {
            Some(decimal) => draw_number(decimal, options.format, options.pattern.as_deref()),
            None => {
                if options.format == Some(NumberFormat::Pattern) {
                    require_pattern(options.pattern.as_deref(), NumberFormat::CODEC)?;
                }
                let places = match options.format {
                    Some(NumberFormat::N2) => 2,
                    Some(NumberFormat::N3) => 3,
                    _ => 4,
                };
                Ok(numfmt::fixed_real(number, places, true))
            }
        }
    })
}

// money

/// Keep only digits and `.`, the way money input is read.
fn strip_money(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect()
}

pub(crate) fn parse_money(text: &str, options: &MoneyOptions, error: Option<Message>) -> ParseResult {
    if text.is_empty() {
        return ParseResult::ok(Value::text(text), error);
    }
    let stripped = strip_money(text);
    if stripped.is_empty() {
        return ParseResult::failed(text, error);
    }
    Decimal::from_str(&stripped)
        .ok()
        .and_then(|value| {
            constrain_decimal(
                value.round_dp(MONEY_PLACES),
                options.min_value,
                options.max_value,
                options.precision,
                options.round,
            )
        })
        .map_or_else(
            || ParseResult::failed(text, error.clone()),
            |value| ParseResult::ok(Value::Money(value), error.clone()),
        )
}

/// Money coercion also accepts rendered currency such as `-$1,234.50`.
fn coerce_money(value: &Value) -> Option<Decimal> {
    match value {
        Value::Text(text) => {
            let trimmed = text.trim();
            let (negative, body) = match trimmed.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, trimmed),
            };
            let body = body.strip_prefix(CURRENCY_SYMBOL).unwrap_or(body);
            let number = read_decimal(body)?;
            Some(if negative { -number } else { number })
        }
        other => coerce_decimal(other),
    }
}

fn with_symbol(rendered: String) -> String {
    match rendered.strip_prefix('-') {
        Some(rest) => format!("-{CURRENCY_SYMBOL}{rest}"),
        None => format!("{CURRENCY_SYMBOL}{rendered}"),
    }
}

pub(crate) fn format_money(value: &Value, options: &MoneyOptions) -> Result<String> {
    render(value, coerce_money, NOT_A_NUMBER, |number| {
        let rendered = match options.format {
            None | Some(MoneyFormat::C2) => numfmt::fixed(number, 2, true),
            Some(MoneyFormat::C3) => numfmt::fixed(number, 3, true),
            Some(MoneyFormat::Pattern) => {
                let pattern = require_pattern(options.pattern.as_deref(), MoneyFormat::CODEC)?;
                render_template(pattern, number, MoneyFormat::CODEC)
                    .unwrap_or_else(|| numfmt::fixed(number, 2, true))
            }
        };
        Ok(with_symbol(rendered))
    })
}

// percent

/// Rendering used when a value cannot be read as a percentage.
pub const NOT_A_PERCENT: &str = "NaN%";

pub(crate) fn parse_percent(text: &str, options: &PercentOptions, error: Option<Message>) -> ParseResult {
    if text.is_empty() {
        return ParseResult::ok(Value::text(text), error);
    }
    let trimmed = text.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed);
    let Some(value) = read_real(number).map(|value| value / 100.0) else {
        return ParseResult::failed(text, error);
    };
    if !within(value, options.min_value, options.max_value) {
        return ParseResult::failed(text, error);
    }
    ParseResult::ok(Value::Percent(value), error)
}

/// Text ending in `%` is percent-scaled; anything else is already a fraction.
fn coerce_percent(value: &Value) -> Option<f64> {
    match value {
        Value::Text(text) => match text.trim().strip_suffix('%') {
            Some(number) => read_real(number).map(|value| value / 100.0),
            None => read_real(text),
        },
        other => coerce_real(other),
    }
}

/// Fraction × 100 in decimal space, `None` past the range of `Decimal`.
fn scale(fraction: f64) -> Option<Decimal> {
    numfmt::real_to_decimal(fraction)?.checked_mul(Decimal::ONE_HUNDRED)
}

pub(crate) fn format_percent(value: &Value, options: &PercentOptions) -> Result<String> {
    if matches!(value, Value::Percent(number) if number.is_nan()) {
        return Ok(NO_VALUE.to_string());
    }
    render(value, coerce_percent, NOT_A_PERCENT, |fraction| {
        let places = match options.format {
            None | Some(PercentFormat::P2) => 2,
            Some(PercentFormat::P3) => 3,
            Some(PercentFormat::P4) => 4,
            Some(PercentFormat::Pattern) => {
                let pattern = require_pattern(options.pattern.as_deref(), PercentFormat::CODEC)?;
                let rendered = match scale(fraction) {
                    Some(scaled) => render_template(pattern, scaled, PercentFormat::CODEC)
                        .unwrap_or_else(|| numfmt::plain(scaled)),
                    None => (fraction * 100.0).to_string(),
                };
                return Ok(format!("{rendered}%"));
            }
        };
        let rendered = match scale(fraction) {
            Some(scaled) => numfmt::fixed(scaled, places, true),
            None => numfmt::fixed_real(fraction * 100.0, places, true),
        };
        Ok(format!("{rendered}%"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grammar() {
        assert_eq!(clean_number(" 1,234.50 ").as_deref(), Some("1234.50"));
        assert_eq!(clean_number("+.5").as_deref(), Some("0.5"));
        assert_eq!(clean_number("-12.").as_deref(), Some("-12"));
        for bad in ["", "-", ".", "1e5", "NaN", "Infinity", "1,,2", ",1", "12a", "1.2.3"] {
            assert_eq!(clean_number(bad), None, "{bad}");
        }
    }

    #[test]
    fn integer_truncates_toward_zero() {
        let options = IntegerOptions::default();
        assert_eq!(parse_integer("12.9", &options, None).into_value(), Some(Value::Integer(12)));
        assert_eq!(parse_integer("-12.9", &options, None).into_value(), Some(Value::Integer(-12)));
    }

    #[test]
    fn integer_bounds_ignore_zero() {
        let options = IntegerOptions::default().with_bounds(Some(0), Some(10));
        assert!(parse_integer("-5", &options, None).is_success());
        assert!(!parse_integer("11", &options, None).is_success());
    }

    #[test]
    fn decimal_precision_and_round() {
        let strict = DecimalOptions::default().with_precision(2);
        assert!(parse_decimal("1.25", &strict, None).is_success());
        assert!(!parse_decimal("1.255", &strict, None).is_success());

        let rounding = DecimalOptions::default().with_round(1);
        assert_eq!(
            parse_decimal("1.25", &rounding, None).into_value(),
            Some(Value::Decimal(Decimal::new(12, 1)))
        );
        assert_eq!(
            parse_decimal("1.35", &rounding, None).into_value(),
            Some(Value::Decimal(Decimal::new(14, 1)))
        );
    }

    #[test]
    fn real_rejects_non_finite() {
        let options = RealOptions::default();
        assert!(!parse_real("NaN", &options, None).is_success());
        assert!(!parse_real("1e400", &options, None).is_success());
        assert_eq!(parse_real("2.5", &options, None).into_value(), Some(Value::Real(2.5)));
    }

    #[test]
    fn money_strip_keeps_digits_and_point() {
        assert_eq!(strip_money("$1,234.56 USD"), "1234.56");
        assert!(!parse_money("abc", &MoneyOptions::default(), None).is_success());
        assert_eq!(
            parse_money("12.123456", &MoneyOptions::default(), None).into_value(),
            Some(Value::Money(Decimal::new(121235, 4)))
        );
    }

    #[test]
    fn negative_money_keeps_sign_before_symbol() {
        let value = Value::Money(Decimal::new(-1200, 2));
        assert_eq!(format_money(&value, &MoneyOptions::default()).unwrap(), "-$12.00");
        assert_eq!(format_money(&Value::text("-$12.00"), &MoneyOptions::default()).unwrap(), "-$12.00");
    }

    #[test]
    fn percent_bounds_apply_to_fraction() {
        let options = PercentOptions {
            max_value: Some(1.0),
            ..PercentOptions::default()
        };
        assert!(parse_percent("100%", &options, None).is_success());
        assert!(!parse_percent("101", &options, None).is_success());
    }

    #[test]
    fn percent_trims_before_stripping_sign() {
        let options = PercentOptions::default();
        for text in ["12%", " 12%", "12% ", " 12 "] {
            let result = parse_percent(text, &options, None);
            assert_eq!(result.into_value(), Some(Value::Percent(0.12)), "{text:?}");
        }
    }

    #[test]
    fn huge_percent_formats_through_floats() {
        let options = PercentOptions::default();
        let result = parse_percent("100000000000000000000000000000", &options, None);
        let value = result.into_value().unwrap();
        let text = format_percent(&value, &options).unwrap();
        assert!(text.starts_with("100,000,000,000,000"), "{text}");
        assert!(text.ends_with(".00%"), "{text}");
        let pattern = PercentOptions {
            format: Some(PercentFormat::Pattern),
            pattern: Some("#,##0".to_string()),
            ..PercentOptions::default()
        };
        assert!(format_percent(&value, &pattern).unwrap().ends_with('%'));
    }
}
