//! Temporal codecs: date, dateTime, monthAndDay and time.
//!
//! Input is read by trying a fixed list of layouts, date-and-time first and
//! date-only second. Values are timezone-naive. Dates outside years
//! 1753..=9999 are rejected whatever the layout.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use fieldcheck_model::{Message, NO_VALUE, Result, Value};
use regex::Regex;

use crate::datefmt;
use crate::options::{
    DateFormat, DateOptions, DateTimeFormat, DateTimeOptions, MonthDayFormat, MonthDayOptions,
    TimeFormat, TimeOptions, require_pattern,
};
use crate::outcome::ParseResult;

/// Rendering used when a value cannot be read as a date.
pub const INVALID_DATE: &str = "Invalid date";

/// Year month/day values are anchored to.
pub const REFERENCE_YEAR: i32 = 2000;

const MIN_YEAR: i32 = 1753;
const MAX_YEAR: i32 = 9999;

/// Date layouts. Two-digit years come before four-digit ones so `1/1/17` is 2017,
/// and month-first slashes before year-first.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%m-%d-%Y",
    "%d-%b-%Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%A, %B %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Time layouts, 24-hour first.
const TIME_FORMATS: &[&str] = &[
    "%H:%M:%S%.f",
    "%H:%M:%S",
    "%H:%M",
    "%I:%M:%S %p",
    "%I:%M %p",
    "%I:%M:%S%p",
    "%I:%M%p",
];

static DATE_TIME_FORMATS: LazyLock<Vec<String>> = LazyLock::new(|| {
    DATE_FORMATS
        .iter()
        .flat_map(|date| {
            TIME_FORMATS.iter().flat_map(move |time| {
                [format!("{date} {time}"), format!("{date}T{time}")]
            })
        })
        .collect()
});

static MONTH_DAY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0[1-9]|1[0-2])[/-]([0-2][0-9]|3[01])$").expect("Invalid month/day regex")
});

/// Read text in the date grammar. Date-only input lands on midnight.
pub fn read_date_time(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(value) = DateTime::parse_from_rfc3339(text) {
        return Some(value.naive_local());
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

/// Read text as a time of day. Needs a `:`; full date-times are accepted too.
pub fn read_time(text: &str) -> Option<NaiveTime> {
    let text = text.trim();
    if !text.contains(':') {
        return None;
    }
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(text, format).ok())
        .or_else(|| read_date_time(text).map(|value| value.time()))
}

fn in_window(value: &NaiveDateTime) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&value.year())
}

/// Whole-second precision; sub-second input is dropped.
fn whole_seconds(time: NaiveTime) -> NaiveTime {
    time.with_nanosecond(0).unwrap_or(time)
}

/// Typed or textual value as a date-time, for display.
fn coerce(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::Date(date) | Value::MonthDay(date) => Some(date.and_time(NaiveTime::MIN)),
        Value::DateTime(value) => Some(*value),
        Value::Time(time) => {
            NaiveDate::from_ymd_opt(REFERENCE_YEAR, 1, 1).map(|date| date.and_time(*time))
        }
        Value::Text(text) => read_date_time(text).or_else(|| {
            read_month_day(text.trim()).map(|date| date.and_time(NaiveTime::MIN))
        }),
        _ => None,
    }
}

fn render(value: &Value, draw: impl FnOnce(NaiveDateTime) -> Result<String>) -> Result<String> {
    if value.is_empty() {
        return Ok(NO_VALUE.to_string());
    }
    match coerce(value) {
        Some(value) => draw(value),
        None => Ok(INVALID_DATE.to_string()),
    }
}

// date

pub(crate) fn parse_date(text: &str, options: &DateOptions, error: Option<Message>) -> ParseResult {
    if text.is_empty() {
        return ParseResult::ok(Value::text(text), error);
    }
    let Some(value) = read_date_time(text).filter(in_window) else {
        return ParseResult::failed(text, error);
    };
    let date = value.date();
    if options.min_value.is_some_and(|min| date < min)
        || options.max_value.is_some_and(|max| date > max)
    {
        return ParseResult::failed(text, error);
    }
    ParseResult::ok(Value::Date(date), error)
}

pub(crate) fn format_date(value: &Value, options: &DateOptions) -> Result<String> {
    render(value, |value| {
        let template = match options.format {
            None => "YYYY-MM-DD",
            Some(DateFormat::Date) => "DD MMMM YYYY",
            Some(DateFormat::LongDate) => "dddd, MMMM D, YYYY",
            Some(DateFormat::LongDate2) if value.year() == Local::now().year() => "dddd, MMMM D",
            Some(DateFormat::LongDate2) => "dddd, MMMM D, YYYY",
            Some(DateFormat::ShortDate) => "D-MMM-YYYY",
            Some(DateFormat::ShorterDate) => "MMM D YYYY",
            Some(DateFormat::MonthDay) => "MMMM D",
            Some(DateFormat::MonthYear) => "MMMM YYYY",
            Some(DateFormat::Pattern) => {
                require_pattern(options.pattern.as_deref(), DateFormat::CODEC)?
            }
        };
        Ok(datefmt::render(template, &value))
    })
}

// dateTime

pub(crate) fn parse_date_time(
    text: &str,
    options: &DateTimeOptions,
    error: Option<Message>,
) -> ParseResult {
    if text.is_empty() {
        return ParseResult::ok(Value::text(text), error);
    }
    let Some(value) = read_date_time(text).filter(in_window) else {
        return ParseResult::failed(text, error);
    };
    let value = value.date().and_time(whole_seconds(value.time()));
    if options.min_value.is_some_and(|min| value < min)
        || options.max_value.is_some_and(|max| value > max)
    {
        return ParseResult::failed(text, error);
    }
    ParseResult::ok(Value::DateTime(value), error)
}

pub(crate) fn format_date_time(value: &Value, options: &DateTimeOptions) -> Result<String> {
    render(value, |value| {
        let template = match options.format {
            None => "MM/DD/YYYY hh:mm:ss a",
            Some(DateTimeFormat::DateTime) => "DD MMMM YYYY h:mm a",
            Some(DateTimeFormat::LongDateTime) => "dddd, MMMM D, YYYY h:mm a",
            Some(DateTimeFormat::LongDate) => "dddd, MMMM D, YYYY",
            Some(DateTimeFormat::LongTime) => "hh:mm:ss a",
            Some(DateTimeFormat::ShortDate) => "D-MMM-YYYY",
            Some(DateTimeFormat::ShorterDate) => "MMM D YYYY",
            Some(DateTimeFormat::ShortTime) => "h:mm a",
            Some(DateTimeFormat::TinyDate) => "M/D/YY",
            Some(DateTimeFormat::TinyDateTime) => "M/D/YY h:mm a",
            Some(DateTimeFormat::Pattern) => {
                require_pattern(options.pattern.as_deref(), DateTimeFormat::CODEC)?
            }
        };
        Ok(datefmt::render(template, &value))
    })
}

// monthAndDay

fn read_month_day(text: &str) -> Option<NaiveDate> {
    let captures = MONTH_DAY_REGEX.captures(text)?;
    let month = captures[1].parse().ok()?;
    let day = captures[2].parse().ok()?;
    NaiveDate::from_ymd_opt(REFERENCE_YEAR, month, day)
}

pub(crate) fn parse_month_day(text: &str, error: Option<Message>) -> ParseResult {
    if text.is_empty() {
        return ParseResult::ok(Value::text(text), error);
    }
    match read_month_day(text) {
        Some(date) => ParseResult::ok(Value::MonthDay(date), error),
        None => ParseResult::failed(text, error),
    }
}

pub(crate) fn format_month_day(value: &Value, options: &MonthDayOptions) -> Result<String> {
    render(value, |value| {
        let template = match options.format {
            None => "MM/DD",
            Some(MonthDayFormat::Pattern) => {
                require_pattern(options.pattern.as_deref(), MonthDayFormat::CODEC)?
            }
        };
        Ok(datefmt::render(template, &value))
    })
}

// time

pub(crate) fn parse_time(text: &str, options: &TimeOptions, error: Option<Message>) -> ParseResult {
    if text.is_empty() {
        return ParseResult::ok(Value::text(text), error);
    }
    let Some(time) = read_time(text).map(whole_seconds) else {
        return ParseResult::failed(text, error);
    };
    if options.min_value.is_some_and(|min| time < whole_seconds(min))
        || options.max_value.is_some_and(|max| time > whole_seconds(max))
    {
        return ParseResult::failed(text, error);
    }
    ParseResult::ok(Value::Time(time), error)
}

pub(crate) fn format_time(value: &Value, options: &TimeOptions) -> Result<String> {
    let value = match value {
        Value::Text(text) => match read_time(text) {
            Some(time) => Value::Time(time),
            None => value.clone(),
        },
        other => other.clone(),
    };
    render(&value, |value| {
        let template = match options.format {
            None | Some(TimeFormat::LongTime) => "hh:mm:ss a",
            Some(TimeFormat::ShortTime) => "h:mm a",
            Some(TimeFormat::Pattern) => {
                require_pattern(options.pattern.as_deref(), TimeFormat::CODEC)?
            }
        };
        Ok(datefmt::render(template, &value))
    })
}
