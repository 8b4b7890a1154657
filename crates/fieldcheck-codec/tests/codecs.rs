//! Integration tests for the codec registry.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use fieldcheck_codec::{
    BooleanFormat, BooleanOptions, DateFormat, DateOptions, DateTimeFormat, DateTimeOptions,
    DecimalOptions, FieldKind, INVALID_DATE, IntegerFormat, IntegerOptions, MoneyFormat,
    MoneyOptions, NOT_A_NUMBER, NOT_A_PERCENT, NumberFormat, PercentFormat, PercentOptions,
    RealOptions, TimeFormat, TimeOptions,
};
use fieldcheck_model::{ConfigError, Message, NO_VALUE, Value};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn all_kinds() -> Vec<FieldKind> {
    vec![
        FieldKind::boolean(),
        FieldKind::integer(),
        FieldKind::decimal(),
        FieldKind::real(),
        FieldKind::money(),
        FieldKind::percent(),
        FieldKind::date(),
        FieldKind::date_time(),
        FieldKind::month_and_day(),
        FieldKind::time(),
    ]
}

fn dec(text: &str) -> Decimal {
    Decimal::from_str(text).unwrap()
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn fmt(kind: FieldKind, text: &str) -> String {
    kind.format(&Value::text(text)).unwrap()
}

#[test]
fn empty_formats_and_parses_as_no_value() {
    for kind in all_kinds() {
        assert_eq!(kind.format(&Value::Null).unwrap(), NO_VALUE, "{}", kind.name());
        assert_eq!(kind.format(&Value::text("")).unwrap(), NO_VALUE, "{}", kind.name());
        let parsed = kind.parse("", None);
        assert!(parsed.is_success(), "{}", kind.name());
        assert_eq!(parsed.value(), Value::text(""));
    }
}

#[test]
fn parse_hands_back_the_message_without_calling_it() {
    let message = Message::new(|| panic!("resolved by a codec"));
    for kind in all_kinds() {
        let result = kind.parse("garbage", Some(message.clone()));
        assert!(!result.is_success(), "{}", kind.name());
        assert_eq!(result.value(), Value::text("garbage"));
        assert!(result.error.as_ref().is_some_and(|m| m.ptr_eq(&message)));
    }
}

// boolean

#[test]
fn boolean_parse() {
    let kind = FieldKind::boolean();
    assert_eq!(kind.parse("Yes", None).into_value(), Some(Value::Boolean(true)));
    assert_eq!(kind.parse("0", None).into_value(), Some(Value::Boolean(false)));
    let maybe = kind.parse("maybe", None);
    assert!(!maybe.is_success());
    assert_eq!(maybe.value(), Value::text("maybe"));
}

#[test]
fn boolean_format_variants() {
    let value = Value::Boolean(true);
    assert_eq!(FieldKind::boolean().format(&value).unwrap(), "Yes");
    let true_false = FieldKind::Boolean(BooleanOptions {
        format: Some(BooleanFormat::TrueFalse),
        values: None,
    });
    assert_eq!(true_false.format(&Value::Boolean(false)).unwrap(), "False");
    let custom = FieldKind::Boolean(BooleanOptions::default().with_values("Alive", "Dead"));
    assert_eq!(custom.format(&value).unwrap(), "Alive");
    assert_eq!(FieldKind::boolean().format(&Value::text("blah")).unwrap(), NO_VALUE);
}

#[test]
fn boolean_values_must_have_two_entries() {
    let kind = FieldKind::Boolean(BooleanOptions {
        format: Some(BooleanFormat::Values),
        values: Some(vec!["a".into(), "b".into(), "c".into()]),
    });
    assert!(matches!(kind.check(), Err(ConfigError::InvalidBooleanValues { found: 3 })));
    assert!(kind.format(&Value::Boolean(true)).is_err());
}

// integer

#[test]
fn integer_byte_format() {
    let kind = FieldKind::Integer(IntegerOptions::default().with_format(IntegerFormat::Byte));
    let cases = [(0, "0 bytes"), (1, "1 byte"), (2048, "2 KB"), (1_232_323, "1.18 MB")];
    for (value, expected) in cases {
        assert_eq!(kind.format(&Value::Integer(value)).unwrap(), expected);
    }
}

#[test]
fn integer_format_variants() {
    assert_eq!(fmt(FieldKind::integer(), "1232323"), "1232323");
    assert_eq!(fmt(FieldKind::integer(), "1,232,323"), "1232323");
    assert_eq!(fmt(FieldKind::integer(), "blah"), NOT_A_NUMBER);

    let comma = FieldKind::Integer(IntegerOptions::default().with_format(IntegerFormat::Comma));
    assert_eq!(fmt(comma, "1232323"), "1,232,323");

    let pattern = |pattern: &str| {
        FieldKind::Integer(IntegerOptions {
            format: Some(IntegerFormat::Pattern),
            pattern: Some(pattern.into()),
            ..IntegerOptions::default()
        })
    };
    assert_eq!(fmt(pattern("10"), "1232323"), "1232323");
    assert_eq!(fmt(pattern("#,##0"), "1232323"), "1,232,323");
    assert_eq!(fmt(pattern("A"), "12"), "12");
}

#[test]
fn integer_parse_bounds() {
    let kind = |min, max| FieldKind::Integer(IntegerOptions::default().with_bounds(min, max));
    assert!(kind(Some(0), None).parse("12", None).is_success());
    assert!(!kind(Some(13), None).parse("12", None).is_success());
    assert!(kind(None, Some(0)).parse("12", None).is_success());
    assert!(!kind(None, Some(11)).parse("12", None).is_success());
    assert!(!FieldKind::integer().parse("1ab", None).is_success());
}

// decimal / real

#[test]
fn decimal_bounds_use_zero_as_unset() {
    let zero = FieldKind::Decimal(DecimalOptions::default().with_min_value(Decimal::ZERO));
    for text in ["12", "-12", "0.5"] {
        assert!(zero.parse(text, None).is_success(), "{text}");
    }
    let min = FieldKind::Decimal(DecimalOptions::default().with_min_value(dec("13")));
    assert!(!min.parse("12", None).is_success());
    let max = FieldKind::Decimal(DecimalOptions::default().with_max_value(dec("11")));
    assert!(!max.parse("12", None).is_success());
}

#[test]
fn decimal_format_variants() {
    let with = |format| FieldKind::Decimal(DecimalOptions::default().with_format(format));
    assert_eq!(fmt(FieldKind::decimal(), "12"), "12.0000");
    assert_eq!(fmt(with(NumberFormat::Comma), "1232323.234"), "1,232,323.234");
    assert_eq!(fmt(with(NumberFormat::N2), "12"), "12.00");
    assert_eq!(fmt(with(NumberFormat::N3), "12"), "12.000");
    let pattern = FieldKind::Decimal(DecimalOptions {
        format: Some(NumberFormat::Pattern),
        pattern: Some("2".into()),
        ..DecimalOptions::default()
    });
    assert_eq!(fmt(pattern, "12"), "12.00");
    assert_eq!(fmt(FieldKind::decimal(), "twelve"), NOT_A_NUMBER);
}

#[test]
fn real_parse_and_format() {
    let kind = FieldKind::Real(RealOptions {
        round: Some(2),
        ..RealOptions::default()
    });
    assert_eq!(kind.parse("22.125", None).into_value(), Some(Value::Real(22.12)));
    assert_eq!(fmt(FieldKind::real(), "1234.5"), "1,234.5000");
    assert_eq!(FieldKind::real().format(&Value::Real(f64::NAN)).unwrap(), NO_VALUE);
    let bounded = FieldKind::Real(RealOptions::default().with_bounds(Some(1.5), None));
    assert!(!bounded.parse("1.4", None).is_success());
}

// money

#[test]
fn money_parse_strips_and_rounds() {
    let result = FieldKind::money().parse("$12.00", None);
    assert_eq!(result.into_value(), Some(Value::Money(dec("12.0000"))));
    let rounded = FieldKind::money().parse("$1,234.56789", None);
    assert_eq!(rounded.into_value(), Some(Value::Money(dec("1234.5679"))));
    assert!(!FieldKind::money().parse("$", None).is_success());
}

#[test]
fn money_format_variants() {
    assert_eq!(fmt(FieldKind::money(), "12"), "$12.00");
    assert_eq!(fmt(FieldKind::money(), "1234567.891"), "$1,234,567.89");
    let c3 = FieldKind::Money(MoneyOptions::default().with_format(MoneyFormat::C3));
    assert_eq!(fmt(c3, "12"), "$12.000");
    let bad_pattern = FieldKind::Money(MoneyOptions {
        format: Some(MoneyFormat::Pattern),
        pattern: Some("A".into()),
        ..MoneyOptions::default()
    });
    assert_eq!(fmt(bad_pattern, "12"), "$12.00");
}

// percent

#[test]
fn percent_parse_divides_by_one_hundred() {
    for text in ["12", "12%"] {
        let result = FieldKind::percent().parse(text, None);
        assert!(result.is_success());
        assert_eq!(result.into_value(), Some(Value::Percent(0.12)));
    }
    assert!(!FieldKind::percent().parse("12%%", None).is_success());
}

#[test]
fn percent_format_variants() {
    let value = Value::Percent(0.12);
    assert_eq!(FieldKind::percent().format(&value).unwrap(), "12.00%");
    let p4 = FieldKind::Percent(PercentOptions::default().with_format(PercentFormat::P4));
    assert_eq!(p4.format(&value).unwrap(), "12.0000%");
    let bad_pattern = FieldKind::Percent(PercentOptions {
        format: Some(PercentFormat::Pattern),
        pattern: Some("A".into()),
        ..PercentOptions::default()
    });
    assert_eq!(bad_pattern.format(&value).unwrap(), "12%");
    assert_eq!(fmt(FieldKind::percent(), "blah"), NOT_A_PERCENT);
    assert_eq!(fmt(FieldKind::percent(), "12%"), "12.00%");
}

// date

#[test]
fn date_parse() {
    let kind = FieldKind::date();
    for text in ["1/1/2012", "2012-01-01", "2012-01-01 3:00 pm"] {
        assert_eq!(kind.parse(text, None).into_value(), Some(Value::Date(ymd(2012, 1, 1))), "{text}");
    }
    for text in ["1ab", "blah", "3:00 pm", "2012-01-01 3pm", "1752-01-01", "10000-01-01"] {
        let result = kind.parse(text, None);
        assert!(!result.is_success(), "{text}");
        assert_eq!(result.value(), Value::text(text));
    }
}

#[test]
fn date_parse_bounds() {
    let min = FieldKind::Date(DateOptions::default().with_min_value("2012-01-01").unwrap());
    assert!(!min.parse("2011-01-01", None).is_success());
    let min = FieldKind::Date(DateOptions::default().with_min_value("1/1/2011").unwrap());
    assert!(min.parse("2012-01-01", None).is_success());
    let max = FieldKind::Date(DateOptions::default().with_max_value("2012-01-01").unwrap());
    assert!(!max.parse("2017-01-01", None).is_success());
    assert!(max.parse("2012-01-01 11:59 pm", None).is_success());
}

#[test]
fn date_format_variants() {
    let with = |format| FieldKind::Date(DateOptions::default().with_format(format));
    assert_eq!(fmt(FieldKind::date(), "1/1/2017"), "2017-01-01");
    assert_eq!(fmt(FieldKind::date(), "2017-01-01 03:00"), "2017-01-01");
    assert_eq!(fmt(with(DateFormat::Date), "2017-01-01"), "01 January 2017");
    assert_eq!(fmt(with(DateFormat::LongDate), "2017-01-01"), "Sunday, January 1, 2017");
    assert_eq!(fmt(with(DateFormat::LongDate2), "2013-01-01"), "Tuesday, January 1, 2013");
    assert_eq!(fmt(with(DateFormat::ShortDate), "2017-01-01"), "1-Jan-2017");
    assert_eq!(fmt(with(DateFormat::ShorterDate), "2017-01-01"), "Jan 1 2017");
    assert_eq!(fmt(with(DateFormat::MonthDay), "2017-01-01"), "January 1");
    assert_eq!(fmt(with(DateFormat::MonthYear), "2017-01-01"), "January 2017");
    let pattern = FieldKind::Date(DateOptions::default().with_pattern("YYYY"));
    assert_eq!(fmt(pattern, "2017-01-01"), "2017");
    assert_eq!(fmt(FieldKind::date(), "blah"), INVALID_DATE);
}

#[test]
fn long_date2_drops_the_current_year() {
    use chrono::{Datelike, Local};
    let year = Local::now().year();
    let kind = FieldKind::Date(DateOptions::default().with_format(DateFormat::LongDate2));
    let rendered = kind.format(&Value::Date(ymd(year, 2, 1))).unwrap();
    assert!(rendered.ends_with("February 1"), "{rendered}");
}

// dateTime

#[test]
fn date_time_parse_keeps_time() {
    let kind = FieldKind::date_time();
    let expected = ymd(2017, 1, 1).and_hms_opt(3, 0, 0).unwrap();
    assert_eq!(kind.parse("2017-01-01 03:00:00 am", None).into_value(), Some(Value::DateTime(expected)));
    assert!(!kind.parse("blah", None).is_success());
    let min = FieldKind::DateTime(DateTimeOptions::default().with_min_value("2012-01-01").unwrap());
    assert!(!min.parse("2011-01-01", None).is_success());
    let max = FieldKind::DateTime(DateTimeOptions::default().with_max_value("1/1/2012").unwrap());
    assert!(max.parse("2011-01-01", None).is_success());
}

#[test]
fn date_time_format_variants() {
    let with = |format| FieldKind::DateTime(DateTimeOptions::default().with_format(format));
    let text = "2017-01-01 03:00:00 am";
    assert_eq!(fmt(FieldKind::date_time(), text), "01/01/2017 03:00:00 am");
    assert_eq!(fmt(with(DateTimeFormat::DateTime), text), "01 January 2017 3:00 am");
    assert_eq!(fmt(with(DateTimeFormat::LongDateTime), text), "Sunday, January 1, 2017 3:00 am");
    assert_eq!(fmt(with(DateTimeFormat::LongTime), text), "03:00:00 am");
    assert_eq!(fmt(with(DateTimeFormat::ShortTime), text), "3:00 am");
    assert_eq!(fmt(with(DateTimeFormat::TinyDate), text), "1/1/17");
    assert_eq!(fmt(with(DateTimeFormat::TinyDateTime), text), "1/1/17 3:00 am");
}

// monthAndDay

#[test]
fn month_and_day() {
    let kind = FieldKind::month_and_day();
    assert_eq!(kind.parse("12/31", None).into_value(), Some(Value::MonthDay(ymd(2000, 12, 31))));
    assert_eq!(kind.parse("03-02", None).into_value(), Some(Value::MonthDay(ymd(2000, 3, 2))));
    for text in ["1ab", "31/12", "12/40", "12/31 3:00 pm", "00/00", "04/31"] {
        assert!(!kind.parse(text, None).is_success(), "{text}");
    }
    assert_eq!(fmt(FieldKind::month_and_day(), "1/1/2017"), "01/01");
    assert_eq!(fmt(FieldKind::month_and_day(), "2017-03-02"), "03/02");
}

// time

#[test]
fn time_parse() {
    let kind = FieldKind::time();
    let at = |h, m, s| Some(Value::Time(NaiveTime::from_hms_opt(h, m, s).unwrap()));
    assert_eq!(kind.parse("3:00 pm", None).into_value(), at(15, 0, 0));
    assert_eq!(kind.parse("2012-01-01 3:11:01 pm", None).into_value(), at(15, 11, 1));
    assert!(!kind.parse("1ab", None).is_success());
    assert!(!kind.parse("blah", None).is_success());

    let min = |text| FieldKind::Time(TimeOptions::default().with_min_value(text).unwrap());
    assert!(!min("5:00:00 pm").parse("2012-01-01 3:11:01 pm", None).is_success());
    assert!(min("1:00:00 am").parse("2012-01-01 3:11:01 pm", None).is_success());
    let max = |text| FieldKind::Time(TimeOptions::default().with_max_value(text).unwrap());
    assert!(!max("1:00:00 am").parse("2012-01-01 3:11:01 pm", None).is_success());
    assert!(max("5:00:00 pm").parse("2012-01-01 3:11:01 pm", None).is_success());
}

#[test]
fn time_format_variants() {
    assert_eq!(fmt(FieldKind::time(), "1/1/2017"), "12:00:00 am");
    assert_eq!(fmt(FieldKind::time(), "2017-01-01 03:00"), "03:00:00 am");
    let short = FieldKind::Time(TimeOptions::default().with_format(TimeFormat::ShortTime));
    assert_eq!(fmt(short, "2017-01-01 17:00"), "5:00 pm");
    let pattern = FieldKind::Time(TimeOptions {
        format: Some(TimeFormat::Pattern),
        pattern: Some("hh a".into()),
        ..TimeOptions::default()
    });
    assert_eq!(fmt(pattern, "2017-01-01 17:00"), "05 pm");
}

#[test]
fn default_temporal_output_keeps_seconds() {
    let date_time = FieldKind::date_time();
    let parsed = date_time.parse("2017-01-01 00:00:01", None).into_value().unwrap();
    let shown = date_time.format(&parsed).unwrap();
    assert_eq!(shown, "01/01/2017 12:00:01 am");
    assert_eq!(date_time.parse(&shown, None).into_value(), Some(parsed));
    let short = FieldKind::DateTime(DateTimeOptions::default().with_format(DateTimeFormat::ShortTime));
    assert_eq!(fmt(short, "2017-01-01 00:00:01"), "12:00 am");

    let time = FieldKind::time();
    let parsed = time.parse("00:00:01", None).into_value().unwrap();
    let shown = time.format(&parsed).unwrap();
    assert_eq!(shown, "12:00:01 am");
    assert_eq!(time.parse(&shown, None).into_value(), Some(parsed));
}

// configuration errors

#[test]
fn unknown_variants_are_config_errors() {
    let err = "*".parse::<DateFormat>().unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"unknown date format variant '*'");

    let err = serde_json::from_str::<FieldKind>(r#"{"kind":"money","format":"c9"}"#).unwrap_err();
    assert!(err.to_string().contains("unknown money format variant 'c9'"), "{err}");
}

#[test]
fn pattern_variant_requires_pattern() {
    let kind = FieldKind::Integer(IntegerOptions::default().with_format(IntegerFormat::Pattern));
    let err = kind.format(&Value::Integer(1)).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"integer format 'pattern' requires a 'pattern' option");
}

#[test]
fn rendered_variants_snapshot() {
    let value = Value::text("2017-03-02 15:04:05");
    let lines: Vec<String> = [
        DateTimeFormat::DateTime,
        DateTimeFormat::LongDate,
        DateTimeFormat::ShortDate,
        DateTimeFormat::ShorterDate,
        DateTimeFormat::TinyDateTime,
    ]
    .into_iter()
    .map(|format| {
        let kind = FieldKind::DateTime(DateTimeOptions::default().with_format(format));
        format!("{format}: {}", kind.format(&value).unwrap())
    })
    .collect();
    insta::assert_snapshot!(lines.join("\n"), @r"
    dateTime: 02 March 2017 3:04 pm
    longDate: Thursday, March 2, 2017
    shortDate: 2-Mar-2017
    shorterDate: Mar 2 2017
    tinyDateTime: 3/2/17 3:04 pm
    ");
}

// parse(format(parse(text))) == parse(text)

proptest! {
    #[test]
    fn integer_canonicalizes(n in -1_000_000_000_i64..1_000_000_000) {
        let kind = FieldKind::Integer(IntegerOptions::default().with_format(IntegerFormat::Comma));
        let parsed = kind.parse(&n.to_string(), None).into_value().unwrap();
        let shown = kind.format(&parsed).unwrap();
        prop_assert_eq!(kind.parse(&shown, None).into_value(), Some(parsed));
    }

    #[test]
    fn money_canonicalizes(cents in 0_i64..10_000_000_000) {
        let kind = FieldKind::money();
        let text = Decimal::new(cents, 2).to_string();
        let parsed = kind.parse(&text, None).into_value().unwrap();
        let shown = kind.format(&parsed).unwrap();
        prop_assert_eq!(kind.parse(&shown, None).into_value(), Some(parsed));
    }

    #[test]
    fn boolean_canonicalizes(flag in any::<bool>(), spelling in 0_usize..3) {
        let kind = FieldKind::boolean();
        let text = match (flag, spelling) {
            (true, 0) => "y",
            (true, 1) => "ON",
            (true, _) => "1",
            (false, 0) => "n",
            (false, 1) => "Off",
            (false, _) => "0",
        };
        let parsed = kind.parse(text, None).into_value().unwrap();
        let shown = kind.format(&parsed).unwrap();
        prop_assert_eq!(kind.parse(&shown, None).into_value(), Some(parsed));
    }

    #[test]
    fn decimal_canonicalizes(units in -1_000_000_000_000_i64..1_000_000_000_000) {
        let kind = FieldKind::decimal();
        let text = Decimal::new(units, 4).to_string();
        let parsed = kind.parse(&text, None).into_value().unwrap();
        let shown = kind.format(&parsed).unwrap();
        prop_assert_eq!(kind.parse(&shown, None).into_value(), Some(parsed));
    }

    #[test]
    fn real_canonicalizes(hundredths in -1_000_000_000_i64..1_000_000_000) {
        let kind = FieldKind::real();
        let text = Decimal::new(hundredths, 2).to_string();
        let parsed = kind.parse(&text, None).into_value().unwrap();
        let shown = kind.format(&parsed).unwrap();
        prop_assert_eq!(kind.parse(&shown, None).into_value(), Some(parsed));
    }

    #[test]
    fn percent_canonicalizes(basis_points in -1_000_000_i64..1_000_000) {
        let kind = FieldKind::percent();
        let text = format!("{}%", Decimal::new(basis_points, 2));
        let parsed = kind.parse(&text, None).into_value().unwrap();
        let shown = kind.format(&parsed).unwrap();
        prop_assert_eq!(kind.parse(&shown, None).into_value(), Some(parsed));
    }

    #[test]
    fn date_time_canonicalizes(days in 0_i64..2_900_000, seconds in 0_u32..86_400) {
        let kind = FieldKind::date_time();
        let date = ymd(1753, 1, 1) + chrono::Days::new(days as u64);
        let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0).unwrap();
        let text = date.and_time(time).format("%Y-%m-%d %H:%M:%S").to_string();
        let parsed = kind.parse(&text, None).into_value().unwrap();
        let shown = kind.format(&parsed).unwrap();
        prop_assert_eq!(kind.parse(&shown, None).into_value(), Some(parsed));
    }

    #[test]
    fn time_canonicalizes(seconds in 0_u32..86_400) {
        let kind = FieldKind::time();
        let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0).unwrap();
        let parsed = kind.parse(&time.format("%H:%M:%S").to_string(), None).into_value().unwrap();
        let shown = kind.format(&parsed).unwrap();
        prop_assert_eq!(kind.parse(&shown, None).into_value(), Some(parsed));
    }

    #[test]
    fn month_and_day_canonicalizes(ordinal in 1_u32..=366) {
        let kind = FieldKind::month_and_day();
        let day = NaiveDate::from_yo_opt(2000, ordinal).unwrap();
        let parsed = kind.parse(&day.format("%m/%d").to_string(), None).into_value().unwrap();
        let shown = kind.format(&parsed).unwrap();
        prop_assert_eq!(kind.parse(&shown, None).into_value(), Some(parsed));
    }

    #[test]
    fn date_canonicalizes(days in 0_i64..2_900_000) {
        let kind = FieldKind::date();
        let date = ymd(1753, 1, 1) + chrono::Days::new(days as u64);
        let parsed = kind.parse(&date.format("%m/%d/%Y").to_string(), None).into_value().unwrap();
        let shown = kind.format(&parsed).unwrap();
        prop_assert_eq!(kind.parse(&shown, None).into_value(), Some(parsed));
    }
}
