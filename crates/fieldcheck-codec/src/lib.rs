//! Codec registry for fieldcheck.
//!
//! Each codec pairs a parser (raw text → [`ParseResult`]) with a formatter
//! (value → display text). [`FieldKind`] selects a codec and carries its
//! typed options.
//!
//! - **boolean**: yes/no style flags
//! - **number**: integer, decimal, real, money and percent
//! - **temporal**: date, dateTime, monthAndDay and time
//! - **options**: per-codec option structs and format variants
//! - **datefmt**: moment-style date templates

mod boolean;
pub mod datefmt;
pub mod kind;
mod number;
mod numfmt;
pub mod options;
pub mod outcome;
pub mod temporal;

pub use kind::FieldKind;
pub use number::{NOT_A_NUMBER, NOT_A_PERCENT};
pub use options::{
    BooleanFormat, BooleanOptions, DateFormat, DateOptions, DateTimeFormat, DateTimeOptions,
    DecimalOptions, IntegerFormat, IntegerOptions, MoneyFormat, MoneyOptions, MonthDayFormat,
    MonthDayOptions, NumberFormat, PercentFormat, PercentOptions, RealOptions, TimeFormat,
    TimeOptions,
};
pub use outcome::{ParseOutcome, ParseResult};
pub use temporal::{INVALID_DATE, REFERENCE_YEAR};
