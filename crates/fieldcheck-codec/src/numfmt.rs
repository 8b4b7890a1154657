//! Invariant-culture number rendering.
//!
//! Group separator is always `,`, decimal point always `.`. Display rounding is
//! midpoint away from zero; parse-side rounding lives with the codecs.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

const BYTE_UNITS: [&str; 6] = ["KB", "MB", "GB", "TB", "PB", "EB"];

/// Largest scale a `Decimal` can carry.
const MAX_PLACES: u32 = 28;

/// Convert through the shortest round-trip text so `22.12_f64` becomes exactly `22.12`.
pub(crate) fn real_to_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_str(&value.to_string()).ok()
}

/// Fixed number of decimal places, optionally grouped.
pub(crate) fn fixed(value: Decimal, places: u32, group: bool) -> String {
    let places = places.min(MAX_PLACES);
    let rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((&text, ""));
    let mut frac = frac_part.to_string();
    while frac.len() < places as usize {
        frac.push('0');
    }
    assemble(rounded.is_sign_negative() && !rounded.is_zero(), int_part, &frac, group)
}

/// Fixed places for a real; values too large for `Decimal` use float formatting.
pub(crate) fn fixed_real(value: f64, places: u32, group: bool) -> String {
    match real_to_decimal(value) {
        Some(decimal) => fixed(decimal, places, group),
        None => {
            let text = format!("{:.*}", places as usize, value.abs());
            let (int_part, frac_part) = text.split_once('.').unwrap_or((&text, ""));
            assemble(value < 0.0, int_part, frac_part, group)
        }
    }
}

/// Grouped, at most four places, trailing zeros dropped (`#,#.####`).
pub(crate) fn comma(value: Decimal) -> String {
    NumberTemplate::Custom {
        group: true,
        min_int: 1,
        min_frac: 0,
        max_frac: 4,
    }
    .render(value)
}

/// Shortest plain rendering, used when a pattern is not understood.
pub(crate) fn plain(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Byte-size rendering with 1024-based units.
pub(crate) fn byte_size(value: i64) -> String {
    let digits = value.unsigned_abs().to_string().len();
    let radix = (digits - 1) / 3;
    if radix == 0 {
        return if value == 1 {
            "1 byte".to_string()
        } else {
            format!("{value} bytes")
        };
    }
    let divisor = Decimal::from(1u64 << (10 * radix));
    let scaled = (Decimal::from(value) / divisor).round_dp(2).normalize();
    format!("{scaled} {}", BYTE_UNITS[radix - 1])
}

/// A numeric display template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumberTemplate {
    /// A bare place count such as `"2"`.
    Places(u32),
    /// A `#`/`0` template such as `"#,##0.00"`.
    Custom {
        group: bool,
        min_int: usize,
        min_frac: usize,
        max_frac: u32,
    },
}

impl NumberTemplate {
    /// Read a template; `None` when the text is not one.
    pub(crate) fn parse(pattern: &str) -> Option<Self> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return None;
        }
        if pattern.chars().all(|c| c.is_ascii_digit()) {
            let places = pattern.parse::<u32>().ok()?;
            return (places <= MAX_PLACES).then_some(Self::Places(places));
        }
        let (int_part, frac_part) = pattern.split_once('.').unwrap_or((pattern, ""));
        if !int_part.chars().all(|c| matches!(c, '#' | '0' | ','))
            || !frac_part.chars().all(|c| matches!(c, '#' | '0'))
        {
            return None;
        }
        if !int_part.contains(['#', '0']) && frac_part.is_empty() {
            return None;
        }
        let max_frac = u32::try_from(frac_part.len()).ok()?;
        if max_frac > MAX_PLACES {
            return None;
        }
        Some(Self::Custom {
            group: int_part.contains(','),
            min_int: int_part.chars().filter(|c| *c == '0').count(),
            min_frac: frac_part.chars().filter(|c| *c == '0').count(),
            max_frac,
        })
    }

    /// Render `value`; integers ignore the place count.
    pub(crate) fn render(self, value: Decimal) -> String {
        match self {
            Self::Places(places) => fixed(value, places, false),
            Self::Custom {
                group,
                min_int,
                min_frac,
                max_frac,
            } => {
                let rounded =
                    value.round_dp_with_strategy(max_frac, RoundingStrategy::MidpointAwayFromZero);
                let text = rounded.abs().to_string();
                let (int_part, frac_part) = text.split_once('.').unwrap_or((&text, ""));
                let mut frac = frac_part.trim_end_matches('0').to_string();
                while frac.len() < min_frac {
                    frac.push('0');
                }
                let mut int = if int_part == "0" && min_int == 0 {
                    String::new()
                } else {
                    int_part.to_string()
                };
                while int.len() < min_int {
                    int.insert(0, '0');
                }
                if int.is_empty() && frac.is_empty() {
                    int.push('0');
                }
                assemble(rounded.is_sign_negative() && !rounded.is_zero(), &int, &frac, group)
            }
        }
    }
}

fn assemble(negative: bool, int_part: &str, frac_part: &str, group: bool) -> String {
    let mut out = String::with_capacity(int_part.len() + frac_part.len() + 8);
    if negative {
        out.push('-');
    }
    if group {
        out.push_str(&group_digits(int_part));
    } else {
        out.push_str(int_part);
    }
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Insert `,` between every group of three integer digits.
pub(crate) fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
