//! Moment-style display templates.
//!
//! Supported tokens: `YYYY YY MMMM MMM MM M DD D dddd ddd HH H hh h mm m ss s A a`.
//! Text inside `[...]` is copied verbatim; any other character is literal.

use chrono::{Datelike, NaiveDateTime, Timelike};

/// Longest tokens first so `MMMM` wins over `MM`.
const TOKENS: [&str; 20] = [
    "YYYY", "YY", "MMMM", "MMM", "MM", "M", "DD", "D", "dddd", "ddd", "HH", "H", "hh", "h", "mm",
    "m", "ss", "s", "A", "a",
];

/// Render `value` through a moment-style template.
pub fn render(template: &str, value: &NaiveDateTime) -> String {
    let mut out = String::with_capacity(template.len() + 8);
    let mut rest = template;
    while let Some(ch) = rest.chars().next() {
        if ch == '['
            && let Some(end) = rest.find(']')
        {
            out.push_str(&rest[1..end]);
            rest = &rest[end + 1..];
            continue;
        }
        if let Some(token) = TOKENS.iter().find(|token| rest.starts_with(**token)) {
            push_token(&mut out, token, value);
            rest = &rest[token.len()..];
            continue;
        }
        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }
    out
}

fn push_token(out: &mut String, token: &str, value: &NaiveDateTime) {
    let (is_pm, hour12) = value.hour12();
    let text = match token {
        "YYYY" => format!("{:04}", value.year()),
        "YY" => format!("{:02}", value.year().rem_euclid(100)),
        "MMMM" => value.format("%B").to_string(),
        "MMM" => value.format("%b").to_string(),
        "MM" => format!("{:02}", value.month()),
        "M" => value.month().to_string(),
        "DD" => format!("{:02}", value.day()),
        "D" => value.day().to_string(),
        "dddd" => value.format("%A").to_string(),
        "ddd" => value.format("%a").to_string(),
        "HH" => format!("{:02}", value.hour()),
        "H" => value.hour().to_string(),
        "hh" => format!("{hour12:02}"),
        "h" => hour12.to_string(),
        "mm" => format!("{:02}", value.minute()),
        "m" => value.minute().to_string(),
        "ss" => format!("{:02}", value.second()),
        "s" => value.second().to_string(),
        "A" => if is_pm { "PM" } else { "AM" }.to_string(),
        "a" => if is_pm { "pm" } else { "am" }.to_string(),
        _ => token.to_string(),
    };
    out.push_str(&text);
}
