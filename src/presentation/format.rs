//! en-IN formatting for dates and rupee amounts.

use bigdecimal::{BigDecimal, RoundingMode};
use chrono::{DateTime, FixedOffset, Offset, Utc};

pub const CURRENCY_SYMBOL: &str = "₹";

/// India Standard Time, UTC+05:30.
const DISPLAY_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

fn display_offset() -> FixedOffset {
    FixedOffset::east_opt(DISPLAY_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// `5 Mar 2024`, as the date falls in India Standard Time.
pub fn format_date(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&display_offset()).format("%-d %b %Y").to_string()
}

/// Rupee amount with Indian digit grouping and at most two fraction digits,
/// e.g. `₹1,23,456.5`.
pub fn format_inr(amount: &BigDecimal) -> String {
    let rounded = amount.with_scale_round(2, RoundingMode::HalfUp);
    let text = rounded.abs().to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut out = String::from(CURRENCY_SYMBOL);
    if rounded < BigDecimal::from(0) {
        out.insert(0, '-');
    }
    out.push_str(&group_indian(whole));
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Groups the last three digits, then every two: `1234567` -> `12,34,567`.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}
