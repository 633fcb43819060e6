use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// US dollar formatting: `1234567.891` → `"$1,234,567.89"`, negatives as `"-$42.50"`.
pub fn currency(val: Decimal) -> String {
    let cents = val.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let digits = format!("{:.2}", cents.abs());
    let (whole, frac) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if cents < Decimal::ZERO { "-" } else { "" };
    format!("{sign}${grouped}.{frac}")
}

/// Signed percentage with one decimal: `12.345` → `"+12.3%"`.
pub fn signed_percent(val: Decimal) -> String {
    let rounded = val.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        "0.0%".to_string()
    } else if rounded > Decimal::ZERO {
        format!("+{rounded:.1}%")
    } else {
        format!("{rounded:.1}%")
    }
}

/// `"May 3, 2024"`
pub fn long_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Cut to `max` characters, marking the cut with "…".
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(1)).collect();
    if max == 0 {
        kept
    } else {
        format!("{kept}…")
    }
}

/// Fixed-width text bar for a 0..=100 percentage.
pub fn bar(percent: i64, width: usize) -> String {
    let filled = (percent.clamp(0, 100) as usize * width).div_ceil(100).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests;
