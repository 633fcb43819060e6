#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;

// ── currency ──────────────────────────────────────────────────

#[test]
fn test_currency_basic() {
    assert_eq!(currency(dec!(1234.56)), "$1,234.56");
    assert_eq!(currency(dec!(999.99)), "$999.99");
    assert_eq!(currency(dec!(0)), "$0.00");
    assert_eq!(currency(dec!(5)), "$5.00");
}

#[test]
fn test_currency_grouping() {
    assert_eq!(currency(dec!(1234567.89)), "$1,234,567.89");
    assert_eq!(currency(dec!(100000)), "$100,000.00");
}

#[test]
fn test_currency_negative() {
    assert_eq!(currency(dec!(-42.5)), "-$42.50");
    assert_eq!(currency(dec!(-99999.01)), "-$99,999.01");
}

#[test]
fn test_currency_rounds_half_away_from_zero() {
    assert_eq!(currency(dec!(2.345)), "$2.35");
    assert_eq!(currency(dec!(33.333333)), "$33.33");
    assert_eq!(currency(dec!(-0.001)), "$0.00");
}

// ── percentages ───────────────────────────────────────────────

#[test]
fn test_signed_percent() {
    assert_eq!(signed_percent(dec!(12.345)), "+12.3%");
    assert_eq!(signed_percent(dec!(-40)), "-40.0%");
    assert_eq!(signed_percent(dec!(0)), "0.0%");
    assert_eq!(signed_percent(dec!(-0.01)), "0.0%");
}

#[test]
fn test_bar() {
    assert_eq!(bar(0, 4), "░░░░");
    assert_eq!(bar(50, 4), "██░░");
    assert_eq!(bar(100, 4), "████");
    assert_eq!(bar(250, 4), "████");
    assert_eq!(bar(-5, 4), "░░░░");
}

// ── misc ──────────────────────────────────────────────────────

#[test]
fn test_long_date() {
    let d = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();
    assert_eq!(long_date(d), "May 3, 2024");
}

#[test]
fn test_truncate() {
    assert_eq!(truncate("hello", 10), "hello");
    assert_eq!(truncate("hello", 5), "hello");
    assert_eq!(truncate("hello world", 5), "hell…");
    assert_eq!(truncate("hello", 1), "…");
    assert_eq!(truncate("hello", 0), "");
    assert_eq!(truncate("日本語テスト", 4), "日本語…");
}
