//! Derived figures for the dashboard, categories and expenses views.
//!
//! Every function here is a pure fold over the two record collections and an
//! explicit `today`. None of them can fail: degenerate inputs (no
//! categories, zero budgets, orphaned expenses) resolve to zeros or
//! sentinels.

mod balance;
mod breakdown;
mod spending;
mod stats;
mod summary;
mod utilization;

pub use balance::{balance_summary, BalanceSummary};
pub use breakdown::{category_breakdown, CategoryBreakdown, CategorySpend};
pub use spending::{spending_overview, SpendingOverview, WeekSpend, WEEK_SLOTS};
pub use stats::{additional_stats, AdditionalStats, DayAverage, NO_TOP_DAY};
pub use summary::{category_summary, CategorySummary};
pub use utilization::{
    category_current_spend, category_expense_count, expense_category_name, utilization_percent,
    UtilizationBadge, UNCATEGORIZED,
};

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::{Category, Expense};

/// A calendar month, compared on both year and month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    /// 1..=12
    pub month: u32,
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn last_day(self) -> Option<NaiveDate> {
        self.next().first_day()?.pred_opt()
    }

    /// Parse `"YYYY-MM"`.
    pub fn parse(s: &str) -> Option<Self> {
        let (year, month) = s.trim().split_once('-')?;
        let year: i32 = year.parse().ok()?;
        let month: u32 = month.parse().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { year, month })
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

pub(crate) fn in_month(expenses: &[Expense], month: MonthKey) -> Vec<&Expense> {
    expenses.iter().filter(|e| month.contains(e.date)).collect()
}

/// Sum that resolves to `0` if any partial sum overflows.
pub(crate) fn checked_sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
        .unwrap_or(Decimal::ZERO)
}

/// `a - b`, or `0` on overflow.
pub(crate) fn checked_diff(a: Decimal, b: Decimal) -> Decimal {
    a.checked_sub(b).unwrap_or(Decimal::ZERO)
}

pub(crate) fn total_budget(categories: &[Category]) -> Decimal {
    checked_sum(categories.iter().map(|c| c.monthly_budget))
}

pub(crate) fn total_amount<'a, I>(expenses: I) -> Decimal
where
    I: IntoIterator<Item = &'a Expense>,
{
    checked_sum(expenses.into_iter().map(|e| e.amount))
}

/// `part / whole * 100`, or `None` when the decimal arithmetic cannot represent it.
fn ratio_percent(part: Decimal, whole: Decimal) -> Option<Decimal> {
    part.checked_div(whole)?.checked_mul(Decimal::ONE_HUNDRED)
}

/// Share of a positive whole as a percentage; `0` unless `whole > 0`.
pub(crate) fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole > Decimal::ZERO {
        ratio_percent(part, whole).unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    }
}

/// `(previous - current) / previous * 100`; `0` when `previous` is zero.
pub(crate) fn percent_change(previous: Decimal, current: Decimal) -> Decimal {
    if previous.is_zero() {
        return Decimal::ZERO;
    }
    previous
        .checked_sub(current)
        .and_then(|delta| ratio_percent(delta, previous))
        .unwrap_or(Decimal::ZERO)
}

/// Round half up (toward positive infinity) to a whole number.
pub fn round_half_up(value: Decimal) -> i64 {
    value
        .checked_add(Decimal::new(5, 1))
        .map(|v| v.floor())
        .and_then(|v| v.to_i64())
        .unwrap_or(0)
}

/// Whole days from `today` to the last day of its month.
pub(crate) fn days_left_in_month(today: NaiveDate) -> u32 {
    MonthKey::of(today)
        .last_day()
        .map(|last| last.day().saturating_sub(today.day()))
        .unwrap_or(0)
}
