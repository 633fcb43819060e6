use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use super::{
    checked_diff, days_left_in_month, in_month, percent_of, round_half_up, total_amount, total_budget, MonthKey,
};
use crate::models::{Category, Expense};

/// Number of fixed week-of-month slots. Days 29..=31 land in the fifth.
pub const WEEK_SLOTS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekSpend {
    /// 1..=5
    pub week: u32,
    pub amount: Decimal,
    /// Flat quarter of the monthly budget, identical for every slot.
    pub projected: Decimal,
}

impl WeekSpend {
    pub fn label(&self) -> String {
        format!("Week {}", self.week)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpendingOverview {
    pub spent: Decimal,
    pub budget: Decimal,
    pub remaining: Decimal,
    pub days_left: u32,
    pub percentage_used: i64,
    pub weekly_breakdown: [WeekSpend; WEEK_SLOTS],
}

/// Slot for a day of month: `ceil(day / 7)`.
pub(crate) fn week_slot(date: NaiveDate) -> usize {
    date.day().div_ceil(7) as usize
}

pub fn spending_overview(
    categories: &[Category],
    expenses: &[Expense],
    today: NaiveDate,
) -> SpendingOverview {
    let this_month = in_month(expenses, MonthKey::of(today));
    let spent = total_amount(this_month.iter().copied());
    let budget = total_budget(categories);

    let projected = budget / Decimal::from(4);
    let weekly_breakdown = std::array::from_fn(|i| WeekSpend {
        week: i as u32 + 1,
        amount: total_amount(
            this_month
                .iter()
                .copied()
                .filter(|e| week_slot(e.date).clamp(1, WEEK_SLOTS) == i + 1),
        ),
        projected,
    });

    SpendingOverview {
        spent,
        budget,
        remaining: checked_diff(budget, spent),
        days_left: days_left_in_month(today),
        percentage_used: round_half_up(percent_of(spent, budget)),
        weekly_breakdown,
    }
}
