use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{checked_diff, in_month, percent_change, percent_of, total_amount, total_budget, MonthKey};
use crate::models::{Category, Expense};

/// This month against last month. Percentages are unrounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceSummary {
    pub current_balance: Decimal,
    /// Percent change of the balance relative to last month.
    pub balance_change: Decimal,
    /// Total spent this month.
    pub total_expenses: Decimal,
    pub expenses_change: Decimal,
    pub savings_rate: Decimal,
    /// Percentage points, this month minus last month.
    pub savings_rate_change: Decimal,
}

pub fn balance_summary(
    categories: &[Category],
    expenses: &[Expense],
    today: NaiveDate,
) -> BalanceSummary {
    let this_month = MonthKey::of(today);
    let last_month = this_month.previous();

    let budget = total_budget(categories);
    let this_expenses = total_amount(in_month(expenses, this_month));
    let last_expenses = total_amount(in_month(expenses, last_month));

    let this_balance = checked_diff(budget, this_expenses);
    let last_balance = checked_diff(budget, last_expenses);

    // Both months are measured against the same static budget.
    let savings_rate = percent_of(this_balance, budget);
    let last_savings_rate = percent_of(last_balance, budget);

    BalanceSummary {
        current_balance: this_balance,
        balance_change: percent_change(last_balance, this_balance),
        total_expenses: this_expenses,
        expenses_change: percent_change(last_expenses, this_expenses),
        savings_rate,
        savings_rate_change: checked_diff(savings_rate, last_savings_rate),
    }
}
