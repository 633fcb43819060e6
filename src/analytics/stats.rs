use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;

use super::{in_month, percent_of, round_half_up, total_amount, MonthKey};
use crate::models::{Category, Expense};

/// Label used when no day has positive spend.
pub const NO_TOP_DAY: &str = "N/A";

const WEEKDAYS: [(Weekday, &str); 7] = [
    (Weekday::Sun, "S"),
    (Weekday::Mon, "M"),
    (Weekday::Tue, "T"),
    (Weekday::Wed, "W"),
    (Weekday::Thu, "T"),
    (Weekday::Fri, "F"),
    (Weekday::Sat, "S"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayAverage {
    pub weekday: Weekday,
    /// Single-letter label, Sunday first.
    pub day: &'static str,
    /// Mean amount per expense record on this weekday.
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdditionalStats {
    pub average_daily_spend: Decimal,
    /// Short weekday and day of month (`"Fri 16"`), or [`NO_TOP_DAY`].
    pub top_spending_day: String,
    pub top_spending_date: Option<NaiveDate>,
    pub top_spending_day_amount: Decimal,
    pub budget_adherence: i64,
    pub overspent_categories: usize,
    pub weekly_pattern: [DayAverage; 7],
}

pub fn additional_stats(
    categories: &[Category],
    expenses: &[Expense],
    today: NaiveDate,
) -> AdditionalStats {
    let this_month = in_month(expenses, MonthKey::of(today));
    let total = total_amount(this_month.iter().copied());

    let days_elapsed = Decimal::from(today.day());
    let average_daily_spend = if days_elapsed.is_zero() {
        Decimal::ZERO
    } else {
        total / days_elapsed
    };

    let (top_spending_date, top_spending_day_amount) = top_spending_day(&this_month);
    let top_spending_day = top_spending_date
        .map(|d| d.format("%a %-d").to_string())
        .unwrap_or_else(|| NO_TOP_DAY.to_string());

    let overspent_categories = categories
        .iter()
        .filter(|cat| {
            let spent = total_amount(this_month.iter().copied().filter(|e| e.belongs_to(&cat.id)));
            spent > cat.monthly_budget
        })
        .count();
    let budget_adherence = if categories.is_empty() {
        100
    } else {
        let on_budget = categories.len() - overspent_categories;
        round_half_up(percent_of(
            Decimal::from(on_budget as u64),
            Decimal::from(categories.len() as u64),
        ))
    };

    AdditionalStats {
        average_daily_spend,
        top_spending_day,
        top_spending_date,
        top_spending_day_amount,
        budget_adherence,
        overspent_categories,
        weekly_pattern: weekly_pattern(&this_month),
    }
}

/// Date with the strictly greatest total, first seen winning ties.
fn top_spending_day(expenses: &[&Expense]) -> (Option<NaiveDate>, Decimal) {
    let mut days: Vec<NaiveDate> = Vec::new();
    for exp in expenses {
        if !days.contains(&exp.date) {
            days.push(exp.date);
        }
    }

    let mut top = (None, Decimal::ZERO);
    for date in days {
        let sum = total_amount(expenses.iter().copied().filter(|e| e.date == date));
        if sum > top.1 {
            top = (Some(date), sum);
        }
    }
    top
}

fn weekly_pattern(expenses: &[&Expense]) -> [DayAverage; 7] {
    std::array::from_fn(|i| {
        let (weekday, day) = WEEKDAYS[i];
        let matching: Vec<&Expense> = expenses
            .iter()
            .copied()
            .filter(|e| e.date.weekday() == weekday)
            .collect();
        let amount = if matching.is_empty() {
            Decimal::ZERO
        } else {
            total_amount(matching.iter().copied()) / Decimal::from(matching.len() as u64)
        };
        DayAverage {
            weekday,
            day,
            amount,
        }
    })
}
