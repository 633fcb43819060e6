use rust_decimal::Decimal;

use super::{percent_of, round_half_up, total_amount, total_budget};
use crate::models::{Category, Expense};

/// All-time totals for the categories page header.
///
/// Deliberately coarser than [`super::category_breakdown`]: it is not scoped to
/// a month and sums every expense, including ones whose category is gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub total_categories: usize,
    pub total_budget: Decimal,
    pub total_spent: Decimal,
    pub average_utilization: i64,
}

pub fn category_summary(categories: &[Category], expenses: &[Expense]) -> CategorySummary {
    let total_budget = total_budget(categories);
    let total_spent = total_amount(expenses);
    CategorySummary {
        total_categories: categories.len(),
        total_budget,
        total_spent,
        average_utilization: round_half_up(percent_of(total_spent, total_budget)),
    }
}
