use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{checked_sum, in_month, percent_of, round_half_up, total_amount, MonthKey};
use crate::models::{Category, Expense};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySpend {
    pub category: Category,
    pub amount: Decimal,
    /// Share of `CategoryBreakdown::total_spent`, rounded.
    pub percentage: i64,
}

/// Month-to-date spend per category, largest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBreakdown {
    pub entries: Vec<CategorySpend>,
    /// Sum of the category amounts. Orphaned expenses are not included.
    pub total_spent: Decimal,
    /// Month-to-date spend whose category no longer exists.
    pub unassigned: Decimal,
}

impl CategoryBreakdown {
    /// Dashboard preview rows.
    pub fn top(&self, n: usize) -> &[CategorySpend] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Every month-to-date expense, matched or not.
    pub fn all_expenses_total(&self) -> Decimal {
        checked_sum([self.total_spent, self.unassigned])
    }
}

pub fn category_breakdown(
    categories: &[Category],
    expenses: &[Expense],
    today: NaiveDate,
) -> CategoryBreakdown {
    let this_month = in_month(expenses, MonthKey::of(today));

    let amounts: Vec<Decimal> = categories
        .iter()
        .map(|cat| total_amount(this_month.iter().copied().filter(|e| e.belongs_to(&cat.id))))
        .collect();
    let total_spent = checked_sum(amounts.iter().copied());

    let unassigned = total_amount(
        this_month
            .iter()
            .copied()
            .filter(|e| Category::find_by_id(categories, &e.category_id).is_none()),
    );

    let mut entries: Vec<CategorySpend> = categories
        .iter()
        .zip(amounts)
        .map(|(cat, amount)| CategorySpend {
            category: cat.clone(),
            amount,
            percentage: round_half_up(percent_of(amount, total_spent)),
        })
        .collect();
    // sort_by is stable: equal amounts keep input order.
    entries.sort_by(|a, b| b.amount.cmp(&a.amount));

    tracing::debug!(
        categories = entries.len(),
        %total_spent,
        %unassigned,
        "computed category breakdown"
    );

    CategoryBreakdown {
        entries,
        total_spent,
        unassigned,
    }
}
