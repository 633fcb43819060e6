use rust_decimal::Decimal;

use super::{percent_of, round_half_up, total_amount};
use crate::models::{Category, Expense};

/// Shown in place of a category name when the category has been deleted.
pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtilizationBadge {
    OnTrack,
    Close,
    Over,
}

impl UtilizationBadge {
    pub fn for_percent(percent: i64) -> Self {
        if percent >= 90 {
            Self::Over
        } else if percent >= 75 {
            Self::Close
        } else {
            Self::OnTrack
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnTrack => "On track",
            Self::Close => "Close",
            Self::Over => "Over",
        }
    }
}

impl std::fmt::Display for UtilizationBadge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// All-time spend recorded against one category.
pub fn category_current_spend(expenses: &[Expense], category_id: &str) -> Decimal {
    total_amount(expenses.iter().filter(|e| e.belongs_to(category_id)))
}

pub fn category_expense_count(expenses: &[Expense], category_id: &str) -> usize {
    expenses.iter().filter(|e| e.belongs_to(category_id)).count()
}

/// Budget used, capped at 100.
pub fn utilization_percent(spend: Decimal, budget: Decimal) -> i64 {
    round_half_up(percent_of(spend, budget)).min(100)
}

pub fn expense_category_name<'a>(categories: &'a [Category], category_id: &str) -> Option<&'a str> {
    Category::find_by_id(categories, category_id).map(|c| c.name.as_str())
}
