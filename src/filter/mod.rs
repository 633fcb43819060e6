use chrono::{Days, Months, NaiveDate};

use crate::models::Expense;

/// Date range choices for the expense list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRange {
    All,
    #[default]
    Month,
    Week,
}

impl DateRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Month => "month",
            Self::Week => "week",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All Time",
            Self::Month => "This Month",
            Self::Week => "This Week",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Some(Self::All),
            "month" => Some(Self::Month),
            "week" => Some(Self::Week),
            _ => None,
        }
    }

    pub fn all() -> &'static [DateRange] {
        &[Self::All, Self::Month, Self::Week]
    }

    /// Earliest date still inside the range, relative to `today`.
    pub fn lower_bound(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::All => None,
            Self::Month => today.checked_sub_months(Months::new(1)),
            Self::Week => today.checked_sub_days(Days::new(7)),
        }
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// `None` shows every category, including orphaned expenses.
    pub category_id: Option<String>,
    pub range: DateRange,
}

impl ExpenseFilter {
    pub fn matches(&self, exp: &Expense, today: NaiveDate) -> bool {
        if let Some(cid) = &self.category_id {
            if !exp.belongs_to(cid) {
                return false;
            }
        }
        match self.range.lower_bound(today) {
            Some(min) => exp.date >= min,
            None => true,
        }
    }

    /// Matching expenses, newest first.
    pub fn apply<'a>(&self, expenses: &'a [Expense], today: NaiveDate) -> Vec<&'a Expense> {
        let mut out: Vec<&Expense> = expenses
            .iter()
            .filter(|e| self.matches(e, today))
            .collect();
        out.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
        out
    }

    pub fn is_default(&self) -> bool {
        self.category_id.is_none() && self.range == DateRange::default()
    }
}
