//! Everything the dashboard and categories views show, computed in one pass
//! over a snapshot of the store, plus a wrapper that recomputes on change.

use anyhow::Result;
use chrono::NaiveDate;
use std::sync::mpsc::Receiver;

use crate::analytics::{
    additional_stats, balance_summary, category_breakdown, category_summary, spending_overview,
    AdditionalStats, BalanceSummary, CategoryBreakdown, CategorySummary, SpendingOverview,
};
use crate::db::{Database, StoreChange};
use crate::models::{Category, Expense};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub today: NaiveDate,
    pub balance: BalanceSummary,
    pub spending: SpendingOverview,
    pub breakdown: CategoryBreakdown,
    pub stats: AdditionalStats,
    pub summary: CategorySummary,
}

impl Dashboard {
    pub fn compute(categories: &[Category], expenses: &[Expense], today: NaiveDate) -> Self {
        Self {
            today,
            balance: balance_summary(categories, expenses, today),
            spending: spending_overview(categories, expenses, today),
            breakdown: category_breakdown(categories, expenses, today),
            stats: additional_stats(categories, expenses, today),
            summary: category_summary(categories, expenses),
        }
    }

    pub fn load(db: &Database, today: NaiveDate) -> Result<Self> {
        let categories = db.get_categories()?;
        let expenses = db.get_expenses()?;
        tracing::debug!(
            categories = categories.len(),
            expenses = expenses.len(),
            %today,
            "computing dashboard"
        );
        Ok(Self::compute(&categories, &expenses, today))
    }
}

/// A [`Dashboard`] kept current by store change notifications.
pub struct LiveDashboard {
    changes: Receiver<StoreChange>,
    current: Dashboard,
}

impl LiveDashboard {
    pub fn new(db: &mut Database, today: NaiveDate) -> Result<Self> {
        let changes = db.subscribe();
        let current = Dashboard::load(db, today)?;
        Ok(Self { changes, current })
    }

    pub fn current(&self) -> &Dashboard {
        &self.current
    }

    /// Recompute if any change arrived since the last call, or if the day rolled over.
    /// Returns whether a recompute happened.
    pub fn refresh(&mut self, db: &Database, today: NaiveDate) -> Result<bool> {
        let pending = self.changes.try_iter().count();
        if pending == 0 && today == self.current.today {
            return Ok(false);
        }
        tracing::debug!(pending, "refreshing live dashboard");
        self.current = Dashboard::load(db, today)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests;
