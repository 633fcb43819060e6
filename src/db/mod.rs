//! SQLite-backed record store for categories and expenses.
//!
//! Supports full scans, point lookups, inserts with caller-supplied ids,
//! full-field updates and deletes. Every successful mutation is announced to
//! subscribers so views can recompute their analytics.

mod schema;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use std::sync::mpsc::{channel, Receiver, Sender};

use crate::analytics::{MonthKey, UNCATEGORIZED};
use crate::models::{Category, Expense};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Categories,
    Expenses,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Inserted,
    Updated,
    Deleted,
}

/// Sent to subscribers after a mutation has been committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreChange {
    pub table: Table,
    pub kind: ChangeKind,
    pub id: String,
}

pub struct Database {
    conn: Connection,
    subscribers: Vec<Sender<StoreChange>>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let mut db = Self {
            conn,
            subscribers: Vec::new(),
        };
        db.migrate().context("Database migration failed")?;
        tracing::info!(path = %path.display(), "opened database");
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self {
            conn,
            subscribers: Vec::new(),
        };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            tracing::info!(version = schema::CURRENT_VERSION, "created schema");
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()
            .context("Failed to read schema version")?
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                tracing::info!(from_version, "applying migration");
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Change notification ───────────────────────────────────

    /// Receive a [`StoreChange`] after every committed mutation.
    /// Dropping the receiver unsubscribes.
    pub fn subscribe(&mut self) -> Receiver<StoreChange> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    fn notify(&mut self, table: Table, kind: ChangeKind, id: &str) {
        let change = StoreChange {
            table,
            kind,
            id: id.to_string(),
        };
        let before = self.subscribers.len();
        self.subscribers.retain(|tx| tx.send(change.clone()).is_ok());
        let dropped = before - self.subscribers.len();
        if dropped > 0 {
            tracing::warn!(dropped, "pruned disconnected store subscribers");
        }
        tracing::debug!(?table, ?kind, id, "store changed");
    }

    // ── Categories ────────────────────────────────────────────

    pub fn get_categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, description, monthly_budget, color FROM categories ORDER BY rowid",
        )?;
        let rows = stmt.query_map([], category_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub fn get_category(&self, id: &str) -> Result<Option<Category>> {
        let result = self.conn.query_row(
            "SELECT id, name, description, monthly_budget, color FROM categories WHERE id = ?1",
            params![id],
            category_from_row,
        );
        match result {
            Ok(c) => Ok(Some(c)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn insert_category(&mut self, cat: &Category) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO categories (id, name, description, monthly_budget, color)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    cat.id,
                    cat.name,
                    cat.description,
                    cat.monthly_budget.to_string(),
                    cat.color,
                ],
            )
            .with_context(|| format!("Failed to insert category '{}'", cat.name))?;
        self.notify(Table::Categories, ChangeKind::Inserted, &cat.id);
        Ok(())
    }

    /// Replace every mutable field. Returns `false` if no category has this id.
    pub fn update_category(&mut self, cat: &Category) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE categories SET name = ?1, description = ?2, monthly_budget = ?3, color = ?4
             WHERE id = ?5",
            params![
                cat.name,
                cat.description,
                cat.monthly_budget.to_string(),
                cat.color,
                cat.id,
            ],
        )?;
        if changed > 0 {
            self.notify(Table::Categories, ChangeKind::Updated, &cat.id);
        }
        Ok(changed > 0)
    }

    /// Expenses of the deleted category are left untouched.
    pub fn delete_category(&mut self, id: &str) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM categories WHERE id = ?1", params![id])?;
        if changed > 0 {
            self.notify(Table::Categories, ChangeKind::Deleted, id);
        }
        Ok(changed > 0)
    }

    // ── Expenses ──────────────────────────────────────────────

    pub fn get_expenses(&self) -> Result<Vec<Expense>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, amount, category_id, date, note FROM expenses ORDER BY date DESC, id DESC",
        )?;
        let rows = stmt.query_map([], expense_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub fn get_expense(&self, id: &str) -> Result<Option<Expense>> {
        let result = self.conn.query_row(
            "SELECT id, amount, category_id, date, note FROM expenses WHERE id = ?1",
            params![id],
            expense_from_row,
        );
        match result {
            Ok(e) => Ok(Some(e)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn insert_expense(&mut self, exp: &Expense) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO expenses (id, amount, category_id, date, note)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    exp.id,
                    exp.amount.to_string(),
                    exp.category_id,
                    exp.date.format(DATE_FORMAT).to_string(),
                    exp.note,
                ],
            )
            .context("Failed to insert expense")?;
        self.notify(Table::Expenses, ChangeKind::Inserted, &exp.id);
        Ok(())
    }

    pub fn update_expense(&mut self, exp: &Expense) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE expenses SET amount = ?1, category_id = ?2, date = ?3, note = ?4 WHERE id = ?5",
            params![
                exp.amount.to_string(),
                exp.category_id,
                exp.date.format(DATE_FORMAT).to_string(),
                exp.note,
                exp.id,
            ],
        )?;
        if changed > 0 {
            self.notify(Table::Expenses, ChangeKind::Updated, &exp.id);
        }
        Ok(changed > 0)
    }

    pub fn delete_expense(&mut self, id: &str) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM expenses WHERE id = ?1", params![id])?;
        if changed > 0 {
            self.notify(Table::Expenses, ChangeKind::Deleted, id);
        }
        Ok(changed > 0)
    }

    // ── Export ────────────────────────────────────────────────

    /// Write expenses as CSV, newest first. Returns the number of rows written.
    pub fn export_to_csv(&self, path: &Path, month: Option<MonthKey>) -> Result<usize> {
        let categories = self.get_categories()?;
        let expenses: Vec<Expense> = self
            .get_expenses()?
            .into_iter()
            .filter(|e| month.map_or(true, |m| m.contains(e.date)))
            .collect();

        let mut wtr = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
        wtr.write_record(["id", "date", "amount", "category", "note"])?;
        for exp in &expenses {
            let category = Category::find_by_id(&categories, &exp.category_id)
                .map(|c| c.name.as_str())
                .unwrap_or(UNCATEGORIZED);
            let date = exp.date.format(DATE_FORMAT).to_string();
            let amount = exp.amount.to_string();
            wtr.write_record([
                exp.id.as_str(),
                date.as_str(),
                amount.as_str(),
                category,
                exp.note.as_str(),
            ])?;
        }
        wtr.flush().context("Failed to write CSV file")?;
        tracing::debug!(rows = expenses.len(), path = %path.display(), "exported expenses");
        Ok(expenses.len())
    }
}

fn parse_stored_decimal(raw: &str) -> Decimal {
    Decimal::from_str(raw).unwrap_or_else(|_| {
        tracing::warn!(raw, "unparseable stored amount, treating as zero");
        Decimal::ZERO
    })
}

fn category_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Category> {
    let budget: String = row.get(3)?;
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        monthly_budget: parse_stored_decimal(&budget),
        color: row.get(4)?,
    })
}

fn expense_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Expense> {
    let amount: String = row.get(1)?;
    let date: String = row.get(3)?;
    let date = NaiveDate::parse_from_str(&date, DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Expense {
        id: row.get(0)?,
        amount: parse_stored_decimal(&amount),
        category_id: row.get(2)?,
        date,
        note: row.get(4)?,
    })
}
