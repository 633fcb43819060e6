//! Field checks applied to category and expense input before it reaches the store.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

use crate::models::{Category, Expense};

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 50;
pub const DESCRIPTION_MAX_CHARS: usize = 200;
pub const NOTE_MAX_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name must be at least 2 characters")]
    NameTooShort,
    #[error("Name cannot exceed 50 characters")]
    NameTooLong,
    #[error("Description cannot exceed 200 characters")]
    DescriptionTooLong,
    #[error("Please enter a valid positive number")]
    InvalidBudget,
    #[error("Please select a color")]
    MissingColor,
    #[error("Please enter a valid positive amount")]
    InvalidAmount,
    #[error("Please select a category")]
    MissingCategory,
    #[error("Please select a date")]
    MissingDate,
    #[error("Note cannot exceed 500 characters")]
    NoteTooLong,
}

/// Every field that failed, in form order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormErrors(pub Vec<ValidationError>);

impl FormErrors {
    pub fn contains(&self, err: &ValidationError) -> bool {
        self.0.contains(err)
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for FormErrors {}

fn positive_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw.trim())
        .ok()
        .filter(|v| *v > Decimal::ZERO)
}

#[derive(Debug, Clone, Default)]
pub struct CategoryForm {
    pub name: String,
    pub description: String,
    pub monthly_budget: String,
    pub color: String,
}

impl CategoryForm {
    pub fn from_category(cat: &Category) -> Self {
        Self {
            name: cat.name.clone(),
            description: cat.description.clone(),
            monthly_budget: cat.monthly_budget.to_string(),
            color: cat.color.clone(),
        }
    }

    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let name_len = self.name.trim().chars().count();
        if name_len < NAME_MIN_CHARS {
            errors.push(ValidationError::NameTooShort);
        } else if name_len > NAME_MAX_CHARS {
            errors.push(ValidationError::NameTooLong);
        }
        if self.description.chars().count() > DESCRIPTION_MAX_CHARS {
            errors.push(ValidationError::DescriptionTooLong);
        }
        if positive_decimal(&self.monthly_budget).is_none() {
            errors.push(ValidationError::InvalidBudget);
        }
        if self.color.trim().is_empty() {
            errors.push(ValidationError::MissingColor);
        }
        errors
    }

    /// Build a category, reusing `id` when editing an existing record.
    pub fn into_category(self, id: Option<String>) -> Result<Category, FormErrors> {
        let errors = self.validate();
        let budget = match positive_decimal(&self.monthly_budget) {
            Some(b) if errors.is_empty() => b,
            _ => return Err(FormErrors(errors)),
        };
        let mut cat = Category::new(
            self.name.trim().to_string(),
            self.description,
            budget,
            self.color.trim().to_string(),
        );
        if let Some(id) = id {
            cat.id = id;
        }
        Ok(cat)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExpenseForm {
    pub amount: String,
    pub category_id: String,
    pub date: Option<NaiveDate>,
    pub note: String,
}

impl ExpenseForm {
    pub fn from_expense(exp: &Expense) -> Self {
        Self {
            amount: exp.amount.to_string(),
            category_id: exp.category_id.clone(),
            date: Some(exp.date),
            note: exp.note.clone(),
        }
    }

    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if positive_decimal(&self.amount).is_none() {
            errors.push(ValidationError::InvalidAmount);
        }
        if self.category_id.trim().is_empty() {
            errors.push(ValidationError::MissingCategory);
        }
        if self.date.is_none() {
            errors.push(ValidationError::MissingDate);
        }
        if self.note.chars().count() > NOTE_MAX_CHARS {
            errors.push(ValidationError::NoteTooLong);
        }
        errors
    }

    pub fn into_expense(self, id: Option<String>) -> Result<Expense, FormErrors> {
        let errors = self.validate();
        let (amount, date) = match (positive_decimal(&self.amount), self.date) {
            (Some(amount), Some(date)) if errors.is_empty() => (amount, date),
            _ => return Err(FormErrors(errors)),
        };
        let mut exp = Expense::new(amount, self.category_id.trim().to_string(), date, self.note);
        if let Some(id) = id {
            exp.id = id;
        }
        Ok(exp)
    }
}

#[cfg(test)]
mod tests;
