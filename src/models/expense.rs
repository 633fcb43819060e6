use chrono::NaiveDate;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    pub id: String,
    pub amount: Decimal,
    /// May point at a category that has since been deleted.
    pub category_id: String,
    pub date: NaiveDate,
    pub note: String,
}

impl Expense {
    pub fn new(amount: Decimal, category_id: String, date: NaiveDate, note: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            amount,
            category_id,
            date,
            note,
        }
    }

    pub fn belongs_to(&self, category_id: &str) -> bool {
        self.category_id == category_id
    }
}
