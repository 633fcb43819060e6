mod category;
mod expense;

pub use category::{resolve_color, Category, COLOR_OPTIONS, DEFAULT_COLOR};
pub use expense::Expense;
