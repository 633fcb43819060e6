#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;

fn category_form() -> CategoryForm {
    CategoryForm {
        name: "Groceries".into(),
        description: String::new(),
        monthly_budget: "400".into(),
        color: "bg-chart-2".into(),
    }
}

fn expense_form() -> ExpenseForm {
    ExpenseForm {
        amount: "12.50".into(),
        category_id: "cat-1".into(),
        date: NaiveDate::from_ymd_opt(2024, 5, 3),
        note: String::new(),
    }
}

// ── Category form ─────────────────────────────────────────────

#[test]
fn test_valid_category_form() {
    assert!(category_form().validate().is_empty());
    let cat = category_form().into_category(None).unwrap();
    assert_eq!(cat.name, "Groceries");
    assert_eq!(cat.monthly_budget, dec!(400));
    assert!(!cat.id.is_empty());
}

#[test]
fn test_category_form_keeps_id_on_edit() {
    let cat = category_form().into_category(Some("existing".into())).unwrap();
    assert_eq!(cat.id, "existing");
}

#[test]
fn test_category_name_bounds() {
    let mut form = category_form();
    form.name = "A".into();
    assert_eq!(form.validate(), vec![ValidationError::NameTooShort]);
    form.name = "x".repeat(51);
    assert_eq!(form.validate(), vec![ValidationError::NameTooLong]);
    form.name = "x".repeat(50);
    assert!(form.validate().is_empty());
}

#[test]
fn test_category_budget_must_be_positive_number() {
    for raw in ["", "0", "-5", "abc"] {
        let mut form = category_form();
        form.monthly_budget = raw.into();
        assert_eq!(form.validate(), vec![ValidationError::InvalidBudget], "input {raw:?}");
    }
    let mut form = category_form();
    form.monthly_budget = " 12.75 ".into();
    assert_eq!(form.into_category(None).unwrap().monthly_budget, dec!(12.75));
}

#[test]
fn test_category_form_reports_all_errors() {
    let form = CategoryForm {
        name: String::new(),
        description: "d".repeat(201),
        monthly_budget: "nope".into(),
        color: "  ".into(),
    };
    let err = form.into_category(None).unwrap_err();
    assert_eq!(err.0.len(), 4);
    assert!(err.contains(&ValidationError::NameTooShort));
    assert!(err.contains(&ValidationError::DescriptionTooLong));
    assert!(err.contains(&ValidationError::InvalidBudget));
    assert!(err.contains(&ValidationError::MissingColor));
    assert!(err.to_string().contains("Please select a color"));
}

#[test]
fn test_category_form_roundtrip_from_category() {
    let cat = category_form().into_category(None).unwrap();
    let edited = CategoryForm::from_category(&cat)
        .into_category(Some(cat.id.clone()))
        .unwrap();
    assert_eq!(edited, cat);
}

// ── Expense form ──────────────────────────────────────────────

#[test]
fn test_valid_expense_form() {
    let exp = expense_form().into_expense(None).unwrap();
    assert_eq!(exp.amount, dec!(12.50));
    assert_eq!(exp.category_id, "cat-1");
}

#[test]
fn test_expense_form_reports_all_errors() {
    let form = ExpenseForm {
        amount: "0".into(),
        category_id: String::new(),
        date: None,
        note: "n".repeat(501),
    };
    assert_eq!(
        form.validate(),
        vec![
            ValidationError::InvalidAmount,
            ValidationError::MissingCategory,
            ValidationError::MissingDate,
            ValidationError::NoteTooLong,
        ]
    );
    assert!(form.into_expense(None).is_err());
}

#[test]
fn test_expense_note_limit_counts_chars() {
    let mut form = expense_form();
    form.note = "é".repeat(500);
    assert!(form.validate().is_empty());
}

#[test]
fn test_expense_form_keeps_id_on_edit() {
    let original = expense_form().into_expense(None).unwrap();
    let mut form = ExpenseForm::from_expense(&original);
    form.amount = "99".into();
    let edited = form.into_expense(Some(original.id.clone())).unwrap();
    assert_eq!(edited.id, original.id);
    assert_eq!(edited.amount, dec!(99));
}
