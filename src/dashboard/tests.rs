#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
}

fn seeded_db() -> (Database, Category) {
    let mut db = Database::open_in_memory().unwrap();
    let cat = Category::new("Food".into(), String::new(), dec!(500), "bg-chart-1".into());
    db.insert_category(&cat).unwrap();
    (db, cat)
}

#[test]
fn test_compute_matches_individual_functions() {
    let cat = Category::new("Food".into(), String::new(), dec!(500), "bg-chart-1".into());
    let exp = Expense::new(dec!(50), cat.id.clone(), today(), String::new());
    let cats = vec![cat];
    let exps = vec![exp];

    let dash = Dashboard::compute(&cats, &exps, today());
    assert_eq!(dash.balance, balance_summary(&cats, &exps, today()));
    assert_eq!(dash.spending.spent, dec!(50));
    assert_eq!(dash.breakdown.entries[0].percentage, 100);
    assert_eq!(dash.stats.top_spending_day_amount, dec!(50));
    assert_eq!(dash.summary.average_utilization, 10);
}

#[test]
fn test_load_reads_store() {
    let (db, _) = seeded_db();
    let dash = Dashboard::load(&db, today()).unwrap();
    assert_eq!(dash.summary.total_categories, 1);
    assert_eq!(dash.spending.budget, dec!(500));
    assert_eq!(dash.spending.spent, Decimal::ZERO);
}

#[test]
fn test_live_dashboard_recomputes_after_change() {
    let (mut db, cat) = seeded_db();
    let mut live = LiveDashboard::new(&mut db, today()).unwrap();
    assert!(!live.refresh(&db, today()).unwrap());

    let exp = Expense::new(dec!(125), cat.id.clone(), today(), String::new());
    db.insert_expense(&exp).unwrap();

    assert!(live.refresh(&db, today()).unwrap());
    assert_eq!(live.current().spending.spent, dec!(125));
    assert_eq!(live.current().spending.percentage_used, 25);
    // Notifications are drained by the refresh.
    assert!(!live.refresh(&db, today()).unwrap());
}

#[test]
fn test_live_dashboard_recomputes_on_new_day() {
    let (mut db, _) = seeded_db();
    let mut live = LiveDashboard::new(&mut db, today()).unwrap();
    let tomorrow = today().succ_opt().unwrap();
    assert!(live.refresh(&db, tomorrow).unwrap());
    assert_eq!(live.current().today, tomorrow);
    assert_eq!(live.current().spending.days_left, 15);
}

#[test]
fn test_deleting_category_moves_spend_to_unassigned() {
    let (mut db, cat) = seeded_db();
    let exp = Expense::new(dec!(40), cat.id.clone(), today(), String::new());
    db.insert_expense(&exp).unwrap();
    let mut live = LiveDashboard::new(&mut db, today()).unwrap();

    db.delete_category(&cat.id).unwrap();
    live.refresh(&db, today()).unwrap();

    let dash = live.current();
    assert!(dash.breakdown.entries.is_empty());
    assert_eq!(dash.breakdown.unassigned, dec!(40));
    assert_eq!(dash.summary.total_spent, dec!(40));
    assert_eq!(dash.balance.total_expenses, dec!(40));
}
