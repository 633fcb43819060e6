use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::path::Path;

use ledgerly::analytics::{
    category_current_spend, category_expense_count, expense_category_name, utilization_percent,
    MonthKey, UtilizationBadge, UNCATEGORIZED,
};
use ledgerly::dashboard::Dashboard;
use ledgerly::db::Database;
use ledgerly::filter::{DateRange, ExpenseFilter};
use ledgerly::format::{bar, currency, long_date, signed_percent, truncate};
use ledgerly::models::{resolve_color, Category, Expense, DEFAULT_COLOR};
use ledgerly::validate::{CategoryForm, ExpenseForm};

use super::{flag, parse_date, positional, shellexpand, today};

pub(crate) fn as_cli(args: &[String], db: &mut Database) -> Result<()> {
    execute(&args[1..], db, today())
}

/// Run one command. `args[0]` is the command name.
pub(crate) fn execute(args: &[String], db: &mut Database, today: NaiveDate) -> Result<()> {
    let Some(command) = args.first() else {
        return Ok(());
    };
    let rest = &args[1..];
    match command.as_str() {
        "dashboard" | "d" => cli_dashboard(rest, db, today),
        "categories" | "c" => cli_categories(db),
        "expenses" | "e" => cli_expenses(rest, db, today),
        "add-category" => cli_add_category(rest, db),
        "edit-category" => cli_edit_category(rest, db),
        "delete-category" => cli_delete_category(rest, db),
        "add-expense" | "add" => cli_add_expense(rest, db, today),
        "edit-expense" => cli_edit_expense(rest, db),
        "delete-expense" => cli_delete_expense(rest, db),
        "export" => cli_export(rest, db, today),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("ledgerly {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("Ledgerly: monthly category budgets and expenses");
    println!();
    println!("Usage: ledgerly [command]");
    println!();
    println!("Commands:");
    println!("  (none)                          Launch interactive shell");
    println!("  dashboard                       Balance, spending, categories and stats");
    println!("    --date <YYYY-MM-DD>           Compute as of this day (default: today)");
    println!("  categories                      List categories with utilization");
    println!("  expenses                        List expenses, newest first");
    println!("    --category <id|name>          Only this category");
    println!("    --range <all|month|week>      Date range (default: month)");
    println!("  add-category <name>             Create a category");
    println!("    --budget <amount>             Monthly budget (required)");
    println!("    --color <token|label>         Display color (default: Teal)");
    println!("    --description <text>");
    println!("  edit-category <id|name>         Change --name --budget --color --description");
    println!("  delete-category <id|name>       Delete a category (its expenses are kept)");
    println!("  add-expense <amount>            Record an expense");
    println!("    --category <id|name>          Category (required)");
    println!("    --date <YYYY-MM-DD>           Date (default: today)");
    println!("    --note <text>");
    println!("  edit-expense <id>               Change --amount --category --date --note");
    println!("  delete-expense <id>             Delete an expense");
    println!("  export [path]                   Export expenses to CSV");
    println!("    --month <YYYY-MM|all>         Month to export (default: current)");
    println!("  --help, -h                      Show this help");
    println!("  --version, -V                   Show version");
}

// ── Dashboard ─────────────────────────────────────────────────

fn cli_dashboard(args: &[String], db: &Database, today: NaiveDate) -> Result<()> {
    let date = match flag(args, "--date") {
        Some(raw) => parse_date(raw)?,
        None => today,
    };
    let dash = Dashboard::load(db, date)?;
    print_dashboard(&dash);
    Ok(())
}

fn print_dashboard(dash: &Dashboard) {
    let b = &dash.balance;
    let s = &dash.spending;

    println!("Ledgerly: {}", long_date(dash.today));
    println!("{}", "─".repeat(52));
    println!(
        "  Balance:       {:>12}  {} vs last month",
        currency(b.current_balance),
        signed_percent(b.balance_change)
    );
    println!(
        "  Expenses:      {:>12}  {} vs last month",
        currency(b.total_expenses),
        signed_percent(b.expenses_change)
    );
    println!(
        "  Savings rate:  {:>12}  {} vs last month",
        format!("{:.1}%", b.savings_rate.round_dp(1)),
        signed_percent(b.savings_rate_change)
    );

    println!();
    println!(
        "Spending: {} of {} ({}%)",
        currency(s.spent),
        currency(s.budget),
        s.percentage_used
    );
    println!("  {}", bar(s.percentage_used, 40));
    println!(
        "  Remaining {}, {} days left",
        currency(s.remaining),
        s.days_left
    );
    for week in &s.weekly_breakdown {
        println!(
            "  {:<8} {:>12}  projected {}",
            week.label(),
            currency(week.amount),
            currency(week.projected)
        );
    }

    let breakdown = &dash.breakdown;
    if !breakdown.entries.is_empty() || !breakdown.unassigned.is_zero() {
        println!();
        println!("Spending by Category:");
        for entry in breakdown.top(5) {
            println!(
                "  {:<24} {:>12}  {:>3}%",
                truncate(&entry.category.name, 24),
                currency(entry.amount),
                entry.percentage
            );
        }
        if breakdown.entries.len() > 5 {
            println!("  ... and {} more", breakdown.entries.len() - 5);
        }
        if !breakdown.unassigned.is_zero() {
            println!(
                "  {:<24} {:>12}",
                UNCATEGORIZED,
                currency(breakdown.unassigned)
            );
        }
    }

    let st = &dash.stats;
    println!();
    println!("Stats:");
    println!("  Avg daily spend:   {}", currency(st.average_daily_spend));
    println!(
        "  Top spending day:  {} ({})",
        st.top_spending_day,
        currency(st.top_spending_day_amount)
    );
    println!("  Budget adherence:  {}%", st.budget_adherence);
    println!("  Over budget:       {}", st.overspent_categories);
    let pattern: Vec<String> = st
        .weekly_pattern
        .iter()
        .map(|d| format!("{} {}", d.day, currency(d.amount)))
        .collect();
    println!("  By weekday:        {}", pattern.join("  "));
}

// ── Categories ────────────────────────────────────────────────

fn cli_categories(db: &Database) -> Result<()> {
    let categories = db.get_categories()?;
    if categories.is_empty() {
        println!("No categories");
        return Ok(());
    }
    let expenses = db.get_expenses()?;
    let summary = ledgerly::analytics::category_summary(&categories, &expenses);

    println!(
        "{} categories, budget {}, spent {}, avg utilization {}%",
        summary.total_categories,
        currency(summary.total_budget),
        currency(summary.total_spent),
        summary.average_utilization
    );
    println!();
    println!(
        "{:<20} {:<8} {:>11} {:>11} {:>5}  {:<12} {:<8} ID",
        "Name", "Color", "Budget", "Spent", "Count", "Used", "Status"
    );
    println!("{}", "─".repeat(98));
    for cat in &categories {
        let spent = category_current_spend(&expenses, &cat.id);
        let used = utilization_percent(spent, cat.monthly_budget);
        println!(
            "{:<20} {:<8} {:>11} {:>11} {:>5}  {} {:<8} {}",
            truncate(&cat.name, 20),
            cat.color_label(),
            currency(cat.monthly_budget),
            currency(spent),
            category_expense_count(&expenses, &cat.id),
            bar(used, 12),
            UtilizationBadge::for_percent(used),
            cat.id,
        );
        if !cat.description.is_empty() {
            println!("  {}", truncate(&cat.description, 76));
        }
    }
    Ok(())
}

fn find_category(db: &Database, key: &str) -> Result<Category> {
    let categories = db.get_categories()?;
    Category::lookup(&categories, key)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Category '{key}' not found"))
}

fn cli_add_category(args: &[String], db: &mut Database) -> Result<()> {
    let Some(name) = positional(args) else {
        anyhow::bail!("Usage: ledgerly add-category <name> --budget <amount> [--color <c>] [--description <text>]");
    };

    let existing = db.get_categories()?;
    if Category::find_by_name(&existing, name).is_some() {
        anyhow::bail!("Category '{name}' already exists");
    }

    let form = CategoryForm {
        name: name.to_string(),
        description: flag(args, "--description").unwrap_or_default().to_string(),
        monthly_budget: flag(args, "--budget").unwrap_or_default().to_string(),
        color: flag(args, "--color")
            .map(resolve_color)
            .unwrap_or_else(|| DEFAULT_COLOR.to_string()),
    };
    let cat = form
        .into_category(None)
        .map_err(|e| anyhow::anyhow!("Invalid category: {e}"))?;
    db.insert_category(&cat)?;
    println!(
        "Added category {} with budget {} ({})",
        cat.name,
        currency(cat.monthly_budget),
        cat.id
    );
    Ok(())
}

fn cli_edit_category(args: &[String], db: &mut Database) -> Result<()> {
    let Some(key) = positional(args) else {
        anyhow::bail!("Usage: ledgerly edit-category <id|name> [--name] [--budget] [--color] [--description]");
    };
    let cat = find_category(db, key)?;

    let mut form = CategoryForm::from_category(&cat);
    if let Some(name) = flag(args, "--name") {
        let existing = db.get_categories()?;
        if Category::find_by_name(&existing, name).is_some_and(|other| other.id != cat.id) {
            anyhow::bail!("Category '{name}' already exists");
        }
        form.name = name.to_string();
    }
    if let Some(budget) = flag(args, "--budget") {
        form.monthly_budget = budget.to_string();
    }
    if let Some(color) = flag(args, "--color") {
        form.color = resolve_color(color);
    }
    if let Some(description) = flag(args, "--description") {
        form.description = description.to_string();
    }

    let updated = form
        .into_category(Some(cat.id.clone()))
        .map_err(|e| anyhow::anyhow!("Invalid category: {e}"))?;
    if updated == cat {
        println!("Nothing to change");
        return Ok(());
    }
    db.update_category(&updated)?;
    println!("Updated category {}", updated.name);
    Ok(())
}

fn cli_delete_category(args: &[String], db: &mut Database) -> Result<()> {
    let Some(key) = positional(args) else {
        anyhow::bail!("Usage: ledgerly delete-category <id|name>");
    };
    let cat = find_category(db, key)?;
    let orphaned = category_expense_count(&db.get_expenses()?, &cat.id);

    db.delete_category(&cat.id)?;
    println!("Deleted category {}", cat.name);
    if orphaned > 0 {
        println!("{orphaned} expense(s) are now {UNCATEGORIZED}");
    }
    Ok(())
}

// ── Expenses ──────────────────────────────────────────────────

fn cli_expenses(args: &[String], db: &Database, today: NaiveDate) -> Result<()> {
    let categories = db.get_categories()?;
    let category_id = match flag(args, "--category") {
        Some(key) => Some(
            Category::lookup(&categories, key)
                .map(|c| c.id.clone())
                .ok_or_else(|| anyhow::anyhow!("Category '{key}' not found"))?,
        ),
        None => None,
    };
    let range = match flag(args, "--range") {
        Some(raw) => DateRange::parse(raw).ok_or_else(|| {
            let names: Vec<&str> = DateRange::all().iter().map(|r| r.as_str()).collect();
            anyhow::anyhow!("Unknown range '{raw}', expected one of: {}", names.join(", "))
        })?,
        None => DateRange::default(),
    };
    let filter = ExpenseFilter { category_id, range };

    let expenses = db.get_expenses()?;
    let shown = filter.apply(&expenses, today);
    if shown.is_empty() {
        println!("No expenses ({})", filter.range);
        if !filter.is_default() {
            println!("Try changing your filters");
        }
        return Ok(());
    }

    println!(
        "{:<14} {:>11}  {:<20} {:<30} ID",
        "Date", "Amount", "Category", "Note"
    );
    println!("{}", "─".repeat(90));
    for exp in &shown {
        let name = expense_category_name(&categories, &exp.category_id).unwrap_or(UNCATEGORIZED);
        println!(
            "{:<14} {:>11}  {:<20} {:<30} {}",
            long_date(exp.date),
            currency(exp.amount),
            truncate(name, 20),
            truncate(&exp.note, 30),
            exp.id,
        );
    }
    let total: Decimal = shown.iter().map(|e| e.amount).sum();
    println!("{}", "─".repeat(90));
    println!(
        "{} expense(s), {} total ({})",
        shown.len(),
        currency(total),
        filter.range
    );
    Ok(())
}

/// Exact id, or a unique id prefix as printed by `expenses`.
fn find_expense(db: &Database, key: &str) -> Result<Expense> {
    if let Some(exp) = db.get_expense(key)? {
        return Ok(exp);
    }
    let mut matches = db
        .get_expenses()?
        .into_iter()
        .filter(|e| !key.is_empty() && e.id.starts_with(key));
    match (matches.next(), matches.next()) {
        (Some(exp), None) => Ok(exp),
        (Some(_), Some(_)) => anyhow::bail!("Expense id '{key}' is ambiguous"),
        _ => anyhow::bail!("Expense '{key}' not found"),
    }
}

fn cli_add_expense(args: &[String], db: &mut Database, today: NaiveDate) -> Result<()> {
    let Some(amount) = positional(args) else {
        anyhow::bail!("Usage: ledgerly add-expense <amount> --category <id|name> [--date YYYY-MM-DD] [--note <text>]");
    };
    let category_id = match flag(args, "--category") {
        Some(key) => find_category(db, key)?.id,
        None => String::new(),
    };
    let date = match flag(args, "--date") {
        Some(raw) => parse_date(raw)?,
        None => today,
    };

    let form = ExpenseForm {
        amount: amount.to_string(),
        category_id,
        date: Some(date),
        note: flag(args, "--note").unwrap_or_default().to_string(),
    };
    let exp = form
        .into_expense(None)
        .map_err(|e| anyhow::anyhow!("Invalid expense: {e}"))?;
    db.insert_expense(&exp)?;
    println!(
        "Added {} on {} ({})",
        currency(exp.amount),
        long_date(exp.date),
        exp.id
    );
    Ok(())
}

fn cli_edit_expense(args: &[String], db: &mut Database) -> Result<()> {
    let Some(key) = positional(args) else {
        anyhow::bail!("Usage: ledgerly edit-expense <id> [--amount] [--category] [--date] [--note]");
    };
    let exp = find_expense(db, key)?;

    let mut form = ExpenseForm::from_expense(&exp);
    if let Some(amount) = flag(args, "--amount") {
        form.amount = amount.to_string();
    }
    if let Some(cat_key) = flag(args, "--category") {
        form.category_id = find_category(db, cat_key)?.id;
    }
    if let Some(raw) = flag(args, "--date") {
        form.date = Some(parse_date(raw)?);
    }
    if let Some(note) = flag(args, "--note") {
        form.note = note.to_string();
    }

    let updated = form
        .into_expense(Some(exp.id.clone()))
        .map_err(|e| anyhow::anyhow!("Invalid expense: {e}"))?;
    if updated == exp {
        println!("Nothing to change");
        return Ok(());
    }
    db.update_expense(&updated)?;
    println!("Updated expense {}", updated.id);
    Ok(())
}

fn cli_delete_expense(args: &[String], db: &mut Database) -> Result<()> {
    let Some(key) = positional(args) else {
        anyhow::bail!("Usage: ledgerly delete-expense <id>");
    };
    let exp = find_expense(db, key)?;
    db.delete_expense(&exp.id)?;
    println!(
        "Deleted {} expense from {}",
        currency(exp.amount),
        long_date(exp.date)
    );
    Ok(())
}

// ── Export ────────────────────────────────────────────────────

fn cli_export(args: &[String], db: &Database, today: NaiveDate) -> Result<()> {
    let month = match flag(args, "--month") {
        Some("all") => None,
        Some(raw) => Some(
            MonthKey::parse(raw)
                .ok_or_else(|| anyhow::anyhow!("Invalid month '{raw}', expected YYYY-MM"))?,
        ),
        None => Some(MonthKey::of(today)),
    };
    let suffix = month.map_or_else(|| "all".to_string(), |m| m.to_string());

    // Output path is the first non-flag argument
    let output_path = positional(args)
        .map(shellexpand)
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/ledgerly-export-{suffix}.csv")
        });

    let count = db.export_to_csv(Path::new(&output_path), month)?;
    if count == 0 {
        println!("No expenses for {suffix}");
    } else {
        println!("Exported {count} expenses to {output_path}");
    }
    Ok(())
}
