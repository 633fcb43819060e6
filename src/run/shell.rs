use anyhow::Result;
use std::io::{self, BufRead, Write};

use ledgerly::dashboard::{Dashboard, LiveDashboard};
use ledgerly::db::Database;
use ledgerly::format::currency;

use super::cli::execute;
use super::today;

const PROMPT: &str = "ledgerly> ";

pub(crate) fn as_shell(db: &mut Database) -> Result<()> {
    let mut live = LiveDashboard::new(db, today())?;
    println!("Ledgerly {}. Type 'help' for commands, 'quit' to leave.", env!("CARGO_PKG_VERSION"));
    print_headline(live.current());

    run_lines(io::stdin().lock(), db, &mut live)?;
    tracing::debug!("shell closed");
    Ok(())
}

/// Read and run commands until `quit` or end of input. A failing command or
/// refresh is reported and the loop carries on.
fn run_lines<R: BufRead>(input: R, db: &mut Database, live: &mut LiveDashboard) -> Result<()> {
    let mut lines = input.lines();
    loop {
        print!("{PROMPT}");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line?;

        let tokens = match shell_words::split(line.trim()) {
            Ok(tokens) => tokens,
            Err(err) => {
                eprintln!("Error: {err}");
                continue;
            }
        };
        match tokens.first().map(String::as_str) {
            None => continue,
            Some("quit" | "exit" | "q") => break,
            Some(_) => {}
        }

        if let Err(err) = execute(&tokens, db, today()) {
            eprintln!("Error: {err:#}");
        }

        match live.refresh(db, today()) {
            Ok(true) => print_headline(live.current()),
            Ok(false) => {}
            Err(err) => eprintln!("Error: {err:#}"),
        }
    }
    Ok(())
}

fn print_headline(dash: &Dashboard) {
    let s = &dash.spending;
    println!(
        "[balance {} | spent {} of {} ({}%) | {} days left]",
        currency(dash.balance.current_balance),
        currency(s.spent),
        currency(s.budget),
        s.percentage_used,
        s.days_left
    );
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_shell_continues_after_failed_refresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledgerly.db");
        let mut db = Database::open(&path).unwrap();
        let mut live = LiveDashboard::new(&mut db, today()).unwrap();

        // A row the store cannot read back makes every reload fail.
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute(
            "INSERT INTO expenses (id, amount, category_id, date, note)
             VALUES ('bad', '1', 'x', 'not-a-date', '')",
            [],
        )
        .unwrap();

        let input = "add-category Rent --budget 900\nadd-category Food --budget 300\n";
        run_lines(input.as_bytes(), &mut db, &mut live).unwrap();

        let names: Vec<String> = db
            .get_categories()
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Rent", "Food"]);
    }

    #[test]
    fn test_shell_stops_at_quit() {
        let dir = tempfile::tempdir().unwrap();
        let mut db = Database::open(&dir.path().join("ledgerly.db")).unwrap();
        let mut live = LiveDashboard::new(&mut db, today()).unwrap();

        let input = "add-category \"Eating Out\" --budget 120\nquit\nadd-category Fuel --budget 80\n";
        run_lines(input.as_bytes(), &mut db, &mut live).unwrap();

        let cats = db.get_categories().unwrap();
        assert_eq!(cats.len(), 1);
        assert_eq!(cats[0].name, "Eating Out");
    }
}
