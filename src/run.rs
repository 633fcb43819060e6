mod cli;
mod shell;

use anyhow::{Context, Result};
use chrono::NaiveDate;

pub(crate) use cli::as_cli;
pub(crate) use shell::as_shell;

pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Value following `name`, e.g. `--budget 500`.
pub(crate) fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

/// Leading argument, unless it is a flag.
pub(crate) fn positional(args: &[String]) -> Option<&str> {
    args.first()
        .filter(|a| !a.starts_with("--"))
        .map(String::as_str)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{raw}', expected YYYY-MM-DD"))
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
