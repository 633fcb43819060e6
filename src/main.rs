mod run;

use anyhow::Result;
use ledgerly::config::Config;
use ledgerly::db::Database;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = Config::from_env()?;
    ledgerly::init_tracing(&config.log_filter);
    let mut db = Database::open(&config.db_path)?;

    match args.len() {
        1 => run::as_shell(&mut db),
        2.. => run::as_cli(&args, &mut db),
        _ => {
            eprintln!("Usage: ledgerly [command]");
            Ok(())
        }
    }
}
