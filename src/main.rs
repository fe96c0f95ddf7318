//! Table Editor CLI
//!
//! Command-line interface for the table editor.

use clap::Parser;
use env_logger::Env;
use log::info;

use table_editor::cli::commands::{self, Output};
use table_editor::cli::{Cli, Notification};
use table_editor::{EditorConfig, Store};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    let mut config = EditorConfig::from_env();
    if let Some(dir) = &cli.data_dir {
        config = config.with_data_dir(dir);
    }
    info!("Using data directory {}", config.data_dir.display());

    let Some(command) = cli.command else {
        println!("Table Editor v{}", env!("CARGO_PKG_VERSION"));
        println!("Use --help for available commands");
        return Ok(());
    };

    let mut store = Store::open(config.file_storage());

    match commands::run(&mut store, command) {
        Ok(Output::Text(text)) => print!("{}", text),
        Ok(Output::Notice(notice)) => println!("{}", notice),
        Err(err) if err.is_recoverable() => {
            eprintln!("{}", Notification::from_error(&err));
            if let Some(suggestion) = err.recovery_suggestion() {
                eprintln!("  {}", suggestion);
            }
            std::process::exit(1);
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
