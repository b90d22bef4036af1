use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use expense_cli::cli::{handle_expense_command, ExpenseCommands};
use expense_cli::config::{paths::ExpensePaths, settings::Settings};
use expense_cli::logging::init_tracing;
use expense_cli::storage;

#[derive(Parser)]
#[command(
    name = "expenses",
    version,
    about = "Terminal-based personal expense log",
    long_about = "Record what you spend, one dated item at a time, and browse \
                  your expenses month by month with a running total."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Expense(ExpenseCommands),

    /// Write default settings and create the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let paths = ExpensePaths::new().context("Could not resolve the data directory")?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Expense(cmd)) => {
            let mut store = storage::open(&paths)?;
            handle_expense_command(&mut store, &settings, cmd)?;
            store.flush();
        }
        Some(Commands::Init) => {
            println!("Initializing expense log at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            let store = storage::open(&paths)?;
            store.persist();
            store.flush();
            println!("Initialization complete! {} expenses on record.", store.len());
        }
        Some(Commands::Config) => {
            println!("Expense Log Configuration");
            println!("=========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!(
                "Initialized:      {}",
                if paths.is_initialized() { "yes" } else { "no" }
            );
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!(
                "  History window:  {} years back, {} ahead",
                settings.history_years_back, settings.history_years_ahead
            );
        }
        None => {
            println!("Expense Log - track what you spend");
            println!();
            println!("Run 'expenses --help' for usage information.");
            println!("Run 'expenses add <ITEM> <AMOUNT>' to record an expense.");
        }
    }

    Ok(())
}
