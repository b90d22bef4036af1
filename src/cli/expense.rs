//! Expense CLI commands
//!
//! `add` plays the entry form, `history` and `delete` the history browser.

use chrono::{Datelike, Local};
use clap::Subcommand;
use tracing::debug;

use crate::config::Settings;
use crate::display::{format_expense_list, format_month_view};
use crate::error::ExpenseResult;
use crate::models::ExpenseId;
use crate::services::{resolve_entry_date, EntryService, HistoryService};
use crate::storage::ExpenseStore;

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// What the money was spent on
        item: String,
        /// Amount spent (e.g. 4.50)
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Expense date (YYYY-MM-DD), defaults to now
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Show one month of expenses with its total
    #[command(alias = "hist")]
    History {
        /// Year, defaults to the current year
        #[arg(short, long)]
        year: Option<i32>,
        /// Month number 1-12, defaults to the current month
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },
    /// Delete an expense by ID
    #[command(alias = "rm")]
    Delete {
        /// Expense ID as shown by `history`
        id: String,
    },
    /// List every recorded expense
    #[command(alias = "ls")]
    List,
}

/// Handle an expense command
pub fn handle_expense_command(
    store: &mut ExpenseStore,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> ExpenseResult<()> {
    debug!(?cmd, "Running expense command");

    match cmd {
        ExpenseCommands::Add { item, amount, date } => {
            let date = resolve_entry_date(date.as_deref(), Local::now().fixed_offset())?;
            let id = EntryService::new(store).add(&item, &amount, date)?;
            println!("Expense added successfully (id {})", id);
        }

        ExpenseCommands::History { year, month } => {
            let today = Local::now().date_naive();
            let year = year.unwrap_or(today.year());
            let month0 = month.map_or(today.month0(), |m| m - 1);

            let history = HistoryService::new(store, settings);
            history.check_year(year, today)?;
            let view = history.month_view(year, month0)?;
            print!("{}", format_month_view(&view, settings));
        }

        ExpenseCommands::Delete { id } => {
            let id = ExpenseId::from(id.trim());
            let existing = store.get(&id).cloned();

            if store.delete_expense(&id) {
                if let Some(expense) = existing {
                    println!(
                        "Deleted expense: {} {} ({})",
                        expense.day(),
                        expense.item,
                        expense.amount.format_with_symbol(&settings.currency_symbol)
                    );
                }
            } else {
                println!("No expense with id {}", id);
            }
        }

        ExpenseCommands::List => {
            print!("{}", format_expense_list(store.expenses(), settings));
        }
    }

    Ok(())
}
