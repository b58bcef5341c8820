pub mod accounts;
pub mod dashboard;
pub mod history;
pub mod init;
pub mod reset;
pub mod status;

use clap::{Parser, Subcommand};
use rusqlite::Connection;

use crate::db::{get_connection, init_db};
use crate::error::Result;
use crate::settings::{db_path, get_data_dir};

/// Open the database in the configured data directory, creating both if
/// they do not exist yet.
pub(crate) fn open_db() -> Result<Connection> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let conn = get_connection(&db_path(&data_dir))?;
    init_db(&conn)?;
    Ok(conn)
}

#[derive(Parser)]
#[command(name = "networth", about = "Personal net-worth dashboard for the terminal.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up networth: choose a data directory and initialize the database.
    Init {
        /// Path for networth data (default: ~/Documents/networth)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Show total wealth, rank, goal progress and allocation.
    Status,
    /// View or edit account amounts.
    Accounts {
        #[command(subcommand)]
        command: AccountsCommands,
    },
    /// Reset every account to its default amount.
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Monthly wealth history.
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
    /// Open the interactive dashboard (default).
    Dashboard,
}

#[derive(Subcommand)]
pub enum AccountsCommands {
    /// List all accounts with their share of the total.
    List,
    /// Set the amount of one account.
    Set {
        /// Exact account name, or its position as shown by `accounts list`
        account: String,
        /// New amount (whole currency units)
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
}

#[derive(Subcommand)]
pub enum HistoryCommands {
    /// Show the wealth trend by category.
    Show,
    /// Record this month's category totals into the history.
    Snapshot,
}
