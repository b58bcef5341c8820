mod aggregate;
mod cli;
mod db;
mod error;
mod fmt;
mod history;
mod logging;
mod models;
mod rank;
mod settings;
mod store;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;

use cli::{AccountsCommands, Cli, Commands, HistoryCommands};

fn main() {
    let cli = Cli::parse();

    // `init --data-dir` logs into the directory it is about to create.
    let settings = settings::load_settings();
    let log_dir = match &cli.command {
        Some(Commands::Init { data_dir: Some(dir) }) => PathBuf::from(settings::shellexpand_path(dir)),
        _ => PathBuf::from(&settings.data_dir),
    };
    logging::init(&log_dir, &settings.log_level);

    let result = match cli.command {
        None | Some(Commands::Dashboard) => cli::dashboard::run(),
        Some(Commands::Init { data_dir }) => cli::init::run(data_dir),
        Some(Commands::Status) => cli::status::run(),
        Some(Commands::Accounts { command }) => match command {
            AccountsCommands::List => cli::accounts::list(),
            AccountsCommands::Set { account, amount } => cli::accounts::set(&account, &amount),
        },
        Some(Commands::Reset { yes }) => cli::reset::run(yes),
        Some(Commands::History { command }) => match command {
            HistoryCommands::Show => cli::history::show(),
            HistoryCommands::Snapshot => cli::history::snapshot(),
        },
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
