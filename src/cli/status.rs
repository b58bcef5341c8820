use colored::{ColoredString, Colorize};
use comfy_table::{Cell, CellAlignment, Table};

use crate::aggregate::{invested_amount, total_wealth};
use crate::error::Result;
use crate::fmt::{money, percent};
use crate::rank::classify;
use crate::settings::{db_path, load_settings};
use crate::store::AccountStore;
use crate::tui::text_bar;
use crate::widgets::{allocation_segments, ProgressBand, ProgressView};

use super::open_db;

fn band_colored(text: String, band: ProgressBand) -> ColoredString {
    match band {
        ProgressBand::Complete => text.green(),
        ProgressBand::High => text.blue(),
        ProgressBand::Mid => text.yellow(),
        ProgressBand::Low => text.bright_red(),
        ProgressBand::Minimal => text.red(),
    }
}

fn progress_line(view: &ProgressView, currency: &str) -> String {
    format!(
        "{:<24} {} {:>4}%  {} of {}",
        view.label,
        band_colored(text_bar(view.percent, 20), view.band),
        view.rounded_percent(),
        money(view.current, currency),
        money(view.goal, currency)
    )
}

pub fn run() -> Result<()> {
    let settings = load_settings();
    let conn = open_db()?;
    let store = AccountStore::load(&conn)?;
    let accounts = store.accounts();

    let total = total_wealth(accounts);
    let tier = classify(total);

    println!("Data dir:   {}", settings.data_dir);
    println!(
        "Database:   {}",
        db_path(std::path::Path::new(&settings.data_dir)).display()
    );
    println!();
    println!(
        "You currently own: {}",
        money(total, &settings.currency).bold()
    );
    println!(
        "Rank:       {} {} Tier ({} - {})",
        tier.icon,
        tier.name,
        money(tier.min_amount, &settings.currency),
        money(tier.max_amount, &settings.currency)
    );
    println!();

    let investment = ProgressView::new(
        "Investment Progress",
        invested_amount(accounts),
        settings.investment_goal,
    );
    let wealth = ProgressView::new("Total Wealth Progress", total, settings.wealth_goal);
    println!("{}", progress_line(&investment, &settings.currency));
    println!("{}", progress_line(&wealth, &settings.currency));
    println!();

    let mut table = Table::new();
    table.set_header(vec!["Allocation", "Amount", "Share"]);
    for seg in allocation_segments(accounts) {
        table.add_row(vec![
            Cell::new(seg.name),
            Cell::new(money(seg.amount, &settings.currency)).set_alignment(CellAlignment::Right),
            Cell::new(percent(seg.percent)).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{table}");
    Ok(())
}
