use comfy_table::{Cell, CellAlignment, Table};

use crate::aggregate::total_wealth;
use crate::error::{NetWorthError, Result};
use crate::fmt::{money, percent};
use crate::models::MAX_AMOUNT;
use crate::settings::load_settings;
use crate::store::AccountStore;
use crate::widgets::account_rows;

use super::open_db;

/// Parse a user-typed amount. Thousands separators (`,`, `_`, spaces) are
/// ignored. Anything beyond `MAX_AMOUNT` either way is rejected.
pub fn parse_amount(input: &str) -> Result<i64> {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '_' | ' '))
        .collect();
    match cleaned.parse::<i64>() {
        Ok(amount) if amount.unsigned_abs() <= MAX_AMOUNT.unsigned_abs() => Ok(amount),
        _ => Err(NetWorthError::InvalidAmount(input.trim().to_string())),
    }
}

/// Find an account by exact name, falling back to a 1-based position.
pub fn resolve_account(store: &AccountStore, ident: &str) -> Result<usize> {
    if let Some(i) = store.position(ident) {
        return Ok(i);
    }
    match ident.trim().parse::<usize>() {
        Ok(n) if n >= 1 && n <= store.accounts().len() => Ok(n - 1),
        _ => Err(NetWorthError::UnknownAccount(ident.to_string())),
    }
}

pub fn list() -> Result<()> {
    let settings = load_settings();
    let conn = open_db()?;
    let store = AccountStore::load(&conn)?;

    let mut table = Table::new();
    table.set_header(vec!["#", "Name", "Kind", "Amount", "Share"]);
    for row in account_rows(store.accounts()) {
        table.add_row(vec![
            Cell::new(row.index + 1),
            Cell::new(row.name),
            Cell::new(row.kind.chart_label()),
            Cell::new(money(row.amount, &settings.currency)).set_alignment(CellAlignment::Right),
            Cell::new(percent(row.percent)).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("Accounts\n{table}");
    println!(
        "Total: {}",
        money(total_wealth(store.accounts()), &settings.currency)
    );
    Ok(())
}

pub fn set(account: &str, amount: &str) -> Result<()> {
    let settings = load_settings();
    let amount = parse_amount(amount)?;
    let conn = open_db()?;
    let mut store = AccountStore::load(&conn)?;
    let index = resolve_account(&store, account)?;
    let accounts = store.update(&conn, index, amount)?;
    println!(
        "{}: {} (total {})",
        accounts[index].name,
        money(amount, &settings.currency),
        money(total_wealth(accounts), &settings.currency)
    );
    Ok(())
}
