use comfy_table::{Cell, CellAlignment, Table};

use crate::aggregate::category_sums;
use crate::error::Result;
use crate::fmt::{money, number};
use crate::history::{month_label, month_start, record_snapshot, Clock, HistoryPoint, HistorySeries, SystemClock};
use crate::models::AccountKind;
use crate::settings::load_settings;
use crate::store::AccountStore;
use crate::widgets::chart_columns;

use super::open_db;

pub fn show() -> Result<()> {
    let settings = load_settings();
    let conn = open_db()?;
    let store = AccountStore::load(&conn)?;
    let history = HistorySeries::load(&conn)?;
    let columns = chart_columns(&history, store.accounts(), &SystemClock);

    let mut header = vec!["Month".to_string()];
    header.extend(AccountKind::ALL.iter().map(|k| k.chart_label().to_string()));
    header.push(format!("Total ({})", settings.currency));

    let mut table = Table::new();
    table.set_header(header);
    for col in &columns {
        let label = if col.live {
            format!("{} (now)", col.label)
        } else {
            col.label.clone()
        };
        let mut row = vec![Cell::new(label)];
        row.extend(
            col.values
                .iter()
                .map(|v| Cell::new(number(*v)).set_alignment(CellAlignment::Right)),
        );
        row.push(Cell::new(number(col.total())).set_alignment(CellAlignment::Right));
        table.add_row(row);
    }
    println!("Wealth Trend\n{table}");
    Ok(())
}

pub fn snapshot() -> Result<()> {
    let settings = load_settings();
    let conn = open_db()?;
    let store = AccountStore::load(&conn)?;
    let mut history = HistorySeries::load(&conn)?;

    let month = month_start(SystemClock.today());
    let point = HistoryPoint::new(month, category_sums(store.accounts()));
    let total = point.total();
    record_snapshot(&conn, &mut history, point)?;

    println!(
        "Recorded {}: {}",
        month_label(month),
        money(total, &settings.currency)
    );
    Ok(())
}
