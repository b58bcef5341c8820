//! View models for the dashboard. Pure functions of the account list, the
//! history series and the clock; the ratatui code only lays these out.

use ratatui::style::Color;

use crate::aggregate::{category_sums, grouped_allocation, percentage, saturating_sum, total_wealth};
use crate::history::{month_label, month_start, Clock, HistorySeries};
use crate::models::{Account, AccountKind, AllocationKind};

pub const STOCK_COLOR: Color = Color::Rgb(59, 130, 246);
pub const BANK_COLOR: Color = Color::Rgb(16, 185, 129);

pub const INDIVIDUAL_COLORS: [Color; 7] = [
    Color::Rgb(245, 158, 11), // amber
    Color::Rgb(239, 68, 68),  // red
    Color::Rgb(139, 92, 246), // violet
    Color::Rgb(236, 72, 153), // pink
    Color::Rgb(20, 184, 166), // teal
    Color::Rgb(249, 115, 22), // orange
    Color::Rgb(6, 182, 212),  // cyan
];

/// Historical months shown before the live column.
pub const HISTORY_WINDOW: usize = 6;

pub fn kind_color(kind: AccountKind) -> Color {
    match kind {
        AccountKind::Stock => STOCK_COLOR,
        AccountKind::Bank => BANK_COLOR,
        AccountKind::Cash => INDIVIDUAL_COLORS[0],
        AccountKind::Receivable => INDIVIDUAL_COLORS[1],
        AccountKind::PreciousMetal => INDIVIDUAL_COLORS[2],
        AccountKind::Business => INDIVIDUAL_COLORS[3],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressBand {
    Complete,
    High,
    Mid,
    Low,
    Minimal,
}

impl ProgressBand {
    pub fn from_percent(percent: f64) -> Self {
        if percent >= 100.0 {
            ProgressBand::Complete
        } else if percent >= 75.0 {
            ProgressBand::High
        } else if percent >= 50.0 {
            ProgressBand::Mid
        } else if percent >= 25.0 {
            ProgressBand::Low
        } else {
            ProgressBand::Minimal
        }
    }

    pub fn color(self) -> Color {
        match self {
            ProgressBand::Complete => Color::Rgb(34, 197, 94),
            ProgressBand::High => Color::Rgb(59, 130, 246),
            ProgressBand::Mid => Color::Rgb(234, 179, 8),
            ProgressBand::Low => Color::Rgb(249, 115, 22),
            ProgressBand::Minimal => Color::Rgb(239, 68, 68),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressView {
    pub label: String,
    pub current: i64,
    pub goal: i64,
    /// Clamped to 0..=100.
    pub percent: f64,
    pub band: ProgressBand,
}

impl ProgressView {
    pub fn new(label: impl Into<String>, current: i64, goal: i64) -> Self {
        let percent = percentage(current, goal).clamp(0.0, 100.0);
        Self {
            label: label.into(),
            current,
            goal,
            percent,
            band: ProgressBand::from_percent(percent),
        }
    }

    pub fn ratio(&self) -> f64 {
        self.percent / 100.0
    }

    pub fn rounded_percent(&self) -> u16 {
        self.percent.round() as u16
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AllocationSegment {
    pub name: String,
    pub amount: i64,
    pub percent: f64,
    pub color: Color,
}

pub fn allocation_segments(accounts: &[Account]) -> Vec<AllocationSegment> {
    let total = total_wealth(accounts);
    grouped_allocation(accounts)
        .into_iter()
        .enumerate()
        .map(|(i, group)| {
            let color = match group.kind {
                AllocationKind::Stock => STOCK_COLOR,
                AllocationKind::Bank => BANK_COLOR,
                AllocationKind::Individual => INDIVIDUAL_COLORS[i % INDIVIDUAL_COLORS.len()],
            };
            AllocationSegment {
                percent: percentage(group.amount, total),
                name: group.name,
                amount: group.amount,
                color,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccountRow {
    pub index: usize,
    pub name: String,
    pub amount: i64,
    pub kind: AccountKind,
    pub percent: f64,
}

pub fn account_rows(accounts: &[Account]) -> Vec<AccountRow> {
    let total = total_wealth(accounts);
    accounts
        .iter()
        .enumerate()
        .map(|(index, a)| AccountRow {
            index,
            name: a.name.clone(),
            amount: a.amount,
            kind: a.kind,
            percent: percentage(a.amount, total),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartColumn {
    pub label: String,
    pub values: [i64; AccountKind::COUNT],
    /// Computed from the current accounts rather than recorded history.
    pub live: bool,
}

impl ChartColumn {
    pub fn total(&self) -> i64 {
        saturating_sum(self.values)
    }
}

/// The last `HISTORY_WINDOW` months before the clock's month, then one live
/// column for the clock's month built from the current accounts.
pub fn chart_columns(history: &HistorySeries, accounts: &[Account], clock: &dyn Clock) -> Vec<ChartColumn> {
    let current = month_start(clock.today());
    let past: Vec<_> = history
        .points()
        .iter()
        .filter(|p| p.month < current)
        .collect();
    let skip = past.len().saturating_sub(HISTORY_WINDOW);

    let mut columns: Vec<ChartColumn> = past[skip..]
        .iter()
        .map(|p| ChartColumn {
            label: month_label(p.month),
            values: p.values,
            live: false,
        })
        .collect();
    columns.push(ChartColumn {
        label: month_label(current),
        values: category_sums(accounts),
        live: true,
    });
    columns
}

/// Split `cells` proportionally to `values` out of `scale`, rounding the
/// running total so the parts never exceed `cells`.
pub fn split_cells(values: &[u64], scale: u64, cells: u16) -> Vec<u16> {
    if scale == 0 {
        return vec![0; values.len()];
    }
    let mut out = Vec::with_capacity(values.len());
    let mut running: u128 = 0;
    let mut placed: u16 = 0;
    for v in values {
        running += *v as u128;
        let boundary = ((running * cells as u128 + scale as u128 / 2) / scale as u128)
            .min(cells as u128) as u16;
        out.push(boundary.saturating_sub(placed));
        placed = placed.max(boundary);
    }
    out
}

/// Cell owners of one stacked column, bottom row first. Rows above the top of
/// the stack are `None`.
pub fn stack_cells(column: &ChartColumn, max_total: u64, height: u16) -> Vec<Option<AccountKind>> {
    let values: Vec<u64> = column.values.iter().map(|v| (*v).max(0) as u64).collect();
    let heights = split_cells(&values, max_total, height);
    let mut cells = Vec::with_capacity(height as usize);
    for (kind, h) in AccountKind::ALL.iter().zip(heights) {
        for _ in 0..h {
            cells.push(Some(*kind));
        }
    }
    cells.resize(height as usize, None);
    cells
}
