//! Monthly wealth history: a built-in run of literal months followed by
//! snapshots recorded in the database. The series is append-only.

use chrono::{Datelike, NaiveDate};
use rusqlite::Connection;

use crate::aggregate::saturating_sum;
use crate::error::{NetWorthError, Result};
use crate::models::AccountKind;

/// Source of "today", injected so the live chart column is testable.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

#[cfg(test)]
pub struct FixedClock(pub NaiveDate);

#[cfg(test)]
impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Short chart label, e.g. `03/25`.
pub fn month_label(month: NaiveDate) -> String {
    month.format("%m/%y").to_string()
}

fn month_key(month: NaiveDate) -> String {
    month.format("%Y-%m").to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryPoint {
    pub month: NaiveDate,
    pub values: [i64; AccountKind::COUNT],
}

impl HistoryPoint {
    pub fn new(month: NaiveDate, values: [i64; AccountKind::COUNT]) -> Self {
        Self {
            month: month_start(month),
            values,
        }
    }

    pub fn total(&self) -> i64 {
        saturating_sum(self.values)
    }
}

// (year, month, [stock, bank, cash, receivables, metals, business])
const BUILTIN_HISTORY: &[(i32, u32, [i64; AccountKind::COUNT])] = &[
    (2024, 10, [146_476, 53_411, 53_054, 150_000, 44_038, 6_283]),
    (2024, 11, [146_476, 4_535, 65_000, 193_000, 44_038, 7_019]),
    (2024, 12, [144_032, 15_731, 49_400, 168_980, 45_000, 7_749]),
    (2025, 1, [138_557, 5_107, 64_500, 113_980, 45_800, 7_749]),
    (2025, 2, [155_565, 44_582, 76_732, 100_740, 48_688, 0]),
    (2025, 3, [154_091, 8_449, 97_175, 95_000, 48_323, 1_175]),
];

#[derive(Debug, Clone, Default)]
pub struct HistorySeries {
    points: Vec<HistoryPoint>,
}

impl HistorySeries {
    /// The literal months only.
    pub fn builtin() -> Self {
        let points = BUILTIN_HISTORY
            .iter()
            .filter_map(|(y, m, values)| {
                NaiveDate::from_ymd_opt(*y, *m, 1).map(|d| HistoryPoint::new(d, *values))
            })
            .collect();
        Self { points }
    }

    /// Built-in months followed by every recorded snapshot.
    pub fn load(conn: &Connection) -> Result<Self> {
        let mut series = Self::builtin();
        let mut stmt = conn.prepare(
            "SELECT month, stock, bank, cash, receivables, metals, business \
             FROM history ORDER BY month",
        )?;
        let rows: Vec<(String, [i64; AccountKind::COUNT])> = stmt
            .query_map([], |row| {
                Ok((
                    row.get(0)?,
                    [
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                        row.get(5)?,
                        row.get(6)?,
                    ],
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        for (key, values) in rows {
            let month = match NaiveDate::parse_from_str(&format!("{key}-01"), "%Y-%m-%d") {
                Ok(m) => m,
                Err(e) => {
                    tracing::warn!(month = %key, error = %e, "skipping history row with bad month");
                    continue;
                }
            };
            if let Err(e) = series.push(HistoryPoint::new(month, values)) {
                tracing::warn!(error = %e, "skipping out-of-order history row");
            }
        }
        Ok(series)
    }

    pub fn points(&self) -> &[HistoryPoint] {
        &self.points
    }

    pub fn contains(&self, month: NaiveDate) -> bool {
        let month = month_start(month);
        self.points.iter().any(|p| p.month == month)
    }

    fn check_order(&self, month: NaiveDate) -> Result<()> {
        match self.points.last() {
            Some(last) if month <= last.month => Err(NetWorthError::HistoryOrder {
                month: month_label(month),
                last: month_label(last.month),
            }),
            _ => Ok(()),
        }
    }

    /// Append a point. Its month must come strictly after the last one.
    pub fn push(&mut self, point: HistoryPoint) -> Result<()> {
        self.check_order(point.month)?;
        self.points.push(point);
        Ok(())
    }
}

/// Persist a snapshot row for `point.month`. Existing months are never
/// overwritten.
pub fn record_snapshot(conn: &Connection, series: &mut HistorySeries, point: HistoryPoint) -> Result<()> {
    if series.contains(point.month) {
        return Err(NetWorthError::SnapshotExists(month_label(point.month)));
    }
    series.check_order(point.month)?;
    let v = point.values;
    conn.execute(
        "INSERT INTO history (month, stock, bank, cash, receivables, metals, business) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        rusqlite::params![month_key(point.month), v[0], v[1], v[2], v[3], v[4], v[5]],
    )?;
    tracing::info!(month = %month_label(point.month), total = point.total(), "snapshot recorded");
    series.push(point)
}
