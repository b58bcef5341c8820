use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use rand::seq::SliceRandom;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Gauge, Paragraph, Row, Table, TableState},
    Frame,
};
use rusqlite::Connection;

use crate::aggregate::{invested_amount, total_wealth};
use crate::error::Result;
use crate::fmt::{format_k, money, percent};
use crate::history::{Clock, HistorySeries, SystemClock};
use crate::models::AccountKind;
use crate::rank::classify;
use crate::settings::{load_settings, Settings};
use crate::store::{AccountStore, PendingReset};
use crate::tui::{
    install_panic_hook, money_span, text_bar, FOOTER_STYLE, HEADER_STYLE, SELECTED_STYLE,
    STATUS_STYLE, TITLE_STYLE,
};
use crate::widgets::{
    account_rows, allocation_segments, chart_columns, kind_color, split_cells, stack_cells,
    ChartColumn, ProgressView,
};

use super::accounts::parse_amount;
use super::open_db;

const GREETINGS: &[&str] = &[
    "Let's see where the money is.",
    "Numbers are in.",
    "Another month, another snapshot.",
    "Pull up a chair.",
    "Every koruna accounted for.",
    "Right where we left it.",
    "Steady as she goes.",
];

/// Legend entries per row under the allocation strip.
const LEGEND_COLUMNS: usize = 4;

/// Widest a single chart column gets, gap included.
const MAX_CHART_COLUMN_WIDTH: u16 = 8;

/// Most account rows shown before the table scrolls.
const MAX_ACCOUNT_ROWS: u16 = 14;

enum Mode {
    Browse,
    EditAmount(String),
    ConfirmReset(PendingReset),
}

pub enum DashboardAction {
    Continue,
    Quit,
    /// Persist `pending_amount` for the selected account.
    CommitEdit,
    /// The user confirmed the pending reset.
    CommitReset,
}

pub struct Dashboard {
    store: AccountStore,
    history: HistorySeries,
    clock: Box<dyn Clock>,
    currency: String,
    investment_goal: i64,
    wealth_goal: i64,
    greeting: String,
    selection: usize,
    mode: Mode,
    pending_amount: Option<i64>,
    status_message: Option<String>,
    table_state: TableState,
}

impl Dashboard {
    pub fn new(
        store: AccountStore,
        history: HistorySeries,
        clock: Box<dyn Clock>,
        settings: &Settings,
    ) -> Self {
        let mut rng = rand::thread_rng();
        let random_greeting = GREETINGS.choose(&mut rng).unwrap_or(&"Hello.");
        let first_name = settings.user_name.split_whitespace().next().unwrap_or("");
        let greeting = if first_name.is_empty() {
            format!("networth: {random_greeting}")
        } else {
            format!("Hello, {first_name}. {random_greeting}")
        };
        Self {
            store,
            history,
            clock,
            currency: settings.currency.clone(),
            investment_goal: settings.investment_goal,
            wealth_goal: settings.wealth_goal,
            greeting,
            selection: 0,
            mode: Mode::Browse,
            pending_amount: None,
            status_message: None,
            table_state: TableState::default().with_selected(Some(0)),
        }
    }

    pub fn set_status(&mut self, msg: String) {
        self.status_message = Some(msg);
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    pub fn handle_key(&mut self, code: KeyCode) -> DashboardAction {
        match self.mode {
            Mode::Browse => self.handle_browse_key(code),
            Mode::EditAmount(_) => self.handle_edit_key(code),
            Mode::ConfirmReset(_) => self.handle_confirm_key(code),
        }
    }

    fn handle_browse_key(&mut self, code: KeyCode) -> DashboardAction {
        self.status_message = None;
        let count = self.store.accounts().len();
        match code {
            KeyCode::Up => {
                self.selection = self.selection.saturating_sub(1);
            }
            KeyCode::Down => {
                if count > 0 {
                    self.selection = (self.selection + 1).min(count - 1);
                }
            }
            KeyCode::Enter => {
                if let Some(account) = self.store.accounts().get(self.selection) {
                    self.mode = Mode::EditAmount(account.amount.to_string());
                }
            }
            KeyCode::Char('R') => {
                self.mode = Mode::ConfirmReset(self.store.request_reset());
            }
            KeyCode::Char('q') | KeyCode::Esc => return DashboardAction::Quit,
            _ => {}
        }
        self.table_state.select(Some(self.selection));
        DashboardAction::Continue
    }

    fn handle_edit_key(&mut self, code: KeyCode) -> DashboardAction {
        let Mode::EditAmount(input) = &mut self.mode else {
            return DashboardAction::Continue;
        };
        match code {
            KeyCode::Char(c) if c.is_ascii_digit() => input.push(c),
            KeyCode::Char('-') if input.is_empty() => input.push('-'),
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Esc => self.mode = Mode::Browse,
            KeyCode::Enter => {
                // An empty field means zero.
                let parsed = if input.is_empty() {
                    Ok(0)
                } else {
                    parse_amount(input)
                };
                match parsed {
                    Ok(amount) => {
                        self.pending_amount = Some(amount);
                        self.mode = Mode::Browse;
                        return DashboardAction::CommitEdit;
                    }
                    Err(e) => self.status_message = Some(e.to_string()),
                }
            }
            _ => {}
        }
        DashboardAction::Continue
    }

    fn handle_confirm_key(&mut self, code: KeyCode) -> DashboardAction {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => DashboardAction::CommitReset,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                if let Mode::ConfirmReset(pending) = std::mem::replace(&mut self.mode, Mode::Browse) {
                    pending.cancel();
                }
                self.status_message = Some("Reset cancelled.".to_string());
                DashboardAction::Continue
            }
            _ => DashboardAction::Continue,
        }
    }

    pub fn commit_edit(&mut self, conn: &Connection) -> Result<()> {
        let Some(amount) = self.pending_amount.take() else {
            return Ok(());
        };
        let accounts = self.store.update(conn, self.selection, amount)?;
        let name = accounts[self.selection].name.clone();
        self.status_message = Some(format!("Saved {name}: {}", money(amount, &self.currency)));
        Ok(())
    }

    pub fn commit_reset(&mut self, conn: &Connection) -> Result<()> {
        if let Mode::ConfirmReset(pending) = std::mem::replace(&mut self.mode, Mode::Browse) {
            self.store.commit_reset(conn, pending)?;
            let count = self.store.accounts().len();
            self.selection = self.selection.min(count.saturating_sub(1));
            self.table_state.select(Some(self.selection));
            self.status_message = Some("All values reset to default.".to_string());
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Drawing
    // -----------------------------------------------------------------------

    pub fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let border_style = Style::default().fg(Color::DarkGray);

        let segments = allocation_segments(self.store.accounts());
        let legend_rows = segments.len().div_ceil(LEGEND_COLUMNS) as u16;
        let account_rows_height =
            (self.store.accounts().len() as u16).min(MAX_ACCOUNT_ROWS) + 2;

        let [header_area, sep1, alloc_area, sep2, summary_area, sep3, chart_area, sep4, list_area, hints_area] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(2 + legend_rows),
                Constraint::Length(1),
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Min(8),
                Constraint::Length(1),
                Constraint::Length(account_rows_height),
                Constraint::Length(1),
            ])
            .areas(area);

        frame.render_widget(
            Paragraph::new(format!(" {}", self.greeting)).style(HEADER_STYLE),
            header_area,
        );

        let sep_line = "━".repeat(area.width as usize);
        let sep_widget = Paragraph::new(sep_line.as_str()).style(border_style);
        for sep in [sep1, sep2, sep3, sep4] {
            frame.render_widget(sep_widget.clone(), sep);
        }

        self.draw_allocation(frame, alloc_area);
        self.draw_summary(frame, summary_area);
        self.draw_chart(frame, chart_area);
        self.draw_accounts(frame, list_area);
        self.draw_hints(frame, hints_area);
    }

    fn draw_allocation(&self, frame: &mut Frame, area: Rect) {
        let accounts = self.store.accounts();
        let segments = allocation_segments(accounts);
        let total = total_wealth(accounts).max(0) as u64;

        let [title_area, strip_area, legend_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(Span::styled(" Money Allocation", TITLE_STYLE)),
            title_area,
        );

        let strip_width = strip_area.width.saturating_sub(2);
        let amounts: Vec<u64> = segments.iter().map(|s| s.amount.max(0) as u64).collect();
        let widths = split_cells(&amounts, total, strip_width);
        let mut strip = vec![Span::raw(" ")];
        let mut used = 0u16;
        for (seg, w) in segments.iter().zip(&widths) {
            strip.push(Span::styled(
                "█".repeat(*w as usize),
                Style::default().fg(seg.color),
            ));
            used += w;
        }
        strip.push(Span::styled(
            "░".repeat(strip_width.saturating_sub(used) as usize),
            FOOTER_STYLE,
        ));
        frame.render_widget(Paragraph::new(Line::from(strip)), strip_area);

        let cell_width = (legend_area.width as usize / LEGEND_COLUMNS).max(1);
        let legend: Vec<Line> = segments
            .chunks(LEGEND_COLUMNS)
            .map(|chunk| {
                let spans: Vec<Span> = chunk
                    .iter()
                    .flat_map(|seg| {
                        let label = format!("{} ({})", seg.name, percent(seg.percent));
                        let label: String = label.chars().take(cell_width.saturating_sub(3)).collect();
                        let pad = cell_width
                            .saturating_sub(3)
                            .saturating_sub(label.chars().count());
                        [
                            Span::styled(" ● ", Style::default().fg(seg.color)),
                            Span::styled(label, Style::default().fg(seg.color)),
                            Span::raw(" ".repeat(pad)),
                        ]
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();
        frame.render_widget(Paragraph::new(legend), legend_area);
    }

    fn draw_summary(&self, frame: &mut Frame, area: Rect) {
        let accounts = self.store.accounts();
        let total = total_wealth(accounts);
        let tier = classify(total);

        let [wealth_area, investment_area, goal_area] = Layout::horizontal([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .areas(area);

        let lines = vec![
            Line::from(Span::styled(" You currently own:", FOOTER_STYLE)),
            Line::from(vec![
                Span::raw(" "),
                Span::styled(
                    money(total, &self.currency),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(format!(" {} {} Tier", tier.icon, tier.name)),
            Line::from(Span::styled(
                format!(
                    " {} - {}",
                    money(tier.min_amount, &self.currency),
                    money(tier.max_amount, &self.currency)
                ),
                FOOTER_STYLE,
            )),
        ];
        frame.render_widget(Paragraph::new(lines), wealth_area);

        let investment = ProgressView::new(
            "Investment Progress",
            invested_amount(accounts),
            self.investment_goal,
        );
        let wealth = ProgressView::new("Total Wealth Progress", total, self.wealth_goal);
        self.draw_progress(frame, investment_area, &investment);
        self.draw_progress(frame, goal_area, &wealth);
    }

    fn draw_progress(&self, frame: &mut Frame, area: Rect, view: &ProgressView) {
        let [label_area, gauge_area, amount_area, _] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(Span::styled(format!(" {}", view.label), TITLE_STYLE)),
            label_area,
        );
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(view.band.color()).bg(Color::Rgb(55, 65, 81)))
            .ratio(view.ratio())
            .label(format!("{}%", view.rounded_percent()));
        frame.render_widget(gauge, gauge_area.inner(ratatui::layout::Margin::new(1, 0)));
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw(" "),
                money_span(view.current, &self.currency),
                Span::styled(format!(" of {}", money(view.goal, &self.currency)), FOOTER_STYLE),
            ])),
            amount_area,
        );
    }

    fn draw_chart(&self, frame: &mut Frame, area: Rect) {
        let columns = chart_columns(&self.history, self.store.accounts(), self.clock.as_ref());

        let [title_area, legend_area, plot_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(Span::styled(" Wealth Trend", TITLE_STYLE)),
            title_area,
        );
        let legend: Vec<Span> = AccountKind::ALL
            .iter()
            .flat_map(|k| {
                [
                    Span::styled(" ■ ", Style::default().fg(kind_color(*k))),
                    Span::raw(k.chart_label()),
                ]
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(legend)), legend_area);

        let max_total = columns.iter().map(|c| c.total()).max().unwrap_or(0).max(1) as f64;
        let (top_tick, mid_tick) = y_axis_ticks(max_total);
        let top_label = format_k(top_tick, &self.currency);
        let mid_label = format_k(mid_tick, &self.currency);
        let y_label_width = top_label.chars().count().max(mid_label.chars().count()) as u16 + 2;

        let [y_axis_area, bars_area] = Layout::horizontal([
            Constraint::Length(y_label_width),
            Constraint::Fill(1),
        ])
        .areas(plot_area);

        // Bottom row holds the month labels.
        let bar_height = bars_area.height.saturating_sub(1);
        let mid_row = bar_height / 2;
        let y_lines: Vec<Line> = (0..bar_height)
            .map(|row| {
                let label = if row == 0 {
                    top_label.as_str()
                } else if row == mid_row {
                    mid_label.as_str()
                } else {
                    ""
                };
                Line::from(Span::styled(
                    format!("{:>width$} ", label, width = y_label_width as usize - 1),
                    FOOTER_STYLE,
                ))
            })
            .collect();
        frame.render_widget(Paragraph::new(y_lines), y_axis_area);

        let lines = chart_lines(&columns, top_tick as u64, bars_area.width, bar_height);
        frame.render_widget(Paragraph::new(lines), bars_area);
    }

    fn draw_accounts(&mut self, frame: &mut Frame, area: Rect) {
        let [title_area, table_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(Span::styled(" Account Allocations", TITLE_STYLE)),
            title_area,
        );

        let editing = match &self.mode {
            Mode::EditAmount(input) => Some(input.clone()),
            _ => None,
        };

        let rows: Vec<Row> = account_rows(self.store.accounts())
            .into_iter()
            .map(|row| {
                let selected = row.index == self.selection;
                let marker = if selected { ">" } else { " " };
                let amount_cell = match (&editing, selected) {
                    (Some(input), true) => Cell::from(Span::styled(
                        format!("{input}▏"),
                        Style::default().fg(Color::Black).bg(Color::Yellow),
                    )),
                    _ => Cell::from(Line::from(money_span(row.amount, &self.currency)).right_aligned()),
                };
                Row::new(vec![
                    Cell::from(format!(" {marker}")),
                    Cell::from(Span::styled(row.name, Style::default().fg(kind_color(row.kind)))),
                    amount_cell,
                    Cell::from(Line::from(percent(row.percent)).right_aligned()),
                    Cell::from(Span::styled(
                        text_bar(row.percent, 12),
                        Style::default().fg(Color::Rgb(59, 130, 246)),
                    )),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(2),
            Constraint::Fill(1),
            Constraint::Length(16),
            Constraint::Length(7),
            Constraint::Length(12),
        ];
        let table = Table::new(rows, widths)
            .column_spacing(1)
            .row_highlight_style(SELECTED_STYLE);
        frame.render_stateful_widget(table, table_area, &mut self.table_state);
    }

    fn draw_hints(&self, frame: &mut Frame, area: Rect) {
        let (text, style) = match &self.mode {
            Mode::ConfirmReset(_) => (
                " Reset all values to default? (y/n)".to_string(),
                STATUS_STYLE,
            ),
            Mode::EditAmount(_) => match &self.status_message {
                Some(msg) => (format!(" {msg}"), STATUS_STYLE),
                None => (
                    " Type an amount  Enter=save  Esc=cancel".to_string(),
                    FOOTER_STYLE,
                ),
            },
            Mode::Browse => match &self.status_message {
                Some(msg) => (format!(" {msg}"), STATUS_STYLE),
                None => (
                    " Up/Down=select  Enter=edit amount  R=reset  q/Esc=quit".to_string(),
                    FOOTER_STYLE,
                ),
            },
        };
        frame.render_widget(Paragraph::new(text).style(style), area);
    }
}

/// Render stacked columns as text rows, top row first, month labels last.
fn chart_lines(columns: &[ChartColumn], max_total: u64, width: u16, height: u16) -> Vec<Line<'static>> {
    if columns.is_empty() || width == 0 {
        return Vec::new();
    }
    let col_width = (width / columns.len() as u16).clamp(2, MAX_CHART_COLUMN_WIDTH);
    let bar_width = (col_width - 1) as usize;
    let stacks: Vec<Vec<Option<AccountKind>>> = columns
        .iter()
        .map(|c| stack_cells(c, max_total, height))
        .collect();

    let mut lines: Vec<Line> = (0..height)
        .map(|row| {
            let from_bottom = (height - 1 - row) as usize;
            let spans: Vec<Span> = stacks
                .iter()
                .flat_map(|cells| {
                    let bar = match cells.get(from_bottom).copied().flatten() {
                        Some(kind) => Span::styled(
                            "█".repeat(bar_width),
                            Style::default().fg(kind_color(kind)),
                        ),
                        None => Span::raw(" ".repeat(bar_width)),
                    };
                    [bar, Span::raw(" ")]
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let labels: Vec<Span> = columns
        .iter()
        .map(|c| {
            let text: String = c.label.chars().take(bar_width).collect();
            let style = if c.live { TITLE_STYLE } else { FOOTER_STYLE };
            Span::styled(format!("{:<width$}", text, width = col_width as usize), style)
        })
        .collect();
    lines.push(Line::from(labels));
    lines
}

/// Pick round y-axis tick values (top and mid) given a max data value.
fn y_axis_ticks(max_val: f64) -> (f64, f64) {
    let steps = [
        1000.0, 2500.0, 5000.0, 10000.0, 25000.0, 50000.0, 100000.0, 250000.0, 500000.0,
        750000.0, 1000000.0, 2500000.0, 5000000.0, 10000000.0, 25000000.0, 50000000.0,
        100000000.0,
    ];
    let top = steps
        .iter()
        .copied()
        .find(|&s| s >= max_val)
        .unwrap_or(max_val);
    (top, top / 2.0)
}

// ---------------------------------------------------------------------------
// Main entry point
// ---------------------------------------------------------------------------

pub fn run() -> Result<()> {
    let settings = load_settings();
    let conn = open_db()?;
    let store = AccountStore::load(&conn)?;
    let history = HistorySeries::load(&conn)?;
    let mut dashboard = Dashboard::new(store, history, Box::new(SystemClock), &settings);
    tracing::info!("dashboard opened");

    install_panic_hook();
    let mut terminal = ratatui::init();

    let result: Result<()> = loop {
        if let Err(e) = terminal.draw(|frame| dashboard.draw(frame)) {
            break Err(e.into());
        }

        match event::read() {
            Err(e) => break Err(e.into()),
            Ok(Event::Key(key)) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    break Ok(());
                }
                match dashboard.handle_key(key.code) {
                    DashboardAction::Quit => break Ok(()),
                    DashboardAction::Continue => {}
                    DashboardAction::CommitEdit => {
                        if let Err(e) = dashboard.commit_edit(&conn) {
                            tracing::warn!(error = %e, "saving amount failed");
                            dashboard.set_status(format!("Save failed: {e}"));
                        }
                    }
                    DashboardAction::CommitReset => {
                        if let Err(e) = dashboard.commit_reset(&conn) {
                            tracing::warn!(error = %e, "reset failed");
                            dashboard.set_status(format!("Reset failed: {e}"));
                        }
                    }
                }
            }
            _ => {}
        }
    };

    drop(terminal);
    ratatui::restore();
    tracing::info!("dashboard closed");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{get_value, test_db};
    use crate::history::FixedClock;
    use crate::models::{default_accounts, Account};
    use crate::store::ACCOUNTS_KEY;
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, Terminal};

    fn dashboard(accounts: Vec<Account>) -> Dashboard {
        Dashboard::new(
            AccountStore::from_accounts(accounts),
            HistorySeries::builtin(),
            Box::new(FixedClock(NaiveDate::from_ymd_opt(2025, 4, 2).unwrap())),
            &Settings::default(),
        )
    }

    fn sample() -> Vec<Account> {
        vec![
            Account::new("A", 100, AccountKind::Cash),
            Account::new("B Broker", 50, AccountKind::Stock),
        ]
    }

    fn type_keys(d: &mut Dashboard, text: &str) {
        for c in text.chars() {
            d.handle_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut d = dashboard(sample());
        d.handle_key(KeyCode::Up);
        assert_eq!(d.selection, 0);
        d.handle_key(KeyCode::Down);
        d.handle_key(KeyCode::Down);
        assert_eq!(d.selection, 1);
    }

    #[test]
    fn test_quit_keys() {
        let mut d = dashboard(sample());
        assert!(matches!(d.handle_key(KeyCode::Char('q')), DashboardAction::Quit));
        assert!(matches!(d.handle_key(KeyCode::Esc), DashboardAction::Quit));
    }

    #[test]
    fn test_edit_prefills_and_commits() {
        let (_dir, conn) = test_db();
        let mut d = dashboard(sample());
        d.handle_key(KeyCode::Enter);
        assert!(matches!(&d.mode, Mode::EditAmount(s) if s == "100"));
        d.handle_key(KeyCode::Backspace);
        d.handle_key(KeyCode::Backspace);
        d.handle_key(KeyCode::Backspace);
        type_keys(&mut d, "500");
        let action = d.handle_key(KeyCode::Enter);
        assert!(matches!(action, DashboardAction::CommitEdit));
        d.commit_edit(&conn).unwrap();
        assert_eq!(total_wealth(d.store.accounts()), 550);
        assert_eq!(d.store.accounts()[1].amount, 50);
        assert!(get_value(&conn, ACCOUNTS_KEY).unwrap().is_some());
    }

    #[test]
    fn test_edit_ignores_non_digits_and_empty_means_zero() {
        let (_dir, conn) = test_db();
        let mut d = dashboard(sample());
        d.handle_key(KeyCode::Enter);
        for _ in 0..3 {
            d.handle_key(KeyCode::Backspace);
        }
        type_keys(&mut d, "ab.");
        assert!(matches!(&d.mode, Mode::EditAmount(s) if s.is_empty()));
        assert!(matches!(d.handle_key(KeyCode::Enter), DashboardAction::CommitEdit));
        d.commit_edit(&conn).unwrap();
        assert_eq!(d.store.accounts()[0].amount, 0);
    }

    #[test]
    fn test_edit_rejects_amount_beyond_limit() {
        let mut d = dashboard(sample());
        d.handle_key(KeyCode::Enter);
        type_keys(&mut d, "0000000000000000");
        assert!(matches!(d.handle_key(KeyCode::Enter), DashboardAction::Continue));
        assert!(matches!(d.mode, Mode::EditAmount(_)));
        assert!(d.pending_amount.is_none());
        assert!(d.status_message.as_deref().is_some_and(|m| m.starts_with("Invalid amount")));
    }

    #[test]
    fn test_esc_cancels_edit() {
        let mut d = dashboard(sample());
        d.handle_key(KeyCode::Enter);
        type_keys(&mut d, "9");
        d.handle_key(KeyCode::Esc);
        assert!(matches!(d.mode, Mode::Browse));
        assert!(d.pending_amount.is_none());
        assert_eq!(d.store.accounts()[0].amount, 100);
    }

    #[test]
    fn test_reset_refused_keeps_edits() {
        let (_dir, conn) = test_db();
        let mut d = dashboard(sample());
        d.handle_key(KeyCode::Char('R'));
        assert!(matches!(d.mode, Mode::ConfirmReset(_)));
        assert!(matches!(d.handle_key(KeyCode::Char('n')), DashboardAction::Continue));
        assert!(matches!(d.mode, Mode::Browse));
        d.commit_reset(&conn).unwrap();
        assert_eq!(d.store.accounts(), sample().as_slice());
    }

    #[test]
    fn test_reset_confirmed_restores_defaults() {
        let (_dir, conn) = test_db();
        let mut d = dashboard(sample());
        d.selection = 1;
        d.handle_key(KeyCode::Char('R'));
        assert!(matches!(d.handle_key(KeyCode::Char('y')), DashboardAction::CommitReset));
        d.commit_reset(&conn).unwrap();
        assert_eq!(d.store.accounts(), default_accounts().as_slice());
        assert!(matches!(d.mode, Mode::Browse));
        assert!(get_value(&conn, ACCOUNTS_KEY).unwrap().is_none());
    }

    #[test]
    fn test_y_axis_ticks() {
        assert_eq!(y_axis_ticks(420_000.0), (500_000.0, 250_000.0));
        assert_eq!(y_axis_ticks(600.0), (1000.0, 500.0));
    }

    #[test]
    fn test_chart_lines_shape() {
        let cols = vec![
            ChartColumn { label: "03/25".into(), values: [10, 0, 0, 0, 0, 0], live: false },
            ChartColumn { label: "04/25".into(), values: [20, 0, 0, 0, 0, 0], live: true },
        ];
        let lines = chart_lines(&cols, 20, 16, 4);
        assert_eq!(lines.len(), 5);
        let top: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(top.starts_with("       "));
        assert!(top.contains('█'));
    }

    #[test]
    fn test_draw_renders_sections() {
        let mut d = dashboard(default_accounts());
        let mut terminal = Terminal::new(TestBackend::new(120, 60)).unwrap();
        terminal.draw(|frame| d.draw(frame)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        for needle in ["Money Allocation", "You currently own", "Investment Progress", "Wealth Trend", "Account Allocations", "04/25", "q/Esc=quit"] {
            assert!(text.contains(needle), "missing {needle}");
        }
    }

    #[test]
    fn test_draw_extreme_amounts_does_not_panic() {
        let accounts = vec![
            Account::new("Huge", i64::MAX, AccountKind::Stock),
            Account::new("Also huge", i64::MAX, AccountKind::Cash),
            Account::new("Debt", i64::MIN, AccountKind::Receivable),
        ];
        let mut d = dashboard(accounts);
        let mut terminal = Terminal::new(TestBackend::new(120, 60)).unwrap();
        terminal.draw(|frame| d.draw(frame)).unwrap();
    }

    #[test]
    fn test_draw_zero_wealth_does_not_panic() {
        let accounts = vec![Account::new("A", 0, AccountKind::Cash)];
        let mut d = dashboard(accounts);
        let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
        terminal.draw(|frame| d.draw(frame)).unwrap();
    }
}
