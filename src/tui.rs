use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

use crate::fmt::money;

pub const HEADER_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

pub const FOOTER_STYLE: Style = Style::new().fg(Color::DarkGray);

pub const TITLE_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);

pub const AMOUNT_POS_STYLE: Style = Style::new().fg(Color::Rgb(80, 220, 100));
pub const AMOUNT_NEG_STYLE: Style = Style::new().fg(Color::Red);

pub const SELECTED_STYLE: Style = Style::new()
    .bg(Color::Rgb(40, 40, 60))
    .add_modifier(Modifier::BOLD);

pub const STATUS_STYLE: Style = Style::new().fg(Color::Yellow);

/// Amount as a colored Span: green when non-negative, red otherwise.
pub fn money_span(amount: i64, currency: &str) -> Span<'static> {
    let style = if amount < 0 {
        AMOUNT_NEG_STYLE
    } else {
        AMOUNT_POS_STYLE
    };
    Span::styled(money(amount, currency), style)
}

/// A fixed-width text bar, e.g. `████░░░░░░` for 40%.
pub fn text_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Install a panic hook that restores the terminal before the default hook
/// prints the panic.
pub fn install_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        hook(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_bar() {
        assert_eq!(text_bar(40.0, 10), "████░░░░░░");
        assert_eq!(text_bar(0.0, 4), "░░░░");
        assert_eq!(text_bar(250.0, 4), "████");
    }

    #[test]
    fn test_money_span_style() {
        assert_eq!(money_span(-5, "Kč").style, AMOUNT_NEG_STYLE);
        assert_eq!(money_span(5, "Kč").style, AMOUNT_POS_STYLE);
        assert_eq!(money_span(1500, "Kč").content, "1,500 Kč");
    }
}
