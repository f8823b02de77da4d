//! Palette and semantic styles for the TUI.

use ratatui::style::{Color, Modifier, Style};

use trafmon_core::{ActionKind, Rgb};

// ── Palette ───────────────────────────────────────────────────────────

pub const ACCENT: Color = Color::Rgb(139, 233, 253); // #8be9fd
pub const HIGHLIGHT: Color = Color::Rgb(189, 147, 249); // #bd93f9
pub const WARN_YELLOW: Color = Color::Rgb(241, 250, 140); // #f1fa8c
pub const SUCCESS_GREEN: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const ERROR_RED: Color = Color::Rgb(255, 85, 85); // #ff5555

pub const TEXT: Color = Color::Rgb(200, 202, 214); // #c8cad6
pub const MUTED: Color = Color::Rgb(98, 114, 164); // #6272a4
pub const BG_HIGHLIGHT: Color = Color::Rgb(44, 46, 60); // #2c2e3c
pub const BG_DARK: Color = Color::Rgb(30, 31, 41); // #1e1f29

/// Terminal colour of a chart colour.
pub fn rgb(c: Rgb) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

// ── Semantic Styles ───────────────────────────────────────────────────

pub fn title_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(HIGHLIGHT)
}

pub fn border_default() -> Style {
    Style::default().fg(MUTED)
}

pub fn table_header() -> Style {
    Style::default()
        .fg(ACCENT)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn table_row() -> Style {
    Style::default().fg(TEXT)
}

pub fn table_selected() -> Style {
    Style::default()
        .fg(HIGHLIGHT)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

pub fn tab_active() -> Style {
    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(TEXT)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(MUTED)
}

pub fn key_hint_key() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Row button label, coloured by what the button does.
pub fn row_action(kind: ActionKind) -> Style {
    let fg = match kind.style() {
        "success" => SUCCESS_GREEN,
        "danger" => ERROR_RED,
        _ => ACCENT,
    };
    Style::default().fg(fg).add_modifier(Modifier::BOLD)
}
