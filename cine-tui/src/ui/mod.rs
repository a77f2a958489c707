//! UI rendering
//!
//! Pure rendering functions that transform state into terminal frames.
//! Render functions never touch services; image URLs are built from the
//! `ImageUrls` passed in.

mod details;
mod main_screen;
pub mod search_input;

use libcinescope::ImageUrls;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use tui_textarea::TextArea;

use crate::app::{AppState, Screen};

/// Render the application UI
///
/// Only the top of the navigation stack is drawn.
pub fn render(frame: &mut Frame, state: &AppState, input: &TextArea, images: &ImageUrls) {
    let area = frame.size();

    match state.current_screen() {
        Screen::Main => main_screen::render(frame, area, state, input, images),
        Screen::Details => {
            if let Some(details) = state.top_details() {
                details::render(frame, area, details, images, state.config.colors_enabled);
            }
        }
    }

    if state.help_visible {
        render_help_overlay(frame, area);
    }
}

/// Style helper honoring `NO_COLOR`
pub(crate) fn color(enabled: bool, color: Color) -> Style {
    if enabled {
        Style::default().fg(color)
    } else {
        Style::default()
    }
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = vec![
        Line::from(Span::styled("Keyboard Shortcuts", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from("Global:"),
        Line::from("  Ctrl+C     - Quit"),
        Line::from("  F1         - Toggle help"),
        Line::from(""),
        Line::from("Search:"),
        Line::from("  Enter      - Search / select"),
        Line::from("  Tab        - Next panel"),
        Line::from("  Ctrl+R     - Refresh results"),
        Line::from("  Up/Down    - Move through results"),
        Line::from("  Left/Right - Move through recent searches"),
        Line::from("  x / Del    - Remove recent search"),
        Line::from(""),
        Line::from("Details:"),
        Line::from("  p          - Poster gallery"),
        Line::from("  Enter      - Open related movie"),
        Line::from("  Esc        - Back"),
        Line::from(""),
        Line::from("Press Esc or F1 to close"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, popup_area);
    frame.render_widget(help, popup_area);
}

/// Helper to create centered rectangle
/// Poster URI of a list entry, or a placeholder when the movie has none
pub(crate) fn poster_label(images: &ImageUrls, poster_path: Option<&str>) -> String {
    images.poster(poster_path).unwrap_or_else(|| "(no poster)".to_string())
}

pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
