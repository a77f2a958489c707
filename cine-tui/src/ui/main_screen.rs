//! Search screen: input, recent searches, results and status bar

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use libcinescope::ImageUrls;
use tui_textarea::TextArea;

use crate::app::state::{HISTORY_HEIGHT, INPUT_HEIGHT, STATUS_HEIGHT};
use crate::app::{AppState, Focus, SearchState};
use crate::ui::{color, poster_label};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, input: &TextArea, images: &ImageUrls) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(HISTORY_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);

    frame.render_widget(input, chunks[0]);
    render_history(frame, chunks[1], state);
    render_results(frame, chunks[2], state, images);
    render_status_bar(frame, chunks[3], state);
}

fn panel(title: &str, focused: bool, colors: bool) -> Block<'_> {
    let border = if focused { Color::Yellow } else { Color::Gray };
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(color(colors, border))
}

/// Recent searches as a row of chips, newest first
fn render_history(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.main.focus == Focus::History;
    let colors = state.config.colors_enabled;

    let mut spans = Vec::new();
    for (index, entry) in state.store.searches.iter().enumerate() {
        let selected = focused && index == state.main.history_selected;
        let style = if selected {
            color(colors, Color::Yellow).add_modifier(Modifier::REVERSED)
        } else {
            color(colors, Color::Cyan)
        };
        spans.push(Span::styled(format!("[{}]", entry.keyword), style));
        spans.push(Span::raw(" "));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(panel("Recent", focused, colors));
    frame.render_widget(paragraph, area);
}

/// Visible window of the accumulated results
///
/// Each movie takes three rows (title, overview, poster URI); the window starts at the scroll offset and
/// is sized by `AppState::result_rows` so the reducer's near-end check sees
/// the same geometry.
fn render_results(frame: &mut Frame, area: Rect, state: &AppState, images: &ImageUrls) {
    let search = &state.main.search;
    let focused = state.main.focus == Focus::Results;
    let colors = state.config.colors_enabled;
    let rows = state.result_rows();

    let mut lines = Vec::new();
    for (index, movie) in search.movies.iter().enumerate().skip(search.offset).take(rows) {
        let selected = focused && index == search.selected;
        let marker = if selected { "> " } else { "  " };
        let title_style = if selected {
            color(colors, Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };

        let mut title = vec![Span::raw(marker), Span::styled(movie.title.clone(), title_style)];
        if let Some(year) = movie.release_date.as_deref().and_then(|d| d.get(..4)) {
            title.push(Span::styled(format!(" ({})", year), color(colors, Color::Gray)));
        }
        lines.push(Line::from(title));

        let width = usize::from(area.width.saturating_sub(6));
        lines.push(Line::from(Span::styled(
            format!("  {}", truncate(&movie.overview, width)),
            color(colors, Color::Gray),
        )));
        lines.push(Line::from(Span::styled(
            format!("  {}", truncate(&poster_label(images, movie.poster_path.as_deref()), width)),
            color(colors, Color::DarkGray),
        )));
    }

    let paragraph = Paragraph::new(lines).block(panel("Results", focused, colors));
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let colors = state.config.colors_enabled;
    let search = &state.main.search;

    let status = status_text(search);
    let hints = "Tab: Panel | Enter: Open | Ctrl+R: Refresh | F1: Help | Ctrl+C: Quit";

    let lines = vec![
        Line::from(Span::raw(status)),
        Line::from(Span::styled(hints, color(colors, Color::Gray))),
    ];
    frame.render_widget(Paragraph::new(lines).block(Block::default().borders(Borders::ALL)), area);
}

/// One-line summary of the search panel
pub(crate) fn status_text(search: &SearchState) -> String {
    if search.term.is_empty() {
        return "Type a title and press Enter".to_string();
    }
    if search.is_loading() {
        return "Loading...".to_string();
    }
    if search.movies.is_empty() {
        return format!("No movies found for \"{}\"", search.term);
    }

    let total = search.total_pages.unwrap_or(search.current_page);
    let mut text = format!(
        "\"{}\" | {} movies | page {} of {}",
        search.term,
        search.movies.len(),
        search.current_page,
        total
    );
    if search.in_flight.is_some() {
        text.push_str(" | loading more...");
    }
    text
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let cut: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", cut)
}
