//! Search input widget
//!
//! The single-line text input is a `tui_textarea::TextArea`. The store's
//! `query` is the source of truth; the event loop rebuilds the textarea
//! whenever the two disagree.

use ratatui::{
    style::Color,
    widgets::{Block, Borders},
};
use tui_textarea::TextArea;

use crate::ui::color;

pub const PLACEHOLDER: &str = "Search for a movie... (Enter to search, F1 for help)";

/// Create an input holding `query`, cursor at the end
pub fn new_input(query: &str) -> TextArea<'static> {
    let mut textarea = TextArea::new(vec![query.to_string()]);
    textarea.set_placeholder_text(PLACEHOLDER);
    textarea.move_cursor(tui_textarea::CursorMove::End);
    textarea
}

/// Current text of the input
pub fn text(textarea: &TextArea) -> String {
    textarea.lines().join("")
}

/// Rebuild the input if its text differs from `query`
pub fn sync(textarea: &mut TextArea<'static>, query: &str) {
    if text(textarea) != query {
        *textarea = new_input(query);
    }
}

/// Apply the focus-dependent border
pub fn style(textarea: &mut TextArea, focused: bool, colors_enabled: bool) {
    let border = if focused { Color::Yellow } else { Color::Gray };
    textarea.set_block(
        Block::default()
            .title(" Search ")
            .borders(Borders::ALL)
            .border_style(color(colors_enabled, border)),
    );
}
