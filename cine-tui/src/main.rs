//! cine-tui - Terminal UI for Cinescope
//!
//! Search movies, keep a short history of recent searches and browse movie
//! details, related titles and posters.

use std::path::PathBuf;

use anyhow::Context;
use cine_tui::{
    app::{
        event::{EventHandler, TuiEvent},
        reduce, Action, AppState,
    },
    services::ServiceHandle,
    terminal::{install_panic_hook, restore_terminal, setup_terminal, Tui},
    ui::{self, search_input},
};
use crossterm::event::{KeyCode, KeyModifiers};
use libcinescope::logging::{self, LogTarget};
use libcinescope::{config, Config};
use tui_textarea::TextArea;

fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    // Logs go to a file; stderr belongs to the terminal UI
    let log_target = logging::config_from_env()
        .with_file(log_file_path()?)
        .without_stderr_fallback()
        .init();
    if let LogTarget::Discarded(reason) = log_target {
        eprintln!("Logging disabled, cannot open log file {}", reason);
    }

    let services = ServiceHandle::from_config(config).context("Failed to start services")?;
    let store = services.load_store().context("Failed to load search history")?;

    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let result = run_app(&mut terminal, &services, AppState::with_store(store));

    services.shutdown_with(restore_terminal(terminal))?;

    result
}

fn log_file_path() -> anyhow::Result<PathBuf> {
    if let Ok(path) = std::env::var("CINESCOPE_LOG_FILE") {
        return Ok(PathBuf::from(path));
    }
    Ok(config::resolve_data_path()?.join("cine-tui.log"))
}

fn run_app(terminal: &mut Tui, services: &ServiceHandle, state: AppState) -> anyhow::Result<()> {
    let mut state = state;
    let size = terminal.size()?;
    state = reduce(state, Action::Resize(size.width, size.height));

    let mut input = search_input::new_input(&state.store.query);
    let event_handler = EventHandler::new(state.config.tick_rate_ms);

    tracing::info!("cine-tui started");

    loop {
        search_input::style(&mut input, state.input_focused(), state.config.colors_enabled);
        terminal.draw(|frame| ui::render(frame, &state, &input, services.images()))?;

        let action = match event_handler.next()? {
            TuiEvent::Key(key) if state.input_focused() && !is_control_key(key.code, key.modifiers) => {
                input.input(key);
                Action::QueryInputChanged(search_input::text(&input))
            }
            event => event.into(),
        };

        state = reduce(state, action);

        // Results of background work
        for action in services.drain() {
            state = reduce(state, action);
        }

        for effect in state.take_effects() {
            services.execute(effect);
        }

        search_input::sync(&mut input, &state.store.query);

        if state.should_quit {
            break;
        }
    }

    tracing::info!("cine-tui exiting");
    Ok(())
}

/// Keys the reducer handles even while the search input has focus
fn is_control_key(code: KeyCode, modifiers: KeyModifiers) -> bool {
    matches!(
        (code, modifiers),
        (KeyCode::Enter, _)
            | (KeyCode::Tab, _)
            | (KeyCode::BackTab, _)
            | (KeyCode::Esc, _)
            | (KeyCode::F(_), _)
            | (KeyCode::Char('c'), KeyModifiers::CONTROL)
            | (KeyCode::Char('r'), KeyModifiers::CONTROL)
    )
}
