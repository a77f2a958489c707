//! Application state
//!
//! Single source of truth for the whole application. All state transitions
//! happen through the reducer (see `reducer.rs`).

use libcinescope::MovieStore;

use super::actions::{Effect, Focus, Screen};
use super::details::DetailsState;
use super::search::SearchState;

/// Rows taken by the search input box
pub const INPUT_HEIGHT: u16 = 3;

/// Rows taken by the history chips
pub const HISTORY_HEIGHT: u16 = 3;

/// Rows taken by the status bar
pub const STATUS_HEIGHT: u16 = 3;

/// Rows each search result occupies
pub const RESULT_ITEM_HEIGHT: u16 = 3;

/// Root application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Should the application quit?
    pub should_quit: bool,

    /// Help overlay visible?
    pub help_visible: bool,

    /// Global store slice (query text and recent searches)
    pub store: MovieStore,

    /// Search screen, always at the bottom of the navigation stack
    pub main: MainState,

    /// Details screens pushed on top of the search screen
    pub stack: Vec<DetailsState>,

    /// Instance tag for the next pushed details screen
    pub next_instance: u64,

    /// Terminal size in cells (width, height)
    pub viewport: (u16, u16),

    /// Effects queued by the reducer, drained by the event loop
    pub effects: Vec<Effect>,

    /// UI configuration
    pub config: UiConfig,
}

/// Search screen state
#[derive(Debug, Clone)]
pub struct MainState {
    pub focus: Focus,
    pub history_selected: usize,
    pub search: SearchState,
}

/// UI configuration
#[derive(Debug, Clone)]
pub struct UiConfig {
    /// Use colors?
    pub colors_enabled: bool,

    /// Tick rate in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            should_quit: false,
            help_visible: false,
            store: MovieStore::default(),
            main: MainState::default(),
            stack: Vec::new(),
            next_instance: 1,
            viewport: (80, 24),
            effects: Vec::new(),
            config: UiConfig::default(),
        }
    }
}

impl Default for MainState {
    fn default() -> Self {
        Self {
            focus: Focus::Input,
            history_selected: 0,
            search: SearchState::default(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        let colors_enabled =
            std::env::var("NO_COLOR").is_err() && std::env::var("CINE_TUI_NO_COLOR").is_err();

        let tick_rate_ms = std::env::var("CINE_TUI_TICK_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(100);

        Self {
            colors_enabled,
            tick_rate_ms,
        }
    }
}

impl AppState {
    /// Create new application state with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state around a store slice loaded at startup
    pub fn with_store(store: MovieStore) -> Self {
        Self {
            store,
            ..Self::default()
        }
    }

    pub fn current_screen(&self) -> Screen {
        if self.stack.is_empty() {
            Screen::Main
        } else {
            Screen::Details
        }
    }

    pub fn top_details(&self) -> Option<&DetailsState> {
        self.stack.last()
    }

    pub fn top_details_mut(&mut self) -> Option<&mut DetailsState> {
        self.stack.last_mut()
    }

    /// Number of search results that fit on screen
    pub fn result_rows(&self) -> usize {
        let chrome = INPUT_HEIGHT + HISTORY_HEIGHT + STATUS_HEIGHT + 2;
        let rows = self.viewport.1.saturating_sub(chrome) / RESULT_ITEM_HEIGHT;
        usize::from(rows.max(1))
    }

    /// Whether keystrokes should go to the search input
    pub fn input_focused(&self) -> bool {
        self.current_screen() == Screen::Main && self.main.focus == Focus::Input && !self.help_visible
    }

    /// Remove and return the queued effects
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }
}
