//! Actions and effects for the reducer pattern
//!
//! All state transitions are triggered by actions. Work that has to leave
//! the reducer (network requests, persistence) is described by effects,
//! which the reducer queues and the event loop executes.

use crossterm::event::KeyEvent;
use libcinescope::{
    MovieDetail, MovieId, MovieImages, MovieStore, MovieSummary, RelatedMovies, SearchPage,
    StoreAction,
};

/// Actions that trigger state transitions
///
/// Actions are immutable data describing what happened. The reducer
/// (see `reducer.rs`) is responsible for applying them to state.
#[derive(Debug, Clone)]
pub enum Action {
    // === UI Events ===
    /// Keyboard input event
    Key(KeyEvent),

    /// Periodic tick
    Tick,

    /// Terminal resize event
    Resize(u16, u16),

    // === Navigation ===
    /// Quit the application
    Quit,

    /// Show help overlay
    ShowHelp,

    /// Hide help overlay
    HideHelp,

    /// Close the gallery, or pop the top details screen
    Back,

    /// Push a details screen for a movie
    OpenDetails(MovieId),

    /// Move focus to the next panel of the search screen
    FocusNext,

    /// Move focus to the previous panel of the search screen
    FocusPrev,

    // === Store ===
    /// Apply a store slice action
    Store(StoreAction),

    /// Replace the store with the persisted slice
    StoreLoaded(MovieStore),

    // === Search Screen ===
    /// Search input content changed
    QueryInputChanged(String),

    /// User submitted the current query
    SearchSubmitted,

    /// A search page arrived
    SearchPageLoaded {
        term: String,
        page: SearchPage<MovieSummary>,
    },

    /// A search page request failed
    SearchPageFailed {
        term: String,
        page: u32,
        error: String,
    },

    /// Move the result selection by this many rows
    ScrollResults(isize),

    /// Request the next page if the list is scrolled near its end
    LoadMore,

    /// Drop accumulated results and reload page 1 of the current term
    Refresh,

    /// Move the history chip selection by this many chips
    MoveHistorySelection(isize),

    /// Copy a history keyword into the search input
    SelectHistory(usize),

    // === Details Screen ===
    /// One of the three details queries finished
    DetailsLoaded { instance: u64, part: DetailsPart },

    /// Poster pressed: open the gallery when posters exist
    OpenGallery,

    /// Close the gallery
    CloseGallery,

    /// Move the gallery selection
    MoveGallerySelection(isize),

    /// Move the related-movie selection
    MoveRelatedSelection(isize),
}

/// Result of one details query
#[derive(Debug, Clone)]
pub enum DetailsPart {
    Movie(Result<MovieDetail, String>),
    Images(Result<MovieImages, String>),
    Related(Result<RelatedMovies, String>),
}

/// Side effects requested by the reducer
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch one search page
    Search { term: String, page: u32 },

    /// Run the three details queries for a details screen instance
    LoadDetails { instance: u64, movie_id: MovieId },

    /// Persist the store slice
    PersistStore(MovieStore),
}

/// Screen/View identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Search input, history and results
    Main,

    /// Movie details on top of the navigation stack
    Details,
}

/// Focused panel of the search screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    History,
    Results,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Input => Focus::History,
            Focus::History => Focus::Results,
            Focus::Results => Focus::Input,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Input => Focus::Results,
            Focus::History => Focus::Input,
            Focus::Results => Focus::History,
        }
    }
}
