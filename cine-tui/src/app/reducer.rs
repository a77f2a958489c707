//! Pure reducer function for state transitions
//!
//! `(State, Action) -> State`
//!
//! The reducer has NO side effects. Fetches and persistence are queued as
//! [`Effect`] values on the state and executed by the event loop.

use super::actions::{Action, Effect, Focus, Screen};
use super::details::DetailsState;
use super::search::PageRequest;
use super::state::AppState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use libcinescope::store::{self, StoreAction};

/// Pure reducer function
///
/// # Purity Guarantees
///
/// - No network requests
/// - No file I/O
/// - No database calls
/// - Deterministic (same inputs -> same output)
pub fn reduce(state: AppState, action: Action) -> AppState {
    match action {
        // === UI Events ===
        Action::Key(key) => handle_key(state, key),
        Action::Tick => state,

        Action::Resize(width, height) => {
            let mut state = AppState {
                viewport: (width, height),
                ..state
            };
            let rows = state.result_rows();
            state.main.search.keep_selection_visible(rows);
            state
        }

        // === Navigation ===
        Action::Quit => AppState {
            should_quit: true,
            ..state
        },

        Action::ShowHelp => AppState {
            help_visible: true,
            ..state
        },

        Action::HideHelp => AppState {
            help_visible: false,
            ..state
        },

        Action::Back => {
            let mut state = state;
            let gallery_open = state.top_details().map(|d| d.gallery_open);
            match gallery_open {
                Some(true) => {
                    if let Some(details) = state.top_details_mut() {
                        details.close_gallery();
                    }
                }
                Some(false) => {
                    state.stack.pop();
                }
                None => state.main.focus = Focus::Input,
            }
            state
        }

        Action::OpenDetails(movie_id) => {
            let mut state = state;
            let instance = state.next_instance;
            state.next_instance += 1;
            state.stack.push(DetailsState::new(instance, movie_id));
            state.effects.push(Effect::LoadDetails { instance, movie_id });
            state
        }

        Action::FocusNext => {
            let mut state = state;
            state.main.focus = state.main.focus.next();
            state
        }

        Action::FocusPrev => {
            let mut state = state;
            state.main.focus = state.main.focus.prev();
            state
        }

        // === Store ===
        Action::Store(store_action) => apply_store(state, store_action),

        Action::StoreLoaded(store) => AppState { store, ..state },

        // === Search Screen ===
        Action::QueryInputChanged(text) => {
            if text == state.store.query {
                return state;
            }
            apply_store(state, StoreAction::SetQuery(text))
        }

        Action::SearchSubmitted => submit_search(state),

        Action::SearchPageLoaded { term, page } => {
            let mut state = state;
            state.main.search.apply_page(&term, page);
            state
        }

        Action::SearchPageFailed { term, page, .. } => {
            let mut state = state;
            state.main.search.fail(&term, page);
            state
        }

        Action::ScrollResults(delta) => {
            let mut state = state;
            let rows = state.result_rows();
            state.main.search.scroll_by(delta, rows);
            reduce(state, Action::LoadMore)
        }

        Action::LoadMore => {
            let mut state = state;
            let metrics = state.main.search.metrics(state.result_rows());
            if let Some(request) = state.main.search.load_more(metrics) {
                queue_search(&mut state, request);
            }
            state
        }

        Action::Refresh => {
            let mut state = state;
            if let Some(request) = state.main.search.refresh() {
                queue_search(&mut state, request);
            }
            state
        }

        Action::MoveHistorySelection(delta) => {
            let mut state = state;
            let count = state.store.searches.len();
            if count > 0 {
                state.main.history_selected =
                    state.main.history_selected.saturating_add_signed(delta).min(count - 1);
            }
            state
        }

        Action::SelectHistory(index) => {
            let Some(keyword) = state.store.searches.get(index).map(|e| e.keyword.clone()) else {
                return state;
            };
            let mut state = apply_store(state, StoreAction::SetQuery(keyword));
            state.main.focus = Focus::Input;
            state
        }

        // === Details Screen ===
        Action::DetailsLoaded { instance, part } => {
            let mut state = state;
            if let Some(details) = state.stack.iter_mut().find(|d| d.instance == instance) {
                details.apply(part);
            }
            state
        }

        Action::OpenGallery => {
            let mut state = state;
            if let Some(details) = state.top_details_mut() {
                details.open_gallery();
            }
            state
        }

        Action::CloseGallery => {
            let mut state = state;
            if let Some(details) = state.top_details_mut() {
                details.close_gallery();
            }
            state
        }

        Action::MoveGallerySelection(delta) => {
            let mut state = state;
            if let Some(details) = state.top_details_mut() {
                details.move_gallery(delta);
            }
            state
        }

        Action::MoveRelatedSelection(delta) => {
            let mut state = state;
            if let Some(details) = state.top_details_mut() {
                details.move_related(delta);
            }
            state
        }
    }
}

/// Apply a store action and queue persistence of the new slice
fn apply_store(state: AppState, action: StoreAction) -> AppState {
    let mut state = state;
    let removed = matches!(action, StoreAction::RemoveQuery(_));
    state.store = store::reduce(std::mem::take(&mut state.store), action);
    if removed {
        let count = state.store.searches.len();
        state.main.history_selected = state.main.history_selected.min(count.saturating_sub(1));
    }
    state.effects.push(Effect::PersistStore(state.store.clone()));
    state
}

fn queue_search(state: &mut AppState, request: PageRequest) {
    state.effects.push(Effect::Search {
        term: request.term,
        page: request.page,
    });
}

/// Submit the current query: record it, clear the input and fetch page 1
fn submit_search(state: AppState) -> AppState {
    let term = state.store.query.trim().to_string();
    if term.is_empty() {
        return state;
    }

    let state = apply_store(state, StoreAction::SetQuery(String::new()));
    let mut state = apply_store(state, StoreAction::AddQuery(term.clone()));
    state.main.history_selected = 0;
    state.main.focus = Focus::Results;

    let request = state.main.search.submit(term);
    queue_search(&mut state, request);
    state
}

/// Handle keyboard input
///
/// Maps keys to high-level actions. This is where keybindings are defined.
fn handle_key(state: AppState, key: KeyEvent) -> AppState {
    // Global keybindings (work everywhere)
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            return reduce(state, Action::Quit);
        }

        (KeyCode::F(1), _) => {
            let action = if state.help_visible { Action::HideHelp } else { Action::ShowHelp };
            return reduce(state, action);
        }

        (KeyCode::Esc, _) if state.help_visible => {
            return reduce(state, Action::HideHelp);
        }

        _ => {}
    }

    if state.help_visible {
        return state;
    }

    // Screen-specific keybindings
    match state.current_screen() {
        Screen::Main => handle_main_key(state, key),
        Screen::Details => handle_details_key(state, key),
    }
}

/// Handle search screen keys
fn handle_main_key(state: AppState, key: KeyEvent) -> AppState {
    match (key.code, key.modifiers) {
        (KeyCode::Tab, _) => return reduce(state, Action::FocusNext),
        (KeyCode::BackTab, _) => return reduce(state, Action::FocusPrev),
        (KeyCode::Char('r'), KeyModifiers::CONTROL) => return reduce(state, Action::Refresh),
        (KeyCode::Esc, _) => return reduce(state, Action::Back),
        _ => {}
    }

    match state.main.focus {
        Focus::Input => match key.code {
            KeyCode::Enter => reduce(state, Action::SearchSubmitted),
            _ => state,
        },

        Focus::History => match key.code {
            KeyCode::Left | KeyCode::Char('h') => reduce(state, Action::MoveHistorySelection(-1)),
            KeyCode::Right | KeyCode::Char('l') => reduce(state, Action::MoveHistorySelection(1)),
            KeyCode::Enter => {
                let index = state.main.history_selected;
                reduce(state, Action::SelectHistory(index))
            }
            KeyCode::Delete | KeyCode::Backspace | KeyCode::Char('x') => {
                if state.store.searches.is_empty() {
                    return state;
                }
                let index = state.main.history_selected;
                reduce(state, Action::Store(StoreAction::RemoveQuery(index)))
            }
            KeyCode::Char('q') => reduce(state, Action::Quit),
            _ => state,
        },

        Focus::Results => {
            let page = state.result_rows() as isize;
            match key.code {
                KeyCode::Down | KeyCode::Char('j') => reduce(state, Action::ScrollResults(1)),
                KeyCode::Up | KeyCode::Char('k') => reduce(state, Action::ScrollResults(-1)),
                KeyCode::PageDown => reduce(state, Action::ScrollResults(page)),
                KeyCode::PageUp => reduce(state, Action::ScrollResults(-page)),
                KeyCode::Enter => match state.main.search.selected_movie().map(|m| m.id) {
                    Some(id) => reduce(state, Action::OpenDetails(id)),
                    None => state,
                },
                KeyCode::Char('q') => reduce(state, Action::Quit),
                _ => state,
            }
        }
    }
}

/// Handle details screen keys
fn handle_details_key(state: AppState, key: KeyEvent) -> AppState {
    let gallery_open = state.top_details().map(|d| d.gallery_open).unwrap_or(false);

    if gallery_open {
        return match key.code {
            KeyCode::Esc | KeyCode::Char('c') => reduce(state, Action::CloseGallery),
            KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
                reduce(state, Action::MoveGallerySelection(-1))
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => {
                reduce(state, Action::MoveGallerySelection(1))
            }
            _ => state,
        };
    }

    match key.code {
        KeyCode::Esc | KeyCode::Backspace => reduce(state, Action::Back),
        KeyCode::Char('p') => reduce(state, Action::OpenGallery),
        KeyCode::Down | KeyCode::Char('j') => reduce(state, Action::MoveRelatedSelection(1)),
        KeyCode::Up | KeyCode::Char('k') => reduce(state, Action::MoveRelatedSelection(-1)),
        KeyCode::Enter => match state.top_details().and_then(|d| d.selected_related()) {
            Some(id) => reduce(state, Action::OpenDetails(id)),
            None => state,
        },
        KeyCode::Char('q') => reduce(state, Action::Quit),
        _ => state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libcinescope::movies::mock::summary;
    use libcinescope::SearchPage;

    #[test]
    fn test_reducer_is_pure() {
        let state = AppState::new();
        let state_clone = state.clone();

        let new_state = reduce(state_clone.clone(), Action::QueryInputChanged("dune".to_string()));

        assert_eq!(state_clone.store.query, "");
        assert_eq!(new_state.store.query, "dune");
    }

    #[test]
    fn test_quit_action() {
        let state = AppState::new();
        assert!(!state.should_quit);

        let new_state = reduce(state, Action::Quit);
        assert!(new_state.should_quit);
    }

    #[test]
    fn test_input_change_queues_persist() {
        let mut state = reduce(AppState::new(), Action::QueryInputChanged("du".to_string()));
        assert_eq!(state.take_effects(), vec![Effect::PersistStore(state.store.clone())]);
    }

    #[test]
    fn test_unchanged_input_is_ignored() {
        let state = reduce(AppState::new(), Action::QueryInputChanged(String::new()));
        assert!(state.effects.is_empty());
    }

    #[test]
    fn test_submit_flow() {
        let mut state = reduce(AppState::new(), Action::QueryInputChanged("dune".to_string()));
        state.take_effects();

        let mut state = reduce(state, Action::SearchSubmitted);

        assert_eq!(state.store.query, "");
        assert_eq!(state.store.keywords(), vec!["dune"]);
        assert_eq!(state.main.search.term, "dune");
        assert_eq!(state.main.focus, Focus::Results);

        let effects = state.take_effects();
        assert!(effects.contains(&Effect::Search {
            term: "dune".to_string(),
            page: 1
        }));
    }

    #[test]
    fn test_empty_submit_does_nothing() {
        let state = reduce(AppState::new(), Action::QueryInputChanged("   ".to_string()));
        let mut before = state.clone();
        before.take_effects();

        let mut after = reduce(before.clone(), Action::SearchSubmitted);
        assert!(after.take_effects().is_empty());
        assert_eq!(after.store, before.store);
        assert!(after.main.search.term.is_empty());
    }

    #[test]
    fn test_search_page_loaded_appends() {
        let state = reduce(AppState::new(), Action::QueryInputChanged("dune".to_string()));
        let state = reduce(state, Action::SearchSubmitted);
        let state = reduce(
            state,
            Action::SearchPageLoaded {
                term: "dune".to_string(),
                page: SearchPage {
                    page: 1,
                    total_pages: 2,
                    total_results: 2,
                    results: vec![summary(1, "Dune"), summary(2, "Dune II")],
                },
            },
        );
        assert_eq!(state.main.search.movies.len(), 2);
        assert_eq!(state.main.search.next_page(), Some(2));
    }

    #[test]
    fn test_open_details_and_back() {
        let mut state = reduce(AppState::new(), Action::OpenDetails(42));
        assert_eq!(state.current_screen(), Screen::Details);
        assert_eq!(
            state.take_effects(),
            vec![Effect::LoadDetails {
                instance: 1,
                movie_id: 42
            }]
        );

        let state = reduce(state, Action::Back);
        assert_eq!(state.current_screen(), Screen::Main);

        // Back on the search screen never pops it
        let state = reduce(state, Action::Back);
        assert_eq!(state.current_screen(), Screen::Main);
    }

    #[test]
    fn test_details_results_route_by_instance() {
        use super::super::actions::DetailsPart;
        use libcinescope::movies::mock::detail;

        let state = reduce(AppState::new(), Action::OpenDetails(42));
        let state = reduce(state, Action::OpenDetails(42));
        let state = reduce(
            state,
            Action::DetailsLoaded {
                instance: 1,
                part: DetailsPart::Movie(Ok(detail(42, "Dune"))),
            },
        );

        assert!(state.stack[0].movie.ready().is_some());
        assert!(state.stack[1].movie.ready().is_none());
    }

    #[test]
    fn test_help_toggle() {
        let state = reduce(AppState::new(), Action::ShowHelp);
        assert!(state.help_visible);
        let state = reduce(state, Action::HideHelp);
        assert!(!state.help_visible);
    }
}
