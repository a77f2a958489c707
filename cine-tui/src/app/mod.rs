//! Application module
//!
//! Contains the core application architecture:
//! - Actions and effects: What can happen, and what must happen outside
//! - State: What is true right now
//! - Reducer: Pure function (State, Action) -> State

pub mod actions;
pub mod details;
pub mod event;
pub mod reducer;
pub mod search;
pub mod state;

pub use actions::{Action, DetailsPart, Effect, Focus, Screen};
pub use details::{DetailsState, Fetch};
pub use reducer::reduce;
pub use search::{PageRequest, ScrollMetrics, SearchState};
pub use state::{AppState, MainState, UiConfig};
