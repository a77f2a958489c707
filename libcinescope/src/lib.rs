//! Cinescope - movie search and details for the terminal
//!
//! This library provides the client core shared by the Cinescope binaries:
//! the HTTP client for the TMDB API, the movie endpoints, the search-history
//! store slice and its persistence.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod images;
pub mod logging;
pub mod movies;
pub mod service;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use db::Database;
pub use error::{ApiError, CinescopeError, Result};
pub use images::ImageUrls;
pub use movies::{MovieApi, TmdbMovieApi};
pub use store::{MovieStore, SearchHistoryEntry, StoreAction};
pub use types::{MovieDetail, MovieId, MovieImages, MovieSummary, RelatedMovies, SearchPage};
