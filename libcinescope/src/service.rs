//! Service facade for Cinescope
//!
//! `CinescopeService` is the single entry point the TUI and the CLI build
//! on. It owns the movie API, the store database and the image URL builder,
//! all behind `Arc`s so background tasks can hold them.
//!
//! # Example
//!
//! ```no_run
//! use libcinescope::service::CinescopeService;
//! use libcinescope::store::StoreAction;
//!
//! # async fn example() -> libcinescope::Result<()> {
//! let service = CinescopeService::new().await?;
//!
//! let store = service.load_store().await?;
//! let store = service.dispatch(store, StoreAction::AddQuery("dune".to_string())).await?;
//!
//! let page = service.movies().search_movies("dune", 1).await?;
//! println!("{} results, history: {:?}", page.total_results, store.keywords());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use serde::Serialize;

use crate::api::ApiClient;
use crate::config::Config;
use crate::db::Database;
use crate::error::Result;
use crate::images::ImageUrls;
use crate::movies::{MovieApi, TmdbMovieApi};
use crate::store::{self, MovieStore, StoreAction};
use crate::types::{MovieDetail, MovieId, MovieImages, RelatedMovies};

/// Everything the details view shows for one movie
#[derive(Debug, Clone, Serialize)]
pub struct MovieDetails {
    pub movie: MovieDetail,
    pub images: MovieImages,
    pub related: RelatedMovies,
}

pub struct CinescopeService {
    movies: Arc<dyn MovieApi>,
    db: Arc<Database>,
    images: ImageUrls,
}

impl CinescopeService {
    /// Create service with configuration loaded from the default location
    pub async fn new() -> Result<Self> {
        let config = Config::load()?;
        Self::from_config(config).await
    }

    /// Create service from an explicit configuration
    ///
    /// # Errors
    ///
    /// Fails when no API key is configured or the database cannot be opened.
    pub async fn from_config(config: Config) -> Result<Self> {
        let client = ApiClient::from_config(&config)?;
        let db = Database::new(&config.store.path).await?;

        Ok(Self::from_parts(
            Arc::new(TmdbMovieApi::new(client)),
            Arc::new(db),
            ImageUrls::from_config(&config.api),
        ))
    }

    /// Assemble a service from already-built parts (tests, mocks)
    pub fn from_parts(movies: Arc<dyn MovieApi>, db: Arc<Database>, images: ImageUrls) -> Self {
        Self { movies, db, images }
    }

    pub fn movies(&self) -> Arc<dyn MovieApi> {
        Arc::clone(&self.movies)
    }

    pub fn db(&self) -> Arc<Database> {
        Arc::clone(&self.db)
    }

    pub fn images(&self) -> &ImageUrls {
        &self.images
    }

    /// Load the persisted store slice (empty when nothing is stored)
    pub async fn load_store(&self) -> Result<MovieStore> {
        self.db.load_store_or_default().await
    }

    /// Apply `action` to `store` and persist the result
    pub async fn dispatch(&self, store: MovieStore, action: StoreAction) -> Result<MovieStore> {
        tracing::debug!(?action, "Dispatching store action");
        let next = store::reduce(store, action);
        self.db.save_store(&next).await?;
        Ok(next)
    }

    /// Run the three details queries concurrently
    ///
    /// # Errors
    ///
    /// Returns the first failure among the three queries.
    pub async fn details(&self, id: MovieId) -> Result<MovieDetails> {
        let (movie, images, related) = tokio::join!(
            self.movies.fetch_movie(id),
            self.movies.fetch_movie_images(id),
            self.movies.fetch_related_movies(id),
        );

        Ok(MovieDetails {
            movie: movie?,
            images: images?,
            related: related?,
        })
    }
}
