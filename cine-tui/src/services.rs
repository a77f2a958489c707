//! Service layer adapter for TUI
//!
//! Bridges the async `CinescopeService` and the synchronous TUI event loop.
//!
//! # Architecture
//!
//! - `ServiceHandle` owns a tokio runtime and the service
//! - Effects queued by the reducer are executed as spawned tasks
//! - Task results come back as [`Action`]s over a crossbeam channel that the
//!   event loop drains without blocking
//! - Store persistence runs in a single background task that coalesces
//!   queued snapshots, so only the newest one is written
//!
//! # Example
//!
//! ```no_run
//! use cine_tui::app::Effect;
//! use cine_tui::services::ServiceHandle;
//!
//! # fn example() -> cine_tui::error::Result<()> {
//! let services = ServiceHandle::new()?;
//! services.execute(Effect::Search { term: "dune".to_string(), page: 1 });
//!
//! // In the event loop
//! for action in services.drain() {
//!     // reduce(state, action)
//! #   let _ = action;
//! }
//! services.shutdown();
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender};
use libcinescope::service::CinescopeService;
use libcinescope::{Config, ImageUrls, MovieId, MovieStore};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::app::{Action, DetailsPart, Effect};
use crate::error::Result;

/// Service handle for TUI operations
pub struct ServiceHandle {
    service: Arc<CinescopeService>,
    runtime: tokio::runtime::Runtime,
    action_tx: Sender<Action>,
    action_rx: Receiver<Action>,
    persist_tx: Option<mpsc::UnboundedSender<MovieStore>>,
    persist_task: Option<JoinHandle<()>>,
}

impl ServiceHandle {
    /// Create a service handle with configuration from the default location
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The tokio runtime cannot be created
    /// - No API key is configured
    /// - The store database cannot be opened
    pub fn new() -> Result<Self> {
        Self::with_service(CinescopeService::new())
    }

    /// Create a service handle from an explicit configuration
    pub fn from_config(config: Config) -> Result<Self> {
        Self::with_service(CinescopeService::from_config(config))
    }

    /// Create a service handle around a service built on its runtime
    pub fn with_service<F>(build: F) -> Result<Self>
    where
        F: Future<Output = libcinescope::Result<CinescopeService>>,
    {
        let runtime = tokio::runtime::Runtime::new()?;
        let service = Arc::new(runtime.block_on(build)?);

        let (action_tx, action_rx) = unbounded();
        let (persist_tx, persist_rx) = mpsc::unbounded_channel();
        let persist_task = runtime.spawn(persist_loop(Arc::clone(&service), persist_rx));

        Ok(Self {
            service,
            runtime,
            action_tx,
            action_rx,
            persist_tx: Some(persist_tx),
            persist_task: Some(persist_task),
        })
    }

    pub fn images(&self) -> &ImageUrls {
        self.service.images()
    }

    /// Load the persisted store slice
    ///
    /// Blocks; only called once before the first frame.
    pub fn load_store(&self) -> Result<MovieStore> {
        let store = self.runtime.block_on(self.service.load_store())?;
        tracing::debug!(searches = store.searches.len(), "Loaded store");
        Ok(store)
    }

    /// Execute an effect queued by the reducer
    pub fn execute(&self, effect: Effect) {
        match effect {
            Effect::Search { term, page } => self.search(term, page),
            Effect::LoadDetails { instance, movie_id } => self.load_details(instance, movie_id),
            Effect::PersistStore(store) => self.persist(store),
        }
    }

    /// Fetch one search page in the background
    pub fn search(&self, term: String, page: u32) {
        let movies = self.service.movies();
        let tx = self.action_tx.clone();

        self.runtime.spawn(async move {
            let action = match movies.search_movies(&term, page).await {
                Ok(result) => {
                    tracing::debug!(%term, page, results = result.results.len(), "Search page loaded");
                    Action::SearchPageLoaded { term, page: result }
                }
                Err(e) => {
                    tracing::warn!(%term, page, error = %e, "Search request failed");
                    Action::SearchPageFailed {
                        term,
                        page,
                        error: e.to_string(),
                    }
                }
            };
            let _ = tx.send(action);
        });
    }

    /// Run the three details queries as independent tasks
    pub fn load_details(&self, instance: u64, movie_id: MovieId) {
        let send = move |part: DetailsPart| Action::DetailsLoaded { instance, part };

        let movies = self.service.movies();
        let tx = self.action_tx.clone();
        self.runtime.spawn(async move {
            let result = movies.fetch_movie(movie_id).await;
            let _ = tx.send(send(DetailsPart::Movie(log_failure("movie", movie_id, result))));
        });

        let movies = self.service.movies();
        let tx = self.action_tx.clone();
        self.runtime.spawn(async move {
            let result = movies.fetch_movie_images(movie_id).await;
            let _ = tx.send(send(DetailsPart::Images(log_failure("images", movie_id, result))));
        });

        let movies = self.service.movies();
        let tx = self.action_tx.clone();
        self.runtime.spawn(async move {
            let result = movies.fetch_related_movies(movie_id).await;
            let _ = tx.send(send(DetailsPart::Related(log_failure("related", movie_id, result))));
        });
    }

    /// Queue a store snapshot for persistence
    pub fn persist(&self, store: MovieStore) {
        if let Some(tx) = &self.persist_tx {
            if tx.send(store).is_err() {
                tracing::warn!("Persistence task stopped, store snapshot dropped");
            }
        }
    }

    /// Wait up to `timeout` for the next task result
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Action> {
        self.action_rx.recv_timeout(timeout).ok()
    }

    /// All finished task results
    pub fn drain(&self) -> Vec<Action> {
        self.action_rx.try_iter().collect()
    }

    /// Shut down, then hand back `result`
    ///
    /// Teardown errors of the caller must not skip the persistence flush.
    pub fn shutdown_with<T, E>(self, result: std::result::Result<T, E>) -> std::result::Result<T, E> {
        self.shutdown();
        result
    }

    /// Flush pending persistence and stop the runtime
    pub fn shutdown(mut self) {
        self.persist_tx.take();
        if let Some(task) = self.persist_task.take() {
            if let Err(e) = self.runtime.block_on(task) {
                tracing::error!(error = %e, "Persistence task failed");
            }
        }
    }
}

fn log_failure<T>(query: &str, movie_id: MovieId, result: libcinescope::Result<T>) -> std::result::Result<T, String> {
    result.map_err(|e| {
        tracing::warn!(query, movie_id, error = %e, "Details request failed");
        e.to_string()
    })
}

/// Write store snapshots, skipping any that a newer one superseded
async fn persist_loop(service: Arc<CinescopeService>, mut rx: mpsc::UnboundedReceiver<MovieStore>) {
    while let Some(mut store) = rx.recv().await {
        while let Ok(newer) = rx.try_recv() {
            store = newer;
        }
        if let Err(e) = service.db().save_store(&store).await {
            tracing::error!(error = %e, "Failed to persist store");
        }
    }
}
