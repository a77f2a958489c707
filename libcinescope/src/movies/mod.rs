//! Movie endpoints
//!
//! Four read-only queries over the metadata API, behind the [`MovieApi`]
//! trait so screens and commands can run against [`mock::MockMovieApi`].
//!
//! # Examples
//!
//! ```no_run
//! use libcinescope::movies::{MovieApi, TmdbMovieApi};
//! use libcinescope::api::ApiClient;
//!
//! # async fn example() -> libcinescope::Result<()> {
//! let client = ApiClient::new("https://api.themoviedb.org/3", "my-key")?;
//! let movies = TmdbMovieApi::new(client);
//!
//! let page = movies.search_movies("dune", 1).await?;
//! for movie in &page.results {
//!     println!("{} ({})", movie.title, movie.release_date.as_deref().unwrap_or("?"));
//! }
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::api::ApiClient;
use crate::error::Result;
use crate::types::{MovieDetail, MovieId, MovieImages, MovieSummary, RelatedMovies, SearchPage};

// Available outside tests so the TUI and CLI crates can drive their flows offline
pub mod mock;

/// Read-only movie metadata queries
#[async_trait]
pub trait MovieApi: Send + Sync {
    /// Search movies by free text, one page at a time (pages start at 1)
    async fn search_movies(&self, query: &str, page: u32) -> Result<SearchPage<MovieSummary>>;

    /// Fetch the full record of one movie
    async fn fetch_movie(&self, id: MovieId) -> Result<MovieDetail>;

    /// Fetch the poster and backdrop images of one movie
    async fn fetch_movie_images(&self, id: MovieId) -> Result<MovieImages>;

    /// Fetch movies similar to one movie
    async fn fetch_related_movies(&self, id: MovieId) -> Result<RelatedMovies>;
}

/// [`MovieApi`] backed by the TMDB v3 REST endpoints
#[derive(Debug)]
pub struct TmdbMovieApi {
    client: ApiClient,
}

impl TmdbMovieApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MovieApi for TmdbMovieApi {
    async fn search_movies(&self, query: &str, page: u32) -> Result<SearchPage<MovieSummary>> {
        let params = [("page", page.to_string()), ("query", query.to_string())];
        self.client.get_json("/search/movie", &params).await
    }

    async fn fetch_movie(&self, id: MovieId) -> Result<MovieDetail> {
        self.client.get_json(&format!("/movie/{}", id), &[]).await
    }

    async fn fetch_movie_images(&self, id: MovieId) -> Result<MovieImages> {
        self.client.get_json(&format!("/movie/{}/images", id), &[]).await
    }

    async fn fetch_related_movies(&self, id: MovieId) -> Result<RelatedMovies> {
        self.client.get_json(&format!("/movie/{}/similar", id), &[]).await
    }
}
