//! Mock movie API for testing
//!
//! Serves canned responses from memory and records every call, so the
//! pagination and details flows can be verified without network access.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::error::{ApiError, Result};
use crate::movies::MovieApi;
use crate::types::{MovieDetail, MovieId, MovieImages, MovieSummary, RelatedMovies, SearchPage};

/// A call received by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Search { query: String, page: u32 },
    Movie(MovieId),
    Images(MovieId),
    Related(MovieId),
}

/// In-memory [`MovieApi`]
///
/// Unknown search pages return an empty page; unknown movies return a 404
/// status error. `failure` makes every call fail with that error.
#[derive(Debug, Clone, Default)]
pub struct MockMovieApi {
    searches: HashMap<(String, u32), SearchPage<MovieSummary>>,
    movies: HashMap<MovieId, MovieDetail>,
    images: HashMap<MovieId, MovieImages>,
    related: HashMap<MovieId, RelatedMovies>,

    /// Error returned by every call when set
    pub failure: Option<ApiError>,

    /// Delay before answering (simulates network latency)
    pub delay: Duration,

    calls: Arc<Mutex<Vec<MockCall>>>,
}

/// Minimal summary used by tests and demos
pub fn summary(id: MovieId, title: &str) -> MovieSummary {
    MovieSummary {
        id,
        title: title.to_string(),
        overview: format!("Overview of {}", title),
        poster_path: Some(format!("/poster-{}.jpg", id)),
        release_date: Some("2021-09-15".to_string()),
    }
}

/// Minimal detail record used by tests and demos
pub fn detail(id: MovieId, title: &str) -> MovieDetail {
    MovieDetail {
        id,
        title: title.to_string(),
        tagline: Some(format!("The tagline of {}", title)),
        overview: format!("Overview of {}", title),
        poster_path: Some(format!("/poster-{}.jpg", id)),
        release_date: Some("2021-09-15".to_string()),
        vote_average: Some(7.8),
        vote_count: Some(1000),
        runtime: Some(155),
        genres: Vec::new(),
    }
}

impl MockMovieApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `page` for `query`
    pub fn with_search_page(mut self, query: &str, page: SearchPage<MovieSummary>) -> Self {
        self.searches.insert((query.to_string(), page.page), page);
        self
    }

    /// Serve `total_pages` pages of `per_page` generated movies for `query`
    ///
    /// Movie ids are numbered from 1 across pages.
    pub fn with_generated_search(mut self, query: &str, total_pages: u32, per_page: u32) -> Self {
        for page in 1..=total_pages {
            let results = (0..per_page)
                .map(|i| {
                    let id = u64::from((page - 1) * per_page + i + 1);
                    summary(id, &format!("{} #{}", query, id))
                })
                .collect();
            self.searches.insert(
                (query.to_string(), page),
                SearchPage {
                    page,
                    total_pages,
                    total_results: total_pages * per_page,
                    results,
                },
            );
        }
        self
    }

    pub fn with_movie(mut self, movie: MovieDetail) -> Self {
        self.movies.insert(movie.id, movie);
        self
    }

    pub fn with_images(mut self, images: MovieImages) -> Self {
        self.images.insert(images.id, images);
        self
    }

    pub fn with_related(mut self, id: MovieId, related: RelatedMovies) -> Self {
        self.related.insert(id, related);
        self
    }

    pub fn failing(mut self, error: ApiError) -> Self {
        self.failure = Some(error);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Calls received so far, in order
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of search calls received so far
    pub fn search_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, MockCall::Search { .. }))
            .count()
    }

    async fn record(&self, call: MockCall) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        match &self.failure {
            Some(error) => Err(error.clone().into()),
            None => Ok(()),
        }
    }

    fn not_found(path: String) -> crate::error::CinescopeError {
        ApiError::Status { status: 404, url: path }.into()
    }
}

#[async_trait]
impl MovieApi for MockMovieApi {
    async fn search_movies(&self, query: &str, page: u32) -> Result<SearchPage<MovieSummary>> {
        self.record(MockCall::Search {
            query: query.to_string(),
            page,
        })
        .await?;

        Ok(self
            .searches
            .get(&(query.to_string(), page))
            .cloned()
            .unwrap_or(SearchPage {
                page,
                ..SearchPage::default()
            }))
    }

    async fn fetch_movie(&self, id: MovieId) -> Result<MovieDetail> {
        self.record(MockCall::Movie(id)).await?;
        self.movies
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::not_found(format!("/movie/{}", id)))
    }

    async fn fetch_movie_images(&self, id: MovieId) -> Result<MovieImages> {
        self.record(MockCall::Images(id)).await?;
        Ok(self.images.get(&id).cloned().unwrap_or(MovieImages {
            id,
            ..MovieImages::default()
        }))
    }

    async fn fetch_related_movies(&self, id: MovieId) -> Result<RelatedMovies> {
        self.record(MockCall::Related(id)).await?;
        Ok(self.related.get(&id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_generated_search_pages() {
        let api = MockMovieApi::new().with_generated_search("alien", 3, 2);

        let first = api.search_movies("alien", 1).await.unwrap();
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.results.len(), 2);
        assert_eq!(first.results[0].id, 1);

        let third = api.search_movies("alien", 3).await.unwrap();
        assert_eq!(third.results[1].id, 6);

        assert_eq!(api.search_calls(), 2);
    }

    #[tokio::test]
    async fn test_unknown_search_is_empty_page() {
        let api = MockMovieApi::new();
        let page = api.search_movies("nothing", 2).await.unwrap();
        assert_eq!(page.page, 2);
        assert!(page.results.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_movie_is_not_found() {
        let api = MockMovieApi::new();
        let err = api.fetch_movie(99).await.unwrap_err();
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_failure_applies_to_every_call() {
        let api = MockMovieApi::new()
            .with_movie(detail(1, "Dune"))
            .failing(ApiError::Network("offline".to_string()));

        assert!(api.fetch_movie(1).await.is_err());
        assert!(api.fetch_movie_images(1).await.is_err());
        assert_eq!(api.calls(), vec![MockCall::Movie(1), MockCall::Images(1)]);
    }

    #[tokio::test]
    async fn test_clones_share_call_log() {
        let api = MockMovieApi::new();
        let clone = api.clone();
        clone.fetch_related_movies(5).await.unwrap();
        assert_eq!(api.calls(), vec![MockCall::Related(5)]);
    }
}
