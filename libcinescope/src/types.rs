//! Response types of the movie metadata API
//!
//! These mirror the TMDB v3 JSON payloads. They are read-only from the
//! client's point of view. Fields the API may omit are optional or default to
//! empty values, so a sparse response renders as blanks instead of failing.

use serde::{Deserialize, Serialize};

/// Movie identifier as used by the API
pub type MovieId = u64;

/// One page of a paginated listing (search results, similar movies)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage<T> {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

fn first_page() -> u32 {
    1
}

impl<T> Default for SearchPage<T> {
    fn default() -> Self {
        Self {
            page: 1,
            total_pages: 0,
            total_results: 0,
            results: Vec::new(),
        }
    }
}

/// A movie as it appears in search and related listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

/// Full movie record returned by `/movie/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// One image entry of `/movie/{id}/images`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub file_path: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub aspect_ratio: f64,
    #[serde(default)]
    pub iso_639_1: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieImages {
    #[serde(default)]
    pub id: MovieId,
    #[serde(default)]
    pub posters: Vec<ImageInfo>,
    #[serde(default)]
    pub backdrops: Vec<ImageInfo>,
}

impl MovieImages {
    pub fn has_posters(&self) -> bool {
        !self.posters.is_empty()
    }
}

/// Response of `/movie/{id}/similar`
pub type RelatedMovies = SearchPage<MovieSummary>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_page_parses_tmdb_payload() {
        let json = r#"{
            "page": 1,
            "total_pages": 3,
            "total_results": 55,
            "results": [
                {"id": 438631, "title": "Dune", "overview": "Paul Atreides...",
                 "poster_path": "/d5NXSklXo0qyIYkgV94XAgMIckC.jpg",
                 "release_date": "2021-09-15", "vote_average": 7.8}
            ]
        }"#;

        let page: SearchPage<MovieSummary> = serde_json::from_str(json).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.results[0].title, "Dune");
        assert_eq!(page.results[0].release_date.as_deref(), Some("2021-09-15"));
    }

    #[test]
    fn test_sparse_summary_degrades_to_blanks() {
        let summary: MovieSummary = serde_json::from_str(r#"{"id": 7, "poster_path": null}"#).unwrap();
        assert_eq!(summary.id, 7);
        assert_eq!(summary.title, "");
        assert!(summary.poster_path.is_none());
        assert!(summary.release_date.is_none());
    }

    #[test]
    fn test_empty_page_object_uses_defaults() {
        let page: SearchPage<MovieSummary> = serde_json::from_str("{}").unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
        assert!(page.results.is_empty());
    }

    #[test]
    fn test_movie_images_without_posters() {
        let images: MovieImages =
            serde_json::from_str(r#"{"id": 1, "backdrops": [], "posters": []}"#).unwrap();
        assert!(!images.has_posters());
    }
}
