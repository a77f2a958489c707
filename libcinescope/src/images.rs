//! Image URL construction
//!
//! The API returns image paths like `/abc.jpg`; the full URI is built by
//! templating them onto the image host with a size segment.

use crate::config::ApiConfig;

/// Builds image URIs for poster paths returned by the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrls {
    base_url: String,
    size: String,
}

impl ImageUrls {
    pub fn new(base_url: impl Into<String>, size: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            size: size.into().trim_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(config.image_base_url.clone(), config.image_size.clone())
    }

    /// Full URI for an image path, e.g. `https://image.tmdb.org/t/p/w500/abc.jpg`
    pub fn url(&self, file_path: &str) -> String {
        let path = file_path.trim_start_matches('/');
        format!("{}/{}/{}", self.base_url, self.size, path)
    }

    /// URI for an optional poster path; absent or blank paths yield `None`
    pub fn poster(&self, poster_path: Option<&str>) -> Option<String> {
        poster_path
            .filter(|p| !p.trim().is_empty())
            .map(|p| self.url(p))
    }
}

impl Default for ImageUrls {
    fn default() -> Self {
        Self::from_config(&ApiConfig::default())
    }
}
