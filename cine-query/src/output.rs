//! Rendering of command results as text, JSON or JSON lines

use std::fmt::Write;

use clap::ValueEnum;
use libcinescope::service::MovieDetails;
use libcinescope::{ImageUrls, MovieStore, MovieSummary, Result, SearchPage};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Jsonl,
}

fn json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let encoded = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(encoded)
}

fn year(release_date: Option<&str>) -> Option<&str> {
    release_date.and_then(|d| d.get(..4))
}

pub fn search(page: &SearchPage<MovieSummary>, format: Format) -> Result<String> {
    match format {
        Format::Json => Ok(json(page, true)? + "\n"),
        Format::Jsonl => {
            let mut out = String::new();
            for movie in &page.results {
                out.push_str(&json(movie, false)?);
                out.push('\n');
            }
            Ok(out)
        }
        Format::Text => {
            if page.results.is_empty() {
                return Ok("No movies found.\n".to_string());
            }

            let mut out = String::new();
            for movie in &page.results {
                let _ = match year(movie.release_date.as_deref()) {
                    Some(year) => writeln!(out, "{:>8}  {} ({})", movie.id, movie.title, year),
                    None => writeln!(out, "{:>8}  {}", movie.id, movie.title),
                };
            }
            let _ = writeln!(
                out,
                "\npage {} of {} ({} results)",
                page.page, page.total_pages, page.total_results
            );
            Ok(out)
        }
    }
}

/// Details plus the poster URLs the text view shows
#[derive(Serialize)]
struct DetailsView<'a> {
    #[serde(flatten)]
    details: &'a MovieDetails,
    poster_url: Option<String>,
    gallery: Vec<String>,
}

pub fn details(details: &MovieDetails, images: &ImageUrls, format: Format) -> Result<String> {
    let movie = &details.movie;
    let view = DetailsView {
        details,
        poster_url: images.poster(movie.poster_path.as_deref()),
        gallery: details
            .images
            .posters
            .iter()
            .map(|p| images.url(&p.file_path))
            .collect(),
    };

    match format {
        Format::Json => Ok(json(&view, true)? + "\n"),
        Format::Jsonl => Ok(json(&view, false)? + "\n"),
        Format::Text => {
            let mut out = String::new();
            let _ = match movie.release_date.as_deref().filter(|d| !d.is_empty()) {
                Some(date) => writeln!(out, "{} ({})", movie.title, date),
                None => writeln!(out, "{}", movie.title),
            };
            if let Some(tagline) = movie.tagline.as_deref().filter(|t| !t.is_empty()) {
                let _ = writeln!(out, "{}", tagline);
            }
            if let Some(rating) = movie.vote_average {
                let _ = writeln!(out, "Rating: {:.1}", rating);
            }
            if let Some(url) = &view.poster_url {
                let _ = writeln!(out, "Poster: {}", url);
            }
            let _ = writeln!(out, "\n{}", movie.overview);

            if !view.gallery.is_empty() {
                let _ = writeln!(out, "\nPosters:");
                for url in &view.gallery {
                    let _ = writeln!(out, "  {}", url);
                }
            }

            let _ = writeln!(out, "\nRelated:");
            if details.related.results.is_empty() {
                let _ = writeln!(out, "  No related movies found.");
            }
            for related in &details.related.results {
                let _ = writeln!(out, "  {:>8}  {}", related.id, related.title);
            }
            Ok(out)
        }
    }
}

pub fn history(store: &MovieStore, format: Format) -> Result<String> {
    match format {
        Format::Json => Ok(json(&store.searches, true)? + "\n"),
        Format::Jsonl => {
            let mut out = String::new();
            for entry in &store.searches {
                out.push_str(&json(entry, false)?);
                out.push('\n');
            }
            Ok(out)
        }
        Format::Text => {
            let mut out = String::new();
            for (index, entry) in store.searches.iter().enumerate() {
                let _ = writeln!(out, "{}  {}", index, entry.keyword);
            }
            Ok(out)
        }
    }
}
