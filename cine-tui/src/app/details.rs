//! Details screen state
//!
//! One instance per navigation push. Each instance waits for three
//! independent queries and owns its gallery and related-list selection.

use libcinescope::types::ImageInfo;
use libcinescope::{MovieDetail, MovieId, MovieImages, MovieSummary, RelatedMovies};

use super::actions::DetailsPart;

/// Progress of one query
#[derive(Debug, Clone, PartialEq)]
pub enum Fetch<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Fetch<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Fetch::Ready(value) => Some(value),
            _ => None,
        }
    }

    fn from_result(result: Result<T, String>) -> Self {
        match result {
            Ok(value) => Fetch::Ready(value),
            Err(error) => Fetch::Failed(error),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DetailsState {
    /// Distinguishes repeated pushes of the same movie
    pub instance: u64,
    pub movie_id: MovieId,
    pub movie: Fetch<MovieDetail>,
    pub images: Fetch<MovieImages>,
    pub related: Fetch<RelatedMovies>,
    pub gallery_open: bool,
    pub gallery_selected: usize,
    pub related_selected: usize,
}

impl DetailsState {
    pub fn new(instance: u64, movie_id: MovieId) -> Self {
        Self {
            instance,
            movie_id,
            movie: Fetch::Loading,
            images: Fetch::Loading,
            related: Fetch::Loading,
            gallery_open: false,
            gallery_selected: 0,
            related_selected: 0,
        }
    }

    /// True until all three queries succeeded; failures keep the loading view
    pub fn is_loading(&self) -> bool {
        self.movie.ready().is_none() || self.images.ready().is_none() || self.related.ready().is_none()
    }

    pub fn apply(&mut self, part: DetailsPart) {
        match part {
            DetailsPart::Movie(result) => self.movie = Fetch::from_result(result),
            DetailsPart::Images(result) => self.images = Fetch::from_result(result),
            DetailsPart::Related(result) => self.related = Fetch::from_result(result),
        }
    }

    pub fn posters(&self) -> &[ImageInfo] {
        self.images.ready().map(|i| i.posters.as_slice()).unwrap_or(&[])
    }

    pub fn related_movies(&self) -> &[MovieSummary] {
        self.related.ready().map(|r| r.results.as_slice()).unwrap_or(&[])
    }

    /// Open the gallery; does nothing when there is no poster to show
    pub fn open_gallery(&mut self) -> bool {
        if !self.images.ready().is_some_and(MovieImages::has_posters) {
            return false;
        }
        self.gallery_open = true;
        self.gallery_selected = 0;
        true
    }

    pub fn close_gallery(&mut self) {
        self.gallery_open = false;
    }

    pub fn move_gallery(&mut self, delta: isize) {
        let count = self.posters().len();
        if count > 0 {
            self.gallery_selected = self.gallery_selected.saturating_add_signed(delta).min(count - 1);
        }
    }

    pub fn move_related(&mut self, delta: isize) {
        let count = self.related_movies().len();
        if count > 0 {
            self.related_selected = self.related_selected.saturating_add_signed(delta).min(count - 1);
        }
    }

    pub fn selected_related(&self) -> Option<MovieId> {
        self.related_movies().get(self.related_selected).map(|m| m.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libcinescope::movies::mock::{detail, summary};
    use libcinescope::SearchPage;

    fn poster(path: &str) -> ImageInfo {
        ImageInfo {
            file_path: path.to_string(),
            width: 500,
            height: 750,
            aspect_ratio: 0.667,
            iso_639_1: None,
        }
    }

    fn loaded(posters: Vec<ImageInfo>, related: Vec<MovieSummary>) -> DetailsState {
        let mut details = DetailsState::new(1, 42);
        details.apply(DetailsPart::Movie(Ok(detail(42, "Dune"))));
        details.apply(DetailsPart::Images(Ok(MovieImages {
            id: 42,
            posters,
            backdrops: Vec::new(),
        })));
        details.apply(DetailsPart::Related(Ok(SearchPage {
            results: related,
            ..SearchPage::default()
        })));
        details
    }

    #[test]
    fn test_loading_until_all_three_arrive() {
        let mut details = DetailsState::new(1, 42);
        assert!(details.is_loading());

        details.apply(DetailsPart::Movie(Ok(detail(42, "Dune"))));
        details.apply(DetailsPart::Related(Ok(SearchPage::default())));
        assert!(details.is_loading());

        details.apply(DetailsPart::Images(Ok(MovieImages::default())));
        assert!(!details.is_loading());
    }

    #[test]
    fn test_failure_keeps_loading_view() {
        let mut details = loaded(vec![], vec![]);
        details.apply(DetailsPart::Movie(Err("boom".to_string())));
        assert!(details.is_loading());
        assert_eq!(details.movie, Fetch::Failed("boom".to_string()));
    }

    #[test]
    fn test_gallery_needs_posters() {
        let mut details = loaded(vec![], vec![]);
        assert!(!details.open_gallery());
        assert!(!details.gallery_open);

        let mut details = loaded(vec![poster("/a.jpg"), poster("/b.jpg")], vec![]);
        assert!(details.open_gallery());
        assert!(details.gallery_open);

        details.move_gallery(5);
        assert_eq!(details.gallery_selected, 1);
        details.close_gallery();
        assert!(!details.gallery_open);
    }

    #[test]
    fn test_gallery_closed_while_images_loading() {
        let mut details = DetailsState::new(1, 42);
        assert!(!details.open_gallery());
    }

    #[test]
    fn test_related_selection() {
        let mut details = loaded(vec![], vec![summary(7, "A"), summary(8, "B")]);
        assert_eq!(details.selected_related(), Some(7));
        details.move_related(1);
        assert_eq!(details.selected_related(), Some(8));
        details.move_related(1);
        assert_eq!(details.selected_related(), Some(8));
        details.move_related(-4);
        assert_eq!(details.selected_related(), Some(7));
    }

    #[test]
    fn test_no_related_selection_when_empty() {
        let details = loaded(vec![], vec![]);
        assert_eq!(details.selected_related(), None);
    }
}
