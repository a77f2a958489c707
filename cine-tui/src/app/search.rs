//! Search results and pagination
//!
//! Keeps the submitted term apart from the search input, accumulates result
//! pages and decides when the next page may be requested.

use libcinescope::{MovieSummary, SearchPage};

/// Rows from the end of the list at which the next page is requested
pub const LOAD_MORE_PADDING: usize = 1;

/// Position of the visible window over the result list, in rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollMetrics {
    pub viewport: usize,
    pub offset: usize,
    pub content: usize,
}

impl ScrollMetrics {
    /// Whether the window reaches within `padding` rows of the content end
    pub fn is_near_end(&self, padding: usize) -> bool {
        self.viewport + self.offset + padding >= self.content
    }
}

/// A page request the event loop has to issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub term: String,
    pub page: u32,
}

/// State of the search results panel
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Last submitted term
    pub term: String,

    /// Results of every page received for `term`
    pub movies: Vec<MovieSummary>,

    /// Page number of the last non-empty response
    pub current_page: u32,

    /// `total_pages` of the last response, if one arrived
    pub total_pages: Option<u32>,

    /// Page requested and not answered yet
    pub in_flight: Option<u32>,

    /// Set and cleared within a single refresh step
    pub refreshing: bool,

    /// Selected result row
    pub selected: usize,

    /// First visible result row
    pub offset: usize,
}

impl SearchState {
    /// Start a new search for `term` at page 1
    pub fn submit(&mut self, term: String) -> PageRequest {
        *self = SearchState {
            term,
            ..SearchState::default()
        };
        self.mark_requested(1)
    }

    /// Next page to request, if the last response reported one
    pub fn next_page(&self) -> Option<u32> {
        let total = self.total_pages?;
        let next = self.current_page + 1;
        (next <= total).then_some(next)
    }

    /// Issue a request for `page` unless that exact page is already pending
    pub fn request(&mut self, page: u32) -> Option<PageRequest> {
        if self.term.is_empty() || self.in_flight == Some(page) {
            return None;
        }
        Some(self.mark_requested(page))
    }

    fn mark_requested(&mut self, page: u32) -> PageRequest {
        self.in_flight = Some(page);
        PageRequest {
            term: self.term.clone(),
            page,
        }
    }

    /// Request the next page when `metrics` is near the end of the list
    pub fn load_more(&mut self, metrics: ScrollMetrics) -> Option<PageRequest> {
        if self.refreshing || !metrics.is_near_end(LOAD_MORE_PADDING) {
            return None;
        }
        let next = self.next_page()?;
        self.request(next)
    }

    /// Clear accumulated results and reload page 1 of the current term
    ///
    /// The `refreshing` flag never outlives this call, so it does not
    /// reflect the in-flight reload.
    pub fn refresh(&mut self) -> Option<PageRequest> {
        if self.term.is_empty() {
            return None;
        }
        self.refreshing = true;
        self.movies.clear();
        self.selected = 0;
        self.offset = 0;
        let request = self.mark_requested(1);
        self.refreshing = false;
        Some(request)
    }

    /// Apply a response; returns false when it was not for the pending request
    pub fn apply_page(&mut self, term: &str, page: SearchPage<MovieSummary>) -> bool {
        if term != self.term || self.in_flight != Some(page.page) {
            return false;
        }
        self.in_flight = None;
        self.total_pages = Some(page.total_pages);

        if !page.results.is_empty() {
            self.current_page = page.page;
            self.movies.extend(page.results);
        }
        true
    }

    /// Forget a failed request so it can be issued again
    pub fn fail(&mut self, term: &str, page: u32) {
        if term == self.term && self.in_flight == Some(page) {
            self.in_flight = None;
        }
    }

    /// First page is pending and nothing is shown yet
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some() && self.movies.is_empty()
    }

    pub fn selected_movie(&self) -> Option<&MovieSummary> {
        self.movies.get(self.selected)
    }

    /// Move the selection and keep it inside a window of `viewport` rows
    pub fn scroll_by(&mut self, delta: isize, viewport: usize) {
        if self.movies.is_empty() {
            return;
        }
        let last = self.movies.len() - 1;
        self.selected = self.selected.saturating_add_signed(delta).min(last);
        self.keep_selection_visible(viewport);
    }

    /// Re-clamp the window after the viewport changed
    pub fn keep_selection_visible(&mut self, viewport: usize) {
        let viewport = viewport.max(1);
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + viewport {
            self.offset = self.selected + 1 - viewport;
        }
    }

    pub fn metrics(&self, viewport: usize) -> ScrollMetrics {
        ScrollMetrics {
            viewport,
            offset: self.offset,
            content: self.movies.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libcinescope::movies::mock::summary;

    fn page(number: u32, total_pages: u32, ids: std::ops::Range<u64>) -> SearchPage<MovieSummary> {
        SearchPage {
            page: number,
            total_pages,
            total_results: total_pages * 20,
            results: ids.map(|id| summary(id, "m")).collect(),
        }
    }

    #[test]
    fn test_submit_requests_first_page() {
        let mut search = SearchState::default();
        let request = search.submit("dune".to_string());
        assert_eq!(request, PageRequest { term: "dune".to_string(), page: 1 });
        assert!(search.is_loading());
    }

    #[test]
    fn test_submit_clears_previous_results() {
        let mut search = SearchState::default();
        search.submit("dune".to_string());
        search.apply_page("dune", page(1, 2, 1..4));
        search.submit("alien".to_string());
        assert!(search.movies.is_empty());
        assert_eq!(search.total_pages, None);
        assert_eq!(search.term, "alien");
    }

    #[test]
    fn test_pages_accumulate() {
        let mut search = SearchState::default();
        search.submit("dune".to_string());
        assert!(search.apply_page("dune", page(1, 2, 1..4)));
        assert_eq!(search.next_page(), Some(2));

        search.request(2).unwrap();
        assert!(search.apply_page("dune", page(2, 2, 4..6)));
        assert_eq!(search.movies.len(), 5);
        assert_eq!(search.current_page, 2);
        assert_eq!(search.next_page(), None);
    }

    #[test]
    fn test_no_next_page_before_first_response() {
        let mut search = SearchState::default();
        search.submit("dune".to_string());
        assert_eq!(search.next_page(), None);
    }

    #[test]
    fn test_never_requests_past_total_pages() {
        let mut search = SearchState::default();
        search.submit("dune".to_string());
        search.apply_page("dune", page(1, 1, 1..3));

        let at_end = search.metrics(10);
        assert!(at_end.is_near_end(LOAD_MORE_PADDING));
        assert_eq!(search.load_more(at_end), None);
    }

    #[test]
    fn test_pending_page_is_not_requested_twice() {
        let mut search = SearchState::default();
        search.submit("dune".to_string());
        search.apply_page("dune", page(1, 3, 1..3));

        let metrics = search.metrics(10);
        assert_eq!(search.load_more(metrics).map(|r| r.page), Some(2));
        assert_eq!(search.load_more(metrics), None);
    }

    #[test]
    fn test_load_more_waits_for_scroll_position() {
        let mut search = SearchState::default();
        search.submit("dune".to_string());
        search.apply_page("dune", page(1, 3, 0..20));

        assert_eq!(search.load_more(search.metrics(5)), None);

        search.scroll_by(18, 5);
        assert_eq!(search.offset, 14);
        assert_eq!(search.load_more(search.metrics(5)).map(|r| r.page), Some(2));
    }

    #[test]
    fn test_empty_page_keeps_current_page() {
        let mut search = SearchState::default();
        search.submit("dune".to_string());
        search.apply_page("dune", page(1, 3, 1..3));
        search.request(2).unwrap();
        search.apply_page("dune", page(2, 3, 0..0));

        assert_eq!(search.current_page, 1);
        assert_eq!(search.movies.len(), 2);
    }

    #[test]
    fn test_response_for_other_term_is_ignored() {
        let mut search = SearchState::default();
        search.submit("dune".to_string());
        search.submit("alien".to_string());

        assert!(!search.apply_page("dune", page(1, 1, 1..3)));
        assert!(search.movies.is_empty());
        assert!(search.is_loading());
    }

    #[test]
    fn test_refresh_reloads_first_page() {
        let mut search = SearchState::default();
        search.submit("dune".to_string());
        search.apply_page("dune", page(1, 3, 1..10));
        search.scroll_by(5, 3);

        let request = search.refresh().unwrap();
        assert_eq!(request.page, 1);
        assert_eq!(request.term, "dune");
        assert!(search.movies.is_empty());
        assert_eq!(search.selected, 0);
        assert!(!search.refreshing);
    }

    #[test]
    fn test_refresh_without_term_does_nothing() {
        let mut search = SearchState::default();
        assert_eq!(search.refresh(), None);
    }

    #[test]
    fn test_stale_page_after_refresh_is_ignored() {
        let mut search = SearchState::default();
        search.submit("dune".to_string());
        search.apply_page("dune", page(1, 3, 1..3));
        search.request(2).unwrap();
        search.refresh().unwrap();

        assert!(!search.apply_page("dune", page(2, 3, 3..5)));
        assert!(search.apply_page("dune", page(1, 3, 1..3)));
        assert_eq!(search.movies.len(), 2);
    }

    #[test]
    fn test_failed_request_can_be_retried() {
        let mut search = SearchState::default();
        search.submit("dune".to_string());
        search.fail("dune", 1);
        assert!(!search.is_loading());
        assert!(search.request(1).is_some());
    }

    #[test]
    fn test_scroll_clamps_to_list() {
        let mut search = SearchState::default();
        search.submit("dune".to_string());
        search.apply_page("dune", page(1, 1, 0..4));

        search.scroll_by(-3, 2);
        assert_eq!(search.selected, 0);
        search.scroll_by(10, 2);
        assert_eq!(search.selected, 3);
        assert_eq!(search.offset, 2);
    }

    #[test]
    fn test_near_end_threshold() {
        let metrics = ScrollMetrics { viewport: 5, offset: 3, content: 10 };
        assert!(!metrics.is_near_end(1));
        let metrics = ScrollMetrics { viewport: 5, offset: 4, content: 10 };
        assert!(metrics.is_near_end(1));
    }
}
