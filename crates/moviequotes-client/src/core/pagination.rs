//! Page cursors and paginated request paths.

use url::form_urlencoded;

/// Next page to request for a paginated collection. Pages start at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageCursor {
    next_page: u32,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self { next_page: 1 }
    }
}

impl PageCursor {
    /// Cursor positioned at page 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Page the next load will request.
    #[must_use]
    pub const fn next_page(self) -> u32 {
        self.next_page
    }

    /// Number of pages successfully appended so far.
    #[must_use]
    pub const fn loaded_pages(self) -> u32 {
        self.next_page.saturating_sub(1)
    }

    /// Move past a successfully appended page.
    pub const fn advance(&mut self) {
        self.next_page = self.next_page.saturating_add(1);
    }

    /// Start over at page 1.
    pub const fn reset(&mut self) {
        self.next_page = 1;
    }
}

/// Why a page load was not dispatched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// A load for the same query is still running.
    InFlight,
    /// The first page is already present.
    AlreadyLoaded,
    /// Nothing has been loaded yet, so there is nothing to refresh.
    NothingLoaded,
}

/// Outcome of a page load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageLoad {
    /// A page was fetched and applied.
    Loaded {
        /// Page number applied (the last one for multi-page refreshes).
        page: u32,
        /// Entities received.
        count: usize,
    },
    /// No request was dispatched.
    Skipped(SkipReason),
    /// The response arrived after the query changed and was discarded.
    Stale,
}

impl PageLoad {
    /// Whether a request was dispatched and applied.
    #[must_use]
    pub const fn is_loaded(self) -> bool {
        matches!(self, Self::Loaded { .. })
    }
}

/// Build `collection?page=N[&search=q]`.
#[must_use]
pub fn page_path(collection: &str, page: u32, search: Option<&str>) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("page", &page.to_string());
    if let Some(search) = search {
        query.append_pair("search", search);
    }
    format!("{collection}?{}", query.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_starts_at_first_page() {
        let mut cursor = PageCursor::new();
        assert_eq!(cursor.next_page(), 1);
        assert_eq!(cursor.loaded_pages(), 0);
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.next_page(), 3);
        assert_eq!(cursor.loaded_pages(), 2);
        cursor.reset();
        assert_eq!(cursor, PageCursor::default());
    }

    #[test]
    fn page_path_encodes_search() {
        assert_eq!(page_path("/api/quotes", 2, None), "/api/quotes?page=2");
        assert_eq!(
            page_path("/api/movies", 1, Some("the thing")),
            "/api/movies?page=1&search=the+thing"
        );
    }
}
