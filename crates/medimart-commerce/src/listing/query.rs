//! Listing criteria.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest page size a listing accepts.
pub const MAX_PAGE_SIZE: usize = 100;

/// Field a listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Name,
    GenericName,
    Company,
    Category,
    Price,
    Discount,
    Stock,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::GenericName => "generic_name",
            SortKey::Company => "company",
            SortKey::Category => "category",
            SortKey::Price => "price",
            SortKey::Discount => "discount",
            SortKey::Stock => "stock",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::Name => "Name",
            SortKey::GenericName => "Generic Name",
            SortKey::Company => "Company",
            SortKey::Category => "Category",
            SortKey::Price => "Price",
            SortKey::Discount => "Discount",
            SortKey::Stock => "Stock",
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "name" => Ok(SortKey::Name),
            "generic_name" | "genericname" => Ok(SortKey::GenericName),
            "company" => Ok(SortKey::Company),
            "category" => Ok(SortKey::Category),
            "price" | "price_per_unit" => Ok(SortKey::Price),
            "discount" => Ok(SortKey::Discount),
            "stock" => Ok(SortKey::Stock),
            other => Err(format!("unknown sort key: {}", other)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smaller first.
    #[default]
    Asc,
    /// Larger first.
    Desc,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort direction: {}", other)),
        }
    }
}

/// Search, sort and page criteria for one listing view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingQuery {
    /// Free-text search term; blank matches everything.
    pub search: String,
    /// Sort field; `None` keeps the input order.
    pub sort: Option<SortKey>,
    /// Sort direction.
    pub direction: SortDirection,
    /// Current page (1-indexed).
    pub page: usize,
    /// Items per page.
    pub page_size: usize,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingQuery {
    /// Default items per page.
    pub const DEFAULT_PAGE_SIZE: usize = 10;

    /// First page, unsorted, no search.
    pub fn new() -> Self {
        Self {
            search: String::new(),
            sort: None,
            direction: SortDirection::Asc,
            page: 1,
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }

    /// Set the search term.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    /// Set sort field and direction.
    pub fn with_sort(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.sort = Some(key);
        self.direction = direction;
        self
    }

    /// Set pagination. Page is clamped to at least 1, page size to
    /// 1..=MAX_PAGE_SIZE.
    pub fn with_pagination(mut self, page: usize, page_size: usize) -> Self {
        self.page = page.max(1);
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    /// Index of the first item on the current page.
    pub fn offset(&self) -> usize {
        (self.page.max(1) - 1).saturating_mul(self.page_size.max(1))
    }
}

/// Listing criteria that keep the page number consistent.
///
/// Any change to the search term, sort field, sort direction or page size
/// sends the view back to page 1, so a stale page number never shows a
/// blank result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingState {
    query: ListingQuery,
}

impl ListingState {
    /// Start on page 1 with the given page size.
    pub fn new(page_size: usize) -> Self {
        Self {
            query: ListingQuery::new().with_pagination(1, page_size),
        }
    }

    /// The current criteria.
    pub fn query(&self) -> &ListingQuery {
        &self.query
    }

    /// Current page.
    pub fn page(&self) -> usize {
        self.query.page
    }

    /// Change the search term.
    pub fn set_search(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term != self.query.search {
            self.query.search = term;
            self.reset_page();
        }
    }

    /// Change the sort field and direction.
    pub fn set_sort(&mut self, key: Option<SortKey>, direction: SortDirection) {
        if key != self.query.sort || direction != self.query.direction {
            self.query.sort = key;
            self.query.direction = direction;
            self.reset_page();
        }
    }

    /// Flip the sort direction, keeping the field.
    pub fn toggle_direction(&mut self) {
        let direction = match self.query.direction {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        };
        self.set_sort(self.query.sort, direction);
    }

    /// Change the page size.
    pub fn set_page_size(&mut self, page_size: usize) {
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        if page_size != self.query.page_size {
            self.query.page_size = page_size;
            self.reset_page();
        }
    }

    /// Jump to a page (at least 1).
    pub fn go_to_page(&mut self, page: usize) {
        self.query.page = page.max(1);
    }

    fn reset_page(&mut self) {
        if self.query.page != 1 {
            tracing::trace!(from = self.query.page, "listing criteria changed, back to page 1");
        }
        self.query.page = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_builder() {
        let query = ListingQuery::new()
            .with_search("napa")
            .with_sort(SortKey::Price, SortDirection::Desc)
            .with_pagination(2, 10);

        assert_eq!(query.page, 2);
        assert_eq!(query.page_size, 10);
        assert_eq!(query.offset(), 10);
        assert_eq!(query.sort, Some(SortKey::Price));
    }

    #[test]
    fn test_pagination_is_clamped() {
        let query = ListingQuery::new().with_pagination(0, 0);
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 1);

        let query = ListingQuery::new().with_pagination(1, 10_000);
        assert_eq!(query.page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_sort_change_resets_page() {
        let mut state = ListingState::new(10);
        state.go_to_page(3);
        assert_eq!(state.page(), 3);

        state.set_sort(Some(SortKey::Name), SortDirection::Asc);
        assert_eq!(state.page(), 1);

        state.go_to_page(3);
        state.toggle_direction();
        assert_eq!(state.page(), 1);
        assert_eq!(state.query().direction, SortDirection::Desc);
    }

    #[test]
    fn test_search_and_page_size_changes_reset_page() {
        let mut state = ListingState::new(10);

        state.go_to_page(4);
        state.set_search("ace");
        assert_eq!(state.page(), 1);

        state.go_to_page(4);
        state.set_page_size(25);
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_unchanged_criteria_keep_page() {
        let mut state = ListingState::new(10);
        state.set_search("ace");
        state.go_to_page(2);

        state.set_search("ace");
        state.set_page_size(10);
        assert_eq!(state.page(), 2);
    }

    #[test]
    fn test_parse_sort_key() {
        assert_eq!("generic-name".parse::<SortKey>(), Ok(SortKey::GenericName));
        assert_eq!("PRICE".parse::<SortKey>(), Ok(SortKey::Price));
        assert!("weight".parse::<SortKey>().is_err());
        assert_eq!("desc".parse::<SortDirection>(), Ok(SortDirection::Desc));
    }
}
