//! Paged listing results.

use crate::listing::{matches_search, Listable, ListingQuery, SortDirection};
use serde::{Deserialize, Serialize};

/// Pagination information.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
    /// Total number of matching items.
    pub total: usize,
    /// Total number of pages; 0 when nothing matched.
    pub total_pages: usize,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info.
    pub fn new(page: usize, per_page: usize, total: usize) -> Self {
        let page = page.max(1);
        let per_page = per_page.max(1);
        let total_pages = total.div_ceil(per_page);

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Index of the first item on this page. Saturates for huge page numbers.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// Get page numbers for display (e.g., [3, 4, 5, 6, 7]).
    pub fn page_numbers(&self, max_visible: usize) -> Vec<usize> {
        if self.total_pages <= max_visible {
            return (1..=self.total_pages).collect();
        }

        let half = max_visible / 2;
        let start = self.page.saturating_sub(half).max(1);
        let end = start
            .saturating_add(max_visible.saturating_sub(1))
            .min(self.total_pages);
        let start = (end + 1).saturating_sub(max_visible).max(1);

        (start..=end).collect()
    }

    /// Check if on first page.
    pub fn is_first(&self) -> bool {
        self.page == 1
    }

    /// Check if on (or past) the last page.
    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }

    /// Whether the page lies beyond the results.
    pub fn is_out_of_range(&self) -> bool {
        self.page > self.total_pages
    }

    /// 1-indexed position of the first item shown, or 0 if none.
    pub fn start_item(&self) -> usize {
        if self.is_out_of_range() {
            0
        } else {
            self.offset() + 1
        }
    }

    /// 1-indexed position of the last item shown, or 0 if none.
    pub fn end_item(&self) -> usize {
        if self.is_out_of_range() {
            0
        } else {
            self.offset().saturating_add(self.per_page).min(self.total)
        }
    }
}

/// One page of a listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListingPage<T> {
    /// Items on this page, in display order.
    pub items: Vec<T>,
    /// Pagination info.
    pub pagination: Pagination,
}

impl<T> ListingPage<T> {
    /// Check if the page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total pages for the filtered result.
    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages
    }

    /// Transform the items.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> ListingPage<U> {
        ListingPage {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

/// Filter, sort and paginate `items`.
///
/// The sort is stable in both directions: items that compare equal keep
/// their input order. A page past the end yields an empty slice; it is the
/// caller's job to go back to page 1 when the criteria change (see
/// [`crate::listing::ListingState`]).
pub fn view<'a, T: Listable>(items: &'a [T], query: &ListingQuery) -> ListingPage<&'a T> {
    let filtered = items.iter().filter(|item| matches_search(*item, &query.search));

    let ordered: Vec<&T> = match query.sort {
        Some(key) => {
            let mut keyed: Vec<_> = filtered.map(|item| (item.sort_value(key), item)).collect();
            match query.direction {
                SortDirection::Asc => keyed.sort_by(|(a, _), (b, _)| a.cmp(b)),
                SortDirection::Desc => keyed.sort_by(|(a, _), (b, _)| b.cmp(a)),
            }
            keyed.into_iter().map(|(_, item)| item).collect()
        }
        None => filtered.collect(),
    };

    let pagination = Pagination::new(query.page, query.page_size, ordered.len());
    let page_items = ordered
        .into_iter()
        .skip(pagination.offset())
        .take(pagination.per_page)
        .collect();

    ListingPage {
        items: page_items,
        pagination,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, Medicine};
    use crate::listing::SortKey;
    use rust_decimal::Decimal;

    fn catalog() -> Vec<Medicine> {
        vec![
            Medicine::new("1", "Napa", Decimal::from(3))
                .with_generic_name("Paracetamol")
                .with_company("Beximco"),
            Medicine::new("2", "ace", Decimal::from(2))
                .with_generic_name("Paracetamol")
                .with_company("Square"),
            Medicine::new("3", "Seclo", Decimal::from(6))
                .with_generic_name("Omeprazole")
                .with_company("Square"),
            Medicine::new("4", "Fexo", Decimal::from(8))
                .with_generic_name("Fexofenadine")
                .with_company("Incepta"),
            Medicine::new("5", "Alatrol", Decimal::from(3))
                .with_generic_name("Cetirizine")
                .with_company("Square"),
        ]
    }

    fn ids<T: AsRef<str>>(items: impl IntoIterator<Item = T>) -> Vec<String> {
        items.into_iter().map(|s| s.as_ref().to_string()).collect()
    }

    fn page_ids(page: &ListingPage<&Medicine>) -> Vec<String> {
        ids(page.items.iter().map(|m| m.id.as_str()))
    }

    #[test]
    fn test_empty_search_returns_everything() {
        let items = catalog();
        let page = view(&items, &ListingQuery::new().with_pagination(1, 100));
        assert_eq!(page.items.len(), items.len());
        assert_eq!(page_ids(&page), vec!["1", "2", "3", "4", "5"]);

        let blank = view(&items, &ListingQuery::new().with_search("   "));
        assert_eq!(blank.pagination.total, items.len());
    }

    #[test]
    fn test_search_matches_any_field() {
        let items = catalog();

        let by_generic = view(&items, &ListingQuery::new().with_search("PARACETAMOL"));
        assert_eq!(page_ids(&by_generic), vec!["1", "2"]);

        let by_company = view(&items, &ListingQuery::new().with_search("squ"));
        assert_eq!(page_ids(&by_company), vec!["2", "3", "5"]);

        let none = view(&items, &ListingQuery::new().with_search("insulin"));
        assert!(none.is_empty());
        assert_eq!(none.total_pages(), 0);
    }

    #[test]
    fn test_sort_by_name_ignores_case() {
        let items = catalog();
        let page = view(
            &items,
            &ListingQuery::new().with_sort(SortKey::Name, SortDirection::Asc),
        );
        let names: Vec<&str> = page.items.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["ace", "Alatrol", "Fexo", "Napa", "Seclo"]);
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let items = catalog();

        let asc = view(
            &items,
            &ListingQuery::new().with_sort(SortKey::Price, SortDirection::Asc),
        );
        assert_eq!(page_ids(&asc), vec!["2", "1", "5", "3", "4"]);

        let desc = view(
            &items,
            &ListingQuery::new().with_sort(SortKey::Price, SortDirection::Desc),
        );
        assert_eq!(page_ids(&desc), vec!["4", "3", "1", "5", "2"]);
    }

    #[test]
    fn test_pagination_slices() {
        let items = catalog();
        let query = ListingQuery::new().with_pagination(2, 2);
        let page = view(&items, &query);

        assert_eq!(page_ids(&page), vec!["3", "4"]);
        assert_eq!(page.pagination.total_pages, 3);
        assert!(page.pagination.has_next);
        assert!(page.pagination.has_prev);
        assert_eq!(page.pagination.start_item(), 3);
        assert_eq!(page.pagination.end_item(), 4);

        let last = view(&items, &ListingQuery::new().with_pagination(3, 2));
        assert_eq!(page_ids(&last), vec!["5"]);
        assert!(last.pagination.is_last());
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let items = catalog();
        let page = view(&items, &ListingQuery::new().with_pagination(9, 2));
        assert!(page.is_empty());
        assert_eq!(page.pagination.total_pages, 3);
        assert!(page.pagination.is_out_of_range());
        assert_eq!(page.pagination.start_item(), 0);
    }

    #[test]
    fn test_filter_then_paginate() {
        let items = catalog();
        let query = ListingQuery::new()
            .with_search("square")
            .with_sort(SortKey::Name, SortDirection::Desc)
            .with_pagination(1, 2);
        let page = view(&items, &query);

        assert_eq!(page_ids(&page), vec!["3", "5"]);
        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.total_pages(), 2);
    }

    #[test]
    fn test_categories_are_listable() {
        let categories = vec![
            Category::new("c1", "Tablet"),
            Category::new("c2", "Syrup"),
            Category::new("c3", "Injection"),
        ];
        let page = view(
            &categories,
            &ListingQuery::new()
                .with_search("t")
                .with_sort(SortKey::Name, SortDirection::Asc),
        );
        let names = ids(page.items.iter().map(|c| c.name.as_str()));
        assert_eq!(names, vec!["Injection", "Tablet"]);
    }

    #[test]
    fn test_page_numbers_window() {
        let pagination = Pagination::new(5, 10, 100);
        assert_eq!(pagination.page_numbers(5), vec![3, 4, 5, 6, 7]);

        let start = Pagination::new(1, 10, 100);
        assert_eq!(start.page_numbers(5), vec![1, 2, 3, 4, 5]);

        let end = Pagination::new(10, 10, 100);
        assert_eq!(end.page_numbers(5), vec![6, 7, 8, 9, 10]);

        let few = Pagination::new(1, 10, 25);
        assert_eq!(few.page_numbers(5), vec![1, 2, 3]);
    }

    #[test]
    fn test_huge_page_number_is_empty() {
        let items = catalog();
        let page = view(&items, &ListingQuery::new().with_pagination(usize::MAX, 10));

        assert!(page.is_empty());
        assert!(page.pagination.is_out_of_range());
        assert_eq!(page.pagination.start_item(), 0);
        assert_eq!(page.pagination.end_item(), 0);
        assert_eq!(page.pagination.page_numbers(5), vec![1]);
    }
}
