//! Listing module.
//!
//! The filter, sort and paginate pipeline behind the shop, category and
//! dashboard tables.

mod filter;
mod query;
mod results;

pub use filter::{matches_search, Listable, SortValue};
pub use query::{ListingQuery, ListingState, SortDirection, SortKey};
pub use results::{view, ListingPage, Pagination};
