//! Search matching and sort values.

use crate::listing::SortKey;
use rust_decimal::Decimal;
use std::cmp::Ordering;

/// Something the listing pipeline can filter and sort.
pub trait Listable {
    /// Fields the free-text search looks in.
    fn search_fields(&self) -> Vec<&str>;

    /// The value compared when sorting by `key`.
    fn sort_value(&self, key: SortKey) -> SortValue;
}

/// A comparable sort value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortValue {
    /// Lower-cased text.
    Text(String),
    /// A number.
    Number(Decimal),
    /// The item has no such field; all missing values compare equal.
    Missing,
}

impl SortValue {
    /// Text value, lower-cased for comparison.
    pub fn text(value: &str) -> Self {
        SortValue::Text(value.to_lowercase())
    }
}

impl PartialOrd for SortValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            (SortValue::Number(a), SortValue::Number(b)) => a.cmp(b),
            (SortValue::Missing, SortValue::Missing) => Ordering::Equal,
            // Missing values sink to the end of an ascending sort.
            (SortValue::Missing, _) => Ordering::Greater,
            (_, SortValue::Missing) => Ordering::Less,
            (SortValue::Number(_), SortValue::Text(_)) => Ordering::Less,
            (SortValue::Text(_), SortValue::Number(_)) => Ordering::Greater,
        }
    }
}

/// Case-insensitive substring match across an item's search fields.
///
/// A blank term matches everything.
pub fn matches_search<T: Listable + ?Sized>(item: &T, term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Medicine;

    fn napa() -> Medicine {
        Medicine::new("m1", "Napa Extra", Decimal::from(3))
            .with_generic_name("Paracetamol + Caffeine")
            .with_company("Beximco Pharmaceuticals")
    }

    #[test]
    fn test_matches_any_field() {
        let med = napa();
        assert!(matches_search(&med, "napa"));
        assert!(matches_search(&med, "CAFFEINE"));
        assert!(matches_search(&med, "beximco"));
        assert!(!matches_search(&med, "square"));
    }

    #[test]
    fn test_blank_term_matches() {
        assert!(matches_search(&napa(), ""));
        assert!(matches_search(&napa(), "   "));
    }

    #[test]
    fn test_category_is_not_searched() {
        let med = napa().with_category("Tablet");
        assert!(!matches_search(&med, "tablet"));
    }

    #[test]
    fn test_sort_value_order() {
        assert!(SortValue::text("Alpha") < SortValue::text("beta"));
        assert!(SortValue::Number(Decimal::from(2)) < SortValue::Number(Decimal::from(10)));
        assert!(SortValue::text("zzz") < SortValue::Missing);
    }
}
