//! Medicine categories.

use crate::ids::CategoryId;
use crate::listing::{Listable, SortKey, SortValue};
use serde::{Deserialize, Serialize};

/// A category in the catalog (tablets, syrups, capsules, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique category identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: CategoryId,
    /// Display name.
    #[serde(alias = "categoryName")]
    pub name: String,
    /// URL-friendly slug used by `/categories/:slug` routes.
    #[serde(default)]
    pub slug: String,
    /// Category image URL.
    #[serde(default)]
    pub image: String,
    /// Number of medicines in this category, as reported by the backend.
    #[serde(default)]
    pub medicine_count: i64,
}

impl Category {
    /// Create a category, deriving the slug from the name.
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            slug: slugify(&name),
            name,
            image: String::new(),
            medicine_count: 0,
        }
    }

    /// The slug, falling back to one derived from the name when the backend
    /// did not send any.
    pub fn effective_slug(&self) -> String {
        if self.slug.is_empty() {
            slugify(&self.name)
        } else {
            self.slug.clone()
        }
    }

    /// Whether a medicine's category label belongs to this category.
    pub fn contains(&self, category_label: &str) -> bool {
        slugify(category_label) == self.effective_slug()
    }
}

impl Listable for Category {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }

    fn sort_value(&self, key: SortKey) -> SortValue {
        match key {
            SortKey::Name | SortKey::Category => SortValue::text(&self.name),
            SortKey::Stock => SortValue::Number(self.medicine_count.into()),
            _ => SortValue::Missing,
        }
    }
}

/// Lower-case a label and join its words with `-`.
///
/// ```
/// use medimart_commerce::catalog::slugify;
/// assert_eq!(slugify("  Pain Relief & Fever "), "pain-relief-fever");
/// ```
pub fn slugify(label: &str) -> String {
    label
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_slug() {
        let cat = Category::new("c1", "Syrup Bottles");
        assert_eq!(cat.slug, "syrup-bottles");
    }

    #[test]
    fn test_contains_matches_labels_loosely() {
        let cat = Category::new("c1", "Tablet");
        assert!(cat.contains("tablet"));
        assert!(cat.contains(" TABLET "));
        assert!(!cat.contains("capsule"));
    }

    #[test]
    fn test_deserialize_backend_shape() {
        let json = r#"{"_id":"c9","categoryName":"Injection","image":"inj.png","medicineCount":4}"#;
        let cat: Category = serde_json::from_str(json).unwrap();
        assert_eq!(cat.id.as_str(), "c9");
        assert_eq!(cat.name, "Injection");
        assert_eq!(cat.effective_slug(), "injection");
        assert_eq!(cat.medicine_count, 4);
    }
}
