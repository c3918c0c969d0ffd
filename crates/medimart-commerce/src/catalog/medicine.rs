//! Medicine catalog items.

use crate::cart::effective_price;
use crate::error::CommerceError;
use crate::ids::MedicineId;
use crate::listing::{Listable, SortKey, SortValue};
use crate::money::{Currency, Money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A medicine as served by the catalog endpoints.
///
/// Field names follow the backend's JSON. Unknown fields are kept in
/// [`Medicine::extra`] so they survive a round trip through the cart slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    /// Backend document id.
    #[serde(rename = "_id", alias = "id")]
    pub id: MedicineId,
    /// Brand name.
    pub name: String,
    /// Generic (active ingredient) name.
    #[serde(default)]
    pub generic_name: String,
    /// Manufacturer.
    #[serde(default)]
    pub company: String,
    /// Category label.
    #[serde(default)]
    pub category: String,
    /// Price per unit before discount.
    #[serde(rename = "pricePerUnit", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    /// Percent discount, 0 to 100.
    #[serde(rename = "discount", default, with = "rust_decimal::serde::float")]
    pub discount_percent: Decimal,
    /// Units in stock.
    #[serde(rename = "stockQuantity", alias = "stock", default)]
    pub stock_quantity: i64,
    /// Mass unit label, e.g. "mg" or "ml".
    #[serde(default)]
    pub mass_unit: String,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    /// Passthrough fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Medicine {
    /// Create a medicine with the required fields; the rest default to empty.
    pub fn new(id: impl Into<MedicineId>, name: impl Into<String>, unit_price: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            generic_name: String::new(),
            company: String::new(),
            category: String::new(),
            unit_price,
            discount_percent: Decimal::ZERO,
            stock_quantity: 0,
            mass_unit: String::new(),
            image: String::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// Set the discount percentage.
    pub fn with_discount(mut self, percent: Decimal) -> Self {
        self.discount_percent = percent;
        self
    }

    /// Set the generic name.
    pub fn with_generic_name(mut self, generic_name: impl Into<String>) -> Self {
        self.generic_name = generic_name.into();
        self
    }

    /// Set the manufacturer.
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    /// Set the category label.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the stock level.
    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock_quantity = stock;
        self
    }

    /// Unit price after the discount, unrounded.
    pub fn effective_price(&self) -> Decimal {
        effective_price(self.unit_price, self.discount_percent)
    }

    /// Unit price as money.
    pub fn price(&self, currency: Currency) -> Money {
        Money::new(self.unit_price, currency)
    }

    /// Whether a discount applies.
    pub fn is_discounted(&self) -> bool {
        self.discount_percent > Decimal::ZERO
    }

    /// Whether any units are in stock.
    pub fn is_in_stock(&self) -> bool {
        self.stock_quantity > 0
    }

    /// Check the invariants a seller form must enforce before the item
    /// reaches the catalog.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.name.trim().is_empty() {
            return Err(CommerceError::ValidationError(
                "name must not be empty".to_string(),
            ));
        }
        if self.unit_price <= Decimal::ZERO {
            return Err(CommerceError::ValidationError(format!(
                "price per unit must be positive, got {}",
                self.unit_price
            )));
        }
        if self.discount_percent < Decimal::ZERO || self.discount_percent > Decimal::ONE_HUNDRED
        {
            return Err(CommerceError::ValidationError(format!(
                "discount must be between 0 and 100, got {}",
                self.discount_percent
            )));
        }
        if self.stock_quantity < 0 {
            return Err(CommerceError::ValidationError(format!(
                "stock must not be negative, got {}",
                self.stock_quantity
            )));
        }
        Ok(())
    }
}

impl Listable for Medicine {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.generic_name.as_str(),
            self.company.as_str(),
        ]
    }

    fn sort_value(&self, key: SortKey) -> SortValue {
        match key {
            SortKey::Name => SortValue::text(&self.name),
            SortKey::GenericName => SortValue::text(&self.generic_name),
            SortKey::Company => SortValue::text(&self.company),
            SortKey::Category => SortValue::text(&self.category),
            SortKey::Price => SortValue::Number(self.unit_price),
            SortKey::Discount => SortValue::Number(self.discount_percent),
            SortKey::Stock => SortValue::Number(Decimal::from(self.stock_quantity)),
        }
    }
}
