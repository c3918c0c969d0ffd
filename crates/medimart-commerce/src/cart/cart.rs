//! Cart and line item types.

use crate::cart::effective_price;
use crate::catalog::Medicine;
use crate::error::CommerceError;
use crate::ids::MedicineId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// A shopping cart: one line per distinct medicine, in insertion order.
///
/// Serializes as a bare JSON array of line items, which is the layout of the
/// persisted cart slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from stored lines, dropping any line whose quantity is
    /// not positive.
    pub fn from_lines(lines: Vec<CartLineItem>) -> Self {
        let mut cart = Self { items: lines };
        cart.drop_empty_lines();
        cart
    }

    /// Add `quantity` units of a medicine.
    ///
    /// Merges into the existing line for the same medicine, otherwise
    /// appends a snapshot line. Returns an error if:
    /// - Quantity is not positive
    /// - Adding would exceed MAX_QUANTITY_PER_ITEM
    pub fn add(&mut self, medicine: &Medicine, quantity: i64) -> Result<(), CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.id == medicine.id) {
            let new_quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;

            if new_quantity > MAX_QUANTITY_PER_ITEM {
                return Err(CommerceError::QuantityExceedsLimit(
                    new_quantity,
                    MAX_QUANTITY_PER_ITEM,
                ));
            }

            existing.quantity = new_quantity;
            return Ok(());
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        self.items.push(CartLineItem::snapshot(medicine, quantity));
        Ok(())
    }

    /// Replace the quantity of a line.
    ///
    /// A quantity <= 0 removes the line. Returns whether a line matched.
    pub fn set_quantity(&mut self, id: &MedicineId, quantity: i64) -> Result<bool, CommerceError> {
        if quantity <= 0 {
            return Ok(self.remove(id));
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        match self.items.iter_mut().find(|i| &i.id == id) {
            Some(item) => {
                item.quantity = quantity;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove a line. Returns whether a line was removed.
    pub fn remove(&mut self, id: &MedicineId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != id);
        self.items.len() < len_before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Get a line by medicine id.
    pub fn get(&self, id: &MedicineId) -> Option<&CartLineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Get number of distinct medicines.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop lines with a non-positive quantity. Returns how many were dropped.
    fn drop_empty_lines(&mut self) -> usize {
        let len_before = self.items.len();
        self.items.retain(|i| i.quantity > 0);
        len_before - self.items.len()
    }
}

/// A line in the cart: a snapshot of the medicine taken when it was first
/// added, plus the aggregated quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Id of the source medicine; one line per id.
    #[serde(rename = "_id", alias = "id")]
    pub id: MedicineId,
    /// Brand name at add time.
    pub name: String,
    /// Unit price at add time.
    #[serde(rename = "pricePerUnit", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    /// Discount percent at add time.
    #[serde(rename = "discount", default, with = "rust_decimal::serde::float")]
    pub discount_percent: Decimal,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    /// Manufacturer.
    #[serde(default)]
    pub company: String,
    /// Mass unit label.
    #[serde(default)]
    pub mass_unit: String,
    /// Units in the cart, at least 1.
    pub quantity: i64,
    /// Remaining catalog fields, carried through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CartLineItem {
    /// Denormalize a medicine into a line.
    pub fn snapshot(medicine: &Medicine, quantity: i64) -> Self {
        let mut extra = medicine.extra.clone();
        extra.insert(
            "genericName".to_string(),
            serde_json::Value::String(medicine.generic_name.clone()),
        );
        extra.insert(
            "category".to_string(),
            serde_json::Value::String(medicine.category.clone()),
        );
        extra.insert(
            "stockQuantity".to_string(),
            serde_json::Value::from(medicine.stock_quantity),
        );

        Self {
            id: medicine.id.clone(),
            name: medicine.name.clone(),
            unit_price: medicine.unit_price,
            discount_percent: medicine.discount_percent,
            image: medicine.image.clone(),
            company: medicine.company.clone(),
            mass_unit: medicine.mass_unit.clone(),
            quantity,
            extra,
        }
    }

    /// Unit price after discount, unrounded.
    pub fn effective_price(&self) -> Decimal {
        effective_price(self.unit_price, self.discount_percent)
    }

    /// Whether a discount applies to this line.
    pub fn is_discounted(&self) -> bool {
        self.discount_percent > Decimal::ZERO
    }
}
