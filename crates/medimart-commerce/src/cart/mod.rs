//! Shopping cart module.
//!
//! Contains the cart and its line items, the discount calculator, the
//! pricing aggregator and the storage-backed cart store.

mod cart;
mod discount;
mod pricing;
mod store;

pub use cart::{Cart, CartLineItem, MAX_QUANTITY_PER_ITEM};
pub use discount::effective_price;
pub use pricing::{summarize, LineItemPricing, PricingPolicy, PricingSummary};
pub use store::CartStore;
