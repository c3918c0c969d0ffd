//! Storefront domain types and logic for MediMart.
//!
//! - **Catalog**: medicines and categories as served by the backend
//! - **Cart**: line items, the persisted cart slot, discount and pricing
//! - **Listing**: search, sort and pagination for shop and dashboard tables
//! - **Checkout**: payment hand-off and order confirmation
//!
//! # Example
//!
//! ```rust
//! use medimart_cache::MemoryStore;
//! use medimart_commerce::prelude::*;
//! use rust_decimal::Decimal;
//!
//! let napa = Medicine::new("med-1", "Napa", Decimal::from(100))
//!     .with_discount(Decimal::from(10));
//!
//! let carts = CartStore::new(MemoryStore::new());
//! carts.add(&napa, 2).unwrap();
//!
//! let summary = carts.summarize(&PricingPolicy::default()).unwrap();
//! assert_eq!(summary.subtotal.display(), "$180.00");
//! assert_eq!(summary.grand_total.display(), "$194.40");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod listing;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Category, Medicine};

    // Cart
    pub use crate::cart::{
        effective_price, summarize, Cart, CartLineItem, CartStore, LineItemPricing,
        PricingPolicy, PricingSummary,
    };

    // Listing
    pub use crate::listing::{
        view, Listable, ListingPage, ListingQuery, ListingState, Pagination, SortDirection,
        SortKey,
    };

    // Checkout
    pub use crate::checkout::{
        Checkout, OrderConfirmation, OrderStatus, PaymentError, PaymentGateway, PaymentIntent,
        PaymentReceipt,
    };
}
