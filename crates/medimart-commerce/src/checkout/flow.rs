//! Checkout flow.

use crate::cart::{CartStore, PricingPolicy};
use crate::checkout::{OrderConfirmation, PaymentGateway, PaymentIntent};
use crate::error::CommerceError;
use medimart_cache::{Cache, KvStore};

/// Turns the persisted cart into a paid order.
///
/// On success the confirmation is written to its own slot and the cart slot
/// is emptied. If payment fails the cart is left as it was. Once payment is
/// confirmed the order is returned even if those writes fail.
#[derive(Debug, Clone)]
pub struct Checkout<S> {
    carts: CartStore<S>,
    orders: Cache<S>,
    order_key: String,
    policy: PricingPolicy,
}

impl<S: KvStore + Clone> Checkout<S> {
    /// Slot key of the last confirmation when none is configured.
    pub const DEFAULT_ORDER_KEY: &'static str = "last-order";

    /// Check out the default cart slot of `store`.
    pub fn new(store: S, policy: PricingPolicy) -> Self {
        Self::with_cart(CartStore::new(store.clone()), store, policy)
    }

    /// Check out an existing cart store; confirmations go to `store`.
    pub fn with_cart(carts: CartStore<S>, store: S, policy: PricingPolicy) -> Self {
        Self {
            carts,
            orders: Cache::new(store),
            order_key: Self::DEFAULT_ORDER_KEY.to_string(),
            policy,
        }
    }

    /// Use a different slot for the confirmation.
    pub fn with_order_key(mut self, key: impl Into<String>) -> Self {
        self.order_key = key.into();
        self
    }

    /// The cart being checked out.
    pub fn carts(&self) -> &CartStore<S> {
        &self.carts
    }

    /// Charge the cart's grand total and record the order.
    pub async fn place_order(
        &self,
        email: &str,
        gateway: &dyn PaymentGateway,
    ) -> Result<OrderConfirmation, CommerceError> {
        let cart = self.carts.load();
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        let email = email.trim();
        if email.is_empty() {
            return Err(CommerceError::ValidationError(
                "email is required to check out".to_string(),
            ));
        }

        let summary = crate::cart::summarize(&cart, &self.policy)?;
        let intent = PaymentIntent {
            amount: summary.grand_total,
            email: email.to_string(),
            description: format!("MediMart order ({} items)", summary.item_count),
        };

        let receipt = gateway.confirm(&intent).await.map_err(|e| {
            tracing::warn!(email, error = %e, "payment not confirmed");
            e
        })?;

        // The charge went through, so bookkeeping failures past this point
        // are logged and the order is still reported as placed.
        let order =
            OrderConfirmation::new(receipt.transaction_id, email, cart.items().to_vec(), summary);
        if let Err(e) = self.orders.set(&self.order_key, &order) {
            tracing::error!(order = %order.id, error = %e, "paid order not recorded");
        }
        if let Err(e) = self.carts.clear() {
            tracing::error!(order = %order.id, error = %e, "cart not cleared after payment");
        }

        tracing::info!(
            order = %order.id,
            transaction = %order.transaction_id,
            total = %order.amount_paid(),
            "order confirmed"
        );
        Ok(order)
    }

    /// The most recent confirmation, if any.
    pub fn last_order(&self) -> Result<Option<OrderConfirmation>, CommerceError> {
        Ok(self.orders.get(&self.order_key)?)
    }
}
