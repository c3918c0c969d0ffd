//! Order confirmation types.

use crate::cart::{CartLineItem, PricingSummary};
use crate::ids::OrderId;
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order status as seen by the dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Charged, awaiting approval from an admin.
    #[default]
    Pending,
    /// Approved by an admin.
    Paid,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Paid => "Paid",
        }
    }
}

/// What the customer sees after a successful checkout: the invoice view
/// reads this back from its slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderConfirmation {
    /// Client-generated order id.
    pub id: OrderId,
    /// Human-readable order number: `ORD-<date>-<time>-<id suffix>`.
    pub order_number: String,
    /// Processor transaction id.
    pub transaction_id: String,
    /// Customer email.
    pub email: String,
    /// Order status.
    pub status: OrderStatus,
    /// Lines as they were in the cart at checkout.
    pub lines: Vec<CartLineItem>,
    /// Pricing at checkout.
    pub summary: PricingSummary,
    /// When the payment was confirmed.
    pub created_at: DateTime<Utc>,
}

impl OrderConfirmation {
    /// Record a confirmed payment for `lines`.
    pub fn new(
        transaction_id: impl Into<String>,
        email: impl Into<String>,
        lines: Vec<CartLineItem>,
        summary: PricingSummary,
    ) -> Self {
        let created_at = Utc::now();
        let id = OrderId::generate();
        let suffix = &id.as_str()[id.as_str().len().saturating_sub(6)..];
        Self {
            order_number: format!(
                "ORD-{}-{}",
                created_at.format("%Y%m%d-%H%M%S"),
                suffix.to_uppercase()
            ),
            id,
            transaction_id: transaction_id.into(),
            email: email.into(),
            status: OrderStatus::Pending,
            lines,
            summary,
            created_at,
        }
    }

    /// Amount charged.
    pub fn amount_paid(&self) -> Money {
        self.summary.grand_total
    }

    /// Total units ordered.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}
