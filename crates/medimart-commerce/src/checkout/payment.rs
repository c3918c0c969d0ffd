//! Payment collaborator seam.

use crate::money::Money;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A request to charge the customer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentIntent {
    /// Amount to charge; the cart's grand total.
    pub amount: Money,
    /// Customer email, used as the receipt address.
    pub email: String,
    /// Free-text statement descriptor.
    pub description: String,
}

impl PaymentIntent {
    /// Amount in minor units, as payment processors expect it.
    pub fn amount_in_minor_units(&self) -> Option<i64> {
        use rust_decimal::prelude::ToPrimitive;

        let scale = rust_decimal::Decimal::from(10_i64.pow(self.amount.currency.decimal_places()));
        (self.amount.rounded() * scale).to_i64()
    }
}

/// Proof of a successful charge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentReceipt {
    /// Processor transaction id.
    pub transaction_id: String,
}

/// Why a payment did not go through.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// The processor refused the card; the customer can act on this.
    #[error("payment declined: {reason}")]
    Declined { reason: String },

    /// The processor could not be reached or failed internally.
    #[error("payment gateway error: {0}")]
    Gateway(String),
}

impl PaymentError {
    /// Message suitable for showing to the customer.
    pub fn user_message(&self) -> String {
        match self {
            PaymentError::Declined { reason } => {
                format!("Your card was declined ({}). Please try another payment method.", reason)
            }
            PaymentError::Gateway(_) => {
                "We could not reach the payment service. Your card was not charged; please try again shortly.".to_string()
            }
        }
    }

    /// Whether retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PaymentError::Gateway(_))
    }
}

/// An external payment processor.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Charge the intent's amount.
    async fn confirm(&self, intent: &PaymentIntent) -> Result<PaymentReceipt, PaymentError>;
}
