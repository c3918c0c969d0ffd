//! Checkout module.
//!
//! Hands the cart's grand total to a payment processor and records the
//! resulting order.

mod flow;
mod order;
mod payment;

pub use flow::Checkout;
pub use order::{OrderConfirmation, OrderStatus};
pub use payment::{PaymentError, PaymentGateway, PaymentIntent, PaymentReceipt};
