//! Checkout command with a simulated payment processor.

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::Utc;
use medimart_commerce::checkout::{
    OrderConfirmation, PaymentError, PaymentGateway, PaymentIntent, PaymentReceipt,
};
use medimart_commerce::CommerceError;

use super::{CheckoutArgs, CheckoutCommand};
use crate::commands::summary::{print_lines, print_totals};
use crate::context::Context;
use crate::output::status_badge;

/// Stand-in for the card processor.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedGateway {
    decline: bool,
    offline: bool,
}

impl SimulatedGateway {
    pub fn new(decline: bool, offline: bool) -> Self {
        Self { decline, offline }
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn confirm(&self, intent: &PaymentIntent) -> Result<PaymentReceipt, PaymentError> {
        if self.offline {
            return Err(PaymentError::Gateway("connection refused".to_string()));
        }
        if self.decline {
            return Err(PaymentError::Declined {
                reason: "card_declined".to_string(),
            });
        }
        tracing::debug!(
            amount = ?intent.amount_in_minor_units(),
            email = %intent.email,
            "simulated charge"
        );
        Ok(PaymentReceipt {
            transaction_id: format!("pi_sim_{}", Utc::now().timestamp_millis()),
        })
    }
}

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let checkout = ctx.checkout()?;

    if let Some(CheckoutCommand::LastOrder) = args.command {
        return match checkout.last_order()? {
            Some(order) => {
                print_order(&order, ctx);
                Ok(())
            }
            None => {
                ctx.output.info("No order has been placed yet.");
                Ok(())
            }
        };
    }

    let Some(email) = args.email else {
        bail!("--email is required to check out");
    };

    let gateway = SimulatedGateway::new(args.decline, args.offline);
    match checkout.place_order(&email, &gateway).await {
        Ok(order) => {
            ctx.output.success(&format!(
                "Payment of {} confirmed ({})",
                order.amount_paid(),
                order.transaction_id
            ));
            print_order(&order, ctx);
            Ok(())
        }
        Err(CommerceError::Payment(e)) => bail!("{}", e.user_message()),
        Err(CommerceError::EmptyCart) => bail!("Your cart is empty; add something first"),
        Err(e) => Err(e.into()),
    }
}

fn print_order(order: &OrderConfirmation, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(order);
        return;
    }

    ctx.output.header(&format!("Invoice {}", order.order_number));
    ctx.output.kv("Order", order.id.as_str());
    ctx.output.kv("Transaction", &order.transaction_id);
    ctx.output.kv("Email", &order.email);
    ctx.output.kv("Status", &status_badge(order.status));
    ctx.output
        .kv("Date", &order.created_at.format("%Y-%m-%d %H:%M UTC").to_string());
    println!();
    print_lines(&order.summary, &ctx.output);
    print_totals(&order.summary, &ctx.output);
}

#[cfg(test)]
mod tests {
    use super::*;
    use medimart_commerce::money::{Currency, Money};
    use rust_decimal::Decimal;

    fn intent() -> PaymentIntent {
        PaymentIntent {
            amount: Money::new(Decimal::from(10), Currency::USD),
            email: "a@b.c".to_string(),
            description: "test".to_string(),
        }
    }

    #[tokio::test]
    async fn test_simulated_gateway_modes() {
        let ok = SimulatedGateway::default().confirm(&intent()).await.unwrap();
        assert!(ok.transaction_id.starts_with("pi_sim_"));

        let declined = SimulatedGateway::new(true, false).confirm(&intent()).await;
        assert!(matches!(declined, Err(PaymentError::Declined { .. })));

        let offline = SimulatedGateway::new(false, true).confirm(&intent()).await;
        assert!(matches!(offline, Err(PaymentError::Gateway(_))));
    }
}
