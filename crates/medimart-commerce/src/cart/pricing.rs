//! Cart pricing calculations.

use crate::cart::Cart;
use crate::error::CommerceError;
use crate::ids::MedicineId;
use crate::money::{Currency, Money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Business constants the pricing aggregator applies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PricingPolicy {
    /// Tax rate applied to the discounted subtotal (0.08 = 8%).
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_rate: Decimal,
    /// Subtotal at or above which shipping is free.
    #[serde(with = "rust_decimal::serde::float")]
    pub free_shipping_threshold: Decimal,
    /// Flat shipping fee below the threshold.
    #[serde(with = "rust_decimal::serde::float")]
    pub flat_shipping_fee: Decimal,
    /// Charge the flat fee on an empty cart. Off by default: a $0 order
    /// ships nothing.
    pub charge_shipping_on_empty: bool,
    /// Currency every amount is expressed in.
    pub currency: Currency,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(8, 2),
            free_shipping_threshold: Decimal::from(50),
            flat_shipping_fee: Decimal::new(599, 2),
            charge_shipping_on_empty: false,
            currency: Currency::USD,
        }
    }
}

impl PricingPolicy {
    /// Shipping charged for a given discounted subtotal.
    pub fn shipping_for(&self, subtotal: Decimal, cart_is_empty: bool) -> Decimal {
        if cart_is_empty && !self.charge_shipping_on_empty {
            return Decimal::ZERO;
        }
        if subtotal >= self.free_shipping_threshold {
            Decimal::ZERO
        } else {
            self.flat_shipping_fee
        }
    }
}

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingSummary {
    /// Sum of discounted line totals.
    pub subtotal: Money,
    /// Sum of undiscounted line totals.
    pub original_total: Money,
    /// Savings from per-item discounts.
    pub total_discount: Money,
    /// Tax on the subtotal.
    pub tax: Money,
    /// Shipping cost.
    pub shipping: Money,
    /// Final total (subtotal + tax + shipping).
    pub grand_total: Money,
    /// Amount still needed to reach free shipping; zero once reached.
    pub free_shipping_remaining: Money,
    /// Total units in the cart.
    pub item_count: i64,
    /// Per-line breakdown.
    pub lines: Vec<LineItemPricing>,
}

impl PricingSummary {
    /// Check if any discounts are applied.
    pub fn has_discounts(&self) -> bool {
        self.total_discount.is_positive()
    }

    /// Whether shipping is free for this cart.
    pub fn ships_free(&self) -> bool {
        self.shipping.is_zero()
    }
}

/// Pricing breakdown for a single line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricing {
    /// Medicine id.
    pub id: MedicineId,
    /// Medicine name.
    pub name: String,
    /// Quantity.
    pub quantity: i64,
    /// Unit price before discount.
    pub unit_price: Money,
    /// Unit price after discount.
    pub effective_unit_price: Money,
    /// effective_unit_price * quantity.
    pub line_total: Money,
    /// (unit_price - effective_unit_price) * quantity.
    pub line_discount: Money,
}

/// Derive the pricing summary of a cart.
///
/// Pure: the same cart and policy always give the same summary.
pub fn summarize(cart: &Cart, policy: &PricingPolicy) -> Result<PricingSummary, CommerceError> {
    let currency = policy.currency;

    let lines = cart
        .items()
        .iter()
        .map(|item| {
            let unit_price = Money::new(item.unit_price, currency);
            let effective_unit_price = Money::new(item.effective_price(), currency);
            let line_total = effective_unit_price.checked_mul(item.quantity)?;
            let line_discount = if item.is_discounted() {
                unit_price
                    .checked_sub(&effective_unit_price)?
                    .checked_mul(item.quantity)?
            } else {
                Money::zero(currency)
            };
            Ok(LineItemPricing {
                id: item.id.clone(),
                name: item.name.clone(),
                quantity: item.quantity,
                unit_price,
                effective_unit_price,
                line_total,
                line_discount,
            })
        })
        .collect::<Result<Vec<_>, CommerceError>>()?;

    let subtotal = Money::sum(lines.iter().map(|l| &l.line_total), currency)?;
    let total_discount = Money::sum(lines.iter().map(|l| &l.line_discount), currency)?;
    let original_total = subtotal.checked_add(&total_discount)?;

    let tax = subtotal.checked_scale(policy.tax_rate)?;
    let shipping = Money::new(
        policy.shipping_for(subtotal.amount, cart.is_empty()),
        currency,
    );
    let grand_total = subtotal.checked_add(&tax)?.checked_add(&shipping)?;

    let threshold = Money::new(policy.free_shipping_threshold, currency);
    let free_shipping_remaining = if subtotal.amount >= threshold.amount {
        Money::zero(currency)
    } else {
        threshold.checked_sub(&subtotal)?
    };

    Ok(PricingSummary {
        subtotal,
        original_total,
        total_discount,
        tax,
        shipping,
        grand_total,
        free_shipping_remaining,
        item_count: cart.item_count(),
        lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Medicine;

    fn dec(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    fn usd(cents: i64) -> Money {
        Money::from_cents(cents, Currency::USD)
    }

    #[test]
    fn test_checkout_scenario() {
        let mut cart = Cart::new();
        cart.add(
            &Medicine::new("a", "Ace", Decimal::from(100)).with_discount(Decimal::from(10)),
            2,
        )
        .unwrap();
        cart.add(&Medicine::new("b", "Bex", Decimal::from(50)), 1)
            .unwrap();

        let summary = summarize(&cart, &PricingPolicy::default()).unwrap();
        assert_eq!(summary.subtotal, usd(23000));
        assert_eq!(summary.total_discount, usd(2000));
        assert_eq!(summary.tax, usd(1840));
        assert_eq!(summary.shipping, usd(0));
        assert_eq!(summary.grand_total, usd(24840));
        assert_eq!(summary.grand_total.display(), "$248.40");
        assert_eq!(summary.item_count, 3);
        assert!(summary.ships_free());
    }

    #[test]
    fn test_empty_cart_charges_nothing() {
        let summary = summarize(&Cart::new(), &PricingPolicy::default()).unwrap();
        assert!(summary.subtotal.is_zero());
        assert!(summary.total_discount.is_zero());
        assert!(summary.tax.is_zero());
        assert!(summary.shipping.is_zero());
        assert!(summary.grand_total.is_zero());
    }

    #[test]
    fn test_empty_cart_shipping_can_be_charged_explicitly() {
        let policy = PricingPolicy {
            charge_shipping_on_empty: true,
            ..PricingPolicy::default()
        };
        let summary = summarize(&Cart::new(), &policy).unwrap();
        assert_eq!(summary.shipping, usd(599));
        assert_eq!(summary.grand_total, usd(599));
    }

    #[test]
    fn test_shipping_below_threshold() {
        let mut cart = Cart::new();
        cart.add(&Medicine::new("a", "Ace", dec(1000)), 2).unwrap();

        let summary = summarize(&cart, &PricingPolicy::default()).unwrap();
        assert_eq!(summary.subtotal, usd(2000));
        assert_eq!(summary.shipping, usd(599));
        assert_eq!(summary.tax, usd(160));
        assert_eq!(summary.grand_total, usd(2759));
        assert_eq!(summary.free_shipping_remaining, usd(3000));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let mut cart = Cart::new();
        cart.add(&Medicine::new("a", "Ace", Decimal::from(50)), 1)
            .unwrap();

        let summary = summarize(&cart, &PricingPolicy::default()).unwrap();
        assert!(summary.shipping.is_zero());
        assert!(summary.free_shipping_remaining.is_zero());
    }

    #[test]
    fn test_discount_is_measured_against_the_discounted_subtotal() {
        // 60 at 20% off is 48: the discount pushes the cart under the threshold.
        let mut cart = Cart::new();
        cart.add(
            &Medicine::new("a", "Ace", Decimal::from(60)).with_discount(Decimal::from(20)),
            1,
        )
        .unwrap();

        let summary = summarize(&cart, &PricingPolicy::default()).unwrap();
        assert_eq!(summary.subtotal, usd(4800));
        assert_eq!(summary.shipping, usd(599));
    }

    #[test]
    fn test_subtotal_plus_discount_is_original_total() {
        let prices = [(999, 15), (1250, 0), (4, 33), (100_000, 100), (7777, 7)];
        let mut cart = Cart::new();
        let mut undiscounted = Decimal::ZERO;

        for (i, (cents, pct)) in prices.iter().enumerate() {
            let qty = i as i64 + 1;
            cart.add(
                &Medicine::new(format!("m{}", i), "M", dec(*cents))
                    .with_discount(Decimal::from(*pct)),
                qty,
            )
            .unwrap();
            undiscounted += dec(*cents) * Decimal::from(qty);
        }

        let summary = summarize(&cart, &PricingPolicy::default()).unwrap();
        assert_eq!(
            summary.subtotal.amount + summary.total_discount.amount,
            undiscounted
        );
        assert_eq!(summary.original_total.amount, undiscounted);
    }

    #[test]
    fn test_line_breakdown() {
        let mut cart = Cart::new();
        cart.add(
            &Medicine::new("a", "Ace", dec(999)).with_discount(Decimal::from(15)),
            2,
        )
        .unwrap();

        let summary = summarize(&cart, &PricingPolicy::default()).unwrap();
        let line = &summary.lines[0];
        assert_eq!(line.effective_unit_price.amount, Decimal::new(84915, 4));
        assert_eq!(line.line_total.amount, Decimal::new(16983, 3));
        assert_eq!(line.line_total.display(), "$16.98");
        assert_eq!(line.line_discount.amount, Decimal::new(2997, 3));
    }

    #[test]
    fn test_policy_deserializes_with_defaults() {
        let policy: PricingPolicy = serde_json::from_str(r#"{"tax_rate": 0.05}"#).unwrap();
        assert_eq!(policy.tax_rate, Decimal::new(5, 2));
        assert_eq!(policy.flat_shipping_fee, dec(599));
        assert!(!policy.charge_shipping_on_empty);
    }
}
