//! Percentage discount calculator.

use rust_decimal::Decimal;

/// Unit price after a percentage discount.
///
/// A non-positive discount leaves the price unchanged. The result is exact;
/// callers round only for display. Negative prices are rejected upstream by
/// [`Medicine::validate`](crate::catalog::Medicine::validate).
///
/// ```
/// use medimart_commerce::cart::effective_price;
/// use rust_decimal::Decimal;
///
/// assert_eq!(effective_price(Decimal::from(100), Decimal::from(10)), Decimal::from(90));
/// assert_eq!(effective_price(Decimal::from(100), Decimal::ZERO), Decimal::from(100));
/// ```
pub fn effective_price(unit_price: Decimal, discount_percent: Decimal) -> Decimal {
    if discount_percent <= Decimal::ZERO {
        return unit_price;
    }
    unit_price - unit_price * discount_percent / Decimal::ONE_HUNDRED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_discount_is_identity() {
        let price = Decimal::new(1299, 2);
        assert_eq!(effective_price(price, Decimal::ZERO), price);
    }

    #[test]
    fn test_negative_discount_is_ignored() {
        let price = Decimal::new(1299, 2);
        assert_eq!(effective_price(price, Decimal::from(-5)), price);
    }

    #[test]
    fn test_full_discount_is_free() {
        assert_eq!(
            effective_price(Decimal::new(4250, 2), Decimal::ONE_HUNDRED),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_no_internal_rounding() {
        // 9.99 at 15% off is 8.4915, kept exact.
        assert_eq!(
            effective_price(Decimal::new(999, 2), Decimal::from(15)),
            Decimal::new(84915, 4)
        );
    }

    #[test]
    fn test_idempotent() {
        let price = Decimal::new(73, 1);
        let pct = Decimal::new(125, 1);
        assert_eq!(effective_price(price, pct), effective_price(price, pct));
    }

    #[test]
    fn test_monotonically_non_increasing_in_discount() {
        for cents in [0_i64, 1, 99, 500, 1234, 10_000, 99_999] {
            let price = Decimal::new(cents, 2);
            let mut previous = effective_price(price, Decimal::ZERO);
            assert_eq!(previous, price);

            for step in 1..=200 {
                let pct = Decimal::new(step, 0) / Decimal::TWO; // 0.5% steps up to 100%
                let current = effective_price(price, pct);
                assert!(current <= previous, "{} at {}%", price, pct);
                previous = current;
            }
            assert_eq!(previous, Decimal::ZERO);
        }
    }
}
