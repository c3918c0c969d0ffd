//! Cart pricing summary command.

use anyhow::Result;
use medimart_commerce::cart::PricingSummary;

use crate::context::Context;
use crate::output::{price_tag, Output};

/// Run the summary command.
pub async fn run(ctx: &Context) -> Result<()> {
    let summary = ctx.carts()?.summarize(&ctx.config.pricing)?;

    if ctx.output.is_json() {
        ctx.output.json(&summary);
        return Ok(());
    }

    if summary.lines.is_empty() {
        ctx.output.info("Your cart is empty.");
    } else {
        ctx.output.header("Order Summary");
        print_lines(&summary, &ctx.output);
    }
    print_totals(&summary, &ctx.output);
    Ok(())
}

/// Per-line breakdown.
pub fn print_lines(summary: &PricingSummary, output: &Output) {
    let widths = [24, 5, 10, 0];
    output.table_header(&["ITEM", "QTY", "TOTAL", "UNIT"], &widths);
    for line in &summary.lines {
        let quantity = line.quantity.to_string();
        let total = line.line_total.display();
        let unit = price_tag(&line.unit_price, &line.effective_unit_price);
        output.table_row(&[&line.name, &quantity, &total, &unit], &widths);
    }
}

/// Subtotal, discount, tax, shipping and grand total.
pub fn print_totals(summary: &PricingSummary, output: &Output) {
    println!();
    output.kv("Subtotal", &summary.subtotal.display());
    if summary.has_discounts() {
        output.kv("You save", &summary.total_discount.display());
    }
    output.kv("Tax", &summary.tax.display());
    if summary.ships_free() {
        output.kv("Shipping", "Free");
    } else {
        output.kv("Shipping", &summary.shipping.display());
        if summary.free_shipping_remaining.is_positive() {
            output.kv(
                "Free shipping in",
                &summary.free_shipping_remaining.display(),
            );
        }
    }
    output.kv("Total", &summary.grand_total.display());
}
