//! Catalog listing command.

use anyhow::Result;
use medimart_commerce::listing::{view, ListingQuery};
use medimart_commerce::Money;

use super::ListArgs;
use crate::context::Context;
use crate::output::price_tag;

/// Run the list command.
pub async fn run(args: ListArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog(args.catalog.as_deref())?;
    let per_page = args.per_page.unwrap_or(ctx.config.listing.page_size);

    let mut query = ListingQuery::new()
        .with_search(args.search)
        .with_pagination(args.page, per_page);
    if let Some(key) = args.sort {
        query = query.with_sort(key, args.dir);
    }
    ctx.output
        .debug(&format!("{} items in catalog, query {:?}", catalog.len(), query));

    let page = view(&catalog, &query);

    if ctx.output.is_json() {
        ctx.output.json(&page);
        return Ok(());
    }

    let pagination = page.pagination;
    if pagination.total == 0 {
        ctx.output.info("No medicines match.");
        return Ok(());
    }
    if page.is_empty() {
        ctx.output.warn(&format!(
            "Page {} is past the end; there are {} pages.",
            pagination.page, pagination.total_pages
        ));
        return Ok(());
    }

    ctx.output.header(&format!(
        "Medicines {}-{} of {}",
        pagination.start_item(),
        pagination.end_item(),
        pagination.total
    ));

    let currency = ctx.config.pricing.currency;
    let widths = [12, 20, 20, 16, 8, 6];
    ctx.output.table_header(
        &["ID", "NAME", "GENERIC", "COMPANY", "STOCK", "PRICE"],
        &widths,
    );
    for medicine in &page.items {
        let stock = medicine.stock_quantity.to_string();
        let price = price_tag(
            &medicine.price(currency),
            &Money::new(medicine.effective_price(), currency),
        );
        ctx.output.table_row(
            &[
                medicine.id.as_str(),
                &medicine.name,
                &medicine.generic_name,
                &medicine.company,
                &stock,
                &price,
            ],
            &widths,
        );
    }

    let pages: Vec<String> = pagination
        .page_numbers(7)
        .into_iter()
        .map(|n| {
            if n == pagination.page {
                format!("[{}]", n)
            } else {
                n.to_string()
            }
        })
        .collect();
    println!();
    ctx.output.kv("pages", &pages.join(" "));

    Ok(())
}
