//! Configuration commands.

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    let config = &ctx.config;
    ctx.output.header("Current Configuration");

    ctx.output.info("[pricing]");
    ctx.output.kv("tax_rate", &config.pricing.tax_rate.to_string());
    ctx.output.kv(
        "free_shipping_threshold",
        &config.pricing.free_shipping_threshold.to_string(),
    );
    ctx.output
        .kv("flat_shipping_fee", &config.pricing.flat_shipping_fee.to_string());
    ctx.output.kv(
        "charge_shipping_on_empty",
        &config.pricing.charge_shipping_on_empty.to_string(),
    );
    ctx.output.kv("currency", config.pricing.currency.code());

    ctx.output.info("[listing]");
    ctx.output.kv("page_size", &config.listing.page_size.to_string());
    ctx.output
        .kv("catalog", &config.listing.catalog.display().to_string());

    ctx.output.info("[storage]");
    ctx.output
        .kv("data_dir", &config.storage.data_dir.display().to_string());
    ctx.output.kv("cart_key", &config.storage.cart_key);
    ctx.output.kv("order_key", &config.storage.order_key);

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let path = ctx.cwd.join("medimart.toml");
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    std::fs::write(&path, generate_default_config())?;
    ctx.output
        .success(&format!("Wrote {}", path.display()));
    Ok(())
}
