//! Cart commands.

use anyhow::Result;
use medimart_commerce::cart::Cart;
use medimart_commerce::MedicineId;

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let carts = ctx.carts()?;

    let cart = match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => carts.load(),
        CartCommand::Add {
            id,
            quantity,
            catalog,
        } => {
            let medicine = ctx.find_medicine(catalog.as_deref(), &id)?;
            let cart = carts.add(&medicine, quantity)?;
            ctx.output
                .success(&format!("Added {} x {} to the cart", quantity, medicine.name));
            cart
        }
        CartCommand::Set { id, quantity } => {
            let cart = carts.set_quantity(&MedicineId::new(id.as_str()), quantity)?;
            if quantity <= 0 {
                ctx.output.success(&format!("Removed {} from the cart", id));
            } else {
                ctx.output.success(&format!("Set {} to {}", id, quantity));
            }
            cart
        }
        CartCommand::Remove { id } => {
            let cart = carts.remove(&MedicineId::new(id.as_str()))?;
            ctx.output.success(&format!("Removed {} from the cart", id));
            cart
        }
        CartCommand::Clear => {
            let cart = carts.clear()?;
            ctx.output.success("Cart cleared");
            cart
        }
    };

    print_cart(&cart, ctx);
    Ok(())
}

fn print_cart(cart: &Cart, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(cart);
        return;
    }

    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        return;
    }

    ctx.output.header(&format!(
        "Cart ({} items, {} products)",
        cart.item_count(),
        cart.unique_item_count()
    ));
    let widths = [12, 24, 5, 8];
    ctx.output
        .table_header(&["ID", "NAME", "QTY", "DISCOUNT"], &widths);
    for line in cart.items() {
        let quantity = line.quantity.to_string();
        let discount = if line.is_discounted() {
            format!("{}%", line.discount_percent.normalize())
        } else {
            "-".to_string()
        };
        ctx.output.table_row(
            &[line.id.as_str(), &line.name, &quantity, &discount],
            &widths,
        );
    }
}
