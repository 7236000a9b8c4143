//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! tote cart show
//! tote cart add 3 -q 2
//! tote cart set 3 5
//! tote cart remove 3
//! tote cart checkout --yes
//! ```

use std::io::{self, Write};

use tote_core::{Cart, OrderConfirmation, ProductId, format_usd};
use tote_storefront::error::add_breadcrumb;
use tote_storefront::state::AppState;

use super::{CommandError, parse_quantity, render_summary};

/// Print the cart.
pub fn show(state: &AppState, out: &mut impl Write) -> Result<(), CommandError> {
    render_cart(out, &state.cart().cart())?;
    Ok(())
}

/// Add `quantity` of a catalog product.
pub async fn add(
    state: &AppState,
    id: ProductId,
    quantity: u32,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let quantity = parse_quantity(quantity)?;
    let product = state.product(id).await?;
    let title = product.title.clone();

    let id_text = id.to_string();
    add_breadcrumb("cart", "Added product", Some(&[("product_id", id_text.as_str())]));
    state.cart().add(product, quantity);

    writeln!(out, "Added {quantity} x {title} to your cart.")?;
    render_footer(out, &state.cart().cart())?;
    Ok(())
}

/// Remove a line.
pub fn remove(state: &AppState, id: ProductId, out: &mut impl Write) -> Result<(), CommandError> {
    let Some(line) = state.cart().get(id) else {
        writeln!(out, "Product {id} is not in your cart.")?;
        return Ok(());
    };

    state.cart().remove(id);
    writeln!(out, "Removed {} from your cart.", line.product.title)?;
    render_footer(out, &state.cart().cart())?;
    Ok(())
}

/// Set a line's quantity; zero or less removes it.
pub fn set(
    state: &AppState,
    id: ProductId,
    quantity: i64,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let Some(line) = state.cart().get(id) else {
        writeln!(out, "Product {id} is not in your cart.")?;
        return Ok(());
    };

    state.cart().set_quantity(id, quantity);
    if quantity <= 0 {
        writeln!(out, "Removed {} from your cart.", line.product.title)?;
    } else {
        writeln!(out, "Set {} to {quantity}.", line.product.title)?;
    }
    render_footer(out, &state.cart().cart())?;
    Ok(())
}

/// Empty the cart, or say what would be removed without `confirm`.
pub fn clear(state: &AppState, confirm: bool, out: &mut impl Write) -> Result<(), CommandError> {
    let count = state.cart().item_count();
    if count == 0 {
        writeln!(out, "Your cart is empty.")?;
        return Ok(());
    }

    if !confirm {
        let noun = if count == 1 { "item" } else { "items" };
        writeln!(out, "This removes {count} {noun} from your cart.")?;
        writeln!(out, "Run `tote cart clear --yes` to empty it.")?;
        return Ok(());
    }

    state.cart().clear();
    writeln!(out, "Cart cleared.")?;
    Ok(())
}

/// Check out, or preview the order without `confirm`.
pub fn checkout(state: &AppState, confirm: bool, out: &mut impl Write) -> Result<(), CommandError> {
    if state.cart().is_empty() {
        writeln!(out, "Your cart is empty.")?;
        return Ok(());
    }

    if !confirm {
        render_summary(out, &state.cart().summary())?;
        writeln!(out)?;
        writeln!(out, "Run `tote cart checkout --yes` to place the order.")?;
        return Ok(());
    }

    match state.cart().checkout() {
        Some(confirmation) => {
            tracing::info!(reference = %confirmation.reference, "Order placed");
            render_confirmation(out, &confirmation)?;
        }
        None => writeln!(out, "Your cart is empty.")?,
    }
    Ok(())
}

/// Cart contents with totals.
pub fn render_cart(out: &mut impl Write, cart: &Cart) -> io::Result<()> {
    if cart.is_empty() {
        return writeln!(out, "Your cart is empty.");
    }

    for line in cart {
        writeln!(
            out,
            "{:>4}  {:>3} x {:>9} = {:>10}  {}",
            line.id().as_i64(),
            line.quantity.get(),
            line.product.price.to_string(),
            format_usd(line.line_total()),
            line.product.title
        )?;
    }
    writeln!(out)?;
    render_footer(out, cart)
}

fn render_footer(out: &mut impl Write, cart: &Cart) -> io::Result<()> {
    let count = cart.item_count();
    let noun = if count == 1 { "item" } else { "items" };
    writeln!(out, "{count} {noun}, total {}", format_usd(cart.total()))
}

/// Receipt for a placed order.
pub fn render_confirmation(
    out: &mut impl Write,
    confirmation: &OrderConfirmation,
) -> io::Result<()> {
    writeln!(out, "Order placed. Thank you!")?;
    writeln!(out, "Reference: {}", confirmation.reference)?;
    writeln!(
        out,
        "Placed:    {}",
        confirmation.placed_at.format("%Y-%m-%d %H:%M UTC")
    )?;
    render_summary(out, &confirmation.summary)
}
