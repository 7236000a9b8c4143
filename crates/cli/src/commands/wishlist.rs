//! Wishlist commands.

use std::io::{self, Write};

use tote_core::{ProductId, Wishlist};
use tote_storefront::state::AppState;

use super::CommandError;

/// Print the wishlist.
pub fn show(state: &AppState, out: &mut impl Write) -> Result<(), CommandError> {
    render_wishlist(out, &state.wishlist().wishlist())?;
    Ok(())
}

/// Save a catalog product.
pub async fn add(state: &AppState, id: ProductId, out: &mut impl Write) -> Result<(), CommandError> {
    if state.wishlist().contains(id) {
        writeln!(out, "Product {id} is already in your wishlist.")?;
        return Ok(());
    }

    let product = state.product(id).await?;
    writeln!(out, "Saved {} to your wishlist.", product.title)?;
    state.wishlist().add(product);
    Ok(())
}

/// Remove a saved product.
pub fn remove(state: &AppState, id: ProductId, out: &mut impl Write) -> Result<(), CommandError> {
    if !state.wishlist().contains(id) {
        writeln!(out, "Product {id} is not in your wishlist.")?;
        return Ok(());
    }

    state.wishlist().remove(id);
    writeln!(out, "Removed product {id} from your wishlist.")?;
    Ok(())
}

/// Save the product if absent, otherwise remove it.
///
/// Removing a saved product never touches the catalog.
pub async fn toggle(
    state: &AppState,
    id: ProductId,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    if state.wishlist().contains(id) {
        return remove(state, id, out);
    }

    let product = state.product(id).await?;
    let title = product.title.clone();

    if state.wishlist().toggle(product) {
        writeln!(out, "Saved {title} to your wishlist.")?;
    } else {
        writeln!(out, "Removed {title} from your wishlist.")?;
    }
    Ok(())
}

/// Empty the wishlist.
pub fn clear(state: &AppState, out: &mut impl Write) -> Result<(), CommandError> {
    state.wishlist().clear();
    writeln!(out, "Wishlist cleared.")?;
    Ok(())
}

pub fn render_wishlist(out: &mut impl Write, wishlist: &Wishlist) -> io::Result<()> {
    if wishlist.is_empty() {
        return writeln!(out, "Your wishlist is empty.");
    }

    for product in wishlist {
        writeln!(
            out,
            "{:>4}  {:>9}  {}",
            product.id.as_i64(),
            product.price.to_string(),
            product.title
        )?;
    }
    writeln!(out)?;
    writeln!(out, "{} saved", wishlist.len())
}
