//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! tote products
//! tote products --category electronics --search ssd
//! tote product 3
//! tote categories
//! ```

use std::io::{self, Write};

use tote_core::{Cart, Product, ProductFilter, ProductId, Wishlist};
use tote_storefront::state::AppState;

use super::CommandError;

/// List products, optionally filtered.
pub async fn products(
    state: &AppState,
    category: Option<String>,
    search: Option<&str>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let mut filter = ProductFilter::new();
    if let Some(category) = category {
        filter = filter.category(category);
    }
    if let Some(search) = search {
        filter = filter.query(search);
    }

    let products = state.browse(&filter).await?;
    tracing::debug!(count = products.len(), "Listing products");

    render_products(
        out,
        &products,
        &state.cart().cart(),
        &state.wishlist().wishlist(),
    )?;
    Ok(())
}

/// Show one product in detail.
pub async fn product(
    state: &AppState,
    id: ProductId,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let product = state.product(id).await?;
    render_product(
        out,
        &product,
        &state.cart().cart(),
        &state.wishlist().wishlist(),
    )?;
    Ok(())
}

/// List category names.
pub async fn categories(state: &AppState, out: &mut impl Write) -> Result<(), CommandError> {
    let categories = state.categories().await?;
    for category in &categories {
        writeln!(out, "{category}")?;
    }
    Ok(())
}

/// One row per product, marking what is already in the cart or wishlist.
pub fn render_products(
    out: &mut impl Write,
    products: &[Product],
    cart: &Cart,
    wishlist: &Wishlist,
) -> io::Result<()> {
    if products.is_empty() {
        return writeln!(out, "No products found.");
    }

    for product in products {
        let mut marks = String::new();
        if let Some(line) = cart.get(product.id) {
            marks.push_str(&format!("  [in cart x{}]", line.quantity));
        }
        if wishlist.contains(product.id) {
            marks.push_str("  [saved]");
        }
        writeln!(
            out,
            "{:>4}  {:>9}  {}{marks}",
            product.id.as_i64(),
            product.price.to_string(),
            product.title
        )?;
    }
    Ok(())
}

/// Product detail view.
pub fn render_product(
    out: &mut impl Write,
    product: &Product,
    cart: &Cart,
    wishlist: &Wishlist,
) -> io::Result<()> {
    writeln!(out, "{} (#{})", product.title, product.id)?;
    writeln!(out, "Price:    {}", product.price)?;
    writeln!(out, "Category: {}", product.category)?;
    writeln!(
        out,
        "Rating:   {:.1} ({} reviews)",
        product.rating.rate, product.rating.count
    )?;
    writeln!(out, "Image:    {}", product.image)?;
    if !product.description.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", product.description)?;
    }

    writeln!(out)?;
    match cart.get(product.id) {
        Some(line) => writeln!(out, "In your cart: {}", line.quantity)?,
        None => writeln!(out, "Not in your cart")?,
    }
    if wishlist.contains(product.id) {
        writeln!(out, "Saved to your wishlist")?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tote_core::Quantity;

    use super::*;
    use crate::test_support::product;

    fn render(products: &[Product], cart: &Cart, wishlist: &Wishlist) -> String {
        let mut out = Vec::new();
        render_products(&mut out, products, cart, wishlist).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_render_empty_list() {
        let text = render(&[], &Cart::new(), &Wishlist::new());
        assert_eq!(text, "No products found.\n");
    }

    #[test]
    fn test_render_marks_cart_and_wishlist() {
        let mut cart = Cart::new();
        cart.add(product(1, 1999), Quantity::new(2).unwrap());
        let mut wishlist = Wishlist::new();
        wishlist.add(product(2, 500));

        let text = render(&[product(1, 1999), product(2, 500)], &cart, &wishlist);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("$19.99"));
        assert!(lines[0].contains("[in cart x2]"));
        assert!(!lines[0].contains("[saved]"));
        assert!(lines[1].contains("Product 2"));
        assert!(lines[1].contains("[saved]"));
    }

    #[test]
    fn test_render_product_detail() {
        let mut out = Vec::new();
        render_product(&mut out, &product(7, 1050), &Cart::new(), &Wishlist::new()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Product 7 (#7)\n"));
        assert!(text.contains("Price:    $10.50"));
        assert!(text.contains("Not in your cart"));
        assert!(!text.contains("wishlist"));
    }
}
