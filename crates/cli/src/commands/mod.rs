//! Command implementations.
//!
//! Each command writes its output to a caller-supplied writer so the
//! rendering can be exercised without a terminal.

pub mod cart;
pub mod catalog;
pub mod wishlist;

use std::io;

use thiserror::Error;

use tote_core::{OrderSummary, Quantity, format_usd};
use tote_storefront::error::AppError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Storefront operation failed.
    #[error(transparent)]
    App(#[from] AppError),

    /// Writing output failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl CommandError {
    /// Message to show the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::App(err) => err.user_message(),
            Self::Output(err) => format!("Failed to write output: {err}"),
        }
    }

    /// Report the error to Sentry (when reportable) and log it.
    pub fn capture(&self) {
        match self {
            Self::App(err) => err.capture(),
            Self::Output(err) => tracing::debug!(error = %err, "Output closed"),
        }
    }
}

/// Parse a user-supplied quantity.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for zero.
pub fn parse_quantity(value: u32) -> Result<Quantity, AppError> {
    Quantity::new(value)
        .ok_or_else(|| AppError::BadRequest("Quantity must be at least 1.".to_string()))
}

/// Render order totals.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn render_summary(out: &mut impl io::Write, summary: &OrderSummary) -> io::Result<()> {
    let shipping = if summary.shipping.is_zero() {
        "Free".to_string()
    } else {
        format_usd(summary.shipping)
    };

    writeln!(out, "Items:    {}", summary.item_count)?;
    writeln!(out, "Subtotal: {}", format_usd(summary.subtotal))?;
    writeln!(out, "Shipping: {shipping}")?;
    writeln!(out, "Total:    {}", format_usd(summary.total))
}
