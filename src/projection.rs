//! Render projection: a display-ready view of the cart and a sink to push
//! it to.
//!
//! [`CartView::project`] is a pure, full rebuild of the view from the
//! current state, so rendering is idempotent -- repeated renders of the same
//! state produce the same view with no accumulation. The [`RenderSink`]
//! trait is the seam to whatever actually draws the drawer; the core never
//! touches a display directly.

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::price::format_amount;
use crate::receipt::Receipt;

/// A display-ready cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineView {
    /// Item name.
    pub name: String,
    /// Current quantity.
    pub quantity: u32,
    /// Formatted line total, e.g. `"₱300.00"`.
    pub line_total: String,
}

/// Display-ready projection of the whole cart drawer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartView {
    /// Lines in cart insertion order.
    pub lines: Vec<LineView>,
    /// Formatted items subtotal.
    pub subtotal: String,
    /// Formatted delivery fee.
    pub delivery_fee: String,
    /// Formatted grand total.
    pub grand_total: String,
}

impl CartView {
    /// Build the view from scratch for the given state.
    pub fn project(cart: &Cart) -> Self {
        let lines = cart
            .items
            .iter()
            .map(|item| LineView {
                name: item.name.clone(),
                quantity: item.quantity,
                line_total: format_amount(item.line_total()),
            })
            .collect();

        let totals = cart.totals();
        Self {
            lines,
            subtotal: format_amount(totals.subtotal),
            delivery_fee: format_amount(cart.delivery_fee),
            grand_total: format_amount(totals.grand_total),
        }
    }
}

/// Destination for rendered views.
///
/// Implementations replace their previous output wholesale on every call;
/// the store re-renders after each mutation.
pub trait RenderSink {
    /// Replace the rendered cart drawer with `view`.
    fn render_cart(&mut self, view: &CartView);

    /// Replace the rendered receipt feed, most recent first.
    fn render_receipts(&mut self, receipts: &[Receipt]);
}

/// Sink that discards everything, for pages without cart elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn render_cart(&mut self, _view: &CartView) {}
    fn render_receipts(&mut self, _receipts: &[Receipt]) {}
}

/// Sink that renders the drawer and receipt feed as plain text.
#[derive(Debug, Clone, Default)]
pub struct TextSink {
    /// Current drawer text.
    pub cart_text: String,
    /// Current receipt feed text.
    pub receipts_text: String,
}

impl TextSink {
    /// Create an empty text sink.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderSink for TextSink {
    fn render_cart(&mut self, view: &CartView) {
        let mut out = String::new();
        for line in &view.lines {
            out.push_str(&format!(
                "{} x{} {}\n",
                line.name, line.quantity, line.line_total
            ));
        }
        out.push_str(&format!("Total: {}\n", view.subtotal));
        out.push_str(&format!("Delivery Fee: {}\n", view.delivery_fee));
        out.push_str(&format!("GRAND TOTAL: {}\n", view.grand_total));
        self.cart_text = out;
    }

    fn render_receipts(&mut self, receipts: &[Receipt]) {
        self.receipts_text = receipts
            .iter()
            .map(Receipt::render_text)
            .collect::<Vec<_>>()
            .join("\n");
    }
}
