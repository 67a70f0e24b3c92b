//! Order receipts: immutable snapshots of completed checkouts.
//!
//! Receipts live only in memory (never persisted, gone on restart). The log
//! keeps them most-recent-first; the only mutation after recording is the
//! UI-visible expand/collapse of a receipt's detail section.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cart::Cart;
use crate::price::format_amount;

/// One line of a receipt, snapshotted from a cart item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptLine {
    /// Item name.
    pub name: String,
    /// Quantity ordered.
    pub quantity: u32,
    /// Line total at checkout time.
    pub line_total: f64,
}

/// A completed order, snapshotted at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    /// Identity used to address this receipt's detail toggle.
    pub id: Uuid,
    /// Local time the order was placed.
    pub placed_at: DateTime<Local>,
    /// Line items as they were at checkout.
    pub lines: Vec<ReceiptLine>,
    /// Human-readable delivery location.
    pub location_label: String,
    /// Delivery fee charged.
    pub delivery_fee: f64,
    /// Subtotal plus delivery fee.
    pub grand_total: f64,
    /// Whether the detail section is currently expanded.
    pub details_shown: bool,
}

impl Receipt {
    /// Snapshot a cart into a receipt. Details start collapsed.
    pub fn from_cart(cart: &Cart, location_label: impl Into<String>) -> Self {
        let lines = cart
            .items
            .iter()
            .map(|item| ReceiptLine {
                name: item.name.clone(),
                quantity: item.quantity,
                line_total: item.line_total(),
            })
            .collect();

        Self {
            id: Uuid::new_v4(),
            placed_at: Local::now(),
            lines,
            location_label: location_label.into(),
            delivery_fee: cart.delivery_fee,
            grand_total: cart.totals().grand_total,
            details_shown: false,
        }
    }

    /// Render this receipt as plain text: a timestamp header, plus the
    /// detail section when expanded.
    pub fn render_text(&self) -> String {
        let mut out = format!("{}\n", self.placed_at.format("%Y-%m-%d %H:%M:%S"));
        if self.details_shown {
            for line in &self.lines {
                out.push_str(&format!(
                    "  {} x{} — {}\n",
                    line.name,
                    line.quantity,
                    format_amount(line.line_total)
                ));
            }
            out.push_str(&format!("  Location: {}\n", self.location_label));
            out.push_str(&format!(
                "  Delivery Fee: {}\n",
                format_amount(self.delivery_fee)
            ));
            out.push_str(&format!(
                "  Grand Total: {}\n",
                format_amount(self.grand_total)
            ));
        }
        out
    }
}

/// In-memory receipt history, most recent first.
#[derive(Debug, Clone, Default)]
pub struct ReceiptLog {
    entries: Vec<Receipt>,
}

impl ReceiptLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a receipt so the newest order renders first.
    pub fn record(&mut self, receipt: Receipt) {
        self.entries.insert(0, receipt);
    }

    /// Receipts, most recent first.
    pub fn entries(&self) -> &[Receipt] {
        &self.entries
    }

    /// Flip the detail section of the identified receipt.
    ///
    /// Returns `false` if no receipt has that id.
    pub fn toggle_details(&mut self, id: Uuid) -> bool {
        match self.entries.iter_mut().find(|r| r.id == id) {
            Some(receipt) => {
                receipt.details_shown = !receipt.details_shown;
                true
            }
            None => false,
        }
    }

    /// Number of recorded receipts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no receipts have been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
