//! Cart aggregate -- the order being assembled by the user.
//!
//! The cart holds line items in insertion order plus the selected delivery
//! location and its fee. Items merge by name: re-adding an existing item
//! bumps its quantity and keeps the unit price from the first add. Quantity
//! floors at 1 (decrement at 1 is a no-op; items are never auto-removed).
//! Checkout is valid only with at least one item and a real location.

use serde::{Deserialize, Serialize};

use crate::aggregate::Aggregate;
use crate::price::parse_price;

/// Location token meaning "no delivery location selected".
pub const NO_LOCATION: &str = "0";

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// A single cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Item name; unique within the cart.
    pub name: String,
    /// Unit price, fixed at the value parsed on first add.
    #[serde(rename = "priceValue")]
    pub unit_price: f64,
    /// Quantity, always >= 1.
    #[serde(rename = "qty")]
    pub quantity: u32,
}

impl CartItem {
    /// Line total: unit price times quantity.
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// Cart state: line items in insertion order plus delivery selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    /// Line items in the order they were first added.
    pub items: Vec<CartItem>,
    /// Delivery fee for the selected location.
    pub delivery_fee: f64,
    /// Selected location token; [`NO_LOCATION`] when none is selected.
    pub location: String,
}

impl Default for Cart {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            delivery_fee: 0.0,
            location: NO_LOCATION.to_string(),
        }
    }
}

/// Subtotal and grand total derived from a [`Cart`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    /// Sum of all line totals.
    pub subtotal: f64,
    /// Subtotal plus delivery fee.
    pub grand_total: f64,
}

impl Cart {
    /// Compute current totals. Pure function of the state; full precision.
    pub fn totals(&self) -> Totals {
        let subtotal: f64 = self.items.iter().map(CartItem::line_total).sum();
        Totals {
            subtotal,
            grand_total: subtotal + self.delivery_fee,
        }
    }

    /// Whether a delivery location has been selected.
    pub fn has_location(&self) -> bool {
        self.location != NO_LOCATION
    }

    /// Quantity of the named item, or `None` if it is not in the cart.
    pub fn quantity_of(&self, name: &str) -> Option<u32> {
        self.items.iter().find(|i| i.name == name).map(|i| i.quantity)
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Quantity adjustment direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Increase quantity by one. Always applies.
    Increment,
    /// Decrease quantity by one. No-op if the result would drop below 1.
    Decrement,
}

/// Commands accepted by the [`Cart`] aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum CartCommand {
    /// Add one of the named item; price is display text from the menu.
    AddItem { name: String, price: String },
    /// Adjust an existing item's quantity by one in either direction.
    AdjustQuantity { name: String, direction: Direction },
    /// Select a delivery location and its fee.
    SelectLocation { location: String, fee: f64 },
    /// Place the order, clearing the cart.
    Checkout,
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Domain events produced by the [`Cart`] aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum CartEvent {
    /// A new line was added with quantity 1.
    ItemAdded { name: String, unit_price: f64 },
    /// An existing line's quantity changed to the given value.
    QuantitySet { name: String, quantity: u32 },
    /// The delivery location and fee changed.
    LocationSelected { location: String, fee: f64 },
    /// The order was placed; the cart resets to defaults.
    OrderPlaced,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur when handling a [`CartCommand`].
#[derive(Debug, thiserror::Error)]
pub enum CartError {
    /// Checkout attempted with no items in the cart.
    #[error("cart is empty")]
    EmptyCart,
    /// Checkout attempted without a delivery location selected.
    #[error("no delivery location selected")]
    NoLocationSelected,
}

// ---------------------------------------------------------------------------
// Aggregate impl
// ---------------------------------------------------------------------------

impl Aggregate for Cart {
    const KIND: &'static str = "cart";
    type Command = CartCommand;
    type DomainEvent = CartEvent;
    type Error = CartError;

    fn handle(&self, cmd: CartCommand) -> Result<Vec<CartEvent>, CartError> {
        match cmd {
            CartCommand::AddItem { name, price } => {
                // Existing line: bump quantity, keep the original unit price.
                if let Some(quantity) = self.quantity_of(&name) {
                    return Ok(vec![CartEvent::QuantitySet {
                        name,
                        quantity: quantity + 1,
                    }]);
                }
                Ok(vec![CartEvent::ItemAdded {
                    name,
                    unit_price: parse_price(&price),
                }])
            }
            CartCommand::AdjustQuantity { name, direction } => {
                let Some(quantity) = self.quantity_of(&name) else {
                    // Unknown name: no-op.
                    return Ok(vec![]);
                };
                let next = match direction {
                    Direction::Increment => quantity + 1,
                    Direction::Decrement if quantity > 1 => quantity - 1,
                    // Quantity floor: decrement at 1 is a no-op.
                    Direction::Decrement => return Ok(vec![]),
                };
                Ok(vec![CartEvent::QuantitySet {
                    name,
                    quantity: next,
                }])
            }
            CartCommand::SelectLocation { location, fee } => {
                Ok(vec![CartEvent::LocationSelected { location, fee }])
            }
            CartCommand::Checkout => {
                if self.items.is_empty() {
                    return Err(CartError::EmptyCart);
                }
                if !self.has_location() {
                    return Err(CartError::NoLocationSelected);
                }
                Ok(vec![CartEvent::OrderPlaced])
            }
        }
    }

    fn apply(mut self, event: &CartEvent) -> Self {
        match event {
            CartEvent::ItemAdded { name, unit_price } => {
                self.items.push(CartItem {
                    name: name.clone(),
                    unit_price: *unit_price,
                    quantity: 1,
                });
            }
            CartEvent::QuantitySet { name, quantity } => {
                if let Some(item) = self.items.iter_mut().find(|i| &i.name == name) {
                    item.quantity = *quantity;
                }
            }
            CartEvent::LocationSelected { location, fee } => {
                self.location = location.clone();
                self.delivery_fee = *fee;
            }
            CartEvent::OrderPlaced => {
                self = Cart::default();
            }
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
