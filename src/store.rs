//! Top-level entry point composing the cart aggregate, the persistence
//! port, the render sink, and the receipt log into a single [`CartStore`].
//!
//! Every mutating operation follows the same path: validate through the
//! aggregate's pure `handle`, fold the produced events into the state,
//! write the affected storage keys back, and re-render. Validation failures
//! leave state, storage, and rendering untouched.

use std::collections::HashMap;

use serde_json::Value;
use uuid::Uuid;

use crate::aggregate::{Aggregate, fold};
use crate::cart::{Cart, CartCommand, CartError, CartEvent, Direction, Totals};
use crate::error::StoreError;
use crate::message::{self, OriginPolicy};
use crate::projection::{CartView, RenderSink};
use crate::receipt::{Receipt, ReceiptLog};
use crate::storage::{self, CartStorage};

/// Cart drawer visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawerState {
    /// Drawer hidden. Initial state.
    #[default]
    Closed,
    /// Drawer visible.
    Open,
}

/// The cart store: in-memory state kept consistent with persisted storage
/// and the rendered drawer.
///
/// Generic over the persistence port `S` and the render sink `R` so the
/// core logic runs identically against an in-memory fake, files, or a real
/// display layer.
pub struct CartStore<S: CartStorage, R: RenderSink> {
    state: Cart,
    storage: S,
    sink: R,
    receipts: ReceiptLog,
    drawer: DrawerState,
    origins: OriginPolicy,
    location_labels: HashMap<String, String>,
}

impl<S: CartStorage, R: RenderSink> CartStore<S, R> {
    /// Open the store: hydrate state from storage and perform the initial
    /// render.
    ///
    /// Missing storage keys hydrate to an empty cart (cold start);
    /// malformed stored values are coerced to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if reading from the port fails.
    pub fn open(storage: S, sink: R, origins: OriginPolicy) -> Result<Self, StoreError<CartError>> {
        let state = storage::hydrate(&storage)?;
        tracing::debug!(
            aggregate = Cart::KIND,
            items = state.items.len(),
            "store opened"
        );
        let mut store = Self {
            state,
            storage,
            sink,
            receipts: ReceiptLog::new(),
            drawer: DrawerState::Closed,
            origins,
            location_labels: HashMap::new(),
        };
        store.render();
        Ok(store)
    }

    /// Register a human-readable label for a location token. Receipts fall
    /// back to the raw token for unregistered locations.
    pub fn with_location_label(
        mut self,
        token: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        self.location_labels.insert(token.into(), label.into());
        self
    }

    /// Current cart state.
    pub fn state(&self) -> &Cart {
        &self.state
    }

    /// Recorded receipts, most recent first.
    pub fn receipts(&self) -> &[Receipt] {
        self.receipts.entries()
    }

    /// The render sink, for inspecting rendered output.
    pub fn sink(&self) -> &R {
        &self.sink
    }

    /// Current drawer visibility.
    pub fn drawer(&self) -> DrawerState {
        self.drawer
    }

    /// Current totals. Pure read; matches the rendered figures.
    pub fn totals(&self) -> Totals {
        self.state.totals()
    }

    fn apply_events(&mut self, events: &[CartEvent]) {
        self.state = fold(std::mem::take(&mut self.state), events);
    }

    /// Add one of the named item; `price_text` is display text from the
    /// menu (currency formatting tolerated). Persists items and re-renders.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the write-back fails.
    pub fn add_item(
        &mut self,
        name: impl Into<String>,
        price_text: impl Into<String>,
    ) -> Result<(), StoreError<CartError>> {
        let name = name.into();
        tracing::debug!(item = %name, "add item");
        let events = self
            .state
            .handle(CartCommand::AddItem {
                name,
                price: price_text.into(),
            })
            .map_err(StoreError::Domain)?;
        self.apply_events(&events);
        storage::save_items(&mut self.storage, &self.state)?;
        self.render();
        Ok(())
    }

    /// Adjust an item's quantity by one. Decrement at quantity 1 and
    /// unknown names are no-ops; items and rendering are refreshed either
    /// way.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the write-back fails.
    pub fn adjust_quantity(
        &mut self,
        name: impl Into<String>,
        direction: Direction,
    ) -> Result<(), StoreError<CartError>> {
        let events = self
            .state
            .handle(CartCommand::AdjustQuantity {
                name: name.into(),
                direction,
            })
            .map_err(StoreError::Domain)?;
        self.apply_events(&events);
        storage::save_items(&mut self.storage, &self.state)?;
        self.render();
        Ok(())
    }

    /// Select the delivery location and its fee. Persists the fee and
    /// location keys (not the items) and re-renders.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the write-back fails.
    pub fn set_delivery_location(
        &mut self,
        location: impl Into<String>,
        fee: f64,
    ) -> Result<(), StoreError<CartError>> {
        let events = self
            .state
            .handle(CartCommand::SelectLocation {
                location: location.into(),
                fee,
            })
            .map_err(StoreError::Domain)?;
        self.apply_events(&events);
        storage::save_delivery(&mut self.storage, &self.state)?;
        self.render();
        Ok(())
    }

    /// Place the order.
    ///
    /// Requires a non-empty cart and a selected location. On success:
    /// snapshots a receipt (prepended to the history), resets the cart to
    /// defaults, removes all three storage keys, persists the now-empty
    /// item list, re-renders, and closes the drawer.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Domain`] with [`CartError::EmptyCart`] or
    /// [`CartError::NoLocationSelected`] on validation failure -- state and
    /// storage are untouched -- or [`StoreError::Storage`] if clearing the
    /// port fails.
    pub fn checkout(&mut self) -> Result<Uuid, StoreError<CartError>> {
        let events = self
            .state
            .handle(CartCommand::Checkout)
            .map_err(StoreError::Domain)?;

        // Snapshot before the events fold the cart back to defaults.
        let label = self
            .location_labels
            .get(&self.state.location)
            .cloned()
            .unwrap_or_else(|| self.state.location.clone());
        let receipt = Receipt::from_cart(&self.state, label);
        let id = receipt.id;

        self.apply_events(&events);
        storage::clear(&mut self.storage)?;
        storage::save_items(&mut self.storage, &self.state)?;
        self.receipts.record(receipt);
        self.render();
        self.render_receipts();
        self.drawer = DrawerState::Closed;

        tracing::debug!(receipt = %id, "order placed");
        Ok(id)
    }

    /// Project the current state and push it to the sink.
    ///
    /// Idempotent: the view is rebuilt from scratch and the sink replaces
    /// its previous output, so redundant calls are safe.
    pub fn render(&mut self) {
        let view = CartView::project(&self.state);
        self.sink.render_cart(&view);
    }

    /// Push the receipt feed to the sink, most recent first.
    pub fn render_receipts(&mut self) {
        self.sink.render_receipts(self.receipts.entries());
    }

    /// Route an inbound cross-frame message.
    ///
    /// Returns `Ok(true)` if the message passed the origin and shape checks
    /// and mutated the cart; `Ok(false)` if it was silently ignored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the write-back after an accepted
    /// message fails.
    pub fn handle_message(
        &mut self,
        origin: &str,
        payload: &Value,
    ) -> Result<bool, StoreError<CartError>> {
        let Some(cmd) = message::decode(&self.origins, origin, payload) else {
            return Ok(false);
        };
        let events = self.state.handle(cmd).map_err(StoreError::Domain)?;
        self.apply_events(&events);
        storage::save_items(&mut self.storage, &self.state)?;
        self.render();
        Ok(true)
    }

    /// Toggle drawer visibility (drawer click). Returns the new state.
    pub fn toggle_drawer(&mut self) -> DrawerState {
        self.drawer = match self.drawer {
            DrawerState::Closed => DrawerState::Open,
            DrawerState::Open => DrawerState::Closed,
        };
        self.drawer
    }

    /// Close the drawer (outside click or explicit close control).
    pub fn close_drawer(&mut self) {
        self.drawer = DrawerState::Closed;
    }

    /// Flip a receipt's detail section and re-render the feed.
    ///
    /// Returns `false` if no receipt has that id.
    pub fn toggle_receipt_details(&mut self, id: Uuid) -> bool {
        let toggled = self.receipts.toggle_details(id);
        if toggled {
            self.render_receipts();
        }
        toggled
    }
}
