//! Cart state store for a food-ordering UI.
//!
//! State changes flow through a pure command/event aggregate ([`Cart`]),
//! while persistence and rendering sit behind ports ([`CartStorage`],
//! [`RenderSink`]). The [`CartStore`] ties them together: hydrate from
//! storage on open, then persist and re-render after every mutation.

mod aggregate;
pub use aggregate::{Aggregate, fold};
mod cart;
pub use cart::{
    Cart, CartCommand, CartError, CartEvent, CartItem, Direction, NO_LOCATION, Totals,
};
mod error;
pub use error::StoreError;
mod message;
pub use message::{DEV_ORIGINS, InboundMessage, MenuSelection, OriginPolicy};
mod price;
pub use price::{format_amount, parse_price};
mod projection;
pub use projection::{CartView, LineView, NullSink, RenderSink, TextSink};
mod receipt;
pub use receipt::{Receipt, ReceiptLine, ReceiptLog};
mod storage;
pub use storage::{
    CartStorage, FEE_KEY, FileStorage, ITEMS_KEY, LOCATION_KEY, MemoryStorage, clear, hydrate,
    save_delivery, save_items,
};
mod store;
pub use store::{CartStore, DrawerState};
