//! Aggregate trait and event-fold helper.

use serde::{Serialize, de::DeserializeOwned};

/// A domain aggregate whose state advances by folding domain events.
///
/// The implementing type itself serves as the aggregate's state.
///
/// # Associated Types
///
/// - `Command`: the set of commands this aggregate can handle.
/// - `DomainEvent`: the set of events this aggregate can produce and apply.
/// - `Error`: command rejection / validation error.
///
/// # Contract
///
/// - [`handle`](Aggregate::handle) must be a pure decision function: no I/O,
///   no side effects. It validates a command against the current state and
///   returns zero or more events. `Ok(vec![])` means the command is a no-op.
/// - [`apply`](Aggregate::apply) must be a pure, total function. It takes
///   ownership of the current state and a reference to a domain event,
///   returning the next state.
pub trait Aggregate: Default + Clone + Serialize + DeserializeOwned + 'static {
    /// Identifies this aggregate type (e.g. "cart"). Used as a storage namespace.
    const KIND: &'static str;

    /// The set of commands this aggregate can handle.
    type Command;

    /// The set of events this aggregate can produce and apply.
    type DomainEvent: Clone;

    /// Command rejection / validation error type.
    type Error: std::error::Error + 'static;

    /// Validate a command against the current state and produce events.
    ///
    /// Returns `Ok(vec![])` if the command is a no-op.
    /// Returns `Err` to reject the command.
    fn handle(&self, cmd: Self::Command) -> Result<Vec<Self::DomainEvent>, Self::Error>;

    /// Apply a single event to produce the next state.
    fn apply(self, event: &Self::DomainEvent) -> Self;
}

/// Fold a sequence of events over a state, yielding the final state.
///
/// Equivalent to calling [`Aggregate::apply`] once per event in order.
pub fn fold<A: Aggregate>(state: A, events: &[A::DomainEvent]) -> A {
    events.iter().fold(state, |s, e| s.apply(e))
}
