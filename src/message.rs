//! Inbound message adapter for the menu frame.
//!
//! The menu runs in a separate frame and posts `add-to-cart` messages. This
//! adapter is the trust boundary: the sender origin is checked against an
//! allow-list and the payload must carry a recognized `type` tag before it
//! becomes a [`CartCommand`]. Everything else is dropped without mutating
//! any state.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cart::CartCommand;

/// Development hosts allowed alongside the page's own origin.
pub const DEV_ORIGINS: [&str; 2] = ["http://127.0.0.1:5500", "http://localhost:5500"];

/// Origin allow-list for inbound messages.
#[derive(Debug, Clone)]
pub struct OriginPolicy {
    allowed: Vec<String>,
}

impl OriginPolicy {
    /// Build the policy: the page's own origin plus the known dev hosts.
    pub fn new(own_origin: impl Into<String>) -> Self {
        let mut allowed = vec![own_origin.into()];
        allowed.extend(DEV_ORIGINS.iter().map(|o| o.to_string()));
        Self { allowed }
    }

    /// Whether messages from `origin` are accepted.
    pub fn allows(&self, origin: &str) -> bool {
        self.allowed.iter().any(|o| o == origin)
    }
}

/// A menu item referenced by an inbound message.
///
/// The price is display text (currency symbols, separators) and is parsed
/// downstream by the cart aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuSelection {
    /// Item name as shown on the menu.
    pub name: String,
    /// Display price text, e.g. `"₱150.00"`.
    pub price: String,
}

/// Recognized inbound message payloads, discriminated by the `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InboundMessage {
    /// `{ "type": "add-to-cart", "item": { "name", "price" } }`
    #[serde(rename = "add-to-cart")]
    AddToCart {
        /// The selected menu item.
        item: MenuSelection,
    },
}

/// Decode an inbound message into a cart command.
///
/// Returns `None` -- without error -- when the origin is not allowed or the
/// payload does not carry a recognized `type` tag. Rejections are logged at
/// debug level only; a hostile frame learns nothing from the response.
pub fn decode(policy: &OriginPolicy, origin: &str, payload: &Value) -> Option<CartCommand> {
    if !policy.allows(origin) {
        tracing::debug!(%origin, "dropping message from disallowed origin");
        return None;
    }

    match serde_json::from_value::<InboundMessage>(payload.clone()) {
        Ok(InboundMessage::AddToCart { item }) => Some(CartCommand::AddItem {
            name: item.name,
            price: item.price,
        }),
        Err(e) => {
            tracing::debug!(error = %e, "dropping unrecognized message payload");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn policy() -> OriginPolicy {
        OriginPolicy::new("https://food.example")
    }

    fn add_payload() -> Value {
        json!({
            "type": "add-to-cart",
            "item": { "name": "Burger", "price": "₱150.00" }
        })
    }

    #[test]
    fn own_origin_allowed() {
        assert!(policy().allows("https://food.example"));
    }

    #[test]
    fn dev_origins_allowed() {
        let policy = policy();
        for origin in DEV_ORIGINS {
            assert!(policy.allows(origin), "{origin} should be allowed");
        }
    }

    #[test]
    fn other_origin_rejected() {
        assert!(!policy().allows("https://evil.example"));
    }

    #[test]
    fn decodes_add_to_cart() {
        let cmd = decode(&policy(), "https://food.example", &add_payload());
        match cmd {
            Some(CartCommand::AddItem { name, price }) => {
                assert_eq!(name, "Burger");
                assert_eq!(price, "₱150.00");
            }
            other => panic!("expected AddItem, got {other:?}"),
        }
    }

    #[test]
    fn disallowed_origin_never_yields_command() {
        // Even a perfectly shaped payload is dropped.
        let cmd = decode(&policy(), "https://evil.example", &add_payload());
        assert!(cmd.is_none());
    }

    #[test]
    fn missing_type_tag_rejected() {
        let payload = json!({ "item": { "name": "Burger", "price": "150" } });
        assert!(decode(&policy(), "https://food.example", &payload).is_none());
    }

    #[test]
    fn unknown_type_tag_rejected() {
        let payload = json!({ "type": "remove-from-cart", "item": { "name": "Burger", "price": "150" } });
        assert!(decode(&policy(), "https://food.example", &payload).is_none());
    }

    #[test]
    fn malformed_item_rejected() {
        let payload = json!({ "type": "add-to-cart", "item": "Burger" });
        assert!(decode(&policy(), "https://food.example", &payload).is_none());
    }

    #[test]
    fn envelope_serde_roundtrip() {
        let msg = InboundMessage::AddToCart {
            item: MenuSelection {
                name: "Fries".into(),
                price: "₱80.00".into(),
            },
        };
        let json = serde_json::to_string(&msg).expect("serialize");
        let back: InboundMessage = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, msg);
    }
}
