//! Reducer: applies a tagged action to a state value and returns the next state.
//!
//! Both storefront state machines (cart, wishlist) implement this trait so the
//! app layer can hold them in one generic container.
//!
//! ## Action Wire Shape
//! ```text
//! {"type": "ADD_TO_CART", "payload": {"product": {...}}}
//! {"type": "CLEAR_CART"}
//! {"type": "APPLY_COUPON", "payload": {"code": "X"}}   ← unknown tag, no-op
//! ```
//! Decoding goes through `ActionEnvelope` so an unknown tag is accepted
//! whatever its payload looks like.

use serde::de::{self, DeserializeOwned};
use serde::Deserialize;
use serde_json::Value;

/// A pure, total state transition.
///
/// `apply` never fails and never mutates `self`; an action that does not
/// change anything yields a value equal to the input.
pub trait Reducer: Clone {
    /// The closed set of actions this state accepts.
    type Action;

    /// Returns the state after `action`.
    fn apply(&self, action: &Self::Action) -> Self;

    /// Folds a sequence of actions, left to right.
    fn apply_all<'a, I>(&self, actions: I) -> Self
    where
        I: IntoIterator<Item = &'a Self::Action>,
        Self::Action: 'a,
    {
        actions
            .into_iter()
            .fold(self.clone(), |state, action| state.apply(action))
    }
}

// =============================================================================
// Action Envelope
// =============================================================================

/// `{type, payload}` before the tag is matched against a known action.
#[derive(Debug, Deserialize)]
pub(crate) struct ActionEnvelope {
    #[serde(rename = "type")]
    pub(crate) tag: String,

    #[serde(default)]
    pub(crate) payload: ActionPayload,
}

/// The raw payload object; absent payloads decode as JSON null.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub(crate) struct ActionPayload(Value);

impl ActionPayload {
    /// Takes `name` out of the payload and decodes it.
    pub(crate) fn field<T: DeserializeOwned>(&mut self, name: &'static str) -> serde_json::Result<T> {
        let value = self
            .0
            .get_mut(name)
            .map(Value::take)
            .ok_or_else(|| <serde_json::Error as de::Error>::missing_field(name))?;
        serde_json::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_without_payload() {
        let envelope: ActionEnvelope = serde_json::from_str(r#"{"type":"CLEAR_CART"}"#).unwrap();
        assert_eq!(envelope.tag, "CLEAR_CART");
    }

    #[test]
    fn test_payload_field_missing() {
        let mut envelope: ActionEnvelope =
            serde_json::from_str(r#"{"type":"REMOVE_FROM_CART","payload":{}}"#).unwrap();
        let err = envelope.payload.field::<String>("id").unwrap_err();
        assert!(err.to_string().contains("id"));
    }
}
