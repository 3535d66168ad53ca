//! # Cart State
//!
//! The shopping cart for the current browsing session. Never persisted:
//! a restart starts with an empty cart.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  UI Action                Command                  Action dispatched    │
//! │  ─────────                ───────                  ─────────────────    │
//! │                                                                         │
//! │  Add to Cart ────────────► add_to_cart() ─────────► ADD_TO_CART         │
//! │                                                                         │
//! │  + / - buttons ──────────► increase/decrease() ───► *_QUANTITY          │
//! │                                                                         │
//! │  Remove ─────────────────► remove_from_cart() ────► REMOVE_FROM_CART    │
//! │                                                                         │
//! │  Payment confirmed ──────► place_order() ─────────► CLEAR_CART          │
//! │                                                                         │
//! │  View Cart ──────────────► get_cart() ────────────► (read only)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use shopit_core::{Cart, CartAction, CartLine, CartTotals};
use tracing::debug;

use super::store::Store;

/// Cart contents plus the derived totals, as returned by cart commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    pub items: Vec<CartLine>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartSnapshot {
    fn from(cart: &Cart) -> Self {
        CartSnapshot {
            items: cart.lines().to_vec(),
            totals: CartTotals::from(cart),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CartState {
    store: Store<Cart>,
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `action` and returns the new cart.
    pub fn dispatch(&self, action: CartAction) -> Cart {
        debug!(?action, "Cart dispatch");
        self.store.dispatch(&action)
    }

    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        self.store.with(f)
    }

    pub fn snapshot(&self) -> Cart {
        self.store.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopit_core::{Money, Product};

    fn product(id: &str, price: i64) -> Product {
        Product::new(id, format!("Product {}", id), Money::from_major(price), "misc")
    }

    #[test]
    fn test_dispatch_sequence() {
        let state = CartState::new();
        let p1 = product("1", 100);

        state.dispatch(CartAction::AddToCart { product: p1.clone() });
        state.dispatch(CartAction::IncreaseQuantity { id: p1.id.clone() });
        let cart = state.dispatch(CartAction::DecreaseQuantity { id: p1.id.clone() });

        assert_eq!(cart.get(&p1.id).map(|l| l.quantity()), Some(1));

        let cart = state.dispatch(CartAction::DecreaseQuantity { id: p1.id });
        assert!(cart.is_empty());
    }

    #[test]
    fn test_unrecognized_action_is_noop() {
        let state = CartState::new();
        state.dispatch(CartAction::AddToCart { product: product("1", 10) });

        let before = state.snapshot();
        let after = state.dispatch(CartAction::Unrecognized);
        assert_eq!(before, after);
    }

    #[test]
    fn test_snapshot_carries_totals() {
        let state = CartState::new();
        let p1 = product("1", 100);
        state.dispatch(CartAction::AddToCart { product: p1.clone() });
        state.dispatch(CartAction::AddToCart { product: p1 });
        state.dispatch(CartAction::AddToCart { product: product("2", 50) });

        let snapshot = state.with_cart(|c| CartSnapshot::from(c));
        assert_eq!(snapshot.items.len(), 2);
        assert_eq!(snapshot.totals.total_quantity, 3);
        assert_eq!(snapshot.totals.total_amount, Money::from_major(250));
    }
}
