//! # Wishlist State Machine
//!
//! Saved products, one entry per product id, in the order they were saved.
//!
//! ```text
//! ADD_TO_WISHLIST(p)        append p unless an entry with p.id exists
//! REMOVE_FROM_WISHLIST(id)  drop the entry (no-op when absent)
//! anything else             state unchanged
//! ```
//!
//! Unlike the cart, the wishlist survives restarts: the storefront flushes it
//! to local storage after every change.

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::reducer::{ActionEnvelope, ActionPayload, Reducer};
use crate::types::{Product, ProductId};

/// Wishlist actions, same wire shape as [`crate::cart::CartAction`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WishlistAction {
    AddToWishlist { product: Product },
    RemoveFromWishlist { id: ProductId },
    Unrecognized,
}

impl<'de> Deserialize<'de> for WishlistAction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let ActionEnvelope { tag, mut payload } = ActionEnvelope::deserialize(deserializer)?;
        decode_action(&tag, &mut payload).map_err(de::Error::custom)
    }
}

fn decode_action(tag: &str, payload: &mut ActionPayload) -> serde_json::Result<WishlistAction> {
    Ok(match tag {
        "ADD_TO_WISHLIST" => WishlistAction::AddToWishlist {
            product: payload.field("product")?,
        },
        "REMOVE_FROM_WISHLIST" => WishlistAction::RemoveFromWishlist {
            id: payload.field("id")?,
        },
        _ => WishlistAction::Unrecognized,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wishlist {
    entries: Vec<Product>,
}

impl Wishlist {
    pub fn new() -> Self {
        Wishlist {
            entries: Vec::new(),
        }
    }

    /// Builds a wishlist from a persisted snapshot, keeping the first entry
    /// for any repeated id.
    pub fn from_entries(entries: impl IntoIterator<Item = Product>) -> Self {
        let mut kept: Vec<Product> = Vec::new();
        for product in entries {
            if !kept.iter().any(|p| p.id == product.id) {
                kept.push(product);
            }
        }
        Wishlist { entries: kept }
    }

    pub fn entries(&self) -> &[Product] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.entries.iter().any(|p| &p.id == id)
    }

    /// Product ids in wishlist order.
    pub fn product_ids(&self) -> Vec<ProductId> {
        self.entries.iter().map(|p| p.id.clone()).collect()
    }
}

impl Reducer for Wishlist {
    type Action = WishlistAction;

    fn apply(&self, action: &WishlistAction) -> Wishlist {
        match action {
            WishlistAction::AddToWishlist { product } => {
                if self.contains(&product.id) {
                    return self.clone();
                }
                let mut entries = self.entries.clone();
                entries.push(product.clone());
                Wishlist { entries }
            }
            WishlistAction::RemoveFromWishlist { id } => Wishlist {
                entries: self
                    .entries
                    .iter()
                    .filter(|p| &p.id != id)
                    .cloned()
                    .collect(),
            },
            WishlistAction::Unrecognized => self.clone(),
        }
    }
}

impl<'a> IntoIterator for &'a Wishlist {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
