//! # Wishlist Commands
//!
//! Every command returns the wishlist after the change. Persistence happens
//! inside [`WishlistState::dispatch`].

use serde::Serialize;
use shopit_core::{Product, ProductId, Wishlist, WishlistAction};
use tracing::debug;

use crate::state::{ToggleOutcome, WishlistState};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistToggle {
    pub outcome: ToggleOutcome,
    pub wishlist: Wishlist,
}

pub fn get_wishlist(wishlist: &WishlistState) -> Wishlist {
    debug!("get_wishlist command");
    wishlist.snapshot()
}

/// Adds `product`. Already present is a no-op.
pub async fn add_to_wishlist(wishlist: &WishlistState, product: Product) -> Wishlist {
    debug!(product_id = %product.id, "add_to_wishlist command");
    wishlist
        .dispatch(WishlistAction::AddToWishlist { product })
        .await
}

pub async fn remove_from_wishlist(wishlist: &WishlistState, id: ProductId) -> Wishlist {
    debug!(product_id = %id, "remove_from_wishlist command");
    wishlist
        .dispatch(WishlistAction::RemoveFromWishlist { id })
        .await
}

/// The heart icon on product cards.
pub async fn toggle_wishlist(wishlist: &WishlistState, product: Product) -> WishlistToggle {
    debug!(product_id = %product.id, "toggle_wishlist command");
    let (outcome, wishlist) = wishlist.toggle(product).await;
    WishlistToggle { outcome, wishlist }
}
