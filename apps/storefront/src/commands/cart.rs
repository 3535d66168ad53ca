//! # Cart Commands
//!
//! Every cart button maps onto one reducer action.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Payment  │────►│  Order   │       │
//! │  │  Cart    │     │          │     │  Widget  │     │  Placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                │             │
//! │                   add_to_cart        dismissed       CLEAR_CART        │
//! │                   increase/decrease  (cart kept)     (checkout.rs)     │
//! │                   remove                                               │
//! │                   move_to_wishlist ──► wishlist                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use shopit_core::queries::{cart_button as cart_button_for, price_details as compute_price};
use shopit_core::{
    CartAction, CartButton, CartTotals, PriceDetails, Product, ProductId, Wishlist,
    WishlistAction,
};
use tracing::debug;

use crate::error::{AppError, AppResult, ErrorCode};
use crate::state::{CartSnapshot, CartState, StorefrontConfig, WishlistState};

/// Result of moving a line from the cart to the wishlist.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveToWishlist {
    pub cart: CartSnapshot,
    pub wishlist: Wishlist,
}

pub fn get_cart(cart: &CartState) -> CartSnapshot {
    debug!("get_cart command");
    cart.with_cart(|c| CartSnapshot::from(c))
}

/// Adds one unit of `product`, or bumps its quantity when already present.
pub fn add_to_cart(cart: &CartState, product: Product) -> CartSnapshot {
    debug!(product_id = %product.id, "add_to_cart command");
    let next = cart.dispatch(CartAction::AddToCart { product });
    CartSnapshot::from(&next)
}

pub fn remove_from_cart(cart: &CartState, id: ProductId) -> CartSnapshot {
    debug!(product_id = %id, "remove_from_cart command");
    CartSnapshot::from(&cart.dispatch(CartAction::RemoveFromCart { id }))
}

pub fn increase_quantity(cart: &CartState, id: ProductId) -> CartSnapshot {
    debug!(product_id = %id, "increase_quantity command");
    CartSnapshot::from(&cart.dispatch(CartAction::IncreaseQuantity { id }))
}

/// Decrements the line; at quantity 1 the line is removed.
pub fn decrease_quantity(cart: &CartState, id: ProductId) -> CartSnapshot {
    debug!(product_id = %id, "decrease_quantity command");
    CartSnapshot::from(&cart.dispatch(CartAction::DecreaseQuantity { id }))
}

pub fn clear_cart(cart: &CartState) -> CartSnapshot {
    debug!("clear_cart command");
    CartSnapshot::from(&cart.dispatch(CartAction::ClearCart))
}

/// Counts for the header badge.
pub fn cart_badge(cart: &CartState) -> CartTotals {
    cart.with_cart(|c| CartTotals::from(c))
}

pub fn cart_button(cart: &CartState, id: &ProductId) -> CartButton {
    cart.with_cart(|c| cart_button_for(c, id))
}

/// The price panel: subtotal, flat delivery charge and grand total.
pub fn price_details(cart: &CartState, config: &StorefrontConfig) -> PriceDetails {
    cart.with_cart(|c| compute_price(c, config.store.delivery_charge))
}

/// Moves a cart line's product to the wishlist and drops it from the cart.
///
/// ## Errors
/// `NotFound` when the product is not in the cart.
pub async fn move_to_wishlist(
    cart: &CartState,
    wishlist: &WishlistState,
    id: ProductId,
) -> AppResult<MoveToWishlist> {
    debug!(product_id = %id, "move_to_wishlist command");

    let product = cart
        .with_cart(|c| c.get(&id).map(|line| line.product.clone()))
        .ok_or_else(|| {
            AppError::new(ErrorCode::NotFound, format!("Product {} is not in the cart", id))
        })?;

    let wishlist = wishlist
        .dispatch(WishlistAction::AddToWishlist { product })
        .await;
    let next = cart.dispatch(CartAction::RemoveFromCart { id });

    Ok(MoveToWishlist {
        cart: CartSnapshot::from(&next),
        wishlist,
    })
}
