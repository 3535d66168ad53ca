//! # Commands Module
//!
//! Functions the presentation layer calls, one per user action.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── catalog.rs   ◄─── Products, categories, product cards
//! ├── cart.rs      ◄─── Cart actions, badge, price details
//! ├── wishlist.rs  ◄─── Wishlist actions and toggle
//! ├── auth.rs      ◄─── Register, login, logout
//! └── checkout.rs  ◄─── Payment handoff and order submission
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the cart
//! fn get_cart(cart: &CartState) -> CartSnapshot
//!
//! // Needs cart and wishlist
//! async fn move_to_wishlist(cart: &CartState, wishlist: &WishlistState, id: ProductId)
//!
//! // Needs the HTTP client
//! async fn load_catalog(client: &StorefrontClient) -> AppResult<Catalog>
//! ```
//!
//! Commands that only touch in-memory state are infallible. Anything that
//! crosses a boundary returns `AppResult`.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod wishlist;
