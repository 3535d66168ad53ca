//! # shopit-core: Pure Business Logic for the Shop It storefront
//!
//! This crate holds the state machines and derived queries behind the
//! storefront as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shop It Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Presentation layer                           │   │
//! │  │    Home ──► Product card ──► Cart ──► Address ──► Checkout     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ dispatch(action)                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 apps/storefront (commands, state)               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shopit-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   cart    │  │ wishlist  │  │  queries  │  │ validation│  │   │
//! │  │   │ CartLine  │  │ Wishlist  │  │  totals   │  │  address  │  │   │
//! │  │   │CartAction │  │  Action   │  │  filters  │  │  signup   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Category, Address, User, Order)
//! - [`money`] - Money type with integer arithmetic
//! - [`reducer`] - The `Reducer` trait shared by both state machines
//! - [`cart`] - Cart state machine
//! - [`wishlist`] - Wishlist state machine
//! - [`queries`] - Derived queries (totals, category filter, membership)
//! - [`validation`] - Checkout and signup validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use shopit_core::{Cart, CartAction, Money, Product, Reducer};
//! use shopit_core::queries::total_amount;
//!
//! let shirt = Product::new("p-1", "Linen Shirt", Money::from_major(100), "clothing");
//!
//! let cart = Cart::new()
//!     .apply(&CartAction::AddToCart { product: shirt.clone() })
//!     .apply(&CartAction::AddToCart { product: shirt });
//!
//! assert_eq!(cart.len(), 1);
//! assert_eq!(total_amount(Some(&cart)), Money::from_major(200));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod queries;
pub mod reducer;
pub mod types;
pub mod validation;
pub mod wishlist;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartAction, CartLine, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use queries::{CartButton, PriceDetails};
pub use reducer::Reducer;
pub use types::*;
pub use wishlist::{Wishlist, WishlistAction};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Category name that bypasses filtering.
///
/// Compared case-insensitively, so "all" and "ALL" behave the same.
pub const ALL_CATEGORIES: &str = "All";

/// Id given to the synthetic "All" entry appended to the category list.
pub const ALL_CATEGORIES_ID: &str = "1a";

/// Image shown when a product carries no images.
pub const PLACEHOLDER_IMAGE: &str = "/assets/placeholder.jpg";
