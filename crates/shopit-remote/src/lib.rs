//! # shopit-remote: Boundary HTTP client for the Shop It storefront
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  apps/storefront commands                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 shopit-remote (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   StorefrontClient ──► reqwest ──► REST endpoints               │   │
//! │  │   RemoteCart / RemoteWishlist  (server mirror records)         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  http://localhost:3003 (products, categories, carts, wishlists, orders)│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use shopit_remote::StorefrontClient;
//!
//! let client = StorefrontClient::new("http://localhost:3003")?;
//! let products = client.products().await?;
//! ```

pub mod client;
pub mod error;
pub mod types;

pub use client::{StorefrontClient, StorefrontClientBuilder, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{RemoteError, RemoteResult};
pub use types::{RemoteCart, RemoteCartItem, RemoteWishlist};
