//! # Application State
//!
//! State containers shared by the command functions.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartState      Store<Cart>       memory only                           │
//! │  WishlistState  Store<Wishlist>   hydrate + flush via WishlistRepository│
//! │  SessionState   Option<Session>   hydrate + flush via SessionRepository │
//! │  StorefrontConfig                 read-only after startup               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each container is the single owner of its value. Commands receive the
//! containers they need by reference.

mod cart;
mod config;
mod session;
mod store;
mod wishlist;

pub use cart::{CartSnapshot, CartState};
pub use config::{
    ApiSettings, ConfigError, ConfigResult, PaymentSettings, StorageSettings, StoreSettings,
    StorefrontConfig, CONFIG_FILE_NAME, DATABASE_FILE_NAME,
};
pub use session::SessionState;
pub use store::Store;
pub use wishlist::{ToggleOutcome, WishlistState};
