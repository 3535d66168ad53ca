//! # Repository Module
//!
//! One repository per table, each a thin handle over the shared pool.
//!
//! ```text
//! db.users()     ──► UserRepository      users
//! db.session()   ──► SessionRepository   session (single row)
//! db.wishlist()  ──► WishlistRepository  wishlist_entries
//! ```
//!
//! Queries use the runtime `sqlx::query`/`query_as` API with `FromRow` row
//! types, so building needs no live database.

pub mod session;
pub mod user;
pub mod wishlist;
