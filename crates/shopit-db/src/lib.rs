//! # shopit-db: Local Storage for the Shop It storefront
//!
//! Everything the storefront keeps across restarts lives here: the mock user
//! list, the signed-in session and the wishlist. The cart is not stored.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shop It Data Flow                                │
//! │                                                                         │
//! │  storefront state containers (SessionState, WishlistState)             │
//! │  MockAuthService                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     shopit-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ UserRepo      │    │ 001_init.sql │  │   │
//! │  │   │ SqlitePool    │◄───│ SessionRepo   │    │              │  │   │
//! │  │   │               │    │ WishlistRepo  │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  shopit.db in the platform data directory                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shopit_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/shopit.db")).await?;
//! let session = db.session().load().await?;
//! let wishlist = db.wishlist().load().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::session::SessionRepository;
pub use repository::user::{NewUser, UserRecord, UserRepository};
pub use repository::wishlist::WishlistRepository;
