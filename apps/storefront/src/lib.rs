//! # Shop It Storefront
//!
//! The orchestration layer between the presentation layer and the domain
//! crates.
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Shop It Storefront                             │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                     Presentation layer                           │  │
//! │  │  • Home / category chips      • Cart + price details             │  │
//! │  │  • Wishlist                   • Login / register                 │  │
//! │  └──────────────────────────────┬───────────────────────────────────┘  │
//! │                                 │ commands::*                          │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    Rust storefront (this crate)                  │  │
//! │  │                                                                  │  │
//! │  │  lib.rs ─────► run(), Storefront::initialize                    │  │
//! │  │  commands/ ──► catalog, cart, wishlist, auth, checkout          │  │
//! │  │  state/ ─────► CartState, WishlistState, SessionState, config   │  │
//! │  │  services/ ──► MockAuthService, PaymentGateway                  │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │            │                        │                                   │
//! │            ▼                        ▼                                   │
//! │  ┌───────────────────────┐  ┌───────────────────────────────────────┐  │
//! │  │  SQLite (shopit.db)   │  │  REST API (products, orders, ...)     │  │
//! │  │  users, session,      │  │  http://localhost:3003                │  │
//! │  │  wishlist             │  │                                       │  │
//! │  └───────────────────────┘  └───────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod services;
pub mod state;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use error::AppResult;
use services::MockAuthService;
use shopit_db::{Database, DbConfig};
use shopit_remote::StorefrontClient;
use state::{CartState, SessionState, StorefrontConfig, WishlistState};

/// Every long-lived object the commands need, built once at startup.
#[derive(Debug)]
pub struct Storefront {
    pub config: StorefrontConfig,
    pub db: Database,
    pub client: StorefrontClient,
    pub auth: MockAuthService,
    pub cart: CartState,
    pub wishlist: WishlistState,
    pub session: SessionState,
}

impl Storefront {
    /// Opens storage, builds the HTTP client and hydrates the state.
    ///
    /// ## Startup Sequence
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────────┐
    /// │  1. Resolve Database Path ────────────────────────────────────────────► │
    /// │     • [storage] database_path or SHOPIT_DB_PATH                         │
    /// │     • else the platform data dir + shopit.db                            │
    /// │                                                                         │
    /// │  2. Connect to Database ──────────────────────────────────────────────► │
    /// │     • SQLite with WAL mode                                              │
    /// │     • Run pending migrations                                            │
    /// │                                                                         │
    /// │  3. Build HTTP Client ────────────────────────────────────────────────► │
    /// │     • [api] base_url + timeout                                          │
    /// │                                                                         │
    /// │  4. Hydrate State ────────────────────────────────────────────────────► │
    /// │     • CartState: empty                                                  │
    /// │     • WishlistState: persisted wishlist                                 │
    /// │     • SessionState: persisted session                                   │
    /// └─────────────────────────────────────────────────────────────────────────┘
    /// ```
    pub async fn initialize(config: StorefrontConfig) -> AppResult<Self> {
        let db_path = config.database_path()?;
        info!(?db_path, "Database path determined");

        let db = Database::new(DbConfig::new(db_path)).await?;
        info!("Database connected and migrations applied");

        let client = StorefrontClient::builder()
            .base_url(config.api.base_url.clone())
            .timeout(config.request_timeout())
            .build()?;

        let wishlist = WishlistState::hydrate(db.clone()).await;
        let session = SessionState::hydrate(db.clone()).await;

        info!("State initialized");

        Ok(Storefront {
            auth: MockAuthService::new(db.clone()),
            cart: CartState::new(),
            wishlist,
            session,
            client,
            db,
            config,
        })
    }

    /// Closes the database pool.
    pub async fn shutdown(&self) {
        self.db.close().await;
    }
}

/// Runs the storefront once: load everything and report what was found.
pub async fn run() -> AppResult<()> {
    init_tracing();

    info!("Starting Shop It storefront");

    let config = StorefrontConfig::load(None)?;
    let app = Storefront::initialize(config).await?;

    match commands::catalog::load_catalog(&app.client).await {
        Ok(catalog) => info!(
            products = catalog.products.len(),
            categories = catalog.categories.len(),
            "Catalog available"
        ),
        Err(e) => warn!("Catalog unavailable: {}", e),
    }

    let badge = commands::cart::cart_badge(&app.cart);
    let signed_in_as = app.session.user().map(|u| u.email);
    info!(
        signed_in_as = signed_in_as.as_deref().unwrap_or("-"),
        wishlist = app.wishlist.snapshot().len(),
        cart_lines = badge.line_count,
        delivery_charge = %app.config.format_currency(app.config.store.delivery_charge),
        "Storefront ready"
    );

    app.shutdown().await;
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shopit=trace` - Show trace for shopit crates only
/// - Default: `info,shopit=debug,sqlx=warn`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shopit=debug,sqlx=warn"));

    // Already installed when embedded in a host that set its own subscriber
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
