//! # Shop It Storefront Entry Point
//!
//! Loads configuration, opens local storage, hydrates state and checks the
//! catalog endpoint. The setup lives in lib.rs so tests can drive it.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load `storefront.toml` and `SHOPIT_*` overrides
//! 3. Connect to the database & run migrations
//! 4. Hydrate state (wishlist, session)
//! 5. Fetch the catalog and log a summary

#[tokio::main]
async fn main() {
    if let Err(e) = shopit_storefront::run().await {
        tracing::error!("Storefront failed to start: {}", e);
        std::process::exit(1);
    }
}
