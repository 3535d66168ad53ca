//! # Wishlist State
//!
//! The wishlist survives restarts. It is loaded once when the state is
//! built and written back after every dispatch.
//!
//! ```text
//! hydrate ──► WishlistRepository::load ──► Store<Wishlist>
//!
//! dispatch(action)
//!   ├─ flush lock (orders concurrent writers)
//!   ├─ reducer under the store mutex ──► snapshot
//!   └─ WishlistRepository::replace_all(snapshot)   failure ─► warn!, kept in memory
//! ```
//!
//! A failed write never fails the dispatch. The in-memory wishlist stays
//! authoritative until the next successful flush.

use shopit_core::{Product, ProductId, Wishlist, WishlistAction};
use shopit_db::Database;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info, warn};

use super::store::Store;

/// Whether a toggle ended with the product in or out of the wishlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleOutcome {
    Added,
    Removed,
}

#[derive(Debug)]
pub struct WishlistState {
    store: Store<Wishlist>,
    db: Database,
    flush_lock: AsyncMutex<()>,
}

impl WishlistState {
    /// Builds the state from the persisted wishlist.
    ///
    /// An unreadable store starts an empty wishlist.
    pub async fn hydrate(db: Database) -> Self {
        let wishlist = match db.wishlist().load().await {
            Ok(entries) => Wishlist::from_entries(entries),
            Err(e) => {
                warn!("Failed to load persisted wishlist: {}. Starting empty.", e);
                Wishlist::new()
            }
        };

        info!(count = wishlist.len(), "Wishlist hydrated");

        WishlistState {
            store: Store::new(wishlist),
            db,
            flush_lock: AsyncMutex::new(()),
        }
    }

    /// Applies `action`, persists the result and returns it.
    pub async fn dispatch(&self, action: WishlistAction) -> Wishlist {
        let _flush = self.flush_lock.lock().await;
        self.apply_and_flush(&action).await
    }

    /// Adds `product` when absent, removes it when present.
    pub async fn toggle(&self, product: Product) -> (ToggleOutcome, Wishlist) {
        let _flush = self.flush_lock.lock().await;

        let (outcome, action) = if self.contains(&product.id) {
            (
                ToggleOutcome::Removed,
                WishlistAction::RemoveFromWishlist { id: product.id },
            )
        } else {
            (ToggleOutcome::Added, WishlistAction::AddToWishlist { product })
        };

        (outcome, self.apply_and_flush(&action).await)
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.store.with(|w| w.contains(id))
    }

    pub fn snapshot(&self) -> Wishlist {
        self.store.snapshot()
    }

    // Caller holds `flush_lock`.
    async fn apply_and_flush(&self, action: &WishlistAction) -> Wishlist {
        debug!(?action, "Wishlist dispatch");

        let before = self.store.snapshot();
        let after = self.store.dispatch(action);

        if after != before {
            self.flush(&after).await;
        }

        after
    }

    async fn flush(&self, wishlist: &Wishlist) {
        if let Err(e) = self.db.wishlist().replace_all(wishlist.entries()).await {
            warn!(count = wishlist.len(), "Failed to persist wishlist: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopit_core::Money;
    use shopit_db::DbConfig;

    fn product(id: &str) -> Product {
        Product::new(id, format!("Product {}", id), Money::from_major(10), "misc")
    }

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_dispatch_flushes_to_storage() {
        let db = test_db().await;
        let state = WishlistState::hydrate(db.clone()).await;

        state
            .dispatch(WishlistAction::AddToWishlist { product: product("1") })
            .await;
        state
            .dispatch(WishlistAction::AddToWishlist { product: product("2") })
            .await;

        let stored = db.wishlist().load().await.unwrap();
        let ids: Vec<&str> = stored.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_hydrate_restores_previous_entries() {
        let db = test_db().await;
        db.wishlist()
            .replace_all(&[product("7"), product("3")])
            .await
            .unwrap();

        let state = WishlistState::hydrate(db).await;
        assert_eq!(
            state.snapshot().product_ids(),
            vec![ProductId::new("7"), ProductId::new("3")]
        );
    }

    #[tokio::test]
    async fn test_toggle_reports_outcome() {
        let state = WishlistState::hydrate(test_db().await).await;

        let (outcome, wishlist) = state.toggle(product("1")).await;
        assert_eq!(outcome, ToggleOutcome::Added);
        assert_eq!(wishlist.len(), 1);

        let (outcome, wishlist) = state.toggle(product("1")).await;
        assert_eq!(outcome, ToggleOutcome::Removed);
        assert!(wishlist.is_empty());
    }

    #[tokio::test]
    async fn test_failed_flush_keeps_memory_state() {
        let db = test_db().await;
        let state = WishlistState::hydrate(db.clone()).await;
        db.close().await;

        let wishlist = state
            .dispatch(WishlistAction::AddToWishlist { product: product("1") })
            .await;

        assert_eq!(wishlist.len(), 1);
        assert!(state.contains(&"1".into()));
    }
}
