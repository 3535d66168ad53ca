//! # Wishlist Repository
//!
//! Snapshot storage for the wishlist. The whole list is rewritten on every
//! flush, inside one transaction, so a reader never sees half a list.
//!
//! ```text
//! WishlistState::dispatch ──► replace_all(entries)
//!                               BEGIN
//!                               DELETE FROM wishlist_entries
//!                               INSERT (position 0..n, product JSON) × n
//!                               COMMIT
//!
//! WishlistState::hydrate  ──► load() ──► ORDER BY position
//! ```

use chrono::Utc;
use sqlx::{FromRow, SqlitePool};
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use shopit_core::Product;

#[derive(Debug, FromRow)]
struct EntryRow {
    product_id: String,
    payload: String,
}

#[derive(Debug, Clone)]
pub struct WishlistRepository {
    pool: SqlitePool,
}

impl WishlistRepository {
    pub fn new(pool: SqlitePool) -> Self {
        WishlistRepository { pool }
    }

    /// Loads the saved products in wishlist order.
    ///
    /// Rows whose JSON no longer decodes are skipped with a warning so one
    /// bad row cannot empty the whole wishlist.
    pub async fn load(&self) -> DbResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, EntryRow>(
            r#"
            SELECT product_id, payload
            FROM wishlist_entries
            ORDER BY position
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let products: Vec<Product> = rows
            .into_iter()
            .filter_map(|row| match serde_json::from_str::<Product>(&row.payload) {
                Ok(product) => Some(product),
                Err(e) => {
                    warn!(product_id = %row.product_id, error = %e, "Skipping corrupt wishlist entry");
                    None
                }
            })
            .collect();

        debug!(count = products.len(), "Loaded wishlist");
        Ok(products)
    }

    /// Replaces the stored wishlist with `products`.
    pub async fn replace_all(&self, products: &[Product]) -> DbResult<()> {
        debug!(count = products.len(), "Persisting wishlist");

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM wishlist_entries")
            .execute(&mut *tx)
            .await?;

        let now = Utc::now();
        for (position, product) in products.iter().enumerate() {
            let payload = serde_json::to_string(product).map_err(|source| DbError::Payload {
                entity: "wishlist entry",
                source,
            })?;

            sqlx::query(
                r#"
                INSERT INTO wishlist_entries (position, product_id, payload, added_at)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )
            .bind(position as i64)
            .bind(product.id.as_str())
            .bind(payload)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM wishlist_entries")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
