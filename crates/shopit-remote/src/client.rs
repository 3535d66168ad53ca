//! # Storefront HTTP Client
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Catalog (read-only)                                                   │
//! │    GET  /products                     products()                       │
//! │    GET  /products/{id}                product(id)                      │
//! │    GET  /products?category=           products_by_category(c)          │
//! │    GET  /categories                   categories()                     │
//! │    GET  /categories/{id}              category(id)                     │
//! │                                                                         │
//! │  Server mirror (read-modify-write)                                     │
//! │    GET  /carts?userId=                get_cart(user)                   │
//! │    POST /carts  | PUT /carts/{id}     add_to_cart / remove / update    │
//! │    GET  /wishlists?userId=            get_wishlist(user)               │
//! │    POST /wishlists | PUT /wishlists/{id}                               │
//! │                                                                         │
//! │  Orders                                                                │
//! │    POST /orders                       submit_order(order)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Failures are reported once. Nothing in this client retries.

use reqwest::{Method, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use crate::error::{RemoteError, RemoteResult};
use crate::types::{RemoteCart, RemoteWishlist};
use shopit_core::{Category, CategoryId, Order, Product, ProductId};

/// Default endpoint of the development catalog server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3003";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// =============================================================================
// Builder
// =============================================================================

#[derive(Debug, Clone)]
pub struct StorefrontClientBuilder {
    base_url: String,
    timeout: Duration,
}

impl Default for StorefrontClientBuilder {
    fn default() -> Self {
        StorefrontClientBuilder {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl StorefrontClientBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> RemoteResult<StorefrontClient> {
        let base_url = Url::parse(&self.base_url)
            .map_err(|e| RemoteError::InvalidBaseUrl(format!("{}: {}", self.base_url, e)))?;

        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(RemoteError::InvalidBaseUrl(self.base_url));
        }

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("shopit/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RemoteError::ClientBuild(e.to_string()))?;

        Ok(StorefrontClient { http, base_url })
    }
}

// =============================================================================
// Client
// =============================================================================

/// Typed client for the storefront REST endpoints. Cheap to clone.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    http: reqwest::Client,
    base_url: Url,
}

impl StorefrontClient {
    pub fn builder() -> StorefrontClientBuilder {
        StorefrontClientBuilder::default()
    }

    /// Client for `base_url` with the default timeout.
    pub fn new(base_url: impl Into<String>) -> RemoteResult<Self> {
        Self::builder().base_url(base_url).build()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // -------------------------------------------------------------------------
    // Catalog
    // -------------------------------------------------------------------------

    pub async fn products(&self) -> RemoteResult<Vec<Product>> {
        debug!("Fetching products");
        let products: Vec<Product> = self.get(&["products"], &[]).await?;
        debug!(count = products.len(), "Fetched products");
        Ok(products)
    }

    pub async fn product(&self, id: &ProductId) -> RemoteResult<Product> {
        debug!(product_id = %id, "Fetching product");
        self.get(&["products", id.as_str()], &[]).await
    }

    /// Server-side category filter (exact match, as the server implements it).
    pub async fn products_by_category(&self, category: &str) -> RemoteResult<Vec<Product>> {
        debug!(category = %category, "Fetching products by category");
        self.get(&["products"], &[("category", category)]).await
    }

    pub async fn categories(&self) -> RemoteResult<Vec<Category>> {
        debug!("Fetching categories");
        self.get(&["categories"], &[]).await
    }

    pub async fn category(&self, id: &CategoryId) -> RemoteResult<Category> {
        debug!(category_id = %id, "Fetching category");
        self.get(&["categories", id.as_str()], &[]).await
    }

    // -------------------------------------------------------------------------
    // Cart mirror
    // -------------------------------------------------------------------------

    /// The user's first cart record, or an unsaved empty one.
    pub async fn get_cart(&self, user_id: &str) -> RemoteResult<RemoteCart> {
        debug!(user_id = %user_id, "Fetching server cart");
        let carts: Vec<RemoteCart> = self.get(&["carts"], &[("userId", user_id)]).await?;
        Ok(carts
            .into_iter()
            .next()
            .unwrap_or_else(|| RemoteCart::empty(user_id)))
    }

    /// Adds `quantity` of a product to the user's server cart.
    pub async fn add_to_cart(
        &self,
        user_id: &str,
        product_id: &ProductId,
        quantity: u32,
    ) -> RemoteResult<RemoteCart> {
        debug!(user_id = %user_id, product_id = %product_id, quantity, "Adding to server cart");

        let mut cart = self.get_cart(user_id).await?;
        cart.add_item(product_id, quantity);
        self.save_cart(&cart).await
    }

    pub async fn remove_from_cart(
        &self,
        cart_id: &str,
        product_id: &ProductId,
    ) -> RemoteResult<RemoteCart> {
        debug!(cart_id = %cart_id, product_id = %product_id, "Removing from server cart");

        let mut cart: RemoteCart = self.get(&["carts", cart_id], &[]).await?;
        cart.remove_item(product_id);
        self.put(&["carts", cart_id], &cart).await
    }

    /// Sets an item's quantity. The record is returned unchanged, without a
    /// write, when the item is not in the cart.
    pub async fn update_cart_item_quantity(
        &self,
        cart_id: &str,
        product_id: &ProductId,
        quantity: u32,
    ) -> RemoteResult<RemoteCart> {
        debug!(cart_id = %cart_id, product_id = %product_id, quantity, "Updating server cart quantity");

        let mut cart: RemoteCart = self.get(&["carts", cart_id], &[]).await?;
        if !cart.set_quantity(product_id, quantity) {
            return Ok(cart);
        }
        self.put(&["carts", cart_id], &cart).await
    }

    async fn save_cart(&self, cart: &RemoteCart) -> RemoteResult<RemoteCart> {
        match &cart.id {
            Some(id) => self.put(&["carts", id.as_str()], cart).await,
            None => self.post(&["carts"], cart).await,
        }
    }

    // -------------------------------------------------------------------------
    // Wishlist mirror
    // -------------------------------------------------------------------------

    pub async fn get_wishlist(&self, user_id: &str) -> RemoteResult<RemoteWishlist> {
        debug!(user_id = %user_id, "Fetching server wishlist");
        let lists: Vec<RemoteWishlist> =
            self.get(&["wishlists"], &[("userId", user_id)]).await?;
        Ok(lists
            .into_iter()
            .next()
            .unwrap_or_else(|| RemoteWishlist::empty(user_id)))
    }

    /// Adds a product id; writes only when the id is new.
    pub async fn add_to_wishlist(
        &self,
        user_id: &str,
        product_id: &ProductId,
    ) -> RemoteResult<RemoteWishlist> {
        debug!(user_id = %user_id, product_id = %product_id, "Adding to server wishlist");

        let mut wishlist = self.get_wishlist(user_id).await?;
        if !wishlist.insert(product_id) {
            return Ok(wishlist);
        }

        match &wishlist.id {
            Some(id) => self.put(&["wishlists", id.as_str()], &wishlist).await,
            None => self.post(&["wishlists"], &wishlist).await,
        }
    }

    pub async fn remove_from_wishlist(
        &self,
        wishlist_id: &str,
        product_id: &ProductId,
    ) -> RemoteResult<RemoteWishlist> {
        debug!(wishlist_id = %wishlist_id, product_id = %product_id, "Removing from server wishlist");

        let mut wishlist: RemoteWishlist = self.get(&["wishlists", wishlist_id], &[]).await?;
        wishlist.remove(product_id);
        self.put(&["wishlists", wishlist_id], &wishlist).await
    }

    // -------------------------------------------------------------------------
    // Orders
    // -------------------------------------------------------------------------

    /// Posts a paid order. The created record in the response is ignored.
    pub async fn submit_order(&self, order: &Order) -> RemoteResult<()> {
        debug!(
            payment_id = %order.payment_id,
            items = order.items.len(),
            amount = %order.amount,
            "Submitting order"
        );

        let url = self.endpoint(&["orders"])?;
        let response = self.http.post(url).json(order).send().await?;
        check_status(&response)?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Plumbing
    // -------------------------------------------------------------------------

    /// Builds `{base}/{segments...}` with each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> RemoteResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RemoteError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> RemoteResult<T> {
        let url = self.endpoint(segments)?;
        let mut request = self.http.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }
        read_json(request.send().await?).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> RemoteResult<T> {
        self.send_json(Method::POST, segments, body).await
    }

    async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> RemoteResult<T> {
        self.send_json(Method::PUT, segments, body).await
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> RemoteResult<T> {
        let url = self.endpoint(segments)?;
        let body = serde_json::to_vec(body)?;
        let response = self
            .http
            .request(method, url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        read_json(response).await
    }
}

fn check_status(response: &Response) -> RemoteResult<()> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(RemoteError::NotFound(response.url().path().to_string()));
    }
    if !status.is_success() {
        return Err(RemoteError::Status {
            status: status.as_u16(),
            url: response.url().to_string(),
        });
    }
    Ok(())
}

async fn read_json<T: DeserializeOwned>(response: Response) -> RemoteResult<T> {
    check_status(&response)?;
    let url = response.url().to_string();
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|source| RemoteError::Decode { url, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_rejects_bad_base_urls() {
        assert!(matches!(
            StorefrontClient::new("not a url"),
            Err(RemoteError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            StorefrontClient::new("ftp://example.com"),
            Err(RemoteError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_endpoint_joins_and_encodes_segments() {
        let client = StorefrontClient::new("http://localhost:3003/api/").unwrap();
        let url = client.endpoint(&["products", "a b"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3003/api/products/a%20b");

        let root = StorefrontClient::new("http://localhost:3003").unwrap();
        assert_eq!(
            root.endpoint(&["categories"]).unwrap().as_str(),
            "http://localhost:3003/categories"
        );
    }
}
