//! # Catalog Commands
//!
//! Product and category reads for the home page and product pages.
//!
//! ## Home Page Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load_catalog()                                                         │
//! │       │                                                                 │
//! │       ├──► GET products ────────┐                                       │
//! │       └──► GET categories ──────┤  (concurrently)                       │
//! │                                 ▼                                       │
//! │  Catalog { products, categories + "All", selected: "All" }              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  chip click ──► filter_products(catalog.products, "electronics")       │
//! │                 (client side, case-insensitive)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use shopit_core::queries::{
    cart_button, categories_with_all, filter_by_category, is_all_categories,
};
use shopit_core::{CartButton, Category, Product, ProductId, ALL_CATEGORIES};
use shopit_remote::StorefrontClient;
use tracing::{debug, info};

use crate::error::AppResult;
use crate::state::{CartState, WishlistState};

/// Everything the home page renders on first load.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub products: Vec<Product>,
    /// Remote categories followed by the synthetic "All" entry.
    pub categories: Vec<Category>,
    pub selected_category: String,
}

impl Catalog {
    /// Products visible under `category`.
    pub fn visible(&self, category: &str) -> Vec<Product> {
        filter_by_category(Some(self.products.as_slice()), category)
    }
}

/// A product tile with its affordances resolved against current state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    pub product: Product,
    pub image: String,
    pub cart_button: CartButton,
    pub cart_button_label: &'static str,
    pub in_wishlist: bool,
}

/// Fetches products and categories for the home page.
pub async fn load_catalog(client: &StorefrontClient) -> AppResult<Catalog> {
    debug!("load_catalog command");

    let (products, categories) = tokio::join!(client.products(), client.categories());
    let products = products?;
    let categories = categories_with_all(categories?);

    info!(
        products = products.len(),
        categories = categories.len(),
        "Catalog loaded"
    );

    Ok(Catalog {
        products,
        categories,
        selected_category: ALL_CATEGORIES.to_string(),
    })
}

pub async fn list_products(client: &StorefrontClient) -> AppResult<Vec<Product>> {
    debug!("list_products command");
    Ok(client.products().await?)
}

pub async fn get_product(client: &StorefrontClient, id: &ProductId) -> AppResult<Product> {
    debug!(id = %id, "get_product command");
    Ok(client.product(id).await?)
}

/// Categories for the filter chips, with "All" appended.
pub async fn list_categories(client: &StorefrontClient) -> AppResult<Vec<Category>> {
    debug!("list_categories command");
    Ok(categories_with_all(client.categories().await?))
}

/// Server-side category filter. "All" fetches the whole catalog.
pub async fn products_by_category(
    client: &StorefrontClient,
    category: &str,
) -> AppResult<Vec<Product>> {
    debug!(category = %category, "products_by_category command");

    if is_all_categories(category) {
        return Ok(client.products().await?);
    }
    Ok(client.products_by_category(category).await?)
}

/// Client-side category filter over an already fetched list.
pub fn filter_products(products: &[Product], category: &str) -> Vec<Product> {
    filter_by_category(Some(products), category)
}

pub fn product_card(cart: &CartState, wishlist: &WishlistState, product: Product) -> ProductCard {
    let button = cart.with_cart(|c| cart_button(c, &product.id));

    ProductCard {
        image: product.primary_image().to_string(),
        cart_button: button,
        cart_button_label: button.label(),
        in_wishlist: wishlist.contains(&product.id),
        product,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopit_core::{CartAction, Money};
    use shopit_db::{Database, DbConfig};

    fn product(id: &str, category: &str) -> Product {
        Product::new(id, format!("Product {}", id), Money::from_major(10), category)
    }

    #[test]
    fn test_catalog_visible_filters_by_category() {
        let catalog = Catalog {
            products: vec![product("1", "electronics"), product("2", "clothing")],
            categories: vec![Category::all()],
            selected_category: ALL_CATEGORIES.to_string(),
        };

        assert_eq!(catalog.visible("All").len(), 2);
        let visible = catalog.visible("ELECTRONICS");
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id.as_str(), "1");
    }

    #[tokio::test]
    async fn test_product_card_follows_cart_and_wishlist() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let cart = CartState::new();
        let wishlist = WishlistState::hydrate(db).await;
        let p1 = product("1", "misc");

        let card = product_card(&cart, &wishlist, p1.clone());
        assert_eq!(card.cart_button, CartButton::Add);
        assert_eq!(card.cart_button_label, "Add to Cart");
        assert_eq!(card.image, shopit_core::PLACEHOLDER_IMAGE);
        assert!(!card.in_wishlist);

        cart.dispatch(CartAction::AddToCart { product: p1.clone() });
        wishlist.toggle(p1.clone()).await;

        let card = product_card(&cart, &wishlist, p1);
        assert_eq!(card.cart_button, CartButton::GoToCart);
        assert_eq!(card.cart_button_label, "Go to Cart");
        assert!(card.in_wishlist);
    }
}
