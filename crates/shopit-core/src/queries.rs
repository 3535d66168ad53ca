//! # Derived Queries
//!
//! Pure read-only computations over cart and catalog state. Nothing here
//! fails: absent input is treated as empty.
//!
//! ```text
//! Cart ──► total_amount ──► price_details ──► PriceDetails { subtotal, delivery, total }
//!   │
//!   └────► find_in_cart ──► cart_button  ──► Add | GoToCart
//!
//! [Product] ──► filter_by_category(category | "All")
//! [Category] ─► categories_with_all
//! ```

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::money::Money;
use crate::types::{Category, Product, ProductId};
use crate::ALL_CATEGORIES;

// =============================================================================
// Totals
// =============================================================================

/// Sum of `price × quantity` over every line. An absent cart totals zero.
pub fn total_amount(cart: Option<&Cart>) -> Money {
    cart.map(|cart| cart.iter().map(|line| line.line_total()).sum())
        .unwrap_or_else(Money::zero)
}

/// The price panel shown beside the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceDetails {
    /// Number of distinct lines.
    pub item_count: usize,
    pub subtotal: Money,
    pub delivery_charge: Money,
    pub total: Money,
}

impl PriceDetails {
    /// Grand total in minor units, the amount handed to the payment widget.
    pub fn payable_minor(&self) -> i64 {
        self.total.minor()
    }
}

/// Computes the price panel with a flat delivery charge.
pub fn price_details(cart: &Cart, delivery_charge: Money) -> PriceDetails {
    let subtotal = total_amount(Some(cart));
    PriceDetails {
        item_count: cart.len(),
        subtotal,
        delivery_charge,
        total: subtotal + delivery_charge,
    }
}

// =============================================================================
// Catalog Filtering
// =============================================================================

/// Category names compare equal under Unicode lowercasing.
pub fn same_category(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// True for the "All" sentinel (any case) and for a blank selection.
pub fn is_all_categories(category: &str) -> bool {
    let category = category.trim();
    category.is_empty() || same_category(category, ALL_CATEGORIES)
}

/// Products whose category equals `category`, ignoring case.
///
/// `"All"` (any case) or a blank category returns every product in its
/// original order. An absent product list yields an empty result.
pub fn filter_by_category(products: Option<&[Product]>, category: &str) -> Vec<Product> {
    let Some(products) = products else {
        return Vec::new();
    };

    if is_all_categories(category) {
        return products.to_vec();
    }

    let wanted = category.trim().to_lowercase();
    products
        .iter()
        .filter(|p| p.category.to_lowercase() == wanted)
        .cloned()
        .collect()
}

/// Remote categories followed by the synthetic "All" entry.
pub fn categories_with_all(categories: Vec<Category>) -> Vec<Category> {
    let mut categories = categories;
    categories.push(Category::all());
    categories
}

// =============================================================================
// Cart Affordance
// =============================================================================

/// Membership test used by product cards.
pub fn find_in_cart(cart: &Cart, id: &ProductId) -> bool {
    cart.contains(id)
}

/// What the product card button should offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartButton {
    Add,
    GoToCart,
}

impl CartButton {
    pub fn label(&self) -> &'static str {
        match self {
            CartButton::Add => "Add to Cart",
            CartButton::GoToCart => "Go to Cart",
        }
    }
}

pub fn cart_button(cart: &Cart, id: &ProductId) -> CartButton {
    if find_in_cart(cart, id) {
        CartButton::GoToCart
    } else {
        CartButton::Add
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
