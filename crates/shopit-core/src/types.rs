//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Category     │   │    Address      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  name, mobile   │       │
//! │  │  title, price   │   │  name           │   │  street, city   │       │
//! │  │  images         │   └─────────────────┘   │  zip, state     │       │
//! │  │  category       │                         └─────────────────┘       │
//! │  └─────────────────┘                                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │  AuthSession    │   │     Order       │       │
//! │  │  id, name       │   │  token          │   │  items, amount  │       │
//! │  │  email          │   │  user           │   │  address, date  │       │
//! │  └─────────────────┘   └─────────────────┘   │  paymentId      │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field names follow the camelCase JSON served by the catalog endpoints.

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cart::CartLine;
use crate::money::Money;
use crate::PLACEHOLDER_IMAGE;

// =============================================================================
// Identifiers
// =============================================================================

/// Generates a string identifier newtype that also accepts JSON integers.
///
/// The catalog server hands out ids as either `"p-12"` or `12` depending on
/// how the record was created, so both decode to the same string form.
macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an id from anything string-like.
            pub fn new(id: impl Into<String>) -> Self {
                $name(id.into())
            }

            /// Returns the id as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                $name::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                $name(id)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserializer.deserialize_any(RecordIdVisitor).map($name)
            }
        }
    };
}

struct RecordIdVisitor;

impl<'de> Visitor<'de> for RecordIdVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or integer id")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }
}

record_id!(
    /// Identifier of a catalog product.
    ProductId
);

record_id!(
    /// Identifier of a catalog category.
    CategoryId
);

// =============================================================================
// Product
// =============================================================================

/// A catalog product. Read-only: the storefront never writes products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,

    pub title: String,

    /// Selling price (non-negative).
    pub price: Money,

    /// Price before discount, shown struck through.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Money>,

    /// Free-form discount label, e.g. "20% off".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<String>,

    /// Image URLs, first one is the card image.
    #[serde(default)]
    pub images: Vec<String>,

    /// Single image URL some catalog records carry instead of `images`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default)]
    pub category: String,
}

impl Product {
    /// Creates a product with no images or discount information.
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        price: Money,
        category: impl Into<String>,
    ) -> Self {
        Product {
            id: id.into(),
            title: title.into(),
            price,
            original_price: None,
            discount: None,
            images: Vec::new(),
            image: None,
            category: category.into(),
        }
    }

    /// Returns the image to show on a product card.
    ///
    /// Order of preference: `image`, then the first of `images`, then the
    /// placeholder.
    pub fn primary_image(&self) -> &str {
        self.image
            .as_deref()
            .or_else(|| self.images.first().map(String::as_str))
            .unwrap_or(PLACEHOLDER_IMAGE)
    }
}

// =============================================================================
// Category
// =============================================================================

/// A catalog category used by the home page filter chips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Category {
            id: id.into(),
            name: name.into(),
        }
    }

    /// The synthetic "All" chip appended after the remote categories.
    pub fn all() -> Self {
        Category::new(crate::ALL_CATEGORIES_ID, crate::ALL_CATEGORIES)
    }
}

// =============================================================================
// Users & Sessions
// =============================================================================

/// Public view of a registered user (never carries the password).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// A signed-in session: a synthetic bearer token plus the user it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

impl AuthSession {
    /// Prefix of the demo-only bearer tokens.
    pub const TOKEN_PREFIX: &'static str = "mock-token-";

    /// Builds the session handed out after register/login.
    pub fn issue(user: User) -> Self {
        AuthSession {
            token: format!("{}{}", Self::TOKEN_PREFIX, user.id),
            user,
        }
    }
}

// =============================================================================
// Address
// =============================================================================

/// Delivery address captured on the cart page.
///
/// Free-form form state; completeness is checked only at checkout by
/// [`crate::validation::validate_address`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub state: String,
}

// =============================================================================
// Order
// =============================================================================

/// Order body posted to the `orders` endpoint after payment succeeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub items: Vec<CartLine>,
    /// Grand total including delivery, in major units on the wire.
    pub amount: Money,
    pub address: Address,
    pub payment_id: String,
    pub date: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_accepts_integers() {
        let id: ProductId = serde_json::from_str("42").unwrap();
        assert_eq!(id.as_str(), "42");

        let id: ProductId = serde_json::from_str("\"p-42\"").unwrap();
        assert_eq!(id, ProductId::new("p-42"));
    }

    #[test]
    fn test_product_deserialize_catalog_shape() {
        let json = r#"{
            "id": 7,
            "title": "Running Shoes",
            "price": 1999,
            "originalPrice": 2999,
            "discount": "33% off",
            "images": ["https://cdn.example/shoe.jpg"],
            "category": "Footwear",
            "rating": 4.5
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_str(), "7");
        assert_eq!(product.price, Money::from_major(1999));
        assert_eq!(product.original_price, Some(Money::from_major(2999)));
        assert_eq!(product.primary_image(), "https://cdn.example/shoe.jpg");
    }

    #[test]
    fn test_primary_image_fallbacks() {
        let mut product = Product::new("1", "Mug", Money::from_major(199), "kitchen");
        assert_eq!(product.primary_image(), PLACEHOLDER_IMAGE);

        product.images.push("b.jpg".to_string());
        assert_eq!(product.primary_image(), "b.jpg");

        product.image = Some("a.jpg".to_string());
        assert_eq!(product.primary_image(), "a.jpg");
    }

    #[test]
    fn test_session_token_format() {
        let session = AuthSession::issue(User {
            id: "u-1".to_string(),
            name: "Al".to_string(),
            email: "a@x.com".to_string(),
        });
        assert_eq!(session.token, "mock-token-u-1");
    }

    #[test]
    fn test_order_serializes_camel_case() {
        let order = Order {
            items: Vec::new(),
            amount: Money::from_major(548),
            address: Address::default(),
            payment_id: "pay_123".to_string(),
            date: Utc::now(),
        };
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["paymentId"], "pay_123");
        assert_eq!(value["amount"], 548);
    }
}
