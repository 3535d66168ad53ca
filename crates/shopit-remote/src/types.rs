//! # Server Mirror Records
//!
//! The `carts` and `wishlists` collections keep a per-user copy of the cart
//! and wishlist on the server. They are independent of the in-memory
//! reducers: nothing here reads or writes `shopit_core::Cart`.
//!
//! ```text
//! carts      { id?, userId, items: [{ productId, quantity }] }
//! wishlists  { id?, userId, items: [productId, ...] }
//! ```
//!
//! A record without `id` has never been saved; the client POSTs it instead
//! of PUTting it.

use serde::{Deserialize, Deserializer, Serialize};

use shopit_core::ProductId;

/// Record keys come back as strings or numbers depending on the server.
#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Str(String),
    Num(serde_json::Number),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::Str(s) => s,
            StringOrNumber::Num(n) => n.to_string(),
        }
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    StringOrNumber::deserialize(deserializer).map(String::from)
}

fn opt_string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(String::from))
}

// =============================================================================
// Cart Mirror
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCartItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCart {
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,

    #[serde(default)]
    pub items: Vec<RemoteCartItem>,
}

impl RemoteCart {
    /// An unsaved, empty cart for `user_id`.
    pub fn empty(user_id: impl Into<String>) -> Self {
        RemoteCart {
            id: None,
            user_id: user_id.into(),
            items: Vec::new(),
        }
    }

    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }

    pub fn item(&self, product_id: &ProductId) -> Option<&RemoteCartItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    /// Adds `quantity` to the existing item, or appends a new one.
    pub fn add_item(&mut self, product_id: &ProductId, quantity: u32) {
        match self.items.iter().position(|i| &i.product_id == product_id) {
            Some(index) => {
                let item = &mut self.items[index];
                item.quantity = item.quantity.saturating_add(quantity);
            }
            None => self.items.push(RemoteCartItem {
                product_id: product_id.clone(),
                quantity,
            }),
        }
    }

    pub fn remove_item(&mut self, product_id: &ProductId) {
        self.items.retain(|i| &i.product_id != product_id);
    }

    /// Sets the quantity of an existing item. Returns false when absent.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: u32) -> bool {
        match self.items.iter_mut().find(|i| &i.product_id == product_id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }
}

// =============================================================================
// Wishlist Mirror
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteWishlist {
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,

    #[serde(default)]
    pub items: Vec<ProductId>,
}

impl RemoteWishlist {
    pub fn empty(user_id: impl Into<String>) -> Self {
        RemoteWishlist {
            id: None,
            user_id: user_id.into(),
            items: Vec::new(),
        }
    }

    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.contains(product_id)
    }

    /// Appends the id unless present. Returns true when it was added.
    pub fn insert(&mut self, product_id: &ProductId) -> bool {
        if self.contains(product_id) {
            return false;
        }
        self.items.push(product_id.clone());
        true
    }

    pub fn remove(&mut self, product_id: &ProductId) {
        self.items.retain(|id| id != product_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_record_accepts_numeric_keys() {
        let json = r#"{"id": 3, "userId": 1712345678901, "items": [{"productId": 7, "quantity": 2}]}"#;
        let cart: RemoteCart = serde_json::from_str(json).unwrap();

        assert_eq!(cart.id.as_deref(), Some("3"));
        assert_eq!(cart.user_id, "1712345678901");
        assert_eq!(cart.item(&"7".into()).map(|i| i.quantity), Some(2));
    }

    #[test]
    fn test_unsaved_record_omits_id() {
        let value = serde_json::to_value(RemoteCart::empty("u1")).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["userId"], "u1");
    }

    #[test]
    fn test_add_item_increments_first_item() {
        let mut cart = RemoteCart::empty("u1");
        let id = ProductId::new("p1");

        cart.add_item(&id, 1);
        cart.add_item(&id, 2);
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 3);
    }

    #[test]
    fn test_set_quantity_absent_item() {
        let mut cart = RemoteCart::empty("u1");
        assert!(!cart.set_quantity(&"p1".into(), 4));
        assert!(cart.items.is_empty());
    }

    #[test]
    fn test_wishlist_insert_only_once() {
        let mut wishlist = RemoteWishlist::empty("u1");
        assert!(wishlist.insert(&"p1".into()));
        assert!(!wishlist.insert(&"p1".into()));
        wishlist.remove(&"p1".into());
        assert!(wishlist.items.is_empty());
    }
}
