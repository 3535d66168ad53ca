//! # Cart State Machine
//!
//! The cart is an ordered list of line items driven by tagged actions.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Action                 Effect                                         │
//! │  ──────                 ──────                                         │
//! │  ADD_TO_CART(p)         line for p.id exists? qty + 1 : append (qty 1) │
//! │  REMOVE_FROM_CART(id)   drop the line (no-op when absent)              │
//! │  INCREASE_QUANTITY(id)  qty + 1 (no-op when absent)                    │
//! │  DECREASE_QUANTITY(id)  qty - 1, line removed when it reaches 0        │
//! │  CLEAR_CART             empty cart                                     │
//! │  anything else          state unchanged                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per product id
//! - Every line has quantity >= 1
//! - Lines keep the order in which products were first added

use serde::de;
use serde::{Deserialize, Deserializer, Serialize};

use crate::money::Money;
use crate::reducer::{ActionEnvelope, ActionPayload, Reducer};
use crate::types::{Product, ProductId};

// =============================================================================
// Cart Line
// =============================================================================

/// A product plus the quantity held in the cart.
///
/// ## Quantity Normalization
/// A missing, null or zero quantity decodes as 1. This is the only place the
/// default lives; totals and reducers rely on `quantity() >= 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,

    #[serde(
        default = "default_quantity",
        deserialize_with = "deserialize_quantity"
    )]
    quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

fn deserialize_quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let raw = Option::<u32>::deserialize(deserializer)?;
    Ok(normalize_quantity(raw))
}

/// Missing or zero quantities count as one.
#[inline]
fn normalize_quantity(raw: Option<u32>) -> u32 {
    raw.unwrap_or(1).max(1)
}

impl CartLine {
    /// Creates a line for a freshly added product (quantity 1).
    pub fn new(product: Product) -> Self {
        CartLine {
            product,
            quantity: 1,
        }
    }

    /// Creates a line with an explicit quantity, normalized to at least 1.
    pub fn with_quantity(product: Product, quantity: u32) -> Self {
        CartLine {
            product,
            quantity: normalize_quantity(Some(quantity)),
        }
    }

    #[inline]
    pub fn id(&self) -> &ProductId {
        &self.product.id
    }

    #[inline]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }

    fn incremented(&self) -> CartLine {
        CartLine {
            product: self.product.clone(),
            quantity: self.quantity.saturating_add(1),
        }
    }

    /// One less, or `None` when the line would drop to zero.
    fn decremented(&self) -> Option<CartLine> {
        match self.quantity {
            0 | 1 => None,
            qty => Some(CartLine {
                product: self.product.clone(),
                quantity: qty - 1,
            }),
        }
    }
}

// =============================================================================
// Cart Action
// =============================================================================

/// The closed set of cart actions.
///
/// ## Wire Shape
/// Actions travel as `{"type": "ADD_TO_CART", "payload": {"product": {...}}}`.
/// Any tag not listed here decodes to [`CartAction::Unrecognized`], payload
/// or not, which the reducer treats as an explicit no-op.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartAction {
    AddToCart { product: Product },
    RemoveFromCart { id: ProductId },
    IncreaseQuantity { id: ProductId },
    DecreaseQuantity { id: ProductId },
    ClearCart,
    Unrecognized,
}

impl CartAction {
    fn decode(tag: &str, mut payload: ActionPayload) -> serde_json::Result<Self> {
        Ok(match tag {
            "ADD_TO_CART" => CartAction::AddToCart {
                product: payload.field("product")?,
            },
            "REMOVE_FROM_CART" => CartAction::RemoveFromCart {
                id: payload.field("id")?,
            },
            "INCREASE_QUANTITY" => CartAction::IncreaseQuantity {
                id: payload.field("id")?,
            },
            "DECREASE_QUANTITY" => CartAction::DecreaseQuantity {
                id: payload.field("id")?,
            },
            "CLEAR_CART" => CartAction::ClearCart,
            _ => CartAction::Unrecognized,
        })
    }
}

impl<'de> Deserialize<'de> for CartAction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let ActionEnvelope { tag, payload } = ActionEnvelope::deserialize(deserializer)?;
        CartAction::decode(&tag, payload).map_err(de::Error::custom)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart: session-scoped, never persisted locally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Builds a cart from externally sourced lines.
    ///
    /// Repeated product ids are merged into the first occurrence with their
    /// quantities summed, so the uniqueness invariant holds for any input.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut merged: Vec<CartLine> = Vec::new();
        for line in lines {
            match merged.iter_mut().find(|l| l.id() == line.id()) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => merged.push(line),
            }
        }
        Cart { lines: merged }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CartLine> {
        self.lines.iter()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id() == id)
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Sum of quantities across lines.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    fn with_added(&self, product: &Product) -> Cart {
        if self.contains(&product.id) {
            return self.with_line_mapped(&product.id, |line| Some(line.incremented()));
        }

        let mut lines = self.lines.clone();
        lines.push(CartLine::new(product.clone()));
        Cart { lines }
    }

    /// Rebuilds the cart, passing the line with `id` through `f`.
    ///
    /// `f` returning `None` drops the line. Other lines are kept as-is.
    fn with_line_mapped<F>(&self, id: &ProductId, f: F) -> Cart
    where
        F: Fn(&CartLine) -> Option<CartLine>,
    {
        let lines = self
            .lines
            .iter()
            .filter_map(|line| {
                if line.id() == id {
                    f(line)
                } else {
                    Some(line.clone())
                }
            })
            .collect();
        Cart { lines }
    }
}

impl Reducer for Cart {
    type Action = CartAction;

    fn apply(&self, action: &CartAction) -> Cart {
        match action {
            CartAction::AddToCart { product } => self.with_added(product),
            CartAction::RemoveFromCart { id } => self.with_line_mapped(id, |_| None),
            CartAction::IncreaseQuantity { id } => {
                self.with_line_mapped(id, |line| Some(line.incremented()))
            }
            CartAction::DecreaseQuantity { id } => {
                self.with_line_mapped(id, CartLine::decremented)
            }
            CartAction::ClearCart => Cart::new(),
            CartAction::Unrecognized => self.clone(),
        }
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartLine;
    type IntoIter = std::slice::Iter<'a, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart summary for badges and the price panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: u64,
    pub total_amount: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.len(),
            total_quantity: cart.total_quantity(),
            total_amount: crate::queries::total_amount(Some(cart)),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
