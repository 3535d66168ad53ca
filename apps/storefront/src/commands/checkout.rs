//! # Checkout Command
//!
//! Hands the cart total to the payment widget and, once paid, submits the
//! order and empties the cart.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  place_order(address)                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. address complete? ──────── no ──► ValidationFailure                 │
//! │  2. cart non-empty? ────────── no ──► ValidationFailure                 │
//! │  3. gateway.load() ─────────── err ─► PaymentScriptLoadFailure          │
//! │  4. gateway.open(total × 100, INR, prefill)                             │
//! │       │                                                                 │
//! │       ├── Dismissed ──────────────────► Cancelled (cart untouched)      │
//! │       ▼                                                                 │
//! │  5. POST orders {items, amount, address, paymentId, date}               │
//! │       │                          └─ err ─► NetworkFailure (cart kept)   │
//! │       ▼                                                                 │
//! │  6. REMOVE_FROM_CART per charged line ──► Placed(OrderReceipt)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart snapshot taken in step 2 is what gets charged and ordered. Lines
//! added while the widget is open stay in the cart afterwards.

use chrono::Utc;
use serde::Serialize;
use shopit_core::queries::price_details;
use shopit_core::validation::validate_address;
use shopit_core::{Address, CartAction, CoreError, Money, Order};
use shopit_remote::StorefrontClient;
use tracing::{debug, error, info};

use crate::error::{AppError, AppResult};
use crate::services::{PaymentGateway, PaymentOutcome, PaymentRequest};
use crate::state::{CartState, StorefrontConfig};

/// What the confirmation screen shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub payment_id: String,
    /// Grand total including delivery.
    pub amount: Money,
    pub item_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "receipt", rename_all = "lowercase")]
pub enum CheckoutOutcome {
    Placed(OrderReceipt),
    /// The widget was closed without paying.
    Cancelled,
}

/// Runs the checkout against `gateway` and the orders endpoint.
pub async fn place_order<G: PaymentGateway>(
    config: &StorefrontConfig,
    cart: &CartState,
    client: &StorefrontClient,
    gateway: &G,
    address: Address,
) -> AppResult<CheckoutOutcome> {
    debug!("place_order command");

    validate_address(&address)?;

    let snapshot = cart.snapshot();
    if snapshot.is_empty() {
        return Err(CoreError::EmptyCart.into());
    }

    let price = price_details(&snapshot, config.store.delivery_charge);

    gateway.load().await?;

    let request = PaymentRequest::for_checkout(config, &price, &address);
    let response = match gateway.open(request).await? {
        PaymentOutcome::Completed(response) => response,
        PaymentOutcome::Dismissed => {
            info!("Payment widget dismissed");
            return Ok(CheckoutOutcome::Cancelled);
        }
    };

    info!(payment_id = %response.payment_id, amount = %price.total, "Payment completed");

    let order = Order {
        items: snapshot.lines().to_vec(),
        amount: price.total,
        address,
        payment_id: response.payment_id.clone(),
        date: Utc::now(),
    };

    if let Err(e) = client.submit_order(&order).await {
        error!(
            payment_id = %response.payment_id,
            "Payment succeeded but the order was not recorded: {}", e
        );
        return Err(AppError::network(format!(
            "Payment successful but failed to place order. Please contact support with payment ID {}.",
            response.payment_id
        )));
    }

    for line in snapshot.lines() {
        cart.dispatch(CartAction::RemoveFromCart {
            id: line.id().clone(),
        });
    }

    info!(payment_id = %response.payment_id, "Order placed");

    Ok(CheckoutOutcome::Placed(OrderReceipt {
        payment_id: response.payment_id,
        amount: price.total,
        item_count: price.item_count,
    }))
}
