//! # Payment Gateway
//!
//! The payment widget is a third-party script the presentation layer runs.
//! The storefront only decides *what* to charge and reacts to the result.
//!
//! ## Handoff
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  place_order                    WidgetGateway               UI          │
//! │  ───────────                    ─────────────               ──          │
//! │                                                                         │
//! │  load() ──────────────────────► GET checkout.js                         │
//! │                                  │ non-2xx / error                      │
//! │                                  └──► PaymentScriptLoadFailure          │
//! │                                                                         │
//! │  open(PaymentRequest) ────────► WidgetPrompt ──mpsc──► render widget    │
//! │                                                          │              │
//! │  Completed(PaymentResponse) ◄──────── oneshot ◄── success handler       │
//! │  Dismissed                  ◄──────── oneshot ◄── closed / dropped      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;
use shopit_core::{Address, PriceDetails};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::state::StorefrontConfig;

// =============================================================================
// Request / Response
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prefill {
    pub name: String,
    pub contact: String,
}

/// Everything the widget needs to collect one payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub key: String,
    /// Minor units (paise).
    pub amount: i64,
    pub currency: String,
    pub name: String,
    pub description: String,
    pub prefill: Prefill,
    pub theme_color: String,
}

impl PaymentRequest {
    /// Builds the request for the grand total of `price`.
    pub fn for_checkout(config: &StorefrontConfig, price: &PriceDetails, address: &Address) -> Self {
        PaymentRequest {
            key: config.payment.key_id.clone(),
            amount: price.payable_minor(),
            currency: config.store.currency_code.clone(),
            name: config.store.name.clone(),
            description: config.store.description.clone(),
            prefill: Prefill {
                name: address.name.trim().to_string(),
                contact: address.mobile.trim().to_string(),
            },
            theme_color: config.payment.theme_color.clone(),
        }
    }

    /// The options object the widget constructor takes.
    pub fn widget_options(&self) -> serde_json::Value {
        json!({
            "key": self.key,
            "amount": self.amount,
            "currency": self.currency,
            "name": self.name,
            "description": self.description,
            "prefill": {
                "name": self.prefill.name,
                "contact": self.prefill.contact,
            },
            "theme": { "color": self.theme_color },
        })
    }
}

/// Payload of the widget's success handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentResponse {
    #[serde(rename = "razorpay_payment_id")]
    pub payment_id: String,

    #[serde(rename = "razorpay_order_id", default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,

    #[serde(rename = "razorpay_signature", default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl PaymentResponse {
    pub fn new(payment_id: impl Into<String>) -> Self {
        PaymentResponse {
            payment_id: payment_id.into(),
            order_id: None,
            signature: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    Completed(PaymentResponse),
    /// The user closed the widget without paying.
    Dismissed,
}

// =============================================================================
// Gateway Trait
// =============================================================================

pub trait PaymentGateway: Send + Sync {
    /// Makes the widget available. Fails with `PaymentScriptLoadFailure`.
    fn load(&self) -> impl Future<Output = AppResult<()>> + Send;

    /// Shows the widget and waits for the user.
    fn open(&self, request: PaymentRequest) -> impl Future<Output = AppResult<PaymentOutcome>> + Send;
}

// =============================================================================
// Widget Gateway
// =============================================================================

/// One pending widget session, handed to the presentation layer.
#[derive(Debug)]
pub struct WidgetPrompt {
    pub request: PaymentRequest,
    reply: oneshot::Sender<PaymentOutcome>,
}

impl WidgetPrompt {
    /// Called from the widget's success handler.
    pub fn complete(self, response: PaymentResponse) {
        let _ = self.reply.send(PaymentOutcome::Completed(response));
    }

    pub fn dismiss(self) {
        let _ = self.reply.send(PaymentOutcome::Dismissed);
    }
}

/// Gateway backed by the hosted checkout script.
#[derive(Debug)]
pub struct WidgetGateway {
    http: reqwest::Client,
    script_url: String,
    loaded: AtomicBool,
    prompts: mpsc::Sender<WidgetPrompt>,
}

impl WidgetGateway {
    /// Creates the gateway and the receiving end the UI listens on.
    pub fn new(
        config: &StorefrontConfig,
    ) -> AppResult<(Self, mpsc::Receiver<WidgetPrompt>)> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {}", e)))?;

        let (prompts, receiver) = mpsc::channel(1);

        Ok((
            WidgetGateway {
                http,
                script_url: config.payment.script_url.clone(),
                loaded: AtomicBool::new(false),
                prompts,
            },
            receiver,
        ))
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }
}

impl PaymentGateway for WidgetGateway {
    async fn load(&self) -> AppResult<()> {
        if self.is_loaded() {
            return Ok(());
        }

        debug!(url = %self.script_url, "Loading payment script");

        let failed = |reason: String| {
            warn!(url = %self.script_url, "Payment script failed to load: {}", reason);
            AppError::payment_script(
                "Payment SDK failed to load. Please check your connection.",
            )
        };

        let response = self
            .http
            .get(&self.script_url)
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(failed(format!("HTTP {}", response.status())));
        }

        response.bytes().await.map_err(|e| failed(e.to_string()))?;

        self.loaded.store(true, Ordering::Release);
        info!("Payment script loaded");
        Ok(())
    }

    async fn open(&self, request: PaymentRequest) -> AppResult<PaymentOutcome> {
        if !self.is_loaded() {
            return Err(AppError::payment_script("Payment SDK is not loaded"));
        }

        debug!(amount = request.amount, currency = %request.currency, "Opening payment widget");

        let (reply, outcome) = oneshot::channel();
        self.prompts
            .send(WidgetPrompt { request, reply })
            .await
            .map_err(|_| AppError::internal("No payment widget is attached"))?;

        // A prompt dropped without an answer counts as closing the widget
        Ok(outcome.await.unwrap_or(PaymentOutcome::Dismissed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopit_core::queries::price_details;
    use shopit_core::{Cart, CartAction, Money, Product, Reducer};

    fn address() -> Address {
        Address {
            name: "Asha".into(),
            mobile: "9876543210".into(),
            street: "12 MG Road".into(),
            city: "Pune".into(),
            zip: "411001".into(),
            state: "MH".into(),
        }
    }

    #[test]
    fn test_request_amount_is_grand_total_in_paise() {
        let product = Product::new("1", "Shirt", Money::from_major(100), "clothing");
        let cart = Cart::new().apply(&CartAction::AddToCart { product });
        let config = StorefrontConfig::default();

        let price = price_details(&cart, config.store.delivery_charge);
        let request = PaymentRequest::for_checkout(&config, &price, &address());

        assert_eq!(request.amount, 14_900);
        assert_eq!(request.currency, "INR");
        assert_eq!(request.prefill.contact, "9876543210");
    }

    #[test]
    fn test_widget_options_shape() {
        let config = StorefrontConfig::default();
        let price = price_details(&Cart::new(), Money::from_major(49));
        let options = PaymentRequest::for_checkout(&config, &price, &address()).widget_options();

        assert_eq!(options["amount"], 4_900);
        assert_eq!(options["name"], "Shop It");
        assert_eq!(options["description"], "Thank you for shopping with us.");
        assert_eq!(options["prefill"]["name"], "Asha");
        assert_eq!(options["theme"]["color"], "#0f9d58");
    }

    #[test]
    fn test_response_from_handler_payload() {
        let response: PaymentResponse =
            serde_json::from_str(r#"{"razorpay_payment_id": "pay_123"}"#).unwrap();
        assert_eq!(response, PaymentResponse::new("pay_123"));
    }

    #[tokio::test]
    async fn test_open_before_load_fails() {
        let (gateway, _prompts) = WidgetGateway::new(&StorefrontConfig::default()).unwrap();
        let price = price_details(&Cart::new(), Money::from_major(49));
        let request = PaymentRequest::for_checkout(&StorefrontConfig::default(), &price, &address());

        let err = gateway.open(request).await.unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::PaymentScriptLoadFailure);
    }
}
