//! Checkout flow tests: a scripted payment gateway plus an axum fixture
//! standing in for the orders endpoint and the widget script host.

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;

use shopit_core::{Address, Money, Product};
use shopit_remote::StorefrontClient;
use shopit_storefront::commands::cart::{add_to_cart, get_cart};
use shopit_storefront::commands::checkout::{place_order, CheckoutOutcome};
use shopit_storefront::error::{AppError, AppResult, ErrorCode};
use shopit_storefront::services::{
    PaymentGateway, PaymentOutcome, PaymentRequest, PaymentResponse, WidgetGateway,
};
use shopit_storefront::state::{CartState, StorefrontConfig};

// =============================================================================
// Fixture server
// =============================================================================

#[derive(Default)]
struct Fixture {
    orders: Vec<Value>,
    fail_orders: bool,
}

type Shared = Arc<Mutex<Fixture>>;

async fn create_order(State(s): State<Shared>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let mut fixture = s.lock().unwrap();
    if fixture.fail_orders {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(Value::Null));
    }
    fixture.orders.push(body.clone());
    (StatusCode::CREATED, Json(body))
}

async fn start() -> (String, Shared) {
    let state: Shared = Arc::new(Mutex::new(Fixture::default()));
    let router = Router::new()
        .route("/orders", post(create_order))
        .route("/checkout.js", get(|| async { "window.Razorpay = function () {};" }))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{}", addr), state)
}

// =============================================================================
// Scripted gateway
// =============================================================================

struct ScriptedGateway {
    load_fails: bool,
    outcome: PaymentOutcome,
    opened: Mutex<Vec<PaymentRequest>>,
    /// Added to this cart while the widget is open.
    added_meanwhile: Option<(CartState, Product)>,
}

impl ScriptedGateway {
    fn paying(payment_id: &str) -> Self {
        ScriptedGateway {
            load_fails: false,
            outcome: PaymentOutcome::Completed(PaymentResponse::new(payment_id)),
            opened: Mutex::new(Vec::new()),
            added_meanwhile: None,
        }
    }

    fn dismissing() -> Self {
        ScriptedGateway {
            outcome: PaymentOutcome::Dismissed,
            ..Self::paying("unused")
        }
    }

    fn offline() -> Self {
        ScriptedGateway {
            load_fails: true,
            ..Self::paying("unused")
        }
    }

    fn opened(&self) -> Vec<PaymentRequest> {
        self.opened.lock().unwrap().clone()
    }
}

impl PaymentGateway for ScriptedGateway {
    async fn load(&self) -> AppResult<()> {
        if self.load_fails {
            return Err(AppError::payment_script("script blocked"));
        }
        Ok(())
    }

    async fn open(&self, request: PaymentRequest) -> AppResult<PaymentOutcome> {
        self.opened.lock().unwrap().push(request);
        if let Some((cart, product)) = &self.added_meanwhile {
            add_to_cart(cart, product.clone());
        }
        Ok(self.outcome.clone())
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn address() -> Address {
    Address {
        name: "Asha".into(),
        mobile: "9876543210".into(),
        street: "12 MG Road".into(),
        city: "Pune".into(),
        zip: "411001".into(),
        state: "Maharashtra".into(),
    }
}

fn filled_cart() -> CartState {
    let cart = CartState::new();
    let shirt = Product::new("1", "Shirt", Money::from_major(100), "clothing");
    add_to_cart(&cart, shirt.clone());
    add_to_cart(&cart, shirt);
    add_to_cart(&cart, Product::new("2", "Socks", Money::from_major(50), "clothing"));
    cart
}

fn config_for(base_url: &str) -> StorefrontConfig {
    let mut config = StorefrontConfig::default();
    config.api.base_url = base_url.to_string();
    config.payment.script_url = format!("{}/checkout.js", base_url);
    config
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_paid_checkout_submits_order_and_clears_cart() {
    let (base_url, fixture) = start().await;
    let config = config_for(&base_url);
    let client = StorefrontClient::new(&base_url).unwrap();
    let cart = filled_cart();
    let gateway = ScriptedGateway::paying("pay_123");

    let outcome = place_order(&config, &cart, &client, &gateway, address())
        .await
        .unwrap();

    let receipt = match outcome {
        CheckoutOutcome::Placed(receipt) => receipt,
        other => panic!("expected a placed order, got {:?}", other),
    };
    assert_eq!(receipt.payment_id, "pay_123");
    assert_eq!(receipt.amount, Money::from_major(299));
    assert_eq!(receipt.item_count, 2);

    let opened = gateway.opened();
    assert_eq!(opened.len(), 1);
    assert_eq!(opened[0].amount, 29_900);
    assert_eq!(opened[0].currency, "INR");
    assert_eq!(opened[0].prefill.name, "Asha");

    let orders = fixture.lock().unwrap().orders.clone();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["paymentId"], "pay_123");
    assert_eq!(orders[0]["amount"], 299);
    assert_eq!(orders[0]["items"].as_array().map(Vec::len), Some(2));
    assert_eq!(orders[0]["items"][0]["quantity"], 2);
    assert_eq!(orders[0]["address"]["city"], "Pune");
    assert!(orders[0]["date"].is_string());

    assert!(get_cart(&cart).items.is_empty());
}

#[tokio::test]
async fn test_lines_added_during_payment_stay_in_cart() {
    let (base_url, fixture) = start().await;
    let config = config_for(&base_url);
    let client = StorefrontClient::new(&base_url).unwrap();
    let cart = filled_cart();
    let late = Product::new("3", "Cap", Money::from_major(80), "clothing");
    let gateway = ScriptedGateway {
        added_meanwhile: Some((cart.clone(), late)),
        ..ScriptedGateway::paying("pay_late")
    };

    let outcome = place_order(&config, &cart, &client, &gateway, address())
        .await
        .unwrap();

    assert!(matches!(outcome, CheckoutOutcome::Placed(ref r) if r.amount == Money::from_major(299)));
    let orders = fixture.lock().unwrap().orders.clone();
    assert_eq!(orders[0]["items"].as_array().map(Vec::len), Some(2));

    let remaining = get_cart(&cart);
    assert_eq!(remaining.items.len(), 1);
    assert_eq!(remaining.items[0].product.title, "Cap");
}

#[tokio::test]
async fn test_incomplete_address_never_opens_widget() {
    let (base_url, fixture) = start().await;
    let config = config_for(&base_url);
    let client = StorefrontClient::new(&base_url).unwrap();
    let cart = filled_cart();
    let gateway = ScriptedGateway::paying("pay_123");

    let mut incomplete = address();
    incomplete.city = "  ".into();

    let err = place_order(&config, &cart, &client, &gateway, incomplete)
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ValidationFailure);
    assert!(err.message.contains("city"));
    assert!(gateway.opened().is_empty());
    assert!(fixture.lock().unwrap().orders.is_empty());
    assert_eq!(get_cart(&cart).items.len(), 2);
}

#[tokio::test]
async fn test_empty_cart_is_rejected() {
    let (base_url, _) = start().await;
    let config = config_for(&base_url);
    let client = StorefrontClient::new(&base_url).unwrap();
    let gateway = ScriptedGateway::paying("pay_123");

    let err = place_order(&config, &CartState::new(), &client, &gateway, address())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ValidationFailure);
    assert!(gateway.opened().is_empty());
}

#[tokio::test]
async fn test_script_load_failure_keeps_cart() {
    let (base_url, _) = start().await;
    let config = config_for(&base_url);
    let client = StorefrontClient::new(&base_url).unwrap();
    let cart = filled_cart();
    let gateway = ScriptedGateway::offline();

    let err = place_order(&config, &cart, &client, &gateway, address())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::PaymentScriptLoadFailure);
    assert!(gateway.opened().is_empty());
    assert_eq!(get_cart(&cart).items.len(), 2);
}

#[tokio::test]
async fn test_dismissed_widget_leaves_cart_untouched() {
    let (base_url, fixture) = start().await;
    let config = config_for(&base_url);
    let client = StorefrontClient::new(&base_url).unwrap();
    let cart = filled_cart();
    let before = get_cart(&cart);

    let outcome = place_order(&config, &cart, &client, &ScriptedGateway::dismissing(), address())
        .await
        .unwrap();

    assert_eq!(outcome, CheckoutOutcome::Cancelled);
    assert_eq!(get_cart(&cart), before);
    assert!(fixture.lock().unwrap().orders.is_empty());
}

#[tokio::test]
async fn test_order_rejected_after_payment_keeps_cart() {
    let (base_url, fixture) = start().await;
    fixture.lock().unwrap().fail_orders = true;
    let config = config_for(&base_url);
    let client = StorefrontClient::new(&base_url).unwrap();
    let cart = filled_cart();

    let err = place_order(&config, &cart, &client, &ScriptedGateway::paying("pay_9"), address())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::NetworkFailure);
    assert!(err.message.contains("pay_9"));
    assert_eq!(get_cart(&cart).items.len(), 2);
}

// =============================================================================
// Widget gateway
// =============================================================================

#[tokio::test]
async fn test_widget_gateway_round_trip() {
    let (base_url, fixture) = start().await;
    let config = config_for(&base_url);
    let client = StorefrontClient::new(&base_url).unwrap();
    let cart = filled_cart();
    let (gateway, mut prompts) = WidgetGateway::new(&config).unwrap();

    let ui = tokio::spawn(async move {
        let prompt = prompts.recv().await.unwrap();
        let options = prompt.request.widget_options();
        prompt.complete(PaymentResponse::new("pay_widget"));
        options
    });

    let outcome = place_order(&config, &cart, &client, &gateway, address())
        .await
        .unwrap();
    let options = ui.await.unwrap();

    assert!(gateway.is_loaded());
    assert_eq!(options["amount"], 29_900);
    assert_eq!(options["theme"]["color"], "#0f9d58");
    assert!(matches!(outcome, CheckoutOutcome::Placed(ref r) if r.payment_id == "pay_widget"));
    assert_eq!(fixture.lock().unwrap().orders.len(), 1);
}

#[tokio::test]
async fn test_widget_gateway_dropped_prompt_is_dismissal() {
    let (base_url, _) = start().await;
    let config = config_for(&base_url);
    let client = StorefrontClient::new(&base_url).unwrap();
    let cart = filled_cart();
    let (gateway, mut prompts) = WidgetGateway::new(&config).unwrap();

    tokio::spawn(async move {
        let prompt = prompts.recv().await.unwrap();
        drop(prompt);
    });

    let outcome = place_order(&config, &cart, &client, &gateway, address())
        .await
        .unwrap();

    assert_eq!(outcome, CheckoutOutcome::Cancelled);
    assert_eq!(get_cart(&cart).items.len(), 2);
}

#[tokio::test]
async fn test_widget_gateway_missing_script() {
    let (base_url, _) = start().await;
    let mut config = config_for(&base_url);
    config.payment.script_url = format!("{}/missing.js", base_url);
    let (gateway, _prompts) = WidgetGateway::new(&config).unwrap();

    let err = gateway.load().await.unwrap_err();

    assert_eq!(err.code, ErrorCode::PaymentScriptLoadFailure);
    assert!(!gateway.is_loaded());
}
