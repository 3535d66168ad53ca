//! Boundary collaborators the commands depend on: the mock auth store and
//! the payment widget.

pub mod auth;
pub mod payment;

pub use auth::MockAuthService;
pub use payment::{
    PaymentGateway, PaymentOutcome, PaymentRequest, PaymentResponse, Prefill, WidgetGateway,
    WidgetPrompt,
};
