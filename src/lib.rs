//! # Passerelle
//!
//! A consistent, multi-provider payment gateway abstraction for Rust.
//!
//! Passerelle gives every payment provider the same shape: a [`Gateway`]
//! declares which operations it supports, each operation produces an unsent
//! [`Request`], a request normalizes its parameters and is sent exactly
//! once, and the resulting [`Response`] reports the outcome. Switching
//! providers means switching which gateway the registry hands back, not
//! rewriting checkout code.
//!
//! ## Quick Start
//!
//! ```no_run
//! use passerelle::gateway::Purchase;
//! use passerelle::{Gateway, GatewayRegistry, ParameterBag, Request, Response};
//!
//! # fn main() -> Result<(), passerelle::GatewayError> {
//! let registry = GatewayRegistry::new();
//! let gateway = registry.create("Mock", None)?;
//!
//! if let Some(purchase) = gateway.purchase() {
//!     let mut request = purchase.request(
//!         &ParameterBag::new()
//!             .with("amount", "10.00")
//!             .with("currency", "USD"),
//!     )?;
//!     let response = request.send()?;
//!     if response.is_successful() {
//!         println!("paid: {:?}", response.transaction_reference());
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Crates
//!
//! - `passerelle-core` - gateway contract, value objects, request lifecycle
//! - `passerelle-http` - blocking HTTP client facade and transport boundary
//! - `passerelle-mocks` - scripted transport and mock gateways for tests

pub use passerelle_core::{
	card::{Address, CreditCard},
	currency::Currency,
	error::{GatewayError, NOT_FOUND_MESSAGE},
	gateway::{self, Gateway, Operation},
	item::{Item, ItemBag},
	message::{Request, RequestCore, Response},
	money::{Amount, Money, MoneyPolicy},
	params::ParameterBag,
	registry::{GatewayEntry, GatewayFactory, GatewayRegistry, GATEWAYS},
	resolve,
};

pub use passerelle_http::{Body, HttpClient, HttpError, HttpResponse, ParseError, Transport};
