//! Core payment-gateway abstractions.
//!
//! A consistent vocabulary over wildly different payment providers: gateways
//! declare which operations they support, operations produce requests,
//! requests normalize their parameters and send exactly once, and responses
//! report the outcome. Provider integrations live in their own crates and
//! plug in through [`registry::GATEWAYS`].

pub mod card;
pub mod currency;
pub mod error;
pub mod gateway;
pub mod item;
pub mod message;
pub mod money;
pub mod params;
pub mod registry;
pub mod resolve;

pub use card::{Address, CreditCard};
pub use currency::Currency;
pub use error::GatewayError;
pub use gateway::{Gateway, Operation};
pub use item::{Item, ItemBag};
pub use message::{Request, RequestCore, Response};
pub use money::{Amount, Money, MoneyPolicy};
pub use params::ParameterBag;
pub use registry::{GatewayEntry, GatewayFactory, GatewayRegistry, GATEWAYS};
