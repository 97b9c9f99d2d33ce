//! HTTP plumbing for the Passerelle payment library.
//!
//! Gateways never talk to the network directly. They go through [`HttpClient`],
//! a thin facade over an injected [`Transport`], which normalises every
//! transport-level failure into one of two stable error kinds
//! ([`HttpError::Network`] and [`HttpError::Request`]) and wraps raw responses
//! in [`HttpResponse`] with JSON and XML body decoding.

pub mod client;
pub mod error;
pub mod response;
pub mod transport;

pub use client::{Body, HttpClient};
pub use error::{HttpError, ParseError, TransportError, TransportErrorKind};
pub use response::{HttpResponse, XmlElement};
pub use transport::{ReqwestTransport, Transport};
