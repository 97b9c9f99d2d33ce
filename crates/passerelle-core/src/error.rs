//! Error types for gateway operations.

use passerelle_http::{HttpError, ParseError};
use thiserror::Error;

/// Default message for [`GatewayError::NotFound`].
pub const NOT_FOUND_MESSAGE: &str = "Resource not found on payment gateway";

/// Gateway operation errors.
///
/// Every failure surfaces synchronously to the caller; nothing is caught and
/// retried inside the library.
#[derive(Debug, Error)]
pub enum GatewayError {
	/// Caller-supplied parameters violate a domain rule. Raised before any
	/// transport call.
	#[error("{0}")]
	InvalidRequest(String),

	/// A credit card is invalid or missing required fields.
	#[error("{0}")]
	InvalidCard(String),

	/// A lifecycle invariant was violated: mutating a sent request, reading a
	/// response before sending, or constructing an unresolvable gateway.
	#[error("{0}")]
	InvalidState(String),

	/// The named resource is absent on the remote system. Distinct from
	/// [`GatewayError::Http`] because callers branch on "absent" vs "failed".
	#[error("{0}")]
	NotFound(String),

	/// Transport dispatch failed; carries the outbound request and cause.
	#[error(transparent)]
	Http(#[from] HttpError),

	/// Decoding a response body failed.
	#[error(transparent)]
	Parse(#[from] ParseError),
}

impl GatewayError {
	/// A [`GatewayError::NotFound`] with the default message.
	pub fn not_found() -> Self {
		Self::NotFound(NOT_FOUND_MESSAGE.to_string())
	}
}
