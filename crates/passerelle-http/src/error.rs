//! Error types for the HTTP layer.

use bytes::Bytes;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure category reported by a [`Transport`](crate::Transport).
///
/// Transports only have to answer one question: did the failure happen at the
/// network level (DNS, connection refused, timeout) or somewhere else?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
	/// The remote endpoint could not be reached.
	Network,
	/// Any other transport-level failure.
	Other,
}

/// Error raised by a [`Transport`](crate::Transport) implementation.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct TransportError {
	kind: TransportErrorKind,
	#[source]
	source: BoxError,
}

impl TransportError {
	/// Creates a network-level transport error.
	pub fn network(source: impl Into<BoxError>) -> Self {
		Self {
			kind: TransportErrorKind::Network,
			source: source.into(),
		}
	}

	/// Creates a transport error for any non-network failure.
	pub fn other(source: impl Into<BoxError>) -> Self {
		Self {
			kind: TransportErrorKind::Other,
			source: source.into(),
		}
	}

	pub fn kind(&self) -> TransportErrorKind {
		self.kind
	}

	pub fn is_network(&self) -> bool {
		self.kind == TransportErrorKind::Network
	}

	pub(crate) fn into_source(self) -> BoxError {
		self.source
	}
}

/// HTTP dispatch errors.
///
/// Every failure from the underlying transport is translated into exactly one
/// of two kinds, both of which retain the attempted outbound request for
/// diagnostics.
#[derive(Debug, Error)]
pub enum HttpError {
	/// The remote endpoint could not be reached.
	#[error("network error: {source}")]
	Network {
		/// The outbound request that was being dispatched.
		request: http::Request<Bytes>,
		#[source]
		source: BoxError,
	},

	/// Any other transport-level failure.
	#[error("request error: {source}")]
	Request {
		/// The outbound request that was being dispatched.
		request: http::Request<Bytes>,
		#[source]
		source: BoxError,
	},

	/// The outbound request could not be constructed from the supplied
	/// method, URI or headers. Raised before any dispatch attempt.
	#[error("invalid request: {0}")]
	Invalid(String),
}

impl HttpError {
	/// The outbound request that failed, when one was constructed.
	pub fn request(&self) -> Option<&http::Request<Bytes>> {
		match self {
			Self::Network { request, .. } | Self::Request { request, .. } => Some(request),
			Self::Invalid(_) => None,
		}
	}

	/// True for network-level failures.
	pub fn is_network(&self) -> bool {
		matches!(self, Self::Network { .. })
	}
}

/// Response body decoding errors.
#[derive(Debug, Error)]
pub enum ParseError {
	#[error("unable to parse response body into JSON: {0}")]
	Json(String),

	#[error("unable to parse response body into XML: {0}")]
	Xml(String),
}

#[cfg(test)]
mod tests {
	use super::*;

	fn dummy_request() -> http::Request<Bytes> {
		http::Request::builder()
			.method("GET")
			.uri("https://example.com/charge")
			.body(Bytes::new())
			.unwrap()
	}

	#[test]
	fn network_error_exposes_request() {
		let err = HttpError::Network {
			request: dummy_request(),
			source: "connection refused".into(),
		};
		assert!(err.is_network());
		let request = err.request().unwrap();
		assert_eq!(request.uri(), "https://example.com/charge");
	}

	#[test]
	fn request_error_is_not_network() {
		let err = HttpError::Request {
			request: dummy_request(),
			source: "protocol violation".into(),
		};
		assert!(!err.is_network());
		assert!(err.request().is_some());
	}

	#[test]
	fn transport_error_kind_round_trips() {
		assert!(TransportError::network("timed out").is_network());
		assert!(!TransportError::other("tls handshake").is_network());
	}

	#[test]
	fn error_messages_name_the_cause() {
		let err = HttpError::Network {
			request: dummy_request(),
			source: "dns failure".into(),
		};
		assert_eq!(err.to_string(), "network error: dns failure");
	}
}
