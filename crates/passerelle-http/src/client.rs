//! The HTTP client facade used by gateways and requests.

use std::sync::Arc;

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::{Method, Version};
use tracing::debug;

use crate::error::HttpError;
use crate::response::HttpResponse;
use crate::transport::{ReqwestTransport, Transport};

/// Outbound request body.
///
/// Covers the accepted body shapes: absent, raw bytes, or anything with a
/// textual representation. Other shapes are unrepresentable by construction.
#[derive(Debug, Clone, Default)]
pub enum Body {
	#[default]
	Empty,
	Bytes(Bytes),
	Text(String),
}

impl Body {
	fn into_bytes(self) -> Bytes {
		match self {
			Self::Empty => Bytes::new(),
			Self::Bytes(bytes) => bytes,
			Self::Text(text) => Bytes::from(text),
		}
	}
}

impl From<String> for Body {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<&str> for Body {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<Bytes> for Body {
	fn from(value: Bytes) -> Self {
		Self::Bytes(value)
	}
}

impl From<Vec<u8>> for Body {
	fn from(value: Vec<u8>) -> Self {
		Self::Bytes(Bytes::from(value))
	}
}

impl From<&serde_json::Value> for Body {
	fn from(value: &serde_json::Value) -> Self {
		Self::Text(value.to_string())
	}
}

/// Thin facade over an injected [`Transport`].
///
/// Builds an outbound [`http::Request`], dispatches it exactly once, and
/// translates failures into [`HttpError`]. Cloning is cheap; clones share the
/// same transport.
#[derive(Clone)]
pub struct HttpClient {
	transport: Arc<dyn Transport>,
}

impl HttpClient {
	/// Creates a client over the given transport.
	pub fn new(transport: Arc<dyn Transport>) -> Self {
		Self { transport }
	}

	/// Sends a request built from the given parts.
	pub fn request<I, K, V>(
		&self,
		method: Method,
		uri: &str,
		headers: I,
		body: Body,
		version: Version,
	) -> Result<HttpResponse, HttpError>
	where
		I: IntoIterator<Item = (K, V)>,
		K: TryInto<HeaderName>,
		V: TryInto<HeaderValue>,
	{
		let mut builder = http::Request::builder()
			.method(method)
			.uri(uri)
			.version(version);

		for (name, value) in headers {
			let name = name
				.try_into()
				.map_err(|_| HttpError::Invalid("invalid header name".to_string()))?;
			let value = value
				.try_into()
				.map_err(|_| HttpError::Invalid("invalid header value".to_string()))?;
			builder = builder.header(name, value);
		}

		let request = builder
			.body(body.into_bytes())
			.map_err(|e| HttpError::Invalid(e.to_string()))?;

		self.send(request)
	}

	/// Convenience GET with no headers or body.
	pub fn get(&self, uri: &str) -> Result<HttpResponse, HttpError> {
		self.request(
			Method::GET,
			uri,
			std::iter::empty::<(HeaderName, HeaderValue)>(),
			Body::Empty,
			Version::HTTP_11,
		)
	}

	/// Convenience POST.
	pub fn post<I, K, V>(&self, uri: &str, headers: I, body: Body) -> Result<HttpResponse, HttpError>
	where
		I: IntoIterator<Item = (K, V)>,
		K: TryInto<HeaderName>,
		V: TryInto<HeaderValue>,
	{
		self.request(Method::POST, uri, headers, body, Version::HTTP_11)
	}

	/// Dispatches an already-built request through the transport, translating
	/// failures into the two stable error kinds.
	pub fn send(&self, request: http::Request<Bytes>) -> Result<HttpResponse, HttpError> {
		debug!(method = %request.method(), uri = %request.uri(), "dispatching request");

		match self.transport.send(&request) {
			Ok(response) => Ok(HttpResponse::new(response)),
			Err(error) if error.is_network() => Err(HttpError::Network {
				request,
				source: error.into_source(),
			}),
			Err(error) => Err(HttpError::Request {
				request,
				source: error.into_source(),
			}),
		}
	}
}

impl Default for HttpClient {
	fn default() -> Self {
		Self::new(Arc::new(ReqwestTransport::default()))
	}
}
