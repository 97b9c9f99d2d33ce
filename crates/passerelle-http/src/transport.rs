//! The injectable transport boundary.

use bytes::Bytes;

use crate::error::TransportError;

/// A blocking HTTP transport.
///
/// The library never constructs sockets itself; every outbound request goes
/// through an implementation of this trait. A single call means a single
/// dispatch attempt. Retry policy, if any, belongs to the caller or the
/// transport, never to this layer.
pub trait Transport: Send + Sync {
	/// Dispatches the request and returns the raw response.
	///
	/// Implementations classify failures as network-level
	/// ([`TransportError::network`]) or anything else
	/// ([`TransportError::other`]).
	fn send(&self, request: &http::Request<Bytes>) -> Result<http::Response<Bytes>, TransportError>;
}

/// Default transport backed by [`reqwest::blocking::Client`].
pub struct ReqwestTransport {
	client: reqwest::blocking::Client,
}

impl ReqwestTransport {
	pub fn new(client: reqwest::blocking::Client) -> Self {
		Self { client }
	}
}

impl Default for ReqwestTransport {
	fn default() -> Self {
		Self::new(reqwest::blocking::Client::new())
	}
}

fn classify(error: reqwest::Error) -> TransportError {
	if error.is_connect() || error.is_timeout() {
		TransportError::network(error)
	} else {
		TransportError::other(error)
	}
}

impl Transport for ReqwestTransport {
	fn send(&self, request: &http::Request<Bytes>) -> Result<http::Response<Bytes>, TransportError> {
		let mut builder = self
			.client
			.request(request.method().clone(), request.uri().to_string())
			.version(request.version())
			.headers(request.headers().clone());

		if !request.body().is_empty() {
			builder = builder.body(request.body().to_vec());
		}

		let response = builder.send().map_err(classify)?;

		let status = response.status();
		let version = response.version();
		let headers = response.headers().clone();
		let body = response.bytes().map_err(classify)?;

		let mut out = http::Response::builder()
			.status(status)
			.version(version)
			.body(body)
			.map_err(TransportError::other)?;
		*out.headers_mut() = headers;

		Ok(out)
	}
}
