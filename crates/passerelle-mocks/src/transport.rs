//! Scripted transport for testing without sockets.

use std::collections::VecDeque;
use std::io;
use std::sync::Mutex;

use bytes::Bytes;
use passerelle_http::{Transport, TransportError};
use serde_json::{json, Value};
use uuid::Uuid;

/// How a queued exchange should play out.
enum Outcome {
	Response(http::StatusCode, Bytes),
	NetworkFailure(String),
}

/// A request captured by the transport, in a form that is cheap to clone
/// and assert on.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
	pub method: http::Method,
	pub uri: String,
	pub body: Bytes,
}

/// A [`Transport`] that replays scripted outcomes in order and records
/// every request it sees. An exhausted script fails the request, so a test
/// that sends more than it scripted fails loudly.
#[derive(Default)]
pub struct MockTransport {
	script: Mutex<VecDeque<Outcome>>,
	requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
	pub fn new() -> Self {
		Self::default()
	}

	/// Queues a raw response.
	pub fn enqueue_response(&self, status: http::StatusCode, body: impl Into<Bytes>) {
		self.push(Outcome::Response(status, body.into()));
	}

	/// Queues a `200 OK` JSON response.
	pub fn enqueue_json(&self, body: &Value) {
		self.enqueue_response(http::StatusCode::OK, body.to_string());
	}

	/// Queues a successful gateway approval with a fresh transaction
	/// reference, and returns that reference.
	pub fn enqueue_approval(&self) -> String {
		let reference = Uuid::new_v4().to_string();
		self.enqueue_json(&json!({
			"success": true,
			"message": "Approved",
			"transactionReference": reference,
		}));
		reference
	}

	/// Queues a gateway decline.
	pub fn enqueue_decline(&self, message: &str) {
		self.enqueue_json(&json!({
			"success": false,
			"message": message,
			"code": "card_declined",
		}));
	}

	/// Queues a network-level failure.
	pub fn enqueue_network_failure(&self, message: &str) {
		self.push(Outcome::NetworkFailure(message.to_string()));
	}

	/// Every request dispatched so far, in order.
	pub fn requests(&self) -> Vec<RecordedRequest> {
		self.requests.lock().unwrap_or_else(|e| e.into_inner()).clone()
	}

	pub fn request_count(&self) -> usize {
		self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
	}

	fn push(&self, outcome: Outcome) {
		self.script
			.lock()
			.unwrap_or_else(|e| e.into_inner())
			.push_back(outcome);
	}
}

impl Transport for MockTransport {
	fn send(&self, request: &http::Request<Bytes>) -> Result<http::Response<Bytes>, TransportError> {
		self.requests
			.lock()
			.unwrap_or_else(|e| e.into_inner())
			.push(RecordedRequest {
				method: request.method().clone(),
				uri: request.uri().to_string(),
				body: request.body().clone(),
			});

		let outcome = self
			.script
			.lock()
			.unwrap_or_else(|e| e.into_inner())
			.pop_front()
			.ok_or_else(|| {
				TransportError::other(io::Error::other("no scripted response left"))
			})?;

		match outcome {
			Outcome::Response(status, body) => http::Response::builder()
				.status(status)
				.body(body)
				.map_err(TransportError::other),
			Outcome::NetworkFailure(message) => Err(TransportError::network(io::Error::new(
				io::ErrorKind::ConnectionRefused,
				message,
			))),
		}
	}
}
