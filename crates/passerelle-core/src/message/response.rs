use serde_json::Value;

/// The outcome of a sent request.
///
/// Responses are immutable snapshots; after construction nothing about the
/// outcome changes, so they are freely shareable between threads.
pub trait Response: Send + Sync {
	/// The decoded response payload.
	fn data(&self) -> &Value;

	/// Whether the operation succeeded.
	fn is_successful(&self) -> bool;

	/// Whether the customer must be redirected to complete the operation.
	fn is_redirect(&self) -> bool {
		false
	}

	/// Whether the operation is still in flight on the remote side.
	fn is_pending(&self) -> bool {
		false
	}

	/// Gateway-supplied human-readable message, if any.
	fn message(&self) -> Option<String> {
		None
	}

	/// Gateway-supplied status or error code, if any.
	fn code(&self) -> Option<String> {
		None
	}

	/// The gateway's reference for the transaction, if any.
	fn transaction_reference(&self) -> Option<String> {
		None
	}
}
