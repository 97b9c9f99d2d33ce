//! The gateway contract and capability introspection.
//!
//! No gateway implements every payment operation, and there is deliberately
//! no single fat interface. Each operation in the vocabulary has its own
//! trait; a gateway opts in by implementing the trait and overriding the
//! matching capability accessor. [`Gateway::supports`] then answers
//! capability queries by checking for the presence of that behavior, and
//! callers reach an operation only through its accessor, so invoking an
//! unsupported operation is unrepresentable.

use serde_json::Value;

use crate::error::GatewayError;
use crate::message::Request;
use crate::params::ParameterBag;

/// The operation vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
	Authorize,
	CompleteAuthorize,
	Capture,
	Purchase,
	CompletePurchase,
	FetchTransaction,
	Refund,
	Void,
	CreateCard,
	DeleteCard,
	UpdateCard,
	Find,
	Create,
	Modify,
	Delete,
	Register,
	AcceptNotification,
}

impl Operation {
	/// Every operation, in vocabulary order.
	pub const ALL: [Operation; 17] = [
		Operation::Authorize,
		Operation::CompleteAuthorize,
		Operation::Capture,
		Operation::Purchase,
		Operation::CompletePurchase,
		Operation::FetchTransaction,
		Operation::Refund,
		Operation::Void,
		Operation::CreateCard,
		Operation::DeleteCard,
		Operation::UpdateCard,
		Operation::Find,
		Operation::Create,
		Operation::Modify,
		Operation::Delete,
		Operation::Register,
		Operation::AcceptNotification,
	];

	/// The camelCase operation name used in capability listings.
	pub fn name(&self) -> &'static str {
		match self {
			Operation::Authorize => "authorize",
			Operation::CompleteAuthorize => "completeAuthorize",
			Operation::Capture => "capture",
			Operation::Purchase => "purchase",
			Operation::CompletePurchase => "completePurchase",
			Operation::FetchTransaction => "fetchTransaction",
			Operation::Refund => "refund",
			Operation::Void => "void",
			Operation::CreateCard => "createCard",
			Operation::DeleteCard => "deleteCard",
			Operation::UpdateCard => "updateCard",
			Operation::Find => "find",
			Operation::Create => "create",
			Operation::Modify => "modify",
			Operation::Delete => "delete",
			Operation::Register => "register",
			Operation::AcceptNotification => "acceptNotification",
		}
	}
}

/// A boxed request returned by gateway operations.
pub type GatewayRequest = Box<dyn Request>;

/// Result shorthand for operation methods.
pub type OperationResult = Result<GatewayRequest, GatewayError>;

// One trait per operation, each with a single `request` method building the
// unsent request for that operation. Callers reach them through the
// capability accessors on [`Gateway`], e.g.
// `gateway.purchase().unwrap().request(&params)`.

pub trait Authorize {
	fn request(&self, parameters: &ParameterBag) -> OperationResult;
}

pub trait CompleteAuthorize {
	fn request(&self, parameters: &ParameterBag) -> OperationResult;
}

pub trait Capture {
	fn request(&self, parameters: &ParameterBag) -> OperationResult;
}

pub trait Purchase {
	fn request(&self, parameters: &ParameterBag) -> OperationResult;
}

pub trait CompletePurchase {
	fn request(&self, parameters: &ParameterBag) -> OperationResult;
}

pub trait FetchTransaction {
	fn request(&self, parameters: &ParameterBag) -> OperationResult;
}

pub trait Refund {
	fn request(&self, parameters: &ParameterBag) -> OperationResult;
}

pub trait Void {
	fn request(&self, parameters: &ParameterBag) -> OperationResult;
}

pub trait CreateCard {
	fn request(&self, parameters: &ParameterBag) -> OperationResult;
}

pub trait DeleteCard {
	fn request(&self, parameters: &ParameterBag) -> OperationResult;
}

pub trait UpdateCard {
	fn request(&self, parameters: &ParameterBag) -> OperationResult;
}

pub trait Find {
	fn request(&self, parameters: &ParameterBag) -> OperationResult;
}

pub trait Create {
	fn request(&self, parameters: &ParameterBag) -> OperationResult;
}

pub trait Modify {
	fn request(&self, parameters: &ParameterBag) -> OperationResult;
}

pub trait Delete {
	fn request(&self, parameters: &ParameterBag) -> OperationResult;
}

pub trait Register {
	fn request(&self, parameters: &ParameterBag) -> OperationResult;
}

pub trait AcceptNotification {
	fn request(&self, parameters: &ParameterBag) -> OperationResult;
}

/// The base gateway contract.
///
/// Concrete gateways hold a [`ParameterBag`] for their configuration and
/// override the capability accessors for the operations they implement.
pub trait Gateway: Send {
	/// Human-readable gateway name, e.g. `"Stripe"`.
	fn name(&self) -> &str;

	/// Default configuration; an array value is an enumerated choice whose
	/// first element is the effective default.
	fn default_parameters(&self) -> ParameterBag {
		ParameterBag::new()
	}

	fn parameters(&self) -> &ParameterBag;

	fn parameters_mut(&mut self) -> &mut ParameterBag;

	/// Resets configuration to defaults overlaid with `parameters`.
	/// Unknown keys are kept generically, never rejected.
	fn initialize(&mut self, parameters: &ParameterBag) {
		let defaults = self.default_parameters();
		let mut bag = ParameterBag::new();
		bag.initialize(&defaults, parameters);
		*self.parameters_mut() = bag;
	}

	fn parameter(&self, key: &str) -> Option<&Value> {
		self.parameters().get(key)
	}

	/// The configured currency code, uppercased.
	fn currency(&self) -> Option<String> {
		self.parameter("currency")
			.and_then(Value::as_str)
			.map(str::to_uppercase)
	}

	fn set_currency(&mut self, value: &str) {
		self.parameters_mut().set("currency", value);
	}

	fn test_mode(&self) -> bool {
		self.parameter("testMode")
			.and_then(Value::as_bool)
			.unwrap_or(false)
	}

	fn set_test_mode(&mut self, value: bool) {
		self.parameters_mut().set("testMode", value);
	}

	// Capability accessors. A gateway overrides the accessor for each
	// operation it implements; everything else stays `None`.

	fn authorize(&self) -> Option<&dyn Authorize> {
		None
	}

	fn complete_authorize(&self) -> Option<&dyn CompleteAuthorize> {
		None
	}

	fn capture(&self) -> Option<&dyn Capture> {
		None
	}

	fn purchase(&self) -> Option<&dyn Purchase> {
		None
	}

	fn complete_purchase(&self) -> Option<&dyn CompletePurchase> {
		None
	}

	fn fetch_transaction(&self) -> Option<&dyn FetchTransaction> {
		None
	}

	fn refund(&self) -> Option<&dyn Refund> {
		None
	}

	fn void(&self) -> Option<&dyn Void> {
		None
	}

	fn create_card(&self) -> Option<&dyn CreateCard> {
		None
	}

	fn delete_card(&self) -> Option<&dyn DeleteCard> {
		None
	}

	fn update_card(&self) -> Option<&dyn UpdateCard> {
		None
	}

	fn find(&self) -> Option<&dyn Find> {
		None
	}

	fn create(&self) -> Option<&dyn Create> {
		None
	}

	fn modify(&self) -> Option<&dyn Modify> {
		None
	}

	fn delete(&self) -> Option<&dyn Delete> {
		None
	}

	fn register(&self) -> Option<&dyn Register> {
		None
	}

	fn accept_notification(&self) -> Option<&dyn AcceptNotification> {
		None
	}

	/// Whether this gateway implements the given operation.
	///
	/// Pure introspection: true exactly when the corresponding capability
	/// accessor returns a handler.
	fn supports(&self, operation: Operation) -> bool {
		match operation {
			Operation::Authorize => self.authorize().is_some(),
			Operation::CompleteAuthorize => self.complete_authorize().is_some(),
			Operation::Capture => self.capture().is_some(),
			Operation::Purchase => self.purchase().is_some(),
			Operation::CompletePurchase => self.complete_purchase().is_some(),
			Operation::FetchTransaction => self.fetch_transaction().is_some(),
			Operation::Refund => self.refund().is_some(),
			Operation::Void => self.void().is_some(),
			Operation::CreateCard => self.create_card().is_some(),
			Operation::DeleteCard => self.delete_card().is_some(),
			Operation::UpdateCard => self.update_card().is_some(),
			Operation::Find => self.find().is_some(),
			Operation::Create => self.create().is_some(),
			Operation::Modify => self.modify().is_some(),
			Operation::Delete => self.delete().is_some(),
			Operation::Register => self.register().is_some(),
			Operation::AcceptNotification => self.accept_notification().is_some(),
		}
	}

	/// The names of every supported operation, in vocabulary order.
	fn capabilities(&self) -> Vec<&'static str> {
		Operation::ALL
			.into_iter()
			.filter(|op| self.supports(*op))
			.map(|op| op.name())
			.collect()
	}
}

/// Marker for gateways specialised for account management.
pub trait AccountGateway: Gateway {}

/// Marker for gateways specialised for user management.
pub trait UserGateway: Gateway {}

/// Initializes a request with the gateway's parameters overlaid by
/// request-specific ones, the way gateways construct their requests.
pub fn create_request<R: Request>(
	gateway: &dyn Gateway,
	mut request: R,
	parameters: &ParameterBag,
) -> Result<R, GatewayError> {
	let mut merged = gateway.parameters().clone();
	merged.merge(parameters);
	request.initialize(&merged)?;
	Ok(request)
}
