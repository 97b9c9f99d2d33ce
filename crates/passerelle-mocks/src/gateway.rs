//! In-memory-style mock gateways exercising the full request pipeline.
//!
//! Unlike a pure stub, these gateways really assemble payloads and go
//! through the HTTP client, so pairing them with a
//! [`MockTransport`](crate::MockTransport) exercises the same code paths a
//! provider integration would.

use std::sync::Arc;

use linkme::distributed_slice;
use passerelle_core::error::GatewayError;
use passerelle_core::gateway::{
	self, AccountGateway as AccountGatewayMarker, Gateway, Operation, OperationResult,
};
use passerelle_core::message::{Request, RequestCore, Response};
use passerelle_core::money::MoneyPolicy;
use passerelle_core::params::ParameterBag;
use passerelle_core::registry::{GatewayEntry, GATEWAYS};
use passerelle_http::{Body, HttpClient};
use serde_json::{json, Value};

const BASE_URL: &str = "https://api.mock.test/v1";

/// A gateway supporting the common purchase-side operations.
pub struct MockGateway {
	parameters: ParameterBag,
	http: HttpClient,
}

impl MockGateway {
	pub fn new(http: HttpClient) -> Self {
		let mut gateway = Self {
			parameters: ParameterBag::new(),
			http,
		};
		gateway.initialize(&ParameterBag::new());
		gateway
	}

	fn build_request(&self, operation: Operation, parameters: &ParameterBag) -> OperationResult {
		let request = gateway::create_request(
			self,
			MockRequest::new(self.http.clone(), operation),
			parameters,
		)?;
		Ok(Box::new(request))
	}
}

impl Gateway for MockGateway {
	fn name(&self) -> &str {
		"Mock"
	}

	fn default_parameters(&self) -> ParameterBag {
		ParameterBag::new()
			.with("apiKey", "")
			.with("testMode", false)
	}

	fn parameters(&self) -> &ParameterBag {
		&self.parameters
	}

	fn parameters_mut(&mut self) -> &mut ParameterBag {
		&mut self.parameters
	}

	fn authorize(&self) -> Option<&dyn gateway::Authorize> {
		Some(self)
	}

	fn purchase(&self) -> Option<&dyn gateway::Purchase> {
		Some(self)
	}

	fn refund(&self) -> Option<&dyn gateway::Refund> {
		Some(self)
	}

	fn void(&self) -> Option<&dyn gateway::Void> {
		Some(self)
	}

	fn create_card(&self) -> Option<&dyn gateway::CreateCard> {
		Some(self)
	}
}

impl gateway::Authorize for MockGateway {
	fn request(&self, parameters: &ParameterBag) -> OperationResult {
		self.build_request(Operation::Authorize, parameters)
	}
}

impl gateway::Purchase for MockGateway {
	fn request(&self, parameters: &ParameterBag) -> OperationResult {
		self.build_request(Operation::Purchase, parameters)
	}
}

impl gateway::Refund for MockGateway {
	fn request(&self, parameters: &ParameterBag) -> OperationResult {
		self.build_request(Operation::Refund, parameters)
	}
}

impl gateway::Void for MockGateway {
	fn request(&self, parameters: &ParameterBag) -> OperationResult {
		self.build_request(Operation::Void, parameters)
	}
}

impl gateway::CreateCard for MockGateway {
	fn request(&self, parameters: &ParameterBag) -> OperationResult {
		self.build_request(Operation::CreateCard, parameters)
	}
}

/// The account-management variant of [`MockGateway`].
pub struct MockAccountGateway {
	parameters: ParameterBag,
	http: HttpClient,
}

impl MockAccountGateway {
	pub fn new(http: HttpClient) -> Self {
		let mut gateway = Self {
			parameters: ParameterBag::new(),
			http,
		};
		gateway.initialize(&ParameterBag::new());
		gateway
	}

	fn build_request(&self, operation: Operation, parameters: &ParameterBag) -> OperationResult {
		let request = gateway::create_request(
			self,
			MockRequest::new(self.http.clone(), operation),
			parameters,
		)?;
		Ok(Box::new(request))
	}
}

impl Gateway for MockAccountGateway {
	fn name(&self) -> &str {
		"Mock Accounts"
	}

	fn default_parameters(&self) -> ParameterBag {
		ParameterBag::new()
			.with("apiKey", "")
			.with("testMode", false)
	}

	fn parameters(&self) -> &ParameterBag {
		&self.parameters
	}

	fn parameters_mut(&mut self) -> &mut ParameterBag {
		&mut self.parameters
	}

	fn find(&self) -> Option<&dyn gateway::Find> {
		Some(self)
	}

	fn create(&self) -> Option<&dyn gateway::Create> {
		Some(self)
	}

	fn delete(&self) -> Option<&dyn gateway::Delete> {
		Some(self)
	}
}

impl AccountGatewayMarker for MockAccountGateway {}

impl gateway::Find for MockAccountGateway {
	fn request(&self, parameters: &ParameterBag) -> OperationResult {
		self.build_request(Operation::Find, parameters)
	}
}

impl gateway::Create for MockAccountGateway {
	fn request(&self, parameters: &ParameterBag) -> OperationResult {
		self.build_request(Operation::Create, parameters)
	}
}

impl gateway::Delete for MockAccountGateway {
	fn request(&self, parameters: &ParameterBag) -> OperationResult {
		self.build_request(Operation::Delete, parameters)
	}
}

/// One mock gateway operation.
pub struct MockRequest {
	core: RequestCore,
	operation: Operation,
}

impl MockRequest {
	fn new(http: HttpClient, operation: Operation) -> Self {
		// Void carries no amount of its own, so a zero amount is fine there.
		let policy = match operation {
			Operation::Void => MoneyPolicy {
				zero_allowed: true,
				negative_allowed: false,
			},
			_ => MoneyPolicy::default(),
		};
		Self {
			core: RequestCore::with_policy(http, policy),
			operation,
		}
	}

	fn endpoint(&self) -> String {
		format!("{BASE_URL}/{}", self.operation.name())
	}
}

impl Request for MockRequest {
	fn core(&self) -> &RequestCore {
		&self.core
	}

	fn core_mut(&mut self) -> &mut RequestCore {
		&mut self.core
	}

	fn data(&self) -> Result<Value, GatewayError> {
		let mut data = json!({});

		match self.operation {
			Operation::Authorize | Operation::Purchase => {
				self.core.validate(&["amount", "currency"])?;
				if let Some(card) = self.core.card() {
					card.validate()?;
					data["card"] = json!({
						"number": card.masked_number(),
						"expiryMonth": card.expiry_month,
						"expiryYear": card.expiry_year,
					});
				}
				data["amount"] = json!(self.core.amount()?);
				data["currency"] = json!(self.core.currency());
			}
			Operation::Refund => {
				self.core.validate(&["transactionReference", "amount", "currency"])?;
				data["transactionReference"] = json!(self.core.transaction_reference());
				data["amount"] = json!(self.core.amount()?);
				data["currency"] = json!(self.core.currency());
			}
			Operation::Void => {
				self.core.validate(&["transactionReference"])?;
				data["transactionReference"] = json!(self.core.transaction_reference());
			}
			Operation::CreateCard => {
				let card = self.core.card().ok_or_else(|| {
					GatewayError::InvalidRequest("The card parameter is required".to_string())
				})?;
				card.validate()?;
				data["card"] = json!({
					"number": card.masked_number(),
					"expiryMonth": card.expiry_month,
					"expiryYear": card.expiry_year,
				});
			}
			Operation::Find | Operation::Delete => {
				self.core.validate(&["accountReference"])?;
				data["accountReference"] = self
					.core
					.parameter("accountReference")
					.cloned()
					.unwrap_or(Value::Null);
			}
			Operation::Create => {
				for (key, value) in self.core.parameters().iter() {
					data[key] = value.clone();
				}
			}
			_ => {
				return Err(GatewayError::InvalidRequest(format!(
					"The {} operation is not supported",
					self.operation.name()
				)));
			}
		}

		if let Some(description) = self.core.description() {
			data["description"] = json!(description);
		}
		if let Some(transaction_id) = self.core.transaction_id() {
			data["transactionId"] = json!(transaction_id);
		}

		Ok(data)
	}

	fn send_data(&mut self, data: Value) -> Result<Arc<dyn Response>, GatewayError> {
		let response = self.core.http().post(
			&self.endpoint(),
			[("content-type", "application/json")],
			Body::from(&data),
		)?;

		if response.status() == http::StatusCode::NOT_FOUND {
			return Err(GatewayError::not_found());
		}

		let payload = response.json()?;
		Ok(Arc::new(MockResponse::new(payload)))
	}
}

/// A decoded mock gateway response.
pub struct MockResponse {
	data: Value,
}

impl MockResponse {
	pub fn new(data: Value) -> Self {
		Self { data }
	}

	fn field(&self, key: &str) -> Option<String> {
		self.data.get(key).and_then(Value::as_str).map(String::from)
	}
}

impl Response for MockResponse {
	fn data(&self) -> &Value {
		&self.data
	}

	fn is_successful(&self) -> bool {
		self.data
			.get("success")
			.and_then(Value::as_bool)
			.unwrap_or(false)
	}

	fn is_redirect(&self) -> bool {
		self.data.get("redirectUrl").is_some()
	}

	fn message(&self) -> Option<String> {
		self.field("message")
	}

	fn code(&self) -> Option<String> {
		self.field("code")
	}

	fn transaction_reference(&self) -> Option<String> {
		self.field("transactionReference")
	}
}

fn mock_gateway_factory(client: Option<HttpClient>) -> Box<dyn Gateway> {
	Box::new(MockGateway::new(client.unwrap_or_default()))
}

fn mock_account_gateway_factory(client: Option<HttpClient>) -> Box<dyn Gateway> {
	Box::new(MockAccountGateway::new(client.unwrap_or_default()))
}

#[distributed_slice(GATEWAYS)]
static MOCK_GATEWAY: GatewayEntry = GatewayEntry {
	qualified_name: "\\Passerelle\\Mock\\Gateway",
	factory: mock_gateway_factory,
};

#[distributed_slice(GATEWAYS)]
static MOCK_ACCOUNT_GATEWAY: GatewayEntry = GatewayEntry {
	qualified_name: "\\Passerelle\\Mock\\Account\\Gateway",
	factory: mock_account_gateway_factory,
};

#[cfg(test)]
mod tests {
	use super::*;
	use crate::MockTransport;
	use std::sync::Arc as StdArc;

	fn client_with(transport: &StdArc<MockTransport>) -> HttpClient {
		HttpClient::new(StdArc::clone(transport) as StdArc<dyn passerelle_http::Transport>)
	}

	#[test]
	fn purchase_round_trip() {
		let transport = StdArc::new(MockTransport::new());
		let reference = transport.enqueue_approval();
		let gateway = MockGateway::new(client_with(&transport));

		let mut request = gateway
			.purchase()
			.unwrap()
			.request(
				&ParameterBag::new()
					.with("amount", "10.00")
					.with("currency", "USD"),
			)
			.unwrap();
		let response = request.send().unwrap();

		assert!(response.is_successful());
		assert_eq!(response.transaction_reference(), Some(reference));
		assert_eq!(transport.request_count(), 1);
		let sent = &transport.requests()[0];
		assert!(sent.uri.ends_with("/purchase"));
	}

	#[test]
	fn declined_purchase_is_unsuccessful_not_an_error() {
		let transport = StdArc::new(MockTransport::new());
		transport.enqueue_decline("Insufficient funds");
		let gateway = MockGateway::new(client_with(&transport));

		let mut request = gateway
			.purchase()
			.unwrap()
			.request(
				&ParameterBag::new()
					.with("amount", "10.00")
					.with("currency", "USD"),
			)
			.unwrap();
		let response = request.send().unwrap();

		assert!(!response.is_successful());
		assert_eq!(response.message().as_deref(), Some("Insufficient funds"));
		assert_eq!(response.code().as_deref(), Some("card_declined"));
	}

	#[test]
	fn missing_amount_fails_before_the_transport() {
		let transport = StdArc::new(MockTransport::new());
		let gateway = MockGateway::new(client_with(&transport));

		let mut request = gateway
			.purchase()
			.unwrap()
			.request(&ParameterBag::new().with("currency", "USD"))
			.unwrap();
		let err = request.send().err().unwrap();

		assert_eq!(err.to_string(), "The amount parameter is required");
		assert_eq!(transport.request_count(), 0);
	}

	#[test]
	fn network_failure_carries_the_outbound_request() {
		let transport = StdArc::new(MockTransport::new());
		transport.enqueue_network_failure("connection refused");
		let gateway = MockGateway::new(client_with(&transport));

		let mut request = gateway
			.void()
			.unwrap()
			.request(&ParameterBag::new().with("transactionReference", "txn_1"))
			.unwrap();
		let err = request.send().err().unwrap();

		match err {
			GatewayError::Http(http_err) => {
				assert!(http_err.is_network());
				let outbound = http_err.request().unwrap();
				assert!(outbound.uri().to_string().ends_with("/void"));
			}
			other => panic!("expected a transport error, got {other}"),
		}
	}

	#[test]
	fn find_translates_missing_accounts() {
		let transport = StdArc::new(MockTransport::new());
		transport.enqueue_response(http::StatusCode::NOT_FOUND, r#"{"error":"missing"}"#);
		let gateway = MockAccountGateway::new(client_with(&transport));

		let mut request = gateway
			.find()
			.unwrap()
			.request(&ParameterBag::new().with("accountReference", "acct_404"))
			.unwrap();
		let err = request.send().err().unwrap();

		assert!(matches!(err, GatewayError::NotFound(_)));
		assert_eq!(err.to_string(), "Resource not found on payment gateway");
	}

	#[test]
	fn gateway_capabilities_match_implementations() {
		let gateway = MockGateway::new(HttpClient::default());
		assert!(gateway.supports(Operation::Purchase));
		assert!(gateway.supports(Operation::Void));
		assert!(!gateway.supports(Operation::Find));

		let accounts = MockAccountGateway::new(HttpClient::default());
		assert!(accounts.supports(Operation::Find));
		assert!(!accounts.supports(Operation::Purchase));
	}

	#[test]
	fn gateway_parameters_flow_into_requests() {
		let transport = StdArc::new(MockTransport::new());
		let mut gateway = MockGateway::new(client_with(&transport));
		gateway.initialize(
			&ParameterBag::new()
				.with("apiKey", "sk_test")
				.with("currency", "EUR"),
		);

		let request = gateway
			.purchase()
			.unwrap()
			.request(&ParameterBag::new().with("amount", "5.00"))
			.unwrap();
		assert_eq!(request.core().currency().as_deref(), Some("EUR"));
		assert_eq!(
			request.core().parameter("apiKey"),
			Some(&serde_json::json!("sk_test"))
		);
	}
}
