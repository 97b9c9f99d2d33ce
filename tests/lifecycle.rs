//! End-to-end checkout flows over the registry, mock gateways and the
//! scripted transport.

use std::sync::Arc;

use passerelle::gateway::{Find, Purchase, Refund};
use passerelle::{
	Gateway, GatewayError, GatewayRegistry, HttpClient, Money, Operation, ParameterBag, Request,
	Response, Transport,
};
use passerelle_mocks::MockTransport;
use serde_json::json;

fn scripted_client(transport: &Arc<MockTransport>) -> HttpClient {
	HttpClient::new(Arc::clone(transport) as Arc<dyn Transport>)
}

#[test]
fn registry_resolves_link_time_registrations() {
	let registry = GatewayRegistry::new();
	let gateway = registry.create("Mock", None).unwrap();
	assert_eq!(gateway.name(), "Mock");
	assert!(gateway.supports(Operation::Purchase));
}

#[test]
fn unknown_gateway_error_names_the_full_identity() {
	let registry = GatewayRegistry::new();
	let err = registry.create("Invalid", None).err().unwrap();
	assert_eq!(
		err.to_string(),
		"Gateway '\\Passerelle\\Invalid\\Gateway' not found"
	);
}

#[test]
fn purchase_flow_end_to_end() {
	let transport = Arc::new(MockTransport::new());
	let reference = transport.enqueue_approval();

	let registry = GatewayRegistry::new();
	let mut gateway = registry
		.create("Mock", Some(scripted_client(&transport)))
		.unwrap();
	gateway.initialize(&ParameterBag::new().with("apiKey", "sk_test").with("testMode", true));

	let purchase = gateway.purchase().unwrap();
	let mut request = purchase
		.request(
			&ParameterBag::new()
				.with("amount", "10.00")
				.with("currency", "USD")
				.with("description", "Order #42"),
		)
		.unwrap();

	assert!(request.core().test_mode());
	let response = request.send().unwrap();

	assert!(response.is_successful());
	assert_eq!(response.transaction_reference(), Some(reference));
	assert_eq!(response.message().as_deref(), Some("Approved"));

	// The request is frozen once sent, and the response stays readable.
	let err = request.core_mut().set_amount("20.00").unwrap_err();
	assert_eq!(
		err.to_string(),
		"Request cannot be modified after it has been sent!"
	);
	assert!(request.response().unwrap().is_successful());
}

#[test]
fn refund_reuses_the_purchase_reference() {
	let transport = Arc::new(MockTransport::new());
	let purchase_reference = transport.enqueue_approval();
	transport.enqueue_json(&json!({"success": true, "message": "Refunded"}));

	let registry = GatewayRegistry::new();
	let gateway = registry
		.create("Mock", Some(scripted_client(&transport)))
		.unwrap();

	let mut purchase = gateway
		.purchase()
		.unwrap()
		.request(
			&ParameterBag::new()
				.with("amount", "10.00")
				.with("currency", "USD"),
		)
		.unwrap();
	let reference = purchase.send().unwrap().transaction_reference().unwrap();
	assert_eq!(reference, purchase_reference);

	let mut refund = gateway
		.refund()
		.unwrap()
		.request(
			&ParameterBag::new()
				.with("transactionReference", reference.as_str())
				.with("amount", "10.00")
				.with("currency", "USD"),
		)
		.unwrap();
	let response = refund.send().unwrap();
	assert!(response.is_successful());
	assert_eq!(transport.request_count(), 2);
}

#[test]
fn money_value_configures_amount_and_currency_together() {
	let transport = Arc::new(MockTransport::new());
	transport.enqueue_approval();

	let registry = GatewayRegistry::new();
	let gateway = registry
		.create("Mock", Some(scripted_client(&transport)))
		.unwrap();

	let mut request = gateway
		.purchase()
		.unwrap()
		.request(&ParameterBag::new())
		.unwrap();
	request.core_mut().set_money(&Money::new(2500, "jpy")).unwrap();

	assert_eq!(request.core().currency().as_deref(), Some("JPY"));
	assert_eq!(request.core().amount().unwrap().as_deref(), Some("2500"));
	assert!(request.send().unwrap().is_successful());
}

#[test]
fn account_scoped_gateway_resolves_independently() {
	let registry = GatewayRegistry::new();

	let accounts = registry.account("Mock", None).unwrap();
	assert_eq!(accounts.name(), "Mock Accounts");
	assert!(accounts.supports(Operation::Find));
	assert!(!accounts.supports(Operation::Purchase));

	// No user-scoped variant is registered.
	let err = registry.user("Mock", None).err().unwrap();
	assert_eq!(
		err.to_string(),
		"Gateway '\\Passerelle\\Mock\\User\\Gateway' not found"
	);
}

#[test]
fn missing_account_surfaces_as_not_found() {
	let transport = Arc::new(MockTransport::new());
	transport.enqueue_response(http::StatusCode::NOT_FOUND, "{}");

	let registry = GatewayRegistry::new();
	let gateway = registry
		.account("Mock", Some(scripted_client(&transport)))
		.unwrap();

	let mut request = gateway
		.find()
		.unwrap()
		.request(&ParameterBag::new().with("accountReference", "acct_missing"))
		.unwrap();
	let err = request.send().err().unwrap();
	assert!(matches!(err, GatewayError::NotFound(_)));
}

#[test]
fn validation_failures_never_reach_the_wire() {
	let transport = Arc::new(MockTransport::new());

	let registry = GatewayRegistry::new();
	let gateway = registry
		.create("Mock", Some(scripted_client(&transport)))
		.unwrap();

	let mut request = gateway
		.purchase()
		.unwrap()
		.request(
			&ParameterBag::new()
				.with("amount", "10.005")
				.with("currency", "USD"),
		)
		.unwrap();
	let err = request.send().err().unwrap();
	assert_eq!(err.to_string(), "Amount precision is too high for currency.");
	assert_eq!(transport.request_count(), 0);
}
