//! Gateway registration and instantiation.
//!
//! Gateways announce themselves at link time through [`GATEWAYS`]; a
//! [`GatewayRegistry`] seeds its factory table from that slice and can be
//! extended at runtime with [`GatewayRegistry::bind`]. The registry also
//! keeps an ordered list of display names, separate from the factory table,
//! mirroring how merchants enumerate the gateways they have enabled.

use std::collections::HashMap;

use linkme::distributed_slice;
use passerelle_http::HttpClient;

use crate::error::GatewayError;
use crate::gateway::Gateway;
use crate::resolve;

/// Builds a gateway, using the given client or a default one.
pub type GatewayFactory = fn(Option<HttpClient>) -> Box<dyn Gateway>;

/// A link-time gateway registration.
pub struct GatewayEntry {
	/// Fully-qualified identity, e.g. `"\\Passerelle\\Stripe\\Gateway"`.
	pub qualified_name: &'static str,
	pub factory: GatewayFactory,
}

/// Every gateway compiled into the final binary.
#[distributed_slice]
pub static GATEWAYS: [GatewayEntry];

/// An ordered gateway catalogue plus a factory table.
pub struct GatewayRegistry {
	names: Vec<String>,
	factories: HashMap<String, GatewayFactory>,
}

impl GatewayRegistry {
	/// A registry seeded with every link-time registration.
	pub fn new() -> Self {
		let mut factories = HashMap::new();
		for entry in GATEWAYS {
			factories.insert(entry.qualified_name.to_string(), entry.factory);
		}
		Self {
			names: Vec::new(),
			factories,
		}
	}

	/// The registered display names, in registration order.
	pub fn all(&self) -> &[String] {
		&self.names
	}

	/// Adds a display name; registering a name twice is a no-op.
	pub fn register(&mut self, name: &str) {
		if !self.names.iter().any(|n| n == name) {
			self.names.push(name.to_string());
		}
	}

	/// Replaces the display-name list wholesale.
	pub fn replace(&mut self, names: Vec<String>) {
		self.names = names;
	}

	/// Binds a factory under a fully-qualified identity, shadowing any
	/// link-time registration with the same identity.
	pub fn bind(&mut self, qualified_name: &str, factory: GatewayFactory) {
		self.factories.insert(qualified_name.to_string(), factory);
	}

	/// Instantiates a gateway by short name or fully-qualified identity.
	pub fn create(
		&self,
		name: &str,
		client: Option<HttpClient>,
	) -> Result<Box<dyn Gateway>, GatewayError> {
		self.instantiate(resolve::gateway_class_name(name), client)
	}

	/// Instantiates the account-scoped variant of a gateway.
	pub fn account(
		&self,
		name: &str,
		client: Option<HttpClient>,
	) -> Result<Box<dyn Gateway>, GatewayError> {
		self.instantiate(resolve::account_gateway_class_name(name), client)
	}

	/// Instantiates the user-scoped variant of a gateway.
	pub fn user(
		&self,
		name: &str,
		client: Option<HttpClient>,
	) -> Result<Box<dyn Gateway>, GatewayError> {
		self.instantiate(resolve::user_gateway_class_name(name), client)
	}

	fn instantiate(
		&self,
		class_name: String,
		client: Option<HttpClient>,
	) -> Result<Box<dyn Gateway>, GatewayError> {
		let factory = self.factories.get(&class_name).ok_or_else(|| {
			GatewayError::InvalidState(format!("Gateway '{class_name}' not found"))
		})?;
		tracing::debug!(gateway = %class_name, "instantiating gateway");
		Ok(factory(client))
	}
}

impl Default for GatewayRegistry {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::params::ParameterBag;

	#[derive(Default)]
	struct StubGateway {
		parameters: ParameterBag,
	}

	impl Gateway for StubGateway {
		fn name(&self) -> &str {
			"Stub"
		}

		fn parameters(&self) -> &ParameterBag {
			&self.parameters
		}

		fn parameters_mut(&mut self) -> &mut ParameterBag {
			&mut self.parameters
		}
	}

	fn stub_factory(_client: Option<HttpClient>) -> Box<dyn Gateway> {
		Box::<StubGateway>::default()
	}

	#[test]
	fn create_resolves_short_names() {
		let mut registry = GatewayRegistry::new();
		registry.bind("\\Passerelle\\Stub\\Gateway", stub_factory);
		let gateway = registry.create("Stub", None).unwrap();
		assert_eq!(gateway.name(), "Stub");
	}

	#[test]
	fn create_accepts_fully_qualified_identities() {
		let mut registry = GatewayRegistry::new();
		registry.bind("\\Custom\\Gateway", stub_factory);
		assert!(registry.create("\\Custom\\Gateway", None).is_ok());
	}

	#[test]
	fn unknown_gateway_reports_the_resolved_identity() {
		let registry = GatewayRegistry::new();
		let err = registry.create("Invalid", None).err().unwrap();
		assert_eq!(
			err.to_string(),
			"Gateway '\\Passerelle\\Invalid\\Gateway' not found"
		);
	}

	#[test]
	fn scoped_lookups_resolve_their_own_identities() {
		let mut registry = GatewayRegistry::new();
		registry.bind("\\Passerelle\\Stub\\Account\\Gateway", stub_factory);
		registry.bind("\\Passerelle\\Stub\\User\\Gateway", stub_factory);
		assert!(registry.account("Stub", None).is_ok());
		assert!(registry.user("Stub", None).is_ok());
		// The plain identity was never bound.
		assert!(registry.create("Stub", None).is_err());
	}

	#[test]
	fn register_preserves_order_and_deduplicates() {
		let mut registry = GatewayRegistry::new();
		registry.register("Stripe");
		registry.register("PayPal_Express");
		registry.register("Stripe");
		assert_eq!(registry.all(), ["Stripe", "PayPal_Express"]);
	}

	#[test]
	fn replace_overwrites_the_catalogue() {
		let mut registry = GatewayRegistry::new();
		registry.register("Stripe");
		registry.replace(vec!["Mock".to_string()]);
		assert_eq!(registry.all(), ["Mock"]);
	}
}
