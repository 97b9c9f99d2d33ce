use std::sync::Arc;

use passerelle_http::HttpClient;
use serde_json::Value;

use crate::card::CreditCard;
use crate::currency::{self, Currency};
use crate::error::GatewayError;
use crate::item::{Item, ItemBag};
use crate::money::{self, Amount, Money, MoneyPolicy};
use crate::params::ParameterBag;

use super::Response;

const SENT_MESSAGE: &str = "Request cannot be modified after it has been sent!";
const UNSENT_MESSAGE: &str = "You must call send() before accessing the Response!";

/// A request goes through three phases: configure parameters, send exactly
/// once, then read the attached response. `RequestCore` enforces the phase
/// invariants and supplies the typed parameter accessors; concrete requests
/// embed one and add their wire format on top.
pub struct RequestCore {
	parameters: ParameterBag,
	http: HttpClient,
	response: Option<Arc<dyn Response>>,
	money_policy: MoneyPolicy,
}

macro_rules! string_parameter {
	($(#[$doc:meta])* $get:ident, $set:ident, $key:literal) => {
		$(#[$doc])*
		pub fn $get(&self) -> Option<&str> {
			self.parameter($key).and_then(Value::as_str)
		}

		pub fn $set(&mut self, value: &str) -> Result<(), GatewayError> {
			self.set_parameter($key, value)
		}
	};
}

impl RequestCore {
	pub fn new(http: HttpClient) -> Self {
		Self::with_policy(http, MoneyPolicy::default())
	}

	/// A core whose amount handling follows the given sign policy. Void and
	/// fetch requests, for instance, accept a zero amount.
	pub fn with_policy(http: HttpClient, money_policy: MoneyPolicy) -> Self {
		Self {
			parameters: ParameterBag::new(),
			http,
			response: None,
			money_policy,
		}
	}

	pub fn http(&self) -> &HttpClient {
		&self.http
	}

	pub fn money_policy(&self) -> MoneyPolicy {
		self.money_policy
	}

	pub fn set_money_policy(&mut self, policy: MoneyPolicy) {
		self.money_policy = policy;
	}

	fn ensure_unsent(&self) -> Result<(), GatewayError> {
		if self.response.is_some() {
			return Err(GatewayError::InvalidState(SENT_MESSAGE.to_string()));
		}
		Ok(())
	}

	/// Replaces all parameters. Fails once the request has been sent.
	pub fn initialize(&mut self, parameters: &ParameterBag) -> Result<(), GatewayError> {
		self.ensure_unsent()?;
		let mut bag = ParameterBag::new();
		bag.initialize(&ParameterBag::new(), parameters);
		self.parameters = bag;
		Ok(())
	}

	pub fn set_parameter(
		&mut self,
		key: &str,
		value: impl Into<Value>,
	) -> Result<(), GatewayError> {
		self.ensure_unsent()?;
		self.parameters.set(key, value);
		Ok(())
	}

	pub fn parameter(&self, key: &str) -> Option<&Value> {
		self.parameters.get(key)
	}

	pub fn parameters(&self) -> &ParameterBag {
		&self.parameters
	}

	pub fn is_sent(&self) -> bool {
		self.response.is_some()
	}

	/// Records the outcome; a request is sent exactly once.
	pub fn attach_response(&mut self, response: Arc<dyn Response>) -> Result<(), GatewayError> {
		if self.response.is_some() {
			return Err(GatewayError::InvalidState(
				"Request has already been sent!".to_string(),
			));
		}
		self.response = Some(response);
		Ok(())
	}

	pub fn response(&self) -> Result<Arc<dyn Response>, GatewayError> {
		self.response
			.clone()
			.ok_or_else(|| GatewayError::InvalidState(UNSENT_MESSAGE.to_string()))
	}

	fn amount_input(&self) -> Option<Amount> {
		match self.parameter("amount")? {
			Value::String(text) => Some(Amount::Decimal(text.clone())),
			// Integers are minor units; anything else numeric goes through
			// the decimal path so precision rules still apply.
			Value::Number(number) => match number.as_i64() {
				Some(minor) => Some(Amount::Integer(minor)),
				None => Some(Amount::Decimal(number.to_string())),
			},
			value => serde_json::from_value::<Money>(value.clone())
				.ok()
				.map(Amount::Money),
		}
	}

	/// The normalized amount, or `None` when no amount is set. Equivalent
	/// inputs in any accepted shape normalize to the same value.
	pub fn money(&self) -> Result<Option<Money>, GatewayError> {
		let Some(amount) = self.amount_input() else {
			return Ok(None);
		};
		let currency = match &amount {
			Amount::Money(money) => money.currency().to_string(),
			_ => self.currency().unwrap_or_else(|| "USD".to_string()),
		};
		let minor = money::to_minor_units(&amount, &currency, self.money_policy)?;
		Ok(Some(Money::new(minor, &currency)))
	}

	/// The amount as a decimal string with the currency's precision.
	pub fn amount(&self) -> Result<Option<String>, GatewayError> {
		Ok(self.money()?.map(|m| m.format()))
	}

	/// The amount in minor units.
	pub fn amount_integer(&self) -> Result<Option<i64>, GatewayError> {
		Ok(self.money()?.map(|m| m.minor_units()))
	}

	pub fn set_amount(&mut self, value: &str) -> Result<(), GatewayError> {
		self.set_parameter("amount", value)
	}

	pub fn set_amount_integer(&mut self, value: i64) -> Result<(), GatewayError> {
		self.set_parameter("amount", value)
	}

	/// Sets both the amount and the currency from a money value.
	pub fn set_money(&mut self, money: &Money) -> Result<(), GatewayError> {
		self.ensure_unsent()?;
		self.parameters.set("currency", money.currency());
		self.parameters.set(
			"amount",
			serde_json::to_value(money).map_err(|e| GatewayError::InvalidRequest(e.to_string()))?,
		);
		Ok(())
	}

	/// The currency code, uppercased.
	pub fn currency(&self) -> Option<String> {
		self.parameter("currency")
			.and_then(Value::as_str)
			.map(str::to_uppercase)
	}

	pub fn set_currency(&mut self, value: &str) -> Result<(), GatewayError> {
		self.set_parameter("currency", value.to_uppercase())
	}

	/// The ISO 4217 numeric code for the configured currency. `None` for
	/// unknown codes and for currencies without one.
	pub fn currency_numeric(&self) -> Option<&'static str> {
		let code = self.currency()?;
		Currency::find(&code)?.numeric()
	}

	pub fn currency_decimal_places(&self) -> u32 {
		self.currency()
			.map(|code| currency::decimal_places(&code))
			.unwrap_or(2)
	}

	/// Normalizes a decimal string through the configured currency's
	/// precision and the request's sign policy.
	pub fn format_currency(&self, amount: &str) -> Result<String, GatewayError> {
		let currency = self.currency().unwrap_or_else(|| "USD".to_string());
		let minor = money::to_minor_units(
			&Amount::Decimal(amount.to_string()),
			&currency,
			self.money_policy,
		)?;
		Ok(money::format(minor, &currency))
	}

	pub fn card(&self) -> Option<CreditCard> {
		let value = self.parameter("card")?;
		serde_json::from_value(value.clone()).ok()
	}

	pub fn set_card(&mut self, card: &CreditCard) -> Result<(), GatewayError> {
		self.ensure_unsent()?;
		let value = serde_json::to_value(card)
			.map_err(|e| GatewayError::InvalidRequest(e.to_string()))?;
		self.parameters.set("card", value);
		Ok(())
	}

	pub fn items(&self) -> Option<ItemBag> {
		let value = self.parameter("items")?;
		let items: Vec<Item> = serde_json::from_value(value.clone()).ok()?;
		Some(items.into_iter().collect())
	}

	pub fn set_items(&mut self, items: &ItemBag) -> Result<(), GatewayError> {
		self.ensure_unsent()?;
		let value = serde_json::to_value(items.iter().collect::<Vec<_>>())
			.map_err(|e| GatewayError::InvalidRequest(e.to_string()))?;
		self.parameters.set("items", value);
		Ok(())
	}

	pub fn test_mode(&self) -> bool {
		self.parameter("testMode")
			.and_then(Value::as_bool)
			.unwrap_or(false)
	}

	pub fn set_test_mode(&mut self, value: bool) -> Result<(), GatewayError> {
		self.set_parameter("testMode", value)
	}

	string_parameter!(
		/// Gateway-issued token standing in for card data.
		token, set_token, "token"
	);
	string_parameter!(card_reference, set_card_reference, "cardReference");
	string_parameter!(
		/// The merchant's identifier for the transaction.
		transaction_id, set_transaction_id, "transactionId"
	);
	string_parameter!(
		/// The gateway's identifier for the transaction.
		transaction_reference, set_transaction_reference, "transactionReference"
	);
	string_parameter!(description, set_description, "description");
	string_parameter!(return_url, set_return_url, "returnUrl");
	string_parameter!(cancel_url, set_cancel_url, "cancelUrl");
	string_parameter!(notify_url, set_notify_url, "notifyUrl");
	string_parameter!(issuer, set_issuer, "issuer");
	string_parameter!(payment_method, set_payment_method, "paymentMethod");
	string_parameter!(client_ip, set_client_ip, "clientIp");

	/// Fails unless every named parameter is present.
	pub fn validate(&self, required: &[&str]) -> Result<(), GatewayError> {
		for key in required {
			if self.parameter(key).is_none() {
				return Err(GatewayError::InvalidRequest(format!(
					"The {key} parameter is required"
				)));
			}
		}
		Ok(())
	}
}

/// A single gateway operation.
///
/// Concrete requests implement [`Request::data`] to assemble their wire
/// payload and [`Request::send_data`] to dispatch it; the provided `send`
/// ties the two together and freezes the request.
pub trait Request: Send {
	fn core(&self) -> &RequestCore;

	fn core_mut(&mut self) -> &mut RequestCore;

	/// Assembles the outbound payload. Raises
	/// [`GatewayError::InvalidRequest`] when required parameters are missing
	/// or invalid, before anything touches the transport.
	fn data(&self) -> Result<Value, GatewayError>;

	/// Dispatches the payload and builds the response.
	fn send_data(&mut self, data: Value) -> Result<Arc<dyn Response>, GatewayError>;

	fn initialize(&mut self, parameters: &ParameterBag) -> Result<(), GatewayError> {
		self.core_mut().initialize(parameters)
	}

	/// Validates, dispatches, and freezes the request.
	fn send(&mut self) -> Result<Arc<dyn Response>, GatewayError> {
		self.core().ensure_unsent()?;
		let data = self.data()?;
		tracing::debug!(parameters = self.core().parameters().len(), "sending request");
		let response = self.send_data(data)?;
		self.core_mut().attach_response(Arc::clone(&response))?;
		Ok(response)
	}

	/// The response, once sent.
	fn response(&self) -> Result<Arc<dyn Response>, GatewayError> {
		self.core().response()
	}
}
