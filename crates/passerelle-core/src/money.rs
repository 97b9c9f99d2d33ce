//! Monetary amount normalization.
//!
//! Amounts arrive in three shapes: an integer already in minor units, a
//! decimal string, or a pre-built [`Money`] value. All three converge on the
//! same minor-unit integer for equivalent values. Decimal strings with more
//! fractional digits than the currency supports are rejected rather than
//! rounded.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::decimal_places;
use crate::error::GatewayError;

/// An amount of money in a currency's minor units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
	minor_units: i64,
	currency: String,
}

impl Money {
	/// Creates a money value; the code is uppercased.
	pub fn new(minor_units: i64, currency: &str) -> Self {
		Self {
			minor_units,
			currency: currency.to_uppercase(),
		}
	}

	pub fn minor_units(&self) -> i64 {
		self.minor_units
	}

	pub fn currency(&self) -> &str {
		&self.currency
	}

	/// The decimal-string rendition honoring the currency's precision.
	pub fn format(&self) -> String {
		format(self.minor_units, &self.currency)
	}
}

/// An amount in one of the accepted input shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum Amount {
	/// Already in minor units.
	Integer(i64),
	/// A decimal string, e.g. `"10.00"`.
	Decimal(String),
	/// A pre-built money value.
	Money(Money),
}

impl From<i64> for Amount {
	fn from(value: i64) -> Self {
		Self::Integer(value)
	}
}

impl From<&str> for Amount {
	fn from(value: &str) -> Self {
		Self::Decimal(value.to_string())
	}
}

impl From<Money> for Amount {
	fn from(value: Money) -> Self {
		Self::Money(value)
	}
}

/// Zero- and negative-amount policy, configurable per request type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoneyPolicy {
	pub zero_allowed: bool,
	pub negative_allowed: bool,
}

impl Default for MoneyPolicy {
	fn default() -> Self {
		Self {
			zero_allowed: false,
			negative_allowed: false,
		}
	}
}

/// Converts an amount to minor units for the given currency, enforcing
/// precision and sign rules.
pub fn to_minor_units(
	amount: &Amount,
	currency: &str,
	policy: MoneyPolicy,
) -> Result<i64, GatewayError> {
	let minor = match amount {
		Amount::Integer(value) => *value,
		Amount::Money(money) => money.minor_units(),
		Amount::Decimal(text) => parse_decimal(text, currency)?,
	};

	if !policy.negative_allowed && minor < 0 {
		return Err(GatewayError::InvalidRequest(
			"A negative amount is not allowed.".to_string(),
		));
	}
	if !policy.zero_allowed && minor == 0 {
		return Err(GatewayError::InvalidRequest(
			"A zero amount is not allowed.".to_string(),
		));
	}

	Ok(minor)
}

/// Formats minor units as a decimal string with the currency's precision.
pub fn format(minor_units: i64, currency: &str) -> String {
	let decimals = decimal_places(currency);
	Decimal::new(minor_units, decimals).to_string()
}

fn parse_decimal(text: &str, currency: &str) -> Result<i64, GatewayError> {
	let value = Decimal::from_str(text.trim())
		.map_err(|_| GatewayError::InvalidRequest(format!("Invalid amount '{text}'.")))?;

	// The supplied scale, trailing zeros included, must fit the currency;
	// anything finer would be silently truncated otherwise.
	let decimals = decimal_places(currency);
	if value.scale() > decimals {
		return Err(GatewayError::InvalidRequest(
			"Amount precision is too high for currency.".to_string(),
		));
	}

	let scaled = value * Decimal::from(10_i64.pow(decimals));
	scaled.to_i64().ok_or_else(|| {
		GatewayError::InvalidRequest(format!("Amount '{text}' is out of range."))
	})
}
