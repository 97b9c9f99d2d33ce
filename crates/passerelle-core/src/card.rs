//! Credit card value object.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Billing or shipping address block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
	pub first_name: Option<String>,
	pub last_name: Option<String>,
	pub company: Option<String>,
	pub address1: Option<String>,
	pub address2: Option<String>,
	pub city: Option<String>,
	pub postcode: Option<String>,
	pub state: Option<String>,
	pub country: Option<String>,
	pub phone: Option<String>,
}

/// A credit card.
///
/// `Debug` output masks the card number and omits the CVV so card data never
/// leaks into logs.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditCard {
	pub number: Option<String>,
	pub expiry_month: Option<u32>,
	pub expiry_year: Option<u32>,
	pub cvv: Option<String>,
	pub holder_name: Option<String>,
	pub billing_address: Option<Address>,
	pub shipping_address: Option<Address>,
}

impl std::fmt::Debug for CreditCard {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CreditCard")
			.field("number", &self.masked_number())
			.field("expiry_month", &self.expiry_month)
			.field("expiry_year", &self.expiry_year)
			.field("holder_name", &self.holder_name)
			.finish_non_exhaustive()
	}
}

impl CreditCard {
	/// The last four digits of the card number.
	pub fn number_last_four(&self) -> Option<&str> {
		self.number
			.as_deref()
			.filter(|n| n.len() >= 4)
			.map(|n| &n[n.len() - 4..])
	}

	/// The card number with all but the last four digits masked.
	pub fn masked_number(&self) -> Option<String> {
		let number = self.number.as_deref()?;
		if number.len() < 4 {
			return Some("X".repeat(number.len()));
		}
		let (masked, visible) = number.split_at(number.len() - 4);
		Some(format!("{}{}", "X".repeat(masked.len()), visible))
	}

	/// True when the expiry date lies in the past.
	pub fn is_expired(&self) -> bool {
		let (Some(month), Some(year)) = (self.expiry_month, self.expiry_year) else {
			return false;
		};
		let now = Utc::now();
		year < now.year() as u32 || (year == now.year() as u32 && month < now.month())
	}

	/// Validates the card fields.
	///
	/// Checks that the number, expiry and CVV are present, that the number is
	/// numeric and passes the Luhn check, and that the expiry is a real month
	/// that has not passed.
	pub fn validate(&self) -> Result<(), GatewayError> {
		let number = self
			.number
			.as_deref()
			.ok_or_else(|| GatewayError::InvalidCard("Card number is required".to_string()))?;

		if !number.chars().all(|c| c.is_ascii_digit()) || !(12..=19).contains(&number.len()) {
			return Err(GatewayError::InvalidCard(
				"Card number should have 12 to 19 digits".to_string(),
			));
		}
		if !validate_luhn(number) {
			return Err(GatewayError::InvalidCard(
				"Card number is invalid".to_string(),
			));
		}

		let month = self.expiry_month.ok_or_else(|| {
			GatewayError::InvalidCard("Expiry month is required".to_string())
		})?;
		if !(1..=12).contains(&month) {
			return Err(GatewayError::InvalidCard(
				"Expiry month is invalid".to_string(),
			));
		}
		if self.expiry_year.is_none() {
			return Err(GatewayError::InvalidCard(
				"Expiry year is required".to_string(),
			));
		}
		if self.is_expired() {
			return Err(GatewayError::InvalidCard("Card has expired".to_string()));
		}

		if self.cvv.is_none() {
			return Err(GatewayError::InvalidCard("CVV is required".to_string()));
		}

		Ok(())
	}
}

/// Validates a card number with the Luhn algorithm.
pub fn validate_luhn(number: &str) -> bool {
	let mut sum = 0u32;
	for (i, ch) in number.chars().rev().enumerate() {
		let Some(digit) = ch.to_digit(10) else {
			return false;
		};
		let digit = if i % 2 == 1 {
			let doubled = digit * 2;
			if doubled > 9 { doubled - 9 } else { doubled }
		} else {
			digit
		};
		sum += digit;
	}
	sum % 10 == 0
}
