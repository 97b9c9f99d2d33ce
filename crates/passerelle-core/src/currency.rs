//! Currency reference data.
//!
//! The lookup table is embedded at compile time and never mutated. Repeated
//! lookups of the same code yield value-equal `Currency` objects.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// An ISO 4217 currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
	code: &'static str,
	numeric: Option<&'static str>,
	decimals: u32,
}

impl Currency {
	/// The three-letter code.
	pub fn code(&self) -> &'static str {
		self.code
	}

	/// The numeric ISO code, if the currency has one.
	pub fn numeric(&self) -> Option<&'static str> {
		self.numeric
	}

	/// The number of minor-unit decimal places.
	pub fn decimals(&self) -> u32 {
		self.decimals
	}

	/// Finds a currency by code, case-insensitively.
	pub fn find(code: &str) -> Option<Currency> {
		INDEX.get(code.to_uppercase().as_str()).copied()
	}

	/// All supported currencies, in table order.
	pub fn all() -> &'static [Currency] {
		TABLE
	}
}

/// The number of decimal places for a currency code.
///
/// Unknown codes are assumed to have two decimal places.
pub fn decimal_places(code: &str) -> u32 {
	Currency::find(code).map_or(2, |c| c.decimals)
}

static INDEX: Lazy<HashMap<&'static str, Currency>> =
	Lazy::new(|| TABLE.iter().map(|c| (c.code, *c)).collect());

const fn c(code: &'static str, numeric: Option<&'static str>, decimals: u32) -> Currency {
	Currency {
		code,
		numeric,
		decimals,
	}
}

static TABLE: &[Currency] = &[
	c("AED", Some("784"), 2),
	c("AFN", Some("971"), 2),
	c("ALL", Some("008"), 2),
	c("AMD", Some("051"), 2),
	c("ANG", Some("532"), 2),
	c("AOA", Some("973"), 2),
	c("ARS", Some("032"), 2),
	c("AUD", Some("036"), 2),
	c("AWG", Some("533"), 2),
	c("AZN", Some("944"), 2),
	c("BAM", Some("977"), 2),
	c("BBD", Some("052"), 2),
	c("BDT", Some("050"), 2),
	c("BGN", Some("975"), 2),
	c("BHD", Some("048"), 3),
	c("BIF", Some("108"), 0),
	c("BMD", Some("060"), 2),
	c("BND", Some("096"), 2),
	c("BOB", Some("068"), 2),
	c("BRL", Some("986"), 2),
	c("BSD", Some("044"), 2),
	c("BTC", None, 8),
	c("BTN", Some("064"), 2),
	c("BWP", Some("072"), 2),
	c("BYR", Some("974"), 0),
	c("BZD", Some("084"), 2),
	c("CAD", Some("124"), 2),
	c("CDF", Some("976"), 2),
	c("CHF", Some("756"), 2),
	c("CLP", Some("152"), 0),
	c("CNY", Some("156"), 2),
	c("COP", Some("170"), 2),
	c("CRC", Some("188"), 2),
	c("CUC", Some("931"), 2),
	c("CUP", Some("192"), 2),
	c("CVE", Some("132"), 2),
	c("CZK", Some("203"), 2),
	c("DJF", Some("262"), 0),
	c("DKK", Some("208"), 2),
	c("DOP", Some("214"), 2),
	c("DZD", Some("012"), 2),
	c("EGP", Some("818"), 2),
	c("ERN", Some("232"), 2),
	c("ETB", Some("230"), 2),
	c("EUR", Some("978"), 2),
	c("FJD", Some("242"), 2),
	c("FKP", Some("238"), 2),
	c("GBP", Some("826"), 2),
	c("GEL", Some("981"), 2),
	c("GHS", Some("936"), 2),
	c("GIP", Some("292"), 2),
	c("GMD", Some("270"), 2),
	c("GNF", Some("324"), 0),
	c("GTQ", Some("320"), 2),
	c("GYD", Some("328"), 2),
	c("HKD", Some("344"), 2),
	c("HNL", Some("340"), 2),
	c("HRK", Some("191"), 2),
	c("HTG", Some("332"), 2),
	c("HUF", Some("348"), 2),
	c("IDR", Some("360"), 2),
	c("ILS", Some("376"), 2),
	c("INR", Some("356"), 2),
	c("IQD", Some("368"), 3),
	c("IRR", Some("364"), 2),
	c("ISK", Some("352"), 0),
	c("JMD", Some("388"), 2),
	c("JOD", Some("400"), 3),
	c("JPY", Some("392"), 0),
	c("KES", Some("404"), 2),
	c("KGS", Some("417"), 2),
	c("KHR", Some("116"), 2),
	c("KMF", Some("174"), 0),
	c("KPW", Some("408"), 2),
	c("KRW", Some("410"), 0),
	c("KWD", Some("414"), 3),
	c("KYD", Some("136"), 2),
	c("KZT", Some("398"), 2),
	c("LAK", Some("418"), 0),
	c("LBP", Some("422"), 2),
	c("LKR", Some("144"), 2),
	c("LRD", Some("430"), 2),
	c("LSL", Some("426"), 2),
	c("LYD", Some("434"), 3),
	c("MAD", Some("504"), 2),
	c("MDL", Some("498"), 2),
	c("MGA", Some("969"), 0),
	c("MKD", Some("807"), 2),
	c("MMK", Some("104"), 2),
	c("MNT", Some("496"), 2),
	c("MOP", Some("446"), 2),
	c("MRO", Some("478"), 0),
	c("MUR", Some("480"), 2),
	c("MVR", Some("462"), 2),
	c("MWK", Some("454"), 2),
	c("MXN", Some("484"), 2),
	c("MYR", Some("458"), 2),
	c("MZN", Some("943"), 2),
	c("NAD", Some("516"), 2),
	c("NGN", Some("566"), 2),
	c("NIO", Some("558"), 2),
	c("NOK", Some("578"), 2),
	c("NPR", Some("524"), 2),
	c("NZD", Some("554"), 2),
	c("OMR", Some("512"), 3),
	c("PAB", Some("590"), 2),
	c("PEN", Some("604"), 2),
	c("PGK", Some("598"), 2),
	c("PHP", Some("608"), 2),
	c("PKR", Some("586"), 2),
	c("PLN", Some("985"), 2),
	c("PYG", Some("600"), 0),
	c("QAR", Some("634"), 2),
	c("RON", Some("946"), 2),
	c("RSD", Some("941"), 0),
	c("RUB", Some("643"), 2),
	c("RWF", Some("646"), 0),
	c("SAR", Some("682"), 2),
	c("SBD", Some("090"), 2),
	c("SCR", Some("690"), 2),
	c("SDG", Some("938"), 2),
	c("SEK", Some("752"), 2),
	c("SGD", Some("702"), 2),
	c("SHP", Some("654"), 2),
	c("SLL", Some("694"), 2),
	c("SOS", Some("706"), 2),
	c("SRD", Some("968"), 2),
	c("SSP", Some("728"), 2),
	c("STD", Some("678"), 2),
	c("SYP", Some("760"), 2),
	c("SZL", Some("748"), 2),
	c("THB", Some("764"), 2),
	c("TJS", Some("972"), 2),
	c("TMT", Some("934"), 2),
	c("TND", Some("788"), 3),
	c("TOP", Some("776"), 2),
	c("TRY", Some("949"), 2),
	c("TTD", Some("780"), 2),
	c("TWD", Some("901"), 2),
	c("TZS", Some("834"), 2),
	c("UAH", Some("980"), 2),
	c("UGX", Some("800"), 0),
	c("USD", Some("840"), 2),
	c("UYU", Some("858"), 2),
	c("UZS", Some("860"), 2),
	c("VEF", Some("937"), 2),
	c("VND", Some("704"), 0),
	c("VUV", Some("548"), 0),
	c("WST", Some("882"), 2),
	c("XAF", Some("950"), 0),
	c("XCD", Some("951"), 2),
	c("XOF", Some("952"), 0),
	c("XPF", Some("953"), 0),
	c("YER", Some("886"), 2),
	c("ZAR", Some("710"), 2),
	c("ZMW", Some("967"), 2),
];

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn find_is_case_insensitive() {
		let upper = Currency::find("USD").unwrap();
		let lower = Currency::find("usd").unwrap();
		assert_eq!(upper, lower);
		assert_eq!(upper.code(), "USD");
		assert_eq!(upper.numeric(), Some("840"));
		assert_eq!(upper.decimals(), 2);
	}

	#[test]
	fn unknown_code_is_absent() {
		assert!(Currency::find("XYZ").is_none());
	}

	#[test]
	fn unknown_code_defaults_to_two_decimals() {
		assert_eq!(decimal_places("XYZ"), 2);
	}

	#[test]
	fn minor_unit_counts_vary_by_currency() {
		assert_eq!(decimal_places("JPY"), 0);
		assert_eq!(decimal_places("BHD"), 3);
		assert_eq!(decimal_places("BTC"), 8);
	}

	#[test]
	fn bitcoin_has_no_numeric_code() {
		assert_eq!(Currency::find("BTC").unwrap().numeric(), None);
	}

	#[test]
	fn repeated_lookups_are_value_equal() {
		assert_eq!(Currency::find("EUR"), Currency::find("EUR"));
	}

	#[test]
	fn table_codes_are_unique() {
		let mut seen = std::collections::HashSet::new();
		for currency in Currency::all() {
			assert!(seen.insert(currency.code()), "duplicate {}", currency.code());
		}
	}
}
