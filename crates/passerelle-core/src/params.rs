//! The generic parameter bag shared by gateways and requests.

use serde_json::Value;

/// Converts a key to camelCase. Keys already in camelCase are not harmed.
///
/// Underscore-delimited keys are lowercased segment by segment before the
/// humps are applied, so `TEST_MODE`, `test_mode` and `testMode` all
/// normalize to `testMode`. The conversion is idempotent.
pub fn camel_case(input: &str) -> String {
	let lowered = if input.contains('_') {
		input.to_lowercase()
	} else {
		input.to_string()
	};

	let mut out = String::with_capacity(lowered.len());
	let mut chars = lowered.chars().peekable();
	while let Some(ch) = chars.next() {
		if ch == '_' {
			match chars.peek() {
				Some(next) if next.is_ascii_lowercase() => {
					out.push(next.to_ascii_uppercase());
					chars.next();
				}
				_ => out.push('_'),
			}
		} else {
			out.push(ch);
		}
	}
	out
}

/// An ordered, string-keyed parameter store.
///
/// Keys are normalized to camelCase on every write. Insertion order is
/// preserved and round-trips through [`ParameterBag::iter`]. The bag itself
/// is always mutable; the freeze-after-send rule is enforced by the owning
/// request, which gates every write.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterBag {
	entries: Vec<(String, Value)>,
}

impl ParameterBag {
	pub fn new() -> Self {
		Self::default()
	}

	/// Resets the bag, applying `defaults` first and `params` over the top.
	///
	/// A default whose value is an array is an enumerated choice; its first
	/// element becomes the effective default.
	pub fn initialize(&mut self, defaults: &ParameterBag, params: &ParameterBag) {
		self.entries.clear();
		for (key, value) in defaults.iter() {
			let value = match value {
				Value::Array(choices) => choices.first().cloned().unwrap_or(Value::Null),
				other => other.clone(),
			};
			self.set(key, value);
		}
		for (key, value) in params.iter() {
			self.set(key, value.clone());
		}
	}

	/// Sets a parameter, normalizing the key. Replaces in place when the key
	/// already exists so insertion order is stable.
	pub fn set(&mut self, key: &str, value: impl Into<Value>) {
		let key = camel_case(key);
		let value = value.into();
		match self.entries.iter_mut().find(|(k, _)| *k == key) {
			Some(entry) => entry.1 = value,
			None => self.entries.push((key, value)),
		}
	}

	/// Builder-style [`ParameterBag::set`].
	pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
		self.set(key, value);
		self
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		let key = camel_case(key);
		self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
	}

	pub fn contains(&self, key: &str) -> bool {
		self.get(key).is_some()
	}

	/// Entries in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.entries.iter().map(|(k, v)| (k.as_str(), v))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Applies every entry of `other` on top of this bag.
	pub fn merge(&mut self, other: &ParameterBag) {
		for (key, value) in other.iter() {
			self.set(key, value.clone());
		}
	}
}

impl<K: AsRef<str>, V: Into<Value>> FromIterator<(K, V)> for ParameterBag {
	fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
		let mut bag = Self::new();
		for (key, value) in iter {
			bag.set(key.as_ref(), value);
		}
		bag
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;
	use serde_json::json;

	use super::*;

	#[rstest]
	#[case("test_mode", "testMode")]
	#[case("TEST_MODE", "testMode")]
	#[case("testMode", "testMode")]
	#[case("currency", "currency")]
	#[case("return_url", "returnUrl")]
	fn keys_normalize_to_camel_case(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(camel_case(input), expected);
	}

	#[test]
	fn camel_case_is_idempotent() {
		let once = camel_case("transaction_reference");
		assert_eq!(camel_case(&once), once);
	}

	#[test]
	fn snake_and_camel_keys_address_the_same_slot() {
		let mut bag = ParameterBag::new();
		bag.set("test_mode", true);
		assert_eq!(bag.get("testMode"), Some(&json!(true)));
		bag.set("testMode", false);
		assert_eq!(bag.len(), 1);
	}

	#[test]
	fn insertion_order_round_trips() {
		let bag = ParameterBag::new()
			.with("currency", "USD")
			.with("amount", "10.00")
			.with("description", "order 42");
		let keys: Vec<&str> = bag.iter().map(|(k, _)| k).collect();
		assert_eq!(keys, ["currency", "amount", "description"]);
	}

	#[test]
	fn initialize_applies_defaults_then_params() {
		let defaults = ParameterBag::new()
			.with("currency", "USD")
			.with("testMode", false);
		let params = ParameterBag::new().with("currency", "EUR");

		let mut bag = ParameterBag::new().with("stale", "value");
		bag.initialize(&defaults, &params);

		assert_eq!(bag.get("currency"), Some(&json!("EUR")));
		assert_eq!(bag.get("testMode"), Some(&json!(false)));
		assert!(bag.get("stale").is_none());
	}

	#[test]
	fn array_defaults_resolve_to_their_head() {
		let defaults = ParameterBag::new().with("mode", json!(["live", "test"]));
		let mut bag = ParameterBag::new();
		bag.initialize(&defaults, &ParameterBag::new());
		assert_eq!(bag.get("mode"), Some(&json!("live")));
	}

	#[test]
	fn merge_overrides_without_reordering() {
		let mut bag = ParameterBag::new().with("a", 1).with("b", 2);
		bag.merge(&ParameterBag::new().with("b", 3).with("c", 4));
		let entries: Vec<(&str, &Value)> = bag.iter().collect();
		assert_eq!(
			entries,
			[("a", &json!(1)), ("b", &json!(3)), ("c", &json!(4))]
		);
	}
}
