//! Gateway short-name resolution.
//!
//! Short names map deterministically onto fully-qualified gateway identities:
//!
//! ```text
//! \Custom\Gateway   => \Custom\Gateway          (caller-fully-qualified)
//! Stripe            => \Passerelle\Stripe\Gateway
//! PayPal\Express    => \Passerelle\PayPal\ExpressGateway
//! PayPal_Express    => \Passerelle\PayPal\ExpressGateway
//! ```
//!
//! Role-scoped resolution inserts an `Account` or `User` segment immediately
//! before the final `Gateway` segment. Resolution is purely textual; no
//! lookup happens until the registry instantiates the identity.

const ROOT_NAMESPACE: &str = "Passerelle";
const GATEWAY_SUFFIX: &str = "Gateway";
const ACCOUNT_SEGMENT: &str = "Account";
const USER_SEGMENT: &str = "User";

/// Resolves a short gateway name to a fully-qualified identity.
///
/// Names beginning with the root marker `\` are used as-is. Underscores map
/// to namespace separators, PSR-0 style.
pub fn gateway_class_name(short_name: &str) -> String {
	if short_name.starts_with('\\') {
		return short_name.to_string();
	}

	let mut name = short_name.replace('_', "\\");
	if !name.contains('\\') {
		name.push('\\');
	}

	format!("\\{ROOT_NAMESPACE}\\{name}{GATEWAY_SUFFIX}")
}

/// Resolves a short name to its account-scoped identity.
pub fn account_gateway_class_name(short_name: &str) -> String {
	class_name_with_segment(&gateway_class_name(short_name), ACCOUNT_SEGMENT)
}

/// Resolves a short name to its user-scoped identity.
pub fn user_gateway_class_name(short_name: &str) -> String {
	class_name_with_segment(&gateway_class_name(short_name), USER_SEGMENT)
}

/// Inserts a segment immediately before the trailing `\Gateway` segment.
///
/// Identities whose final segment merely ends in `Gateway` (e.g.
/// `ExpressGateway`) are left untouched.
fn class_name_with_segment(class_name: &str, segment: &str) -> String {
	let suffix = format!("\\{GATEWAY_SUFFIX}");
	let replacement = format!("\\{segment}\\{GATEWAY_SUFFIX}");
	class_name.replace(&suffix, &replacement)
}

/// Maps a fully-qualified identity back to its short name.
///
/// Identities outside the root namespace come back with a leading root
/// marker so they round-trip through [`gateway_class_name`].
pub fn gateway_short_name(class_name: &str) -> String {
	short_name_with_segment(class_name, None)
}

/// Reverse of [`account_gateway_class_name`].
pub fn account_gateway_short_name(class_name: &str) -> String {
	short_name_with_segment(class_name, Some(ACCOUNT_SEGMENT))
}

/// Reverse of [`user_gateway_class_name`].
pub fn user_gateway_short_name(class_name: &str) -> String {
	short_name_with_segment(class_name, Some(USER_SEGMENT))
}

fn short_name_with_segment(class_name: &str, segment: Option<&str>) -> String {
	let trimmed = class_name.trim_start_matches('\\');
	let prefix = format!("{ROOT_NAMESPACE}\\");

	let Some(inner) = trimmed.strip_prefix(&prefix) else {
		return format!("\\{trimmed}");
	};

	// The bare suffix is stripped without its separator; the trailing
	// underscore it leaves behind is trimmed below.
	let suffix_len = match segment {
		Some(segment) => segment.len() + GATEWAY_SUFFIX.len() + 2,
		None => GATEWAY_SUFFIX.len(),
	};
	let inner = &inner[..inner.len().saturating_sub(suffix_len)];

	inner.replace('\\', "_").trim_matches('_').to_string()
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case("Stripe", "\\Passerelle\\Stripe\\Gateway")]
	#[case("PayPal\\Express", "\\Passerelle\\PayPal\\ExpressGateway")]
	#[case("PayPal_Express", "\\Passerelle\\PayPal\\ExpressGateway")]
	#[case("\\Custom\\Gateway", "\\Custom\\Gateway")]
	#[case("\\Custom_Gateway", "\\Custom_Gateway")]
	fn short_names_resolve(#[case] short: &str, #[case] expected: &str) {
		assert_eq!(gateway_class_name(short), expected);
	}

	#[test]
	fn account_scope_inserts_segment_before_suffix() {
		assert_eq!(
			account_gateway_class_name("Stripe"),
			"\\Passerelle\\Stripe\\Account\\Gateway"
		);
	}

	#[test]
	fn user_scope_inserts_segment_before_suffix() {
		assert_eq!(
			user_gateway_class_name("Stripe"),
			"\\Passerelle\\Stripe\\User\\Gateway"
		);
	}

	#[test]
	fn merged_suffix_segments_are_not_scoped() {
		// ExpressGateway is a single segment; there is no \Gateway segment
		// to scope, so the identity is unchanged.
		assert_eq!(
			account_gateway_class_name("PayPal_Express"),
			"\\Passerelle\\PayPal\\ExpressGateway"
		);
	}

	#[rstest]
	#[case("\\Passerelle\\Stripe\\Gateway", "Stripe")]
	#[case("\\Passerelle\\PayPal\\ExpressGateway", "PayPal_Express")]
	#[case("\\Custom\\Gateway", "\\Custom\\Gateway")]
	fn qualified_names_reverse(#[case] class_name: &str, #[case] expected: &str) {
		assert_eq!(gateway_short_name(class_name), expected);
	}

	#[test]
	fn scoped_short_names_reverse() {
		assert_eq!(
			account_gateway_short_name("\\Passerelle\\Stripe\\Account\\Gateway"),
			"Stripe"
		);
		assert_eq!(
			user_gateway_short_name("\\Passerelle\\Stripe\\User\\Gateway"),
			"Stripe"
		);
	}

	#[test]
	fn resolution_round_trips() {
		for short in ["Stripe", "PayPal_Express"] {
			assert_eq!(gateway_short_name(&gateway_class_name(short)), short);
		}
	}
}
