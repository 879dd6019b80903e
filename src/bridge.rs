//! Bridge between the wizard and the identity provider's hosted page.
//!
//! The hosted page exposes two narrow surfaces: query parameters captured once at load, and a
//! claim table the page submits back to the provider. Both are modeled here behind injected
//! traits so tests and alternative hosts can supply their own.

// self
use crate::_prelude::*;

/// Claim names the hosted page understands.
pub mod claim {
	/// Selected document kind, `DNI` or `CE`.
	pub const DOCUMENT_TYPE: &str = "extension_documentType";
	/// Digits-only document number.
	pub const DOCUMENT_NUMBER: &str = "extension_documentNumber";
	/// Selected code delivery channel.
	pub const MFA_METHOD: &str = "extension_mfaMethod";
	/// The six-digit one-time code.
	pub const OTP_CODE: &str = "extension_otpCode";
	/// The newly created password.
	pub const NEW_PASSWORD: &str = "extension_newPassword";
	/// Server-side verification failure message, set by the provider.
	pub const VERIFICATION_SERVER_ERROR: &str = "claimVerificationServerError";

	/// Every claim the page exchanges with the provider.
	pub const ALL: [&str; 6] = [
		DOCUMENT_TYPE,
		DOCUMENT_NUMBER,
		MFA_METHOD,
		OTP_CODE,
		NEW_PASSWORD,
		VERIFICATION_SERVER_ERROR,
	];
}

/// Claim table surface of the hosted page.
///
/// `write` returns `false` for claims the page does not declare, mirroring the hosted page's
/// behavior of silently dropping unknown fields; callers treat that as a signal, not an error.
pub trait ClaimSink: Send + Sync {
	/// Reads a claim's current value, `None` when unset or unknown.
	fn read(&self, claim: &str) -> Option<String>;

	/// Writes a claim; returns `false` when the claim is not declared on the page.
	fn write(&self, claim: &str, value: &str) -> bool;
}

/// In-memory claim table pre-seeded with the declared claims, for tests and embedding.
pub struct MemoryClaims {
	inner: RwLock<BTreeMap<String, Option<String>>>,
}
impl MemoryClaims {
	/// Creates a table declaring exactly the claims in [`claim::ALL`], all unset.
	pub fn new() -> Self {
		Self {
			inner: RwLock::new(claim::ALL.iter().map(|c| ((*c).to_owned(), None)).collect()),
		}
	}

	/// Pre-sets a claim, e.g. a server error injected before the page loads.
	pub fn with_claim(self, claim: &str, value: &str) -> Self {
		self.inner.write().insert(claim.to_owned(), Some(value.to_owned()));

		self
	}
}
impl ClaimSink for MemoryClaims {
	fn read(&self, claim: &str) -> Option<String> {
		self.inner.read().get(claim).cloned().flatten()
	}

	fn write(&self, claim: &str, value: &str) -> bool {
		let mut inner = self.inner.write();

		match inner.get_mut(claim) {
			Some(slot) => {
				*slot = Some(value.to_owned());

				true
			},
			None => false,
		}
	}
}
impl Default for MemoryClaims {
	fn default() -> Self {
		Self::new()
	}
}
// Claim values carry codes and passwords; only the declared names are printable.
impl Debug for MemoryClaims {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("MemoryClaims")
			.field("claims", &self.inner.read().keys().collect::<Vec<_>>())
			.finish()
	}
}

/// A navigation the host should perform, returned instead of executed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
	/// Absolute target URL with flow parameters applied.
	pub url: Url,
}

/// Hosted-page bridge: captured query parameters plus the claim table.
pub struct Bridge {
	params: BTreeMap<String, String>,
	sink: Arc<dyn ClaimSink>,
}
impl Bridge {
	/// Captures the page URL's query parameters and wires the claim table.
	///
	/// Parameters are snapshotted once; later mutations of the page URL are invisible, which
	/// matches the hosted page reading them only during load.
	pub fn new(page_url: &Url, sink: Arc<dyn ClaimSink>) -> Self {
		Self {
			params: page_url
				.query_pairs()
				.map(|(k, v)| (k.into_owned(), v.into_owned()))
				.collect(),
			sink,
		}
	}

	/// A captured query parameter, if present.
	pub fn param(&self, name: &str) -> Option<&str> {
		self.params.get(name).map(String::as_str)
	}

	/// Every captured query parameter, in name order.
	pub fn params(&self) -> &BTreeMap<String, String> {
		&self.params
	}

	/// The `login_hint` parameter forwarded by the provider, if any.
	pub fn login_hint(&self) -> Option<&str> {
		self.param("login_hint")
	}

	/// Reads a claim from the page.
	pub fn read_claim(&self, claim: &str) -> Option<String> {
		self.sink.read(claim)
	}

	/// Writes a claim to the page; `false` means the page does not declare it.
	pub fn write_claim(&self, claim: &str, value: &str) -> bool {
		self.sink.write(claim, value)
	}

	/// Server-side verification error published by the provider, if any.
	pub fn server_error(&self) -> Option<String> {
		self.sink.read(claim::VERIFICATION_SERVER_ERROR).filter(|message| !message.is_empty())
	}

	/// Clears the server error so a retry starts clean.
	pub fn clear_server_error(&self) {
		self.sink.write(claim::VERIFICATION_SERVER_ERROR, "");
	}

	/// Builds a flow URL from `base`, carrying the captured parameters forward and applying
	/// `overrides` with set semantics: an override replaces an existing parameter of the same
	/// name instead of duplicating it.
	pub fn build_flow_url(
		&self,
		base: &Url,
		overrides: &[(&str, &str)],
	) -> Url {
		let mut merged: BTreeMap<String, String> = base
			.query_pairs()
			.map(|(k, v)| (k.into_owned(), v.into_owned()))
			.collect();

		for (k, v) in &self.params {
			merged.entry(k.clone()).or_insert_with(|| v.clone());
		}
		for (k, v) in overrides {
			merged.insert((*k).to_owned(), (*v).to_owned());
		}

		let mut url = base.clone();

		url.query_pairs_mut().clear().extend_pairs(merged).finish();

		if url.query() == Some("") {
			url.set_query(None);
		}

		url
	}

	/// Describes the navigation to another flow, leaving execution to the host.
	pub fn navigate_to_flow(&self, base: &Url, overrides: &[(&str, &str)]) -> Navigation {
		Navigation { url: self.build_flow_url(base, overrides) }
	}
}
impl Debug for Bridge {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Bridge").field("params", &self.params).finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn bridge_at(url: &str) -> Bridge {
		Bridge::new(
			&Url::parse(url).expect("Test URL should parse."),
			Arc::new(MemoryClaims::new()),
		)
	}

	#[test]
	fn query_params_are_captured_once() {
		let bridge = bridge_at("https://portal.example/login?campaign=q3&lang=es");

		assert_eq!(bridge.param("campaign"), Some("q3"));
		assert_eq!(bridge.param("lang"), Some("es"));
		assert_eq!(bridge.param("missing"), None);
	}

	#[test]
	fn declared_claims_round_trip_and_unknown_writes_are_refused() {
		let bridge = bridge_at("https://portal.example/login");

		assert!(bridge.write_claim(claim::MFA_METHOD, "sms"));
		assert_eq!(bridge.read_claim(claim::MFA_METHOD).as_deref(), Some("sms"));
		assert!(!bridge.write_claim("extension_unknownField", "x"));
		assert_eq!(bridge.read_claim("extension_unknownField"), None);
	}

	#[test]
	fn flow_url_merges_with_set_semantics() {
		let bridge = bridge_at("https://portal.example/login?campaign=q3&flow=login");
		let base = Url::parse("https://portal.example/reset?flow=reset")
			.expect("Base URL should parse.");
		let url = bridge.build_flow_url(&base, &[("step", "otp")]);
		let pairs: Vec<(String, String)> =
			url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect();

		// Captured params carry forward, but the base's own `flow` wins over the captured one,
		// and overrides replace rather than duplicate.
		assert_eq!(
			pairs,
			vec![
				("campaign".to_owned(), "q3".to_owned()),
				("flow".to_owned(), "reset".to_owned()),
				("step".to_owned(), "otp".to_owned()),
			],
		);
	}

	#[test]
	fn server_error_reads_and_clears() {
		let sink = Arc::new(
			MemoryClaims::new().with_claim(claim::VERIFICATION_SERVER_ERROR, "Invalid code."),
		);
		let bridge = Bridge::new(
			&Url::parse("https://portal.example/login").expect("Test URL should parse."),
			sink,
		);

		assert_eq!(bridge.server_error().as_deref(), Some("Invalid code."));

		bridge.clear_server_error();

		assert_eq!(bridge.server_error(), None, "An empty error claim reads as no error.");
	}

	#[test]
	fn debug_output_hides_claim_values() {
		let claims = MemoryClaims::new().with_claim(claim::NEW_PASSWORD, "Abcdef1!");
		let rendered = format!("{claims:?}");

		assert!(!rendered.contains("Abcdef1!"));
		assert!(rendered.contains(claim::NEW_PASSWORD));
	}
}
