//! Declarative field validation: rule sets, value bags, and deterministic async evaluation.
//!
//! Rules are plain synchronous predicates; `validate` wraps their verdicts in a boxed future so
//! callers get one uniform non-blocking interface whether the rules are local (always, in this
//! crate) or backed by something slower in a host shell. Evaluation never aborts early: every
//! violated rule is collected.

pub mod rules;

// crates.io
use regex::Regex;
// self
use crate::_prelude::*;

/// Boxed future returned by the uniform validation interface.
pub type ValidateFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// A single field value as captured from a control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
	/// Free-form text (inputs, selects).
	Text(String),
	/// Boolean state (checkboxes, toggles).
	Flag(bool),
}
impl FieldValue {
	/// Returns the textual content, or `None` for flags.
	pub fn as_text(&self) -> Option<&str> {
		match self {
			FieldValue::Text(text) => Some(text),
			FieldValue::Flag(_) => None,
		}
	}

	/// Returns `true` for empty text; flags are never considered empty.
	pub fn is_empty(&self) -> bool {
		matches!(self, FieldValue::Text(text) if text.is_empty())
	}
}
impl From<&str> for FieldValue {
	fn from(value: &str) -> Self {
		FieldValue::Text(value.to_owned())
	}
}
impl From<String> for FieldValue {
	fn from(value: String) -> Self {
		FieldValue::Text(value)
	}
}
impl From<bool> for FieldValue {
	fn from(value: bool) -> Self {
		FieldValue::Flag(value)
	}
}

/// Named field values submitted for whole-form validation.
#[derive(Clone, Debug, Default)]
pub struct ValueBag(BTreeMap<String, FieldValue>);
impl ValueBag {
	/// Creates an empty bag.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts (or replaces) a field value; returns `self` for chaining.
	pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
		self.insert(field, value);

		self
	}

	/// Inserts (or replaces) a field value.
	pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
		self.0.insert(field.into(), value.into());
	}

	/// Returns the stored value for `field`, if any.
	pub fn get(&self, field: &str) -> Option<&FieldValue> {
		self.0.get(field)
	}

	/// Returns the text content of `field`, treating missing fields and flags as empty.
	pub fn text(&self, field: &str) -> &str {
		self.get(field).and_then(FieldValue::as_text).unwrap_or("")
	}
}

/// One validation predicate plus its human-readable failure message.
#[derive(Clone, Debug)]
pub enum Rule {
	/// The field must be present and non-empty.
	Required {
		/// Message shown when the field is missing or empty.
		message: String,
	},
	/// The field's text must match the pattern.
	Matches {
		/// Compiled full-match pattern.
		pattern: Regex,
		/// Message shown on mismatch.
		message: String,
	},
	/// The field's text must contain at least `min` characters.
	MinChars {
		/// Inclusive lower bound on character count.
		min: usize,
		/// Message shown when too short.
		message: String,
	},
	/// The field's text must contain at most `max` characters.
	MaxChars {
		/// Inclusive upper bound on character count.
		max: usize,
		/// Message shown when too long.
		message: String,
	},
	/// The field's text must equal another field's *current* value in the bag.
	EqualsField {
		/// Name of the referenced field, resolved at validation time.
		field: String,
		/// Message shown on mismatch.
		message: String,
	},
	/// The field must be a flag set to `true`.
	MustBeTrue {
		/// Message shown when unset or false.
		message: String,
	},
}
impl Rule {
	/// Evaluates the rule; returns the failure message when violated.
	pub fn check(&self, value: Option<&FieldValue>, bag: &ValueBag) -> Option<String> {
		let text = value.and_then(FieldValue::as_text).unwrap_or("");

		match self {
			Rule::Required { message } =>
				(value.is_none() || value.is_some_and(FieldValue::is_empty))
					.then(|| message.clone()),
			Rule::Matches { pattern, message } =>
				(!pattern.is_match(text)).then(|| message.clone()),
			Rule::MinChars { min, message } =>
				(text.chars().count() < *min).then(|| message.clone()),
			Rule::MaxChars { max, message } =>
				(text.chars().count() > *max).then(|| message.clone()),
			Rule::EqualsField { field, message } =>
				(text != bag.text(field)).then(|| message.clone()),
			Rule::MustBeTrue { message } =>
				(!matches!(value, Some(FieldValue::Flag(true)))).then(|| message.clone()),
		}
	}
}

/// Ordered rule list applied to a single field.
#[derive(Clone, Debug, Default)]
pub struct FieldRules(Vec<Rule>);
impl FieldRules {
	/// Creates an empty rule list.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a required-and-non-empty rule.
	pub fn required(mut self, message: impl Into<String>) -> Self {
		self.0.push(Rule::Required { message: message.into() });

		self
	}

	/// Appends a full-match pattern rule.
	pub fn matches(mut self, pattern: Regex, message: impl Into<String>) -> Self {
		self.0.push(Rule::Matches { pattern, message: message.into() });

		self
	}

	/// Appends a minimum character-count rule.
	pub fn min_chars(mut self, min: usize, message: impl Into<String>) -> Self {
		self.0.push(Rule::MinChars { min, message: message.into() });

		self
	}

	/// Appends a maximum character-count rule.
	pub fn max_chars(mut self, max: usize, message: impl Into<String>) -> Self {
		self.0.push(Rule::MaxChars { max, message: message.into() });

		self
	}

	/// Appends a cross-field equality rule resolved against the bag at validation time.
	pub fn equals_field(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
		self.0.push(Rule::EqualsField { field: field.into(), message: message.into() });

		self
	}

	/// Appends a must-be-true flag rule.
	pub fn must_be_true(mut self, message: impl Into<String>) -> Self {
		self.0.push(Rule::MustBeTrue { message: message.into() });

		self
	}

	/// Evaluates every rule against the value; all violations are collected.
	pub fn check(&self, value: Option<&FieldValue>, bag: &ValueBag) -> Vec<String> {
		self.0.iter().filter_map(|rule| rule.check(value, bag)).collect()
	}

	/// Uniform async evaluation of a standalone value.
	pub fn validate(&self, value: impl Into<FieldValue>) -> ValidateFuture<Verdict> {
		let value = value.into();
		let errors = self.check(Some(&value), &ValueBag::new());
		let verdict = Verdict { valid: errors.is_empty(), errors };

		Box::pin(async move { verdict })
	}
}

/// Whole-form rule set: an ordered field → rules mapping.
#[derive(Clone, Debug, Default)]
pub struct Schema(Vec<(String, FieldRules)>);
impl Schema {
	/// Creates an empty schema.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a field with its rule list; evaluation order follows insertion order.
	pub fn field(mut self, name: impl Into<String>, rules: FieldRules) -> Self {
		self.0.push((name.into(), rules));

		self
	}

	/// Synchronously evaluates every field against the bag.
	pub fn check(&self, bag: &ValueBag) -> FieldReport {
		let mut errors = BTreeMap::new();

		for (name, rules) in &self.0 {
			let violations = rules.check(bag.get(name), bag);

			// All rules ran; the report keeps the first message per field.
			if let Some(first) = violations.into_iter().next() {
				errors.insert(name.clone(), first);
			}
		}

		FieldReport { valid: errors.is_empty(), errors }
	}

	/// Uniform async evaluation of the whole bag.
	pub fn validate(&self, bag: &ValueBag) -> ValidateFuture<FieldReport> {
		let report = self.check(bag);

		Box::pin(async move { report })
	}
}

/// Verdict for a standalone value: all violated rule messages, in rule order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verdict {
	/// `true` when no rule was violated.
	pub valid: bool,
	/// Every violation message, in rule order.
	pub errors: Vec<String>,
}
impl Verdict {
	/// Returns the first violation message, if any.
	pub fn first_error(&self) -> Option<&str> {
		self.errors.first().map(String::as_str)
	}
}

/// Verdict for a whole form: one message per violated field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldReport {
	/// `true` when no field was violated.
	pub valid: bool,
	/// Field name → first violation message.
	pub errors: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::validate::rules::{self, DocumentType};

	#[tokio::test]
	async fn document_rules_accept_exact_lengths_only() {
		for (doc_type, good, bad) in [
			(DocumentType::Dni, "12345678", "1234567"),
			(DocumentType::Ce, "123456789", "12345678"),
		] {
			let rules = rules::document_rules(doc_type);

			assert!(rules.validate(good).await.valid, "{doc_type:?} should accept {good}.");
			assert!(!rules.validate(bad).await.valid, "{doc_type:?} should reject {bad}.");
			assert!(
				!rules.validate("1234567a").await.valid,
				"{doc_type:?} should reject non-digits.",
			);
		}
	}

	#[tokio::test]
	async fn password_rules_collect_every_violation() {
		let verdict = rules::password().validate("abc").await;

		assert!(!verdict.valid);
		// Too short, no digit, no uppercase, no symbol; the lowercase rule passes.
		assert_eq!(verdict.errors.len(), 4);

		let verdict = rules::password().validate("Abcdef1!").await;

		assert!(verdict.valid);
		assert!(verdict.errors.is_empty());
	}

	#[tokio::test]
	async fn cross_field_equality_resolves_at_validation_time() {
		let schema = Schema::new()
			.field("password", rules::password())
			.field("confirmation", rules::password_confirm("password"));
		let mismatched = ValueBag::new().with("password", "Abcdef1!").with("confirmation", "Abcdef1");
		let report = schema.validate(&mismatched).await;

		assert!(!report.valid);
		assert_eq!(report.errors.get("confirmation").map(String::as_str), Some(rules::PASSWORD_MISMATCH));

		let matched = ValueBag::new().with("password", "Abcdef1!").with("confirmation", "Abcdef1!");

		assert!(schema.validate(&matched).await.valid);
	}

	#[tokio::test]
	async fn same_inputs_always_produce_the_same_verdict() {
		let rules = rules::otp();

		for _ in 0..3 {
			assert!(rules.validate("123456").await.valid);
			assert!(!rules.validate("12345").await.valid);
		}
	}

	#[test]
	fn schema_reports_first_message_per_field_in_order() {
		let schema = Schema::new().field(
			"document_number",
			FieldRules::new()
				.required("This field is required.")
				.matches(regex::Regex::new(r"^\d{8}$").expect("Fixture regex should compile."), "Must be 8 digits."),
		);
		let report = schema.check(&ValueBag::new());

		assert!(!report.valid);
		assert_eq!(
			report.errors.get("document_number").map(String::as_str),
			Some("This field is required."),
		);
	}

	#[test]
	fn terms_rule_requires_a_true_flag() {
		let bag = ValueBag::new().with("terms", false);
		let schema = Schema::new().field("terms", rules::terms());

		assert!(!schema.check(&bag).valid);
		assert!(schema.check(&ValueBag::new().with("terms", true)).valid);
	}

	#[tokio::test]
	async fn email_and_phone_rules_match_expected_shapes() {
		assert!(rules::email().validate("user@example.com").await.valid);
		assert!(!rules::email().validate("user@").await.valid);
		assert!(rules::phone().validate("987654321").await.valid);
		assert!(!rules::phone().validate("887654321").await.valid, "Mobile numbers start with 9.");
	}
}
