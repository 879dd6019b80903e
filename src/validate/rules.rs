//! Built-in rule sets shared by widgets and page controllers.

// std
use std::sync::LazyLock;
// crates.io
use regex::Regex;
// self
use crate::{_prelude::*, validate::FieldRules};

/// Mismatch message shared by the confirmation rule and the password-creation widget.
pub const PASSWORD_MISMATCH: &str = "Passwords do not match.";
/// Generic required-field message.
pub const REQUIRED: &str = "This field is required.";

static EXACT_8_DIGITS: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\d{8}$").expect("8-digit pattern should compile"));
static EXACT_9_DIGITS: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\d{9}$").expect("9-digit pattern should compile"));
static EXACT_6_DIGITS: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\d{6}$").expect("6-digit pattern should compile"));
static EMAIL: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern should compile"));
static MOBILE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^9\d{8}$").expect("mobile pattern should compile"));
pub(crate) static HAS_DIGIT: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"[0-9]").expect("digit pattern should compile"));
pub(crate) static HAS_LOWERCASE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"[a-z]").expect("lowercase pattern should compile"));
pub(crate) static HAS_UPPERCASE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"[A-Z]").expect("uppercase pattern should compile"));
pub(crate) static HAS_SYMBOL: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r#"[!@#$%^&*(),.?":{}|<>]"#).expect("symbol pattern should compile"));

/// Identity document kinds accepted on the login step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
	/// National identity document: exactly 8 digits.
	#[serde(rename = "DNI")]
	Dni,
	/// Foreign resident card: exactly 9 digits.
	#[serde(rename = "CE")]
	Ce,
}
impl DocumentType {
	/// Every supported document kind, in selector order.
	pub const ALL: [DocumentType; 2] = [DocumentType::Dni, DocumentType::Ce];

	/// Stable label used in claims and persisted records.
	pub const fn as_str(self) -> &'static str {
		match self {
			DocumentType::Dni => "DNI",
			DocumentType::Ce => "CE",
		}
	}

	/// Digit count the number field accepts for this kind.
	pub const fn max_digits(self) -> usize {
		match self {
			DocumentType::Dni => 8,
			DocumentType::Ce => 9,
		}
	}

	/// Placeholder text for the number field.
	pub const fn placeholder(self) -> &'static str {
		match self {
			DocumentType::Dni => "Enter your DNI",
			DocumentType::Ce => "Enter your foreign resident card",
		}
	}
}
impl Display for DocumentType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// National identity document: required, exactly 8 digits.
pub fn dni() -> FieldRules {
	FieldRules::new()
		.required(REQUIRED)
		.matches(EXACT_8_DIGITS.clone(), "Document number must be exactly 8 digits.")
}

/// Foreign resident card: required, exactly 9 digits.
pub fn ce() -> FieldRules {
	FieldRules::new()
		.required(REQUIRED)
		.matches(EXACT_9_DIGITS.clone(), "Document number must be exactly 9 digits.")
}

/// Selects the number-field rules for the *current* document type.
pub fn document_rules(doc_type: DocumentType) -> FieldRules {
	match doc_type {
		DocumentType::Dni => dni(),
		DocumentType::Ce => ce(),
	}
}

/// One-time code: required, exactly 6 digits.
pub fn otp() -> FieldRules {
	FieldRules::new().required(REQUIRED).matches(EXACT_6_DIGITS.clone(), "Code must be 6 digits.")
}

/// Email address.
pub fn email() -> FieldRules {
	FieldRules::new().required(REQUIRED).matches(EMAIL.clone(), "Enter a valid email address.")
}

/// Mobile number: 9 digits starting with 9.
pub fn phone() -> FieldRules {
	FieldRules::new().required(REQUIRED).matches(MOBILE.clone(), "Enter a valid mobile number.")
}

/// Policy/contract number: at least 5 characters.
pub fn policy() -> FieldRules {
	FieldRules::new().required(REQUIRED).min_chars(5, "Enter a valid policy number.")
}

/// Terms and conditions acceptance.
pub fn terms() -> FieldRules {
	FieldRules::new().must_be_true("You must accept the terms and conditions.")
}

/// Full password policy: length, digit, lowercase, uppercase, and symbol.
pub fn password() -> FieldRules {
	FieldRules::new()
		.required(REQUIRED)
		.min_chars(8, "Password must be at least 8 characters.")
		.matches(HAS_DIGIT.clone(), "Password must contain at least one number.")
		.matches(HAS_LOWERCASE.clone(), "Password must contain at least one lowercase letter.")
		.matches(HAS_UPPERCASE.clone(), "Password must contain at least one uppercase letter.")
		.matches(HAS_SYMBOL.clone(), "Password must contain at least one symbol.")
}

/// Password confirmation: required and equal to the referenced field's current value.
pub fn password_confirm(field: impl Into<String>) -> FieldRules {
	FieldRules::new().required("Confirm your password.").equals_field(field, PASSWORD_MISMATCH)
}
