//! Document number + type widget with digit masking and per-type validation.

// self
use crate::{
	_prelude::*,
	validate::{FieldValue, ValueBag, rules, rules::DocumentType},
	widget::Widget,
};

/// Captured document value: the selected kind plus its number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
	/// Selected document kind.
	#[serde(rename = "type")]
	pub doc_type: DocumentType,
	/// Digits-only document number.
	pub number: String,
}

/// View description for the document widget.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DocumentInputView {
	/// Selected document kind.
	pub doc_type: DocumentType,
	/// Current number content.
	pub number: String,
	/// Placeholder text for the number field.
	pub placeholder: &'static str,
	/// Maximum digit count the field accepts.
	pub max_digits: usize,
	/// Inline error to render next to the field, if any.
	pub error: Option<String>,
	/// Whether the controls accept input.
	pub enabled: bool,
}

/// Document entry widget: digit-only masking, length-capped input, inline validation.
#[derive(Clone, Debug)]
pub struct DocumentInput {
	doc_type: DocumentType,
	number: String,
	error: Option<String>,
	enabled: bool,
}
impl DocumentInput {
	/// Processes raw text typed into the number field.
	///
	/// Non-digits are stripped and the result is capped at the type's digit count. Validation
	/// runs as soon as the field is full; otherwise any stale error is cleared.
	pub fn input(&mut self, text: &str) {
		if !self.enabled {
			return;
		}

		let max = self.doc_type.max_digits();

		self.number = text.chars().filter(char::is_ascii_digit).take(max).collect();

		if self.number.chars().count() == max {
			self.validate_now();
		} else {
			self.error = None;
		}
	}

	/// Validates the field when focus leaves it.
	pub fn blur(&mut self) {
		self.validate_now();
	}

	/// Switches the document kind, clearing the number and any error.
	pub fn change_type(&mut self, doc_type: DocumentType) {
		if !self.enabled {
			return;
		}

		self.doc_type = doc_type;
		self.number.clear();
		self.error = None;
	}

	/// Current document kind.
	pub fn doc_type(&self) -> DocumentType {
		self.doc_type
	}

	/// Current inline error, if any.
	pub fn error(&self) -> Option<&str> {
		self.error.as_deref()
	}

	/// Pure state → view description.
	pub fn view(&self) -> DocumentInputView {
		DocumentInputView {
			doc_type: self.doc_type,
			number: self.number.clone(),
			placeholder: self.doc_type.placeholder(),
			max_digits: self.doc_type.max_digits(),
			error: self.error.clone(),
			enabled: self.enabled,
		}
	}

	fn validate_now(&mut self) -> bool {
		let value = FieldValue::from(self.number.as_str());
		let violations =
			rules::document_rules(self.doc_type).check(Some(&value), &ValueBag::new());

		self.error = violations.into_iter().next();

		self.error.is_none()
	}
}
impl Default for DocumentInput {
	fn default() -> Self {
		Self { doc_type: DocumentType::Dni, number: String::new(), error: None, enabled: true }
	}
}
impl Widget for DocumentInput {
	type Value = Document;

	fn value(&self) -> Document {
		Document { doc_type: self.doc_type, number: self.number.clone() }
	}

	fn set_value(&mut self, value: Document) {
		self.doc_type = value.doc_type;
		self.number = value.number;
		self.error = None;
	}

	fn is_valid(&self) -> bool {
		let value = FieldValue::from(self.number.as_str());

		rules::document_rules(self.doc_type).check(Some(&value), &ValueBag::new()).is_empty()
	}

	fn is_enabled(&self) -> bool {
		self.enabled
	}

	fn set_enabled(&mut self, enabled: bool) {
		self.enabled = enabled;
	}

	fn reset(&mut self) {
		*self = Self::default();
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn input_strips_non_digits_and_caps_length() {
		let mut widget = DocumentInput::default();

		widget.input("12a34-5678xyz9");

		assert_eq!(widget.value().number, "12345678");
		assert!(widget.is_valid());
		assert_eq!(widget.error(), None, "A full valid number carries no error.");
	}

	#[test]
	fn full_length_input_validates_immediately() {
		let mut widget = DocumentInput::default();

		widget.input("1234567");

		assert_eq!(widget.error(), None, "Partial input clears errors instead of flagging them.");

		widget.blur();

		assert!(widget.error().is_some(), "Blur validates the incomplete number.");
	}

	#[test]
	fn type_change_clears_number_and_error() {
		let mut widget = DocumentInput::default();

		widget.input("1234567");
		widget.blur();
		widget.change_type(DocumentType::Ce);

		assert_eq!(widget.value().number, "");
		assert_eq!(widget.error(), None);
		assert_eq!(widget.view().max_digits, 9);
	}

	#[test]
	fn ce_requires_nine_digits() {
		let mut widget = DocumentInput::default();

		widget.change_type(DocumentType::Ce);
		widget.input("123456789");

		assert!(widget.is_valid());

		widget.change_type(DocumentType::Dni);
		widget.input("123456789");

		assert_eq!(widget.value().number, "12345678", "DNI caps the number at 8 digits.");
	}

	#[test]
	fn disabled_widget_ignores_input() {
		let mut widget = DocumentInput::default();

		widget.set_enabled(false);
		widget.input("12345678");

		assert_eq!(widget.value().number, "");
	}

	#[test]
	fn reset_restores_default_type() {
		let mut widget = DocumentInput::default();

		widget.change_type(DocumentType::Ce);
		widget.input("123456789");
		widget.reset();

		assert_eq!(widget.doc_type(), DocumentType::Dni);
		assert_eq!(widget.value().number, "");
	}
}
