//! Password field widget with a visibility toggle.

// self
use crate::{
	_prelude::*,
	validate::{FieldValue, ValueBag, rules},
	widget::Widget,
};

/// View description for a password field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PasswordFieldView {
	/// Whether the content should be rendered masked.
	pub masked: bool,
	/// Accessibility label for the visibility toggle.
	pub toggle_label: &'static str,
	/// Whether the field accepts input.
	pub enabled: bool,
}

/// Single password input whose content can be revealed or re-masked.
#[derive(Clone)]
pub struct PasswordField {
	value: String,
	visible: bool,
	enabled: bool,
}
// The content never reaches logs; only presentation state is printable.
impl Debug for PasswordField {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("PasswordField")
			.field("value", &"<redacted>")
			.field("visible", &self.visible)
			.field("enabled", &self.enabled)
			.finish()
	}
}
impl PasswordField {
	/// Creates an empty, masked, enabled field.
	pub fn new() -> Self {
		Self { value: String::new(), visible: false, enabled: true }
	}

	/// Replaces the content with the typed text.
	pub fn input(&mut self, text: &str) {
		if self.enabled {
			self.value = text.to_owned();
		}
	}

	/// Flips visibility; returns the new visible state.
	pub fn toggle_visibility(&mut self) -> bool {
		if self.enabled {
			self.visible = !self.visible;
		}

		self.visible
	}

	/// Whether the content is currently revealed.
	pub fn is_visible(&self) -> bool {
		self.visible
	}

	/// Pure state → view description. The content itself is deliberately absent.
	pub fn view(&self) -> PasswordFieldView {
		PasswordFieldView {
			masked: !self.visible,
			toggle_label: if self.visible { "Hide password" } else { "Show password" },
			enabled: self.enabled,
		}
	}
}
impl Default for PasswordField {
	fn default() -> Self {
		Self::new()
	}
}
impl Widget for PasswordField {
	type Value = String;

	fn value(&self) -> String {
		self.value.clone()
	}

	fn set_value(&mut self, value: String) {
		self.value = value;
	}

	fn is_valid(&self) -> bool {
		let value = FieldValue::from(self.value.as_str());

		rules::password().check(Some(&value), &ValueBag::new()).is_empty()
	}

	fn is_enabled(&self) -> bool {
		self.enabled
	}

	fn set_enabled(&mut self, enabled: bool) {
		self.enabled = enabled;
	}

	fn reset(&mut self) {
		self.value.clear();
		self.visible = false;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn toggle_flips_mask_and_label() {
		let mut field = PasswordField::new();

		assert!(field.view().masked);
		assert_eq!(field.view().toggle_label, "Show password");
		assert!(field.toggle_visibility());
		assert!(!field.view().masked);
		assert_eq!(field.view().toggle_label, "Hide password");
	}

	#[test]
	fn reset_re_masks_the_field() {
		let mut field = PasswordField::new();

		field.input("Abcdef1!");
		field.toggle_visibility();
		field.reset();

		assert_eq!(field.value(), "");
		assert!(field.view().masked);
	}

	#[test]
	fn validity_follows_the_password_policy() {
		let mut field = PasswordField::new();

		field.input("abc");

		assert!(!field.is_valid());

		field.input("Abcdef1!");

		assert!(field.is_valid());
	}
}
