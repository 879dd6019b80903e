//! Password creation widget: live requirement checklist plus confirmation matching.

// self
use crate::{
	_prelude::*,
	validate::rules,
	widget::{PasswordField, PasswordFieldView, Widget},
};

/// The five fixed password requirements, in checklist order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementId {
	/// At least 8 characters.
	MinLength,
	/// At least one number.
	Digit,
	/// At least one lowercase letter.
	Lowercase,
	/// At least one uppercase letter.
	Uppercase,
	/// At least one symbol.
	Symbol,
}
impl RequirementId {
	/// Every requirement, in checklist order.
	pub const ALL: [RequirementId; 5] = [
		RequirementId::MinLength,
		RequirementId::Digit,
		RequirementId::Lowercase,
		RequirementId::Uppercase,
		RequirementId::Symbol,
	];

	/// Checklist label for the requirement.
	pub const fn label(self) -> &'static str {
		match self {
			RequirementId::MinLength => "Must be at least 8 characters.",
			RequirementId::Digit => "Must contain at least one number.",
			RequirementId::Lowercase => "Must contain at least one lowercase letter.",
			RequirementId::Uppercase => "Must contain at least one uppercase letter.",
			RequirementId::Symbol => "Must contain at least one symbol.",
		}
	}

	/// Evaluates the requirement's predicate against a candidate password.
	pub fn met_by(self, password: &str) -> bool {
		match self {
			RequirementId::MinLength => password.chars().count() >= 8,
			RequirementId::Digit => rules::HAS_DIGIT.is_match(password),
			RequirementId::Lowercase => rules::HAS_LOWERCASE.is_match(password),
			RequirementId::Uppercase => rules::HAS_UPPERCASE.is_match(password),
			RequirementId::Symbol => rules::HAS_SYMBOL.is_match(password),
		}
	}
}

/// One checklist row: the requirement and whether the current password meets it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Requirement {
	/// Which requirement this row tracks.
	pub id: RequirementId,
	/// Whether the current primary password satisfies it.
	pub met: bool,
}

/// View description for the password-creation widget.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PasswordCreationView {
	/// Primary field presentation.
	pub password: PasswordFieldView,
	/// Confirmation field presentation.
	pub confirmation: PasswordFieldView,
	/// Checklist rows with labels, in order.
	pub requirements: Vec<(Requirement, &'static str)>,
	/// Inline mismatch error under the confirmation field, if any.
	pub confirmation_error: Option<String>,
}

/// Paired password + confirmation fields with a live requirement checklist.
#[derive(Clone, Debug)]
pub struct PasswordCreation {
	password: PasswordField,
	confirmation: PasswordField,
	requirements: [Requirement; 5],
	confirmation_error: Option<String>,
}
impl PasswordCreation {
	/// Creates the widget with all requirements unmet.
	pub fn new() -> Self {
		Self {
			password: PasswordField::new(),
			confirmation: PasswordField::new(),
			requirements: RequirementId::ALL.map(|id| Requirement { id, met: false }),
			confirmation_error: None,
		}
	}

	/// Processes a keystroke on the primary field, recomputing every requirement.
	pub fn input_password(&mut self, text: &str) -> &[Requirement; 5] {
		self.password.input(text);

		let password = self.password.value();

		// Every predicate runs; rows toggle independently with no short-circuit.
		for requirement in &mut self.requirements {
			requirement.met = requirement.id.met_by(&password);
		}

		&self.requirements
	}

	/// Processes a keystroke on the confirmation field.
	pub fn input_confirmation(&mut self, text: &str) {
		self.confirmation.input(text);
		self.check_confirmation();
	}

	/// Re-checks the confirmation when focus leaves it.
	pub fn blur_confirmation(&mut self) {
		self.check_confirmation();
	}

	/// Flips visibility on the primary field.
	pub fn toggle_password_visibility(&mut self) -> bool {
		self.password.toggle_visibility()
	}

	/// Flips visibility on the confirmation field.
	pub fn toggle_confirmation_visibility(&mut self) -> bool {
		self.confirmation.toggle_visibility()
	}

	/// Current checklist state.
	pub fn requirements(&self) -> &[Requirement; 5] {
		&self.requirements
	}

	/// Returns `true` when every requirement row is met.
	pub fn requirements_met(&self) -> bool {
		self.requirements.iter().all(|requirement| requirement.met)
	}

	/// Inline mismatch error, if currently shown.
	pub fn confirmation_error(&self) -> Option<&str> {
		self.confirmation_error.as_deref()
	}

	/// Pure state → view description.
	pub fn view(&self) -> PasswordCreationView {
		PasswordCreationView {
			password: self.password.view(),
			confirmation: self.confirmation.view(),
			requirements: self
				.requirements
				.iter()
				.map(|requirement| (*requirement, requirement.id.label()))
				.collect(),
			confirmation_error: self.confirmation_error.clone(),
		}
	}

	// Mismatch is only reported once the confirmation is non-empty; the comparison always uses
	// the primary field's current value.
	fn check_confirmation(&mut self) {
		let confirmation = self.confirmation.value();

		if confirmation.is_empty() {
			self.confirmation_error = None;
		} else if self.password.value() != confirmation {
			self.confirmation_error = Some(rules::PASSWORD_MISMATCH.to_owned());
		} else {
			self.confirmation_error = None;
		}
	}
}
impl Default for PasswordCreation {
	fn default() -> Self {
		Self::new()
	}
}
impl Widget for PasswordCreation {
	type Value = String;

	fn value(&self) -> String {
		self.password.value()
	}

	fn set_value(&mut self, value: String) {
		self.input_password(&value);
		self.input_confirmation(&value);
	}

	fn is_valid(&self) -> bool {
		self.requirements_met() && self.password.value() == self.confirmation.value()
	}

	fn is_enabled(&self) -> bool {
		self.password.is_enabled()
	}

	fn set_enabled(&mut self, enabled: bool) {
		self.password.set_enabled(enabled);
		self.confirmation.set_enabled(enabled);
	}

	fn reset(&mut self) {
		self.password.reset();
		self.confirmation.reset();
		self.confirmation_error = None;

		for requirement in &mut self.requirements {
			requirement.met = false;
		}
	}
}
