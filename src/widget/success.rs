//! Terminal success panel shown after password creation or reset.

// self
use crate::_prelude::*;

/// View description for the success panel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SuccessPanelView {
	/// Headline.
	pub title: String,
	/// Body text.
	pub message: String,
	/// Label of the single continue button.
	pub button_text: String,
}

/// Static confirmation panel with a single continue action.
#[derive(Clone, Debug)]
pub struct SuccessPanel {
	title: String,
	message: String,
	button_text: String,
}
impl SuccessPanel {
	/// Creates a panel with the given copy.
	pub fn new(
		title: impl Into<String>,
		message: impl Into<String>,
		button_text: impl Into<String>,
	) -> Self {
		Self { title: title.into(), message: message.into(), button_text: button_text.into() }
	}

	/// Panel shown after a first-time password creation.
	pub fn password_created() -> Self {
		Self::new(
			"Your password is ready",
			"You can now sign in with your document number and new password.",
			"Continue",
		)
	}

	/// Panel shown after a password reset.
	pub fn password_reset() -> Self {
		Self::new(
			"Password updated",
			"Your password has been changed. Use it the next time you sign in.",
			"Continue",
		)
	}

	/// Pure state → view description.
	pub fn view(&self) -> SuccessPanelView {
		SuccessPanelView {
			title: self.title.clone(),
			message: self.message.clone(),
			button_text: self.button_text.clone(),
		}
	}
}
