//! Loading spinner description shown while the browser hands off to the identity provider.

// self
use crate::_prelude::*;

/// Spinner footprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpinnerSize {
	/// Inline, next to a button label.
	Sm,
	/// Section-level.
	Md,
	/// Full-page.
	Lg,
}

/// View description for the spinner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SpinnerView {
	/// Message under the spinner, if any.
	pub message: Option<String>,
	/// Footprint.
	pub size: SpinnerSize,
	/// Whether the spinner should be rendered at all.
	pub visible: bool,
}

/// Progress indicator with an optional message.
///
/// Not a form widget; it captures no value and never blocks submission.
#[derive(Clone, Debug)]
pub struct Spinner {
	message: Option<String>,
	size: SpinnerSize,
	visible: bool,
}
impl Spinner {
	/// Creates a visible spinner of the given size with no message.
	pub fn new(size: SpinnerSize) -> Self {
		Self { message: None, size, visible: true }
	}

	/// Sets the message shown under the spinner.
	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());

		self
	}

	/// Shows or hides the spinner.
	pub fn set_visible(&mut self, visible: bool) {
		self.visible = visible;
	}

	/// Pure state → view description.
	pub fn view(&self) -> SpinnerView {
		SpinnerView { message: self.message.clone(), size: self.size, visible: self.visible }
	}
}
