//! Password creation / reset step.

// self
use crate::{
	_prelude::*,
	bridge::{Bridge, claim},
	obs::{StepKind, StepOutcome, StepSpan, record_step_outcome},
	pages::PageOutcome,
	validate::ValidateFuture,
	widget::{PasswordCreation, PasswordCreationView, Widget},
};

/// View description for the password page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PasswordPageView {
	/// Creation widget presentation.
	pub creation: PasswordCreationView,
	/// Whether the continue action is currently available.
	pub can_submit: bool,
	/// Server-side verification failure published by the provider, if any.
	pub server_error: Option<String>,
}

/// Password creation page controller, shared by the expired-password and reset flows.
#[derive(Debug)]
pub struct PasswordPage {
	bridge: Arc<Bridge>,
	next_url: Url,
	creation: PasswordCreation,
}
impl PasswordPage {
	/// Builds the page with an empty creation widget.
	pub fn new(bridge: Arc<Bridge>, next_url: Url) -> Self {
		Self { bridge, next_url, creation: PasswordCreation::new() }
	}

	/// Forwards typed text to the primary password field.
	pub fn input_password(&mut self, text: &str) {
		self.creation.input_password(text);
	}

	/// Forwards typed text to the confirmation field.
	pub fn input_confirmation(&mut self, text: &str) {
		self.creation.input_confirmation(text);
	}

	/// Re-checks the confirmation when focus leaves it.
	pub fn blur_confirmation(&mut self) {
		self.creation.blur_confirmation();
	}

	/// The underlying creation widget, for visibility toggles and checklist reads.
	pub fn creation(&mut self) -> &mut PasswordCreation {
		&mut self.creation
	}

	/// Whether the continue action is currently available.
	pub fn can_submit(&self) -> bool {
		self.creation.is_valid()
	}

	/// Pure state → view description.
	pub fn view(&self) -> PasswordPageView {
		PasswordPageView {
			creation: self.creation.view(),
			can_submit: self.can_submit(),
			server_error: self.bridge.server_error(),
		}
	}

	/// On a valid widget, writes the new-password claim and yields the navigation onward.
	pub fn submit(&mut self) -> ValidateFuture<PageOutcome> {
		let span = StepSpan::new(StepKind::Password, "submit");

		record_step_outcome(StepKind::Password, StepOutcome::Attempt);

		let outcome = if self.creation.is_valid() {
			self.bridge.clear_server_error();
			self.bridge.write_claim(claim::NEW_PASSWORD, &self.creation.value());

			record_step_outcome(StepKind::Password, StepOutcome::Success);

			PageOutcome::Navigate(self.bridge.navigate_to_flow(&self.next_url, &[]))
		} else {
			record_step_outcome(StepKind::Password, StepOutcome::Failure);

			PageOutcome::Stay
		};

		Box::pin(span.instrument(async move { outcome }))
	}
}
