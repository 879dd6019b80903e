//! Hand-off step: full-page spinner shown while the provider processes the submission.

// self
use crate::{
	_prelude::*,
	bridge::Bridge,
	obs::{StepKind, StepOutcome, record_step_outcome},
	pages::PageOutcome,
	widget::{Spinner, SpinnerSize, SpinnerView},
};

/// View description for the loading page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoadingPageView {
	/// Spinner presentation.
	pub spinner: SpinnerView,
}

/// Loading page controller.
#[derive(Debug)]
pub struct LoadingPage {
	bridge: Arc<Bridge>,
	next_url: Url,
	spinner: Spinner,
}
impl LoadingPage {
	/// Builds the page with a full-page spinner and the given message.
	pub fn new(bridge: Arc<Bridge>, next_url: Url, message: impl Into<String>) -> Self {
		Self {
			bridge,
			next_url,
			spinner: Spinner::new(SpinnerSize::Lg).with_message(message),
		}
	}

	/// Pure state → view description.
	pub fn view(&self) -> LoadingPageView {
		LoadingPageView { spinner: self.spinner.view() }
	}

	/// Hides the spinner and yields the navigation onward once the host reports completion.
	pub fn finish(&mut self) -> PageOutcome {
		record_step_outcome(StepKind::Loading, StepOutcome::Success);
		self.spinner.set_visible(false);

		PageOutcome::Navigate(self.bridge.navigate_to_flow(&self.next_url, &[]))
	}
}
