//! Terminal confirmation step.

// self
use crate::{
	_prelude::*,
	bridge::Bridge,
	config::PortalConfig,
	obs::{StepKind, StepOutcome, record_step_outcome},
	pages::PageOutcome,
	widget::{SuccessPanel, SuccessPanelView},
};

/// View description for the success page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SuccessPageView {
	/// Panel presentation.
	pub panel: SuccessPanelView,
}

/// Success page controller; its continue action re-enters the login flow.
#[derive(Debug)]
pub struct SuccessPage {
	bridge: Arc<Bridge>,
	config: PortalConfig,
	panel: SuccessPanel,
}
impl SuccessPage {
	/// Builds the page around the given panel copy.
	pub fn new(bridge: Arc<Bridge>, config: PortalConfig, panel: SuccessPanel) -> Self {
		Self { bridge, config, panel }
	}

	/// Pure state → view description.
	pub fn view(&self) -> SuccessPageView {
		SuccessPageView { panel: self.panel.view() }
	}

	/// The continue button: navigates back to the configured login flow.
	pub fn continue_pressed(&self) -> PageOutcome {
		record_step_outcome(StepKind::Success, StepOutcome::Success);

		PageOutcome::Navigate(self.bridge.navigate_to_flow(self.config.login_url(), &[]))
	}
}
