//! MFA method selection step.

// self
use crate::{
	_prelude::*,
	bridge::{Bridge, claim},
	obs::{StepKind, StepOutcome, StepSpan, record_step_outcome},
	pages::PageOutcome,
	store::{TtlStore, key},
	validate::ValidateFuture,
	widget::{ChoiceGroup, ChoiceGroupView, MfaMethod, Widget},
};

/// Minutes the chosen method stays remembered while the flow is in progress.
const MFA_METHOD_TTL_MINUTES: i64 = 10;

/// View description for the MFA selection page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MfaPageView {
	/// Method picker presentation.
	pub choices: ChoiceGroupView<MfaMethod>,
}

/// MFA selection page controller.
#[derive(Debug)]
pub struct MfaPage {
	store: TtlStore,
	bridge: Arc<Bridge>,
	next_url: Url,
	choices: ChoiceGroup<MfaMethod>,
}
impl MfaPage {
	/// Builds the page with the standard method picker, restoring a still-valid earlier choice.
	pub fn new(store: TtlStore, bridge: Arc<Bridge>, next_url: Url) -> Self {
		Self::with_choices(store, bridge, next_url, ChoiceGroup::mfa_methods())
	}

	/// Builds the page over a custom option list, e.g. with masked destinations as hints.
	pub fn with_choices(
		store: TtlStore,
		bridge: Arc<Bridge>,
		next_url: Url,
		mut choices: ChoiceGroup<MfaMethod>,
	) -> Self {
		if let Some(previous) = store.get::<MfaMethod>(key::MFA_METHOD) {
			choices.set_value(previous);
		}

		Self { store, bridge, next_url, choices }
	}

	/// Selects the method at `index`; returns `true` if the selection changed.
	pub fn select(&mut self, index: usize) -> bool {
		self.choices.select(index)
	}

	/// The currently selected method.
	pub fn selected(&self) -> MfaMethod {
		self.choices.value()
	}

	/// Pure state → view description.
	pub fn view(&self) -> MfaPageView {
		MfaPageView { choices: self.choices.view() }
	}

	/// Remembers the choice, writes the method claim, and yields the navigation to code entry.
	pub fn submit(&mut self) -> ValidateFuture<PageOutcome> {
		let span = StepSpan::new(StepKind::Mfa, "submit");

		record_step_outcome(StepKind::Mfa, StepOutcome::Attempt);

		let method = self.choices.value();

		self.store.set_with_ttl(
			key::MFA_METHOD,
			&method,
			Duration::minutes(MFA_METHOD_TTL_MINUTES),
		);
		self.bridge.write_claim(claim::MFA_METHOD, method.as_str());

		record_step_outcome(StepKind::Mfa, StepOutcome::Success);

		let outcome = PageOutcome::Navigate(self.bridge.navigate_to_flow(&self.next_url, &[]));

		Box::pin(span.instrument(async move { outcome }))
	}
}
