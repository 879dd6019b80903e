//! Optional observability helpers for wizard steps.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `auth_wizard.step` with the `step` (page)
//!   and `stage` (call site) fields.
//! - Enable `metrics` to increment the `auth_wizard_step_total` counter for every
//!   attempt/success/failure, labeled by `step` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Wizard steps observed by the page controllers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepKind {
	/// Document entry and login submit.
	Login,
	/// MFA method selection.
	Mfa,
	/// One-time code entry.
	Otp,
	/// Password creation or reset.
	Password,
	/// Provider hand-off spinner.
	Loading,
	/// Terminal confirmation.
	Success,
}
impl StepKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			StepKind::Login => "login",
			StepKind::Mfa => "mfa",
			StepKind::Otp => "otp",
			StepKind::Password => "password",
			StepKind::Loading => "loading",
			StepKind::Success => "success",
		}
	}
}
impl Display for StepKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepOutcome {
	/// Entry to a page submit.
	Attempt,
	/// Validation passed and claims were written.
	Success,
	/// Validation or claim write failure surfaced to the user.
	Failure,
}
impl StepOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			StepOutcome::Attempt => "attempt",
			StepOutcome::Success => "success",
			StepOutcome::Failure => "failure",
		}
	}
}
impl Display for StepOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
