//! Page controllers: one deterministic state machine per wizard step.
//!
//! Controllers are constructed with their dependencies (store, bridge, configuration, next-step
//! URL) and never touch a navigation or rendering surface. Every action returns a
//! [`PageOutcome`]; the host executes navigations and renders the `view()` structs.

pub mod loading;
pub mod login;
pub mod mfa;
pub mod otp;
pub mod password;
pub mod success;

pub use loading::*;
pub use login::*;
pub use mfa::*;
pub use otp::*;
pub use password::*;
pub use success::*;

// self
use crate::bridge::Navigation;

/// What the host should do after a page action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageOutcome {
	/// Stay on the page; the view has been updated.
	Stay,
	/// Return to the previous step.
	Back,
	/// Perform the described full-page navigation.
	Navigate(Navigation),
}
