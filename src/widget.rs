//! Headless UI widgets: each owns its state, exposes a view description, and returns events.
//!
//! Widgets implement the [`Widget`] capability interface instead of inheriting from a base
//! class; hosts compose them freely and render the `view()` structs with whatever toolkit they
//! use.

pub mod choice;
pub mod document;
pub mod otp;
pub mod password;
pub mod password_creation;
pub mod spinner;
pub mod success;

pub use choice::*;
pub use document::*;
pub use otp::*;
pub use password::*;
pub use password_creation::*;
pub use spinner::*;
pub use success::*;

/// Capability interface implemented by every form widget.
pub trait Widget {
	/// Value type the widget captures.
	type Value;

	/// Returns the current value.
	fn value(&self) -> Self::Value;

	/// Replaces the current value without emitting events.
	fn set_value(&mut self, value: Self::Value);

	/// Synchronous validity check against the widget's own rules.
	fn is_valid(&self) -> bool;

	/// Returns `true` when the widget accepts input.
	fn is_enabled(&self) -> bool;

	/// Enables or disables input.
	fn set_enabled(&mut self, enabled: bool);

	/// Restores the initial state (value, errors, focus).
	fn reset(&mut self);
}
