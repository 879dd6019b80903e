//! Six-box one-time-code widget with keyboard navigation and paste splitting.

// self
use crate::{
	_prelude::*,
	validate::{FieldValue, ValueBag, rules},
	widget::Widget,
};

/// Number of code boxes.
pub const OTP_LEN: usize = 6;

/// Keystroke the host forwards to the focused box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OtpKey {
	/// A digit key.
	Digit(char),
	/// Backspace.
	Backspace,
	/// Focus the previous box.
	ArrowLeft,
	/// Focus the next box.
	ArrowRight,
}

/// Event returned by input operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OtpEvent {
	/// Nothing noteworthy happened.
	None,
	/// All six boxes just became filled; carries the assembled code.
	///
	/// Fired once per newly-reached filled state: editing a box and refilling it fires again,
	/// but repeated keystrokes on an already-full code do not.
	Completed(String),
}

/// View description for the code widget.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OtpInputView {
	/// Per-box content, empty string for an empty box.
	pub boxes: [String; OTP_LEN],
	/// Index of the focused box.
	pub focus: usize,
	/// Whether the boxes accept input.
	pub enabled: bool,
}

/// Six single-digit boxes behaving as one field.
#[derive(Clone, Debug)]
pub struct OtpInput {
	boxes: [Option<char>; OTP_LEN],
	focus: usize,
	filled_latch: bool,
	enabled: bool,
}
impl OtpInput {
	/// Creates an empty widget focused on the first box.
	pub fn new() -> Self {
		Self { boxes: [None; OTP_LEN], focus: 0, filled_latch: false, enabled: true }
	}

	/// Processes a keystroke on the focused box.
	pub fn press(&mut self, key: OtpKey) -> OtpEvent {
		if !self.enabled {
			return OtpEvent::None;
		}

		match key {
			OtpKey::Digit(c) => {
				if !c.is_ascii_digit() {
					return OtpEvent::None;
				}

				self.boxes[self.focus] = Some(c);

				if self.focus + 1 < OTP_LEN {
					self.focus += 1;
				}
			},
			OtpKey::Backspace =>
				if self.boxes[self.focus].is_some() {
					self.boxes[self.focus] = None;
				} else {
					// Empty box: move focus back without altering content.
					self.focus = self.focus.saturating_sub(1);
				},
			OtpKey::ArrowLeft => self.focus = self.focus.saturating_sub(1),
			OtpKey::ArrowRight =>
				if self.focus + 1 < OTP_LEN {
					self.focus += 1;
				},
		}

		self.completion_event()
	}

	/// Splits pasted text across the boxes starting from the first.
	///
	/// Non-digits are dropped and anything past the sixth digit is ignored. Focus lands on the
	/// box after the last one filled.
	pub fn paste(&mut self, text: &str) -> OtpEvent {
		if !self.enabled {
			return OtpEvent::None;
		}

		let digits: Vec<char> =
			text.chars().filter(char::is_ascii_digit).take(OTP_LEN).collect();

		if digits.is_empty() {
			return OtpEvent::None;
		}

		for (i, c) in digits.iter().enumerate() {
			self.boxes[i] = Some(*c);
		}

		self.focus = digits.len().min(OTP_LEN - 1);

		self.completion_event()
	}

	/// Returns `true` when every box holds a digit.
	pub fn is_filled(&self) -> bool {
		self.boxes.iter().all(Option::is_some)
	}

	/// Index of the focused box.
	pub fn focus(&self) -> usize {
		self.focus
	}

	/// Pure state → view description.
	pub fn view(&self) -> OtpInputView {
		OtpInputView {
			boxes: self.boxes.map(|b| b.map(String::from).unwrap_or_default()),
			focus: self.focus,
			enabled: self.enabled,
		}
	}

	// Transitions the latch and reports `Completed` exactly when the filled state was just
	// reached.
	fn completion_event(&mut self) -> OtpEvent {
		let filled = self.is_filled();
		let event = if filled && !self.filled_latch {
			OtpEvent::Completed(self.value())
		} else {
			OtpEvent::None
		};

		self.filled_latch = filled;

		event
	}
}
impl Default for OtpInput {
	fn default() -> Self {
		Self::new()
	}
}
impl Widget for OtpInput {
	type Value = String;

	fn value(&self) -> String {
		self.boxes.iter().flatten().collect()
	}

	fn set_value(&mut self, value: String) {
		// Distributes from the first box; boxes past the written digits keep their content.
		for (i, c) in value.chars().filter(char::is_ascii_digit).take(OTP_LEN).enumerate() {
			self.boxes[i] = Some(c);
		}

		// Programmatic writes never fire completion events.
		self.filled_latch = self.is_filled();
	}

	fn is_valid(&self) -> bool {
		let value = FieldValue::from(self.value());

		rules::otp().check(Some(&value), &ValueBag::new()).is_empty()
	}

	fn is_enabled(&self) -> bool {
		self.enabled
	}

	fn set_enabled(&mut self, enabled: bool) {
		self.enabled = enabled;
	}

	fn reset(&mut self) {
		*self = Self { enabled: self.enabled, ..Self::new() };
	}
}
