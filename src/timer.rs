//! Host-driven countdown for code expiry and resend gating.
//!
//! The library owns no clock; the host calls [`Countdown::tick`] once per elapsed second and
//! renders the returned state. This keeps the whole wizard deterministic under test.

// self
use crate::_prelude::*;

/// Seconds a freshly issued one-time code stays valid.
pub const OTP_COUNTDOWN_START_SECS: u64 = 177;

/// Event returned by [`Countdown::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownEvent {
	/// Still counting, or already expired on an earlier tick.
	None,
	/// The countdown just hit zero on this tick.
	Expired,
}

/// View description for the countdown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CountdownView {
	/// Remaining time rendered as `mm:ss`.
	pub display: String,
	/// Whether the code has expired and the resend action should be offered.
	pub expired: bool,
}

/// Second-granularity countdown that expires exactly once per run.
#[derive(Clone, Debug)]
pub struct Countdown {
	start_secs: u64,
	remaining: u64,
	running: bool,
}
impl Countdown {
	/// Creates a running countdown from `start_secs`.
	pub fn new(start_secs: u64) -> Self {
		Self { start_secs, remaining: start_secs, running: true }
	}

	/// The standard code-expiry countdown.
	pub fn for_otp() -> Self {
		Self::new(OTP_COUNTDOWN_START_SECS)
	}

	/// Advances by one second.
	///
	/// Returns [`CountdownEvent::Expired`] on the tick that reaches zero; ticks past zero are
	/// no-ops so the host can keep a timer loop running without double-firing.
	pub fn tick(&mut self) -> CountdownEvent {
		if !self.running || self.remaining == 0 {
			return CountdownEvent::None;
		}

		self.remaining -= 1;

		if self.remaining == 0 { CountdownEvent::Expired } else { CountdownEvent::None }
	}

	/// Freezes the countdown, e.g. once the code has been submitted.
	pub fn stop(&mut self) {
		self.running = false;
	}

	/// Restarts from the original start value, e.g. after a resend.
	pub fn reset(&mut self) {
		self.remaining = self.start_secs;
		self.running = true;
	}

	/// Remaining whole seconds.
	pub fn remaining_secs(&self) -> u64 {
		self.remaining
	}

	/// Returns `true` once the countdown has reached zero.
	pub fn is_expired(&self) -> bool {
		self.remaining == 0
	}

	/// Remaining time rendered as `mm:ss`.
	pub fn display(&self) -> String {
		format!("{:02}:{:02}", self.remaining / 60, self.remaining % 60)
	}

	/// Pure state → view description.
	pub fn view(&self) -> CountdownView {
		CountdownView { display: self.display(), expired: self.is_expired() }
	}
}
impl Default for Countdown {
	fn default() -> Self {
		Self::for_otp()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn starts_at_the_standard_expiry_window() {
		let countdown = Countdown::for_otp();

		assert_eq!(countdown.remaining_secs(), 177);
		assert_eq!(countdown.display(), "02:57");
		assert!(!countdown.is_expired());
	}

	#[test]
	fn expires_exactly_once() {
		let mut countdown = Countdown::new(2);

		assert_eq!(countdown.tick(), CountdownEvent::None);
		assert_eq!(countdown.tick(), CountdownEvent::Expired);
		assert_eq!(countdown.tick(), CountdownEvent::None, "Ticks past zero stay silent.");
		assert!(countdown.is_expired());
	}

	#[test]
	fn reset_restores_the_full_window() {
		let mut countdown = Countdown::new(3);

		while countdown.tick() == CountdownEvent::None && !countdown.is_expired() {}

		countdown.reset();

		assert_eq!(countdown.remaining_secs(), 3);
		assert!(!countdown.is_expired());
	}

	#[test]
	fn stop_freezes_remaining_time() {
		let mut countdown = Countdown::new(10);

		countdown.tick();
		countdown.stop();
		countdown.tick();
		countdown.tick();

		assert_eq!(countdown.remaining_secs(), 9);

		countdown.reset();

		assert_eq!(countdown.remaining_secs(), 10);
		assert_eq!(countdown.tick(), CountdownEvent::None, "Reset resumes ticking.");
		assert_eq!(countdown.remaining_secs(), 9);
	}

	#[test]
	fn display_pads_minutes_and_seconds() {
		let mut countdown = Countdown::new(61);

		assert_eq!(countdown.display(), "01:01");

		countdown.tick();
		countdown.tick();

		assert_eq!(countdown.display(), "00:59");
	}
}
