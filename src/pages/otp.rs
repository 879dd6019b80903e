//! One-time code entry step: six boxes, expiry countdown, and the resend action.

// self
use crate::{
	_prelude::*,
	bridge::{Bridge, claim},
	obs::{StepKind, StepOutcome, StepSpan, record_step_outcome},
	pages::PageOutcome,
	timer::{Countdown, CountdownEvent, CountdownView},
	validate::{FieldValue, ValidateFuture, ValueBag, rules},
	widget::{OtpEvent, OtpInput, OtpInputView, OtpKey, Widget},
};

/// View description for the code entry page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OtpPageView {
	/// Code boxes presentation.
	pub otp: OtpInputView,
	/// Countdown presentation.
	pub countdown: CountdownView,
	/// Whether the continue action is currently available.
	pub can_submit: bool,
	/// Whether the resend action is currently available.
	pub resend_enabled: bool,
	/// Validation error from the last submit attempt, if any.
	pub error: Option<String>,
	/// Server-side verification failure published by the provider, if any.
	pub server_error: Option<String>,
}

/// Code entry page controller.
#[derive(Debug)]
pub struct OtpPage {
	bridge: Arc<Bridge>,
	next_url: Url,
	otp: OtpInput,
	countdown: Countdown,
	resend_enabled: bool,
	error: Option<String>,
}
impl OtpPage {
	/// Builds the page with empty boxes and a fresh countdown.
	pub fn new(bridge: Arc<Bridge>, next_url: Url) -> Self {
		Self {
			bridge,
			next_url,
			otp: OtpInput::new(),
			countdown: Countdown::for_otp(),
			resend_enabled: false,
			error: None,
		}
	}

	/// Forwards a keystroke to the focused box.
	pub fn press(&mut self, key: OtpKey) -> OtpEvent {
		self.otp.press(key)
	}

	/// Forwards pasted text to the boxes.
	pub fn paste(&mut self, text: &str) -> OtpEvent {
		self.otp.paste(text)
	}

	/// Advances the countdown by one second; expiry locks input and enables resend.
	pub fn tick(&mut self) -> CountdownEvent {
		let event = self.countdown.tick();

		if event == CountdownEvent::Expired {
			self.otp.set_enabled(false);
			self.resend_enabled = true;
		}

		event
	}

	/// Requests a fresh code: clears the boxes, unlocks input, and restarts the countdown.
	///
	/// A no-op until the current code has expired.
	pub fn resend(&mut self) {
		if !self.resend_enabled {
			return;
		}

		self.otp.reset();
		self.otp.set_enabled(true);
		self.countdown.reset();
		self.resend_enabled = false;
		self.error = None;
	}

	/// Returns to the method selection step.
	pub fn back(&self) -> PageOutcome {
		PageOutcome::Back
	}

	/// Whether the continue action is currently available.
	pub fn can_submit(&self) -> bool {
		self.otp.is_filled() && !self.countdown.is_expired()
	}

	/// Pure state → view description.
	pub fn view(&self) -> OtpPageView {
		OtpPageView {
			otp: self.otp.view(),
			countdown: self.countdown.view(),
			can_submit: self.can_submit(),
			resend_enabled: self.resend_enabled,
			error: self.error.clone(),
			server_error: self.bridge.server_error(),
		}
	}

	/// Validates the code and, on success, writes the code claim, freezes the countdown, and
	/// yields the navigation to the next step.
	pub fn submit(&mut self) -> ValidateFuture<PageOutcome> {
		let span = StepSpan::new(StepKind::Otp, "submit");

		record_step_outcome(StepKind::Otp, StepOutcome::Attempt);

		let outcome = self.try_submit();
		let label = if matches!(outcome, PageOutcome::Stay) {
			StepOutcome::Failure
		} else {
			StepOutcome::Success
		};

		record_step_outcome(StepKind::Otp, label);

		Box::pin(span.instrument(async move { outcome }))
	}

	fn try_submit(&mut self) -> PageOutcome {
		if self.countdown.is_expired() {
			self.error = Some("The code has expired. Request a new one.".to_owned());

			return PageOutcome::Stay;
		}

		let code = self.otp.value();
		let value = FieldValue::from(code.as_str());
		let violations = rules::otp().check(Some(&value), &ValueBag::new());

		if let Some(first) = violations.into_iter().next() {
			self.error = Some(first);

			return PageOutcome::Stay;
		}

		self.error = None;
		self.bridge.clear_server_error();
		self.bridge.write_claim(claim::OTP_CODE, &code);
		self.countdown.stop();

		PageOutcome::Navigate(self.bridge.navigate_to_flow(&self.next_url, &[]))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{bridge::MemoryClaims, timer::OTP_COUNTDOWN_START_SECS};

	fn fixture() -> (OtpPage, Arc<Bridge>) {
		let bridge = Arc::new(Bridge::new(
			&Url::parse("https://portal.example/otp").expect("URL should parse."),
			Arc::new(MemoryClaims::new()),
		));
		let page = OtpPage::new(
			bridge.clone(),
			Url::parse("https://portal.example/password").expect("URL should parse."),
		);

		(page, bridge)
	}

	fn expire(page: &mut OtpPage) {
		for _ in 0..OTP_COUNTDOWN_START_SECS {
			page.tick();
		}
	}

	#[tokio::test]
	async fn complete_code_submits_and_writes_the_claim() {
		let (mut page, bridge) = fixture();
		let event = page.paste("123456");

		assert_eq!(event, OtpEvent::Completed("123456".into()));
		assert!(page.can_submit());

		let outcome = page.submit().await;
		let PageOutcome::Navigate(navigation) = outcome else {
			panic!("Complete code should navigate.");
		};

		assert_eq!(navigation.url.path(), "/password");
		assert_eq!(bridge.read_claim(claim::OTP_CODE).as_deref(), Some("123456"));
	}

	#[tokio::test]
	async fn incomplete_code_stays_with_an_error() {
		let (mut page, bridge) = fixture();

		page.paste("123");

		assert!(!page.can_submit());
		assert_eq!(page.submit().await, PageOutcome::Stay);
		assert!(page.view().error.is_some());
		assert_eq!(bridge.read_claim(claim::OTP_CODE), None);
	}

	#[test]
	fn expiry_locks_input_and_enables_resend() {
		let (mut page, _) = fixture();

		page.paste("123456");
		expire(&mut page);

		let view = page.view();

		assert!(view.countdown.expired);
		assert!(!view.otp.enabled);
		assert!(view.resend_enabled);
		assert!(!view.can_submit, "An expired code cannot be submitted.");
		assert_eq!(page.press(OtpKey::Digit('1')), OtpEvent::None, "Input is locked.");
	}

	#[test]
	fn resend_restores_a_fresh_round() {
		let (mut page, _) = fixture();

		page.paste("123456");
		expire(&mut page);
		page.resend();

		let view = page.view();

		assert_eq!(view.countdown.display, "02:57");
		assert!(view.otp.enabled);
		assert!(!view.resend_enabled);
		assert_eq!(view.otp.boxes.iter().filter(|b| !b.is_empty()).count(), 0);
	}

	#[test]
	fn resend_before_expiry_is_a_noop() {
		let (mut page, _) = fixture();

		page.paste("123456");
		page.tick();
		page.resend();

		assert_eq!(page.view().otp.boxes[0], "1", "Early resend must not clear the boxes.");
	}

	#[test]
	fn back_returns_to_the_previous_step() {
		let (page, _) = fixture();

		assert_eq!(page.back(), PageOutcome::Back);
	}
}
