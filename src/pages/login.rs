//! Login step: document entry, password, and the alternate-flow links.

// self
use crate::{
	_prelude::*,
	bridge::{Bridge, claim},
	config::PortalConfig,
	obs::{StepKind, StepOutcome, StepSpan, record_step_outcome},
	pages::PageOutcome,
	store::{TtlStore, key},
	validate::{FieldRules, Schema, ValidateFuture, ValueBag, rules},
	widget::{Document, DocumentInput, DocumentInputView, PasswordField, PasswordFieldView, Widget},
};

const FIELD_DOCUMENT: &str = "document_number";
const FIELD_PASSWORD: &str = "password";

/// Days a submitted document stays remembered for the next visit.
const SAVED_DOCUMENT_TTL_DAYS: i64 = 30;

/// View description for the login page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginPageView {
	/// Document widget presentation.
	pub document: DocumentInputView,
	/// Password widget presentation.
	pub password: PasswordFieldView,
	/// First violation per field from the last submit attempt.
	pub errors: BTreeMap<String, String>,
	/// Server-side verification failure published by the provider, if any.
	pub server_error: Option<String>,
}

/// Login page controller.
#[derive(Debug)]
pub struct LoginPage {
	store: TtlStore,
	bridge: Arc<Bridge>,
	config: PortalConfig,
	next_url: Url,
	document: DocumentInput,
	password: PasswordField,
	errors: BTreeMap<String, String>,
}
impl LoginPage {
	/// Builds the page, restoring the remembered document if one is still stored.
	pub fn new(store: TtlStore, bridge: Arc<Bridge>, config: PortalConfig, next_url: Url) -> Self {
		let mut document = DocumentInput::default();

		if let Some(saved) = store.get::<Document>(key::SAVED_DOCUMENT) {
			document.set_value(saved);
		}

		Self {
			store,
			bridge,
			config,
			next_url,
			document,
			password: PasswordField::new(),
			errors: BTreeMap::new(),
		}
	}

	/// Forwards typed text to the document number field.
	pub fn input_document(&mut self, text: &str) {
		self.document.input(text);
	}

	/// Switches the document kind.
	pub fn change_document_type(&mut self, doc_type: rules::DocumentType) {
		self.document.change_type(doc_type);
	}

	/// Forwards typed text to the password field.
	pub fn input_password(&mut self, text: &str) {
		self.password.input(text);
	}

	/// Flips the password visibility toggle.
	pub fn toggle_password_visibility(&mut self) -> bool {
		self.password.toggle_visibility()
	}

	/// Pure state → view description.
	pub fn view(&self) -> LoginPageView {
		LoginPageView {
			document: self.document.view(),
			password: self.password.view(),
			errors: self.errors.clone(),
			server_error: self.bridge.server_error(),
		}
	}

	/// Validates the form and, on success, persists the document, writes the identity claims,
	/// and yields the navigation to the next step.
	pub fn submit(&mut self) -> ValidateFuture<PageOutcome> {
		let span = StepSpan::new(StepKind::Login, "submit");

		record_step_outcome(StepKind::Login, StepOutcome::Attempt);

		let outcome = self.try_submit();
		let label = if matches!(outcome, PageOutcome::Stay) {
			StepOutcome::Failure
		} else {
			StepOutcome::Success
		};

		record_step_outcome(StepKind::Login, label);

		Box::pin(span.instrument(async move { outcome }))
	}

	/// Navigates to the first-time signup flow, carrying the captured parameters forward.
	pub fn signup(&self) -> PageOutcome {
		PageOutcome::Navigate(self.bridge.navigate_to_flow(self.config.signup_url(), &[]))
	}

	/// Navigates to the password-reset flow, carrying the captured parameters forward.
	pub fn forgot_password(&self) -> PageOutcome {
		PageOutcome::Navigate(self.bridge.navigate_to_flow(self.config.password_reset_url(), &[]))
	}

	fn try_submit(&mut self) -> PageOutcome {
		let document = self.document.value();
		let bag = ValueBag::new()
			.with(FIELD_DOCUMENT, document.number.as_str())
			.with(FIELD_PASSWORD, self.password.value());
		let schema = Schema::new()
			.field(FIELD_DOCUMENT, rules::document_rules(document.doc_type))
			.field(FIELD_PASSWORD, FieldRules::new().required("Enter your password."));
		let report = schema.check(&bag);

		if !report.valid {
			self.errors = report.errors;

			return PageOutcome::Stay;
		}

		self.errors.clear();
		self.bridge.clear_server_error();
		self.store.set_with_ttl(
			key::SAVED_DOCUMENT,
			&document,
			Duration::days(SAVED_DOCUMENT_TTL_DAYS),
		);
		self.bridge.write_claim(claim::DOCUMENT_TYPE, document.doc_type.as_str());
		self.bridge.write_claim(claim::DOCUMENT_NUMBER, &document.number);

		PageOutcome::Navigate(self.bridge.navigate_to_flow(&self.next_url, &[]))
	}
}
