//! Portal flow configuration: the hosted flow entry points and telemetry identifiers.

// self
use crate::_prelude::*;

/// Analytics identifiers forwarded to the host's tag container.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryIds {
	/// Tag container identifier, e.g. `GTM-XXXXXXX`.
	pub container: String,
	/// Prefix prepended to per-step page names.
	pub page_prefix: String,
}

/// Validated entry points of the three hosted flows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortalConfig {
	login_url: Url,
	signup_url: Url,
	password_reset_url: Url,
	telemetry: Option<TelemetryIds>,
}
impl PortalConfig {
	/// Starts building a configuration.
	pub fn builder() -> PortalConfigBuilder {
		PortalConfigBuilder::default()
	}

	/// Entry point of the login flow.
	pub fn login_url(&self) -> &Url {
		&self.login_url
	}

	/// Entry point of the first-time signup flow.
	pub fn signup_url(&self) -> &Url {
		&self.signup_url
	}

	/// Entry point of the password-reset flow.
	pub fn password_reset_url(&self) -> &Url {
		&self.password_reset_url
	}

	/// Analytics identifiers, if configured.
	pub fn telemetry(&self) -> Option<&TelemetryIds> {
		self.telemetry.as_ref()
	}
}

/// Builder for [`PortalConfig`]; [`PortalConfigBuilder::build`] performs all validation.
///
/// Deserializable so hosts can inject it from build-time configuration; validation still runs
/// in [`PortalConfigBuilder::build`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfigBuilder {
	login_url: Option<Url>,
	signup_url: Option<Url>,
	password_reset_url: Option<Url>,
	telemetry: Option<TelemetryIds>,
}
impl PortalConfigBuilder {
	/// Sets the login flow entry point.
	pub fn login_url(mut self, url: Url) -> Self {
		self.login_url = Some(url);

		self
	}

	/// Sets the signup flow entry point.
	pub fn signup_url(mut self, url: Url) -> Self {
		self.signup_url = Some(url);

		self
	}

	/// Sets the password-reset flow entry point.
	pub fn password_reset_url(mut self, url: Url) -> Self {
		self.password_reset_url = Some(url);

		self
	}

	/// Sets the analytics identifiers.
	pub fn telemetry(mut self, telemetry: TelemetryIds) -> Self {
		self.telemetry = Some(telemetry);

		self
	}

	/// Validates and assembles the configuration.
	///
	/// Every flow URL is required and must use HTTPS; a configured tag container must be
	/// non-empty.
	pub fn build(self) -> Result<PortalConfig, PortalConfigError> {
		let login_url = Self::required_https("login_url", self.login_url)?;
		let signup_url = Self::required_https("signup_url", self.signup_url)?;
		let password_reset_url =
			Self::required_https("password_reset_url", self.password_reset_url)?;

		if let Some(telemetry) = &self.telemetry
			&& telemetry.container.is_empty()
		{
			return Err(PortalConfigError::EmptyTelemetryContainer);
		}

		Ok(PortalConfig { login_url, signup_url, password_reset_url, telemetry: self.telemetry })
	}

	fn required_https(field: &'static str, url: Option<Url>) -> Result<Url, PortalConfigError> {
		let url = url.ok_or(PortalConfigError::MissingUrl { field })?;

		if url.scheme() != "https" {
			return Err(PortalConfigError::InsecureUrl {
				field,
				scheme: url.scheme().to_owned(),
			});
		}

		Ok(url)
	}
}

/// Configuration validation failure.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum PortalConfigError {
	/// A required flow URL was not provided.
	#[error("missing required flow URL `{field}`.")]
	MissingUrl {
		/// Builder field name.
		field: &'static str,
	},
	/// A flow URL does not use HTTPS.
	#[error("flow URL `{field}` must use HTTPS, got `{scheme}`.")]
	InsecureUrl {
		/// Builder field name.
		field: &'static str,
		/// The rejected scheme.
		scheme: String,
	},
	/// Telemetry was configured with an empty tag container.
	#[error("telemetry tag container must be non-empty.")]
	EmptyTelemetryContainer,
}
