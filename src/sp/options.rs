//! Caller-supplied service provider options.

// self
use crate::{_prelude::*, metadata::EntityDescriptor};

/// Private key material that stays out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrivateKey(String);
impl PrivateKey {
	/// Wraps a key (typically PEM).
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner key material. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl Debug for PrivateKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("PrivateKey").field(&"<redacted>").finish()
	}
}
impl Display for PrivateKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Inputs for building a [`ServiceProviderConfig`].
///
/// Supply either `idp_metadata` or `idp_metadata_url`; with neither, the configuration is
/// built without IDP metadata and the caller must fill it in later.
///
/// [`ServiceProviderConfig`]: crate::sp::ServiceProviderConfig
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ServiceProviderOptions {
	/// Public base URL of the service provider.
	pub url: Url,
	/// Private key used for signing.
	pub key: PrivateKey,
	/// Certificate matching `key`.
	pub certificate: String,
	/// Accept logins initiated by the identity provider.
	#[serde(default)]
	pub allow_idp_initiated: bool,
	/// Pre-fetched identity provider metadata; never read from serialized options.
	#[serde(skip)]
	pub idp_metadata: Option<EntityDescriptor>,
	/// Location to fetch identity provider metadata from.
	#[serde(default)]
	pub idp_metadata_url: Option<Url>,
}
impl ServiceProviderOptions {
	/// Creates options with no IDP metadata source.
	pub fn new(url: Url, key: impl Into<String>, certificate: impl Into<String>) -> Self {
		Self {
			url,
			key: PrivateKey::new(key),
			certificate: certificate.into(),
			allow_idp_initiated: false,
			idp_metadata: None,
			idp_metadata_url: None,
		}
	}

	/// Toggles acceptance of IDP-initiated logins.
	pub fn with_allow_idp_initiated(mut self, allow: bool) -> Self {
		self.allow_idp_initiated = allow;

		self
	}

	/// Supplies pre-fetched IDP metadata.
	pub fn with_idp_metadata(mut self, entity: EntityDescriptor) -> Self {
		self.idp_metadata = Some(entity);

		self
	}

	/// Supplies the URL to resolve IDP metadata from.
	pub fn with_idp_metadata_url(mut self, url: Url) -> Self {
		self.idp_metadata_url = Some(url);

		self
	}
}
