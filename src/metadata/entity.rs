//! Single-entity metadata: `EntityDescriptor` and the role descriptors it carries.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
// self
use crate::_prelude::*;

/// Published metadata for one federation participant.
///
/// IDP capability is signalled by the presence of at least one `IDPSSODescriptor`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "EntityDescriptor")]
pub struct EntityDescriptor {
	/// Entity identifier (`entityID`).
	#[serde(rename = "@entityID")]
	pub entity_id: String,
	/// Optional XML identifier used by enveloped signatures.
	#[serde(rename = "@ID", default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Instant after which the metadata must not be relied upon.
	#[serde(
		rename = "@validUntil",
		default,
		skip_serializing_if = "Option::is_none",
		with = "time::serde::rfc3339::option"
	)]
	pub valid_until: Option<OffsetDateTime>,
	/// Advisory caching period, kept verbatim as an `xs:duration` literal.
	#[serde(rename = "@cacheDuration", default, skip_serializing_if = "Option::is_none")]
	pub cache_duration: Option<String>,
	/// Identity-provider roles advertised by the entity.
	#[serde(rename = "IDPSSODescriptor", default)]
	pub idp_sso_descriptors: Vec<IdpSsoDescriptor>,
	/// Service-provider roles advertised by the entity.
	#[serde(rename = "SPSSODescriptor", default)]
	pub sp_sso_descriptors: Vec<SpSsoDescriptor>,
}
impl EntityDescriptor {
	/// Creates an entity with no roles.
	pub fn new(entity_id: impl Into<String>) -> Self {
		Self {
			entity_id: entity_id.into(),
			id: None,
			valid_until: None,
			cache_duration: None,
			idp_sso_descriptors: Vec::new(),
			sp_sso_descriptors: Vec::new(),
		}
	}

	/// Returns true when the entity advertises an `IDPSSODescriptor`.
	pub fn is_identity_provider(&self) -> bool {
		!self.idp_sso_descriptors.is_empty()
	}

	/// First identity-provider role, if any.
	pub fn idp_sso_descriptor(&self) -> Option<&IdpSsoDescriptor> {
		self.idp_sso_descriptors.first()
	}

	/// First service-provider role, if any.
	pub fn sp_sso_descriptor(&self) -> Option<&SpSsoDescriptor> {
		self.sp_sso_descriptors.first()
	}
}

/// `IDPSSODescriptor` role element.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "IDPSSODescriptor")]
pub struct IdpSsoDescriptor {
	/// Space-separated protocol identifiers.
	#[serde(rename = "@protocolSupportEnumeration", default)]
	pub protocol_support_enumeration: String,
	/// Whether the IDP requires signed authentication requests.
	#[serde(rename = "@WantAuthnRequestsSigned", default, skip_serializing_if = "Option::is_none")]
	pub want_authn_requests_signed: Option<bool>,
	/// Keys published for signing and encryption.
	#[serde(rename = "KeyDescriptor", default)]
	pub key_descriptors: Vec<KeyDescriptor>,
	/// Single logout endpoints.
	#[serde(rename = "SingleLogoutService", default)]
	pub single_logout_services: Vec<Endpoint>,
	/// Supported name identifier formats.
	#[serde(rename = "NameIDFormat", default)]
	pub name_id_formats: Vec<String>,
	/// Single sign-on endpoints.
	#[serde(rename = "SingleSignOnService", default)]
	pub single_sign_on_services: Vec<Endpoint>,
}
impl IdpSsoDescriptor {
	/// First single sign-on endpoint exposed for `binding`.
	pub fn single_sign_on_service(&self, binding: &str) -> Option<&Endpoint> {
		self.single_sign_on_services.iter().find(|endpoint| endpoint.binding == binding)
	}

	/// Certificates usable for verifying the IDP's signatures.
	pub fn signing_certificates(&self) -> impl Iterator<Item = &str> {
		self.key_descriptors
			.iter()
			.filter(|key| key.is_signing())
			.flat_map(|key| key.certificates())
	}
}

/// `SPSSODescriptor` role element.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "SPSSODescriptor")]
pub struct SpSsoDescriptor {
	/// Space-separated protocol identifiers.
	#[serde(rename = "@protocolSupportEnumeration", default)]
	pub protocol_support_enumeration: String,
	/// Whether the SP signs its authentication requests.
	#[serde(rename = "@AuthnRequestsSigned", default, skip_serializing_if = "Option::is_none")]
	pub authn_requests_signed: Option<bool>,
	/// Whether the SP requires signed assertions.
	#[serde(rename = "@WantAssertionsSigned", default, skip_serializing_if = "Option::is_none")]
	pub want_assertions_signed: Option<bool>,
	/// Keys published for signing and encryption.
	#[serde(rename = "KeyDescriptor", default)]
	pub key_descriptors: Vec<KeyDescriptor>,
	/// Single logout endpoints.
	#[serde(rename = "SingleLogoutService", default)]
	pub single_logout_services: Vec<Endpoint>,
	/// Supported name identifier formats.
	#[serde(rename = "NameIDFormat", default)]
	pub name_id_formats: Vec<String>,
	/// Assertion consumer endpoints.
	#[serde(rename = "AssertionConsumerService", default)]
	pub assertion_consumer_services: Vec<IndexedEndpoint>,
}

/// Intended use of a published key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyUse {
	/// Key verifies signatures.
	Signing,
	/// Key encrypts content for the publisher.
	Encryption,
}

/// `KeyDescriptor` element; certificates are carried but never validated here.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDescriptor {
	/// Declared key use; absent means the key serves both purposes.
	#[serde(rename = "@use", default, skip_serializing_if = "Option::is_none")]
	pub key_use: Option<KeyUse>,
	/// `ds:KeyInfo` payload.
	#[serde(rename = "KeyInfo", default)]
	pub key_info: KeyInfo,
}
impl KeyDescriptor {
	/// Returns true when the key may be used to verify signatures.
	pub fn is_signing(&self) -> bool {
		matches!(self.key_use, None | Some(KeyUse::Signing))
	}

	/// Base64 certificate bodies in document order.
	pub fn certificates(&self) -> impl Iterator<Item = &str> {
		self.key_info
			.x509_data
			.iter()
			.flat_map(|data| data.certificates.iter().map(String::as_str))
	}

	/// Decodes every certificate body to DER bytes.
	pub fn certificates_der(&self) -> Result<Vec<Vec<u8>>, base64::DecodeError> {
		self.certificates().map(decode_certificate).collect()
	}
}

/// `ds:KeyInfo` element.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInfo {
	/// `ds:X509Data` children.
	#[serde(rename = "X509Data", default)]
	pub x509_data: Vec<X509Data>,
}

/// `ds:X509Data` element.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct X509Data {
	/// Base64 bodies of `ds:X509Certificate` children.
	#[serde(rename = "X509Certificate", default)]
	pub certificates: Vec<String>,
}

/// Protocol endpoint advertised by a role descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
	/// Binding URI.
	#[serde(rename = "@Binding")]
	pub binding: String,
	/// Endpoint location.
	#[serde(rename = "@Location")]
	pub location: String,
	/// Optional separate location for responses.
	#[serde(rename = "@ResponseLocation", default, skip_serializing_if = "Option::is_none")]
	pub response_location: Option<String>,
}
impl Endpoint {
	/// Parses the endpoint location.
	pub fn location_url(&self) -> Result<Url, url::ParseError> {
		Url::parse(&self.location)
	}
}

/// Endpoint carrying an index, used by assertion consumer services.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedEndpoint {
	/// Binding URI.
	#[serde(rename = "@Binding")]
	pub binding: String,
	/// Endpoint location.
	#[serde(rename = "@Location")]
	pub location: String,
	/// Endpoint index.
	#[serde(rename = "@index")]
	pub index: u32,
	/// Marks the default endpoint.
	#[serde(rename = "@isDefault", default, skip_serializing_if = "Option::is_none")]
	pub is_default: Option<bool>,
}

fn decode_certificate(body: &str) -> Result<Vec<u8>, base64::DecodeError> {
	let compact: String = body.chars().filter(|ch| !ch.is_ascii_whitespace()).collect();

	STANDARD.decode(compact)
}
