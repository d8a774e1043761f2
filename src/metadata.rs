//! SAML 2.0 metadata model (data) and the two-shape decoder (behavior).
//!
//! `entity` models a single `EntityDescriptor` with its IDP and SP role descriptors.
//! `aggregate` models an `EntitiesDescriptor` export bundling many entities. `decode` turns a
//! fetched body into [`Metadata`] by trying each accepted document shape in priority order.

pub mod aggregate;
pub mod decode;
pub mod entity;

pub use aggregate::*;
pub use decode::*;
pub use entity::*;

// self
use crate::error::SelectionError;

/// Namespace every accepted metadata root element must be bound to.
pub const METADATA_NAMESPACE: &str = "urn:oasis:names:tc:SAML:2.0:metadata";
/// HTTP-Redirect binding identifier.
pub const HTTP_REDIRECT_BINDING: &str = "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-Redirect";
/// HTTP-POST binding identifier.
pub const HTTP_POST_BINDING: &str = "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST";

/// Metadata document decoded under one of the accepted shapes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Metadata {
	/// Document addressed a single entity directly.
	Entity(EntityDescriptor),
	/// Document bundled several entities (e.g., a federation-wide export).
	Aggregate(EntitiesDescriptor),
}
impl Metadata {
	/// Short label for the decoded shape.
	pub const fn shape(&self) -> &'static str {
		match self {
			Metadata::Entity(_) => "EntityDescriptor",
			Metadata::Aggregate(_) => "EntitiesDescriptor",
		}
	}

	/// Narrows the document to the entity acting as identity provider.
	///
	/// A directly addressed entity is returned as-is without inspecting its roles. An aggregate
	/// yields its first entity, in document order, that carries an `IDPSSODescriptor`.
	pub fn into_identity_provider(self) -> Result<EntityDescriptor, SelectionError> {
		match self {
			Metadata::Entity(entity) => Ok(entity),
			Metadata::Aggregate(aggregate) => aggregate
				.into_identity_provider()
				.map_err(|aggregate| SelectionError::NoIdentityProvider { aggregate }),
		}
	}
}
