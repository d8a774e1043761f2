//! Aggregate metadata: `EntitiesDescriptor` bundling many entity descriptors.

// self
use crate::{_prelude::*, metadata::EntityDescriptor};

/// Federation-wide export holding an ordered list of entities.
///
/// Only top-level `EntityDescriptor` children are kept; nested groups are skipped.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "EntitiesDescriptor")]
pub struct EntitiesDescriptor {
	/// Optional name of the export.
	#[serde(rename = "@Name", default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Optional XML identifier used by enveloped signatures.
	#[serde(rename = "@ID", default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Instant after which the export must not be relied upon.
	#[serde(
		rename = "@validUntil",
		default,
		skip_serializing_if = "Option::is_none",
		with = "time::serde::rfc3339::option"
	)]
	pub valid_until: Option<OffsetDateTime>,
	/// Entities in document order.
	#[serde(rename = "EntityDescriptor", default)]
	pub entity_descriptors: Vec<EntityDescriptor>,
}
impl EntitiesDescriptor {
	/// First entity, in document order, advertising an `IDPSSODescriptor`.
	pub fn first_identity_provider(&self) -> Option<&EntityDescriptor> {
		self.entity_descriptors.iter().find(|entity| entity.is_identity_provider())
	}

	/// Extracts the first identity provider, handing the aggregate back when none exists.
	pub fn into_identity_provider(mut self) -> Result<EntityDescriptor, Box<Self>> {
		match self.entity_descriptors.iter().position(EntityDescriptor::is_identity_provider) {
			Some(idx) => Ok(self.entity_descriptors.swap_remove(idx)),
			None => Err(Box::new(self)),
		}
	}
}
