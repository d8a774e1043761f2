//! Two-shape metadata decoder.
//!
//! Identity providers publish metadata either as a single `EntityDescriptor` or inside an
//! `EntitiesDescriptor` export. [`decode`] walks a fixed table of candidate shapes in priority
//! order and returns the first success. When every shape fails, the error from the
//! highest-priority shape wins.

// crates.io
use quick_xml::{
	NsReader,
	de::Deserializer,
	events::Event,
	name::{Namespace, ResolveResult},
};
use serde::de::DeserializeOwned;
// self
use crate::{
	error::DecodeError,
	metadata::{EntitiesDescriptor, EntityDescriptor, METADATA_NAMESPACE, Metadata},
};

type ShapeDecoder = fn(&str) -> Result<Metadata, DecodeError>;

struct Shape {
	root: &'static str,
	decode: ShapeDecoder,
}

/// Accepted document shapes, highest priority first.
const SHAPES: [Shape; 2] = [
	Shape { root: "EntityDescriptor", decode: decode_entity },
	Shape { root: "EntitiesDescriptor", decode: decode_aggregate },
];

/// Root element names accepted by [`decode`], in priority order.
pub fn accepted_roots() -> impl Iterator<Item = &'static str> {
	SHAPES.iter().map(|shape| shape.root)
}

/// Decodes a fetched body under the first accepted shape that fits.
pub fn decode(body: &[u8]) -> Result<Metadata, DecodeError> {
	let text = std::str::from_utf8(body)?;
	let mut first_error = None;

	for shape in SHAPES.iter() {
		match (shape.decode)(text) {
			Ok(metadata) => return Ok(metadata),
			Err(e) => {
				first_error.get_or_insert(e);
			},
		}
	}

	Err(first_error.unwrap_or(DecodeError::MissingRoot))
}

fn decode_entity(text: &str) -> Result<Metadata, DecodeError> {
	decode_shape::<EntityDescriptor>(text, "EntityDescriptor").map(Metadata::Entity)
}

fn decode_aggregate(text: &str) -> Result<Metadata, DecodeError> {
	decode_shape::<EntitiesDescriptor>(text, "EntitiesDescriptor").map(Metadata::Aggregate)
}

fn decode_shape<T>(text: &str, shape: &'static str) -> Result<T, DecodeError>
where
	T: DeserializeOwned,
{
	expect_root(text, shape)?;

	let mut deserializer = Deserializer::from_str(text);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| DecodeError::Structure { shape, source })
}

/// Checks that the document root is `expected` in the SAML metadata namespace.
///
/// The serde layer matches local names only and never looks at the root tag, so the shape
/// discrimination happens here.
fn expect_root(text: &str, expected: &'static str) -> Result<(), DecodeError> {
	let mut reader = NsReader::from_str(text);

	loop {
		let (resolved, event) = reader.read_resolved_event()?;

		match event {
			Event::Start(start) | Event::Empty(start) => {
				let found = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
				let namespace = match resolved {
					ResolveResult::Bound(Namespace(uri)) =>
						Some(String::from_utf8_lossy(uri).into_owned()),
					_ => None,
				};

				if found == expected && namespace.as_deref() == Some(METADATA_NAMESPACE) {
					return Ok(());
				}

				return Err(DecodeError::UnexpectedRoot { expected, found, namespace });
			},
			Event::Eof => return Err(DecodeError::MissingRoot),
			_ => {},
		}
	}
}
