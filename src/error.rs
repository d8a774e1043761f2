//! Crate-level error types shared by the resolver, the metadata decoder, and configuration.

// self
use crate::{_prelude::*, metadata::EntitiesDescriptor};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Metadata document could not be decoded under any accepted shape.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Aggregate document decoded but holds no usable entity.
	#[error(transparent)]
	Selection(#[from] SelectionError),

	/// Every fetch attempt failed; carries the last failure.
	#[error("Fetching metadata from {url} failed after {attempts} attempt(s).")]
	Fetch {
		/// Metadata URL that was requested.
		url: Url,
		/// Number of attempts performed.
		attempts: u32,
		/// Failure observed on the final attempt.
		#[source]
		source: FetchError,
	},
	/// Resolution was aborted through its cancellation token.
	#[error("Resolving metadata from {url} was cancelled after {attempts} attempt(s).")]
	Cancelled {
		/// Metadata URL that was requested.
		url: Url,
		/// Number of attempts started before cancellation.
		attempts: u32,
	},
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Service URL cannot host the service provider's endpoints.
	#[error("Service URL `{url}` is unusable: {reason}.")]
	InvalidServiceUrl {
		/// Offending URL.
		url: String,
		/// Why the URL was rejected.
		reason: &'static str,
	},
	/// Joining an endpoint path onto the service URL failed.
	#[error("Service provider endpoint URL is invalid.")]
	EndpointJoin {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Failure of a single fetch attempt.
///
/// Every variant is recovered locally by retrying until the [`RetryPolicy`] budget runs out.
///
/// [`RetryPolicy`]: crate::retry::RetryPolicy
#[derive(Debug, ThisError)]
pub enum FetchError {
	/// Underlying HTTP client reported a network failure (DNS, TCP, TLS).
	#[error("Network error occurred while fetching metadata.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Metadata endpoint answered with a non-success status.
	#[error("Metadata endpoint returned {status} {reason}.")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Canonical reason phrase for the status.
		reason: String,
	},
	/// Response body could not be read to completion.
	#[error("Metadata response body could not be read.")]
	Body {
		/// Transport-specific read error.
		#[source]
		source: BoxError,
	},
}
impl FetchError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Wraps a transport-specific body read error.
	pub fn body(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Body { source: Box::new(src) }
	}

	/// Returns the HTTP status for [`FetchError::Status`].
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Status { status, .. } => Some(*status),
			_ => None,
		}
	}

	/// Fetch failures are always treated as transient by the resolver.
	pub fn is_transient(&self) -> bool {
		true
	}
}

/// Failure to decode a metadata document under one accepted shape.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Body is not valid UTF-8.
	#[error("Metadata document is not valid UTF-8.")]
	Encoding(#[from] std::str::Utf8Error),
	/// Markup is malformed before the root element.
	#[error("Metadata document is not well-formed XML.")]
	Xml(#[from] quick_xml::Error),
	/// Document contains no root element.
	#[error("Metadata document has no root element.")]
	MissingRoot,
	/// Root element does not match the shape being decoded.
	#[error("Expected a metadata `{expected}` root element but found `{found}` in namespace {namespace:?}.")]
	UnexpectedRoot {
		/// Local name the shape expects.
		expected: &'static str,
		/// Local name of the actual root element.
		found: String,
		/// Namespace bound to the actual root element, if any.
		namespace: Option<String>,
	},
	/// Root element matched but its content does not fit the shape.
	#[error("Metadata document does not fit the {shape} shape.")]
	Structure {
		/// Shape being decoded.
		shape: &'static str,
		/// Structured decoding failure with the offending path.
		#[source]
		source: serde_path_to_error::Error<quick_xml::DeError>,
	},
}

/// Failure to pick a usable entity from a decoded aggregate.
#[derive(Debug, ThisError)]
pub enum SelectionError {
	/// No entity in the aggregate advertises an `IDPSSODescriptor`.
	#[error("No entity in the aggregate advertises an IDPSSODescriptor: {aggregate:?}.")]
	NoIdentityProvider {
		/// Parsed aggregate, kept for operator diagnosis.
		aggregate: Box<EntitiesDescriptor>,
	},
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn fetch_error_exposes_status_and_transience() {
		let status = FetchError::Status { status: 503, reason: "Service Unavailable".into() };

		assert_eq!(status.status(), Some(503));
		assert!(status.is_transient());
		assert_eq!(status.to_string(), "Metadata endpoint returned 503 Service Unavailable.");

		let network = FetchError::network(std::io::Error::other("refused"));

		assert_eq!(network.status(), None);
		assert!(network.source().is_some(), "Network errors must keep their source.");
	}

	#[test]
	fn fetch_exhaustion_reports_attempts_and_source() {
		let err = Error::Fetch {
			url: Url::parse("https://idp.example.com/metadata").expect("URL fixture should parse."),
			attempts: 12,
			source: FetchError::Status { status: 502, reason: "Bad Gateway".into() },
		};

		assert_eq!(
			err.to_string(),
			"Fetching metadata from https://idp.example.com/metadata failed after 12 attempt(s)."
		);
		assert_eq!(
			err.source().map(ToString::to_string).as_deref(),
			Some("Metadata endpoint returned 502 Bad Gateway.")
		);
	}
}
