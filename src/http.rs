//! Transport primitives for fetching metadata documents.
//!
//! The module exposes [`MetadataHttpClient`], the resolver's only dependency on an HTTP stack.
//! Implementations perform one GET per call and classify the outcome: a non-success status,
//! a connection failure, and a truncated body all surface as [`FetchError`] so the resolver
//! can retry them uniformly.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::{_prelude::*, error::FetchError};

/// Boxed future returned by [`MetadataHttpClient::fetch`].
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<u8>, FetchError>> + 'a + Send>>;

/// Abstraction over HTTP transports able to download a metadata document.
///
/// Implementations must be `Send + Sync + 'static` so one transport can back many resolvers
/// behind an `Arc`. Each call is independent: no state may leak between attempts.
pub trait MetadataHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Performs a single GET of `url`, returning the full body on a 2xx response.
	fn fetch<'a>(&'a self, url: &'a Url) -> FetchFuture<'a>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl MetadataHttpClient for ReqwestHttpClient {
	fn fetch<'a>(&'a self, url: &'a Url) -> FetchFuture<'a> {
		Box::pin(async move {
			let response = self.0.get(url.clone()).send().await.map_err(FetchError::network)?;
			let status = response.status();

			if !status.is_success() {
				return Err(FetchError::Status {
					status: status.as_u16(),
					reason: status.canonical_reason().unwrap_or("Unknown Status").to_owned(),
				});
			}

			let body = response.bytes().await.map_err(FetchError::body)?;

			Ok(body.to_vec())
		})
	}
}
