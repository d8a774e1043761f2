//! SAML 2.0 service-provider bootstrap.
//!
//! Resolves the identity provider's published metadata with bounded retries, accepts both
//! single-entity and aggregate XML exports, then assembles the service provider's own endpoints
//! and key material.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod error;
pub mod http;
pub mod metadata;
pub mod obs;
pub mod resolver;
pub mod retry;
pub mod sp;
#[doc(hidden)]
pub mod _preludet {
	//! Convenience re-exports and scripted test doubles shared by unit and integration tests.

	pub use crate::_prelude::*;

	// std
	use std::collections::VecDeque;
	// self
	use crate::{
		error::FetchError,
		http::{FetchFuture, MetadataHttpClient},
		resolver::MetadataResolver,
		retry::{RetryPolicy, SleepFuture, Sleeper},
	};

	/// Resolver type alias wired to the scripted doubles below.
	pub type ScriptedResolver = MetadataResolver<ScriptedHttpClient, RecordingSleeper>;

	/// Canned outcome replayed by [`ScriptedHttpClient`].
	#[derive(Clone, Debug)]
	pub enum ScriptedFetch {
		/// Respond with the given body.
		Body(Vec<u8>),
		/// Respond with a non-success HTTP status.
		Status(u16, &'static str),
		/// Fail with a network error carrying the given message.
		Network(&'static str),
	}
	impl ScriptedFetch {
		/// Shorthand for a body built from a string slice.
		pub fn body(text: &str) -> Self {
			Self::Body(text.as_bytes().to_vec())
		}

		fn into_outcome(self) -> Result<Vec<u8>, FetchError> {
			match self {
				Self::Body(body) => Ok(body),
				Self::Status(status, reason) =>
					Err(FetchError::Status { status, reason: reason.to_owned() }),
				Self::Network(message) => Err(FetchError::network(std::io::Error::new(
					std::io::ErrorKind::ConnectionRefused,
					message,
				))),
			}
		}
	}

	/// Transport double that replays a queue of outcomes and counts calls.
	///
	/// Once the queue is drained the `fallback` outcome is returned forever.
	#[derive(Debug)]
	pub struct ScriptedHttpClient {
		script: Mutex<VecDeque<ScriptedFetch>>,
		fallback: ScriptedFetch,
		requested: Mutex<Vec<Url>>,
	}
	impl ScriptedHttpClient {
		/// Replays `script` in order, then `fallback` for every later call.
		pub fn new(script: impl IntoIterator<Item = ScriptedFetch>, fallback: ScriptedFetch) -> Self {
			Self {
				script: Mutex::new(script.into_iter().collect()),
				fallback,
				requested: Default::default(),
			}
		}

		/// Always responds with `outcome`.
		pub fn always(outcome: ScriptedFetch) -> Self {
			Self::new([], outcome)
		}

		/// Number of fetches performed so far.
		pub fn calls(&self) -> usize {
			self.requested.lock().len()
		}

		/// URLs requested so far, in order.
		pub fn requested(&self) -> Vec<Url> {
			self.requested.lock().clone()
		}
	}
	impl MetadataHttpClient for ScriptedHttpClient {
		fn fetch<'a>(&'a self, url: &'a Url) -> FetchFuture<'a> {
			Box::pin(async move {
				self.requested.lock().push(url.clone());

				let next = self.script.lock().pop_front().unwrap_or_else(|| self.fallback.clone());

				next.into_outcome()
			})
		}
	}

	/// Sleeper double that records every requested delay and returns immediately.
	#[derive(Debug, Default)]
	pub struct RecordingSleeper {
		delays: Mutex<Vec<Duration>>,
	}
	impl RecordingSleeper {
		/// Delays requested so far, in order.
		pub fn delays(&self) -> Vec<Duration> {
			self.delays.lock().clone()
		}
	}
	impl Sleeper for RecordingSleeper {
		fn sleep(&self, duration: Duration) -> SleepFuture<'_> {
			self.delays.lock().push(duration);

			Box::pin(async {})
		}
	}

	/// Builds a resolver around the scripted doubles, returning handles to both for assertions.
	pub fn build_scripted_resolver(
		http_client: ScriptedHttpClient,
		policy: RetryPolicy,
	) -> (ScriptedResolver, Arc<ScriptedHttpClient>, Arc<RecordingSleeper>) {
		let http_client = Arc::new(http_client);
		let sleeper = Arc::new(RecordingSleeper::default());
		let resolver = MetadataResolver::with_http_client(http_client.clone(), sleeper.clone())
			.with_policy(policy);

		(resolver, http_client, sleeper)
	}

	/// Parses a URL fixture.
	pub fn test_url(value: &str) -> Url {
		Url::parse(value).expect("Test URL fixture should parse.")
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use tokio_util::sync::CancellationToken;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use tokio_util::sync::CancellationToken;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
