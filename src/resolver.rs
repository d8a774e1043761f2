//! Identity-provider metadata resolution with bounded fixed-delay retries.
//!
//! [`MetadataResolver::resolve`] downloads a metadata document, retrying transport failures and
//! non-success statuses according to its [`RetryPolicy`], then decodes the body under the
//! accepted document shapes and narrows it to the entity acting as identity provider. Decode
//! and selection failures are returned immediately: retrying the same bytes cannot fix them.
//!
//! Resolution suspends at two points, the in-flight fetch and the pause between attempts.
//! [`MetadataResolver::resolve_with_cancellation`] observes a [`CancellationToken`] at both.

// self
use crate::{
	_prelude::*,
	http::MetadataHttpClient,
	metadata::{self, EntityDescriptor},
	obs::{self, ResolveOutcome, ResolveSpan},
	retry::{RetryPolicy, Sleeper, TokioSleeper},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Resolver specialized for the crate's default reqwest transport and tokio timer.
pub type ReqwestMetadataResolver = MetadataResolver<ReqwestHttpClient, TokioSleeper>;

/// Fetches and normalizes identity-provider metadata.
///
/// The resolver is stateless between calls: each resolution owns its attempt counter and
/// buffers, so one instance may serve concurrent callers. Concurrent resolutions of the same
/// URL are not deduplicated.
#[derive(Clone)]
pub struct MetadataResolver<C, S = TokioSleeper>
where
	C: ?Sized + MetadataHttpClient,
	S: ?Sized + Sleeper,
{
	/// HTTP client used for every fetch attempt.
	pub http_client: Arc<C>,
	/// Delay source awaited between attempts.
	pub sleeper: Arc<S>,
	/// Attempt budget and pause length.
	pub policy: RetryPolicy,
}
impl<C, S> MetadataResolver<C, S>
where
	C: ?Sized + MetadataHttpClient,
	S: ?Sized + Sleeper,
{
	/// Creates a resolver that reuses the caller-provided transport + sleeper pair.
	pub fn with_http_client(http_client: impl Into<Arc<C>>, sleeper: impl Into<Arc<S>>) -> Self {
		Self {
			http_client: http_client.into(),
			sleeper: sleeper.into(),
			policy: RetryPolicy::default(),
		}
	}

	/// Replaces the retry policy.
	pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
		self.policy = policy;

		self
	}

	/// Resolves the identity-provider entity published at `url`.
	pub async fn resolve(&self, url: &Url) -> Result<EntityDescriptor> {
		self.resolve_with_cancellation(url, &CancellationToken::new()).await
	}

	/// Resolves the identity-provider entity published at `url`, aborting with
	/// [`Error::Cancelled`] as soon as `cancel` fires.
	pub async fn resolve_with_cancellation(
		&self,
		url: &Url,
		cancel: &CancellationToken,
	) -> Result<EntityDescriptor> {
		let span = ResolveSpan::new(url);

		obs::record_resolve_outcome(ResolveOutcome::Attempt);

		let result: Result<EntityDescriptor> = span
			.instrument(async move {
				let body = self.fetch_with_retry(url, cancel).await?;
				let metadata = metadata::decode(&body)?;

				Ok(metadata.into_identity_provider()?)
			})
			.await;

		match &result {
			Ok(_) => obs::record_resolve_outcome(ResolveOutcome::Success),
			Err(Error::Cancelled { .. }) => obs::record_resolve_outcome(ResolveOutcome::Cancelled),
			Err(_) => obs::record_resolve_outcome(ResolveOutcome::Failure),
		}

		result
	}

	async fn fetch_with_retry(&self, url: &Url, cancel: &CancellationToken) -> Result<Vec<u8>> {
		let mut attempts = 0_u32;

		loop {
			attempts += 1;

			let outcome = tokio::select! {
				biased;
				_ = cancel.cancelled() => return Err(Error::Cancelled { url: url.clone(), attempts }),
				outcome = self.http_client.fetch(url) => outcome,
			};
			let err = match outcome {
				Ok(body) => {
					obs::record_fetch_outcome(ResolveOutcome::Success);

					return Ok(body);
				},
				Err(e) => e,
			};

			obs::record_fetch_outcome(ResolveOutcome::Failure);

			if !self.policy.allows_retry_after(attempts) {
				obs::log_fetch_exhausted(url, attempts, &err);

				return Err(Error::Fetch { url: url.clone(), attempts, source: err });
			}

			obs::log_fetch_retry(url, attempts, self.policy.max_attempts, self.policy.delay, &err);

			tokio::select! {
				biased;
				_ = cancel.cancelled() => return Err(Error::Cancelled { url: url.clone(), attempts }),
				_ = self.sleeper.sleep(self.policy.delay) => {},
			}
		}
	}
}
#[cfg(feature = "reqwest")]
impl MetadataResolver<ReqwestHttpClient, TokioSleeper> {
	/// Creates a resolver backed by a default reqwest client, the tokio timer, and the default
	/// retry policy.
	pub fn new() -> Self {
		Self::with_http_client(ReqwestHttpClient::default(), TokioSleeper)
	}
}
#[cfg(feature = "reqwest")]
impl Default for MetadataResolver<ReqwestHttpClient, TokioSleeper> {
	fn default() -> Self {
		Self::new()
	}
}
impl<C, S> Debug for MetadataResolver<C, S>
where
	C: ?Sized + MetadataHttpClient,
	S: ?Sized + Sleeper,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("MetadataResolver").field("policy", &self.policy).finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		_preludet::{ScriptedFetch, ScriptedHttpClient, build_scripted_resolver, test_url},
		error::FetchError,
	};

	const IDP_ENTITY: &str = include_str!("../tests/fixtures/idp_entity.xml");

	#[tokio::test]
	async fn success_on_first_attempt_never_sleeps() {
		let (resolver, client, sleeper) = build_scripted_resolver(
			ScriptedHttpClient::always(ScriptedFetch::body(IDP_ENTITY)),
			RetryPolicy::default(),
		);
		let entity = resolver
			.resolve(&test_url("https://idp.example.com/metadata"))
			.await
			.expect("Resolution should succeed.");

		assert_eq!(entity.entity_id, "https://idp.example.com/metadata");
		assert_eq!(client.calls(), 1);
		assert!(sleeper.delays().is_empty());
	}

	#[tokio::test]
	async fn status_failures_exhaust_the_budget() {
		let policy = RetryPolicy::default().with_max_attempts(3).with_delay(Duration::seconds(1));
		let (resolver, client, sleeper) = build_scripted_resolver(
			ScriptedHttpClient::always(ScriptedFetch::Status(503, "Service Unavailable")),
			policy,
		);
		let err = resolver
			.resolve(&test_url("https://idp.example.com/metadata"))
			.await
			.expect_err("Persistent 503 responses must fail.");

		assert!(matches!(
			err,
			Error::Fetch { attempts: 3, source: FetchError::Status { status: 503, .. }, .. }
		));
		assert_eq!(client.calls(), 3);
		assert_eq!(sleeper.delays(), vec![Duration::seconds(1); 2]);
	}

	#[tokio::test]
	async fn cancelled_token_stops_before_fetching() {
		let (resolver, client, _) = build_scripted_resolver(
			ScriptedHttpClient::always(ScriptedFetch::body(IDP_ENTITY)),
			RetryPolicy::default(),
		);
		let cancel = CancellationToken::new();

		cancel.cancel();

		let err = resolver
			.resolve_with_cancellation(&test_url("https://idp.example.com/metadata"), &cancel)
			.await
			.expect_err("Cancelled resolutions must fail.");

		assert!(matches!(err, Error::Cancelled { attempts: 1, .. }));
		assert_eq!(client.calls(), 0, "Biased select must observe cancellation first.");
	}
}
