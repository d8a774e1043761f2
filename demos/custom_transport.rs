//! Demonstrates plugging a custom transport and delay source into the resolver.
//!
//! 1. Implement [`MetadataHttpClient`] to serve metadata from anywhere (here, a local string
//!    that only becomes available on the third attempt).
//! 2. Implement [`Sleeper`] to control the pause between attempts.
//! 3. Pass both to [`MetadataResolver::with_http_client`].

// std
use std::sync::atomic::{AtomicU32, Ordering};
// crates.io
use color_eyre::Result;
use time::Duration;
use url::Url;
// self
use samlsp::{
	error::FetchError,
	http::{FetchFuture, MetadataHttpClient},
	resolver::MetadataResolver,
	retry::{RetryPolicy, SleepFuture, Sleeper},
};

const ENTITY: &str = r#"<EntityDescriptor xmlns="urn:oasis:names:tc:SAML:2.0:metadata" entityID="https://idp.example.com">
  <IDPSSODescriptor protocolSupportEnumeration="urn:oasis:names:tc:SAML:2.0:protocol"/>
</EntityDescriptor>"#;

#[derive(Default)]
struct WarmingUpTransport {
	attempts: AtomicU32,
}
impl MetadataHttpClient for WarmingUpTransport {
	fn fetch<'a>(&'a self, _url: &'a Url) -> FetchFuture<'a> {
		let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;

		Box::pin(async move {
			if attempt < 3 {
				Err(FetchError::Status { status: 503, reason: "Service Unavailable".into() })
			} else {
				Ok(ENTITY.as_bytes().to_vec())
			}
		})
	}
}

struct LoggingSleeper;
impl Sleeper for LoggingSleeper {
	fn sleep(&self, duration: Duration) -> SleepFuture<'_> {
		println!("Backing off for {duration}.");

		Box::pin(async {})
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let resolver = <MetadataResolver<WarmingUpTransport, LoggingSleeper>>::with_http_client(
		WarmingUpTransport::default(),
		LoggingSleeper,
	)
	.with_policy(RetryPolicy::default().with_max_attempts(5));
	let entity = resolver.resolve(&Url::parse("https://idp.example.com/metadata")?).await?;

	println!("Resolved {} (identity provider: {}).", entity.entity_id, entity.is_identity_provider());

	Ok(())
}
