// crates.io
use httpmock::prelude::*;
// self
use samlsp::{
	_preludet::*,
	error::FetchError,
	http::ReqwestHttpClient,
	metadata::HTTP_REDIRECT_BINDING,
	resolver::MetadataResolver,
	retry::{RetryPolicy, TokioSleeper},
};

const IDP_ENTITY: &str = include_str!("fixtures/idp_entity.xml");
const FEDERATION: &str = include_str!("fixtures/federation.xml");

fn fast_resolver(max_attempts: u32) -> MetadataResolver<ReqwestHttpClient, TokioSleeper> {
	MetadataResolver::new().with_policy(
		RetryPolicy::default()
			.with_max_attempts(max_attempts)
			.with_delay(Duration::milliseconds(5)),
	)
}

#[tokio::test]
async fn resolves_single_entity_over_http() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/idp/metadata");
			then.status(200).header("content-type", "application/samlmetadata+xml").body(IDP_ENTITY);
		})
		.await;
	let url = Url::parse(&server.url("/idp/metadata")).expect("Mock URL should parse.");
	let entity = fast_resolver(3).resolve(&url).await.expect("Metadata should resolve.");

	assert_eq!(entity.entity_id, "https://idp.example.com/metadata");

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn resolves_idp_from_federation_export() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/federation.xml");
			then.status(200).body(FEDERATION);
		})
		.await;
	let url = Url::parse(&server.url("/federation.xml")).expect("Mock URL should parse.");
	let entity = fast_resolver(3).resolve(&url).await.expect("Federation should resolve.");

	assert_eq!(entity.entity_id, "https://idp.federation.example.com/metadata");
	assert_eq!(
		entity
			.idp_sso_descriptor()
			.and_then(|idp| idp.single_sign_on_service(HTTP_REDIRECT_BINDING))
			.map(|endpoint| endpoint.location.as_str()),
		Some("https://idp.federation.example.com/sso")
	);

	mock.assert_async().await;
}

#[tokio::test]
async fn non_success_status_is_retried_until_exhausted() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/idp/metadata");
			then.status(503).body("upstream unavailable");
		})
		.await;
	let url = Url::parse(&server.url("/idp/metadata")).expect("Mock URL should parse.");
	let err = fast_resolver(3).resolve(&url).await.expect_err("503 responses must fail.");

	match err {
		Error::Fetch { attempts, source: FetchError::Status { status, reason }, .. } => {
			assert_eq!(attempts, 3);
			assert_eq!(status, 503);
			assert_eq!(reason, "Service Unavailable");
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	mock.assert_calls_async(3).await;
}

#[tokio::test]
async fn connection_refused_surfaces_network_error() {
	let url = Url::parse("http://127.0.0.1:9/metadata").expect("Discard-port URL should parse.");
	let err = fast_resolver(2).resolve(&url).await.expect_err("Closed ports must fail.");

	assert!(
		matches!(err, Error::Fetch { attempts: 2, source: FetchError::Network { .. }, .. }),
		"Unexpected error: {err:?}."
	);
}
