//! Retry budget and the delay seam used between fetch attempts.

// self
use crate::_prelude::*;

/// Boxed future returned by [`Sleeper::sleep`].
pub type SleepFuture<'a> = Pin<Box<dyn Future<Output = ()> + 'a + Send>>;

/// Suspends the resolver between attempts.
///
/// The resolver never sleeps directly, so tests can swap in a double that records the
/// requested delays instead of waiting them out.
pub trait Sleeper
where
	Self: 'static + Send + Sync,
{
	/// Completes once `duration` has elapsed.
	fn sleep(&self, duration: Duration) -> SleepFuture<'_>;
}

/// [`Sleeper`] backed by the tokio timer.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioSleeper;
impl Sleeper for TokioSleeper {
	fn sleep(&self, duration: Duration) -> SleepFuture<'_> {
		// Negative durations do not sleep.
		let duration = std::time::Duration::try_from(duration).unwrap_or_default();

		Box::pin(tokio::time::sleep(duration))
	}
}

/// Fixed-delay retry budget for metadata fetches.
///
/// Every failed attempt is followed by the same `delay`; there is no growth and no jitter.
/// The defaults allow 12 attempts with 11 five-second pauses between them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
	/// Total attempts, including the first one. Never below 1.
	pub max_attempts: u32,
	/// Pause between consecutive attempts.
	pub delay: Duration,
}
impl RetryPolicy {
	/// Default attempt budget.
	pub const DEFAULT_MAX_ATTEMPTS: u32 = 12;
	/// Default pause between attempts.
	pub const DEFAULT_DELAY: Duration = Duration::seconds(5);

	/// Policy that gives up after the first failure.
	pub const fn no_retry() -> Self {
		Self { max_attempts: 1, delay: Duration::ZERO }
	}

	/// Overrides the attempt budget (clamped to at least one attempt).
	pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
		self.max_attempts = max_attempts.max(1);

		self
	}

	/// Overrides the pause between attempts (negative values become zero).
	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = if delay.is_negative() { Duration::ZERO } else { delay };

		self
	}

	/// Returns true when another attempt is allowed after `attempts` failures.
	pub fn allows_retry_after(&self, attempts: u32) -> bool {
		attempts < self.max_attempts.max(1)
	}

	/// Upper bound on the time spent waiting between attempts.
	pub fn worst_case_delay(&self) -> Duration {
		let pauses = self.max_attempts.max(1) - 1;

		self.delay.saturating_mul(i32::try_from(pauses).unwrap_or(i32::MAX))
	}
}
impl Default for RetryPolicy {
	fn default() -> Self {
		Self { max_attempts: Self::DEFAULT_MAX_ATTEMPTS, delay: Self::DEFAULT_DELAY }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn default_budget_allows_twelve_attempts() {
		let policy = RetryPolicy::default();

		assert!(policy.allows_retry_after(11));
		assert!(!policy.allows_retry_after(12));
		assert_eq!(policy.worst_case_delay(), Duration::seconds(55));
	}

	#[test]
	fn builders_clamp_inputs() {
		let policy = RetryPolicy::default().with_max_attempts(0).with_delay(Duration::seconds(-3));

		assert_eq!(policy.max_attempts, 1);
		assert_eq!(policy.delay, Duration::ZERO);
		assert!(!policy.allows_retry_after(1));
		assert_eq!(RetryPolicy::no_retry(), policy);
	}

	#[test]
	fn policy_deserializes_with_defaults() {
		let policy: RetryPolicy = serde_json::from_str("{\"max_attempts\":3}")
			.expect("Partial policy should deserialize.");

		assert_eq!(policy.max_attempts, 3);
		assert_eq!(policy.delay, RetryPolicy::DEFAULT_DELAY);
	}

	#[tokio::test]
	async fn tokio_sleeper_completes() {
		TokioSleeper.sleep(Duration::milliseconds(1)).await;
		TokioSleeper.sleep(Duration::ZERO).await;
	}
}
