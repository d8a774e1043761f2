// self
use crate::{_prelude::*, error::FetchError};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedResolve<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedResolve<F> = F;

/// Span wrapping one metadata resolution.
#[derive(Clone, Debug)]
pub struct ResolveSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl ResolveSpan {
	/// Creates a new span tagged with the metadata URL.
	pub fn new(url: &Url) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("samlsp.resolve", url = %url);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = url;

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedResolve<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits the retry notice for a failed fetch attempt that will be retried.
pub fn log_fetch_retry(url: &Url, attempt: u32, max_attempts: u32, delay: Duration, err: &FetchError) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(
			url = %url,
			attempt,
			max_attempts,
			delay_ms = delay.whole_milliseconds() as u64,
			error = %crate::obs::error_chain(err),
			"metadata fetch failed (will retry)"
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (url, attempt, max_attempts, delay, err);
	}
}

/// Emits the final record once the attempt budget is exhausted.
pub fn log_fetch_exhausted(url: &Url, attempts: u32, err: &FetchError) {
	#[cfg(feature = "tracing")]
	{
		tracing::error!(
			url = %url,
			attempts,
			error = %crate::obs::error_chain(err),
			"metadata fetch failed; retry budget exhausted"
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (url, attempts, err);
	}
}
