// self
use crate::obs::ResolveOutcome;

/// Records a single fetch attempt outcome via the global metrics recorder (when enabled).
pub fn record_fetch_outcome(outcome: ResolveOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("samlsp_metadata_fetch_total", "outcome" => outcome.as_str()).increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}

/// Records a resolution outcome via the global metrics recorder (when enabled).
pub fn record_resolve_outcome(outcome: ResolveOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("samlsp_metadata_resolve_total", "outcome" => outcome.as_str())
			.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn record_outcomes_noop_without_recorder() {
		record_fetch_outcome(ResolveOutcome::Failure);
		record_resolve_outcome(ResolveOutcome::Success);
	}
}
