//! Optional observability helpers for metadata resolution.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit a `samlsp.resolve` span (with the `url` field) around every
//!   resolution and a `WARN` retry notice for each failed fetch attempt.
//! - Enable `metrics` to increment `samlsp_metadata_fetch_total` per attempt and
//!   `samlsp_metadata_resolve_total` per resolution, both labeled by `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for attempts and resolutions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResolveOutcome {
	/// Entry to a resolver helper.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller (or retried, for fetch attempts).
	Failure,
	/// Caller cancelled the resolution.
	Cancelled,
}
impl ResolveOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ResolveOutcome::Attempt => "attempt",
			ResolveOutcome::Success => "success",
			ResolveOutcome::Failure => "failure",
			ResolveOutcome::Cancelled => "cancelled",
		}
	}
}
impl Display for ResolveOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Renders an error with its full `source()` chain on one line.
pub fn error_chain(err: &dyn StdError) -> String {
	let mut buf = err.to_string();
	let mut source = err.source();

	while let Some(inner) = source {
		buf.push_str(": ");
		buf.push_str(&inner.to_string());

		source = inner.source();
	}

	buf
}
