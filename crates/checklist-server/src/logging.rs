//! Logging setup

use crate::error::{Error, Result};
use tracing_subscriber::EnvFilter;

/// Builds the filter from `RUST_LOG`, falling back to `level`.
pub fn build_filter(level: &str) -> Result<EnvFilter> {
	match EnvFilter::try_from_default_env() {
		Ok(filter) => Ok(filter),
		Err(_) => EnvFilter::try_new(level)
			.map_err(|e| Error::Logging(format!("invalid log level {level:?}: {e}"))),
	}
}

/// Installs the global `fmt` subscriber.
///
/// Fails if the level is not a valid filter or a subscriber is already set.
pub fn init_logging(level: &str) -> Result<()> {
	let filter = build_filter(level)?;
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(true)
		.try_init()
		.map_err(|e| Error::Logging(e.to_string()))
}
