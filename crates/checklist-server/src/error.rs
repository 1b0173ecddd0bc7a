//! Server error type

use crate::settings::SettingsError;
use checklist_forms::FormError;

/// Errors raised while serving the checkbox list page.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid form submission: {0}")]
	Form(#[from] FormError),

	#[error("Configuration error: {0}")]
	Settings(#[from] SettingsError),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("HTTP error: {0}")]
	Hyper(#[from] hyper::Error),

	#[error("Invalid response: {0}")]
	Http(#[from] ::http::Error),

	#[error("Logging initialization failed: {0}")]
	Logging(String),
}

impl Error {
	/// Returns the HTTP status code to answer with.
	pub fn status_code(&self) -> u16 {
		match self {
			Self::Form(_) => 400,
			_ => 500,
		}
	}
}

pub type Result<T> = std::result::Result<T, Error>;
