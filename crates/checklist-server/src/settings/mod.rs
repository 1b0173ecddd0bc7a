//! Layered settings
//!
//! Values are resolved from, in increasing priority:
//!
//! 1. built-in defaults
//! 2. an optional TOML file
//! 3. environment variables prefixed with [`ENV_PREFIX`]
//!
//! | Key | Default |
//! |-----|---------|
//! | `bind_address` | `127.0.0.1:8000` |
//! | `page_name` | `Checkboxes` |
//! | `page_path` | `/checkboxes` |
//! | `initial_policy` | `even-id` |
//! | `aria_mode` | `toggle` |
//! | `log_level` | `info` |
//! | `shutdown_timeout_secs` | `30` |
//! | `max_body_size` | `10485760` |
//!
//! Environment variables under the prefix that name no setting are ignored,
//! while unknown keys in the TOML file are rejected.

pub mod sources;

use crate::server::DEFAULT_MAX_BODY_SIZE;
use checklist_core::PolicyKind;
use checklist_pages::AriaSyncMode;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sources::{ConfigSource, DefaultSource, EnvSource, TomlFileSource};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Prefix of environment variables read as settings.
pub const ENV_PREFIX: &str = "CHECKLIST_";

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "CHECKLIST_CONFIG";

/// Errors raised while loading settings.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("Failed to read {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("Parse error: {0}")]
	Parse(String),

	#[error("Invalid value for {key}: {reason}")]
	Invalid { key: String, reason: String },
}

/// Resolved server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
	pub bind_address: String,
	pub page_name: String,
	pub page_path: String,
	pub initial_policy: PolicyKind,
	pub aria_mode: AriaSyncMode,
	pub log_level: String,
	pub shutdown_timeout_secs: u64,
	pub max_body_size: u64,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			bind_address: "127.0.0.1:8000".to_string(),
			page_name: "Checkboxes".to_string(),
			page_path: "/checkboxes".to_string(),
			initial_policy: PolicyKind::default(),
			aria_mode: AriaSyncMode::default(),
			log_level: "info".to_string(),
			shutdown_timeout_secs: 30,
			max_body_size: DEFAULT_MAX_BODY_SIZE,
		}
	}
}

impl Settings {
	/// Every settings key, as written in TOML.
	pub const KEYS: &'static [&'static str] = &[
		"bind_address",
		"page_name",
		"page_path",
		"initial_policy",
		"aria_mode",
		"log_level",
		"shutdown_timeout_secs",
		"max_body_size",
	];

	/// Loads settings from defaults, `config` (if given) and the process
	/// environment, then validates them.
	///
	/// A config file passed explicitly must exist.
	pub fn load(config: Option<&Path>) -> Result<Self, SettingsError> {
		let mut sources: Vec<Box<dyn ConfigSource>> =
			vec![Box::new(EnvSource::new(ENV_PREFIX).with_known_keys(Self::KEYS))];
		if let Some(path) = config {
			sources.push(Box::new(TomlFileSource::required(path)));
		}
		Self::from_sources(sources)
	}

	/// Merges the defaults with `sources` and validates the result.
	pub fn from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<Self, SettingsError> {
		sources.push(Box::new(DefaultSource::new(Self::default().to_values()?)));

		let merged = sources::merge(&sources)?;
		let object = Value::Object(merged.into_iter().collect());
		let settings: Settings =
			serde_json::from_value(object).map_err(|e| SettingsError::Parse(e.to_string()))?;

		settings.validate()?;
		Ok(settings)
	}

	/// Checks values serde cannot.
	pub fn validate(&self) -> Result<(), SettingsError> {
		self.socket_addr()?;

		if !self.page_path.starts_with('/') {
			return Err(invalid("page_path", "must start with '/'"));
		}
		if self.page_path == "/health" {
			return Err(invalid("page_path", "'/health' is reserved"));
		}
		if self.page_name.trim().is_empty() {
			return Err(invalid("page_name", "must not be empty"));
		}
		if self.log_level.trim().is_empty() {
			return Err(invalid("log_level", "must not be empty"));
		}
		if self.max_body_size == 0 {
			return Err(invalid("max_body_size", "must be greater than zero"));
		}
		Ok(())
	}

	/// Parses `bind_address`.
	pub fn socket_addr(&self) -> Result<SocketAddr, SettingsError> {
		self.bind_address
			.parse()
			.map_err(|e| invalid("bind_address", format!("{e} ({:?})", self.bind_address)))
	}

	pub fn shutdown_timeout(&self) -> Duration {
		Duration::from_secs(self.shutdown_timeout_secs)
	}

	fn to_values(&self) -> Result<IndexMap<String, Value>, SettingsError> {
		match serde_json::to_value(self).map_err(|e| SettingsError::Parse(e.to_string()))? {
			Value::Object(map) => Ok(map.into_iter().collect()),
			_ => Err(SettingsError::Parse("settings did not serialize to a map".to_string())),
		}
	}
}

fn invalid(key: &str, reason: impl Into<String>) -> SettingsError {
	SettingsError::Invalid {
		key: key.to_string(),
		reason: reason.into(),
	}
}

/// Picks the config file from `CHECKLIST_CONFIG`, falling back to the first
/// command line argument.
pub fn config_path_from<I>(env_value: Option<String>, mut args: I) -> Option<PathBuf>
where
	I: Iterator<Item = String>,
{
	env_value
		.filter(|value| !value.trim().is_empty())
		.or_else(|| args.next())
		.map(PathBuf::from)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serial_test::serial;
	use std::io::Write;

	fn env(vars: &[(&str, &str)]) -> Box<dyn ConfigSource> {
		Box::new(
			EnvSource::from_vars(
				ENV_PREFIX,
				vars.iter().map(|(k, v)| (k.to_string(), v.to_string())),
			)
			.with_known_keys(Settings::KEYS),
		)
	}

	#[rstest]
	fn test_defaults() {
		let settings = Settings::from_sources(Vec::new()).unwrap();

		assert_eq!(settings, Settings::default());
		assert_eq!(settings.initial_policy, PolicyKind::EvenId);
		assert_eq!(settings.aria_mode, AriaSyncMode::Toggle);
		assert_eq!(settings.shutdown_timeout(), Duration::from_secs(30));
	}

	#[rstest]
	fn test_env_overrides_file() {
		// Arrange
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(
			file,
			"page_name = \"From file\"\ninitial_policy = \"all\"\naria_mode = \"force-false\""
		)
		.unwrap();
		let sources = vec![
			Box::new(TomlFileSource::required(file.path())) as Box<dyn ConfigSource>,
			env(&[("CHECKLIST_PAGE_NAME", "From env")]),
		];

		// Act
		let settings = Settings::from_sources(sources).unwrap();

		// Assert
		assert_eq!(settings.page_name, "From env");
		assert_eq!(settings.initial_policy, PolicyKind::All);
		assert_eq!(settings.aria_mode, AriaSyncMode::ForceFalse);
		assert_eq!(settings.page_path, "/checkboxes");
	}

	#[rstest]
	#[case("CHECKLIST_BIND_ADDRESS", "not-an-address", "bind_address")]
	#[case("CHECKLIST_PAGE_PATH", "checkboxes", "page_path")]
	#[case("CHECKLIST_PAGE_PATH", "/health", "page_path")]
	#[case("CHECKLIST_PAGE_NAME", "  ", "page_name")]
	#[case("CHECKLIST_MAX_BODY_SIZE", "0", "max_body_size")]
	fn test_invalid_values(#[case] var: &str, #[case] value: &str, #[case] key: &str) {
		let result = Settings::from_sources(vec![env(&[(var, value)])]);

		assert!(matches!(result, Err(SettingsError::Invalid { key: k, .. }) if k == key));
	}

	#[rstest]
	#[case("CHECKLIST_INITIAL_POLICY", "odd")]
	#[case("CHECKLIST_ARIA_MODE", "flip")]
	fn test_unknown_enum_values(#[case] var: &str, #[case] value: &str) {
		let result = Settings::from_sources(vec![env(&[(var, value)])]);
		assert!(matches!(result, Err(SettingsError::Parse(_))));
	}

	#[rstest]
	fn test_unrelated_env_vars_ignored() {
		// Arrange
		let sources = vec![env(&[
			("CHECKLIST_COLOUR", "blue"),
			("CHECKLIST_MAX_BODY_SIZE", "1024"),
		])];

		// Act
		let settings = Settings::from_sources(sources).unwrap();

		// Assert
		assert_eq!(settings.max_body_size, 1024);
		assert_eq!(settings.page_name, "Checkboxes");
	}

	#[rstest]
	fn test_unknown_file_key_rejected() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "colour = \"blue\"").unwrap();

		let result = Settings::from_sources(vec![Box::new(TomlFileSource::required(file.path()))]);

		assert!(matches!(result, Err(SettingsError::Parse(_))));
	}

	#[rstest]
	fn test_keys_cover_every_field() {
		let values = Settings::default().to_values().unwrap();
		let mut keys: Vec<_> = values.keys().map(String::as_str).collect();
		let mut expected = Settings::KEYS.to_vec();
		keys.sort_unstable();
		expected.sort_unstable();

		assert_eq!(keys, expected);
	}

	#[rstest]
	#[case(Some("/etc/a.toml"), vec!["b.toml"], Some("/etc/a.toml"))]
	#[case(None, vec!["b.toml"], Some("b.toml"))]
	#[case(Some(""), vec!["b.toml"], Some("b.toml"))]
	#[case(None, vec![], None)]
	fn test_config_path_from(
		#[case] env_value: Option<&str>,
		#[case] args: Vec<&str>,
		#[case] expected: Option<&str>,
	) {
		let path = config_path_from(
			env_value.map(str::to_string),
			args.into_iter().map(str::to_string),
		);
		assert_eq!(path, expected.map(PathBuf::from));
	}

	#[rstest]
	#[serial]
	fn test_load_reads_process_environment() {
		// SAFETY: serialized with every other test touching the environment.
		unsafe {
			std::env::set_var("CHECKLIST_PAGE_NAME", "Parts");
			std::env::set_var("CHECKLIST_SHUTDOWN_TIMEOUT_SECS", "7");
			std::env::set_var("CHECKLIST_UNRELATED_FLAG", "1");
		}

		let result = Settings::load(None);

		unsafe {
			std::env::remove_var("CHECKLIST_PAGE_NAME");
			std::env::remove_var("CHECKLIST_SHUTDOWN_TIMEOUT_SECS");
			std::env::remove_var("CHECKLIST_UNRELATED_FLAG");
		}
		let settings = result.unwrap();
		assert_eq!(settings.page_name, "Parts");
		assert_eq!(settings.shutdown_timeout_secs, 7);
	}

	#[rstest]
	#[serial]
	fn test_load_missing_explicit_file() {
		let dir = tempfile::tempdir().unwrap();
		let result = Settings::load(Some(&dir.path().join("absent.toml")));
		assert!(matches!(result, Err(SettingsError::Io { .. })));
	}
}
