//! Configuration sources for layered settings
//!
//! Sources are merged in priority order: environment variables > config
//! file > defaults.

use super::SettingsError;
use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Keys whose environment values are parsed as integers.
const NUMERIC_KEYS: &[&str] = &["shutdown_timeout_secs", "max_body_size"];

/// Trait for configuration sources
pub trait ConfigSource: Send + Sync {
	/// Load configuration from this source
	fn load(&self) -> Result<IndexMap<String, Value>, SettingsError>;

	/// Get the priority of this source (higher = more important)
	fn priority(&self) -> u8;

	/// Get a description of this source
	fn description(&self) -> String;
}

/// Built-in defaults.
pub struct DefaultSource {
	values: IndexMap<String, Value>,
}

impl DefaultSource {
	pub fn new(values: IndexMap<String, Value>) -> Self {
		Self { values }
	}
}

impl ConfigSource for DefaultSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SettingsError> {
		Ok(self.values.clone())
	}

	fn priority(&self) -> u8 {
		0
	}

	fn description(&self) -> String {
		"Defaults".to_string()
	}
}

/// TOML file configuration source
pub struct TomlFileSource {
	path: PathBuf,
	required: bool,
}

impl TomlFileSource {
	/// Create a source that yields nothing if the file does not exist
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			required: false,
		}
	}

	/// Create a source that fails if the file does not exist
	pub fn required(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			required: true,
		}
	}
}

impl ConfigSource for TomlFileSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SettingsError> {
		if !self.required && !self.path.exists() {
			return Ok(IndexMap::new());
		}

		let content = fs::read_to_string(&self.path).map_err(|source| SettingsError::Io {
			path: self.path.clone(),
			source,
		})?;
		let toml_value: toml::Table = toml::from_str(&content)?;

		let json_value = serde_json::to_value(toml_value)
			.map_err(|e| SettingsError::Parse(e.to_string()))?;
		let map = json_value
			.as_object()
			.ok_or_else(|| SettingsError::Parse("Expected table at root".to_string()))?;

		Ok(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
	}

	fn priority(&self) -> u8 {
		50
	}

	fn description(&self) -> String {
		format!("TOML file: {}", self.path.display())
	}
}

/// Environment variable configuration source
///
/// `CHECKLIST_PAGE_NAME=Parts` becomes `page_name = "Parts"`.
pub struct EnvSource {
	prefix: String,
	vars: Option<Vec<(String, String)>>,
	known_keys: Option<Vec<String>>,
}

impl EnvSource {
	/// Read variables starting with `prefix` from the process environment
	pub fn new(prefix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
			vars: None,
			known_keys: None,
		}
	}

	/// Read variables from a fixed list instead of the process environment
	pub fn from_vars<I, K, V>(prefix: impl Into<String>, vars: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			prefix: prefix.into(),
			vars: Some(
				vars.into_iter()
					.map(|(k, v)| (k.into(), v.into()))
					.collect(),
			),
			known_keys: None,
		}
	}

	/// Skip prefixed variables that do not name one of `keys`
	pub fn with_known_keys(mut self, keys: &[&str]) -> Self {
		self.known_keys = Some(keys.iter().map(|key| key.to_string()).collect());
		self
	}

	fn vars(&self) -> Vec<(String, String)> {
		match &self.vars {
			Some(vars) => vars.clone(),
			None => std::env::vars().collect(),
		}
	}
}

impl ConfigSource for EnvSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SettingsError> {
		let mut config = IndexMap::new();

		for (key, value) in self.vars() {
			let Some(clean_key) = key.strip_prefix(&self.prefix) else {
				continue;
			};
			let lower_key = clean_key.to_lowercase();
			// The config file path is not itself a setting.
			if lower_key == "config" {
				continue;
			}
			if let Some(known) = &self.known_keys
				&& !known.contains(&lower_key)
			{
				tracing::debug!(variable = %key, "ignoring environment variable that names no setting");
				continue;
			}

			let parsed_value = if NUMERIC_KEYS.contains(&lower_key.as_str()) {
				value
					.trim()
					.parse::<u64>()
					.map(|n| Value::Number(n.into()))
					.map_err(|_| SettingsError::Invalid {
						key: lower_key.clone(),
						reason: format!("expected a non-negative integer, got {value:?}"),
					})?
			} else {
				Value::String(value)
			};

			config.insert(lower_key, parsed_value);
		}

		Ok(config)
	}

	fn priority(&self) -> u8 {
		100
	}

	fn description(&self) -> String {
		format!("Environment variables (prefix: {})", self.prefix)
	}
}

/// Merges sources, letting higher priority sources override lower ones.
pub fn merge(sources: &[Box<dyn ConfigSource>]) -> Result<IndexMap<String, Value>, SettingsError> {
	let mut ordered: Vec<&dyn ConfigSource> = sources.iter().map(|source| source.as_ref()).collect();
	ordered.sort_by_key(|source| source.priority());

	let mut merged = IndexMap::new();
	for source in ordered {
		let values = source.load()?;
		tracing::debug!(source = %source.description(), keys = values.len(), "loaded settings source");
		merged.extend(values);
	}
	Ok(merged)
}
