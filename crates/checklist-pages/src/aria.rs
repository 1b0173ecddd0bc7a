//! `aria-checked` synchronization
//!
//! Every control carrying [`MARKER_CLASS`] gets a click handler that updates
//! its own `aria-checked` attribute. The attribute is maintained
//! independently of the native checked state: the handler reads the current
//! attribute, not the checkbox.
//!
//! ```
//! use checklist_pages::aria::AriaSyncController;
//! use checklist_pages::builder::input;
//!
//! let control = input()
//!     .attr("type", "checkbox")
//!     .class("form-check-input")
//!     .aria("checked", "false")
//!     .build();
//!
//! let _registry = AriaSyncController::toggle().initialize(&[control.clone()]);
//! control.click();
//!
//! assert_eq!(control.get_attribute("aria-checked").as_deref(), Some("true"));
//! ```

use crate::callback::Callback;
use crate::dom::{Document, Element};
use crate::events::{EventHandle, EventRegistry};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Class selecting the controls to synchronize.
pub const MARKER_CLASS: &str = "form-check-input";

/// Name of the synchronized attribute.
pub const ARIA_CHECKED: &str = "aria-checked";

/// How a click updates `aria-checked`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AriaSyncMode {
	/// `"true"` becomes `"false"`, anything else becomes `"true"`.
	#[default]
	Toggle,
	/// Every click writes `"false"`.
	ForceFalse,
}

impl AriaSyncMode {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Toggle => "toggle",
			Self::ForceFalse => "force-false",
		}
	}

	/// Computes the attribute value after one click.
	///
	/// A missing or unrecognized current value is treated as not `"true"`.
	pub fn next_value(&self, current: Option<&str>) -> &'static str {
		match self {
			Self::Toggle if current == Some("true") => "false",
			Self::Toggle => "true",
			Self::ForceFalse => "false",
		}
	}
}

impl fmt::Display for AriaSyncMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Error returned when parsing an unknown [`AriaSyncMode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown aria sync mode: {0} (expected \"toggle\" or \"force-false\")")]
pub struct UnknownAriaSyncMode(pub String);

impl FromStr for AriaSyncMode {
	type Err = UnknownAriaSyncMode;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"toggle" => Ok(Self::Toggle),
			"force-false" | "force_false" => Ok(Self::ForceFalse),
			_ => Err(UnknownAriaSyncMode(s.to_string())),
		}
	}
}

/// Attaches `aria-checked` click handlers to controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AriaSyncController {
	mode: AriaSyncMode,
}

impl AriaSyncController {
	pub fn new(mode: AriaSyncMode) -> Self {
		Self { mode }
	}

	/// A controller in [`AriaSyncMode::Toggle`].
	pub fn toggle() -> Self {
		Self::new(AriaSyncMode::Toggle)
	}

	/// A controller in [`AriaSyncMode::ForceFalse`].
	pub fn force_false() -> Self {
		Self::new(AriaSyncMode::ForceFalse)
	}

	pub fn mode(&self) -> AriaSyncMode {
		self.mode
	}

	/// Attaches one click handler per control.
	///
	/// Each handler holds a weak reference to its own control, so clicking
	/// one control never touches another. An empty slice attaches nothing.
	pub fn initialize(&self, controls: &[Element]) -> EventRegistry {
		let mut registry = EventRegistry::new();

		for (position, control) in controls.iter().enumerate() {
			let mode = self.mode;
			let target = control.downgrade();
			let listener = control.add_event_listener(
				"click",
				Callback::new(move |_| {
					let Some(control) = target.upgrade() else {
						return;
					};
					let current = control.get_attribute(ARIA_CHECKED);
					let next = mode.next_value(current.as_deref());
					control.set_attribute(ARIA_CHECKED, next);
					let id = control.id().unwrap_or_default();
					tracing::debug!(
						id = id.as_str(),
						from = current.as_deref().unwrap_or("<missing>"),
						to = next,
						"aria-checked updated"
					);
				}),
			);

			let key = control.id().unwrap_or_else(|| format!("#{position}"));
			registry.register(key, EventHandle::new(control, listener, "click"));
		}

		tracing::debug!(controls = controls.len(), mode = %self.mode, "aria sync initialized");
		registry
	}

	/// Finds every control carrying [`MARKER_CLASS`] in `document` and
	/// initializes it.
	pub fn bootstrap(&self, document: &Document) -> EventRegistry {
		self.initialize(&document.elements_by_class(MARKER_CLASS))
	}
}

/// Initializes `controls` in toggle mode.
pub fn initialize(controls: &[Element]) -> EventRegistry {
	AriaSyncController::toggle().initialize(controls)
}

/// Initializes `controls` so every click sets `aria-checked="false"`.
pub fn set_aria_checked_false(controls: &[Element]) -> EventRegistry {
	AriaSyncController::force_false().initialize(controls)
}
