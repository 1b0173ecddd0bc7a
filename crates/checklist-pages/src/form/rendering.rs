//! Form Widgets and HTML Rendering
//!
//! Widgets build form controls as DOM elements. Attributes are written in the
//! order they are added: the widget's own attributes first (`type`, `name`,
//! `value`, then `checked` where applicable), followed by the caller's
//! [`WidgetAttrs`] in insertion order.

use crate::dom::Element;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Widget type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WidgetType {
	/// Checkbox input
	Checkbox,
	/// Hidden input
	HiddenInput,
}

/// Base widget trait
pub trait Widget: Send + Sync {
	/// Get the widget type
	fn widget_type(&self) -> WidgetType;

	/// Render the widget as an element
	fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> Element;

	/// Render the widget as HTML
	fn render_html(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
		self.render(name, value, attrs).to_html()
	}
}

/// Checkbox input widget
///
/// The `value` passed to [`Widget::render`] is the current state: `"true"`,
/// `"1"` and `"on"` render the box checked. The submitted value is fixed and
/// defaults to `"true"`.
#[derive(Debug, Clone)]
pub struct CheckboxInput {
	submit_value: String,
}

impl CheckboxInput {
	/// Create a new checkbox input widget
	pub fn new() -> Self {
		Self {
			submit_value: "true".to_string(),
		}
	}

	/// Set the value posted when the box is checked
	pub fn with_submit_value(mut self, value: impl Into<String>) -> Self {
		self.submit_value = value.into();
		self
	}

	/// Returns true if `value` represents a checked state.
	pub fn is_checked_value(value: Option<&str>) -> bool {
		matches!(value, Some("true") | Some("1") | Some("on"))
	}
}

impl Default for CheckboxInput {
	fn default() -> Self {
		Self::new()
	}
}

impl Widget for CheckboxInput {
	fn widget_type(&self) -> WidgetType {
		WidgetType::Checkbox
	}

	fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> Element {
		let element = Element::new("input");
		element.set_attribute("type", "checkbox");
		element.set_attribute("name", name);
		element.set_attribute("value", self.submit_value.as_str());
		if Self::is_checked_value(value) {
			element.set_attribute("checked", "");
		}
		attrs.apply(&element);
		element
	}
}

/// Hidden input widget
#[derive(Debug, Clone, Default)]
pub struct HiddenInput;

impl HiddenInput {
	/// Create a new hidden input widget
	pub fn new() -> Self {
		Self
	}
}

impl Widget for HiddenInput {
	fn widget_type(&self) -> WidgetType {
		WidgetType::HiddenInput
	}

	fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> Element {
		let element = Element::new("input");
		element.set_attribute("type", "hidden");
		element.set_attribute("name", name);
		element.set_attribute("value", value.unwrap_or_default());
		attrs.apply(&element);
		element
	}
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
	s.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
		.replace('"', "&quot;")
		.replace('\'', "&#x27;")
}

/// Widget attribute builder
///
/// Attributes keep the order they were added in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetAttrs {
	attrs: IndexMap<String, String>,
}

impl WidgetAttrs {
	/// Create a new empty attribute builder
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a custom attribute
	pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.attrs.insert(key.into(), value.into());
		self
	}

	/// Add a data-* attribute
	pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.attrs
			.insert(format!("data-{}", key.into()), value.into());
		self
	}

	/// Add an ARIA attribute
	pub fn aria(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.attrs
			.insert(format!("aria-{}", key.into()), value.into());
		self
	}

	/// Add a CSS class
	pub fn class(mut self, value: impl Into<String>) -> Self {
		let class_value = value.into();
		if let Some(existing) = self.attrs.get_mut("class") {
			existing.push(' ');
			existing.push_str(&class_value);
		} else {
			self.attrs.insert("class".to_string(), class_value);
		}
		self
	}

	/// Add an ID attribute
	pub fn id(mut self, value: impl Into<String>) -> Self {
		self.attrs.insert("id".to_string(), value.into());
		self
	}

	/// Returns an attribute value
	pub fn get(&self, key: &str) -> Option<&str> {
		self.attrs.get(key).map(String::as_str)
	}

	/// Iterates attributes in insertion order
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// Writes every attribute onto `element`
	pub fn apply(&self, element: &Element) {
		for (key, value) in &self.attrs {
			element.set_attribute(key.as_str(), value.as_str());
		}
	}
}

/// Bootstrap 5 class names used by the checkbox list
pub struct BootstrapClasses;

impl BootstrapClasses {
	/// Get Bootstrap 5 CSS classes for form check (checkbox/radio)
	pub fn form_check_class() -> &'static str {
		"form-check"
	}

	/// Get Bootstrap 5 CSS classes for form check input
	pub fn form_check_input_class() -> &'static str {
		"form-check-input"
	}

	/// Get Bootstrap 5 CSS classes for form check label
	pub fn form_check_label_class() -> &'static str {
		"form-check-label"
	}
}
