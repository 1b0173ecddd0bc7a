//! HTML Element Builder
//!
//! A fluent API for constructing [`Element`] trees.
//!
//! ## Example
//!
//! ```
//! use checklist_pages::builder::{div, label};
//!
//! let wrapper = div()
//!     .class("form-check")
//!     .child(label().class("form-check-label").attr("for", "1").text("Headlights").build())
//!     .build();
//!
//! assert_eq!(
//!     wrapper.to_html(),
//!     r#"<div class="form-check"><label class="form-check-label" for="1">Headlights</label></div>"#
//! );
//! ```

use crate::callback::Callback;
use crate::dom::{Element, Event};
use crate::events::EventHandle;

/// Most elements have 0-2 event listeners in practice
const TYPICAL_EVENT_COUNT: usize = 2;

/// HTML element builder with fluent API
pub struct ElementBuilder {
	element: Element,
	event_handles: Vec<EventHandle>,
}

impl ElementBuilder {
	/// Create a new builder from an element
	pub fn new(element: Element) -> Self {
		Self {
			element,
			event_handles: Vec::with_capacity(TYPICAL_EVENT_COUNT),
		}
	}

	/// Set the class attribute
	///
	/// Multiple calls will overwrite the previous value.
	pub fn class(self, class: &str) -> Self {
		self.element.set_attribute("class", class);
		self
	}

	/// Set the id attribute
	pub fn id(self, id: &str) -> Self {
		self.element.set_attribute("id", id);
		self
	}

	/// Set a custom attribute
	pub fn attr(self, name: &str, value: &str) -> Self {
		self.element.set_attribute(name, value);
		self
	}

	/// Set an `aria-*` attribute
	pub fn aria(self, name: &str, value: &str) -> Self {
		self.element.set_attribute(format!("aria-{name}"), value);
		self
	}

	/// Append a text node
	pub fn text(self, text: &str) -> Self {
		self.element.append_text(text);
		self
	}

	/// Append a child element
	pub fn child(self, child: Element) -> Self {
		self.element.append_child(child);
		self
	}

	/// Append several child elements
	pub fn children(self, children: impl IntoIterator<Item = Element>) -> Self {
		for child in children {
			self.element.append_child(child);
		}
		self
	}

	/// Add an event listener for any event type
	pub fn on<F>(mut self, event_type: &str, callback: F) -> Self
	where
		F: Fn(Event) + Send + Sync + 'static,
	{
		let id = self
			.element
			.add_event_listener(event_type, Callback::new(callback));
		self.event_handles
			.push(EventHandle::new(&self.element, id, event_type));
		self
	}

	/// Add a click event listener
	#[inline]
	pub fn on_click<F>(self, callback: F) -> Self
	where
		F: Fn(Event) + Send + Sync + 'static,
	{
		self.on("click", callback)
	}

	/// Build the element
	///
	/// Listeners stay attached; their handles are dropped.
	pub fn build(self) -> Element {
		self.element
	}

	/// Build the element and return the handles of the listeners it carries
	pub fn build_with_handles(self) -> (Element, Vec<EventHandle>) {
		(self.element, self.event_handles)
	}
}

/// Create a builder for an arbitrary tag
pub fn element(tag: &str) -> ElementBuilder {
	ElementBuilder::new(Element::new(tag))
}

macro_rules! define_elements {
	($($name:ident),* $(,)?) => {
		$(
			#[doc = concat!("Create a `<", stringify!($name), ">` element builder")]
			pub fn $name() -> ElementBuilder {
				element(stringify!($name))
			}
		)*
	};
}

define_elements!(body, button, div, form, h1, input, label, script);
