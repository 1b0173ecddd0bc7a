//! In-memory DOM model
//!
//! A small element tree used for server-side rendering and for driving the
//! `aria-checked` synchronization outside a browser. Elements are shared
//! handles: cloning an [`Element`] yields another handle to the same node.
//!
//! The native `checked` state of a checkbox is a property, separate from the
//! `aria-checked` attribute. Setting or removing the `checked` attribute
//! resets the property, the way a freshly parsed page would.

use crate::callback::Callback;
use crate::form::rendering::html_escape;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

/// Elements rendered without a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// Attributes rendered without a value.
const BOOLEAN_ATTRIBUTES: &[&str] = &[
	"checked", "disabled", "hidden", "multiple", "readonly", "required", "selected",
];

/// Elements whose text content is written verbatim.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

/// A dispatched DOM event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
	event_type: String,
}

impl Event {
	/// Creates an event of the given type.
	pub fn new(event_type: impl Into<String>) -> Self {
		Self {
			event_type: event_type.into(),
		}
	}

	/// Returns the event type, e.g. `"click"`.
	pub fn event_type(&self) -> &str {
		&self.event_type
	}
}

/// Identifies one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
	fn next() -> Self {
		Self(NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed))
	}
}

struct Listener {
	id: ListenerId,
	event_type: String,
	callback: Callback<Event>,
}

struct ElementData {
	tag: String,
	attributes: IndexMap<String, String>,
	checked: bool,
	children: Vec<Node>,
	listeners: Vec<Listener>,
}

/// A child of an element.
#[derive(Debug, Clone)]
pub enum Node {
	Element(Element),
	Text(String),
}

impl From<Element> for Node {
	fn from(element: Element) -> Self {
		Self::Element(element)
	}
}

impl From<String> for Node {
	fn from(text: String) -> Self {
		Self::Text(text)
	}
}

impl From<&str> for Node {
	fn from(text: &str) -> Self {
		Self::Text(text.to_string())
	}
}

/// A shared handle to a DOM element.
#[derive(Clone)]
pub struct Element {
	inner: Arc<RwLock<ElementData>>,
}

/// A non-owning handle to a DOM element.
///
/// Listeners hold these to reach their own element without keeping it alive.
#[derive(Clone)]
pub struct WeakElement {
	inner: Weak<RwLock<ElementData>>,
}

impl WeakElement {
	/// Returns the element if it is still alive.
	pub fn upgrade(&self) -> Option<Element> {
		self.inner.upgrade().map(|inner| Element { inner })
	}
}

impl fmt::Debug for WeakElement {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("WeakElement")
			.field("alive", &(self.inner.strong_count() > 0))
			.finish()
	}
}

impl Element {
	/// Creates an element with the given tag name.
	pub fn new(tag: impl Into<String>) -> Self {
		Self {
			inner: Arc::new(RwLock::new(ElementData {
				tag: tag.into().to_ascii_lowercase(),
				attributes: IndexMap::new(),
				checked: false,
				children: Vec::new(),
				listeners: Vec::new(),
			})),
		}
	}

	/// Returns the lowercase tag name.
	pub fn tag_name(&self) -> String {
		self.inner.read().tag.clone()
	}

	pub fn get_attribute(&self, name: &str) -> Option<String> {
		self.inner.read().attributes.get(name).cloned()
	}

	/// Sets an attribute, keeping its original position if it already exists.
	pub fn set_attribute(&self, name: impl Into<String>, value: impl Into<String>) {
		let name = name.into();
		let mut data = self.inner.write();
		if name == "checked" {
			data.checked = true;
		}
		data.attributes.insert(name, value.into());
	}

	/// Removes an attribute, returning its previous value.
	pub fn remove_attribute(&self, name: &str) -> Option<String> {
		let mut data = self.inner.write();
		if name == "checked" {
			data.checked = false;
		}
		data.attributes.shift_remove(name)
	}

	pub fn has_attribute(&self, name: &str) -> bool {
		self.inner.read().attributes.contains_key(name)
	}

	/// Returns attribute pairs in insertion order.
	pub fn attributes(&self) -> Vec<(String, String)> {
		self.inner
			.read()
			.attributes
			.iter()
			.map(|(k, v)| (k.clone(), v.clone()))
			.collect()
	}

	pub fn id(&self) -> Option<String> {
		self.get_attribute("id")
	}

	/// Returns true if the whitespace separated `class` attribute contains `class`.
	pub fn has_class(&self, class: &str) -> bool {
		self.inner
			.read()
			.attributes
			.get("class")
			.is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
	}

	/// Returns the native checked state.
	pub fn is_checked(&self) -> bool {
		self.inner.read().checked
	}

	/// Sets the native checked state without touching any attribute.
	pub fn set_checked(&self, checked: bool) {
		self.inner.write().checked = checked;
	}

	fn is_checkbox(&self) -> bool {
		let data = self.inner.read();
		data.tag == "input"
			&& data
				.attributes
				.get("type")
				.is_some_and(|t| t.eq_ignore_ascii_case("checkbox"))
	}

	pub fn append_child(&self, child: impl Into<Node>) {
		self.inner.write().children.push(child.into());
	}

	pub fn append_text(&self, text: impl Into<String>) {
		self.append_child(Node::Text(text.into()));
	}

	pub fn children(&self) -> Vec<Node> {
		self.inner.read().children.clone()
	}

	/// Returns the concatenated text of all descendants.
	pub fn text_content(&self) -> String {
		let mut out = String::new();
		for child in self.children() {
			match child {
				Node::Text(text) => out.push_str(&text),
				Node::Element(element) => out.push_str(&element.text_content()),
			}
		}
		out
	}

	/// Registers a listener for `event_type`.
	pub fn add_event_listener(
		&self,
		event_type: impl Into<String>,
		callback: Callback<Event>,
	) -> ListenerId {
		let id = ListenerId::next();
		self.inner.write().listeners.push(Listener {
			id,
			event_type: event_type.into(),
			callback,
		});
		id
	}

	/// Removes a listener. Returns false if it was not registered here.
	pub fn remove_event_listener(&self, id: ListenerId) -> bool {
		let mut data = self.inner.write();
		let before = data.listeners.len();
		data.listeners.retain(|listener| listener.id != id);
		data.listeners.len() != before
	}

	/// Returns the number of listeners registered for `event_type`.
	pub fn listener_count(&self, event_type: &str) -> usize {
		self.inner
			.read()
			.listeners
			.iter()
			.filter(|listener| listener.event_type == event_type)
			.count()
	}

	/// Invokes every listener registered for the event's type, in
	/// registration order.
	pub fn dispatch_event(&self, event: &Event) {
		// Listeners run without the lock held so they may read and write
		// this element.
		let callbacks: Vec<Callback<Event>> = self
			.inner
			.read()
			.listeners
			.iter()
			.filter(|listener| listener.event_type == event.event_type())
			.map(|listener| listener.callback.clone())
			.collect();

		for callback in callbacks {
			callback.call(event.clone());
		}
	}

	/// Simulates a user click.
	///
	/// A checkbox flips its native checked state before listeners run.
	pub fn click(&self) {
		if self.is_checkbox() {
			let mut data = self.inner.write();
			data.checked = !data.checked;
		}
		self.dispatch_event(&Event::new("click"));
	}

	pub fn downgrade(&self) -> WeakElement {
		WeakElement {
			inner: Arc::downgrade(&self.inner),
		}
	}

	/// Returns true if both handles refer to the same element.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
	}

	/// Visits this element and all descendant elements in document order.
	pub fn for_each_element(&self, visit: &mut dyn FnMut(&Element)) {
		visit(self);
		for child in self.children() {
			if let Node::Element(element) = child {
				element.for_each_element(visit);
			}
		}
	}

	/// Serializes the element and its subtree to HTML.
	pub fn to_html(&self) -> String {
		let mut out = String::new();
		self.write_html(&mut out);
		out
	}

	fn write_html(&self, out: &mut String) {
		let data = self.inner.read();

		out.push('<');
		out.push_str(&data.tag);
		for (name, value) in &data.attributes {
			out.push(' ');
			out.push_str(name);
			if !BOOLEAN_ATTRIBUTES.contains(&name.as_str()) {
				out.push_str("=\"");
				out.push_str(&html_escape(value));
				out.push('"');
			}
		}

		if VOID_ELEMENTS.contains(&data.tag.as_str()) {
			out.push_str(" />");
			return;
		}
		out.push('>');

		let raw = RAW_TEXT_ELEMENTS.contains(&data.tag.as_str());
		for child in &data.children {
			match child {
				Node::Text(text) if raw => out.push_str(text),
				Node::Text(text) => out.push_str(&html_escape(text)),
				Node::Element(element) => element.write_html(out),
			}
		}

		out.push_str("</");
		out.push_str(&data.tag);
		out.push('>');
	}
}

impl fmt::Debug for Element {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let data = self.inner.read();
		f.debug_struct("Element")
			.field("tag", &data.tag)
			.field("attributes", &data.attributes)
			.field("checked", &data.checked)
			.field("children", &data.children.len())
			.field("listeners", &data.listeners.len())
			.finish()
	}
}

/// A rendered document rooted at its `<body>`.
#[derive(Debug, Clone)]
pub struct Document {
	body: Element,
}

impl Document {
	/// Wraps an existing body element.
	pub fn new(body: Element) -> Self {
		Self { body }
	}

	pub fn body(&self) -> &Element {
		&self.body
	}

	/// Returns every element carrying `class`, in document order.
	pub fn elements_by_class(&self, class: &str) -> Vec<Element> {
		let mut found = Vec::new();
		self.body.for_each_element(&mut |element| {
			if element.has_class(class) {
				found.push(element.clone());
			}
		});
		found
	}

	/// Returns the first element whose `id` attribute equals `id`.
	pub fn get_element_by_id(&self, id: &str) -> Option<Element> {
		let mut found = None;
		self.body.for_each_element(&mut |element| {
			if found.is_none() && element.id().as_deref() == Some(id) {
				found = Some(element.clone());
			}
		});
		found
	}
}

impl Default for Document {
	fn default() -> Self {
		Self::new(Element::new("body"))
	}
}
