//! Event listener bookkeeping
//!
//! Attaching a listener yields an [`EventHandle`] that can later detach it.
//! An [`EventRegistry`] groups handles by the element's `id` so a page can
//! drop every listener it attached in one call.

use crate::dom::{Element, ListenerId, WeakElement};
use indexmap::IndexMap;

/// A listener attached to one element.
#[derive(Debug, Clone)]
pub struct EventHandle {
	element: WeakElement,
	listener: ListenerId,
	event_type: String,
}

impl EventHandle {
	pub(crate) fn new(element: &Element, listener: ListenerId, event_type: impl Into<String>) -> Self {
		Self {
			element: element.downgrade(),
			listener,
			event_type: event_type.into(),
		}
	}

	pub fn event_type(&self) -> &str {
		&self.event_type
	}

	/// Returns the element the listener is attached to, if still alive.
	pub fn element(&self) -> Option<Element> {
		self.element.upgrade()
	}

	/// Removes the listener from its element.
	///
	/// Returns false if the element is gone or the listener was already removed.
	pub fn detach(&self) -> bool {
		self.element
			.upgrade()
			.is_some_and(|element| element.remove_event_listener(self.listener))
	}
}

/// Registry of attached listeners, keyed by element id.
#[derive(Debug, Default)]
pub struct EventRegistry {
	handles: IndexMap<String, Vec<EventHandle>>,
}

impl EventRegistry {
	/// Creates a new event registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers an event handle for an element.
	pub fn register(&mut self, element_id: impl Into<String>, handle: EventHandle) {
		self.handles
			.entry(element_id.into())
			.or_default()
			.push(handle);
	}

	/// Detaches and removes all event handles for an element.
	///
	/// Returns the number of listeners detached.
	pub fn unregister(&mut self, element_id: &str) -> usize {
		self.handles
			.shift_remove(element_id)
			.map_or(0, |handles| detach_all(&handles))
	}

	/// Detaches and removes every registered handle.
	pub fn clear(&mut self) -> usize {
		let detached = self.handles.values().map(|h| detach_all(h)).sum();
		self.handles.clear();
		detached
	}

	/// Returns the handles registered for an element.
	pub fn handles_for(&self, element_id: &str) -> &[EventHandle] {
		self.handles.get(element_id).map(Vec::as_slice).unwrap_or(&[])
	}

	/// Returns the registered element ids in registration order.
	pub fn element_ids(&self) -> impl Iterator<Item = &str> {
		self.handles.keys().map(String::as_str)
	}

	/// Returns the number of registered elements.
	pub fn len(&self) -> usize {
		self.handles.len()
	}

	/// Returns true if no event handles are registered.
	pub fn is_empty(&self) -> bool {
		self.handles.is_empty()
	}
}

fn detach_all(handles: &[EventHandle]) -> usize {
	handles.iter().filter(|handle| handle.detach()).count()
}
