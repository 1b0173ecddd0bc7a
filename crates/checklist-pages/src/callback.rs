//! Callback types for event handlers.
//!
//! [`Callback`] wraps a function in an `Arc`, making it cheaply cloneable
//! while giving handlers a stable identity across dispatches.
//!
//! ## Example
//!
//! ```
//! use checklist_pages::{Callback, Event};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! let clicks = Arc::new(AtomicUsize::new(0));
//! let on_click = Callback::new({
//!     let clicks = clicks.clone();
//!     move |_event: Event| {
//!         clicks.fetch_add(1, Ordering::SeqCst);
//!     }
//! });
//!
//! on_click.call(Event::new("click"));
//! assert_eq!(clicks.load(Ordering::SeqCst), 1);
//! ```

use crate::dom::Event;
use std::fmt;
use std::sync::Arc;

/// A type-safe, cloneable callback wrapper for event handlers.
///
/// ## Type Parameters
///
/// - `Args`: The argument type the callback receives (defaults to [`Event`])
/// - `Ret`: The return type of the callback (defaults to `()`)
pub struct Callback<Args = Event, Ret = ()> {
	inner: Arc<dyn Fn(Args) -> Ret + Send + Sync + 'static>,
}

impl<Args, Ret> Callback<Args, Ret> {
	/// Creates a new Callback from a function or closure.
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(Args) -> Ret + Send + Sync + 'static,
	{
		Self { inner: Arc::new(f) }
	}

	/// Calls the callback with the given arguments.
	pub fn call(&self, args: Args) -> Ret {
		(self.inner)(args)
	}

	/// Returns true if both callbacks wrap the same function instance.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
	}
}

impl<Args, Ret> Clone for Callback<Args, Ret> {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<Args, Ret> fmt::Debug for Callback<Args, Ret> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Callback").finish_non_exhaustive()
	}
}

impl<F, Args, Ret> From<F> for Callback<Args, Ret>
where
	F: Fn(Args) -> Ret + Send + Sync + 'static,
{
	fn from(f: F) -> Self {
		Self::new(f)
	}
}
