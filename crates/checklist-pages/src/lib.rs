//! # Checklist Pages
//!
//! Rendering and client behavior for the checkbox list page.
//!
//! ## Architecture
//!
//! - [`dom`]: in-memory element tree with attributes, native checked state and listeners
//! - [`builder`]: fluent element builder
//! - [`form`](mod@form): form widgets with stable attribute order
//! - [`renderer`]: turns view-models into checkbox form groups
//! - [`aria`]: keeps `aria-checked` in step with user clicks
//! - [`client`]: inline bootstrap script, and the `wasm-bindgen` export on browser builds
//! - [`ssr`]: full page rendering
//!
//! ## Example
//!
//! ```
//! use checklist_core::{PartCatalog, SelectionInitializer};
//! use checklist_pages::{AriaSyncController, ChecklistPage, MARKER_CLASS};
//!
//! let items = SelectionInitializer::default().build(PartCatalog::global().list());
//! let document = ChecklistPage::default().render_document(&items);
//! let _registry = AriaSyncController::default().bootstrap(&document);
//!
//! let first = &document.elements_by_class(MARKER_CLASS)[0];
//! first.click();
//! assert_eq!(first.get_attribute("aria-checked").as_deref(), Some("true"));
//! ```

pub mod aria;
pub mod builder;
pub mod callback;
pub mod client;
pub mod dom;
pub mod events;
pub mod form;
pub mod renderer;
pub mod ssr;

pub use aria::{
	ARIA_CHECKED, AriaSyncController, AriaSyncMode, MARKER_CLASS, UnknownAriaSyncMode,
	set_aria_checked_false,
};
pub use builder::ElementBuilder;
pub use callback::Callback;
pub use client::client_script;
#[cfg(all(target_family = "wasm", target_os = "unknown"))]
pub use client::init_aria_sync;
pub use dom::{Document, Element, Event, ListenerId, Node, WeakElement};
pub use events::{EventHandle, EventRegistry};
pub use renderer::CheckboxRenderer;
pub use ssr::{ChecklistPage, PageOptions};
