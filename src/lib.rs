//! # Aria Checklist
//!
//! A server-rendered list of part checkboxes whose `aria-checked` state
//! follows user clicks, with a form post that reports which parts were
//! checked.
//!
//! ## Crates
//!
//! - [`core`] - part catalog, checked-state policies, view-models, submit reports
//! - [`forms`] - `items[i].field` naming, decoding and encoding of the posted form
//! - [`pages`] - DOM model, widgets, renderer, ARIA synchronization, page SSR
//! - [`server`] - hyper server, routing, settings, logging, shutdown
//!
//! ## Feature Flags
//!
//! - `server` (default) - the HTTP server; unavailable on `wasm32`
//!
//! ## Quick Example
//!
//! ```rust
//! use aria_checklist::prelude::*;
//!
//! let items = SelectionInitializer::default().build(PartCatalog::global().list());
//! let html = ChecklistPage::new(PageOptions::new()).render(&items);
//!
//! assert!(html.contains(r#"aria-checked="true" aria-label="Brake Light Switches""#));
//! ```

pub mod core;
pub mod forms;
pub mod pages;
#[cfg(all(feature = "server", not(target_arch = "wasm32")))]
pub mod server;

pub mod prelude {
	pub use crate::core::{
		PartCatalog, PartRecord, PolicyKind, SelectionInitializer, SelectionViewModel,
		SubmitReport,
	};
	pub use crate::forms::{FieldName, FormError, SelectionField, SelectionForm};
	pub use crate::pages::{
		AriaSyncController, AriaSyncMode, CheckboxRenderer, ChecklistPage, Document, Element,
		PageOptions,
	};

	#[cfg(all(feature = "server", not(target_arch = "wasm32")))]
	pub use crate::server::{ChecklistApp, Handler, HttpServer, Settings, ShutdownCoordinator};
}
