//! Checkbox rendering and aria-checked synchronization
//!
//! ## Architecture
//!
//! - **DOM model**: shared elements with attributes and event listeners
//! - **Widgets**: checkbox and hidden input rendering
//! - **Renderer**: one `div.form-check` block per item
//! - **ARIA sync**: click handlers keeping `aria-checked` in step
//! - **SSR**: the full HTML page with its bootstrap script
//!
//! ## Example
//!
//! ```rust
//! use aria_checklist::pages::{AriaSyncController, ChecklistPage, PageOptions};
//! use aria_checklist::core::SelectionViewModel;
//!
//! let items = vec![SelectionViewModel::new(1, "Headlights", false)];
//! let document = ChecklistPage::new(PageOptions::new()).render_document(&items);
//! let _registry = AriaSyncController::toggle().bootstrap(&document);
//!
//! let checkbox = document.get_element_by_id("1").unwrap();
//! checkbox.click();
//! assert_eq!(checkbox.get_attribute("aria-checked").as_deref(), Some("true"));
//! ```

pub use checklist_pages::*;
