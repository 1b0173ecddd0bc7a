//! # Checklist Core
//!
//! Data model for the checkbox list page.
//!
//! ## Overview
//!
//! - [`PartCatalog`]: the static, read-only list of parts offered on the page
//! - [`SelectionViewModel`]: one part combined with its request-scoped `checked` state
//! - [`SelectionInitializer`]: builds the view-model list from the catalog using a [`CheckedPolicy`]
//! - [`SubmitReport`]: partitions a posted view-model list into checked and unchecked items
//!
//! ## Example
//!
//! ```
//! use checklist_core::{PartCatalog, SelectionInitializer};
//!
//! let catalog = PartCatalog::global();
//! let items = SelectionInitializer::default().build(catalog.list());
//!
//! let checked: Vec<bool> = items.iter().map(|item| item.checked).collect();
//! assert_eq!(checked, vec![false, true, false, true]);
//! ```

pub mod catalog;
pub mod policy;
pub mod report;
pub mod selection;

pub use catalog::{CatalogError, PartCatalog, PartRecord};
pub use policy::{AllChecked, CheckedPolicy, EvenIdPolicy, NoneChecked, PolicyKind, UnknownPolicy};
pub use report::SubmitReport;
pub use selection::{SelectionInitializer, SelectionViewModel};
