//! Part catalog, checked-state policies, view-models and submit reports
//!
//! ```rust
//! use aria_checklist::core::{PartCatalog, SelectionInitializer, SubmitReport};
//!
//! let items = SelectionInitializer::default().build(PartCatalog::global().list());
//! let report = SubmitReport::from_items(items);
//!
//! assert_eq!(report.lines("Checkboxes")[0], "Checked items on Checkboxes post");
//! ```

pub use checklist_core::*;
