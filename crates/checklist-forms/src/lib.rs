//! Form processing for the checkbox list page
//!
//! This crate provides:
//! - Field naming for the posted item list (`items[<index>].<field>`)
//! - Decoding of `application/x-www-form-urlencoded` posts back into
//!   [`SelectionViewModel`](checklist_core::SelectionViewModel) lists
//! - Encoding of a view-model list the way a browser would post it

pub mod field;
pub mod form;

pub use field::{FieldName, ITEMS_PREFIX, SelectionField};
pub use form::{FormError, FormResult, SelectionForm};
