//! Posted form field naming, decoding and encoding

pub use checklist_forms::*;
