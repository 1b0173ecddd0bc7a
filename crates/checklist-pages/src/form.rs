//! Form widgets for the checkbox list
//!
//! Widgets render form controls as [`Element`](crate::dom::Element)s with a
//! stable attribute order, so the serialized markup is byte-for-byte
//! predictable.

pub mod rendering;

pub use rendering::{
	BootstrapClasses, CheckboxInput, HiddenInput, Widget, WidgetAttrs, WidgetType, html_escape,
};
