//! Checkbox list renderer
//!
//! Turns a view-model list into the form markup. Each item at position `i`
//! becomes:
//!
//! ```text
//! <div class="form-check">
//!   <input type="hidden" name="items[i].id" value="<id>" />
//!   <input type="checkbox" name="items[i].checked" value="true" [checked] id="<id>"
//!          class="form-check-input" aria-checked="true|false" aria-label="<name>" />
//!   <input type="hidden" name="items[i].name" value="<name>" />
//!   <label class="form-check-label" for="<id>"><name></label>
//! </div>
//! ```
//!
//! The renderer only places attributes. Keeping `aria-checked` in sync after
//! load is the job of [`AriaSyncController`](crate::aria::AriaSyncController).

use crate::aria::{ARIA_CHECKED, MARKER_CLASS};
use crate::builder::{div, label};
use crate::dom::Element;
use crate::form::{BootstrapClasses, CheckboxInput, HiddenInput, Widget, WidgetAttrs};
use checklist_core::SelectionViewModel;
use checklist_forms::{FieldName, SelectionField};

/// Renders [`SelectionViewModel`]s as checkbox form groups.
///
/// Every checkbox carries [`MARKER_CLASS`], the class both
/// [`AriaSyncController::bootstrap`](crate::aria::AriaSyncController::bootstrap)
/// and the page's bootstrap script select on.
#[derive(Debug, Clone)]
pub struct CheckboxRenderer {
	checkbox: CheckboxInput,
}

impl CheckboxRenderer {
	pub fn new() -> Self {
		Self {
			checkbox: CheckboxInput::new(),
		}
	}

	/// Renders the item at `index`.
	pub fn render_item(&self, index: usize, item: &SelectionViewModel) -> Element {
		let id = item.id.to_string();
		let no_attrs = WidgetAttrs::new();

		let id_field = HiddenInput::new().render(
			&FieldName::new(index, SelectionField::Id).to_string(),
			Some(&id),
			&no_attrs,
		);

		let checkbox_attrs = WidgetAttrs::new()
			.id(id.as_str())
			.class(MARKER_CLASS)
			.attr(ARIA_CHECKED, item.aria_checked())
			.aria("label", item.name.as_str());
		let checkbox = self.checkbox.render(
			&FieldName::new(index, SelectionField::Checked).to_string(),
			Some(if item.checked { "true" } else { "false" }),
			&checkbox_attrs,
		);

		let name_field = HiddenInput::new().render(
			&FieldName::new(index, SelectionField::Name).to_string(),
			Some(&item.name),
			&no_attrs,
		);

		let caption = label()
			.class(BootstrapClasses::form_check_label_class())
			.attr("for", &id)
			.text(&item.name)
			.build();

		div()
			.class(BootstrapClasses::form_check_class())
			.children([id_field, checkbox, name_field, caption])
			.build()
	}

	/// Renders every item in list order.
	pub fn render(&self, items: &[SelectionViewModel]) -> Vec<Element> {
		items
			.iter()
			.enumerate()
			.map(|(index, item)| self.render_item(index, item))
			.collect()
	}

	/// Renders every item and concatenates the HTML.
	pub fn render_to_string(&self, items: &[SelectionViewModel]) -> String {
		self.render(items)
			.iter()
			.map(Element::to_html)
			.collect::<Vec<_>>()
			.join("\n")
	}
}

impl Default for CheckboxRenderer {
	fn default() -> Self {
		Self::new()
	}
}
