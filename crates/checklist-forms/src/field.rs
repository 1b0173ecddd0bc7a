//! Field names of the posted item list
//!
//! Every rendered item contributes up to three fields, all indexed by the
//! item's position in the list:
//!
//! | Field | Name | Source |
//! |-------|------|--------|
//! | id | `items[i].id` | hidden input |
//! | name | `items[i].name` | hidden input |
//! | checked | `items[i].checked` | checkbox, posted only when checked |

use crate::form::FormError;
use std::fmt;
use std::str::FromStr;

/// Prefix shared by all item fields.
pub const ITEMS_PREFIX: &str = "items";

/// One of the per-item fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionField {
	Id,
	Name,
	Checked,
}

impl SelectionField {
	/// Returns the field's suffix in the posted name.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Id => "id",
			Self::Name => "name",
			Self::Checked => "checked",
		}
	}
}

impl FromStr for SelectionField {
	type Err = FormError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"id" => Ok(Self::Id),
			"name" => Ok(Self::Name),
			"checked" => Ok(Self::Checked),
			other => Err(FormError::UnknownField(other.to_string())),
		}
	}
}

/// A parsed `items[<index>].<field>` name.
///
/// # Examples
///
/// ```
/// use checklist_forms::{FieldName, SelectionField};
///
/// let name = FieldName::new(2, SelectionField::Checked);
/// assert_eq!(name.to_string(), "items[2].checked");
///
/// let parsed: FieldName = "items[0].id".parse().unwrap();
/// assert_eq!(parsed, FieldName::new(0, SelectionField::Id));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldName {
	pub index: usize,
	pub field: SelectionField,
}

impl FieldName {
	/// Creates a field name for the item at `index`.
	pub fn new(index: usize, field: SelectionField) -> Self {
		Self { index, field }
	}

	/// Returns true if `raw` belongs to the item list at all.
	///
	/// Names outside the list (submit buttons, tokens) are ignored by the
	/// decoder rather than rejected.
	pub fn is_item_field(raw: &str) -> bool {
		raw.strip_prefix(ITEMS_PREFIX)
			.is_some_and(|rest| rest.starts_with('['))
	}
}

impl fmt::Display for FieldName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}[{}].{}",
			ITEMS_PREFIX,
			self.index,
			self.field.as_str()
		)
	}
}

impl FromStr for FieldName {
	type Err = FormError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let malformed = || FormError::MalformedFieldName(s.to_string());

		let rest = s
			.strip_prefix(ITEMS_PREFIX)
			.and_then(|rest| rest.strip_prefix('['))
			.ok_or_else(malformed)?;
		let (index, field) = rest.split_once("].").ok_or_else(malformed)?;

		if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
			return Err(FormError::InvalidIndex(index.to_string()));
		}
		let index = index
			.parse::<usize>()
			.map_err(|_| FormError::InvalidIndex(index.to_string()))?;

		Ok(Self {
			index,
			field: field.parse()?,
		})
	}
}
