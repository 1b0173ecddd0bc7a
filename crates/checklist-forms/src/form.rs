//! Decoding and encoding of the posted selection list

use crate::field::{FieldName, SelectionField};
use checklist_core::SelectionViewModel;
use std::collections::BTreeMap;

/// Errors raised while decoding a posted form.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
	#[error("Malformed form body: {0}")]
	Encoding(String),

	#[error("Malformed field name: {0}")]
	MalformedFieldName(String),

	#[error("Invalid item index: {0}")]
	InvalidIndex(String),

	#[error("Unknown item field: {0}")]
	UnknownField(String),

	#[error("Invalid id for item {index}: {value}")]
	InvalidId { index: usize, value: String },

	#[error("Item {index} is missing its {field} field")]
	MissingField { index: usize, field: &'static str },
}

pub type FormResult<T> = Result<T, FormError>;

/// Values collected for one item while decoding.
#[derive(Debug, Default)]
struct PartialItem {
	id: Option<i64>,
	name: Option<String>,
	checked: bool,
}

/// Converts between posted form bodies and view-model lists.
pub struct SelectionForm;

impl SelectionForm {
	/// Decodes an `application/x-www-form-urlencoded` body.
	///
	/// Items are returned in index order. An unchecked checkbox posts
	/// nothing, so a missing `checked` field means `false`. Fields outside
	/// the item list are ignored.
	///
	/// # Errors
	///
	/// Returns a [`FormError`] if the body is not urlencoded, a field name is
	/// malformed, an id is not an integer, or an item lacks its id or name.
	///
	/// # Examples
	///
	/// ```
	/// use checklist_forms::SelectionForm;
	///
	/// let body = b"items[0].id=1&items[0].name=Headlights\
	///     &items[1].id=2&items[1].checked=true&items[1].name=Brake+Light+Switches";
	///
	/// let items = SelectionForm::decode(body).unwrap();
	/// assert_eq!(items.len(), 2);
	/// assert!(!items[0].checked);
	/// assert!(items[1].checked);
	/// assert_eq!(items[1].name, "Brake Light Switches");
	/// ```
	pub fn decode(body: &[u8]) -> FormResult<Vec<SelectionViewModel>> {
		let pairs: Vec<(String, String)> =
			serde_urlencoded::from_bytes(body).map_err(|e| FormError::Encoding(e.to_string()))?;
		Self::decode_pairs(pairs)
	}

	/// Decodes already split `(name, value)` pairs.
	pub fn decode_pairs<I, K, V>(pairs: I) -> FormResult<Vec<SelectionViewModel>>
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: Into<String>,
	{
		let mut items: BTreeMap<usize, PartialItem> = BTreeMap::new();

		for (key, value) in pairs {
			let key = key.as_ref();
			if !FieldName::is_item_field(key) {
				continue;
			}

			let name: FieldName = key.parse()?;
			let value: String = value.into();
			let item = items.entry(name.index).or_default();

			match name.field {
				SelectionField::Id => {
					let id = value.trim().parse::<i64>().map_err(|_| FormError::InvalidId {
						index: name.index,
						value: value.clone(),
					})?;
					item.id = Some(id);
				}
				SelectionField::Name => item.name = Some(value),
				// A checkbox may be paired with a hidden "false" fallback; any
				// truthy value wins.
				SelectionField::Checked => item.checked |= is_truthy(&value),
			}
		}

		items
			.into_iter()
			.map(|(index, item)| {
				let id = item.id.ok_or(FormError::MissingField { index, field: "id" })?;
				let name = item.name.ok_or(FormError::MissingField {
					index,
					field: "name",
				})?;
				Ok(SelectionViewModel::new(id, name, item.checked))
			})
			.collect()
	}

	/// Encodes a view-model list the way a browser posts the rendered form.
	///
	/// The checked field is only present for checked items.
	pub fn encode(items: &[SelectionViewModel]) -> FormResult<String> {
		let mut pairs: Vec<(String, String)> = Vec::with_capacity(items.len() * 3);
		for (index, item) in items.iter().enumerate() {
			pairs.push((
				FieldName::new(index, SelectionField::Id).to_string(),
				item.id.to_string(),
			));
			if item.checked {
				pairs.push((
					FieldName::new(index, SelectionField::Checked).to_string(),
					"true".to_string(),
				));
			}
			pairs.push((
				FieldName::new(index, SelectionField::Name).to_string(),
				item.name.clone(),
			));
		}
		serde_urlencoded::to_string(&pairs).map_err(|e| FormError::Encoding(e.to_string()))
	}
}

fn is_truthy(value: &str) -> bool {
	matches!(value.trim(), "true" | "True" | "on" | "1")
}
