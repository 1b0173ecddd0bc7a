//! Submit report: which items were checked on a form post.

use crate::selection::SelectionViewModel;

/// The posted view-model list, partitioned by `checked`.
///
/// # Examples
///
/// ```
/// use checklist_core::{SelectionViewModel, SubmitReport};
///
/// let posted = vec![
///     SelectionViewModel::new(1, "Headlights", false),
///     SelectionViewModel::new(2, "Brake Light Switches", true),
/// ];
///
/// let report = SubmitReport::from_items(posted);
/// assert_eq!(report.checked_pairs(), vec![(2, "Brake Light Switches")]);
/// assert_eq!(
///     report.lines("Checkboxes"),
///     vec![
///         "Checked items on Checkboxes post".to_string(),
///         "Id: 2 Name: Brake Light Switches".to_string(),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitReport {
	checked: Vec<SelectionViewModel>,
	unchecked: Vec<SelectionViewModel>,
}

impl SubmitReport {
	/// Partitions the posted items, keeping their relative order.
	pub fn from_items(items: impl IntoIterator<Item = SelectionViewModel>) -> Self {
		let (checked, unchecked) = items.into_iter().partition(|item| item.checked);
		Self { checked, unchecked }
	}

	/// Returns the checked items in posted order.
	pub fn checked(&self) -> &[SelectionViewModel] {
		&self.checked
	}

	/// Returns the unchecked items in posted order.
	pub fn unchecked(&self) -> &[SelectionViewModel] {
		&self.unchecked
	}

	/// Returns `(id, name)` for every checked item.
	pub fn checked_pairs(&self) -> Vec<(i64, &str)> {
		self.checked
			.iter()
			.map(|item| (item.id, item.name.as_str()))
			.collect()
	}

	/// Returns true if nothing was checked.
	pub fn is_nothing_checked(&self) -> bool {
		self.checked.is_empty()
	}

	/// Renders the report lines for the given page name.
	///
	/// Either a header followed by one `Id: <id> Name: <name>` line per
	/// checked item, or a single "nothing checked" line.
	pub fn lines(&self, page: &str) -> Vec<String> {
		if self.checked.is_empty() {
			return vec![format!("Nothing checked for {} post", page)];
		}

		let mut lines = Vec::with_capacity(self.checked.len() + 1);
		lines.push(format!("Checked items on {} post", page));
		lines.extend(
			self.checked
				.iter()
				.map(|item| format!("Id: {} Name: {}", item.id, item.name)),
		);
		lines
	}
}
