//! Selection view-models and their initializer

use crate::catalog::PartRecord;
use crate::policy::{CheckedPolicy, EvenIdPolicy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A catalog part combined with its request-scoped `checked` state.
///
/// Created when the page is prepared, carried through rendering, posted back
/// by the client and read once by the submit handler.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionViewModel {
	/// Copied from [`PartRecord::id`].
	pub id: i64,
	/// Copied from [`PartRecord::name`].
	pub name: String,
	/// Whether the checkbox is checked.
	pub checked: bool,
}

impl SelectionViewModel {
	/// Creates a new view-model.
	pub fn new(id: i64, name: impl Into<String>, checked: bool) -> Self {
		Self {
			id,
			name: name.into(),
			checked,
		}
	}

	/// Creates a view-model from a catalog record.
	pub fn from_record(record: &PartRecord, checked: bool) -> Self {
		Self::new(record.id, record.name.clone(), checked)
	}

	/// Returns the `aria-checked` string matching `checked`.
	pub fn aria_checked(&self) -> &'static str {
		if self.checked { "true" } else { "false" }
	}
}

/// Builds the view-model list from catalog records.
///
/// # Examples
///
/// ```
/// use checklist_core::{PartRecord, SelectionInitializer, AllChecked};
///
/// let records = vec![PartRecord::new(1, "Headlights"), PartRecord::new(2, "Horn")];
///
/// let items = SelectionInitializer::default().build(&records);
/// assert!(!items[0].checked);
/// assert!(items[1].checked);
///
/// let items = SelectionInitializer::with_policy(AllChecked).build(&records);
/// assert!(items.iter().all(|item| item.checked));
/// ```
#[derive(Clone)]
pub struct SelectionInitializer {
	policy: Arc<dyn CheckedPolicy>,
}

impl SelectionInitializer {
	/// Creates an initializer using the given policy.
	pub fn with_policy(policy: impl CheckedPolicy + 'static) -> Self {
		Self {
			policy: Arc::new(policy),
		}
	}

	/// Creates an initializer from an already shared policy.
	pub fn from_shared(policy: Arc<dyn CheckedPolicy>) -> Self {
		Self { policy }
	}

	/// Builds one view-model per record, in input order.
	///
	/// Empty input yields empty output.
	pub fn build(&self, records: &[PartRecord]) -> Vec<SelectionViewModel> {
		records
			.iter()
			.map(|record| SelectionViewModel::from_record(record, self.policy.is_checked(record)))
			.collect()
	}
}

impl Default for SelectionInitializer {
	fn default() -> Self {
		Self::with_policy(EvenIdPolicy)
	}
}

impl fmt::Debug for SelectionInitializer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SelectionInitializer").finish_non_exhaustive()
	}
}
