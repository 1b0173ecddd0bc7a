//! Static part catalog
//!
//! The catalog is defined once at process start and never mutated.
//! [`PartCatalog::global`] exposes the built-in list as a process-wide
//! constant that any number of requests may read concurrently.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

/// Built-in catalog entries, in display order.
const DEFAULT_PARTS: &[(i64, &str)] = &[
	(1, "Headlights"),
	(2, "Brake Light Switches"),
	(3, "Wiper Switches"),
	(4, "Door Jamb Switches"),
];

static GLOBAL_CATALOG: LazyLock<PartCatalog> = LazyLock::new(|| PartCatalog {
	records: DEFAULT_PARTS
		.iter()
		.map(|&(id, name)| PartRecord::new(id, name))
		.collect(),
});

/// A single part offered on the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartRecord {
	/// Unique, stable identifier.
	pub id: i64,
	/// Display name.
	pub name: String,
}

impl PartRecord {
	/// Creates a new part record.
	///
	/// # Examples
	///
	/// ```
	/// use checklist_core::PartRecord;
	///
	/// let record = PartRecord::new(7, "Fog Lamps");
	/// assert_eq!(record.id, 7);
	/// assert_eq!(record.name, "Fog Lamps");
	/// ```
	pub fn new(id: i64, name: impl Into<String>) -> Self {
		Self {
			id,
			name: name.into(),
		}
	}
}

/// Errors raised while assembling a catalog.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
	#[error("Duplicate part id in catalog: {0}")]
	DuplicateId(i64),
}

/// Ordered, read-only list of parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartCatalog {
	records: Vec<PartRecord>,
}

impl PartCatalog {
	/// Creates a catalog from the given records, keeping their order.
	///
	/// # Errors
	///
	/// Returns [`CatalogError::DuplicateId`] if two records share an id.
	///
	/// # Examples
	///
	/// ```
	/// use checklist_core::{CatalogError, PartCatalog, PartRecord};
	///
	/// let catalog = PartCatalog::new(vec![PartRecord::new(10, "Horn")]).unwrap();
	/// assert_eq!(catalog.len(), 1);
	///
	/// let duplicated = PartCatalog::new(vec![
	///     PartRecord::new(1, "A"),
	///     PartRecord::new(1, "B"),
	/// ]);
	/// assert_eq!(duplicated, Err(CatalogError::DuplicateId(1)));
	/// ```
	pub fn new(records: Vec<PartRecord>) -> Result<Self, CatalogError> {
		let mut seen = HashSet::with_capacity(records.len());
		for record in &records {
			if !seen.insert(record.id) {
				return Err(CatalogError::DuplicateId(record.id));
			}
		}
		Ok(Self { records })
	}

	/// Returns the built-in process-wide catalog.
	pub fn global() -> &'static PartCatalog {
		&GLOBAL_CATALOG
	}

	/// Returns the parts in catalog order.
	///
	/// Every call returns the same sequence.
	pub fn list(&self) -> &[PartRecord] {
		&self.records
	}

	/// Looks a part up by id.
	pub fn get(&self, id: i64) -> Option<&PartRecord> {
		self.records.iter().find(|record| record.id == id)
	}

	/// Returns the number of parts.
	pub fn len(&self) -> usize {
		self.records.len()
	}

	/// Returns true if the catalog holds no parts.
	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}
}
