//! Initial checked-state policies
//!
//! A [`CheckedPolicy`] decides whether a part starts out checked when the
//! page is prepared. The default, [`EvenIdPolicy`], pre-checks parts whose id
//! is even. It carries no business meaning and can be swapped for any other
//! policy, including a plain closure.

use crate::catalog::PartRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Decides the initial `checked` state of a part.
pub trait CheckedPolicy: Send + Sync {
	/// Returns true if the part should be pre-checked.
	fn is_checked(&self, record: &PartRecord) -> bool;
}

impl<F> CheckedPolicy for F
where
	F: Fn(&PartRecord) -> bool + Send + Sync,
{
	fn is_checked(&self, record: &PartRecord) -> bool {
		self(record)
	}
}

/// Pre-checks parts with an even id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvenIdPolicy;

impl CheckedPolicy for EvenIdPolicy {
	fn is_checked(&self, record: &PartRecord) -> bool {
		record.id % 2 == 0
	}
}

/// Pre-checks every part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllChecked;

impl CheckedPolicy for AllChecked {
	fn is_checked(&self, _record: &PartRecord) -> bool {
		true
	}
}

/// Leaves every part unchecked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoneChecked;

impl CheckedPolicy for NoneChecked {
	fn is_checked(&self, _record: &PartRecord) -> bool {
		false
	}
}

/// Named policies selectable from configuration.
///
/// # Examples
///
/// ```
/// use checklist_core::PolicyKind;
///
/// let kind: PolicyKind = "even-id".parse().unwrap();
/// assert_eq!(kind, PolicyKind::EvenId);
/// assert!("sometimes".parse::<PolicyKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
	#[default]
	EvenId,
	All,
	None,
}

impl PolicyKind {
	/// Returns the configuration name of this policy.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::EvenId => "even-id",
			Self::All => "all",
			Self::None => "none",
		}
	}

	/// Instantiates the policy.
	pub fn into_policy(self) -> Arc<dyn CheckedPolicy> {
		match self {
			Self::EvenId => Arc::new(EvenIdPolicy),
			Self::All => Arc::new(AllChecked),
			Self::None => Arc::new(NoneChecked),
		}
	}
}

impl fmt::Display for PolicyKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Error returned when a policy name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown checked policy '{0}' (expected one of: even-id, all, none)")]
pub struct UnknownPolicy(pub String);

impl FromStr for PolicyKind {
	type Err = UnknownPolicy;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"even-id" | "even_id" | "even" => Ok(Self::EvenId),
			"all" => Ok(Self::All),
			"none" => Ok(Self::None),
			other => Err(UnknownPolicy(other.to_string())),
		}
	}
}
