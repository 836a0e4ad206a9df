//! OncoKB evidence level

use serde::{Deserialize, Serialize};

/// Normalized output of the pathogenicity-level source
///
/// The empty shape carries no level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathogenicityEvidence {
	pub level: Option<String>,
}

impl PathogenicityEvidence {
	/// Build from a raw level, treating blank values as absent
	pub fn from_level(level: Option<String>) -> Self {
		let level = level
			.map(|l| l.trim().to_string())
			.filter(|l| !l.is_empty());
		Self { level }
	}

	pub fn is_empty(&self) -> bool {
		self.level.is_none()
	}
}
