use serde::{Serialize, Deserialize};

use super::PackageVersion;

/// A generic enum to describe a range of versions. Both ends are inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VersionBounds<T>
where T: std::cmp::PartialEq + std::cmp::Ord + std::clone::Clone,
{
	Any,
	Explicit(T),
	MinOnly(T),
	MaxOnly(T),
	MinMax(T, T),
}

impl<T> Default for VersionBounds<T>
where T: std::cmp::PartialEq + std::cmp::Ord + std::clone::Clone,
{
	fn default() -> Self { VersionBounds::Any }
}

/// Version requirement of a dependency.
pub type Requirement = VersionBounds<PackageVersion>;

impl<T> VersionBounds<T>
where T: std::cmp::PartialEq + std::cmp::Ord + std::clone::Clone,
{
	/// When all arguments are `None` will return `Any`
	pub fn new(explicit: Option<T>, min: Option<T>, max: Option<T>) -> crate::Result<VersionBounds<T>> {
		match (explicit, min, max) {
			(None, None, None) => Ok(VersionBounds::Any),
			(None, None, Some(max)) => Ok(VersionBounds::MaxOnly(max)),
			(None, Some(min), None) => Ok(VersionBounds::MinOnly(min)),
			(None, Some(min), Some(max)) => Ok(VersionBounds::MinMax(min, max)),
			(Some(e), None, None) => Ok(VersionBounds::Explicit(e)),
			_ => Err(crate::Error::Parse("Attempted to create bounds with both explicit and min or max version constraint".to_string()))
		}
	}

	pub fn is_version_within(&self, other: &T) -> bool {
		match self {
			VersionBounds::Any => true,
			VersionBounds::Explicit(v) => other == v,
			VersionBounds::MinOnly(min) => other >= min,
			VersionBounds::MaxOnly(max) => other <= max,
			VersionBounds::MinMax(min, max) => min <= other && other <= max,
		}
	}
}

/// Parses `*`, `1.0`, `= 1.0`, `>= 1.0`, `<= 2.0` and `>= 1.0, <= 2.0`.
impl std::str::FromStr for VersionBounds<PackageVersion> {
	type Err = crate::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		use crate::Error::Parse;

		let s = s.trim();
		if s.is_empty() || s == "*" {
			return Ok(VersionBounds::Any)
		}

		let mut explicit = None;
		let mut min = None;
		let mut max = None;
		for clause in s.split(',').map(str::trim) {
			let (slot, version) = if let Some(v) = clause.strip_prefix(">=") {
				(&mut min, v)
			} else if let Some(v) = clause.strip_prefix("<=") {
				(&mut max, v)
			} else if let Some(v) = clause.strip_prefix('=') {
				(&mut explicit, v)
			} else if clause.starts_with(['<', '>', '~', '!']) {
				return Err(Parse(format!("unsupported requirement operator in \"{}\"", clause)))
			} else {
				(&mut explicit, clause)
			};
			if slot.is_some() {
				return Err(Parse(format!("repeated requirement clause in \"{}\"", s)))
			}
			*slot = Some(PackageVersion::new(version)?);
		}

		VersionBounds::new(explicit, min, max)
	}
}

impl std::fmt::Display for VersionBounds<PackageVersion> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			VersionBounds::Any => write!(f, "*"),
			VersionBounds::Explicit(v) => write!(f, "= {}", v),
			VersionBounds::MinOnly(min) => write!(f, ">= {}", min),
			VersionBounds::MaxOnly(max) => write!(f, "<= {}", max),
			VersionBounds::MinMax(min, max) => write!(f, ">= {}, <= {}", min, max),
		}
	}
}
