use std::cmp::Ordering;

use serde::{Serialize, Deserialize};

/// A package version with an optional `epoch:` prefix.
///
/// Versions can be almost any string so ordering is done chunk by chunk,
/// alternating between non-numeric runs compared lexically and numeric runs compared by value.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackageVersion {
	epoch: u32,
	version: String,
}

impl PackageVersion {
	/// # Errors
	/// [`Parse`](crate::Error::Parse) when `version` is empty or the epoch is present but not a number.
	pub fn new(version: impl AsRef<str>) -> crate::Result<Self> {
		use crate::Error::Parse;
		let version = version.as_ref().trim();
		let (epoch, version) = match version.split_once(':') {
			Some((epoch, rest)) => (
				epoch.parse::<u32>().map_err(|_| Parse(format!("invalid epoch in version \"{}\"", version)))?,
				rest,
			),
			None => (0, version),
		};
		if version.is_empty() {
			return Err(Parse("empty version".to_string()))
		}
		Ok(PackageVersion {
			epoch,
			version: version.to_string(),
		})
	}
}

impl TryFrom<String> for PackageVersion {
	type Error = crate::Error;
	fn try_from(value: String) -> Result<Self, Self::Error> { Self::new(value) }
}

impl TryFrom<&str> for PackageVersion {
	type Error = crate::Error;
	fn try_from(value: &str) -> Result<Self, Self::Error> { Self::new(value) }
}

impl From<PackageVersion> for String {
	fn from(value: PackageVersion) -> Self { value.to_string() }
}

impl std::str::FromStr for PackageVersion {
	type Err = crate::Error;
	fn from_str(s: &str) -> Result<Self, Self::Err> { Self::new(s) }
}

impl PartialEq for PackageVersion {
	fn eq(&self, other: &Self) -> bool {
		self.cmp(other) == Ordering::Equal
	}
}

/// Splits off the leading run of characters for which `pred` holds.
fn split_run(s: &str, pred: impl Fn(char) -> bool) -> (&str, &str) {
	let i = s.char_indices().find(|(_, c)| !pred(*c)).map(|(i, _)| i).unwrap_or(s.len());
	s.split_at(i)
}

/// Drops leading zeros while keeping a single `0` for all-zero runs.
fn trim_numeric(s: &str) -> &str {
	let trimmed = s.trim_start_matches('0');
	if trimmed.is_empty() && !s.is_empty() { &s[s.len() - 1..] } else { trimmed }
}

/// Compares two digit runs by value without parsing, so long runs can't overflow.
/// A missing run sorts before any present one.
fn cmp_numeric(lhs: &str, rhs: &str) -> Ordering {
	let lhs = trim_numeric(lhs);
	let rhs = trim_numeric(rhs);
	lhs.len().cmp(&rhs.len()).then_with(|| lhs.cmp(rhs))
}

impl Ord for PackageVersion {
	fn cmp(&self, other: &Self) -> Ordering {
		match self.epoch.cmp(&other.epoch) {
			Ordering::Equal => {},
			ord => return ord,
		}

		let mut lhs = self.version.as_str();
		let mut rhs = other.version.as_str();

		while !lhs.is_empty() && !rhs.is_empty() {
			let (l, l_rest) = split_run(lhs, |c| !c.is_ascii_digit());
			let (r, r_rest) = split_run(rhs, |c| !c.is_ascii_digit());
			match l.cmp(r) {
				Ordering::Equal => {},
				ord => return ord,
			}

			let (l, l_rest) = split_run(l_rest, |c| c.is_ascii_digit());
			let (r, r_rest) = split_run(r_rest, |c| c.is_ascii_digit());
			match cmp_numeric(l, r) {
				Ordering::Equal => {},
				ord => return ord,
			}

			lhs = l_rest;
			rhs = r_rest;
		}

		lhs.len().cmp(&rhs.len())
	}
}

impl PartialOrd for PackageVersion {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

/* Must agree with `Ord`, so numeric runs are hashed without their leading zeros. */
impl std::hash::Hash for PackageVersion {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		self.epoch.hash(state);
		let mut rest = self.version.as_str();
		while !rest.is_empty() {
			let (text, tail) = split_run(rest, |c| !c.is_ascii_digit());
			let (digits, tail) = split_run(tail, |c| c.is_ascii_digit());
			text.hash(state);
			trim_numeric(digits).hash(state);
			rest = tail;
		}
	}
}

impl std::fmt::Display for PackageVersion {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		if self.epoch == 0 {
			write!(f, "{}", self.version)
		} else {
			write!(f, "{}:{}", self.epoch, self.version)
		}
	}
}
