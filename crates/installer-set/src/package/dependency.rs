use std::rc::Rc;

use serde::{Serialize, Deserialize};
use super::*;

/// Describes a package using a name and version requirement.
///
/// Differs from [`NameTuple`] in that it represents a range of packages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
	pub name: String,
	#[serde(default)]
	pub requirement: Requirement,
}

impl Dependency {
	pub fn new(name: impl Into<String>, requirement: Requirement) -> Self {
		Self {
			name: name.into(),
			requirement,
		}
	}

	/// A dependency on any version of `name`.
	pub fn any(name: impl Into<String>) -> Self {
		Self::new(name, Requirement::Any)
	}

	pub fn matches(&self, name: &str, version: &PackageVersion) -> bool {
		self.name == name && self.requirement.is_version_within(version)
	}

	pub fn matches_spec(&self, spec: &Specification) -> bool {
		self.matches(&spec.name, &spec.version)
	}
}

/// Parses `name` optionally followed by a requirement, e.g. `foo >= 1.0, <= 2.0`.
impl std::str::FromStr for Dependency {
	type Err = crate::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		let split = s.find(|c: char| c.is_whitespace() || matches!(c, '<' | '>' | '=')).unwrap_or(s.len());
		let (name, requirement) = s.split_at(split);
		if name.is_empty() {
			return Err(crate::Error::Parse(format!("dependency \"{}\" has no name", s)))
		}
		Ok(Self::new(name, requirement.parse()?))
	}
}

impl std::fmt::Display for Dependency {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} ({})", self.name, self.requirement)
	}
}

/// A dependency the resolver needs satisfied, along with the specification that asked for it.
#[derive(Debug, Clone)]
pub struct DependencyRequest {
	dependency: Dependency,
	requester: Option<Rc<Specification>>,
}

impl DependencyRequest {
	/// `requester` is `None` for dependencies coming straight from the user.
	pub fn new(dependency: Dependency, requester: Option<Rc<Specification>>) -> Self {
		Self { dependency, requester }
	}

	pub fn dependency(&self) -> &Dependency {
		&self.dependency
	}

	pub fn requester(&self) -> Option<&Rc<Specification>> {
		self.requester.as_ref()
	}

	pub fn matches_spec(&self, spec: &Specification) -> bool {
		self.dependency.matches_spec(spec)
	}
}

impl From<Dependency> for DependencyRequest {
	fn from(dependency: Dependency) -> Self {
		Self::new(dependency, None)
	}
}

impl std::fmt::Display for DependencyRequest {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match &self.requester {
			Some(requester) => write!(f, "{} (required by {})", self.dependency, requester.full_name()),
			None => write!(f, "{}", self.dependency),
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn dependency_parse_name_only() {
		let dep: Dependency = "foo".parse().unwrap();
		assert_eq!(dep, Dependency::any("foo"));
	}

	#[test]
	fn dependency_parse_with_requirement() {
		let dep: Dependency = "foo>= 1.0".parse().unwrap();
		assert_eq!(dep.name, "foo");
		assert_eq!(dep.requirement, VersionBounds::MinOnly(PackageVersion::new("1.0").unwrap()));
	}

	#[test]
	fn dependency_parse_without_name_fails() {
		assert!(">= 1.0".parse::<Dependency>().is_err());
	}

	#[test]
	fn dependency_matches_name_and_version() {
		let dep: Dependency = "foo >= 1.0".parse().unwrap();
		assert!(dep.matches_spec(&Specification::new("foo", "1.2").unwrap()));
		assert!(!dep.matches_spec(&Specification::new("foo", "0.9").unwrap()));
		assert!(!dep.matches_spec(&Specification::new("bar", "1.2").unwrap()));
	}

	#[test]
	fn request_names_its_requester() {
		let requester = Rc::new(Specification::new("app", "2.0").unwrap());
		let request = DependencyRequest::new("foo >= 1.0".parse().unwrap(), Some(requester.clone()));
		assert!(request.requester().is_some_and(|r| Rc::ptr_eq(r, &requester)));
		assert_eq!(request.to_string(), "foo (>= 1.0) (required by app-2.0)");
		assert!(DependencyRequest::from(Dependency::any("foo")).requester().is_none());
	}
}
