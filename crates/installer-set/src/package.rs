//! Various types associated with packages.

use serde::{Serialize, Deserialize};

mod version;
pub use version::PackageVersion;

mod version_bounds;
pub use version_bounds::VersionBounds;
pub use version_bounds::Requirement;

mod dependency;
pub use dependency::Dependency;
pub use dependency::DependencyRequest;

/// The platform a package was built for.
///
/// Only built through [`Platform::PORTABLE`] or the `From` conversions, which map `any` and the
/// empty string to the portable platform, so every platform has exactly one spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Platform(Option<String>);

impl Platform {
	/// Runs anywhere, written as `any`.
	pub const PORTABLE: Platform = Platform(None);

	pub fn is_portable(&self) -> bool {
		self.0.is_none()
	}

	/// The platform name for platform specific builds, e.g. `x86_64-linux`.
	pub fn specific(&self) -> Option<&str> {
		self.0.as_deref()
	}
}

impl From<String> for Platform {
	fn from(value: String) -> Self {
		if value.is_empty() || value == "any" {
			Platform::PORTABLE
		} else {
			Platform(Some(value))
		}
	}
}

impl From<&str> for Platform {
	fn from(value: &str) -> Self { Platform::from(value.to_string()) }
}

impl From<Platform> for String {
	fn from(value: Platform) -> Self { value.to_string() }
}

impl std::fmt::Display for Platform {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.specific().unwrap_or("any"))
	}
}

/// The identity of a single package build.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NameTuple {
	pub name: String,
	pub version: PackageVersion,
	#[serde(default)]
	pub platform: Platform,
}

impl NameTuple {
	pub fn new(name: impl Into<String>, version: PackageVersion, platform: Platform) -> Self {
		Self { name: name.into(), version, platform }
	}
}

/// Formats as `name-version-platform`, which is also the key used for caching specifications.
impl std::fmt::Display for NameTuple {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}-{}-{}", self.name, self.version, self.platform)
	}
}

/// The full metadata of a package.
///
/// Equality only considers the name, version and platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Specification {
	pub name: String,
	pub version: PackageVersion,
	#[serde(default)]
	pub platform: Platform,
	#[serde(default)]
	pub summary: Option<String>,
	#[serde(default)]
	pub authors: Vec<String>,
	#[serde(default)]
	pub licenses: Vec<String>,
	/// Runtime dependencies.
	#[serde(default)]
	pub dependencies: Vec<Dependency>,
}

impl Specification {
	/// A portable specification with no metadata beyond its identity.
	pub fn new(name: impl Into<String>, version: impl AsRef<str>) -> crate::Result<Self> {
		Ok(Self {
			name: name.into(),
			version: PackageVersion::new(version)?,
			platform: Platform::PORTABLE,
			summary: None,
			authors: Vec::new(),
			licenses: Vec::new(),
			dependencies: Vec::new(),
		})
	}

	pub fn with_platform(mut self, platform: impl Into<Platform>) -> Self {
		self.platform = platform.into();
		self
	}

	pub fn with_dependency(mut self, dependency: Dependency) -> Self {
		self.dependencies.push(dependency);
		self
	}

	pub fn name_tuple(&self) -> NameTuple {
		NameTuple::new(self.name.clone(), self.version.clone(), self.platform.clone())
	}

	/// `name-version`, with `-platform` appended for platform specific builds.
	pub fn full_name(&self) -> String {
		match self.platform.specific() {
			None => format!("{}-{}", self.name, self.version),
			Some(p) => format!("{}-{}-{}", self.name, self.version, p),
		}
	}

	pub(crate) fn is_identified_by(&self, tuple: &NameTuple) -> bool {
		self.name == tuple.name && self.version == tuple.version && self.platform == tuple.platform
	}
}

impl std::cmp::PartialEq for Specification {
	fn eq(&self, other: &Self) -> bool {
		self.name == other.name &&
		self.version == other.version &&
		self.platform == other.platform
	}
}

impl std::cmp::Eq for Specification {}

impl std::hash::Hash for Specification {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		self.name.hash(state);
		self.version.hash(state);
		self.platform.hash(state);
	}
}
