//! Places candidates come from.
//!
//! An [`crate::InstallerSet`] doesn't own any of these, it queries them in a fixed order:
//! 1. [`InstalledSource`] for packages already on the system.
//! 1. [`LocalFileSource`] for package files sitting in a local directory.
//! 1. [`RemoteIndexSource`] for everything a package index knows about.

use std::rc::Rc;

use crate::candidate::Candidate;
use crate::package::*;

mod installed;
pub use installed::InstalledSpecifications;

mod local;
pub use local::LocalDirectory;
pub use local::PackageFile;
pub use local::PACKAGE_FILE_EXTENSION;

mod index;
pub use index::StaticIndex;

/// Anything able to turn a [`NameTuple`] into the full specification it names.
pub trait Source: std::fmt::Debug {
	fn fetch_spec(&self, tuple: &NameTuple) -> crate::Result<Rc<Specification>>;
}

/// Packages already installed on the system.
pub trait InstalledSource: std::fmt::Debug {
	/// All installed specifications satisfying `dependency`.
	fn matching(&self, dependency: &Dependency) -> crate::Result<Vec<Rc<Specification>>>;
}

/// Package files found on the local filesystem.
pub trait LocalFileSource: Source {
	/// The best package file named `name` whose version satisfies `requirement`.
	fn find(&self, name: &str, requirement: &Requirement) -> crate::Result<Option<NameTuple>>;
}

/// A package index, usually remote.
///
/// Takes `self` by `Rc` so returned candidates can point back at the index they came from.
pub trait RemoteIndexSource: Source {
	fn find_all(self: Rc<Self>, request: &DependencyRequest) -> crate::Result<Vec<Candidate>>;
}

/// The order installed and local packages are listed in, newest last with platform builds after portable ones.
pub(crate) fn sort_key(version: &PackageVersion, platform: &Platform) -> (PackageVersion, i8) {
	(version.clone(), if platform.is_portable() { -1 } else { 1 })
}
