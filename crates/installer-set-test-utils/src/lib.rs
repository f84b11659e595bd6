//! Various helpers for testing
//!
//! Test doubles here count how often they are queried so tests can check which sources a set touched.

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use installer_set::candidate::Candidate;
use installer_set::package::*;
use installer_set::source::*;

/// Builds a specification, panicking on a bad version since it's only used with literals.
pub fn spec(name: &str, version: &str, platform: &str) -> Specification {
	Specification::new(name, version)
		.unwrap_or_else(|e| panic!("bad test version {}: {}", version, e))
		.with_platform(platform)
}

pub fn dependency(s: &str) -> Dependency {
	s.parse().unwrap_or_else(|e| panic!("bad test dependency {}: {}", s, e))
}

pub fn request(s: &str) -> DependencyRequest {
	DependencyRequest::new(dependency(s), None)
}

/// Failure returned by doubles told to fail.
#[derive(Debug, thiserror::Error)]
#[error("simulated source failure: {0}")]
pub struct SimulatedFailure(pub String);

fn failure(what: &str) -> installer_set::Error {
	installer_set::Error::Source(Box::new(SimulatedFailure(what.to_string())))
}

/// An [`InstalledSource`] over a fixed list, returned in the order given.
#[derive(Debug, Default)]
pub struct FakeInstalled {
	specs: Vec<Rc<Specification>>,
	pub calls: Cell<usize>,
}

impl FakeInstalled {
	pub fn new(specs: impl IntoIterator<Item = Specification>) -> Self {
		Self {
			specs: specs.into_iter().map(Rc::new).collect(),
			calls: Cell::new(0),
		}
	}

	/// The shared specification for `full_name`, for identity checks against pinned packages.
	pub fn get(&self, full_name: &str) -> Option<Rc<Specification>> {
		self.specs.iter().find(|s| s.full_name() == full_name).cloned()
	}
}

impl InstalledSource for FakeInstalled {
	fn matching(&self, dependency: &Dependency) -> installer_set::Result<Vec<Rc<Specification>>> {
		self.calls.set(self.calls.get() + 1);
		Ok(self.specs.iter().filter(|s| dependency.matches_spec(s)).cloned().collect())
	}
}

/// A [`RemoteIndexSource`] over a fixed list that counts lookups and fetches.
#[derive(Debug, Default)]
pub struct FakeRemote {
	specs: Vec<Rc<Specification>>,
	fail: bool,
	pub find_calls: Cell<usize>,
	pub fetch_calls: Cell<usize>,
}

impl FakeRemote {
	pub fn new(specs: impl IntoIterator<Item = Specification>) -> Self {
		Self {
			specs: specs.into_iter().map(Rc::new).collect(),
			..Default::default()
		}
	}

	/// A remote whose every call fails with [`SimulatedFailure`].
	pub fn failing() -> Self {
		Self {
			fail: true,
			..Default::default()
		}
	}
}

impl Source for FakeRemote {
	fn fetch_spec(&self, tuple: &NameTuple) -> installer_set::Result<Rc<Specification>> {
		self.fetch_calls.set(self.fetch_calls.get() + 1);
		if self.fail {
			return Err(failure("fetch"))
		}
		self.specs.iter()
			.find(|s| s.name_tuple() == *tuple)
			.cloned()
			.ok_or_else(|| installer_set::Error::NotFound(tuple.to_string()))
	}
}

impl RemoteIndexSource for FakeRemote {
	fn find_all(self: Rc<Self>, request: &DependencyRequest) -> installer_set::Result<Vec<Candidate>> {
		self.find_calls.set(self.find_calls.get() + 1);
		if self.fail {
			return Err(failure("find_all"))
		}
		let source: Rc<dyn Source> = self.clone();
		Ok(self.specs.iter()
			.filter(|s| request.matches_spec(s))
			.map(|s| Candidate::index(s.name_tuple(), source.clone()))
			.collect())
	}
}

/// A [`LocalFileSource`] over a fixed list, answering with the highest matching version.
#[derive(Debug, Default)]
pub struct FakeLocal {
	specs: Vec<Rc<Specification>>,
	pub find_calls: Cell<usize>,
}

impl FakeLocal {
	pub fn new(specs: impl IntoIterator<Item = Specification>) -> Self {
		Self {
			specs: specs.into_iter().map(Rc::new).collect(),
			find_calls: Cell::new(0),
		}
	}
}

impl Source for FakeLocal {
	fn fetch_spec(&self, tuple: &NameTuple) -> installer_set::Result<Rc<Specification>> {
		self.specs.iter()
			.find(|s| s.name_tuple() == *tuple)
			.cloned()
			.ok_or_else(|| installer_set::Error::NotFound(tuple.to_string()))
	}
}

impl LocalFileSource for FakeLocal {
	fn find(&self, name: &str, requirement: &Requirement) -> installer_set::Result<Option<NameTuple>> {
		self.find_calls.set(self.find_calls.get() + 1);
		Ok(self.specs.iter()
			.filter(|s| s.name == name && requirement.is_version_within(&s.version))
			.max_by(|a, b| a.version.cmp(&b.version))
			.map(|s| s.name_tuple()))
	}
}

/// A [`Source`] that only counts fetches and answers with a portable spec for any tuple.
#[derive(Debug, Default)]
pub struct CountingSource {
	pub fetched: RefCell<Vec<NameTuple>>,
}

impl CountingSource {
	pub fn fetch_count(&self) -> usize {
		self.fetched.borrow().len()
	}
}

impl Source for CountingSource {
	fn fetch_spec(&self, tuple: &NameTuple) -> installer_set::Result<Rc<Specification>> {
		self.fetched.borrow_mut().push(tuple.clone());
		let mut spec = Specification::new(tuple.name.clone(), tuple.version.to_string())?;
		spec.platform = tuple.platform.clone();
		Ok(Rc::new(spec))
	}
}

/// Writes `spec` as a package file into `dir`, returning its path.
pub fn write_package_file(dir: impl AsRef<Path>, spec: &Specification) -> std::io::Result<PathBuf> {
	let path = dir.as_ref().join(format!("{}.{}", spec.full_name(), PACKAGE_FILE_EXTENSION));
	let file = std::fs::File::create(&path)?;
	let mut builder = tar::Builder::new(flate2::write::GzEncoder::new(file, flate2::Compression::default()));

	let data = serde_json::to_vec_pretty(spec)?;
	let mut header = tar::Header::new_gnu();
	header.set_size(data.len() as u64);
	header.set_mode(0o644);
	header.set_cksum();
	builder.append_data(&mut header, "metadata.json", data.as_slice())?;

	builder.into_inner()?.finish()?;
	Ok(path)
}

/// A fresh temporary directory for package files.
pub fn package_dir() -> std::io::Result<tempfile::TempDir> {
	tempfile::Builder::new().prefix("installer-set-packages").tempdir()
}
