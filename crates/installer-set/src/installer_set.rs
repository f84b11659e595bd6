//! The set of candidates an installer resolves dependencies against.
//!
//! # Usage
//! 1. Create an [`InstallerSet`] for a [`Domain`], or from [`crate::InstallerOptions`] with [`InstallerSet::from_options()`].
//! 1. Optionally register package files with [`InstallerSet::add_local_entry()`] / [`InstallerSet::add_local_file()`]
//! and force packages with [`InstallerSet::add_always_install()`].
//! 1. Call [`InstallerSet::find_all()`] for every dependency the resolver needs candidates for.
//! 1. Get full specifications of chosen candidates with [`crate::Candidate::spec()`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use indexmap::IndexMap;

use crate::candidate::Candidate;
use crate::package::*;
use crate::source::*;

mod domain;
pub use domain::Domain;

/// Creates the local file source queried by each [`InstallerSet::find_all`].
pub type LocalSourceFactory = Box<dyn Fn() -> Rc<dyn LocalFileSource>>;

/// Gathers installable candidates for dependency requests from installed packages,
/// registered package files, a local package directory and a package index.
///
/// The set owns its forced packages, local entries and specification cache but only shares the sources it queries.
/// It is meant to be driven by one resolver from a single thread and thrown away once resolution is done.
pub struct InstallerSet {
	domain: Domain,

	/// Specifications that must be installed regardless of what depends on them.
	always_install: Vec<Rc<Specification>>,
	/// Only consider packages in `always_install`.
	ignore_dependencies: bool,
	/// Don't offer already installed packages.
	ignore_installed: bool,

	local: IndexMap<String, (Rc<Specification>, Rc<dyn Source>)>,

	installed: Rc<dyn InstalledSource>,
	local_source: LocalSourceFactory,
	remote_set: Rc<dyn RemoteIndexSource>,

	/// Full specifications fetched for index candidates, keyed by `name-version-platform`.
	specs: HashMap<String, Rc<Specification>>,
}

impl InstallerSet {
	/// Creates a set looking for packages in `domain`.
	///
	/// Local package files are looked for in the current directory until [`InstallerSet::with_local_source`] says otherwise.
	pub fn new(domain: Domain, installed: Rc<dyn InstalledSource>, remote_set: Rc<dyn RemoteIndexSource>) -> Self {
		Self {
			domain,
			always_install: Default::default(),
			ignore_dependencies: false,
			ignore_installed: false,
			local: Default::default(),
			installed,
			local_source: local_directory_factory(PathBuf::from(".")),
			remote_set,
			specs: Default::default(),
		}
	}

	/// Creates a set using the sources and settings described by `options`.
	/// # Errors
	/// Errors from reading the installed specifications or the index file.
	pub fn from_options(options: &crate::InstallerOptions) -> crate::Result<Self> {
		let installed = InstalledSpecifications::open(options.specifications_dir())?;
		let remote = match options.index_file() {
			Some(path) => StaticIndex::load_from_file(path)?,
			None => StaticIndex::default(),
		};
		if remote.is_empty() && options.domain().considers_remote() {
			log::info!("No remote packages available, the index is empty or not configured");
		}

		let mut set = Self::new(options.domain(), Rc::new(installed), Rc::new(remote))
			.with_local_source(local_directory_factory(options.local_package_dir().to_path_buf()));
		set.set_ignore_dependencies(options.ignore_dependencies());
		set.set_ignore_installed(options.ignore_installed());
		Ok(set)
	}

	/// Replaces how the local file source is created. A new one is made for every [`InstallerSet::find_all`].
	pub fn with_local_source(mut self, factory: LocalSourceFactory) -> Self {
		self.local_source = factory;
		self
	}

	/* Domain */

	pub fn domain(&self) -> Domain {
		self.domain
	}

	pub fn considers_local(&self) -> bool {
		self.domain.considers_local()
	}

	pub fn considers_remote(&self) -> bool {
		self.domain.considers_remote()
	}

	/// Turns index lookups on or off without changing whether local files are considered.
	///
	/// Has no effect on a set whose domain is [`Domain::None`].
	pub fn set_remote(&mut self, remote: bool) {
		if self.domain == Domain::None {
			log::debug!("Ignoring remote={} on a set with no domain", remote);
			return;
		}
		self.domain = self.domain.with_remote(remote);
	}

	/* Overrides */

	pub fn ignore_dependencies(&self) -> bool {
		self.ignore_dependencies
	}

	/// When set only packages in the always install list are offered.
	pub fn set_ignore_dependencies(&mut self, ignore_dependencies: bool) {
		self.ignore_dependencies = ignore_dependencies;
	}

	pub fn ignore_installed(&self) -> bool {
		self.ignore_installed
	}

	/// When set already installed packages are not offered.
	pub fn set_ignore_installed(&mut self, ignore_installed: bool) {
		self.ignore_installed = ignore_installed;
	}

	pub fn always_install(&self) -> &[Rc<Specification>] {
		&self.always_install
	}

	/// Looks up the newest candidate for `dependency` and adds it to the always install list.
	///
	/// Newest means the highest version, and platform specific builds win over portable ones of the same version.
	/// # Errors
	/// [`UnsatisfiableDependency`](crate::Error::UnsatisfiableDependency) when no candidate exists,
	/// otherwise whatever the sources return.
	pub fn add_always_install(&mut self, dependency: Dependency) -> crate::Result<()> {
		let request = DependencyRequest::new(dependency, None);

		let found = self.find_all(&request)?;

		/* First maximum wins so earlier sources break exact ties */
		let newest = found.into_iter()
			.map(|candidate| (sort_key(candidate.version(), candidate.platform()), candidate))
			.reduce(|best, next| if next.0 > best.0 { next } else { best })
			.map(|(_, candidate)| candidate)
			.ok_or_else(|| crate::Error::UnsatisfiableDependency(request.dependency().clone()))?;

		let spec = newest.spec(self)?;
		log::info!("Always installing {} for {}", spec.full_name(), request);
		self.always_install.push(spec);
		Ok(())
	}

	/* Local entries */

	/// Registers `spec`, installable from `source`, as the local package for `dep_name`.
	///
	/// Replaces any package already registered under `dep_name`, keeping its position.
	pub fn add_local_entry(&mut self, dep_name: impl Into<String>, spec: Rc<Specification>, source: Rc<dyn Source>) {
		let dep_name = dep_name.into();
		log::trace!("Adding local package {} as {}", spec.full_name(), dep_name);
		self.local.insert(dep_name, (spec, source));
	}

	/// Registers the package file at `path` as a local entry under its own name.
	/// # Errors
	/// When the package file can't be read.
	pub fn add_local_file(&mut self, path: impl AsRef<Path>) -> crate::Result<Rc<Specification>> {
		let file = Rc::new(PackageFile::open(path)?);
		let spec = file.spec().clone();
		self.add_local_entry(spec.name.clone(), spec.clone(), file);
		Ok(spec)
	}

	pub fn has_local_entry(&self, dep_name: &str) -> bool {
		self.local.contains_key(dep_name)
	}

	/// The specification registered for `dep_name`, if any.
	pub fn local_spec(&self, dep_name: &str) -> Option<&Rc<Specification>> {
		self.local.get(dep_name).map(|(spec, _)| spec)
	}

	/* Queries */

	/// Every candidate satisfying `request`.
	///
	/// Candidates are ordered by where they come from:
	/// installed packages, then local entries in the order they were added,
	/// then the best local package file, then whatever the index returns.
	///
	/// An empty list is not an error, the resolver should try something else.
	/// # Errors
	/// Source errors are returned as is.
	pub fn find_all(&self, request: &DependencyRequest) -> crate::Result<Vec<Candidate>> {
		let mut res = Vec::<Candidate>::new();

		let dep = request.dependency();

		if self.ignore_dependencies && !self.always_install.iter().any(|spec| dep.matches_spec(spec)) {
			log::trace!("Ignoring dependencies, {} is not always installed", dep);
			return Ok(res)
		}

		if !self.ignore_installed {
			for spec in self.installed.matching(dep)? {
				if self.always_install.contains(&spec) {
					continue;
				}
				res.push(Candidate::Installed(spec));
			}
			log::trace!("{} installed candidates for {}", res.len(), dep);
		}

		if self.considers_local() {
			for (spec, source) in self.local.values() {
				if request.matches_spec(spec) {
					res.push(Candidate::Local { spec: spec.clone(), source: source.clone() });
				}
			}

			let local_source = (self.local_source)();
			if let Some(tuple) = local_source.find(&dep.name, &dep.requirement)? {
				log::trace!("Found local package file {} for {}", tuple, dep);
				let source: Rc<dyn Source> = local_source;
				res.push(Candidate::index(tuple, source));
			}
		}

		if self.considers_remote() {
			let remote = self.remote_set.clone().find_all(request)?;
			log::trace!("{} index candidates for {}", remote.len(), dep);
			res.extend(remote);
		}

		Ok(res)
	}

	/// Gets the full specification of `name`-`version`-`platform` from `source`.
	///
	/// Each specification is only fetched once, later calls are served from the cache.
	pub fn load_spec(&mut self, name: &str, version: &PackageVersion, platform: &Platform, source: &dyn Source) -> crate::Result<Rc<Specification>> {
		let tuple = NameTuple::new(name, version.clone(), platform.clone());
		let key = tuple.to_string();

		if let Some(spec) = self.specs.get(&key) {
			return Ok(spec.clone())
		}

		log::debug!("Fetching specification {} from {:?}", key, source);
		let spec = source.fetch_spec(&tuple)?;
		self.specs.insert(key, spec.clone());
		Ok(spec)
	}
}

fn local_directory_factory(dir: PathBuf) -> LocalSourceFactory {
	Box::new(move || -> Rc<dyn LocalFileSource> { Rc::new(LocalDirectory::new(dir.clone())) })
}

impl std::fmt::Debug for InstallerSet {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let mut specs: Vec<_> = self.specs.keys().collect();
		specs.sort();
		f.debug_struct("InstallerSet")
			.field("domain", &self.domain)
			.field("specs", &specs)
			.field("always_install", &self.always_install.iter().map(|s| s.full_name()).collect::<Vec<_>>())
			.finish()
	}
}
