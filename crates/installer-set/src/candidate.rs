//! Packages that could satisfy a dependency request.

use std::rc::Rc;

use crate::package::*;
use crate::source::Source;

/// A package that could be installed, found by [`crate::InstallerSet::find_all`].
///
/// Only [`Candidate::Index`] needs fetching before its full specification is known,
/// see [`Candidate::spec`].
#[derive(Debug, Clone)]
pub enum Candidate {
	/// A package already installed on the system.
	Installed(Rc<Specification>),
	/// A package file the user registered with the set.
	Local {
		spec: Rc<Specification>,
		source: Rc<dyn Source>,
	},
	/// A package known by name only to a local directory or an index.
	Index {
		tuple: NameTuple,
		source: Rc<dyn Source>,
	},
}

impl Candidate {
	pub fn index(tuple: NameTuple, source: Rc<dyn Source>) -> Self {
		Candidate::Index { tuple, source }
	}

	pub fn name(&self) -> &str {
		match self {
			Candidate::Installed(spec) | Candidate::Local { spec, .. } => &spec.name,
			Candidate::Index { tuple, .. } => &tuple.name,
		}
	}

	pub fn version(&self) -> &PackageVersion {
		match self {
			Candidate::Installed(spec) | Candidate::Local { spec, .. } => &spec.version,
			Candidate::Index { tuple, .. } => &tuple.version,
		}
	}

	pub fn platform(&self) -> &Platform {
		match self {
			Candidate::Installed(spec) | Candidate::Local { spec, .. } => &spec.platform,
			Candidate::Index { tuple, .. } => &tuple.platform,
		}
	}

	pub fn name_tuple(&self) -> NameTuple {
		NameTuple::new(self.name(), self.version().clone(), self.platform().clone())
	}

	/// Where the package would be installed from, `None` for installed packages.
	pub fn source(&self) -> Option<&Rc<dyn Source>> {
		match self {
			Candidate::Installed(_) => None,
			Candidate::Local { source, .. } | Candidate::Index { source, .. } => Some(source),
		}
	}

	pub fn is_installed(&self) -> bool {
		matches!(self, Candidate::Installed(_))
	}

	pub fn is_local(&self) -> bool {
		matches!(self, Candidate::Local { .. })
	}

	pub fn is_index(&self) -> bool {
		matches!(self, Candidate::Index { .. })
	}

	/// The full specification of this candidate.
	///
	/// Index candidates are fetched from their source through `set`, which caches the result.
	pub fn spec(&self, set: &mut crate::InstallerSet) -> crate::Result<Rc<Specification>> {
		match self {
			Candidate::Installed(spec) | Candidate::Local { spec, .. } => Ok(spec.clone()),
			Candidate::Index { tuple, source } => set.load_spec(&tuple.name, &tuple.version, &tuple.platform, source.as_ref()),
		}
	}
}

impl std::fmt::Display for Candidate {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let kind = match self {
			Candidate::Installed(_) => "installed",
			Candidate::Local { .. } => "local",
			Candidate::Index { .. } => "index",
		};
		write!(f, "{} ({})", self.name_tuple(), kind)
	}
}
