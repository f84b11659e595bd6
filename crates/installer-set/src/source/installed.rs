//! Installed packages, tracked as one specification JSON file per package.

use std::path::Path;
use std::rc::Rc;

use super::*;

/// The specifications of installed packages.
#[derive(Debug, Default)]
pub struct InstalledSpecifications {
	specs: Vec<Rc<Specification>>,
}

impl InstalledSpecifications {
	/// Reads every `*.json` specification directly inside `dir`.
	///
	/// A missing directory means nothing is installed.
	/// # Errors
	/// IO errors while reading and JSON errors for malformed specification files.
	pub fn open(dir: impl AsRef<Path>) -> crate::Result<Self> {
		let dir = dir.as_ref();
		let mut specs = Vec::new();

		if dir.is_dir() {
			for entry in walkdir::WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
				let entry = entry.map_err(|e| crate::Error::IO(e.into()))?;
				if !entry.file_type().is_file() || entry.path().extension().map_or(true, |ext| ext != "json") {
					continue;
				}
				let data = std::fs::read(entry.path())?;
				let spec: Specification = serde_json::from_slice(&data)?;
				specs.push(Rc::new(spec));
			}
		} else {
			log::debug!("Installed specifications directory {} does not exist", dir.display());
		}

		log::trace!("Read {} installed specifications from {}", specs.len(), dir.display());
		Ok(Self { specs })
	}

	pub fn from_specs(specs: impl IntoIterator<Item = Specification>) -> Self {
		Self {
			specs: specs.into_iter().map(Rc::new).collect(),
		}
	}

	pub fn specs(&self) -> &[Rc<Specification>] {
		&self.specs
	}
}

impl InstalledSource for InstalledSpecifications {
	fn matching(&self, dependency: &Dependency) -> crate::Result<Vec<Rc<Specification>>> {
		let mut found: Vec<_> = self.specs.iter()
			.filter(|spec| dependency.matches_spec(spec))
			.cloned()
			.collect();
		found.sort_by_cached_key(|spec| sort_key(&spec.version, &spec.platform));
		Ok(found)
	}
}
