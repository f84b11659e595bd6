use std::path::Path;
use std::rc::Rc;

use super::*;

/// A package index held in memory, e.g. a snapshot of a remote index saved as a JSON array of specifications.
#[derive(Debug, Default)]
pub struct StaticIndex {
	specs: Vec<Rc<Specification>>,
}

impl StaticIndex {
	pub fn new(specs: impl IntoIterator<Item = Specification>) -> Self {
		Self {
			specs: specs.into_iter().map(Rc::new).collect(),
		}
	}

	/// # Errors
	/// IO errors and JSON errors when the file isn't an array of specifications.
	pub fn load_from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
		let path = path.as_ref();
		let data = std::fs::read(path)?;
		let specs: Vec<Specification> = serde_json::from_slice(&data)?;
		log::debug!("Loaded {} specifications from index {}", specs.len(), path.display());
		Ok(Self::new(specs))
	}

	pub fn len(&self) -> usize {
		self.specs.len()
	}

	pub fn is_empty(&self) -> bool {
		self.specs.is_empty()
	}
}

impl Source for StaticIndex {
	fn fetch_spec(&self, tuple: &NameTuple) -> crate::Result<Rc<Specification>> {
		self.specs.iter()
			.find(|spec| spec.is_identified_by(tuple))
			.cloned()
			.ok_or_else(|| crate::Error::NotFound(tuple.to_string()))
	}
}

impl RemoteIndexSource for StaticIndex {
	fn find_all(self: Rc<Self>, request: &DependencyRequest) -> crate::Result<Vec<Candidate>> {
		let source: Rc<dyn Source> = self.clone();
		Ok(self.specs.iter()
			.filter(|spec| request.matches_spec(spec))
			.map(|spec| Candidate::index(spec.name_tuple(), source.clone()))
			.collect())
	}
}
