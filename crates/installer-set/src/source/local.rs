//! Package files on the local filesystem.
//!
//! A package file is a gzip compressed tar archive holding the package's specification
//! as a `metadata.json` entry next to its content.

use std::cell::RefCell;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::*;

pub const PACKAGE_FILE_EXTENSION: &str = "pkg";
const METADATA_ENTRY: &str = "metadata.json";

/// Reads the specification out of a package file.
fn read_specification(path: &Path) -> crate::Result<Specification> {
	use crate::Error::InvalidPackageFile;

	let file = std::fs::File::open(path)?;
	let mut archive = tar::Archive::new(flate2::read::GzDecoder::new(std::io::BufReader::new(file)));

	for entry in archive.entries()? {
		let mut entry = entry?;
		if entry.path()? != Path::new(METADATA_ENTRY) {
			continue;
		}
		let mut data = Vec::<u8>::new();
		entry.read_to_end(&mut data)?;
		return serde_json::from_slice(&data)
			.map_err(|e| InvalidPackageFile(format!("{}: bad {}: {}", path.display(), METADATA_ENTRY, e)))
	}

	Err(InvalidPackageFile(format!("{}: missing {}", path.display(), METADATA_ENTRY)))
}

/// A single package file, usually one named explicitly by the user.
#[derive(Debug)]
pub struct PackageFile {
	path: PathBuf,
	spec: Rc<Specification>,
}

impl PackageFile {
	/// # Errors
	/// IO errors and [`InvalidPackageFile`](crate::Error::InvalidPackageFile) when the metadata is missing or malformed.
	pub fn open(path: impl AsRef<Path>) -> crate::Result<Self> {
		let path = path.as_ref();
		let spec = read_specification(path)?;
		log::trace!("Read package file {} for {}", path.display(), spec.full_name());
		Ok(Self {
			path: path.to_path_buf(),
			spec: Rc::new(spec),
		})
	}

	pub fn spec(&self) -> &Rc<Specification> {
		&self.spec
	}
}

impl Source for PackageFile {
	fn fetch_spec(&self, tuple: &NameTuple) -> crate::Result<Rc<Specification>> {
		if self.spec.is_identified_by(tuple) {
			Ok(self.spec.clone())
		} else {
			Err(crate::Error::NotFound(format!("{} in {}", tuple, self.path.display())))
		}
	}
}

/// Every package file directly inside a directory.
///
/// The directory is scanned on first use and not again, create a new value to see later changes.
#[derive(Debug)]
pub struct LocalDirectory {
	dir: PathBuf,
	files: RefCell<Option<Rc<Vec<PackageFile>>>>,
}

impl LocalDirectory {
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self {
			dir: dir.into(),
			files: RefCell::new(None),
		}
	}

	/// The package files in the directory, sorted by file name.
	pub fn files(&self) -> crate::Result<Rc<Vec<PackageFile>>> {
		if let Some(files) = self.files.borrow().as_ref() {
			return Ok(files.clone())
		}

		let mut files = Vec::new();
		if self.dir.is_dir() {
			for entry in walkdir::WalkDir::new(&self.dir).min_depth(1).max_depth(1).sort_by_file_name() {
				let entry = entry.map_err(|e| crate::Error::IO(e.into()))?;
				if entry.file_type().is_file() && entry.path().extension().is_some_and(|ext| ext == PACKAGE_FILE_EXTENSION) {
					files.push(PackageFile::open(entry.path())?);
				}
			}
		}
		log::debug!("Found {} package files in {}", files.len(), self.dir.display());

		let files = Rc::new(files);
		*self.files.borrow_mut() = Some(files.clone());
		Ok(files)
	}
}

impl Source for LocalDirectory {
	fn fetch_spec(&self, tuple: &NameTuple) -> crate::Result<Rc<Specification>> {
		self.files()?
			.iter()
			.find(|file| file.spec.is_identified_by(tuple))
			.map(|file| file.spec.clone())
			.ok_or_else(|| crate::Error::NotFound(format!("{} in {}", tuple, self.dir.display())))
	}
}

impl LocalFileSource for LocalDirectory {
	fn find(&self, name: &str, requirement: &Requirement) -> crate::Result<Option<NameTuple>> {
		let files = self.files()?;
		let newest = files.iter()
			.map(|file| &file.spec)
			.filter(|spec| spec.name == name && requirement.is_version_within(&spec.version))
			.reduce(|best, spec| if spec.version > best.version { spec } else { best });
		Ok(newest.map(|spec| spec.name_tuple()))
	}
}
