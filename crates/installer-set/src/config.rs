use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};

use crate::Domain;

/// Where an [`crate::InstallerSet`] built with [`crate::InstallerSet::from_options`] looks for packages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallerOptions {
	domain: Domain,
	specifications_dir: PathBuf,
	local_package_dir: PathBuf,
	index_file: Option<PathBuf>,
	ignore_dependencies: bool,
	ignore_installed: bool,
}

/// `$XDG_DATA_HOME`, falling back to `$HOME/.local/share` then the current directory.
fn data_home() -> PathBuf {
	#[cfg(target_os = "windows")]
	let path = std::env::var_os("APPDATA").map(PathBuf::from);

	#[cfg(not(target_os = "windows"))]
	let path = std::env::var_os("XDG_DATA_HOME")
		.map(PathBuf::from)
		.or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".local/share")));

	path.unwrap_or_else(|| PathBuf::from("."))
}

impl Default for InstallerOptions {
	fn default() -> Self {
		Self {
			domain: Domain::Both,
			specifications_dir: data_home().join("installer-set").join("specifications"),
			local_package_dir: PathBuf::from("."),
			index_file: None,
			ignore_dependencies: false,
			ignore_installed: false,
		}
	}
}

impl InstallerOptions {
	/// Reads options from a JSON file, missing fields keep their defaults.
	pub fn load_from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
		let data = std::fs::read(path.as_ref())?;
		Ok(serde_json::from_slice(&data)?)
	}

	pub fn domain(&self) -> Domain {
		self.domain
	}
	pub fn set_domain(&mut self, domain: Domain) {
		self.domain = domain;
	}

	/// Directory holding the specifications of installed packages.
	pub fn specifications_dir(&self) -> &Path {
		&self.specifications_dir
	}
	/// returns if the directory is valid or not.
	pub fn set_specifications_dir(&mut self, specifications_dir: PathBuf) -> bool {
		if specifications_dir.is_dir() {
			self.specifications_dir = specifications_dir;
			true
		} else {
			false
		}
	}

	/// Directory searched for package files.
	pub fn local_package_dir(&self) -> &Path {
		&self.local_package_dir
	}
	/// returns if the directory is valid or not.
	pub fn set_local_package_dir(&mut self, local_package_dir: PathBuf) -> bool {
		if local_package_dir.is_dir() {
			self.local_package_dir = local_package_dir;
			true
		} else {
			false
		}
	}

	/// JSON index used as the package index, an empty index when `None`.
	pub fn index_file(&self) -> Option<&Path> {
		self.index_file.as_deref()
	}
	/// returns if the file is valid or not.
	pub fn set_index_file(&mut self, index_file: Option<PathBuf>) -> bool {
		match index_file {
			Some(path) if !path.is_file() => false,
			index_file => {
				self.index_file = index_file;
				true
			}
		}
	}

	pub fn ignore_dependencies(&self) -> bool {
		self.ignore_dependencies
	}
	pub fn set_ignore_dependencies(&mut self, ignore_dependencies: bool) {
		self.ignore_dependencies = ignore_dependencies;
	}

	pub fn ignore_installed(&self) -> bool {
		self.ignore_installed
	}
	pub fn set_ignore_installed(&mut self, ignore_installed: bool) {
		self.ignore_installed = ignore_installed;
	}
}
