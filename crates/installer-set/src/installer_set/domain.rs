use serde::{Serialize, Deserialize};

/// Which kinds of sources a set may take candidates from.
///
/// Installed packages are not part of the domain, see [`crate::InstallerSet::set_ignore_installed`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
	/// Neither local package files nor an index.
	None,
	/// Local package files only.
	Local,
	/// The package index only.
	Remote,
	/// Local package files and the package index.
	#[default] Both,
}

impl Domain {
	pub fn considers_local(self) -> bool {
		matches!(self, Domain::Local | Domain::Both)
	}

	pub fn considers_remote(self) -> bool {
		matches!(self, Domain::Remote | Domain::Both)
	}

	/// The domain after turning index lookups on or off, leaving the local half untouched.
	///
	/// | from | `true` | `false` |
	/// |---|---|---|
	/// | `Local` | `Both` | `Local` |
	/// | `Remote` | `Remote` | `None` |
	/// | `Both` | `Both` | `Local` |
	/// | `None` | `None` | `None` |
	pub fn with_remote(self, remote: bool) -> Domain {
		match (self, remote) {
			(Domain::Local, true) => Domain::Both,
			(Domain::Remote, false) => Domain::None,
			(Domain::Both, false) => Domain::Local,
			(domain, _) => domain,
		}
	}
}

impl std::str::FromStr for Domain {
	type Err = crate::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"none" => Ok(Domain::None),
			"local" => Ok(Domain::Local),
			"remote" => Ok(Domain::Remote),
			"both" => Ok(Domain::Both),
			other => Err(crate::Error::Parse(format!("unknown domain \"{}\", expected none, local, remote or both", other))),
		}
	}
}

impl std::fmt::Display for Domain {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let s = match self {
			Domain::None => "none",
			Domain::Local => "local",
			Domain::Remote => "remote",
			Domain::Both => "both",
		};
		write!(f, "{}", s)
	}
}
