pub mod error;
pub use error::Result;
pub use error::Error;

pub mod package;
pub use package::Specification;
pub use package::Dependency;
pub use package::DependencyRequest;

pub mod config;
pub use config::InstallerOptions;

pub mod source;
pub mod candidate;
pub use candidate::Candidate;

pub mod installer_set;
pub use installer_set::InstallerSet;
pub use installer_set::Domain;
