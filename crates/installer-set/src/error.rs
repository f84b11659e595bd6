//! Library error type.

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

use crate::package::Dependency;

#[derive(Debug, Error)]
pub enum Error {
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error("JSON error: {0}")]
	SerdeJSON(#[from] serde_json::Error),
	#[error("parsing error: {0}")]
	Parse(String),
	#[error("specification not found: {0}")]
	NotFound(String),
	#[error("invalid package file: {0}")]
	InvalidPackageFile(String),
	/// No source could offer a candidate for a dependency that had to be installed.
	#[error("could not find a version satisfying {0}")]
	UnsatisfiableDependency(Dependency),
	/// Failure reported by a collaborator outside this crate, e.g. a network backed index.
	#[error("source error: {0}")]
	Source(Box<dyn std::error::Error + Send + Sync>),
}
