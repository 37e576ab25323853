//! Error types for route configuration.
//!
//! Navigation itself has no error type: an unmatched path is published as
//! [`LocationState::NotFound`](crate::LocationState::NotFound), which is a
//! normal outcome. Only building the route table can fail, and every such
//! failure is fatal at startup.

use std::path::PathBuf;

/// Error type for route table construction and route configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
	/// Two bindings share the same path.
	#[error("Duplicate route path: {path}")]
	DuplicatePath {
		/// The path bound more than once.
		path: String,
	},
	/// A binding path is empty or does not begin with `/`.
	#[error("Invalid route path '{path}': paths must be non-empty and start with '/'")]
	InvalidPath {
		/// The rejected path.
		path: String,
	},
	/// The route configuration is not valid TOML or has the wrong shape.
	#[error("Failed to parse route configuration: {0}")]
	Parse(#[from] toml::de::Error),
	/// The route configuration file could not be read.
	#[error("Failed to read route configuration '{}': {source}", .path.display())]
	Io {
		/// Location of the configuration file.
		path: PathBuf,
		/// Underlying I/O error.
		#[source]
		source: std::io::Error,
	},
}

/// Result alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigurationError>;
