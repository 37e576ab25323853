//! Declarative route configuration.
//!
//! Routes can be declared in TOML instead of code:
//!
//! ```toml
//! [[routes]]
//! path = "/"
//! view = "Home"
//!
//! [[routes]]
//! path = "/login"
//! view = "Login"
//! ```
//!
//! Declaration order is preserved, and the same validation applies as for
//! [`RouteTable::new`].

use crate::error::{ConfigResult, ConfigurationError};
use crate::location::ViewId;
use crate::route::RouteTable;
use serde::Deserialize;
use std::path::Path;

/// One `[[routes]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteBinding {
	/// Literal path, beginning with `/`.
	pub path: String,
	/// View mounted for the path.
	pub view: ViewId,
}

/// Route configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RouterConfig {
	/// Bindings in declaration order.
	#[serde(default)]
	pub routes: Vec<RouteBinding>,
}

impl RouterConfig {
	/// Parses a configuration from TOML.
	pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
		Ok(toml::from_str(source)?)
	}

	/// Reads and parses a configuration file.
	pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml_str(&source)
	}

	/// Builds the route table.
	///
	/// # Errors
	///
	/// Fails with [`ConfigurationError::DuplicatePath`] or
	/// [`ConfigurationError::InvalidPath`] like [`RouteTable::new`].
	pub fn into_route_table(self) -> ConfigResult<RouteTable> {
		let table = RouteTable::new(self.routes.into_iter().map(|b| (b.path, b.view)))?;
		tracing::info!(routes = table.len(), "route table built from configuration");
		Ok(table)
	}
}

impl From<&RouteTable> for RouterConfig {
	fn from(table: &RouteTable) -> Self {
		Self {
			routes: table
				.iter()
				.map(|route| RouteBinding {
					path: route.path().to_string(),
					view: route.view().clone(),
				})
				.collect(),
		}
	}
}
