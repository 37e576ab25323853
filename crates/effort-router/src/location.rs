//! Location state.
//!
//! A [`Location`] is what the navigator publishes to the rendering surface:
//! the active path plus the view that path resolved to, or
//! [`LocationState::NotFound`].

use serde::Deserialize;
use std::fmt;

/// Opaque token naming the page that should be mounted.
///
/// The router never interprets a view identifier; it only carries it from
/// the route table to subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct ViewId(String);

impl ViewId {
	/// Creates a new view identifier.
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	/// Returns the identifier as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for ViewId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for ViewId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl From<&str> for ViewId {
	fn from(id: &str) -> Self {
		Self::new(id)
	}
}

impl From<String> for ViewId {
	fn from(id: String) -> Self {
		Self(id)
	}
}

/// Resolution state of a [`Location`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LocationState {
	/// The path matched a route bound to this view.
	Resolved(ViewId),
	/// No route matched the path.
	NotFound,
}

/// The navigator's current location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
	/// The active path, exactly as it was navigated to.
	path: String,
	/// What the path resolved to.
	state: LocationState,
}

impl Location {
	/// Creates a location.
	pub fn new(path: impl Into<String>, state: LocationState) -> Self {
		Self {
			path: path.into(),
			state,
		}
	}

	/// Returns the active path.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Returns the resolution state.
	pub fn state(&self) -> &LocationState {
		&self.state
	}

	/// Returns the resolved view, if any.
	pub fn view(&self) -> Option<&ViewId> {
		match &self.state {
			LocationState::Resolved(view) => Some(view),
			LocationState::NotFound => None,
		}
	}

	/// Returns true if no route matched the active path.
	pub fn is_not_found(&self) -> bool {
		matches!(self.state, LocationState::NotFound)
	}
}
