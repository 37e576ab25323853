//! Route table.
//!
//! The route table holds the static mapping from URL path to view and
//! answers exact-match lookups. It is built once at startup and never
//! mutated afterwards.
//!
//! Matching is exact: case-sensitive, trailing-slash-sensitive, with no
//! prefix, wildcard or parameter matching. `/profile` and `/profile/` are
//! distinct keys.

use crate::error::{ConfigResult, ConfigurationError};
use crate::location::{LocationState, ViewId};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// A single path to view binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
	/// The literal path pattern.
	path: String,
	/// The view bound to the path.
	view: ViewId,
}

impl Route {
	/// Creates a route.
	pub fn new(path: impl Into<String>, view: impl Into<ViewId>) -> Self {
		Self {
			path: path.into(),
			view: view.into(),
		}
	}

	/// Returns the path pattern.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Returns the bound view.
	pub fn view(&self) -> &ViewId {
		&self.view
	}
}

/// Result of resolving a path against a [`RouteTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
	/// The path is bound to this view.
	Found(&'a ViewId),
	/// No route is bound to the path.
	NotFound,
}

impl<'a> Resolution<'a> {
	/// Returns the resolved view, if any.
	pub fn view(self) -> Option<&'a ViewId> {
		match self {
			Self::Found(view) => Some(view),
			Self::NotFound => None,
		}
	}

	/// Returns true if a route matched.
	pub fn is_found(self) -> bool {
		matches!(self, Self::Found(_))
	}

	/// Converts the resolution into an owned location state.
	pub fn into_state(self) -> LocationState {
		match self {
			Self::Found(view) => LocationState::Resolved(view.clone()),
			Self::NotFound => LocationState::NotFound,
		}
	}
}

/// Immutable, ordered collection of routes.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
	/// Routes in declaration order.
	routes: Vec<Route>,
	/// Path to index into `routes`.
	index: HashMap<String, usize>,
}

impl RouteTable {
	/// Builds a route table from ordered `(path, view)` bindings.
	///
	/// # Errors
	///
	/// - [`ConfigurationError::InvalidPath`] if a path is empty or does not
	///   begin with `/`.
	/// - [`ConfigurationError::DuplicatePath`] if two bindings share a path.
	///
	/// # Example
	///
	/// ```
	/// use effort_router::RouteTable;
	///
	/// let table = RouteTable::new([("/", "Home"), ("/login", "Login")]).unwrap();
	/// assert_eq!(table.len(), 2);
	/// ```
	pub fn new<I, P, V>(bindings: I) -> ConfigResult<Self>
	where
		I: IntoIterator<Item = (P, V)>,
		P: Into<String>,
		V: Into<ViewId>,
	{
		let mut routes = Vec::new();
		let mut index = HashMap::new();

		for (path, view) in bindings {
			let path = path.into();
			validate_path(&path)?;

			match index.entry(path) {
				Entry::Occupied(slot) => {
					return Err(ConfigurationError::DuplicatePath {
						path: slot.key().clone(),
					});
				}
				Entry::Vacant(slot) => {
					routes.push(Route::new(slot.key().clone(), view));
					slot.insert(routes.len() - 1);
				}
			}
		}

		Ok(Self { routes, index })
	}

	/// Resolves a normalized path to its bound view.
	///
	/// Never fails: an unbound path yields [`Resolution::NotFound`].
	pub fn resolve(&self, path: &str) -> Resolution<'_> {
		match self.index.get(path) {
			Some(&i) => Resolution::Found(&self.routes[i].view),
			None => Resolution::NotFound,
		}
	}

	/// Returns the first path bound to `view`, for building links.
	pub fn reverse(&self, view: &ViewId) -> Option<&str> {
		self.routes
			.iter()
			.find(|route| route.view == *view)
			.map(Route::path)
	}

	/// Returns true if `path` is bound.
	pub fn contains(&self, path: &str) -> bool {
		self.index.contains_key(path)
	}

	/// Returns the number of routes.
	pub fn len(&self) -> usize {
		self.routes.len()
	}

	/// Returns true if the table has no routes.
	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}

	/// Iterates over the routes in declaration order.
	pub fn iter(&self) -> std::slice::Iter<'_, Route> {
		self.routes.iter()
	}
}

impl<'a> IntoIterator for &'a RouteTable {
	type Item = &'a Route;
	type IntoIter = std::slice::Iter<'a, Route>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

fn validate_path(path: &str) -> ConfigResult<()> {
	if path.starts_with('/') {
		Ok(())
	} else {
		Err(ConfigurationError::InvalidPath {
			path: path.to_string(),
		})
	}
}

/// Strips the query string and fragment from a URL path.
///
/// Case and trailing slashes are preserved. A target with no pathname
/// normalizes to the empty string, which no route matches; resolve such
/// targets with [`join_path`] first.
///
/// ```
/// use effort_router::normalize_path;
///
/// assert_eq!(normalize_path("/profile?tab=tokens#top"), "/profile");
/// assert_eq!(normalize_path("/profile/"), "/profile/");
/// assert_eq!(normalize_path("?next=/login"), "");
/// ```
pub fn normalize_path(raw: &str) -> &str {
	let end = raw.find(['?', '#']).unwrap_or(raw.len());
	&raw[..end]
}

/// Resolves a navigation target against the current URL path.
///
/// Absolute targets are returned unchanged. A fragment-only target keeps the
/// current pathname and query, a query-only target keeps the pathname, and
/// any other relative target replaces the last path segment, the way a
/// browser resolves an `href`.
///
/// ```
/// use effort_router::join_path;
///
/// assert_eq!(join_path("/profile", "#top"), "/profile#top");
/// assert_eq!(join_path("/profile?tab=1#a", "?tab=2"), "/profile?tab=2");
/// assert_eq!(join_path("/chain/latest", "10"), "/chain/10");
/// assert_eq!(join_path("/profile", "/login"), "/login");
/// ```
pub fn join_path(base: &str, target: &str) -> String {
	if target.starts_with('/') {
		return target.to_string();
	}

	let path_end = base.find(['?', '#']).unwrap_or(base.len());
	let pathname = match &base[..path_end] {
		"" => "/",
		path => path,
	};
	let rest = &base[path_end..];
	let query = match rest.find('#') {
		Some(hash) => &rest[..hash],
		None => rest,
	};

	match target.as_bytes().first() {
		None => format!("{pathname}{query}"),
		Some(b'#') => format!("{pathname}{query}{target}"),
		Some(b'?') => format!("{pathname}{target}"),
		Some(_) => {
			let dir_end = pathname.rfind('/').map_or(0, |slash| slash + 1);
			format!("/{}{target}", pathname[..dir_end].trim_start_matches('/'))
		}
	}
}
