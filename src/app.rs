//! Application routes.
//!
//! The six pages of the Proof of Effort frontend and the bindings that map
//! URL paths to them.

use effort_router::{ConfigResult, History, Navigator, RouteTable, RouterConfig, ViewId};
use std::fmt;
use std::str::FromStr;

/// Route configuration shipped with the application, in TOML form.
pub const ROUTES_TOML: &str = include_str!("../config/routes.toml");

/// Pages of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppView {
	/// Landing page.
	Home,
	/// Account and wallet registration.
	Register,
	/// Token login.
	Login,
	/// Token balance and effort history of the signed-in user.
	Profile,
	/// Effort submission form.
	Submit,
	/// Block explorer.
	Chain,
}

impl AppView {
	/// All views, in route declaration order.
	pub const ALL: [AppView; 6] = [
		Self::Home,
		Self::Register,
		Self::Login,
		Self::Profile,
		Self::Submit,
		Self::Chain,
	];

	/// Returns the view identifier string.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Home => "Home",
			Self::Register => "Register",
			Self::Login => "Login",
			Self::Profile => "Profile",
			Self::Submit => "Submit",
			Self::Chain => "Chain",
		}
	}

	/// Returns the path the view is mounted at.
	pub fn path(self) -> &'static str {
		match self {
			Self::Home => "/",
			Self::Register => "/register",
			Self::Login => "/login",
			Self::Profile => "/profile",
			Self::Submit => "/submit",
			Self::Chain => "/chain",
		}
	}

	/// Maps a published view identifier back to an application view.
	pub fn from_view_id(id: &ViewId) -> Option<Self> {
		id.as_str().parse().ok()
	}
}

impl fmt::Display for AppView {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Error returned when parsing an unknown view name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown view: {0}")]
pub struct UnknownView(pub String);

impl FromStr for AppView {
	type Err = UnknownView;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|view| view.as_str() == s)
			.ok_or_else(|| UnknownView(s.to_string()))
	}
}

impl From<AppView> for ViewId {
	fn from(view: AppView) -> Self {
		ViewId::new(view.as_str())
	}
}

/// Builds the application's route table.
pub fn route_table() -> ConfigResult<RouteTable> {
	RouteTable::new(AppView::ALL.map(|view| (view.path(), view)))
}

/// Builds the application's route table from [`ROUTES_TOML`].
pub fn route_table_from_config() -> ConfigResult<RouteTable> {
	RouterConfig::from_toml_str(ROUTES_TOML)?.into_route_table()
}

/// Creates the application navigator, starting at whatever path `history`
/// currently shows.
pub fn navigator<H: History + 'static>(history: H) -> ConfigResult<Navigator<H>> {
	Ok(Navigator::from_history(route_table()?, history))
}
