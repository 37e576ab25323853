//! # effort-router
//!
//! Client-side route resolution and navigation for the Proof of Effort
//! single-page frontend.
//!
//! Two pieces, composed linearly:
//!
//! - [`RouteTable`]: ordered, immutable path to [`ViewId`] bindings with
//!   exact-match lookup, built once at startup (in code or from
//!   [`RouterConfig`]).
//! - [`Navigator`]: owns the table and the current [`Location`], applies
//!   navigation intents, drives [`History`] and publishes every new location
//!   to subscribers (the rendering surface).
//!
//! An unmatched path is not an error. It resolves to
//! [`LocationState::NotFound`] and the rendering surface decides what to show.
//!
//! ```
//! use effort_router::{MemoryHistory, Navigator, RouteTable, ViewId};
//!
//! let table = RouteTable::new([("/", "Home"), ("/profile", "Profile")]).unwrap();
//! let navigator = Navigator::new(table, MemoryHistory::new("/"), "/");
//!
//! let _subscription = navigator.on_location_change(|location| {
//! 	println!("mount {:?}", location.view());
//! });
//!
//! navigator.push("/profile");
//! assert_eq!(navigator.location().view(), Some(&ViewId::new("Profile")));
//!
//! navigator.push("/missing");
//! assert!(navigator.location().is_not_found());
//! ```

pub mod config;
pub mod error;
pub mod history;
pub mod location;
pub mod navigator;
pub mod route;

pub use config::{RouteBinding, RouterConfig};
pub use error::{ConfigResult, ConfigurationError};
pub use history::{History, HistoryOp, MemoryHistory};
pub use location::{Location, LocationState, ViewId};
pub use navigator::{NavigateOptions, NavigationType, Navigator, Subscription, WeakNavigator};
pub use route::{Resolution, Route, RouteTable, join_path, normalize_path};

#[cfg(target_arch = "wasm32")]
pub use history::web::{BrowserHistory, PopStateListener, listen_popstate};
