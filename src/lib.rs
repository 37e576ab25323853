//! # Effort
//!
//! Client-side navigation for the Proof of Effort single-page frontend.
//!
//! The crate maps URL paths to pages, keeps browser history in step with the
//! active page and tells the rendering surface which page to mount, all
//! without a full page reload.
//!
//! ## Modules
//!
//! - [`router`]: the route table and navigation engine (re-exported from
//!   `effort-router`)
//! - [`app`]: the application's pages and their path bindings
//!
//! ## Quick Example
//!
//! ```rust
//! use effort::app::{self, AppView};
//! use effort::router::MemoryHistory;
//!
//! let navigator = app::navigator(MemoryHistory::new("/")).unwrap();
//!
//! // The rendering surface mounts whatever page is published.
//! let _outlet = navigator.on_location_change(|location| {
//! 	let page = location.view().and_then(AppView::from_view_id);
//! 	println!("{} -> {:?}", location.path(), page);
//! });
//!
//! // A button handler navigates programmatically.
//! navigator.push(AppView::Chain.path());
//! ```
//!
//! In the browser, drive the navigator with `BrowserHistory` and forward
//! back/forward buttons with `listen_popstate`:
//!
//! ```rust,ignore
//! use effort::router::{BrowserHistory, listen_popstate};
//!
//! let navigator = effort::app::navigator(BrowserHistory::new())?;
//! listen_popstate(&navigator).map(|listener| listener.forget());
//! ```

pub mod app;
pub mod router;

pub use app::AppView;
pub use router::{Location, LocationState, NavigateOptions, Navigator, RouteTable, ViewId};
