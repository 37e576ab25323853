//! Client-side routing
//!
//! This module provides access to effort-router, the route table and
//! navigation engine behind the single-page frontend.
//!
//! ## Architecture
//!
//! - **Route Table**: immutable, exact-match path to view bindings
//! - **Navigator**: owns the current location, drives browser history and
//!   publishes location changes to the rendering surface
//! - **History**: `MemoryHistory` off the browser, `BrowserHistory` on `wasm32`
//!
//! ## Example
//!
//! ```rust
//! use effort::router::{MemoryHistory, Navigator, RouteTable};
//!
//! let table = RouteTable::new([("/", "Home"), ("/chain", "Chain")]).unwrap();
//! let navigator = Navigator::new(table, MemoryHistory::new("/"), "/");
//!
//! let _outlet = navigator.on_location_change(|location| match location.view() {
//! 	Some(view) => println!("mount {}", view),
//! 	None => println!("mount not-found page for {}", location.path()),
//! });
//!
//! navigator.push("/chain");
//! ```

pub use effort_router::*;
