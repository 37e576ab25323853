//! Browser history abstraction.
//!
//! The navigator drives history through the [`History`] trait. In the
//! browser this is [`web::BrowserHistory`]; everywhere else (native hosts,
//! tests) it is [`MemoryHistory`], which simulates a browser session.

#[cfg(target_arch = "wasm32")]
pub mod web;

use std::cell::RefCell;
use std::rc::Rc;

/// History operations the navigator performs.
///
/// Methods are infallible: an environment that rejects an update logs the
/// failure and the navigation completes anyway.
pub trait History {
	/// Returns the path the environment currently shows.
	fn current_path(&self) -> String;

	/// Pushes a new history entry.
	fn push(&self, path: &str);

	/// Overwrites the current history entry.
	fn replace(&self, path: &str);
}

impl<H: History + ?Sized> History for Rc<H> {
	fn current_path(&self) -> String {
		(**self).current_path()
	}

	fn push(&self, path: &str) {
		(**self).push(path)
	}

	fn replace(&self, path: &str) {
		(**self).replace(path)
	}
}

/// A recorded history call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryOp {
	/// `push(path)`.
	Push(String),
	/// `replace(path)`.
	Replace(String),
}

#[derive(Debug)]
struct MemoryHistoryState {
	entries: Vec<String>,
	cursor: usize,
	operations: Vec<HistoryOp>,
}

/// In-memory history that behaves like a browser session.
///
/// `MemoryHistory` is a handle: clones share the same session, so a test can
/// keep one clone for inspection after handing another to the navigator.
///
/// [`back`](Self::back), [`forward`](Self::forward) and [`go`](Self::go)
/// move the cursor the way the browser's buttons do and return the path now
/// shown. Feed that path to
/// [`Navigator::handle_external_navigation`](crate::Navigator::handle_external_navigation)
/// just as a `popstate` listener would.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
	state: Rc<RefCell<MemoryHistoryState>>,
}

impl Default for MemoryHistory {
	fn default() -> Self {
		Self::new("/")
	}
}

impl MemoryHistory {
	/// Creates a session with a single entry.
	pub fn new(initial_path: impl Into<String>) -> Self {
		Self {
			state: Rc::new(RefCell::new(MemoryHistoryState {
				entries: vec![initial_path.into()],
				cursor: 0,
				operations: Vec::new(),
			})),
		}
	}

	/// Returns the number of entries in the session.
	pub fn entry_count(&self) -> usize {
		self.state.borrow().entries.len()
	}

	/// Returns the index of the current entry.
	pub fn index(&self) -> usize {
		self.state.borrow().cursor
	}

	/// Returns all entries, oldest first.
	pub fn entries(&self) -> Vec<String> {
		self.state.borrow().entries.clone()
	}

	/// Returns the push/replace calls recorded so far.
	pub fn operations(&self) -> Vec<HistoryOp> {
		self.state.borrow().operations.clone()
	}

	/// Forgets recorded operations. Entries are kept.
	pub fn clear_operations(&self) {
		self.state.borrow_mut().operations.clear();
	}

	/// Moves one entry back. Returns `None` at the start of the session.
	pub fn back(&self) -> Option<String> {
		self.go(-1)
	}

	/// Moves one entry forward. Returns `None` at the end of the session.
	pub fn forward(&self) -> Option<String> {
		self.go(1)
	}

	/// Moves `delta` entries and returns the path now shown.
	///
	/// Returns `None` and leaves the cursor alone when `delta` is zero or
	/// the target is outside the session.
	pub fn go(&self, delta: isize) -> Option<String> {
		if delta == 0 {
			return None;
		}

		let mut state = self.state.borrow_mut();
		let target = state
			.cursor
			.checked_add_signed(delta)
			.filter(|&target| target < state.entries.len())?;
		state.cursor = target;
		Some(state.entries[target].clone())
	}
}

impl History for MemoryHistory {
	fn current_path(&self) -> String {
		let state = self.state.borrow();
		state.entries[state.cursor].clone()
	}

	fn push(&self, path: &str) {
		let mut state = self.state.borrow_mut();
		let keep = state.cursor + 1;
		state.entries.truncate(keep);
		state.entries.push(path.to_string());
		state.cursor = keep;
		state.operations.push(HistoryOp::Push(path.to_string()));
	}

	fn replace(&self, path: &str) {
		let mut state = self.state.borrow_mut();
		let cursor = state.cursor;
		state.entries[cursor] = path.to_string();
		state.operations.push(HistoryOp::Replace(path.to_string()));
	}
}
