//! Navigation engine.
//!
//! [`Navigator`] owns the route table and the current [`Location`]. It turns
//! navigation intents into resolved locations, keeps history consistent and
//! publishes every new location to its subscribers.
//!
//! The engine is single-threaded (`!Send`) and never re-entrant: a
//! navigation requested while subscribers are being notified is queued and
//! applied after the current publish completes, so every subscriber sees
//! every location in order.

use crate::history::History;
use crate::location::Location;
use crate::route::{RouteTable, join_path, normalize_path};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

/// Options for [`Navigator::navigate_to`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigateOptions {
	/// Overwrite the current history entry instead of pushing a new one.
	pub replace: bool,
}

impl NavigateOptions {
	/// Sets whether to replace the current history entry.
	pub fn replace(mut self, replace: bool) -> Self {
		self.replace = replace;
		self
	}
}

/// How a navigation reaches the browser history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationType {
	/// Push a new history entry.
	Push,
	/// Replace the current history entry.
	Replace,
	/// The browser already moved (back/forward); history is left alone.
	Pop,
}

impl From<NavigateOptions> for NavigationType {
	fn from(options: NavigateOptions) -> Self {
		if options.replace {
			Self::Replace
		} else {
			Self::Push
		}
	}
}

type Callback = Rc<dyn Fn(&Location)>;

struct Subscriber {
	id: u64,
	active: Rc<Cell<bool>>,
	callback: Callback,
}

#[derive(Debug)]
struct Intent {
	path: String,
	nav_type: NavigationType,
}

struct Shared<H> {
	table: RouteTable,
	history: H,
	location: RefCell<Location>,
	subscribers: RefCell<Vec<Subscriber>>,
	next_subscriber_id: Cell<u64>,
	pending: RefCell<VecDeque<Intent>>,
	publishing: Cell<bool>,
}

/// Ends a publish cycle. If a subscriber panicked, navigations it queued
/// are discarded so they cannot replay on the next, unrelated navigation.
struct PublishGuard<'a> {
	publishing: &'a Cell<bool>,
	pending: &'a RefCell<VecDeque<Intent>>,
}

impl Drop for PublishGuard<'_> {
	fn drop(&mut self) {
		if std::thread::panicking() {
			if let Ok(mut pending) = self.pending.try_borrow_mut() {
				if !pending.is_empty() {
					tracing::warn!(
						dropped = pending.len(),
						"subscriber panicked, discarding queued navigations"
					);
				}
				pending.clear();
			}
		}
		self.publishing.set(false);
	}
}

trait SubscriberRegistry {
	fn remove_subscriber(&self, id: u64);
}

impl<H> SubscriberRegistry for Shared<H> {
	fn remove_subscriber(&self, id: u64) {
		self.subscribers.borrow_mut().retain(|s| s.id != id);
		tracing::debug!(subscriber = id, "location subscriber removed");
	}
}

impl<H: History> Shared<H> {
	fn next_intent(&self) -> Option<Intent> {
		self.pending.borrow_mut().pop_front()
	}

	/// Runs `f` as part of a publish cycle, then drains queued navigations.
	///
	/// If a publish is already running, `f` runs inline and the outer cycle
	/// drains the queue.
	fn run_exclusive(&self, f: impl FnOnce()) {
		if self.publishing.get() {
			f();
			return;
		}

		self.publishing.set(true);
		let _guard = PublishGuard {
			publishing: &self.publishing,
			pending: &self.pending,
		};
		f();
		while let Some(intent) = self.next_intent() {
			self.apply(intent);
		}
	}

	fn enqueue(&self, path: &str, nav_type: NavigationType) {
		self.pending.borrow_mut().push_back(Intent {
			path: path.to_string(),
			nav_type,
		});

		if self.publishing.get() {
			tracing::debug!(path, ?nav_type, "navigation queued behind in-progress publish");
		}
		self.run_exclusive(|| {});
	}

	fn apply(&self, intent: Intent) {
		let target = join_path(self.location.borrow().path(), &intent.path);
		let location = resolve_location(&self.table, &target);
		*self.location.borrow_mut() = location.clone();

		match intent.nav_type {
			NavigationType::Push => self.history.push(&target),
			NavigationType::Replace => self.history.replace(&target),
			NavigationType::Pop => {}
		}

		match location.view() {
			Some(view) => tracing::debug!(
				path = %target,
				nav_type = ?intent.nav_type,
				%view,
				"navigated"
			),
			None => tracing::debug!(
				path = %target,
				nav_type = ?intent.nav_type,
				"no route matched, publishing not-found"
			),
		}

		self.publish(&location);
	}

	fn publish(&self, location: &Location) {
		// Snapshot so callbacks can subscribe or unsubscribe freely.
		let targets: Vec<(Rc<Cell<bool>>, Callback)> = self
			.subscribers
			.borrow()
			.iter()
			.map(|s| (Rc::clone(&s.active), Rc::clone(&s.callback)))
			.collect();

		for (active, callback) in targets {
			if active.get() {
				callback(location);
			}
		}
	}
}

fn resolve_location(table: &RouteTable, path: &str) -> Location {
	let state = table.resolve(normalize_path(path)).into_state();
	Location::new(path, state)
}

/// The navigation engine.
///
/// `Navigator` is a cheap handle: clones share one engine, so the same
/// instance can be handed to button handlers, the history listener and the
/// rendering surface without any global state.
///
/// # Example
///
/// ```
/// use effort_router::{History, MemoryHistory, NavigateOptions, Navigator, RouteTable, ViewId};
///
/// let table = RouteTable::new([("/", "Home"), ("/chain", "Chain")]).unwrap();
/// let history = MemoryHistory::new("/");
/// let navigator = Navigator::new(table, history.clone(), "/");
///
/// navigator.navigate_to("/chain", NavigateOptions::default());
/// assert_eq!(navigator.location().view(), Some(&ViewId::new("Chain")));
/// assert_eq!(history.current_path(), "/chain");
/// ```
pub struct Navigator<H: History> {
	shared: Rc<Shared<H>>,
}

impl<H: History> Clone for Navigator<H> {
	fn clone(&self) -> Self {
		Self {
			shared: Rc::clone(&self.shared),
		}
	}
}

impl<H: History> fmt::Debug for Navigator<H> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Navigator")
			.field("location", &*self.shared.location.borrow())
			.field("routes_count", &self.shared.table.len())
			.field("subscribers", &self.shared.subscribers.borrow().len())
			.finish()
	}
}

impl<H: History + 'static> Navigator<H> {
	/// Creates a navigator showing `initial_path`.
	///
	/// History is not touched: the browser already shows `initial_path`.
	pub fn new(table: RouteTable, history: H, initial_path: &str) -> Self {
		let location = resolve_location(&table, &join_path("/", initial_path));
		tracing::debug!(
			path = initial_path,
			routes = table.len(),
			not_found = location.is_not_found(),
			"navigator initialized"
		);

		Self {
			shared: Rc::new(Shared {
				table,
				history,
				location: RefCell::new(location),
				subscribers: RefCell::new(Vec::new()),
				next_subscriber_id: Cell::new(0),
				pending: RefCell::new(VecDeque::new()),
				publishing: Cell::new(false),
			}),
		}
	}

	/// Creates a navigator showing whatever path `history` currently shows.
	pub fn from_history(table: RouteTable, history: H) -> Self {
		let initial_path = history.current_path();
		Self::new(table, history, &initial_path)
	}

	/// Returns a snapshot of the current location.
	pub fn location(&self) -> Location {
		self.shared.location.borrow().clone()
	}

	/// Returns the route table.
	pub fn route_table(&self) -> &RouteTable {
		&self.shared.table
	}

	/// Returns the history the navigator drives.
	pub fn history(&self) -> &H {
		&self.shared.history
	}

	/// Returns the number of live subscribers.
	pub fn subscriber_count(&self) -> usize {
		self.shared.subscribers.borrow().len()
	}

	/// Navigates to `path`.
	///
	/// Resolves the path, updates the location, pushes (or, with
	/// `options.replace`, replaces) a history entry and publishes the new
	/// location. An unmatched path publishes a not-found location and still
	/// changes the URL. Pushes are never deduplicated.
	///
	/// Called from inside a subscriber callback, the navigation is queued
	/// and applied once the current publish completes.
	pub fn navigate_to(&self, path: &str, options: NavigateOptions) {
		self.shared.enqueue(path, options.into());
	}

	/// Shorthand for `navigate_to(path, NavigateOptions::default())`.
	pub fn push(&self, path: &str) {
		self.navigate_to(path, NavigateOptions::default());
	}

	/// Shorthand for `navigate_to(path, NavigateOptions::default().replace(true))`.
	pub fn replace(&self, path: &str) {
		self.navigate_to(path, NavigateOptions::default().replace(true));
	}

	/// Applies a navigation the browser already performed (back/forward).
	///
	/// Resolves and publishes exactly like [`navigate_to`](Self::navigate_to)
	/// but performs no history operation.
	pub fn handle_external_navigation(&self, path: &str) {
		self.shared.enqueue(path, NavigationType::Pop);
	}

	/// Registers a callback invoked with every new location.
	///
	/// The callback runs once immediately with the current location, then
	/// once per navigation, in registration order. Dropping (or calling
	/// [`Subscription::unsubscribe`] on) the returned handle stops all
	/// further invocations, including within a publish already in progress.
	pub fn on_location_change<F>(&self, callback: F) -> Subscription
	where
		F: Fn(&Location) + 'static,
	{
		let shared = &self.shared;
		let id = shared.next_subscriber_id.get();
		shared.next_subscriber_id.set(id + 1);

		let active = Rc::new(Cell::new(true));
		let callback: Callback = Rc::new(callback);
		shared.subscribers.borrow_mut().push(Subscriber {
			id,
			active: Rc::clone(&active),
			callback: Rc::clone(&callback),
		});
		tracing::debug!(subscriber = id, "location subscriber registered");

		let current = self.location();
		shared.run_exclusive(|| {
			if active.get() {
				callback(&current);
			}
		});

		let weak: Weak<Shared<H>> = Rc::downgrade(&self.shared);
		let registry: Weak<dyn SubscriberRegistry> = weak;
		Subscription {
			id,
			active,
			registry,
		}
	}

	/// Returns a weak handle that does not keep the engine alive.
	pub fn downgrade(&self) -> WeakNavigator<H> {
		WeakNavigator {
			shared: Rc::downgrade(&self.shared),
		}
	}
}

/// Weak counterpart of [`Navigator`], for listeners that must not keep the
/// engine alive.
pub struct WeakNavigator<H: History> {
	shared: Weak<Shared<H>>,
}

impl<H: History> Clone for WeakNavigator<H> {
	fn clone(&self) -> Self {
		Self {
			shared: Weak::clone(&self.shared),
		}
	}
}

impl<H: History> WeakNavigator<H> {
	/// Returns the navigator if it is still alive.
	pub fn upgrade(&self) -> Option<Navigator<H>> {
		self.shared.upgrade().map(|shared| Navigator { shared })
	}
}

/// Deregistration handle returned by [`Navigator::on_location_change`].
///
/// Dropping the handle unsubscribes.
#[must_use = "dropping a Subscription immediately unsubscribes its callback"]
pub struct Subscription {
	id: u64,
	active: Rc<Cell<bool>>,
	registry: Weak<dyn SubscriberRegistry>,
}

impl Subscription {
	/// Stops further callbacks.
	pub fn unsubscribe(self) {
		drop(self);
	}

	/// Returns true while the callback can still be invoked: the
	/// subscription has not been dropped and the navigator is alive.
	pub fn is_active(&self) -> bool {
		self.active.get() && self.registry.strong_count() > 0
	}
}

impl fmt::Debug for Subscription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription")
			.field("id", &self.id)
			.field("active", &self.is_active())
			.finish()
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		if !self.active.replace(false) {
			return;
		}
		if let Some(registry) = self.registry.upgrade() {
			registry.remove_subscriber(self.id);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::history::{HistoryOp, MemoryHistory};
	use crate::location::{LocationState, ViewId};
	use rstest::{fixture, rstest};

	#[fixture]
	fn history() -> MemoryHistory {
		MemoryHistory::new("/")
	}

	#[fixture]
	fn navigator(history: MemoryHistory) -> Navigator<MemoryHistory> {
		let table =
			RouteTable::new([("/", "Home"), ("/login", "Login"), ("/profile", "Profile")])
				.unwrap();
		Navigator::new(table, history, "/")
	}

	fn resolved(view: &str) -> LocationState {
		LocationState::Resolved(ViewId::new(view))
	}

	#[rstest]
	fn test_initial_location(navigator: Navigator<MemoryHistory>) {
		assert_eq!(navigator.location().path(), "/");
		assert_eq!(navigator.location().state(), &resolved("Home"));
		assert!(navigator.history().operations().is_empty());
	}

	#[rstest]
	fn test_initial_unmatched_path_is_not_found(history: MemoryHistory) {
		let table = RouteTable::new([("/", "Home")]).unwrap();
		let navigator = Navigator::new(table, history, "/nowhere");

		assert!(navigator.location().is_not_found());
	}

	#[rstest]
	fn test_from_history_reads_current_path() {
		let table = RouteTable::new([("/", "Home"), ("/login", "Login")]).unwrap();
		let navigator = Navigator::from_history(table, MemoryHistory::new("/login"));

		assert_eq!(navigator.location().state(), &resolved("Login"));
	}

	#[rstest]
	fn test_push_records_history(navigator: Navigator<MemoryHistory>) {
		navigator.push("/login");

		assert_eq!(navigator.location().state(), &resolved("Login"));
		assert_eq!(
			navigator.history().operations(),
			vec![HistoryOp::Push("/login".to_string())]
		);
	}

	#[rstest]
	fn test_replace_records_history(navigator: Navigator<MemoryHistory>) {
		navigator.replace("/profile");

		assert_eq!(navigator.location().state(), &resolved("Profile"));
		assert_eq!(
			navigator.history().operations(),
			vec![HistoryOp::Replace("/profile".to_string())]
		);
		assert_eq!(navigator.history().entry_count(), 1);
	}

	#[rstest]
	fn test_query_and_fragment_are_ignored_for_resolution(navigator: Navigator<MemoryHistory>) {
		navigator.push("/profile?tab=tokens#history");

		let location = navigator.location();
		assert_eq!(location.path(), "/profile?tab=tokens#history");
		assert_eq!(location.state(), &resolved("Profile"));
	}

	#[rstest]
	fn test_fragment_only_target_stays_on_current_page(navigator: Navigator<MemoryHistory>) {
		navigator.push("/profile");
		navigator.push("#top");

		let location = navigator.location();
		assert_eq!(location.path(), "/profile#top");
		assert_eq!(location.state(), &resolved("Profile"));
		assert_eq!(
			navigator.history().operations(),
			vec![
				HistoryOp::Push("/profile".to_string()),
				HistoryOp::Push("/profile#top".to_string()),
			]
		);
	}

	#[rstest]
	fn test_query_only_target_replaces_query(navigator: Navigator<MemoryHistory>) {
		navigator.push("/profile?tab=tokens#history");
		navigator.replace("?tab=blocks");

		let location = navigator.location();
		assert_eq!(location.path(), "/profile?tab=blocks");
		assert_eq!(location.state(), &resolved("Profile"));
		assert_eq!(navigator.history().current_path(), "/profile?tab=blocks");
	}

	#[rstest]
	fn test_relative_target_joins_current_directory(navigator: Navigator<MemoryHistory>) {
		navigator.push("/profile");
		navigator.push("login");

		assert_eq!(navigator.location().path(), "/login");
		assert_eq!(navigator.location().state(), &resolved("Login"));
	}

	#[rstest]
	fn test_panicking_subscriber_discards_queued_navigation(
		navigator: Navigator<MemoryHistory>,
	) {
		let weak = navigator.downgrade();
		let _subscription = navigator.on_location_change(move |location| {
			if location.path() == "/login" {
				if let Some(navigator) = weak.upgrade() {
					navigator.push("/submit");
				}
				panic!("render failed");
			}
		});

		let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
			navigator.push("/login");
		}));
		assert!(outcome.is_err());

		navigator.push("/chain");

		assert_eq!(
			navigator.history().operations(),
			vec![
				HistoryOp::Push("/login".to_string()),
				HistoryOp::Push("/chain".to_string()),
			]
		);
		assert_eq!(navigator.location().path(), "/chain");
		assert!(navigator.location().is_not_found());
	}

	#[rstest]
	fn test_external_navigation_skips_history(navigator: Navigator<MemoryHistory>) {
		navigator.handle_external_navigation("/login");

		assert_eq!(navigator.location().state(), &resolved("Login"));
		assert!(navigator.history().operations().is_empty());
	}

	#[rstest]
	fn test_subscriber_gets_immediate_callback(navigator: Navigator<MemoryHistory>) {
		let seen = Rc::new(RefCell::new(Vec::new()));
		let sink = Rc::clone(&seen);

		let _subscription = navigator.on_location_change(move |location| {
			sink.borrow_mut().push(location.path().to_string());
		});

		assert_eq!(*seen.borrow(), vec!["/"]);
	}

	#[rstest]
	fn test_dropped_subscription_stops_callbacks(navigator: Navigator<MemoryHistory>) {
		let calls = Rc::new(Cell::new(0));
		let counter = Rc::clone(&calls);

		let subscription = navigator.on_location_change(move |_| counter.set(counter.get() + 1));
		navigator.push("/login");
		subscription.unsubscribe();
		navigator.push("/profile");

		assert_eq!(calls.get(), 2);
		assert_eq!(navigator.subscriber_count(), 0);
	}

	#[rstest]
	fn test_subscription_outlives_navigator() {
		let table = RouteTable::new([("/", "Home")]).unwrap();
		let navigator = Navigator::new(table, MemoryHistory::default(), "/");
		let subscription = navigator.on_location_change(|_| {});

		assert!(subscription.is_active());
		drop(navigator);

		assert!(!subscription.is_active());
		subscription.unsubscribe();
	}

	#[rstest]
	fn test_weak_navigator_upgrade(navigator: Navigator<MemoryHistory>) {
		let weak = navigator.downgrade();

		assert!(weak.upgrade().is_some());
		drop(navigator);
		assert!(weak.upgrade().is_none());
	}

	#[rstest]
	fn test_navigate_options_into_navigation_type() {
		assert_eq!(
			NavigationType::from(NavigateOptions::default()),
			NavigationType::Push
		);
		assert_eq!(
			NavigationType::from(NavigateOptions::default().replace(true)),
			NavigationType::Replace
		);
	}
}
