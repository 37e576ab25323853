//! End-to-end navigation tests for the application routes
//!
//! These tests drive the six-route table the way the frontend does:
//! 1. Start at `/` and resolve the home page
//! 2. Navigate programmatically and through back/forward
//! 3. Publish not-found for unknown paths while still moving the URL

use effort::app::{self, AppView};
use effort::router::{History, HistoryOp, LocationState, MemoryHistory, NavigateOptions, Navigator};
use rstest::{fixture, rstest};
use std::cell::RefCell;
use std::rc::Rc;

#[fixture]
fn history() -> MemoryHistory {
	MemoryHistory::new("/")
}

#[fixture]
fn navigator(history: MemoryHistory) -> Navigator<MemoryHistory> {
	app::navigator(history).unwrap()
}

fn resolved(view: AppView) -> LocationState {
	LocationState::Resolved(view.into())
}

#[rstest]
fn test_home_chain_missing(navigator: Navigator<MemoryHistory>) {
	assert_eq!(navigator.location().state(), &resolved(AppView::Home));

	navigator.navigate_to("/chain", NavigateOptions::default());
	assert_eq!(navigator.location().state(), &resolved(AppView::Chain));
	assert_eq!(
		navigator.history().operations(),
		vec![HistoryOp::Push("/chain".to_string())]
	);

	navigator.navigate_to("/missing", NavigateOptions::default());
	assert_eq!(navigator.location().state(), &LocationState::NotFound);
	assert_eq!(
		navigator.history().operations(),
		vec![
			HistoryOp::Push("/chain".to_string()),
			HistoryOp::Push("/missing".to_string()),
		]
	);
	assert_eq!(navigator.history().current_path(), "/missing");
}

#[rstest]
#[case(AppView::Home)]
#[case(AppView::Register)]
#[case(AppView::Login)]
#[case(AppView::Profile)]
#[case(AppView::Submit)]
#[case(AppView::Chain)]
fn test_every_page_is_reachable(navigator: Navigator<MemoryHistory>, #[case] view: AppView) {
	navigator.push(view.path());

	let location = navigator.location();
	assert_eq!(location.view().and_then(AppView::from_view_id), Some(view));
	assert_eq!(navigator.route_table().reverse(&view.into()), Some(view.path()));
}

#[rstest]
#[case("/Profile")]
#[case("/profile/")]
#[case("/chain/1")]
fn test_near_misses_are_not_found(navigator: Navigator<MemoryHistory>, #[case] path: &str) {
	navigator.push(path);

	assert!(navigator.location().is_not_found());
}

#[rstest]
#[case("#top", "/profile#top")]
#[case("?tab=tokens", "/profile?tab=tokens")]
fn test_in_page_link_keeps_current_page(
	navigator: Navigator<MemoryHistory>,
	#[case] target: &str,
	#[case] expected: &str,
) {
	navigator.push(AppView::Profile.path());
	navigator.push(target);

	assert_eq!(navigator.location().state(), &resolved(AppView::Profile));
	assert_eq!(navigator.history().current_path(), expected);
}

#[rstest]
fn test_start_on_deep_link() {
	let navigator = app::navigator(MemoryHistory::new("/submit?draft=1")).unwrap();

	assert_eq!(navigator.location().state(), &resolved(AppView::Submit));
	assert_eq!(navigator.location().path(), "/submit?draft=1");
}

#[rstest]
fn test_login_redirect_replaces_entry(history: MemoryHistory) {
	let navigator = app::navigator(history.clone()).unwrap();
	navigator.push("/profile");

	// A page that finds no session sends the user to login without leaving
	// /profile in the back stack.
	navigator.navigate_to("/login", NavigateOptions::default().replace(true));

	assert_eq!(history.entries(), vec!["/", "/login"]);
	assert_eq!(history.back(), Some("/".to_string()));
}

#[rstest]
fn test_rendering_surface_follows_back_button(history: MemoryHistory) {
	let navigator = app::navigator(history.clone()).unwrap();
	let mounted = Rc::new(RefCell::new(Vec::new()));
	let outlet = Rc::clone(&mounted);
	let _subscription = navigator.on_location_change(move |location| {
		outlet
			.borrow_mut()
			.push(location.view().and_then(AppView::from_view_id));
	});

	navigator.push("/login");
	navigator.push("/nowhere");
	let previous = history.back().unwrap();
	navigator.handle_external_navigation(&previous);

	assert_eq!(
		*mounted.borrow(),
		vec![
			Some(AppView::Home),
			Some(AppView::Login),
			None,
			Some(AppView::Login),
		]
	);
	assert_eq!(history.operations().len(), 2);
}
