//! Browser History API integration.
//!
//! Only compiled for `wasm32` targets.

use super::History;
use crate::navigator::Navigator;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;

/// [`History`] backed by `window.history`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserHistory;

impl BrowserHistory {
	/// Creates a browser-backed history.
	pub fn new() -> Self {
		Self
	}

	fn update(&self, path: &str, replace: bool) {
		let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
			tracing::warn!(path, "window.history is unavailable, URL not updated");
			return;
		};

		let result = if replace {
			history.replace_state_with_url(&JsValue::NULL, "", Some(path))
		} else {
			history.push_state_with_url(&JsValue::NULL, "", Some(path))
		};

		if let Err(err) = result {
			tracing::warn!(path, error = ?err, "browser rejected history update");
		}
	}
}

impl History for BrowserHistory {
	fn current_path(&self) -> String {
		current_url_path().unwrap_or_else(|| "/".to_string())
	}

	fn push(&self, path: &str) {
		self.update(path, false);
	}

	fn replace(&self, path: &str) {
		self.update(path, true);
	}
}

/// Returns `pathname + search + hash` of the current window location.
pub fn current_url_path() -> Option<String> {
	let location = web_sys::window()?.location();
	let pathname = location.pathname().ok()?;
	let search = location.search().unwrap_or_default();
	let hash = location.hash().unwrap_or_default();
	Some(format!("{}{}{}", pathname, search, hash))
}

/// A registered `popstate` listener. Dropping it removes the listener.
pub struct PopStateListener {
	window: web_sys::Window,
	closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl std::fmt::Debug for PopStateListener {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PopStateListener").finish_non_exhaustive()
	}
}

impl PopStateListener {
	/// Keeps the listener installed for the lifetime of the page.
	pub fn forget(self) {
		std::mem::forget(self);
	}
}

impl Drop for PopStateListener {
	fn drop(&mut self) {
		let _ = self
			.window
			.remove_event_listener_with_callback("popstate", self.closure.as_ref().unchecked_ref());
	}
}

/// Forwards browser back/forward navigation to
/// [`Navigator::handle_external_navigation`].
///
/// The listener holds only a weak handle, so it never keeps the navigator
/// alive. Returns `None` (and logs) if no window is available or the
/// listener cannot be registered.
pub fn listen_popstate<H: History + 'static>(navigator: &Navigator<H>) -> Option<PopStateListener> {
	let window = web_sys::window()?;
	let navigator = navigator.downgrade();

	let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
		if let (Some(navigator), Some(path)) = (navigator.upgrade(), current_url_path()) {
			navigator.handle_external_navigation(&path);
		}
	});

	if let Err(err) =
		window.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
	{
		tracing::warn!(error = ?err, "failed to register popstate listener");
		return None;
	}

	Some(PopStateListener { window, closure })
}
