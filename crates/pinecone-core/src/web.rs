//! Browser History API integration.

use crate::backend::{BackendError, HistoryBackend, HistoryState, Location};
use crate::router::Router;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Event;

/// [`HistoryBackend`] backed by `window.history` and `window.location`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserHistory;

impl BrowserHistory {
	/// Creates the backend.
	pub fn new() -> Self {
		Self
	}

	fn history() -> Result<web_sys::History, BackendError> {
		web_sys::window()
			.ok_or_else(|| BackendError::new("no window"))?
			.history()
			.map_err(js_error)
	}

	fn state_object(state: &HistoryState) -> Result<JsValue, BackendError> {
		let object = js_sys::Object::new();
		js_sys::Reflect::set(
			&object,
			&JsValue::from_str("path"),
			&JsValue::from_str(&state.path),
		)
		.map_err(js_error)?;
		Ok(object.into())
	}
}

impl HistoryBackend for BrowserHistory {
	fn push_state(&self, state: &HistoryState, url: &str) -> Result<(), BackendError> {
		Self::history()?
			.push_state_with_url(&Self::state_object(state)?, "", Some(url))
			.map_err(js_error)
	}

	fn replace_state(&self, state: &HistoryState, url: &str) -> Result<(), BackendError> {
		Self::history()?
			.replace_state_with_url(&Self::state_object(state)?, "", Some(url))
			.map_err(js_error)
	}

	fn location(&self) -> Location {
		let Some(location) = web_sys::window().map(|w| w.location()) else {
			return Location::default();
		};

		let pathname = location.pathname().unwrap_or_else(|_| "/".to_string());
		Location {
			pathname: if pathname.is_empty() {
				"/".to_string()
			} else {
				pathname
			},
			search: location.search().unwrap_or_default(),
			hash: location.hash().unwrap_or_default(),
		}
	}
}

fn js_error(value: JsValue) -> BackendError {
	BackendError::new(
		value
			.as_string()
			.unwrap_or_else(|| format!("{value:?}")),
	)
}

/// Routes browser back/forward through [`Router::handle_popstate`].
///
/// The listener lives as long as the page.
pub fn listen_popstate(router: Router) -> Result<(), BackendError> {
	let window = web_sys::window().ok_or_else(|| BackendError::new("no window"))?;

	let handler = Closure::wrap(Box::new(move |_event: Event| {
		let location = BrowserHistory.location();
		let target = if router.settings().hash {
			location.hash
		} else {
			location.href()
		};

		let router = router.clone();
		wasm_bindgen_futures::spawn_local(async move {
			if let Err(error) = router.handle_popstate(&target).await {
				tracing::error!(path = %target, error = %error, "popstate navigation failed");
			}
		});
	}) as Box<dyn FnMut(Event)>);

	window
		.add_event_listener_with_callback("popstate", handler.as_ref().unchecked_ref())
		.map_err(js_error)?;
	handler.forget();

	Ok(())
}
