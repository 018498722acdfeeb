//! The router orchestrator.
//!
//! [`Router::navigate`] drives a navigation through its states:
//!
//! 1. the previous in-flight navigation is cancelled,
//! 2. the target is normalized (hash prefix, base path, trailing slash),
//! 3. the path is resolved against the registry, first match wins,
//! 4. global and route handlers run as a cancellable [`Pipeline`],
//! 5. history is updated and the new [`Context`] is committed,
//! 6. the route's templates are loaded into their target element.
//!
//! Nothing is written to history or to the current context before step 5, so
//! a navigation that fails or gets superseded leaves no trace.

use crate::backend::{HistoryBackend, HistoryState, MemoryHistory};
use crate::context::Context;
use crate::error::RouterError;
use crate::handler::{HandlerError, HandlerInput, handler_fn};
use crate::history::NavigationHistory;
use crate::pipeline::{Pipeline, PipelineOutcome};
use crate::route::{NOT_FOUND, Route, RouteOptions};
use crate::settings::Settings;
use crate::templates::{NoopTemplates, TemplateLoader};
use futures::future::{self, Either};
use parking_lot::{Mutex, RwLock};
use pinecone_urls::Params;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// What started a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NavigationKind {
	/// Programmatic call or link click.
	Push,
	/// Browser back/forward.
	PopState,
	/// Initial page load.
	FirstLoad,
	/// Move of the history cursor to the given index.
	Jump(usize),
}

/// Result of a navigation that did not fail.
#[derive(Debug, Clone)]
pub enum NavigationOutcome {
	/// The navigation committed this context.
	Committed(Arc<Context>),
	/// A newer navigation, or a handler calling
	/// [`abort`](crate::HandlerInput::abort), stopped this one before commit
	/// or before its templates were rendered.
	Superseded,
	/// Nothing to do, e.g. going back at the start of history.
	Ignored,
}

impl NavigationOutcome {
	/// Returns `true` if the navigation committed.
	pub fn is_committed(&self) -> bool {
		matches!(self, Self::Committed(_))
	}

	/// Returns the committed context.
	pub fn context(&self) -> Option<&Arc<Context>> {
		match self {
			Self::Committed(context) => Some(context),
			_ => None,
		}
	}
}

/// Builder for [`Router`].
pub struct RouterBuilder {
	settings: Settings,
	backend: Option<Arc<dyn HistoryBackend>>,
	templates: Option<Arc<dyn TemplateLoader>>,
}

impl RouterBuilder {
	/// Sets the history backend. Defaults to [`MemoryHistory`].
	pub fn backend(mut self, backend: Arc<dyn HistoryBackend>) -> Self {
		self.backend = Some(backend);
		self
	}

	/// Sets the template loader. Defaults to [`NoopTemplates`].
	pub fn templates(mut self, templates: Arc<dyn TemplateLoader>) -> Self {
		self.templates = Some(templates);
		self
	}

	/// Builds the router.
	pub fn build(self) -> Router {
		let not_found = Route::not_found(RouteOptions::new().handler(handler_fn(log_not_found)));

		Router {
			inner: Arc::new(RouterInner {
				settings: self.settings,
				routes: RwLock::new(Vec::new()),
				not_found: RwLock::new(Arc::new(not_found)),
				context: watch::Sender::new(None),
				loading: watch::Sender::new(false),
				history: Mutex::new(NavigationHistory::new()),
				active: Mutex::new(ActiveNavigation {
					id: 0,
					token: CancellationToken::new(),
				}),
				backend: self
					.backend
					.unwrap_or_else(|| Arc::new(MemoryHistory::new())),
				templates: self.templates.unwrap_or_else(|| Arc::new(NoopTemplates)),
			}),
		}
	}
}

async fn log_not_found(input: HandlerInput) -> Result<Value, HandlerError> {
	tracing::warn!(path = %input.context.path, "route not found");
	Ok(input.data)
}

/// Clears `loading` when its navigation ends, however it ends.
struct LoadingGuard {
	router: Router,
	id: u64,
}

impl Drop for LoadingGuard {
	fn drop(&mut self) {
		self.router.finish_loading(self.id);
	}
}

struct ActiveNavigation {
	id: u64,
	token: CancellationToken,
}

struct RouterInner {
	settings: Settings,
	/// Registration order is resolution order.
	routes: RwLock<Vec<Arc<Route>>>,
	not_found: RwLock<Arc<Route>>,
	context: watch::Sender<Option<Arc<Context>>>,
	loading: watch::Sender<bool>,
	history: Mutex<NavigationHistory>,
	active: Mutex<ActiveNavigation>,
	backend: Arc<dyn HistoryBackend>,
	templates: Arc<dyn TemplateLoader>,
}

/// A normalized navigation target.
struct Target {
	path: String,
	query: String,
	hash: String,
}

/// Client-side router.
///
/// `Router` is a cheap handle; clones share the same registry, history and
/// state.
///
/// # Example
///
/// ```ignore
/// let router = Router::new(Settings::default());
/// router.add("/users/:id", RouteOptions::new().handler(load_user))?;
///
/// let outcome = router.navigate("/users/7").await?;
/// assert_eq!(outcome.context().unwrap().param("id"), Some("7"));
/// ```
#[derive(Clone)]
pub struct Router {
	inner: Arc<RouterInner>,
}

impl std::fmt::Debug for Router {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Router")
			.field("settings", &self.inner.settings)
			.field("routes_count", &self.inner.routes.read().len())
			.field("history", &*self.inner.history.lock())
			.field("loading", &*self.inner.loading.borrow())
			.finish()
	}
}

impl Router {
	/// Creates a router with an in-memory history and no template loading.
	pub fn new(settings: Settings) -> Self {
		Self::builder(settings).build()
	}

	/// Starts building a router.
	pub fn builder(settings: Settings) -> RouterBuilder {
		RouterBuilder {
			settings,
			backend: None,
			templates: None,
		}
	}

	/// Returns the settings.
	pub fn settings(&self) -> &Settings {
		&self.inner.settings
	}

	/// Registers a route.
	///
	/// The base path is prepended unless `path` already starts with it.
	/// Adding [`NOT_FOUND`] replaces the fallback route.
	///
	/// # Errors
	///
	/// Returns [`RouterError::RouteExists`] if the path is already registered
	/// and [`RouterError::Pattern`] if it does not compile. The registry is
	/// left unchanged in both cases.
	pub fn add(&self, path: &str, options: RouteOptions) -> Result<Arc<Route>, RouterError> {
		if path == NOT_FOUND {
			let route = Arc::new(Route::not_found(options));
			*self.inner.not_found.write() = Arc::clone(&route);
			tracing::debug!("notfound route replaced");
			self.preload(&route);
			return Ok(route);
		}

		let path = self.route_path(path);
		let route = {
			let mut routes = self.inner.routes.write();
			if routes.iter().any(|route| route.path() == path) {
				tracing::warn!(path = %path, "route already exists");
				return Err(RouterError::RouteExists(path));
			}
			let route = Arc::new(Route::new(&path, options)?);
			routes.push(Arc::clone(&route));
			route
		};

		tracing::debug!(path = %path, "route added");
		self.preload(&route);
		Ok(route)
	}

	/// Unregisters a route. Returns `false` if it was not registered.
	///
	/// A context that already references the route keeps it.
	pub fn remove(&self, path: &str) -> bool {
		if path == NOT_FOUND {
			return false;
		}

		let path = self.route_path(path);
		let removed = {
			let mut routes = self.inner.routes.write();
			let before = routes.len();
			routes.retain(|route| route.path() != path);
			routes.len() != before
		};

		if removed {
			tracing::debug!(path = %path, "route removed");
		}
		removed
	}

	/// Returns the registered routes in resolution order, `notfound`
	/// excluded.
	pub fn routes(&self) -> Vec<Arc<Route>> {
		self.inner.routes.read().clone()
	}

	/// Looks up a registered route by its declared path.
	pub fn route(&self, path: &str) -> Option<Arc<Route>> {
		if path == NOT_FOUND {
			return Some(self.inner.not_found.read().clone());
		}
		let path = self.route_path(path);
		self.inner
			.routes
			.read()
			.iter()
			.find(|route| route.path() == path)
			.cloned()
	}

	/// Returns the committed context, `None` before the first navigation.
	pub fn context(&self) -> Option<Arc<Context>> {
		self.inner.context.borrow().clone()
	}

	/// Subscribes to context commits.
	pub fn subscribe_context(&self) -> watch::Receiver<Option<Arc<Context>>> {
		self.inner.context.subscribe()
	}

	/// Returns whether a navigation is in progress.
	pub fn is_loading(&self) -> bool {
		*self.inner.loading.borrow()
	}

	/// Subscribes to the loading flag. Only actual changes are signalled.
	pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
		self.inner.loading.subscribe()
	}

	/// Returns a snapshot of the navigation history.
	pub fn history(&self) -> NavigationHistory {
		self.inner.history.lock().clone()
	}

	/// Returns `false` only at the first history entry.
	pub fn can_go_back(&self) -> bool {
		self.inner.history.lock().can_go_back()
	}

	/// Returns `false` only at the last history entry.
	pub fn can_go_forward(&self) -> bool {
		self.inner.history.lock().can_go_forward()
	}

	/// Navigates to `path`.
	///
	/// A query string and fragment are split off into the context. Any
	/// navigation still in flight is cancelled.
	///
	/// # Errors
	///
	/// Returns [`RouterError::Handler`] if a handler failed and
	/// [`RouterError::TargetNotSpecified`] if the route has templates but no
	/// target element; the router keeps its previous state in both cases.
	/// Template failures after commit surface as [`RouterError::Template`].
	pub async fn navigate(&self, path: &str) -> Result<NavigationOutcome, RouterError> {
		self.navigate_with(path, NavigationKind::Push).await
	}

	/// Performs the first navigation from the backend's current location.
	///
	/// The location already owns its history entry, so nothing is pushed to
	/// the backend, except in hash mode at the bare root where `#/` is
	/// written.
	pub async fn start(&self) -> Result<NavigationOutcome, RouterError> {
		let location = self.inner.backend.location();
		let target = if self.inner.settings.hash {
			location.hash
		} else {
			location.href()
		};
		self.navigate_with(&target, NavigationKind::FirstLoad).await
	}

	/// Handles a browser `popstate` for `path`.
	///
	/// The browser already moved to `path`, so the backend is not written.
	/// If `path` is the entry right behind or ahead of the cursor, the cursor
	/// moves there; otherwise the path is pushed onto the history stack.
	pub async fn handle_popstate(&self, path: &str) -> Result<NavigationOutcome, RouterError> {
		self.navigate_with(path, NavigationKind::PopState).await
	}

	/// Goes one entry back. No-op at the start of history.
	pub async fn back(&self) -> Result<NavigationOutcome, RouterError> {
		let index = {
			let history = self.inner.history.lock();
			if !history.can_go_back() {
				return Ok(NavigationOutcome::Ignored);
			}
			history.index() - 1
		};
		self.to(index).await
	}

	/// Goes one entry forward. No-op at the end of history.
	pub async fn forward(&self) -> Result<NavigationOutcome, RouterError> {
		let index = {
			let history = self.inner.history.lock();
			if !history.can_go_forward() {
				return Ok(NavigationOutcome::Ignored);
			}
			history.index() + 1
		};
		self.to(index).await
	}

	/// Navigates to the history entry at `index`.
	///
	/// The target route's handlers run as usual. On commit the cursor moves
	/// and the backend's current entry is replaced; nothing is pushed.
	pub async fn to(&self, index: usize) -> Result<NavigationOutcome, RouterError> {
		let path = self.inner.history.lock().get(index).map(str::to_string);
		match path {
			Some(path) => self.navigate_with(&path, NavigationKind::Jump(index)).await,
			None => {
				tracing::debug!(index, "history index out of bounds");
				Ok(NavigationOutcome::Ignored)
			}
		}
	}

	async fn navigate_with(
		&self,
		target: &str,
		kind: NavigationKind,
	) -> Result<NavigationOutcome, RouterError> {
		let (id, token) = self.begin();

		let kind = if kind == NavigationKind::FirstLoad
			&& self.inner.settings.hash
			&& matches!(target.trim(), "" | "/" | "#" | "#/")
		{
			NavigationKind::Push
		} else {
			kind
		};

		let target = self.normalize(target);
		tracing::debug!(path = %target.path, ?kind, "navigation started");

		let (route, params) = self.resolve(&target.path);
		let context = Arc::new(Context {
			path: target.path,
			route,
			params,
			query: target.query,
			hash: target.hash,
		});

		self.set_loading(true);
		let _loading = LoadingGuard {
			router: self.clone(),
			id,
		};

		let pipeline = Pipeline::new(
			&self.inner.settings.global_handlers,
			context.route.handlers(),
		);
		if !pipeline.is_empty() {
			match pipeline.run(&context, self, &token).await {
				Ok(PipelineOutcome::Completed(_)) => {}
				Ok(PipelineOutcome::Aborted) => return Ok(NavigationOutcome::Superseded),
				Err(error) => {
					tracing::warn!(path = %context.path, error = %error, "handler failed, navigation aborted");
					return Err(error.into());
				}
			}
		}

		let target_id = if context.route.templates().is_empty() {
			None
		} else {
			match context
				.route
				.target_id()
				.or(self.inner.settings.target_id.as_deref())
			{
				Some(target_id) => Some(target_id.to_string()),
				None => {
					tracing::error!(route = %context.route.path(), "no target element for templates");
					return Err(RouterError::TargetNotSpecified(
						context.route.path().to_string(),
					));
				}
			}
		};

		if !self.commit(id, &context, kind)? {
			return Ok(NavigationOutcome::Superseded);
		}

		if let Some(target_id) = target_id {
			let load = self
				.inner
				.templates
				.load(context.route.templates(), &target_id);
			let cancelled = std::pin::pin!(token.cancelled());
			match future::select(cancelled, load).await {
				Either::Left(_) => {
					tracing::debug!(path = %context.path, "template loading superseded");
					return Ok(NavigationOutcome::Superseded);
				}
				Either::Right((Err(error), _)) => {
					tracing::error!(path = %context.path, error = %error, "template loading failed");
					return Err(error.into());
				}
				Either::Right((Ok(()), _)) => {}
			}
		}

		Ok(NavigationOutcome::Committed(context))
	}

	/// Updates history and publishes `context`, unless a newer navigation
	/// started. Returns `false` in that case.
	fn commit(
		&self,
		id: u64,
		context: &Arc<Context>,
		kind: NavigationKind,
	) -> Result<bool, RouterError> {
		let active = self.inner.active.lock();
		if active.id != id {
			tracing::debug!(path = %context.path, "navigation superseded before commit");
			return Ok(false);
		}

		if let Err(error) = self.update_history(context, kind) {
			tracing::error!(path = %context.path, error = %error, "history update failed");
			return Err(error);
		}

		self.inner.context.send_replace(Some(Arc::clone(context)));
		tracing::info!(path = %context.path, route = %context.route.path(), "navigation committed");
		Ok(true)
	}

	/// Cancels the in-flight navigation and opens a new one.
	fn begin(&self) -> (u64, CancellationToken) {
		let mut active = self.inner.active.lock();
		active.token.cancel();
		active.id += 1;
		active.token = CancellationToken::new();
		(active.id, active.token.clone())
	}

	/// Clears `loading` unless a newer navigation owns it.
	fn finish_loading(&self, id: u64) {
		let current = self.inner.active.lock().id == id;
		if current {
			self.set_loading(false);
		}
	}

	fn set_loading(&self, loading: bool) -> bool {
		self.inner.loading.send_if_modified(|current| {
			if *current == loading {
				false
			} else {
				*current = loading;
				true
			}
		})
	}

	fn route_path(&self, path: &str) -> String {
		if path.starts_with('/') {
			self.inner.settings.apply_base_path(path)
		} else {
			self.inner.settings.apply_base_path(&format!("/{path}"))
		}
	}

	fn normalize(&self, target: &str) -> Target {
		let mut rest = target.trim();
		if self.inner.settings.hash {
			rest = rest.strip_prefix('#').unwrap_or(rest);
		}

		let (rest, hash) = rest.split_once('#').unwrap_or((rest, ""));
		let (path, query) = rest.split_once('?').unwrap_or((rest, ""));

		let path = if path.is_empty() { "/" } else { path };
		let mut path = self.route_path(path);
		while path.len() > 1 && path.ends_with('/') {
			path.pop();
		}

		Target {
			path,
			query: query.to_string(),
			hash: hash.to_string(),
		}
	}

	fn resolve(&self, path: &str) -> (Arc<Route>, Params) {
		let matched = self.inner.routes.read().iter().find_map(|route| {
			route
				.matches(path)
				.map(|params| (Arc::clone(route), params))
		});

		match matched {
			Some((route, params)) => {
				tracing::debug!(path = %path, route = %route.path(), "route resolved");
				(route, params)
			}
			None => (self.inner.not_found.read().clone(), Params::new()),
		}
	}

	/// Writes the backend first so a rejected write leaves the stack as is.
	fn update_history(&self, context: &Context, kind: NavigationKind) -> Result<(), RouterError> {
		let state = HistoryState::new(context.path.clone());
		let url = self.url_for(context);
		let mut history = self.inner.history.lock();

		if let NavigationKind::Jump(index) = kind {
			if index < history.len() {
				self.inner.backend.replace_state(&state, &url)?;
				history.set_index(index);
				tracing::debug!(path = %context.path, index, "history cursor moved");
			}
			return Ok(());
		}

		let committed = self
			.inner
			.context
			.borrow()
			.as_ref()
			.map(|current| current.path.clone());
		if committed.as_deref() == Some(context.path.as_str()) {
			return Ok(());
		}

		if kind == NavigationKind::PopState
			&& let Some(index) = history.adjacent_index(&context.path)
		{
			history.set_index(index);
			tracing::debug!(path = %context.path, index, "history cursor moved by popstate");
			return Ok(());
		}

		if kind == NavigationKind::Push {
			self.inner.backend.push_state(&state, &url)?;
		}
		history.push(context.path.clone());
		tracing::debug!(path = %context.path, index = history.index(), "history pushed");
		Ok(())
	}

	fn url_for(&self, context: &Context) -> String {
		let mut url = context.path.clone();
		if !context.query.is_empty() {
			url.push('?');
			url.push_str(&context.query);
		}
		if !context.hash.is_empty() {
			url.push('#');
			url.push_str(&context.hash);
		}
		if self.inner.settings.hash {
			format!("#{url}")
		} else {
			url
		}
	}

	fn preload(&self, route: &Route) {
		if !route.templates().is_empty() && (self.inner.settings.preload || route.preloads()) {
			tracing::debug!(path = %route.path(), "preloading route templates");
			self.inner.templates.preload(route.templates());
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::backend::HistoryWrite;
	use rstest::rstest;

	#[rstest]
	fn test_loading_signal_skips_same_value() {
		// Arrange
		let router = Router::new(Settings::default());
		let mut loading = router.subscribe_loading();
		loading.mark_unchanged();

		// Act
		let changed_to_false = router.set_loading(false);

		// Assert
		assert!(!changed_to_false);
		assert!(!loading.has_changed().unwrap());

		assert!(router.set_loading(true));
		assert!(loading.has_changed().unwrap());
		loading.mark_unchanged();

		assert!(!router.set_loading(true));
		assert!(!loading.has_changed().unwrap());
	}

	#[rstest]
	fn test_superseded_navigation_does_not_clear_loading() {
		let router = Router::new(Settings::default());

		let (first, first_token) = router.begin();
		router.set_loading(true);
		let (second, _) = router.begin();

		assert!(first_token.is_cancelled());
		router.finish_loading(first);
		assert!(router.is_loading());
		router.finish_loading(second);
		assert!(!router.is_loading());
	}

	#[rstest]
	fn test_stale_navigation_does_not_commit() {
		// Arrange
		let backend = Arc::new(MemoryHistory::new());
		let router = Router::builder(Settings::default())
			.backend(backend.clone())
			.build();
		let (stale, _) = router.begin();
		let (current, _) = router.begin();
		let (route, params) = router.resolve("/a");
		let context = Arc::new(Context {
			path: "/a".to_string(),
			route,
			params,
			query: String::new(),
			hash: String::new(),
		});

		// Act
		let stale_committed = router
			.commit(stale, &context, NavigationKind::Push)
			.unwrap();

		// Assert
		assert!(!stale_committed);
		assert!(router.context().is_none());
		assert!(router.history().is_empty());
		assert!(backend.writes().is_empty());

		assert!(
			router
				.commit(current, &context, NavigationKind::Push)
				.unwrap()
		);
		assert_eq!(router.context().unwrap().path, "/a");
	}

	#[rstest]
	#[case(false, "/docs", "/docs", "", "")]
	#[case(false, "docs/", "/docs", "", "")]
	#[case(false, "/docs/?page=2#intro", "/docs", "page=2", "intro")]
	#[case(false, "", "/", "", "")]
	#[case(true, "#/docs?page=2", "/docs", "page=2", "")]
	#[case(true, "#", "/", "", "")]
	fn test_normalize(
		#[case] hash: bool,
		#[case] target: &str,
		#[case] path: &str,
		#[case] query: &str,
		#[case] fragment: &str,
	) {
		let router = Router::new(Settings::new().with_hash(hash));

		let normalized = router.normalize(target);

		assert_eq!(normalized.path, path);
		assert_eq!(normalized.query, query);
		assert_eq!(normalized.hash, fragment);
	}

	#[rstest]
	fn test_normalize_applies_base_path() {
		let router = Router::new(Settings::new().with_base_path("/test"));

		assert_eq!(router.normalize("/hello").path, "/test/hello");
		assert_eq!(router.normalize("/test/hello/").path, "/test/hello");
		assert_eq!(router.normalize("/").path, "/test");
	}

	#[rstest]
	fn test_resolve_first_registered_wins() {
		// Arrange
		let router = Router::new(Settings::default());
		router.add("/users/:id", RouteOptions::new()).unwrap();
		router.add("/users/me", RouteOptions::new()).unwrap();

		// Act
		let (route, params) = router.resolve("/users/me");

		// Assert
		assert_eq!(route.path(), "/users/:id");
		assert_eq!(params.get("id"), Some(&Some("me".to_string())));
	}

	#[rstest]
	fn test_resolve_falls_back_to_not_found() {
		let router = Router::new(Settings::default());

		let (route, params) = router.resolve("/missing");

		assert!(route.is_not_found());
		assert!(params.is_empty());
	}

	#[rstest]
	fn test_add_not_found_replaces_sentinel() {
		let router = Router::new(Settings::default());

		router.add(NOT_FOUND, RouteOptions::new()).unwrap();
		router.add(NOT_FOUND, RouteOptions::new()).unwrap();

		let route = router.route(NOT_FOUND).unwrap();
		assert!(route.handlers().is_empty());
		assert!(router.routes().is_empty());
		assert!(!router.remove(NOT_FOUND));
	}

	#[rstest]
	fn test_remove_route() {
		let router = Router::new(Settings::new().with_base_path("/app"));
		router.add("/a", RouteOptions::new()).unwrap();

		assert!(router.remove("/a"));
		assert!(!router.remove("/a"));
		assert!(router.route("/a").is_none());
	}

	#[rstest]
	#[tokio::test]
	async fn test_url_written_in_hash_mode() {
		// Arrange
		let backend = Arc::new(MemoryHistory::new());
		let router = Router::builder(Settings::new().with_hash(true))
			.backend(backend.clone())
			.build();
		router.add("/docs", RouteOptions::new()).unwrap();

		// Act
		router.navigate("#/docs?page=2").await.unwrap();

		// Assert
		let writes = backend.writes();
		assert_eq!(writes.len(), 1);
		assert_eq!(writes[0].kind, HistoryWrite::Push);
		assert_eq!(writes[0].url, "#/docs?page=2");
		assert_eq!(writes[0].state.path, "/docs");
	}

	#[rstest]
	#[tokio::test]
	async fn test_start_reads_location_without_writing() {
		// Arrange
		let backend = Arc::new(MemoryHistory::with_location("/users/7?tab=posts"));
		let router = Router::builder(Settings::default())
			.backend(backend.clone())
			.build();
		router.add("/users/:id", RouteOptions::new()).unwrap();

		// Act
		let outcome = router.start().await.unwrap();

		// Assert
		let context = outcome.context().unwrap();
		assert_eq!(context.param("id"), Some("7"));
		assert_eq!(context.query, "tab=posts");
		assert!(backend.writes().is_empty());
		assert_eq!(router.history().entries(), &["/users/7"]);
	}

	#[rstest]
	#[tokio::test]
	async fn test_same_path_is_not_pushed_twice() {
		let backend = Arc::new(MemoryHistory::new());
		let router = Router::builder(Settings::default())
			.backend(backend.clone())
			.build();

		router.navigate("/a").await.unwrap();
		router.navigate("/a?x=1").await.unwrap();

		assert_eq!(router.history().entries(), &["/a"]);
		assert_eq!(backend.writes().len(), 1);
		assert_eq!(router.context().unwrap().query, "x=1");
	}
}
