//! Route registry entries.

use crate::handler::Handler;
use pinecone_urls::{Params, PathPattern, PatternError};
use std::sync::Arc;

/// Path of the sentinel route used when nothing else matches.
pub const NOT_FOUND: &str = "notfound";

/// Options accepted by [`Router::add`](crate::Router::add).
#[derive(Clone, Default)]
pub struct RouteOptions {
	handlers: Vec<Arc<dyn Handler>>,
	templates: Vec<String>,
	target_id: Option<String>,
	preload: bool,
}

impl RouteOptions {
	/// Creates empty options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a handler. Handlers run in the order they were added.
	pub fn handler(mut self, handler: Arc<dyn Handler>) -> Self {
		self.handlers.push(handler);
		self
	}

	/// Appends several handlers.
	pub fn handlers(mut self, handlers: impl IntoIterator<Item = Arc<dyn Handler>>) -> Self {
		self.handlers.extend(handlers);
		self
	}

	/// Sets the template URLs rendered when the route commits.
	pub fn templates<I, S>(mut self, templates: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.templates = templates.into_iter().map(Into::into).collect();
		self
	}

	/// Overrides the settings' target element for this route.
	pub fn target_id(mut self, target_id: impl Into<String>) -> Self {
		self.target_id = Some(target_id.into());
		self
	}

	/// Preloads this route's templates on registration.
	pub fn preload(mut self, preload: bool) -> Self {
		self.preload = preload;
		self
	}
}

impl std::fmt::Debug for RouteOptions {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouteOptions")
			.field("handlers_count", &self.handlers.len())
			.field("templates", &self.templates)
			.field("target_id", &self.target_id)
			.field("preload", &self.preload)
			.finish()
	}
}

/// A single route definition.
pub struct Route {
	/// The declared path, base path included.
	path: String,
	/// The compiled matcher.
	pattern: PathPattern,
	handlers: Vec<Arc<dyn Handler>>,
	templates: Vec<String>,
	target_id: Option<String>,
	preload: bool,
}

impl std::fmt::Debug for Route {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Route")
			.field("path", &self.path)
			.field("handlers_count", &self.handlers.len())
			.field("templates", &self.templates)
			.field("target_id", &self.target_id)
			.finish()
	}
}

impl Route {
	/// Creates a new route.
	///
	/// # Errors
	///
	/// Returns [`PatternError`] if `path` is not a valid pattern.
	pub fn new(path: &str, options: RouteOptions) -> Result<Self, PatternError> {
		Ok(Self::with_pattern(
			path,
			PathPattern::new(path)?,
			options,
		))
	}

	/// Creates the sentinel `notfound` route.
	pub(crate) fn not_found(options: RouteOptions) -> Self {
		Self::with_pattern(NOT_FOUND, PathPattern::exact(NOT_FOUND), options)
	}

	fn with_pattern(path: &str, pattern: PathPattern, options: RouteOptions) -> Self {
		let RouteOptions {
			handlers,
			templates,
			target_id,
			preload,
		} = options;

		Self {
			path: path.to_string(),
			pattern,
			handlers,
			templates,
			target_id,
			preload,
		}
	}

	/// Returns the declared path.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Returns the pattern.
	pub fn pattern(&self) -> &PathPattern {
		&self.pattern
	}

	/// Returns the route's own handlers, in execution order.
	pub fn handlers(&self) -> &[Arc<dyn Handler>] {
		&self.handlers
	}

	/// Returns the template URLs.
	pub fn templates(&self) -> &[String] {
		&self.templates
	}

	/// Returns the route's own target element, if any.
	pub fn target_id(&self) -> Option<&str> {
		self.target_id.as_deref()
	}

	/// Returns whether this route asked for template preloading.
	pub fn preloads(&self) -> bool {
		self.preload
	}

	/// Returns whether this is the `notfound` sentinel.
	pub fn is_not_found(&self) -> bool {
		self.path == NOT_FOUND
	}

	/// Matches a path against this route.
	pub fn matches(&self, path: &str) -> Option<Params> {
		self.pattern.matches(path)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::handler::handler_fn;
	use rstest::rstest;

	#[rstest]
	fn test_route_new() {
		let route = Route::new("/users/:id", RouteOptions::new()).unwrap();

		assert_eq!(route.path(), "/users/:id");
		assert!(route.handlers().is_empty());
		assert!(!route.is_not_found());
		assert!(route.matches("/users/7").is_some());
	}

	#[rstest]
	fn test_route_options_keep_handler_order() {
		let options = RouteOptions::new()
			.handler(handler_fn(|input| async move { Ok(input.data) }))
			.handlers(vec![
				handler_fn(|input| async move { Ok(input.data) }),
				handler_fn(|input| async move { Ok(input.data) }),
			])
			.templates(["/views/a.html", "/views/b.html"])
			.target_id("app")
			.preload(true);

		let route = Route::new("/a", options).unwrap();

		assert_eq!(route.handlers().len(), 3);
		assert_eq!(route.templates(), &["/views/a.html", "/views/b.html"]);
		assert_eq!(route.target_id(), Some("app"));
		assert!(route.preloads());
	}

	#[rstest]
	fn test_route_invalid_pattern() {
		assert!(Route::new("/users/:", RouteOptions::new()).is_err());
	}

	#[rstest]
	fn test_not_found_route() {
		let route = Route::not_found(RouteOptions::new());
		assert!(route.is_not_found());
		assert_eq!(route.path(), NOT_FOUND);
	}
}
