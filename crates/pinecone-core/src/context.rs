//! Navigation context.

use crate::route::Route;
use pinecone_urls::Params;
use std::sync::Arc;

/// The result of resolving a navigation target.
///
/// A context is built for every navigation and becomes the router's current
/// context only when the navigation commits.
#[derive(Debug, Clone)]
pub struct Context {
	/// Resolved path, base path applied and trailing slash removed.
	pub path: String,
	/// The matched route, or the `notfound` sentinel.
	pub route: Arc<Route>,
	/// Captured parameters. Unset optional parameters are `None`.
	pub params: Params,
	/// Query string of the navigation target, without the leading `?`.
	pub query: String,
	/// Fragment of the navigation target, without the leading `#`.
	pub hash: String,
}

impl Context {
	/// Returns the value of a parameter, if it is set.
	pub fn param(&self, name: &str) -> Option<&str> {
		self.params.get(name).and_then(|v| v.as_deref())
	}

	/// Returns whether no route matched this context's path.
	pub fn is_not_found(&self) -> bool {
		self.route.is_not_found()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::route::RouteOptions;
	use rstest::rstest;

	#[rstest]
	fn test_context_param() {
		let route = Arc::new(Route::new("/profile/:one?/:two?", RouteOptions::new()).unwrap());
		let params = route.matches("/profile/me").unwrap();

		let context = Context {
			path: "/profile/me".to_string(),
			route,
			params,
			query: String::new(),
			hash: String::new(),
		};

		assert_eq!(context.param("one"), Some("me"));
		assert_eq!(context.param("two"), None);
		assert_eq!(context.param("missing"), None);
		assert!(!context.is_not_found());
	}
}
