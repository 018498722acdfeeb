//! Error types for routing and navigation.

use crate::backend::BackendError;
use crate::handler::HandlerError;
use crate::templates::TemplateError;
use pinecone_urls::PatternError;

/// Error type for router operations.
///
/// Structural errors ([`RouteExists`](Self::RouteExists),
/// [`TargetNotSpecified`](Self::TargetNotSpecified),
/// [`Pattern`](Self::Pattern)) are fatal to the call that raised them.
/// [`Handler`](Self::Handler) aborts only the navigation it occurred in; the
/// router keeps its last committed state.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
	/// A route with this path is already registered.
	#[error("Route already exists: {0}")]
	RouteExists(String),
	/// The route declares templates but no target element is configured.
	#[error("No target element specified for the templates of route: {0}")]
	TargetNotSpecified(String),
	/// A handler in the navigation pipeline failed.
	#[error("Handler failed: {0}")]
	Handler(#[from] HandlerError),
	/// The route path could not be compiled.
	#[error("Invalid route pattern: {0}")]
	Pattern(#[from] PatternError),
	/// Loading the route's templates failed after commit.
	#[error("Template loading failed: {0}")]
	Template(#[from] TemplateError),
	/// The history backend rejected a write.
	#[error(transparent)]
	Backend(#[from] BackendError),
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_router_error_display() {
		assert_eq!(
			RouterError::RouteExists("/hello".to_string()).to_string(),
			"Route already exists: /hello"
		);
		assert_eq!(
			RouterError::TargetNotSpecified("/docs".to_string()).to_string(),
			"No target element specified for the templates of route: /docs"
		);
		assert_eq!(
			RouterError::from(HandlerError::msg("denied")).to_string(),
			"Handler failed: denied"
		);
	}
}
