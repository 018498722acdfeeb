//! # Pinecone
//!
//! Client-side route matching and navigation for web front-ends.
//!
//! Pinecone matches in-page navigations against a registry of route
//! patterns, runs each route's handlers as a cancellable middleware chain and
//! keeps its own back/forward history in step with the browser's.
//!
//! ## Crates
//!
//! - [`urls`] (`pinecone-urls`) - route pattern compilation and matching
//! - [`navigation`] (`pinecone-core`) - router, handler pipeline, history, settings
//!
//! ## Feature Flags
//!
//! - `web` - `BrowserHistory` backend and `popstate` listener for `wasm32`
//!
//! ## Quick Start
//!
//! ```
//! use pinecone::prelude::*;
//!
//! # async fn run() -> Result<(), RouterError> {
//! let router = Router::new(Settings::default());
//! router.add(
//!     "/users/:id(\\d+)",
//!     RouteOptions::new().handler(handler_fn(|input| async move {
//!         Ok(json!({ "user": input.context.param("id") }))
//!     })),
//! )?;
//!
//! let outcome = router.navigate("/users/42").await?;
//! assert_eq!(outcome.context().unwrap().param("id"), Some("42"));
//! # Ok(())
//! # }
//! ```

pub use pinecone_core as navigation;
pub use pinecone_urls as urls;

pub use pinecone_core::{
	BackendError, CachedTemplates, Context, Handler, HandlerError, HandlerFn, HandlerInput,
	HistoryBackend, HistoryState, HistoryWrite, Location, MemoryHistory, NOT_FOUND,
	NavigationHistory, NavigationOutcome, NoopTemplates, Pipeline, PipelineOutcome, RecordedWrite,
	Route, RouteOptions, Router, RouterBuilder, RouterError, Settings, SettingsError,
	TemplateError, TemplateFetcher, TemplateLoader, TemplateRenderer, handler_fn,
};
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use pinecone_core::{BrowserHistory, listen_popstate};
pub use pinecone_urls::{Params, PathPattern, PatternError};

/// Commonly used types.
pub mod prelude {
	pub use crate::{
		Context, Handler, HandlerError, HandlerInput, NOT_FOUND, NavigationOutcome, Params,
		PathPattern, RouteOptions, Router, RouterError, Settings, handler_fn,
	};

	// External
	pub use async_trait::async_trait;
	pub use serde_json::{Value, json};
}

#[cfg(test)]
mod tests {
	use super::prelude::*;
	use rstest::rstest;

	#[rstest]
	#[tokio::test]
	async fn test_prelude_covers_a_navigation() {
		// Arrange
		let router = Router::new(Settings::default());
		router
			.add(
				"/about/:inf*",
				RouteOptions::new().handler(handler_fn(|input| async move {
					Ok(json!(input.context.param("inf")))
				})),
			)
			.unwrap();

		// Act
		let outcome = router.navigate("/about/foo/bar").await.unwrap();

		// Assert
		assert_eq!(outcome.context().unwrap().param("inf"), Some("foo/bar"));
	}
}
