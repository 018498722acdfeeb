//! Navigation handler abstractions.
//!
//! Handlers run in sequence before a navigation commits. Each one receives
//! the value returned by the previous handler as [`HandlerInput::data`] and
//! returns the value passed to the next one, so a route's handler list works
//! as a middleware chain.

use crate::context::Context;
use crate::error::RouterError;
use crate::router::{NavigationOutcome, Router};
use async_trait::async_trait;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Error raised by a handler.
///
/// A failing handler aborts the navigation it belongs to; nothing is pushed
/// to history and the current context stays as it was.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
	/// Plain failure message.
	#[error("{0}")]
	Message(String),
	/// Failure caused by another error.
	#[error(transparent)]
	Other(#[from] anyhow::Error),
}

impl HandlerError {
	/// Creates an error from a message.
	pub fn msg(message: impl Into<String>) -> Self {
		Self::Message(message.into())
	}
}

/// Everything a handler gets to see while a navigation is in flight.
pub struct HandlerInput {
	/// The context being navigated to. Not yet committed.
	pub context: Arc<Context>,
	/// Result of the previous handler, `Value::Null` for the first one.
	pub data: Value,
	router: Router,
	token: CancellationToken,
}

impl HandlerInput {
	pub(crate) fn new(
		context: Arc<Context>,
		data: Value,
		router: Router,
		token: CancellationToken,
	) -> Self {
		Self {
			context,
			data,
			router,
			token,
		}
	}

	/// Returns the router running this navigation.
	pub fn router(&self) -> &Router {
		&self.router
	}

	/// Stops the pipeline after the current handler returns.
	///
	/// Handlers later in the chain do not run and the navigation does not
	/// commit.
	pub fn abort(&self) {
		self.token.cancel();
	}

	/// Returns `true` once this navigation was aborted or superseded.
	pub fn is_aborted(&self) -> bool {
		self.token.is_cancelled()
	}

	/// Starts a new navigation to `path`, superseding the current one.
	pub async fn redirect(&self, path: &str) -> Result<NavigationOutcome, RouterError> {
		self.router.navigate(path).await
	}
}

/// A function invoked during navigation.
#[async_trait]
pub trait Handler: Send + Sync {
	/// Runs the handler.
	///
	/// # Errors
	///
	/// Any error aborts the navigation.
	async fn handle(&self, input: HandlerInput) -> Result<Value, HandlerError>;
}

/// Handler backed by an async closure or function.
///
/// Created through [`handler_fn`].
pub struct HandlerFn<F> {
	handler: F,
}

#[async_trait]
impl<F, Fut> Handler for HandlerFn<F>
where
	F: Fn(HandlerInput) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Result<Value, HandlerError>> + Send + 'static,
{
	async fn handle(&self, input: HandlerInput) -> Result<Value, HandlerError> {
		(self.handler)(input).await
	}
}

/// Wraps an async function into a shareable [`Handler`].
///
/// # Example
///
/// ```ignore
/// let guard = handler_fn(|input: HandlerInput| async move {
///     if input.context.param("id").is_none() {
///         return Err(HandlerError::msg("missing id"));
///     }
///     Ok(input.data)
/// });
/// ```
pub fn handler_fn<F, Fut>(handler: F) -> Arc<dyn Handler>
where
	F: Fn(HandlerInput) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Result<Value, HandlerError>> + Send + 'static,
{
	Arc::new(HandlerFn { handler })
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_handler_error_display() {
		assert_eq!(HandlerError::msg("denied").to_string(), "denied");

		let err = HandlerError::from(anyhow::anyhow!("upstream failure"));
		assert_eq!(err.to_string(), "upstream failure");
	}
}
