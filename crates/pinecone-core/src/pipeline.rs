//! Sequential, cancellable handler execution.

use crate::context::Context;
use crate::handler::{Handler, HandlerError, HandlerInput};
use crate::router::Router;
use serde_json::Value;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// How a pipeline run ended, when no handler failed.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
	/// Every handler ran. Holds the value returned by the last one.
	Completed(Value),
	/// The token was cancelled before the chain finished.
	Aborted,
}

/// The ordered handler chain of one navigation: global handlers first, then
/// the route's own.
#[derive(Clone, Default)]
pub struct Pipeline {
	handlers: Vec<Arc<dyn Handler>>,
}

impl std::fmt::Debug for Pipeline {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Pipeline")
			.field("handlers_count", &self.handlers.len())
			.finish()
	}
}

impl Pipeline {
	/// Builds the chain for a navigation.
	pub fn new(global: &[Arc<dyn Handler>], route: &[Arc<dyn Handler>]) -> Self {
		Self {
			handlers: global.iter().chain(route).cloned().collect(),
		}
	}

	/// Returns `true` if there is nothing to run.
	pub fn is_empty(&self) -> bool {
		self.handlers.is_empty()
	}

	/// Returns the number of handlers.
	pub fn len(&self) -> usize {
		self.handlers.len()
	}

	/// Runs the handlers one at a time, feeding each the previous result.
	///
	/// `token` is checked before every handler and once more after the last
	/// one, so a handler that aborts or redirects stops the chain. A handler
	/// already awaiting when the token is cancelled is not interrupted.
	///
	/// # Errors
	///
	/// Returns the first [`HandlerError`]; later handlers do not run.
	pub async fn run(
		&self,
		context: &Arc<Context>,
		router: &Router,
		token: &CancellationToken,
	) -> Result<PipelineOutcome, HandlerError> {
		let mut data = Value::Null;

		for (position, handler) in self.handlers.iter().enumerate() {
			if token.is_cancelled() {
				tracing::debug!(path = %context.path, position, "pipeline aborted");
				return Ok(PipelineOutcome::Aborted);
			}

			let input = HandlerInput::new(
				Arc::clone(context),
				data,
				router.clone(),
				token.clone(),
			);
			data = handler.handle(input).await?;
		}

		if token.is_cancelled() {
			tracing::debug!(path = %context.path, "pipeline aborted by last handler");
			return Ok(PipelineOutcome::Aborted);
		}

		Ok(PipelineOutcome::Completed(data))
	}
}
