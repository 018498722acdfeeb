//! Navigation engine for the Pinecone client-side router.
//!
//! A [`Router`] owns a registry of [`Route`]s, the current [`Context`] and a
//! [`NavigationHistory`]. Every navigation resolves its target against the
//! registry, runs the global and route handlers as a cancellable
//! [`Pipeline`], then updates history and commits the new context.
//!
//! ## Features
//!
//! - `web`: [`BrowserHistory`] and [`listen_popstate`] for `wasm32` targets.
//!
//! ## Example
//!
//! ```ignore
//! use pinecone_core::{Router, RouteOptions, Settings, handler_fn};
//!
//! let router = Router::new(Settings::default().with_target_id("content"));
//! router.add(
//!     "/users/:id",
//!     RouteOptions::new()
//!         .handler(handler_fn(|input| async move { Ok(input.data) }))
//!         .templates(["/views/user.html"]),
//! )?;
//!
//! router.navigate("/users/7").await?;
//! assert_eq!(router.context().unwrap().param("id"), Some("7"));
//! ```

mod backend;
mod context;
mod error;
mod handler;
mod history;
mod pipeline;
mod route;
mod router;
mod settings;
mod templates;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod web;

pub use backend::{
	BackendError, HistoryBackend, HistoryState, HistoryWrite, Location, MemoryHistory,
	RecordedWrite,
};
pub use context::Context;
pub use error::RouterError;
pub use handler::{Handler, HandlerError, HandlerFn, HandlerInput, handler_fn};
pub use history::NavigationHistory;
pub use pipeline::{Pipeline, PipelineOutcome};
pub use route::{NOT_FOUND, Route, RouteOptions};
pub use router::{NavigationOutcome, Router, RouterBuilder};
pub use settings::{Settings, SettingsError};
pub use templates::{
	CachedTemplates, NoopTemplates, TemplateError, TemplateFetcher, TemplateLoader,
	TemplateRenderer,
};
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::{BrowserHistory, listen_popstate};

pub use pinecone_urls::{Params, PathPattern, PatternError};
