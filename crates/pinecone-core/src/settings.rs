//! Router settings.
//!
//! Settings can be built in code or loaded from TOML:
//!
//! ```toml
//! hash = true
//! base_path = "/app"
//! target_id = "content"
//! preload = true
//! ```
//!
//! Global handlers cannot be expressed in TOML and are attached with
//! [`Settings::with_global_handler`].

use crate::handler::Handler;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Router configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	/// Use `#/path` URLs instead of the History API path.
	pub hash: bool,
	/// Prefix applied to every route and navigation target.
	pub base_path: String,
	/// Element that route templates are rendered into.
	pub target_id: Option<String>,
	/// Whether the click interception layer should route link clicks.
	pub handle_clicks: bool,
	/// Preload the templates of every route on registration.
	pub preload: bool,
	/// Handlers run before every route's own handlers, `notfound` included.
	#[serde(skip)]
	pub global_handlers: Vec<Arc<dyn Handler>>,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			hash: false,
			base_path: "/".to_string(),
			target_id: None,
			handle_clicks: true,
			preload: false,
			global_handlers: Vec::new(),
		}
	}
}

impl std::fmt::Debug for Settings {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Settings")
			.field("hash", &self.hash)
			.field("base_path", &self.base_path)
			.field("target_id", &self.target_id)
			.field("handle_clicks", &self.handle_clicks)
			.field("preload", &self.preload)
			.field("global_handlers_count", &self.global_handlers.len())
			.finish()
	}
}

impl Settings {
	/// Creates default settings.
	pub fn new() -> Self {
		Self::default()
	}

	/// Load settings from a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let content = std::fs::read_to_string(path.as_ref()).map_err(|e| SettingsError::Io {
			path: path.as_ref().to_path_buf(),
			source: e,
		})?;

		Self::from_toml(&content)
	}

	/// Parse settings from a TOML string.
	pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
		toml::from_str(content).map_err(|e| SettingsError::Parse {
			message: e.to_string(),
		})
	}

	/// Enables or disables hash routing.
	pub fn with_hash(mut self, hash: bool) -> Self {
		self.hash = hash;
		self
	}

	/// Sets the base path.
	pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
		self.base_path = base_path.into();
		self
	}

	/// Sets the default template target element.
	pub fn with_target_id(mut self, target_id: impl Into<String>) -> Self {
		self.target_id = Some(target_id.into());
		self
	}

	/// Enables or disables link click routing.
	pub fn with_handle_clicks(mut self, handle_clicks: bool) -> Self {
		self.handle_clicks = handle_clicks;
		self
	}

	/// Enables or disables template preloading for all routes.
	pub fn with_preload(mut self, preload: bool) -> Self {
		self.preload = preload;
		self
	}

	/// Appends a global handler.
	pub fn with_global_handler(mut self, handler: Arc<dyn Handler>) -> Self {
		self.global_handlers.push(handler);
		self
	}

	/// Returns the normalized base path prefix: no trailing slash, empty when
	/// routing from the root.
	pub fn base_prefix(&self) -> String {
		let trimmed = self.base_path.trim().trim_end_matches('/');
		if trimmed.is_empty() {
			String::new()
		} else if trimmed.starts_with('/') {
			trimmed.to_string()
		} else {
			format!("/{trimmed}")
		}
	}

	/// Prefixes `path` with the base path unless it already carries it.
	///
	/// `path` is expected to start with `/`.
	pub fn apply_base_path(&self, path: &str) -> String {
		let base = self.base_prefix();
		if base.is_empty() || path == base {
			return path.to_string();
		}
		if let Some(rest) = path.strip_prefix(base.as_str())
			&& rest.starts_with('/')
		{
			return path.to_string();
		}
		if path == "/" {
			return base;
		}
		format!("{base}{path}")
	}
}

/// Settings loading errors.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	/// The settings file could not be read.
	#[error("IO error reading {}: {source}", path.display())]
	Io {
		/// Path of the settings file.
		path: PathBuf,
		/// Underlying I/O error.
		#[source]
		source: std::io::Error,
	},

	/// The settings are not valid TOML or have the wrong shape.
	#[error("Failed to parse settings: {message}")]
	Parse {
		/// Parser error message.
		message: String,
	},
}
