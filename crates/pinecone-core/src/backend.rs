//! History API backends.
//!
//! The router records navigations in its own [`NavigationHistory`] and
//! mirrors them into a [`HistoryBackend`]: the browser's History API on the
//! web, or [`MemoryHistory`] everywhere else.
//!
//! [`NavigationHistory`]: crate::NavigationHistory

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// State object stored with every history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState {
	/// The router path of the entry.
	pub path: String,
}

impl HistoryState {
	/// Creates a new history state.
	pub fn new(path: impl Into<String>) -> Self {
		Self { path: path.into() }
	}
}

/// The parts of the current URL the router reads.
///
/// Components keep their browser prefixes: `search` starts with `?` and
/// `hash` with `#` when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
	/// Path component, always starting with `/`.
	pub pathname: String,
	/// Query component including `?`, or empty.
	pub search: String,
	/// Fragment component including `#`, or empty.
	pub hash: String,
}

impl Default for Location {
	fn default() -> Self {
		Self {
			pathname: "/".to_string(),
			search: String::new(),
			hash: String::new(),
		}
	}
}

impl Location {
	/// Parses a same-origin URL such as `/a/b?x=1#top`.
	pub fn parse(url: &str) -> Self {
		let (rest, hash) = match url.find('#') {
			Some(pos) => (&url[..pos], &url[pos..]),
			None => (url, ""),
		};
		let (pathname, search) = match rest.find('?') {
			Some(pos) => (&rest[..pos], &rest[pos..]),
			None => (rest, ""),
		};

		Self {
			pathname: if pathname.is_empty() {
				"/".to_string()
			} else {
				pathname.to_string()
			},
			search: search.to_string(),
			hash: hash.to_string(),
		}
	}

	/// Resolves `url` against this location the way `pushState` does for
	/// same-document URLs: a fragment-only URL keeps path and query.
	pub fn join(&self, url: &str) -> Self {
		if url.starts_with('#') {
			Self {
				pathname: self.pathname.clone(),
				search: self.search.clone(),
				hash: url.to_string(),
			}
		} else {
			Self::parse(url)
		}
	}

	/// Returns the full URL.
	pub fn href(&self) -> String {
		format!("{}{}{}", self.pathname, self.search, self.hash)
	}
}

/// Error returned when a history backend rejects a write.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("History API call failed: {0}")]
pub struct BackendError(pub String);

impl BackendError {
	/// Creates a new backend error.
	pub fn new(message: impl Into<String>) -> Self {
		Self(message.into())
	}
}

/// An integration with some kind of native navigation history.
pub trait HistoryBackend: Send + Sync {
	/// Adds a new entry for `url`, like `history.pushState`.
	///
	/// # Errors
	///
	/// Returns [`BackendError`] if the underlying API rejected the call.
	fn push_state(&self, state: &HistoryState, url: &str) -> Result<(), BackendError>;

	/// Replaces the current entry with `url`, like `history.replaceState`.
	///
	/// # Errors
	///
	/// Returns [`BackendError`] if the underlying API rejected the call.
	fn replace_state(&self, state: &HistoryState, url: &str) -> Result<(), BackendError>;

	/// Returns the current location.
	fn location(&self) -> Location;
}

/// Kind of write recorded by [`MemoryHistory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryWrite {
	/// `push_state`
	Push,
	/// `replace_state`
	Replace,
}

/// A write recorded by [`MemoryHistory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedWrite {
	/// Push or replace.
	pub kind: HistoryWrite,
	/// The state object passed along.
	pub state: HistoryState,
	/// The URL written.
	pub url: String,
}

/// A [`HistoryBackend`] that stores all information in memory.
///
/// Every write is recorded, which makes this backend useful in tests as well
/// as outside the browser.
#[derive(Debug, Default)]
pub struct MemoryHistory {
	location: Mutex<Location>,
	writes: Mutex<Vec<RecordedWrite>>,
}

impl MemoryHistory {
	/// Creates a backend positioned at `/`.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a backend positioned at `url`.
	pub fn with_location(url: &str) -> Self {
		Self {
			location: Mutex::new(Location::parse(url)),
			writes: Mutex::new(Vec::new()),
		}
	}

	/// Moves the location without recording a write, as the browser does
	/// before firing `popstate`.
	pub fn set_location(&self, url: &str) {
		let mut location = self.location.lock();
		*location = location.join(url);
	}

	/// Returns all writes so far, oldest first.
	pub fn writes(&self) -> Vec<RecordedWrite> {
		self.writes.lock().clone()
	}

	fn record(&self, kind: HistoryWrite, state: &HistoryState, url: &str) {
		self.set_location(url);
		self.writes.lock().push(RecordedWrite {
			kind,
			state: state.clone(),
			url: url.to_string(),
		});
	}
}

impl HistoryBackend for MemoryHistory {
	fn push_state(&self, state: &HistoryState, url: &str) -> Result<(), BackendError> {
		self.record(HistoryWrite::Push, state, url);
		Ok(())
	}

	fn replace_state(&self, state: &HistoryState, url: &str) -> Result<(), BackendError> {
		self.record(HistoryWrite::Replace, state, url);
		Ok(())
	}

	fn location(&self) -> Location {
		self.location.lock().clone()
	}
}
