//! The router's own back/forward stack.
//!
//! [`NavigationHistory`] only tracks paths and a cursor. Navigating through it
//! (back, forward, jumps) goes through [`Router`](crate::Router), which runs
//! the target route's handlers before moving the cursor.

/// Ordered stack of visited paths with a cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationHistory {
	entries: Vec<String>,
	index: usize,
}

impl NavigationHistory {
	/// Creates an empty history.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the visited paths, oldest first.
	pub fn entries(&self) -> &[String] {
		&self.entries
	}

	/// Returns the cursor position.
	pub fn index(&self) -> usize {
		self.index
	}

	/// Returns the number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns `true` if nothing was visited yet.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Returns the path under the cursor.
	pub fn current(&self) -> Option<&str> {
		self.get(self.index)
	}

	/// Returns the path at `index`.
	pub fn get(&self, index: usize) -> Option<&str> {
		self.entries.get(index).map(String::as_str)
	}

	/// Returns `false` only when the cursor is at the first entry.
	pub fn can_go_back(&self) -> bool {
		self.index > 0
	}

	/// Returns `false` only when the cursor is at the last entry.
	pub fn can_go_forward(&self) -> bool {
		self.index + 1 < self.entries.len()
	}

	/// Appends `path` and moves the cursor onto it.
	///
	/// Entries after the cursor are discarded first, like a browser drops its
	/// forward stack when a new page is visited after going back.
	pub fn push(&mut self, path: impl Into<String>) {
		if !self.entries.is_empty() && self.index + 1 < self.entries.len() {
			self.entries.truncate(self.index + 1);
		}
		self.entries.push(path.into());
		self.index = self.entries.len() - 1;
	}

	/// Moves the cursor without touching the entries.
	///
	/// Returns `false` and leaves the cursor alone if `index` is out of
	/// bounds.
	pub fn set_index(&mut self, index: usize) -> bool {
		if index < self.entries.len() {
			self.index = index;
			true
		} else {
			false
		}
	}

	/// Returns the index of the entry directly behind or ahead of the cursor
	/// if it holds `path`.
	pub fn adjacent_index(&self, path: &str) -> Option<usize> {
		if self.can_go_back() && self.get(self.index - 1) == Some(path) {
			Some(self.index - 1)
		} else if self.can_go_forward() && self.get(self.index + 1) == Some(path) {
			Some(self.index + 1)
		} else {
			None
		}
	}
}
