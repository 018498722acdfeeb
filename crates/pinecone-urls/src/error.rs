//! Error types for pattern compilation.

/// Error returned when a route path cannot be compiled into a [`PathPattern`].
///
/// [`PathPattern`]: crate::PathPattern
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
	/// The pattern string is longer than the allowed maximum.
	#[error("Pattern length {length} exceeds maximum allowed length of {max} bytes")]
	TooLong {
		/// Length of the rejected pattern in bytes.
		length: usize,
		/// Maximum allowed length in bytes.
		max: usize,
	},
	/// The pattern has more `/`-separated segments than allowed.
	#[error("Pattern has {count} path segments, exceeding maximum of {max}")]
	TooManySegments {
		/// Number of segments in the rejected pattern.
		count: usize,
		/// Maximum allowed number of segments.
		max: usize,
	},
	/// A `:` segment is not a well-formed parameter declaration.
	#[error("Invalid parameter segment '{segment}'")]
	InvalidParameter {
		/// The offending segment, as written.
		segment: String,
	},
	/// The same parameter name is declared twice.
	#[error("Duplicate parameter name '{name}'")]
	DuplicateParameter {
		/// The repeated parameter name.
		name: String,
	},
	/// The generated regular expression failed to compile.
	#[error("Failed to compile pattern regex: {0}")]
	Regex(String),
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_pattern_error_display() {
		let err = PatternError::TooLong {
			length: 2000,
			max: 1024,
		};
		assert_eq!(
			err.to_string(),
			"Pattern length 2000 exceeds maximum allowed length of 1024 bytes"
		);

		let err = PatternError::InvalidParameter {
			segment: ":1abc".to_string(),
		};
		assert!(err.to_string().contains(":1abc"));
	}
}
