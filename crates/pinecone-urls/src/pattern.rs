//! Path pattern compilation and matching.
//!
//! Route paths are split on `/`. Literal segments are regex-escaped, `:name`
//! segments become named capture groups. A path without any `:` skips the
//! regex engine entirely and is compared as a plain string.

use super::error::PatternError;
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;

/// Parameters captured by a successful match.
///
/// Every parameter declared by the pattern is present as a key. Optional
/// parameters that did not take part in the match map to `None`.
pub type Params = HashMap<String, Option<String>>;

/// Maximum allowed length for a route pattern string in bytes.
const MAX_PATTERN_LENGTH: usize = 1024;

/// Maximum allowed number of `/`-separated segments in a route pattern.
const MAX_PATH_SEGMENTS: usize = 32;

/// Maximum allowed size for a compiled pattern regex (in bytes).
const MAX_REGEX_SIZE: usize = 1 << 20; // 1 MiB

/// Inner pattern of a parameter without modifier or constraint.
const SEGMENT_PATTERN: &str = "[^/]+";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Modifier {
	/// `?`
	Optional,
	/// `*`
	ZeroOrMore,
	/// `+`
	OneOrMore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
	Literal(String),
	Param {
		name: String,
		constraint: Option<String>,
		modifier: Option<Modifier>,
	},
}

impl Segment {
	/// Parses one `/`-separated piece of a route path.
	fn parse(raw: &str) -> Result<Self, PatternError> {
		let Some(declaration) = raw.strip_prefix(':') else {
			return Ok(Self::Literal(raw.to_string()));
		};
		let invalid = || PatternError::InvalidParameter {
			segment: raw.to_string(),
		};

		let name_len = declaration
			.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
			.unwrap_or(declaration.len());
		let (name, mut rest) = declaration.split_at(name_len);
		if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
			return Err(invalid());
		}

		let modifier = match rest.chars().last() {
			Some('?') => Some(Modifier::Optional),
			Some('*') => Some(Modifier::ZeroOrMore),
			Some('+') => Some(Modifier::OneOrMore),
			_ => None,
		};
		if modifier.is_some() {
			rest = &rest[..rest.len() - 1];
		}

		let constraint = if rest.is_empty() {
			None
		} else if let Some(inner) = rest.strip_prefix('(').and_then(|r| r.strip_suffix(')'))
			&& !inner.is_empty()
		{
			Some(inner.to_string())
		} else {
			return Err(invalid());
		};

		Ok(Self::Param {
			name: name.to_string(),
			constraint,
			modifier,
		})
	}

	fn write_regex(&self, out: &mut String) {
		match self {
			Self::Literal(literal) => {
				out.push('/');
				out.push_str(&regex::escape(literal));
			}
			Self::Param {
				name,
				constraint,
				modifier,
			} => {
				// A custom constraint wins over the `*`/`+` inner patterns.
				let inner = match (constraint, modifier) {
					(Some(constraint), _) => constraint.as_str(),
					(None, Some(Modifier::ZeroOrMore)) => ".*",
					(None, Some(Modifier::OneOrMore)) => ".+",
					(None, _) => SEGMENT_PATTERN,
				};
				if *modifier == Some(Modifier::Optional) {
					out.push_str(&format!("(?:/(?P<{name}>{inner}))?"));
				} else {
					out.push_str(&format!("/(?P<{name}>{inner})"));
				}
			}
		}
	}
}

#[derive(Debug, Clone)]
enum Matcher {
	/// No parameters: plain string comparison.
	Exact,
	/// Anchored regex with one named group per parameter.
	Regex(Regex),
}

/// A compiled route path.
///
/// Supports patterns like:
/// - `/about` - Exact match
/// - `/users/:id` - Single path parameter
/// - `/profile/:one?/:two?` - Optional parameters
/// - `/files/:path*`, `/files/:path+` - Multi-segment capture
/// - `/product/:id(\d+)` - Custom regex constraint
///
/// # Wildcard Behavior
///
/// `*` and `+` compile to `.*` and `.+`, which match **any character
/// including path separators (`/`)**. `/about/:inf*` matches
/// `/about/foo/bar`, capturing `foo/bar` as a single value.
#[derive(Debug, Clone)]
pub struct PathPattern {
	/// The original pattern string.
	pattern: String,
	/// Parsed segments, in order.
	segments: Vec<Segment>,
	/// Parameter names in declaration order.
	param_names: Vec<String>,
	matcher: Matcher,
}

impl PathPattern {
	/// Compiles a route path into a pattern.
	///
	/// # Errors
	///
	/// Returns a [`PatternError`] if:
	/// - the pattern exceeds 1024 bytes or 32 segments
	/// - a `:` segment is malformed or a parameter name is repeated
	/// - a custom constraint is not a valid regular expression
	pub fn new(pattern: &str) -> Result<Self, PatternError> {
		if pattern.len() > MAX_PATTERN_LENGTH {
			return Err(PatternError::TooLong {
				length: pattern.len(),
				max: MAX_PATTERN_LENGTH,
			});
		}

		let segment_count = pattern.split('/').count();
		if segment_count > MAX_PATH_SEGMENTS {
			return Err(PatternError::TooManySegments {
				count: segment_count,
				max: MAX_PATH_SEGMENTS,
			});
		}

		let segments = pattern
			.split('/')
			.filter(|s| !s.is_empty())
			.map(Segment::parse)
			.collect::<Result<Vec<_>, _>>()?;

		let mut param_names: Vec<String> = Vec::new();
		for segment in &segments {
			if let Segment::Param { name, .. } = segment {
				if param_names.contains(name) {
					return Err(PatternError::DuplicateParameter { name: name.clone() });
				}
				param_names.push(name.clone());
			}
		}

		let matcher = if pattern.contains(':') {
			Matcher::Regex(Self::compile(&segments)?)
		} else {
			Matcher::Exact
		};

		Ok(Self {
			pattern: pattern.to_string(),
			segments,
			param_names,
			matcher,
		})
	}

	/// Creates a pattern that matches `path` literally, `:` included.
	///
	/// Used for sentinel routes whose name is never parsed as a pattern.
	pub fn exact(path: &str) -> Self {
		Self {
			pattern: path.to_string(),
			segments: path
				.split('/')
				.filter(|s| !s.is_empty())
				.map(|s| Segment::Literal(s.to_string()))
				.collect(),
			param_names: Vec::new(),
			matcher: Matcher::Exact,
		}
	}

	fn compile(segments: &[Segment]) -> Result<Regex, PatternError> {
		let mut regex_str = String::from("^");
		for segment in segments {
			segment.write_regex(&mut regex_str);
		}
		regex_str.push_str("/?$");

		RegexBuilder::new(&regex_str)
			.size_limit(MAX_REGEX_SIZE)
			.build()
			.map_err(|e| PatternError::Regex(e.to_string()))
	}

	/// Returns the original pattern string.
	pub fn as_str(&self) -> &str {
		&self.pattern
	}

	/// Returns the parameter names in declaration order.
	pub fn param_names(&self) -> &[String] {
		&self.param_names
	}

	/// Returns whether this pattern is matched by plain string equality.
	pub fn is_exact(&self) -> bool {
		matches!(self.matcher, Matcher::Exact)
	}

	/// Attempts to match a path against this pattern.
	///
	/// Returns `None` when the path does not match. On success every declared
	/// parameter is present in the returned map.
	pub fn matches(&self, path: &str) -> Option<Params> {
		match &self.matcher {
			Matcher::Exact => {
				(trim_trailing_slash(path) == trim_trailing_slash(&self.pattern)).then(Params::new)
			}
			Matcher::Regex(regex) => {
				let caps = regex.captures(path)?;
				Some(
					self.param_names
						.iter()
						.map(|name| {
							let value = caps.name(name).map(|m| m.as_str().to_string());
							(name.clone(), value)
						})
						.collect(),
				)
			}
		}
	}

	/// Checks if this pattern would match the given path.
	pub fn is_match(&self, path: &str) -> bool {
		match &self.matcher {
			Matcher::Exact => trim_trailing_slash(path) == trim_trailing_slash(&self.pattern),
			Matcher::Regex(regex) => regex.is_match(path),
		}
	}

	/// Generates a path from this pattern with the given parameters.
	///
	/// Optional parameters may be left out. Returns `None` if a required
	/// parameter is missing or the generated path does not satisfy the
	/// pattern (for example a value rejected by a custom constraint).
	pub fn reverse(&self, params: &HashMap<String, String>) -> Option<String> {
		let mut result = String::new();

		for segment in &self.segments {
			match segment {
				Segment::Literal(literal) => {
					result.push('/');
					result.push_str(literal);
				}
				Segment::Param { name, modifier, .. } => match (params.get(name), modifier) {
					(Some(value), _) => {
						result.push('/');
						result.push_str(value);
					}
					(None, Some(Modifier::Optional)) => {}
					(None, Some(Modifier::ZeroOrMore)) => result.push('/'),
					(None, _) => return None,
				},
			}
		}

		if result.is_empty() {
			result.push('/');
		}

		self.is_match(&result).then_some(result)
	}
}

fn trim_trailing_slash(path: &str) -> &str {
	path.strip_suffix('/').unwrap_or(path)
}

impl PartialEq for PathPattern {
	fn eq(&self, other: &Self) -> bool {
		self.pattern == other.pattern
	}
}

impl Eq for PathPattern {}

impl std::fmt::Display for PathPattern {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.pattern)
	}
}
