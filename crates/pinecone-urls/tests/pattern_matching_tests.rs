//! Integration tests for route pattern matching
//!
//! These tests exercise the matcher through its public API only:
//! 1. Literal paths and trailing-slash tolerance
//! 2. Optional, repeated and constrained parameters
//! 3. Generating paths back from parameters

use pinecone_urls::{Params, PathPattern};
use proptest::prelude::*;
use rstest::rstest;
use std::collections::HashMap;

proptest! {
	/// Literal paths match themselves with and without a trailing slash.
	#[test]
	fn prop_literal_path_matches_itself(segments in prop::collection::vec("[a-z0-9._-]{1,8}", 0..6)) {
		let path = format!("/{}", segments.join("/"));
		let pattern = PathPattern::new(&path).unwrap();

		prop_assert_eq!(pattern.matches(&path), Some(Params::new()));
		prop_assert_eq!(pattern.matches(&format!("{}/", path.trim_end_matches('/'))), Some(Params::new()));
	}

	/// A single-segment parameter captures any slash-free value verbatim.
	#[test]
	fn prop_segment_param_captures_value(value in "[A-Za-z0-9._~-]{1,16}") {
		let pattern = PathPattern::new("/items/:id").unwrap();
		let params = pattern.matches(&format!("/items/{}", value)).unwrap();

		prop_assert_eq!(params.get("id"), Some(&Some(value)));
	}
}

#[rstest]
#[case("/profile")]
#[case("/profile/")]
#[case("/profile/one")]
#[case("/profile/one/two")]
fn test_optional_profile_paths_match(#[case] path: &str) {
	let pattern = PathPattern::new("/profile/:one?/:two?").unwrap();
	assert!(pattern.matches(path).is_some());
}

#[rstest]
fn test_unset_optional_params_are_present_as_none() {
	let pattern = PathPattern::new("/profile/:one?/:two?").unwrap();

	let params = pattern.matches("/profile").unwrap();

	assert_eq!(params.get("one"), Some(&None));
	assert_eq!(params.get("two"), Some(&None));
	assert!(pattern.matches("/about").is_none());
}

#[rstest]
fn test_repeated_param_spans_segments() {
	let pattern = PathPattern::new("/about/:inf*").unwrap();

	assert!(pattern.matches("/about").is_none());
	let params = pattern.matches("/about/foo/bar").unwrap();
	assert_eq!(params.get("inf"), Some(&Some("foo/bar".to_string())));
}

#[rstest]
fn test_constrained_param() {
	let pattern = PathPattern::new(r"/product/:id(\d+)").unwrap();

	assert!(pattern.matches("/product/string").is_none());
	let params = pattern.matches("/product/123").unwrap();
	assert_eq!(params.get("id"), Some(&Some("123".to_string())));
}

#[rstest]
fn test_mixed_literal_and_params_reverse() {
	let pattern = PathPattern::new("/org/:org/repos/:repo/:tab?").unwrap();
	let mut params = HashMap::new();
	params.insert("org".to_string(), "acme".to_string());
	params.insert("repo".to_string(), "rocket".to_string());

	let path = pattern.reverse(&params).unwrap();

	assert_eq!(path, "/org/acme/repos/rocket");
	assert!(pattern.is_match(&path));
}
