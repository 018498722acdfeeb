//! Route pattern compilation for the Pinecone router.
//!
//! A route path such as `/users/:id(\d+)/:tab?` is compiled once into a
//! [`PathPattern`], which then answers whether a concrete path matches and
//! which parameter values it carries.
//!
//! ## Pattern Syntax
//!
//! - `/about` - Literal segments, matched exactly (with or without a trailing slash)
//! - `:name` - One path segment (no `/`)
//! - `:name?` - Optional segment; the preceding slash is optional with it
//! - `:name*` - Zero or more characters, slashes included
//! - `:name+` - One or more characters, slashes included
//! - `:name(regex)` - Segment constrained by a custom regular expression
//!
//! ```
//! use pinecone_urls::PathPattern;
//!
//! let pattern = PathPattern::new("/product/:id(\\d+)").unwrap();
//! let params = pattern.matches("/product/123").unwrap();
//! assert_eq!(params.get("id"), Some(&Some("123".to_string())));
//! assert!(pattern.matches("/product/string").is_none());
//! ```

mod error;
mod pattern;

pub use error::PatternError;
pub use pattern::{Params, PathPattern};
