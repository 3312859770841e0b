//! Testing utilities for element trees
//!
//! Parser tests should use the two tools in this module together:
//!
//! 1. **[Samples]** for template content. The curated files under `samples/` are checked
//!    by hand and shared by unit tests, integration tests and the CLI tests, so a grammar
//!    change only needs the samples to be revisited, not every test.
//! 2. **[assert_tree]** for verification. It checks the whole shape of a tree in one
//!    fluent expression instead of chains of indexing and `match`:
//!
//! ```rust-example
//! use cisto::cisto::testing::{assert_tree, Samples};
//!
//! let root = cisto::parse(Samples::get("siblings")).unwrap();
//! assert_tree(&root)
//!     .child_count(2)
//!     .child(0, |items| {
//!         items.class_list(&["items"]).child_count(3);
//!     });
//! ```
//!
//! Short inline templates are fine for isolated grammar rules (one token kind, one error);
//! anything describing a whole document belongs in `samples/`.

mod assertions;
mod samples;

pub use assertions::{assert_tree, ElementAssertion};
pub use samples::Samples;
