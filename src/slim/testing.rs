//! Testing utilities for raw tree assertions
//!
//!     Comparing whole trees with `assert_eq!` gets unreadable quickly, and a failure points at
//!     a wall of `Debug` output. Tests should instead walk the tree with [assert_tree] and
//!     assert only what they care about:
//!
//!     ```rust,ignore
//!     use crate::slim::testing::assert_tree;
//!
//!     let tree = parse_document("ul\n  li = item\n").unwrap();
//!     assert_tree(&tree).count(1).item(0, |node| {
//!         node.assert_tag().name("ul").body(|body| {
//!             body.count(1).item(0, |li| {
//!                 li.assert_tag().name("li").body(|body| {
//!                     body.item(0, |output| {
//!                         output.assert_output().code("item").escaped(true);
//!                     });
//!                 });
//!             });
//!         });
//!     });
//!     ```
//!
//!     Newline markers are skipped by `count` and `item`; use `newline_count` to check them.
//!     Panic messages carry the path of the failing node (`items[0].body[1]`).

mod tree_assertions;

pub use tree_assertions::{
    assert_tree, ChildrenAssertion, CodeAssertion, EmbeddedAssertion, NodeAssertion,
    TagAssertion,
};
