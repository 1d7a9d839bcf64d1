//! Snapshot tests for the treeviz rendering of raw trees

use slim::slim::formats::to_treeviz;
use slim::slim::parsing::parse_document;

#[test]
fn test_raw_tree_snapshot() {
    let source = "\
! doctype html
ul#menu
  - for item in items
    li.item = item.name
  markdown:
    # Hi
";
    let tree = parse_document(source).unwrap();
    insta::assert_snapshot!(to_treeviz(&tree), @r#"
    ⧉
    ├─ ! doctype html
    └─ ◇ ul id="menu"
      ├─ λ for item in items
      │ └─ ◇ li class="item"
      │   └─ = item.name
      └─ 𝒱 markdown
        ├─ ◦ # Hi
        └─ ↵
    "#);
}

#[test]
fn test_long_labels_are_truncated() {
    let tree = parse_document("p This line is much longer than thirty characters\n").unwrap();
    insta::assert_snapshot!(to_treeviz(&tree), @r"
    ⧉
    └─ ◇ p
      └─ ◦ This line is much longer than ...
    ");
}
