//! # slim
//!
//! A parser and tree compiler for the slim template language.
//!
//! File Layout
//!
//!     The front end runs in two stages. Parsing turns indented slim source into a raw node
//!     tree; compiling rewrites that tree into a backend-agnostic intermediate tree. Code
//!     generation and rendering live outside this crate.
//!
//!     src/slim
//!       ├── lexing       Indentation measuring and line classification
//!       ├── parsing      Tag/attribute scanning, text blocks and the block builder
//!       ├── compiling    The intermediate tree and the tree compiler
//!       └── formats      Debug renderings of both trees
//!
//! For testing helpers, see the [testing module](slim::testing).

#![allow(rustdoc::invalid_html_tags)]

pub mod slim;

pub use slim::{compile_template, parse_document};
