//! Lexing
//!
//!     Slim is line oriented, so lexing is per line and has no tokens in the usual sense. Each
//!     raw line is measured and dedented (see [indentation]) and then classified by its leading
//!     indicator (see [line_classification]). Neither step knows about nesting: deciding what
//!     an indentation change means is the block builder's job, since that depends on whether
//!     the previous line opened a body.
//!
//! Indentation Handling
//!
//!     Indentation is measured in columns, not levels. Any consistent amount of indentation
//!     works, and sibling blocks only need to line up with each other. Tabs count as a fixed
//!     number of columns (see [crate::slim::options::ParserOptions::tab_size]), not as tab
//!     stops.

pub mod indentation;
pub mod line_classification;
