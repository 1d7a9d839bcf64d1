//! Output formats for the two trees
//!
//!     Only debug renderings live here. Turning the intermediate tree into a program is the
//!     backend's job; for machine consumption serialize the trees with serde instead.

pub mod treeviz;

pub use treeviz::{ir_to_treeviz, to_treeviz};
