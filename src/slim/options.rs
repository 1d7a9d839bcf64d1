//! Parser and compiler configuration
//!
//! Both option sets deserialize with defaults for missing fields, so a caller can keep them in
//! whatever config format it already uses.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// How many columns a tab counts for when measuring indentation.
    pub tab_size: usize,
    /// Element used for lines that start with a `#id` or `.class` shorthand.
    pub default_tag: String,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            tab_size: 4,
            default_tag: "div".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerOptions {
    /// Name of the backend's HTML escaping function.
    pub escape_helper: String,
    /// Reference the `_safe` flavour of the escape helper.
    pub use_html_safe: bool,
    /// Escape `#{...}` payloads in text and attribute values.
    pub escape_interpolation: bool,
    /// Prefix for compiler-generated temporaries.
    pub temp_prefix: String,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            escape_helper: "Slim::Helpers.escape_html".to_string(),
            use_html_safe: false,
            escape_interpolation: true,
            temp_prefix: "_slimtmp".to_string(),
        }
    }
}

impl CompilerOptions {
    /// The escape helper call wrapping `code`, e.g. `Slim::Helpers.escape_html((name))`.
    pub fn escape_code(&self, code: &str) -> String {
        let suffix = if self.use_html_safe { "_safe" } else { "" };
        format!("{}{}(({}))", self.escape_helper, suffix, code)
    }
}
