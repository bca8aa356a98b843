//! Formatting and decoding configuration shared by both converter chains.

use serde::{Deserialize, Serialize};

/// Default date pattern.
pub const DEFAULT_DATE_FORMAT: &str = "yyyy-MM-dd HH:mm:ss";

/// Configuration for [`serialize`](crate::serialize) and
/// [`deserialize`](crate::deserialize).
///
/// Missing keys take their defaults when loaded through serde:
///
/// ```
/// let options: zson_core::Options = serde_json::from_str(r#"{"indent": 2}"#).unwrap();
/// assert!(options.is_pretty());
/// assert!(options.ignore_null);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Date pattern in the `yyyy-MM-dd HH:mm:ss` pattern language.
    pub date_format: String,
    /// Serialize only the fields declared on a record's own class.
    pub ignore_parent_attributes: bool,
    /// Omit null values instead of writing `null`.
    pub ignore_null: bool,
    /// Escape `"`, `\` and tab inside quoted text.
    pub escape_special_chars: bool,
    /// Rewrite wide characters as `\u` escapes in the finished output.
    pub unicode_output: bool,
    /// Spaces per nesting level; `0` is compact output.
    pub indent: usize,
    /// Record classes whose fields are never walked, nor those of their parents.
    pub opaque_classes: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            ignore_parent_attributes: false,
            ignore_null: true,
            escape_special_chars: false,
            unicode_output: false,
            indent: 0,
            opaque_classes: Vec::new(),
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date_format(mut self, pattern: impl Into<String>) -> Self {
        self.date_format = pattern.into();
        self
    }

    pub fn ignore_parent_attributes(mut self, yes: bool) -> Self {
        self.ignore_parent_attributes = yes;
        self
    }

    pub fn ignore_null(mut self, yes: bool) -> Self {
        self.ignore_null = yes;
        self
    }

    pub fn escape_special_chars(mut self, yes: bool) -> Self {
        self.escape_special_chars = yes;
        self
    }

    pub fn unicode_output(mut self, yes: bool) -> Self {
        self.unicode_output = yes;
        self
    }

    /// Indent width; `0` switches back to compact output.
    pub fn pretty(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn opaque_class(mut self, name: impl Into<String>) -> Self {
        self.opaque_classes.push(name.into());
        self
    }

    pub fn is_pretty(&self) -> bool {
        self.indent > 0
    }

    pub fn is_opaque(&self, class: &str) -> bool {
        self.opaque_classes.iter().any(|name| name == class)
    }
}
