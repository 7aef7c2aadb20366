//! Configuration options for KeyValues stringification.
//!
//! ## Examples
//!
//! ```rust
//! use keyvalues::{KeyValues, StringifyOptions};
//!
//! let kv = KeyValues::new("x");
//! kv.insert("k", "v").unwrap();
//!
//! assert_eq!(kv.stringify(&StringifyOptions::default()), "\"x\"\n{\n\t\"k\" \"v\"\n}");
//! assert_eq!(kv.stringify(&StringifyOptions::inline()), "\"x\" { \"k\" \"v\" }");
//! assert_eq!(
//!     kv.stringify(&StringifyOptions::new().with_indent_unit("  ")),
//!     "\"x\"\n{\n  \"k\" \"v\"\n}"
//! );
//! ```

/// Configuration options for KeyValues stringification.
///
/// `inline` wins over `indent`: inline output never carries indentation and
/// separates tokens with a single space instead of a newline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StringifyOptions {
    pub indent: bool,
    pub inline: bool,
    pub indent_unit: String,
}

impl Default for StringifyOptions {
    fn default() -> Self {
        StringifyOptions {
            indent: true,
            inline: false,
            indent_unit: "\t".to_string(),
        }
    }
}

impl StringifyOptions {
    /// Creates default options (multi-line, one tab per nesting level).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keyvalues::StringifyOptions;
    ///
    /// let options = StringifyOptions::new();
    /// assert!(options.indent);
    /// assert!(!options.inline);
    /// assert_eq!(options.indent_unit, "\t");
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for single-line output.
    #[must_use]
    pub fn inline() -> Self {
        StringifyOptions {
            inline: true,
            ..Default::default()
        }
    }

    /// Enables or disables indentation of nested lines.
    #[must_use]
    pub fn with_indent(mut self, indent: bool) -> Self {
        self.indent = indent;
        self
    }

    /// Enables or disables single-line output.
    #[must_use]
    pub fn with_inline(mut self, inline: bool) -> Self {
        self.inline = inline;
        self
    }

    /// Sets the text repeated once per nesting level.
    ///
    /// Only used when `indent` is on and `inline` is off.
    #[must_use]
    pub fn with_indent_unit(mut self, unit: impl Into<String>) -> Self {
        self.indent_unit = unit.into();
        self
    }

    pub(crate) fn separator(&self) -> &'static str {
        if self.inline {
            " "
        } else {
            "\n"
        }
    }

    pub(crate) fn effective_indent_unit(&self) -> &str {
        if self.indent && !self.inline {
            &self.indent_unit
        } else {
            ""
        }
    }
}
