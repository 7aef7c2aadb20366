//! KeyValues stringification.
//!
//! Renders a tree back into text. Every name, key and scalar is quoted, and
//! only `\` and `"` are escaped, so any tree whose strings avoid line breaks
//! and control characters parses back to an equal tree.
//!
//! ```rust
//! use keyvalues::{KeyValues, StringifyOptions};
//!
//! let root = KeyValues::new("x");
//! let child = KeyValues::new("child");
//! child.insert("path", r"models\box.mdl").unwrap();
//! root.insert("child", child).unwrap();
//!
//! assert_eq!(
//!     root.stringify(&StringifyOptions::default()),
//!     "\"x\"\n{\n\t\"child\"\n\t{\n\t\t\"path\" \"models\\\\box.mdl\"\n\t}\n}"
//! );
//! ```

use crate::{KeyValues, StringifyOptions, Value};
use std::borrow::Cow;
use tracing::debug;

/// Writes a tree into a `String` buffer.
pub struct Serializer<'a> {
    output: String,
    options: &'a StringifyOptions,
}

impl<'a> Serializer<'a> {
    pub fn new(options: &'a StringifyOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes the root name followed by its block.
    pub fn write_document(&mut self, root: &KeyValues) {
        self.write_quoted(&root.name());
        self.output.push_str(self.options.separator());
        self.write_block(root, 0);
    }

    fn write_block(&mut self, node: &KeyValues, level: usize) {
        let separator = self.options.separator();

        self.write_indent(level);
        self.output.push('{');
        self.output.push_str(separator);

        for (key, value) in node {
            self.write_indent(level + 1);
            self.write_quoted(&key);
            match value {
                Value::Node(child) => {
                    self.output.push_str(separator);
                    self.write_block(&child, level + 1);
                }
                Value::String(s) => {
                    self.output.push(' ');
                    self.write_quoted(&s);
                }
            }
            self.output.push_str(separator);
        }

        self.write_indent(level);
        self.output.push('}');
    }

    #[inline]
    fn write_quoted(&mut self, s: &str) {
        self.output.push('"');
        self.output.push_str(&escape(s));
        self.output.push('"');
    }

    #[inline]
    fn write_indent(&mut self, level: usize) {
        let unit = self.options.effective_indent_unit();
        for _ in 0..level {
            self.output.push_str(unit);
        }
    }
}

/// Renders `root` as a complete document.
pub(crate) fn stringify(root: &KeyValues, options: &StringifyOptions) -> String {
    debug!(name = %root.name(), inline = options.inline, "Stringifying KeyValues");
    let mut serializer = Serializer::new(options);
    serializer.write_document(root);
    serializer.into_inner()
}

/// Escapes `\` and `"` with a leading backslash. Nothing else is touched.
///
/// # Examples
///
/// ```rust
/// use keyvalues::escape;
///
/// assert_eq!(escape(r#"say "hi" \o/"#), r#"say \"hi\" \\o/"#);
/// assert_eq!(escape("plain"), "plain");
/// ```
#[must_use]
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(|c: char| c == '\\' || c == '"') {
        return Cow::Borrowed(s);
    }
    let mut escaped = String::with_capacity(s.len() + 4);
    for ch in s.chars() {
        if ch == '\\' || ch == '"' {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    Cow::Owned(escaped)
}

/// Reverses [`escape`]: `\\` becomes `\` and `\"` becomes `"`.
///
/// A backslash before any other character is dropped, matching how quoted
/// strings are read. A trailing lone backslash is kept.
#[must_use]
pub fn unescape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some(next) => result.push(next),
                None => result.push('\\'),
            }
        } else {
            result.push(ch);
        }
    }
    result
}
