//! KeyValues Format Reference
//!
//! This module documents the KeyValues text format as read and written by
//! this library.
//!
//! # Overview
//!
//! KeyValues is a nested, ordered, string-keyed tree format used throughout the
//! Source engine for model, material and game configuration. Every name, key and
//! leaf value is a string; structure comes only from brace-delimited blocks.
//!
//! ```text
//! "model"
//! {
//!     "name"      "Test Model"
//!     "filename"  "test.mdl"
//!     "bodygroup"
//!     {
//!         "studio"    "box.smd"
//!     }
//! }
//! ```
//!
//! # Grammar
//!
//! ```text
//! document     := string block
//! block        := '{' (entry)* '}'
//! entry        := string (string | block)
//! string       := quoted | unquoted
//! quoted       := '"' (escaped-char | [^"\\])* '"'
//! escaped-char := '\\' ('"' | '\\')
//! unquoted     := [^ \t\r\n{}]+
//! comment      := '//' [^\n]*
//! whitespace   := [ \t\r\n]+
//! ```
//!
//! Comments and whitespace may appear between any two tokens.
//!
//! ## Strings
//!
//! | Form | Ends at | Escapes |
//! |------|---------|---------|
//! | Quoted `"..."` | The next unescaped `"` | `\"` and `\\`; `\x` reads as `x` |
//! | Unquoted | Whitespace, `{`, `}` or end of input | None, `\` is literal |
//!
//! A quoted string with no closing quote runs to the end of input.
//!
//! ## Duplicate Keys
//!
//! A key that appears twice in one block keeps its first position and takes
//! the last value.
//!
//! # Output
//!
//! The writer always quotes names, keys and values and escapes only `\` and
//! `"`. Line breaks, tabs and other control characters inside values are
//! written as they are.
//!
//! | Option | Effect |
//! |--------|--------|
//! | `indent` | Repeat `indent_unit` once per nesting level (default on) |
//! | `inline` | Single line, tokens separated by one space; disables `indent` |
//! | `indent_unit` | Text used for one level of indentation (default tab) |
//!
//! # Limitations
//!
//! - **Macros**: `#base` and `#include` directives are not supported; they read
//!   as ordinary unquoted strings and usually end in a format error
//! - **Conditionals**: `[$WIN32]`-style conditions after values are not supported
//! - **Types**: There are no numeric or boolean values; callers parse scalars
//! - **Nesting depth**: Block parsing and stringifying recurse once per nesting
//!   level. Documents nested tens of thousands of levels deep can exhaust the
//!   thread's stack
//!
//! # Errors
//!
//! | Error | Raised when |
//! |-------|-------------|
//! | `InvalidFormat` | A token of the wrong kind appears, or the root name or root `{` is missing |
//! | `UnexpectedEof` | Input ends inside a block |
//! | `TrailingData` | Anything follows the root block |

// This module contains only documentation; no implementation code
