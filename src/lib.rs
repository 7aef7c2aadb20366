//! # keyvalues
//!
//! A parser and serializer for Valve's KeyValues text format.
//!
//! ## What is KeyValues?
//!
//! KeyValues is the nested, ordered, string-only tree format used by the Source
//! engine for models, materials, scripts and game settings. See [`format`] for
//! the grammar.
//!
//! ## Key Features
//!
//! - **Ordered**: Entries keep their insertion order through parse, edit and write
//! - **Parent-aware**: Every node knows the node it is stored under
//! - **Round-trip safe**: Output is always quoted and escaped, so it parses back
//! - **Located errors**: Parse errors report line and column
//! - **Serde interop**: Trees serialize as maps of strings and nested maps
//!
//! ## Quick Start
//!
//! ```rust
//! use keyvalues::{from_str, to_string};
//!
//! let kv = from_str("\"root\"\n{\n\t\"key\" \"value\"\n}").unwrap();
//! assert_eq!(kv.name(), "root");
//! assert_eq!(kv.get_str("key").as_deref(), Some("value"));
//!
//! kv.insert("other", "entry").unwrap();
//! assert_eq!(to_string(&kv), "\"root\"\n{\n\t\"key\" \"value\"\n\t\"other\" \"entry\"\n}");
//! ```
//!
//! ### Building Trees
//!
//! ```rust
//! use keyvalues::{KeyValues, StringifyOptions};
//!
//! let kv_a = KeyValues::new("kv_a");
//! let kv_b = KeyValues::new("kv_b");
//! kv_b.insert("name", "kv_b").unwrap();
//! kv_a.insert("entry", &kv_b).unwrap();
//!
//! assert!(kv_b.parent().unwrap().ptr_eq(&kv_a));
//! assert_eq!(
//!     kv_a.stringify(&StringifyOptions::inline()),
//!     "\"kv_a\" { \"entry\" { \"name\" \"kv_b\" } }"
//! );
//! ```
//!
//! ## Error Handling
//!
//! Parsing stops at the first problem and returns an [`Error`] carrying its
//! [`Location`]. No partial tree is returned.
//!
//! ## Logging
//!
//! The crate emits `tracing` events (tokens at `trace`, parse and write at
//! `debug`). Install a subscriber to see them.

pub mod de;
pub mod error;
pub mod format;
pub mod node;
pub mod options;
pub mod ser;
pub mod tokenizer;
pub mod value;

pub use de::Parser;
pub use error::{Error, Location, Result};
pub use node::KeyValues;
pub use options::StringifyOptions;
pub use ser::{escape, unescape, Serializer};
pub use tokenizer::{Token, Tokenizer};
pub use value::Value;

use std::fs;
use std::io;
use std::path::Path;

/// The version of this library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parses a KeyValues document.
///
/// # Examples
///
/// ```rust
/// use keyvalues::from_str;
///
/// let kv = from_str("\"root\"\n{\n\"a\"\n{\n\"b\" \"c\"\n}\n}").unwrap();
/// let a = kv.get_node("a").unwrap();
/// assert_eq!(a.get_str("b").as_deref(), Some("c"));
/// ```
///
/// # Errors
///
/// Returns an error if the input is not exactly one well-formed document.
/// Error messages include line and column information.
pub fn from_str(s: &str) -> Result<KeyValues> {
    KeyValues::parse(s)
}

/// Parses a KeyValues document from bytes of UTF-8 text.
///
/// # Errors
///
/// Returns [`Error::Custom`] if the bytes are not valid UTF-8, otherwise as [`from_str`].
pub fn from_slice(v: &[u8]) -> Result<KeyValues> {
    let s = std::str::from_utf8(v).map_err(Error::custom)?;
    from_str(s)
}

/// Reads a whole stream and parses it as a KeyValues document.
///
/// # Examples
///
/// ```rust
/// use keyvalues::from_reader;
/// use std::io::Cursor;
///
/// let kv = from_reader(Cursor::new(b"root { key value }")).unwrap();
/// assert_eq!(kv.get_str("key").as_deref(), Some("value"));
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, otherwise as [`from_str`].
pub fn from_reader<R>(mut reader: R) -> Result<KeyValues>
where
    R: io::Read,
{
    let mut string = String::new();
    reader.read_to_string(&mut string)?;
    from_str(&string)
}

/// Reads and parses a KeyValues file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, otherwise as [`from_str`].
pub fn load(path: impl AsRef<Path>) -> Result<KeyValues> {
    let text = fs::read_to_string(path)?;
    from_str(&text)
}

/// Renders a tree with the default options (multi-line, tab indentation).
#[must_use]
pub fn to_string(kv: &KeyValues) -> String {
    kv.stringify(&StringifyOptions::default())
}

/// Renders a tree with custom options.
///
/// # Examples
///
/// ```rust
/// use keyvalues::{to_string_with_options, KeyValues, StringifyOptions};
///
/// let kv = KeyValues::new("x");
/// kv.insert("k", "v").unwrap();
/// assert_eq!(to_string_with_options(&kv, &StringifyOptions::inline()), "\"x\" { \"k\" \"v\" }");
/// ```
#[must_use]
pub fn to_string_with_options(kv: &KeyValues, options: &StringifyOptions) -> String {
    kv.stringify(options)
}

/// Writes a tree to a writer with the default options.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
pub fn to_writer<W>(writer: W, kv: &KeyValues) -> Result<()>
where
    W: io::Write,
{
    to_writer_with_options(writer, kv, &StringifyOptions::default())
}

/// Writes a tree to a writer with custom options.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
pub fn to_writer_with_options<W>(mut writer: W, kv: &KeyValues, options: &StringifyOptions) -> Result<()>
where
    W: io::Write,
{
    writer.write_all(kv.stringify(options).as_bytes())?;
    Ok(())
}

/// Writes a tree to a file with the default options, replacing its contents.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be written.
pub fn save(path: impl AsRef<Path>, kv: &KeyValues) -> Result<()> {
    fs::write(path, to_string(kv))?;
    Ok(())
}
