//! Error types for KeyValues parsing, serialization and tree mutation.
//!
//! ## Error Categories
//!
//! - **Format errors**: a token of the wrong kind where the grammar requires another
//! - **Unexpected end of input**: the token stream ended while a token was still required
//! - **Trailing data**: tokens remain after the root block closed
//! - **I/O errors**: reading or writing failed, passed through unchanged
//! - **Cycles**: a node was inserted into itself or one of its descendants
//!
//! Every parse error carries the [`Location`] at which it was detected.
//!
//! ## Examples
//!
//! ```rust
//! use keyvalues::{from_str, Error};
//!
//! let err = from_str("\"root\"\n{\n\"key\"\n}").unwrap_err();
//! assert!(matches!(err, Error::InvalidFormat { .. }));
//! assert_eq!(err.location().unwrap().line, 4);
//! ```

use std::fmt;
use std::io;
use thiserror::Error;

/// A position in the source text, 1-based on both axes.
///
/// The `Display` form (`line 3, column 7`) is what error messages use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Location { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Represents all possible errors produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error while reading or writing KeyValues text
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The token stream does not match the grammar
    #[error("Invalid KeyValues format at line {line}, column {col}: {msg}")]
    InvalidFormat { line: usize, col: usize, msg: String },

    /// A token was required but the input ended
    #[error("Unexpected end of input at line {line}, column {col}\nExpected: {expected}")]
    UnexpectedEof {
        line: usize,
        col: usize,
        expected: String,
    },

    /// Tokens remain after the root block was closed
    #[error("Unexpected trailing data at line {line}, column {col}")]
    TrailingData { line: usize, col: usize },

    /// A node was inserted under itself or one of its descendants
    #[error("Cannot insert node under key \"{key}\": it is the target node or one of its ancestors")]
    Cycle { key: String },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a format error at the given location.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keyvalues::{Error, Location};
    ///
    /// let err = Error::invalid_format(Location::new(2, 5), "expected a key");
    /// assert!(err.to_string().contains("line 2, column 5"));
    /// ```
    pub fn invalid_format(location: Location, msg: &str) -> Self {
        Error::InvalidFormat {
            line: location.line,
            col: location.column,
            msg: msg.to_string(),
        }
    }

    /// Creates an unexpected end-of-input error.
    pub fn unexpected_eof(location: Location, expected: &str) -> Self {
        Error::UnexpectedEof {
            line: location.line,
            col: location.column,
            expected: expected.to_string(),
        }
    }

    /// Creates a trailing-data error pointing at the first extra token.
    pub fn trailing_data(location: Location) -> Self {
        Error::TrailingData {
            line: location.line,
            col: location.column,
        }
    }

    pub fn cycle(key: &str) -> Self {
        Error::Cycle {
            key: key.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Returns where in the source a parse error was detected.
    ///
    /// `None` for errors that are not tied to a source position.
    #[must_use]
    pub fn location(&self) -> Option<Location> {
        match self {
            Error::InvalidFormat { line, col, .. }
            | Error::UnexpectedEof { line, col, .. }
            | Error::TrailingData { line, col } => Some(Location::new(*line, *col)),
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
