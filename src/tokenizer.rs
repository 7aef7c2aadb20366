//! Tokenizer for KeyValues text.
//!
//! Produces a flat stream of [`Token`]s, skipping whitespace and `//` line
//! comments. The tokenizer never fails: malformed input degrades to a string
//! token or to the end of the stream, and the parser decides what is an error.

use crate::error::Location;
use tracing::trace;

/// One lexical unit of KeyValues text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// `{`
    BlockBegin,
    /// `}`
    BlockEnd,
    /// A quoted or unquoted string, with quotes stripped and escapes resolved.
    String(String),
}

impl Token {
    /// Short human-readable description used in error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Token::BlockBegin => "'{'".to_string(),
            Token::BlockEnd => "'}'".to_string(),
            Token::String(data) => format!("string \"{}\"", data),
        }
    }
}

/// Scans a source buffer into [`Token`]s on demand.
///
/// # Examples
///
/// ```rust
/// use keyvalues::{Token, Tokenizer};
///
/// let tokens: Vec<Token> = Tokenizer::new("\"root\" { key value } // done").collect();
/// assert_eq!(
///     tokens,
///     vec![
///         Token::String("root".to_string()),
///         Token::BlockBegin,
///         Token::String("key".to_string()),
///         Token::String("value".to_string()),
///         Token::BlockEnd,
///     ]
/// );
/// ```
#[derive(Clone)]
pub struct Tokenizer<'src> {
    source: &'src str,
    /// Current byte position in `source`.
    position: usize,
    line: usize,
    /// 1-based character column of `position` within its line.
    column: usize,
    /// Where the most recently returned token started.
    token_start: Location,
}

impl<'src> Tokenizer<'src> {
    pub fn new(source: &'src str) -> Self {
        Tokenizer {
            source,
            position: 0,
            line: 1,
            column: 1,
            token_start: Location::new(1, 1),
        }
    }

    /// The current scan position.
    #[must_use]
    pub fn location(&self) -> Location {
        Location::new(self.line, self.column)
    }

    /// Where the token most recently returned by [`next_token`](Self::next_token) started.
    #[must_use]
    pub fn token_location(&self) -> Location {
        self.token_start
    }

    /// Returns the next token, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> Option<Token> {
        loop {
            self.skip_whitespace();
            if !self.skip_comment() {
                break;
            }
        }

        self.token_start = self.location();
        let token = match self.peek()? {
            '{' => {
                self.advance();
                Token::BlockBegin
            }
            '}' => {
                self.advance();
                Token::BlockEnd
            }
            _ => Token::String(self.scan_string()),
        };
        trace!("Token {:?} at {}", token, self.token_start);
        Some(token)
    }

    /// Scans a quoted or unquoted string starting at the current position.
    ///
    /// Escapes (`\"`, `\\`) are only honoured inside quotes. An unknown escape
    /// drops the backslash and keeps the following character. Some other
    /// KeyValues readers drop both characters instead. An unterminated quoted string
    /// runs to the end of input.
    fn scan_string(&mut self) -> String {
        let quoted = self.peek() == Some('"');
        if quoted {
            self.advance();
        }

        let mut result = String::new();
        let mut escape = false;
        while let Some(current) = self.peek() {
            if quoted {
                if escape {
                    escape = false;
                    result.push(current);
                } else if current == '"' {
                    break;
                } else if current == '\\' {
                    escape = true;
                } else {
                    result.push(current);
                }
            } else if is_whitespace(current) || current == '{' || current == '}' {
                break;
            } else {
                result.push(current);
            }
            self.advance();
        }

        // closing quote
        if quoted && self.peek() == Some('"') {
            self.advance();
        }

        result
    }

    fn skip_whitespace(&mut self) {
        while let Some(current) = self.peek() {
            if !is_whitespace(current) {
                break;
            }
            self.advance();
        }
    }

    /// Skips a `//` comment through the end of its line. Returns `true` if one was skipped.
    fn skip_comment(&mut self) -> bool {
        if !self.source[self.position..].starts_with("//") {
            return false;
        }
        while let Some(current) = self.peek() {
            if current == '\n' {
                break;
            }
            self.advance();
        }
        true
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.source[self.position..].chars().next()
    }

    #[inline]
    fn advance(&mut self) {
        if let Some(current) = self.peek() {
            self.position += current.len_utf8();
            if current == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

#[inline]
fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}
