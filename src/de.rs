//! KeyValues parsing.
//!
//! Builds a [`KeyValues`] tree from the token stream produced by
//! [`Tokenizer`]. A document is a root name followed by one block:
//!
//! ```text
//! document := string block
//! block    := '{' (string (string | block))* '}'
//! ```
//!
//! Each block is parsed by one call frame that alternates between waiting for
//! a key and waiting for that key's value. The first error aborts the parse;
//! no partial tree is returned.

use crate::error::Location;
use crate::{Error, KeyValues, Result, Token, Tokenizer, Value};
use tracing::debug;

/// Pulls tokens from a [`Tokenizer`] and assembles them into a tree.
pub struct Parser<'src> {
    tokenizer: Tokenizer<'src>,
}

impl<'src> Parser<'src> {
    pub fn new(input: &'src str) -> Self {
        Parser {
            tokenizer: Tokenizer::new(input),
        }
    }

    /// Parses exactly one document and checks that nothing follows it.
    ///
    /// A missing root name or root `{` is a format error; running out of
    /// input inside a block is [`Error::UnexpectedEof`].
    pub fn parse_document(mut self) -> Result<KeyValues> {
        let name = match self.expect_root_token("the root name")? {
            Token::String(name) => name,
            other => return Err(self.unexpected(&other, "the root name")),
        };

        match self.expect_root_token("'{'")? {
            Token::BlockBegin => {}
            other => return Err(self.unexpected(&other, "'{'")),
        }

        let root = KeyValues::new(name);
        self.parse_block(&root)?;

        if self.tokenizer.next_token().is_some() {
            return Err(Error::trailing_data(self.tokenizer.token_location()));
        }
        Ok(root)
    }

    /// Parses entries into `node` until the matching `}`.
    fn parse_block(&mut self, node: &KeyValues) -> Result<()> {
        let mut pending_key: Option<String> = None;

        loop {
            match pending_key.take() {
                None => match self.expect_token("a key or '}'")? {
                    Token::BlockEnd => return Ok(()),
                    Token::String(key) => pending_key = Some(key),
                    other => return Err(self.unexpected(&other, "a key or '}'")),
                },
                Some(key) => match self.expect_token("a value or '{'")? {
                    Token::BlockBegin => {
                        let child = KeyValues::new(key.clone());
                        self.parse_block(&child)?;
                        node.push_parsed(key, Value::Node(child));
                    }
                    Token::String(value) => node.push_parsed(key, Value::String(value)),
                    other => return Err(self.unexpected(&other, "a value or '{'")),
                },
            }
        }
    }

    fn expect_token(&mut self, expected: &str) -> Result<Token> {
        self.tokenizer
            .next_token()
            .ok_or_else(|| Error::unexpected_eof(self.tokenizer.location(), expected))
    }

    fn expect_root_token(&mut self, expected: &str) -> Result<Token> {
        self.tokenizer.next_token().ok_or_else(|| {
            Error::invalid_format(
                self.tokenizer.location(),
                &format!("expected {}, found end of input", expected),
            )
        })
    }

    fn unexpected(&self, found: &Token, expected: &str) -> Error {
        Error::invalid_format(
            self.location(),
            &format!("expected {}, found {}", expected, found.describe()),
        )
    }

    fn location(&self) -> Location {
        self.tokenizer.token_location()
    }
}

/// Parses a complete document from text.
pub(crate) fn parse_document(input: &str) -> Result<KeyValues> {
    debug!(len = input.len(), "Parsing KeyValues document");
    let root = Parser::new(input).parse_document()?;
    debug!(name = %root.name(), entries = root.len(), "Parsed KeyValues document");
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_entry() {
        let kv = parse_document("\"root\"\n{\n\"key\" \"value\"\n}").unwrap();
        assert_eq!(kv.name(), "root");
        assert_eq!(kv.len(), 1);
        assert_eq!(kv.get_str("key").as_deref(), Some("value"));
        assert!(kv.is_root());
    }

    #[test]
    fn test_nested_block() {
        let kv = parse_document("\"root\"\n{\n\"a\"\n{\n\"b\" \"c\"\n}\n}").unwrap();
        let a = kv.get_node("a").unwrap();
        assert_eq!(a.name(), "a");
        assert_eq!(a.get_str("b").as_deref(), Some("c"));
        assert!(a.parent().unwrap().ptr_eq(&kv));
    }

    #[test]
    fn test_empty_root() {
        let kv = parse_document("root{}").unwrap();
        assert_eq!(kv.name(), "root");
        assert!(kv.is_empty());
    }

    #[test]
    fn test_duplicate_keys_last_value_first_position() {
        let kv = parse_document("r { a 1 b 2 a 3 }").unwrap();
        assert_eq!(kv.keys(), vec!["a", "b"]);
        assert_eq!(kv.get_str("a").as_deref(), Some("3"));
    }

    #[test]
    fn test_key_without_value() {
        let err = parse_document("\"root\"\n{\n\"key\"\n}").unwrap_err();
        match err {
            Error::InvalidFormat { line, col, msg } => {
                assert_eq!((line, col), (4, 1));
                assert!(msg.contains("found '}'"));
            }
            other => panic!("Expected InvalidFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_trailing_data() {
        let err = parse_document("\"root\"{}\"extra\"").unwrap_err();
        assert!(matches!(err, Error::TrailingData { line: 1, col: 9 }));
    }

    #[test]
    fn test_missing_root_block() {
        let err = parse_document("root key").unwrap_err();
        assert!(matches!(err, Error::InvalidFormat { .. }));
    }

    #[test]
    fn test_root_must_start_with_name() {
        let err = parse_document("{ a b }").unwrap_err();
        assert!(matches!(err, Error::InvalidFormat { line: 1, col: 1, .. }));
    }

    #[test]
    fn test_block_where_key_expected() {
        let err = parse_document("root { { } }").unwrap_err();
        assert!(matches!(err, Error::InvalidFormat { .. }));
    }

    #[test]
    fn test_missing_root_name_or_brace() {
        let err = parse_document("").unwrap_err();
        match err {
            Error::InvalidFormat { line, col, msg } => {
                assert_eq!((line, col), (1, 1));
                assert!(msg.contains("the root name"));
            }
            other => panic!("Expected InvalidFormat, got {other:?}"),
        }

        let err = parse_document("root").unwrap_err();
        match err {
            Error::InvalidFormat { line, col, msg } => {
                assert_eq!((line, col), (1, 5));
                assert!(msg.contains("found end of input"));
            }
            other => panic!("Expected InvalidFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_unexpected_end() {
        for input in ["root {", "root { key", "root { a { b c }"] {
            let err = parse_document(input).unwrap_err();
            assert!(
                matches!(err, Error::UnexpectedEof { .. }),
                "input {input:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_comments_and_unquoted_tokens() {
        let input = "// model settings\nmodel // the root\n{\n\tname box // inline\n\tscale 1.5\n}\n";
        let kv = parse_document(input).unwrap();
        assert_eq!(kv.name(), "model");
        assert_eq!(kv.keys(), vec!["name", "scale"]);
        assert_eq!(kv.get_str("scale").as_deref(), Some("1.5"));
    }
}
