use compact_str::CompactString;
use core::fmt::Write;

use crate::{sql::tokens::Token, values::Value};

/// A SQL chunk represents a part of an SQL statement.
///
/// - `Token` - SQL keywords and operators (SELECT, FROM, =, etc.)
/// - `Ident` - Quoted identifiers ("table_name", "column_name")
/// - `Raw` - Unquoted raw SQL text (function names, expressions)
/// - `Param` - Bound parameter, rendered as a dialect placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum SQLChunk {
    /// SQL keywords and operators: SELECT, FROM, WHERE, =, AND, etc.
    Token(Token),

    /// Quoted identifier. Renders as `"name"` with embedded quotes doubled.
    Ident(CompactString),

    /// Raw SQL text, rendered as-is
    Raw(CompactString),

    /// Parameter value. Renders as `?` or `$n` depending on dialect
    Param(Value),
}

impl SQLChunk {
    /// Creates a token chunk - const
    #[inline]
    pub const fn token(t: Token) -> Self {
        Self::Token(t)
    }

    /// Creates raw SQL text from a static string - const
    #[inline]
    pub const fn raw_static(text: &'static str) -> Self {
        Self::Raw(CompactString::const_new(text))
    }

    /// Creates a quoted identifier from a runtime string
    #[inline]
    pub fn ident(name: impl Into<CompactString>) -> Self {
        Self::Ident(name.into())
    }

    /// Creates raw SQL text from a runtime string
    #[inline]
    pub fn raw(text: impl Into<CompactString>) -> Self {
        Self::Raw(text.into())
    }

    /// Write chunk content to buffer. Parameters are written by the caller,
    /// which tracks placeholder numbering.
    pub(crate) fn write(&self, buf: &mut impl Write) {
        match self {
            SQLChunk::Token(token) => {
                let _ = buf.write_str(token.as_str());
            }
            SQLChunk::Ident(name) => write_quoted(buf, name),
            SQLChunk::Raw(text) => {
                let _ = buf.write_str(text);
            }
            SQLChunk::Param(_) => {
                let _ = buf.write_char('?');
            }
        }
    }

    /// Check if this chunk is "word-like" (needs space separation from other word-like chunks)
    #[inline]
    pub(crate) const fn is_word_like(&self) -> bool {
        match self {
            SQLChunk::Token(t) => !matches!(
                t,
                Token::LPAREN
                    | Token::RPAREN
                    | Token::COMMA
                    | Token::DOT
                    | Token::EQ
                    | Token::NE
                    | Token::LT
                    | Token::GT
                    | Token::LE
                    | Token::GE
            ),
            SQLChunk::Ident(_) | SQLChunk::Raw(_) | SQLChunk::Param(_) => true,
        }
    }
}

/// Quotes an identifier, doubling any embedded `"`.
pub(crate) fn write_quoted(buf: &mut impl Write, name: &str) {
    let _ = buf.write_char('"');
    for ch in name.chars() {
        if ch == '"' {
            let _ = buf.write_str("\"\"");
        } else {
            let _ = buf.write_char(ch);
        }
    }
    let _ = buf.write_char('"');
}

impl From<Token> for SQLChunk {
    #[inline]
    fn from(value: Token) -> Self {
        Self::Token(value)
    }
}

impl From<Value> for SQLChunk {
    #[inline]
    fn from(value: Value) -> Self {
        Self::Param(value)
    }
}
