//! CSS Token types per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).
//!
//! Only the token types the stylesheet reader and the value normalizer act on
//! are distinguished. `<CDO-token>`, `<CDC-token>` and `<unicode-range-token>`
//! are folded into `<delim-token>`s and idents.

use magpie_common::SourceLocation;

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#token-diagrams)
///
/// CSS tokens as defined by the CSS Syntax Module Level 3 specification.
#[derive(Debug, Clone, PartialEq)]
pub enum CSSToken {
    /// "`<ident-token>`"
    Ident(String),

    /// "`<function-token>`"
    /// "has a value composed of one or more code points, followed by U+0028 LEFT PARENTHESIS"
    Function(String),

    /// "`<at-keyword-token>`"
    AtKeyword(String),

    /// "`<hash-token>`"
    /// "has a value composed of one or more code points, preceded by U+0023 NUMBER SIGN (#)"
    Hash(String),

    /// "`<string-token>`"
    /// The value excludes the surrounding quotes.
    String(String),

    /// "`<bad-string-token>`"
    BadString,

    /// "`<url-token>`"
    /// The value of an unquoted `url(...)`.
    Url(String),

    /// "`<bad-url-token>`"
    BadUrl,

    /// "`<delim-token>`"
    Delim(char),

    /// "`<number-token>`"
    Number(f64),

    /// "`<percentage-token>`"
    Percentage(f64),

    /// "`<dimension-token>`"
    /// "has a numeric value, a type flag, and a unit"
    Dimension {
        /// "a numeric value"
        value: f64,
        /// "a unit", as written
        unit: String,
    },

    /// "`<whitespace-token>`"
    Whitespace,

    /// "`<colon-token>`"
    Colon,

    /// "`<semicolon-token>`"
    Semicolon,

    /// "`<comma-token>`"
    Comma,

    /// `<[-token>`
    LeftBracket,

    /// `<]-token>`
    RightBracket,

    /// `<(-token>`
    LeftParen,

    /// `<)-token>`
    RightParen,

    /// `<{-token>`
    LeftBrace,

    /// `<}-token>`
    RightBrace,

    /// End of file - signals end of input
    EOF,
}

impl CSSToken {
    /// Check if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EOF)
    }

    /// Check if this is a whitespace token.
    #[must_use]
    pub const fn is_whitespace(&self) -> bool {
        matches!(self, Self::Whitespace)
    }
}

/// A token together with the span of source text it was consumed from.
///
/// `start` is the location of the first code point of the token, `end` the
/// character offset one past its last code point. The parser slices raw
/// declaration text out of the input with these spans.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedToken {
    /// The token itself.
    pub token: CSSToken,
    /// Where the token starts.
    pub start: SourceLocation,
    /// Character offset one past the end of the token.
    pub end: usize,
}
