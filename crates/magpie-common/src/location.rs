//! Positions into stylesheet source text.

use core::fmt;

use serde::Serialize;

/// A 1-based line/column position plus the 0-based character offset it was
/// computed from.
///
/// Locations order by offset, so sorting selectors by location gives document
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SourceLocation {
    /// 0-based offset in characters from the start of the input.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number, counted in characters.
    pub column: usize,
}

impl SourceLocation {
    /// The position of the first character of a document.
    pub const START: Self = Self {
        offset: 0,
        line: 1,
        column: 1,
    };

    /// Create a location from explicit coordinates.
    #[must_use]
    pub const fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// The location reached after consuming `c` at this location.
    ///
    /// `\n` starts a new line; every other character advances the column.
    #[must_use]
    pub const fn advance(self, c: char) -> Self {
        if c == '\n' {
            Self {
                offset: self.offset + 1,
                line: self.line + 1,
                column: 1,
            }
        } else {
            Self {
                offset: self.offset + 1,
                line: self.line,
                column: self.column + 1,
            }
        }
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
