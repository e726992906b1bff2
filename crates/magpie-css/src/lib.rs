//! CSS reading, stylesheet object model, and value equivalence for Magpie.
//!
//! # Scope
//!
//! This crate implements:
//! - **CSS Tokenizer** ([§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization))
//!   - Every token carries its source span (line, column, character offsets)
//!   - Comment handling and escape sequences
//!
//! - **CSS Parser** ([§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing))
//!   - Style rules, including those nested in `@media`, `@supports`,
//!     `@container` and `@layer` blocks
//!   - Declarations with `!important`
//!   - Error recovery: malformed rules and declarations are skipped with a warning
//!
//! - **Object Model**
//!   - [`Stylesheet`] as an arena of [`Selector`]s, each owning its [`Declaration`]s
//!   - Per-value kind tagging ([`ValueKind`])
//!
//! - **Value Equivalence** ([CSS Values Level 4](https://www.w3.org/TR/css-values-4/))
//!   - Colors in any notation to `rgba(r, g, b, a)`
//!   - Absolute units to `px`, `deg`, `ms`, `hz`, `dppx`
//!   - Zero lengths, position keywords, `font-weight` keywords
//!
//! # Not Yet Implemented
//!
//! - Shorthand/longhand expansion (`margin` vs `margin-top` ...)
//! - `calc()` simplification
//! - Nested style rules (CSS Nesting)

/// Stylesheet object model.
pub mod model;
/// CSS parser per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
pub mod parser;
/// CSS tokenizer per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).
pub mod tokenizer;
/// Declaration values and their canonical forms.
pub mod values;

// Re-exports for convenience
pub use model::{
    Declaration, DeclarationShape, DeclarationValue, Selector, SelectorId, Stylesheet,
};
pub use parser::{CSSParser, ComponentValue, parse_stylesheet};
pub use tokenizer::{CSSToken, CSSTokenizer};
pub use values::{CanonicalValue, ColorValue, ValueKind, normalize};
