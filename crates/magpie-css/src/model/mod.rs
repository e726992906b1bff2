//! Stylesheet object model consumed by the duplication miner.
//!
//! A [`Stylesheet`] is an arena of [`Selector`]s addressed by [`SelectorId`].
//! Each selector owns its [`Declaration`]s in source order, and each
//! declaration owns its [`DeclarationValue`]s, already canonicalized by
//! [`normalize`](crate::values::normalize).
//!
//! # Identity
//!
//! A selector is identified by its text *and* where it was declared:
//! `.a { color: red }` written twice at two places in a file is two selectors.
//! Syntactically distinct selectors are never merged even when they would
//! match the same elements.

use core::fmt;

use magpie_common::SourceLocation;
use serde::Serialize;

use crate::values::{CanonicalValue, ValueKind, normalize};

/// A type-safe index into a [`Stylesheet`]'s selector arena.
///
/// Ids are handed out in document order, so ordering by id is ordering by
/// position in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SelectorId(pub usize);

/// One style rule's selector list and the declarations in its block.
///
/// `.a, .b { ... }` is a single selector whose text is `.a, .b`.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    /// Position in the owning stylesheet.
    pub id: SelectorId,
    /// The selector list text, whitespace-collapsed, entries joined by `, `.
    pub text: String,
    /// The enclosing conditional group rules (e.g. `@media print`), outermost
    /// first and joined by a space, if any.
    pub media: Option<String>,
    /// Where the selector text starts.
    pub location: SourceLocation,
    /// Declarations in source order.
    pub declarations: Vec<Declaration>,
}

impl Selector {
    /// The stable textual identity of this selector: its text, media context
    /// and location, e.g. `@media print .a, .b (3:1)`.
    #[must_use]
    pub fn identity(&self) -> String {
        match &self.media {
            Some(media) => format!("{media} {} ({})", self.text, self.location),
            None => format!("{} ({})", self.text, self.location),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identity())
    }
}

/// [§ 5.4.6 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-declaration)
///
/// A CSS declaration (e.g., `margin: 0 auto`).
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// The property name, ASCII-lowercased.
    pub property: String,
    /// The values in source order, separators included.
    pub values: Vec<DeclarationValue>,
    /// Whether the declaration has `!important`.
    pub important: bool,
    /// The selector whose block this declaration is in.
    pub selector: SelectorId,
    /// Where the property name starts.
    pub location: SourceLocation,
}

impl Declaration {
    /// Item-equivalence: same property, same importance, and every
    /// corresponding value equivalent, in order.
    #[must_use]
    pub fn is_equivalent(&self, other: &Self) -> bool {
        self.property == other.property
            && self.important == other.important
            && self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(a, b)| a.is_equivalent(b))
    }

    /// The canonical shape of this declaration. Equivalent declarations have
    /// equal shapes.
    #[must_use]
    pub fn shape(&self) -> DeclarationShape {
        DeclarationShape {
            property: self.property.clone(),
            values: self.values.iter().map(|v| v.canonical.clone()).collect(),
            important: self.important,
        }
    }

    /// The value as written, values joined by single spaces (no space before
    /// a comma).
    #[must_use]
    pub fn value_text(&self) -> String {
        join_values(self.values.iter().map(|v| (v.kind, v.raw.as_str())))
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.value_text())?;
        if self.important {
            f.write_str(" !important")?;
        }
        Ok(())
    }
}

/// An immutable declaration value: its raw text, the kind it was read as,
/// and its canonical form.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationValue {
    /// The value text as written in the source.
    pub raw: String,
    /// The kind the reader tagged the value with.
    pub kind: ValueKind,
    /// The canonical form used for equivalence.
    pub canonical: CanonicalValue,
}

impl DeclarationValue {
    /// Read a value of `property`, computing its canonical form.
    #[must_use]
    pub fn new(property: &str, raw: impl Into<String>, kind: ValueKind) -> Self {
        let raw = raw.into();
        let canonical = normalize(property, &raw, kind);
        Self {
            raw,
            kind,
            canonical,
        }
    }

    /// Two values are equivalent iff their canonical forms (kind and text)
    /// match. Raw text is irrelevant.
    #[must_use]
    pub fn is_equivalent(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

/// The canonical shape of a declaration, abstracted from which selector it
/// came from.
///
/// Shapes order by their display text first, which gives a stable textual
/// key for tie-breaking.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeclarationShape {
    /// The property name.
    pub property: String,
    /// The canonical values, in order.
    pub values: Vec<CanonicalValue>,
    /// Whether the declaration is `!important`.
    pub important: bool,
}

impl DeclarationShape {
    /// The stable textual key of this shape, e.g. `color: rgba(255, 0, 0, 1)`.
    #[must_use]
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DeclarationShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = join_values(self.values.iter().map(|v| (v.kind, v.text.as_str())));
        write!(f, "{}: {values}", self.property)?;
        if self.important {
            f.write_str(" !important")?;
        }
        Ok(())
    }
}

impl PartialOrd for DeclarationShape {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DeclarationShape {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.key()
            .cmp(&other.key())
            .then_with(|| self.values.cmp(&other.values))
    }
}

fn join_values<'a>(values: impl Iterator<Item = (ValueKind, &'a str)>) -> String {
    let mut out = String::new();
    for (kind, text) in values {
        if !out.is_empty() && !(kind == ValueKind::Separator && text == ",") {
            out.push(' ');
        }
        out.push_str(text);
    }
    out
}

/// [§ 5.3.3 Parse a stylesheet](https://www.w3.org/TR/css-syntax-3/#parse-stylesheet)
///
/// A parsed stylesheet, reduced to its selectors and their declarations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stylesheet {
    /// All selectors, indexed by [`SelectorId`].
    selectors: Vec<Selector>,
}

impl Stylesheet {
    /// Create an empty stylesheet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new selector with no declarations and return its id.
    pub fn add_selector(
        &mut self,
        text: impl Into<String>,
        media: Option<String>,
        location: SourceLocation,
    ) -> SelectorId {
        let id = SelectorId(self.selectors.len());
        self.selectors.push(Selector {
            id,
            text: text.into(),
            media,
            location,
            declarations: Vec::new(),
        });
        id
    }

    /// Append a declaration to a selector's block. Each value is given as its
    /// raw text and the kind it was read as.
    ///
    /// # Panics
    /// Panics if `selector` was not allocated by this stylesheet.
    pub fn add_declaration<S: AsRef<str>>(
        &mut self,
        selector: SelectorId,
        property: &str,
        values: &[(S, ValueKind)],
        important: bool,
        location: SourceLocation,
    ) {
        let property = property.trim().to_ascii_lowercase();
        let values = values
            .iter()
            .map(|(raw, kind)| DeclarationValue::new(&property, raw.as_ref().trim(), *kind))
            .collect();
        self.selectors[selector.0].declarations.push(Declaration {
            property,
            values,
            important,
            selector,
            location,
        });
    }

    /// Get a selector by its id.
    #[must_use]
    pub fn get(&self, id: SelectorId) -> Option<&Selector> {
        self.selectors.get(id.0)
    }

    /// Iterate over selectors in document order.
    pub fn iter(&self) -> core::slice::Iter<'_, Selector> {
        self.selectors.iter()
    }

    /// All selectors in document order.
    #[must_use]
    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }

    /// Number of selectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    /// Check if the stylesheet has no selectors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// Total number of declarations across all selectors.
    #[must_use]
    pub fn declaration_count(&self) -> usize {
        self.selectors.iter().map(|s| s.declarations.len()).sum()
    }
}

impl<'a> IntoIterator for &'a Stylesheet {
    type Item = &'a Selector;
    type IntoIter = core::slice::Iter<'a, Selector>;

    fn into_iter(self) -> Self::IntoIter {
        self.selectors.iter()
    }
}
