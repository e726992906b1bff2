//! Declaration values and the value-equivalence model.
//!
//! [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)
//!
//! Two declaration values are equivalent when their [`CanonicalValue`]s are
//! equal: same canonical kind, same canonical text. [`normalize`] computes the
//! canonical form; it is a pure, total function, so `red`, `#f00`,
//! `rgb(255 0 0)` and `hsl(0, 100%, 50%)` all land on `rgba(255, 0, 0, 1)`,
//! `12pt` and `16px` on `16px`, and unknown units or keywords pass through as
//! their own canonical form.

use core::fmt;

use serde::Serialize;
use strum_macros::{Display, EnumString};

/// CSS color parsing.
pub mod color;
/// Canonicalization of declaration values.
pub mod normalize;
/// Dimension units and conversion constants.
pub mod units;

pub use color::ColorValue;
pub use normalize::normalize;
pub use units::{UnitCategory, unit_category};

/// The kind of a single declaration value, as tagged by the reader.
///
/// The canonical kind of a value can differ from the kind it was read with:
/// `font-weight: bold` is read as a keyword and canonicalizes to the number
/// `700`, and a unit-less `0` on `margin` canonicalizes to the length `0px`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ValueKind {
    /// [§ 4 Color syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
    Color,
    /// [§ 6 Distance Units](https://www.w3.org/TR/css-values-4/#lengths)
    Length,
    /// [§ 7.1 Angle Units](https://www.w3.org/TR/css-values-4/#angles)
    Angle,
    /// [§ 7.2 Duration Units](https://www.w3.org/TR/css-values-4/#time)
    Time,
    /// [§ 7.3 Frequency Units](https://www.w3.org/TR/css-values-4/#frequency)
    Frequency,
    /// [§ 7.4 Resolution Units](https://www.w3.org/TR/css-values-4/#resolution)
    Resolution,
    /// [§ 5.5 Percentages](https://www.w3.org/TR/css-values-4/#percentages)
    Percentage,
    /// [§ 5.4 Numbers](https://www.w3.org/TR/css-values-4/#numbers)
    Number,
    /// A dimension whose unit is not known.
    Dimension,
    /// [§ 4.1 Pre-defined Keywords](https://www.w3.org/TR/css-values-4/#keywords)
    Keyword,
    /// [§ 4.3 Quoted Strings](https://www.w3.org/TR/css-values-4/#strings)
    String,
    /// [§ 4.5 Resource Locators](https://www.w3.org/TR/css-values-4/#urls)
    Url,
    /// A functional notation other than a color or `url()`.
    Function,
    /// A `,` or `/` between the values of a multi-value property.
    Separator,
}

/// The canonical, comparable form of a declaration value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CanonicalValue {
    /// The canonical kind.
    pub kind: ValueKind,
    /// The canonical text.
    pub text: String,
}

impl CanonicalValue {
    /// Create a canonical value.
    #[must_use]
    pub fn new(kind: ValueKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

impl fmt::Display for CanonicalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Print a number with at most 4 fractional digits, trailing zeros trimmed.
///
/// `-0` prints as `0`, so `1pt` prints as `1.3333` once converted and the
/// printed text parses back to the same printed text.
#[must_use]
pub fn format_number(value: f64) -> String {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    let text = format!("{rounded:.4}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_trims() {
        assert_eq!(format_number(16.0), "16");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(4.0 / 3.0), "1.3333");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(-0.00001), "0");
        assert_eq!(format_number(0.99999), "1");
    }
}
