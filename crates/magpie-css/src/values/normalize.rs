//! Canonicalization of declaration values.
//!
//! [`normalize`] maps `(property, raw text, kind)` to a [`CanonicalValue`].
//! It never fails: whatever it does not understand passes through as its
//! own canonical form (lowercased, whitespace collapsed). Normalizing a
//! canonical value again returns it unchanged.

use magpie_common::warning::warn_once;

use crate::parser::{ComponentValue, parse_component_values};
use crate::tokenizer::CSSToken;

use super::color::parse_single_color;
use super::units::{UnitCategory, to_canonical_unit, unit_category};
use super::{CanonicalValue, ValueKind, format_number};

/// Properties whose numbers are unit-less by definition. A `0` on these stays
/// the number `0` instead of becoming the length `0px`.
const UNITLESS_PROPERTIES: &[&str] = &[
    "column-count",
    "fill-opacity",
    "flex",
    "flex-grow",
    "flex-shrink",
    "font-weight",
    "line-height",
    "opacity",
    "order",
    "orphans",
    "stroke-opacity",
    "widows",
    "z-index",
    "zoom",
];

/// Properties taking `<time>` values. A bare `0` on these is the time `0ms`.
const TIME_PROPERTIES: &[&str] = &[
    "animation-delay",
    "animation-duration",
    "transition-delay",
    "transition-duration",
];

/// Properties taking `<angle>` values. A bare `0` on these is the angle `0deg`.
const ANGLE_PROPERTIES: &[&str] = &["image-orientation", "offset-rotate", "rotate"];

/// [§ 3.6 background-position](https://www.w3.org/TR/css-backgrounds-3/#background-position)
///
/// Properties taking a `<position>`, whose keywords are percentages.
const POSITION_PROPERTIES: &[&str] = &[
    "background-position",
    "background-position-x",
    "background-position-y",
    "object-position",
    "perspective-origin",
    "transform-origin",
];

/// Property prefixes whose values (or some of whose values) are colors.
const COLOR_PROPERTY_PREFIXES: &[&str] = &[
    "background",
    "border",
    "box-shadow",
    "caret",
    "column-rule",
    "fill",
    "flood",
    "lighting",
    "outline",
    "stop",
    "stroke",
    "text-decoration",
    "text-emphasis",
    "text-shadow",
];

/// Map a raw declaration value of `property` to its canonical form.
///
/// `kind` is how the reader tagged the value. The canonical kind is decided
/// by the value's actual syntax and the property: `bold` on `font-weight`
/// becomes the number `700`, and a zero on a length-accepting property
/// becomes the length `0px` whatever its unit.
#[must_use]
pub fn normalize(property: &str, raw: &str, kind: ValueKind) -> CanonicalValue {
    let property = property.trim().to_ascii_lowercase();
    let raw = raw.trim();

    let components = parse_component_values(raw);
    let mut significant = components.iter().filter(|c| !c.is_whitespace());
    let single = match (significant.next(), significant.next()) {
        (Some(only), None) => Some(only),
        _ => None,
    };

    match (kind, single) {
        (ValueKind::Separator, _) => CanonicalValue::new(ValueKind::Separator, raw),
        (_, Some(component)) => normalize_component(&property, raw, kind, component),
        (_, None) => passthrough(raw, kind),
    }
}

fn normalize_component(
    property: &str,
    raw: &str,
    kind: ValueKind,
    component: &ComponentValue,
) -> CanonicalValue {
    match component {
        ComponentValue::Token(
            CSSToken::Number(value)
            | CSSToken::Percentage(value)
            | CSSToken::Dimension { value, .. },
        ) if !value.is_finite() => passthrough(raw, kind),
        ComponentValue::Token(CSSToken::Number(value)) => normalize_number(property, *value),
        ComponentValue::Token(CSSToken::Percentage(value)) => {
            normalize_percentage(property, *value)
        }
        ComponentValue::Token(CSSToken::Dimension { value, unit }) => {
            normalize_dimension(property, *value, unit)
        }
        ComponentValue::Token(CSSToken::Ident(name)) => normalize_keyword(property, name),
        ComponentValue::Token(CSSToken::Hash(_)) => {
            parse_single_color(component).map_or_else(
                || passthrough(raw, kind),
                |color| CanonicalValue::new(ValueKind::Color, color.to_canonical()),
            )
        }
        ComponentValue::Token(CSSToken::String(text)) => {
            CanonicalValue::new(ValueKind::String, quote(text))
        }
        ComponentValue::Token(CSSToken::Url(url)) => canonical_url(url),
        ComponentValue::Function { name, value } if name.eq_ignore_ascii_case("url") => {
            match value.iter().find(|c| !c.is_whitespace()) {
                Some(ComponentValue::Token(CSSToken::String(url))) => canonical_url(url),
                _ => passthrough(raw, ValueKind::Url),
            }
        }
        ComponentValue::Function { .. } => parse_single_color(component).map_or_else(
            || passthrough(raw, ValueKind::Function),
            |color| CanonicalValue::new(ValueKind::Color, color.to_canonical()),
        ),
        _ => passthrough(raw, kind),
    }
}

/// [§ 5.4 Numbers](https://www.w3.org/TR/css-values-4/#numbers)
///
/// "For zero lengths the unit identifier is optional"
fn normalize_number(property: &str, value: f64) -> CanonicalValue {
    if value == 0.0 {
        if TIME_PROPERTIES.contains(&property) {
            return CanonicalValue::new(ValueKind::Time, "0ms");
        }
        if ANGLE_PROPERTIES.contains(&property) {
            return CanonicalValue::new(ValueKind::Angle, "0deg");
        }
        if zero_is_length(property) {
            return zero_length();
        }
    }
    CanonicalValue::new(ValueKind::Number, format_number(value))
}

fn normalize_percentage(property: &str, value: f64) -> CanonicalValue {
    if value == 0.0 && zero_is_length(property) {
        return zero_length();
    }
    CanonicalValue::new(ValueKind::Percentage, format!("{}%", format_number(value)))
}

fn normalize_dimension(property: &str, value: f64, unit: &str) -> CanonicalValue {
    let category = unit_category(unit);
    // `fr` is a flex factor, not a dimension we convert, but it is not unknown.
    if category.is_none() && !unit.eq_ignore_ascii_case("fr") {
        warn_once("CSS", &format!("unknown unit '{unit}' in {property}"));
    }
    if value == 0.0 && category == Some(UnitCategory::Length) {
        return zero_length();
    }

    let (value, unit) = to_canonical_unit(value, unit);
    let kind = match category {
        Some(UnitCategory::Length) => ValueKind::Length,
        Some(UnitCategory::Angle) => ValueKind::Angle,
        Some(UnitCategory::Time) => ValueKind::Time,
        Some(UnitCategory::Frequency) => ValueKind::Frequency,
        Some(UnitCategory::Resolution) => ValueKind::Resolution,
        None => ValueKind::Dimension,
    };
    CanonicalValue::new(kind, format!("{}{unit}", format_number(value)))
}

/// [§ 4.1 Pre-defined Keywords](https://www.w3.org/TR/css-values-4/#keywords)
///
/// "All of these keywords are ASCII case-insensitive"
///
/// Keywords are equal only by identity, except for the synonym tables:
/// named colors, `font-weight` names, and position keywords.
fn normalize_keyword(property: &str, name: &str) -> CanonicalValue {
    let keyword = name.to_ascii_lowercase();

    if POSITION_PROPERTIES.contains(&property) {
        // [§ 3.6](https://www.w3.org/TR/css-backgrounds-3/#background-position)
        // "left" computes to 0%, "center" to 50%, "right" to 100%.
        let percentage = match keyword.as_str() {
            "left" | "top" => Some(0.0),
            "center" => Some(50.0),
            "right" | "bottom" => Some(100.0),
            _ => None,
        };
        if let Some(percentage) = percentage {
            return normalize_percentage(property, percentage);
        }
    }

    if property == "font-weight" {
        // [§ 2.2 font-weight](https://www.w3.org/TR/css-fonts-4/#font-weight-prop)
        // "normal: Same as 400. bold: Same as 700."
        match keyword.as_str() {
            "normal" => return CanonicalValue::new(ValueKind::Number, "400"),
            "bold" => return CanonicalValue::new(ValueKind::Number, "700"),
            _ => {}
        }
    }

    if accepts_color(property) {
        let component = ComponentValue::Token(CSSToken::Ident(keyword.clone()));
        if let Some(color) = parse_single_color(&component) {
            return CanonicalValue::new(ValueKind::Color, color.to_canonical());
        }
    }

    CanonicalValue::new(ValueKind::Keyword, keyword)
}

fn canonical_url(url: &str) -> CanonicalValue {
    CanonicalValue::new(ValueKind::Url, format!("url({})", quote(url.trim())))
}

fn zero_length() -> CanonicalValue {
    CanonicalValue::new(ValueKind::Length, "0px")
}

/// Canonical form of anything not understood: ASCII-lowercased with
/// whitespace collapsed. Quoted text keeps its case.
fn passthrough(raw: &str, kind: ValueKind) -> CanonicalValue {
    CanonicalValue::new(kind, collapse(raw))
}

/// Lowercase outside quotes and collapse whitespace, dropping it next to
/// `(`, `)` and `,`.
fn collapse(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut quote: Option<char> = None;
    let mut pending_space = false;

    for c in raw.chars() {
        if let Some(q) = quote {
            out.push(c);
            if c == q {
                quote = None;
            }
            continue;
        }
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() && !matches!(c, ')' | ',') && !out.ends_with(['(', ',']) {
            out.push(' ');
        }
        pending_space = false;
        if matches!(c, '"' | '\'') {
            quote = Some(c);
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}

/// Double-quote a string, escaping `"` and `\`.
fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Whether a zero on `property` is a length.
///
/// Unit-less numeric properties keep the number `0`, time and angle
/// properties have zeros of their own, and a bare `0` never becomes a color.
fn zero_is_length(property: &str) -> bool {
    !UNITLESS_PROPERTIES.contains(&property)
        && !TIME_PROPERTIES.contains(&property)
        && !ANGLE_PROPERTIES.contains(&property)
        && property != "color"
}

/// Whether `property` takes colors, so that a named color keyword on it is a
/// color and not an arbitrary identifier.
fn accepts_color(property: &str) -> bool {
    property == "color"
        || property.ends_with("-color")
        || COLOR_PROPERTY_PREFIXES
            .iter()
            .any(|prefix| property.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse() {
        assert_eq!(collapse("  Linear-Gradient( RED ,  Blue )  "), "linear-gradient(red,blue)");
        assert_eq!(collapse("calc(100% - 10px)"), "calc(100% - 10px)");
        assert_eq!(collapse("attr(Data-X 'Keep Case')"), "attr(data-x 'Keep Case')");
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote(r#"a"b\c"#), r#""a\"b\\c""#);
    }

    #[test]
    fn test_accepts_color() {
        assert!(accepts_color("color"));
        assert!(accepts_color("background-color"));
        assert!(accepts_color("border-top"));
        assert!(accepts_color("-webkit-tap-highlight-color"));
        assert!(!accepts_color("font-family"));
        assert!(!accepts_color("animation-name"));
    }
}
