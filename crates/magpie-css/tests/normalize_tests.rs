//! Integration tests for value canonicalization and declaration equivalence.

use magpie_css::parser::parse_component_values;
use magpie_css::values::color::parse_single_color;
use magpie_css::values::{ColorValue, normalize};
use magpie_css::{CanonicalValue, ValueKind, parse_stylesheet};
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

fn canonical(property: &str, raw: &str, kind: ValueKind) -> CanonicalValue {
    normalize(property, raw, kind)
}

fn color(raw: &str) -> CanonicalValue {
    canonical("color", raw, ValueKind::Color)
}

#[test]
fn test_color_notations_are_equivalent() {
    let red = color("red");
    assert_eq!(red, CanonicalValue::new(ValueKind::Color, "rgba(255, 0, 0, 1)"));
    assert_eq!(color("#ff0000"), red);
    assert_eq!(color("#F00"), red);
    assert_eq!(color("#ff0000ff"), red);
    assert_eq!(color("rgb(255,0,0)"), red);
    assert_eq!(color("rgb(255 0 0)"), red);
    assert_eq!(color("rgba(100%, 0%, 0%, 1)"), red);
    assert_eq!(color("hsl(0, 100%, 50%)"), red);
    assert_eq!(color("hsl(0deg 100% 50% / 1)"), red);
    assert_eq!(color("RED"), red);
}

#[test]
fn test_blocks_are_not_colors() {
    let components = parse_component_values("[red] (blue)");
    let blocks: Vec<_> = components.iter().filter(|c| !c.is_whitespace()).collect();
    assert_eq!(blocks.len(), 2);
    assert!(blocks.iter().all(|block| parse_single_color(block).is_none()));
    assert_eq!(color("rgb((255) 0 0)").kind, ValueKind::Function);
}

#[test]
fn test_distinct_colors_differ() {
    assert_ne!(color("red"), color("#fe0000"));
    assert_ne!(color("red"), color("rgba(255, 0, 0, 0.5)"));
}

#[test]
fn test_transparent() {
    assert_eq!(color("transparent"), color("rgba(0, 0, 0, 0)"));
    assert_eq!(color("transparent").text, "rgba(0, 0, 0, 0)");
}

#[test]
fn test_alpha_prints_with_four_decimals() {
    assert_eq!(color("rgba(0, 0, 0, 0.5)").text, "rgba(0, 0, 0, 0.502)");
}

#[test]
fn test_named_color_on_non_color_property_is_keyword() {
    let value = canonical("animation-name", "red", ValueKind::Color);
    assert_eq!(value, CanonicalValue::new(ValueKind::Keyword, "red"));
}

#[test]
fn test_absolute_lengths_convert_to_px() {
    let sixteen = canonical("font-size", "16px", ValueKind::Length);
    assert_eq!(sixteen, CanonicalValue::new(ValueKind::Length, "16px"));
    assert_eq!(canonical("font-size", "12pt", ValueKind::Length), sixteen);
    assert_eq!(canonical("font-size", "1pc", ValueKind::Length), sixteen);
    assert_eq!(canonical("width", "1in", ValueKind::Length).text, "96px");
    assert_eq!(canonical("width", "2.54cm", ValueKind::Length).text, "96px");
    assert_eq!(canonical("width", "1pt", ValueKind::Length).text, "1.3333px");
}

#[test]
fn test_relative_lengths_keep_their_unit() {
    assert_eq!(canonical("width", "2EM", ValueKind::Length).text, "2em");
    assert_ne!(
        canonical("width", "1em", ValueKind::Length),
        canonical("width", "16px", ValueKind::Length)
    );
}

#[test]
fn test_other_unit_categories() {
    assert_eq!(canonical("rotate", "0.5turn", ValueKind::Angle).text, "180deg");
    assert_eq!(canonical("rotate", "200grad", ValueKind::Angle).text, "180deg");
    assert_eq!(
        canonical("transition-duration", "0.3s", ValueKind::Time),
        canonical("transition-duration", "300ms", ValueKind::Time)
    );
    assert_eq!(canonical("pitch", "1kHz", ValueKind::Frequency).text, "1000hz");
    assert_eq!(canonical("image-resolution", "96dpi", ValueKind::Resolution).text, "1dppx");
}

#[test]
fn test_zero_lengths() {
    let zero = canonical("margin", "0px", ValueKind::Length);
    assert_eq!(zero, CanonicalValue::new(ValueKind::Length, "0px"));
    assert_eq!(canonical("margin", "0", ValueKind::Number), zero);
    assert_eq!(canonical("margin", "0em", ValueKind::Length), zero);
    assert_eq!(canonical("margin", "-0", ValueKind::Number), zero);
    assert_eq!(canonical("margin", "0%", ValueKind::Percentage), zero);
}

#[test]
fn test_zero_on_unitless_property_stays_number() {
    let zero = canonical("opacity", "0", ValueKind::Number);
    assert_eq!(zero, CanonicalValue::new(ValueKind::Number, "0"));
    assert_eq!(canonical("z-index", "0", ValueKind::Number).kind, ValueKind::Number);
    assert_ne!(zero, canonical("margin", "0", ValueKind::Number));
}

#[test]
fn test_zero_on_time_and_angle_properties() {
    let delay = canonical("transition-delay", "0", ValueKind::Number);
    assert_eq!(delay, CanonicalValue::new(ValueKind::Time, "0ms"));
    assert_eq!(canonical("transition-delay", "0s", ValueKind::Time), delay);
    assert_eq!(canonical("animation-duration", "0", ValueKind::Number).text, "0ms");

    let rotate = canonical("rotate", "0", ValueKind::Number);
    assert_eq!(rotate, CanonicalValue::new(ValueKind::Angle, "0deg"));
    assert_eq!(canonical("rotate", "0deg", ValueKind::Angle), rotate);
    assert_eq!(canonical("rotate", "0turn", ValueKind::Angle), rotate);
    assert_ne!(canonical("rotate", "0", ValueKind::Number).kind, ValueKind::Length);
}

#[test]
fn test_overflowing_numbers_pass_through() {
    let huge = canonical("width", "1e999px", ValueKind::Length);
    assert_eq!(huge, CanonicalValue::new(ValueKind::Length, "1e999px"));
    assert_eq!(canonical("width", &huge.text, huge.kind), huge);

    let number = canonical("z-index", "1E999", ValueKind::Number);
    assert_eq!(number.text, "1e999");
    assert_eq!(canonical("z-index", &number.text, number.kind), number);

    let percentage = canonical("width", "-1e999%", ValueKind::Percentage);
    assert_eq!(percentage.text, "-1e999%");
}

#[test]
fn test_numbers_print_at_most_four_decimals() {
    assert_eq!(canonical("opacity", "0.50", ValueKind::Number).text, "0.5");
    assert_eq!(canonical("line-height", "1.333333", ValueKind::Number).text, "1.3333");
    assert_eq!(canonical("opacity", ".5", ValueKind::Number), canonical("opacity", "0.5", ValueKind::Number));
}

#[test]
fn test_keywords_compare_by_identity() {
    assert_eq!(
        canonical("display", "BLOCK", ValueKind::Keyword),
        canonical("display", "block", ValueKind::Keyword)
    );
    assert_ne!(
        canonical("display", "block", ValueKind::Keyword),
        canonical("display", "flex", ValueKind::Keyword)
    );
}

#[test]
fn test_font_weight_synonyms() {
    assert_eq!(
        canonical("font-weight", "bold", ValueKind::Keyword),
        canonical("font-weight", "700", ValueKind::Number)
    );
    assert_eq!(
        canonical("font-weight", "normal", ValueKind::Keyword),
        canonical("font-weight", "400", ValueKind::Number)
    );
    // Only on font-weight.
    assert_eq!(canonical("white-space", "normal", ValueKind::Keyword).kind, ValueKind::Keyword);
}

#[test]
fn test_position_keywords() {
    let prop = "background-position-x";
    assert_eq!(canonical(prop, "center", ValueKind::Keyword), canonical(prop, "50%", ValueKind::Percentage));
    assert_eq!(canonical(prop, "right", ValueKind::Keyword), canonical(prop, "100%", ValueKind::Percentage));
    assert_eq!(canonical(prop, "left", ValueKind::Keyword), canonical(prop, "0", ValueKind::Number));
    // Only on position properties.
    assert_eq!(canonical("text-align", "center", ValueKind::Keyword).kind, ValueKind::Keyword);
}

#[test]
fn test_strings_keep_case_and_normalize_quotes() {
    let double = canonical("content", "\"Hi\"", ValueKind::String);
    assert_eq!(double, CanonicalValue::new(ValueKind::String, "\"Hi\""));
    assert_eq!(canonical("content", "'Hi'", ValueKind::String), double);
    assert_ne!(canonical("content", "'hi'", ValueKind::String), double);
}

#[test]
fn test_urls() {
    let url = canonical("background-image", "url(a.png)", ValueKind::Url);
    assert_eq!(url, CanonicalValue::new(ValueKind::Url, "url(\"a.png\")"));
    assert_eq!(canonical("background-image", "url('a.png')", ValueKind::Url), url);
    assert_eq!(canonical("background-image", "url( \"a.png\" )", ValueKind::Url), url);
}

#[test]
fn test_unknown_values_pass_through() {
    let value = canonical("width", "calc(100% - 10px)", ValueKind::Function);
    assert_eq!(value, CanonicalValue::new(ValueKind::Function, "calc(100% - 10px)"));
    assert_eq!(
        canonical("width", "CALC( 100%  -  10px )", ValueKind::Function),
        value
    );
    assert_eq!(canonical("width", "5foo", ValueKind::Dimension).text, "5foo");
    assert_eq!(canonical("grid-template-columns", "1fr", ValueKind::Dimension).text, "1fr");
}

#[test]
fn test_separators_pass_through() {
    assert_eq!(
        canonical("font-family", ",", ValueKind::Separator),
        CanonicalValue::new(ValueKind::Separator, ",")
    );
}

#[test]
fn test_equivalent_declarations_across_selectors() {
    let sheet = parse_stylesheet(
        ".a { color: red; margin: 0 }\n\
         .b { color: #f00; margin: 0px }\n\
         .c { color: red !important; margin: 0 1px }",
    );
    let [a, b, c] = sheet.selectors() else {
        panic!("expected three selectors");
    };
    assert!(a.declarations[0].is_equivalent(&b.declarations[0]));
    assert!(a.declarations[1].is_equivalent(&b.declarations[1]));
    assert_eq!(a.declarations[0].shape(), b.declarations[0].shape());
    // Importance is part of the shape.
    assert!(!a.declarations[0].is_equivalent(&c.declarations[0]));
    // Value count matters.
    assert!(!a.declarations[1].is_equivalent(&c.declarations[1]));
    assert_eq!(a.declarations[0].shape().key(), "color: rgba(255, 0, 0, 1)");
}

#[test]
fn test_named_color_lookup() {
    assert_eq!(ColorValue::from_named("RebeccaPurple"), ColorValue::from_hex("663399"));
    assert!(ColorValue::is_named("transparent"));
    assert!(!ColorValue::is_named("blurple"));
}

/// A declaration value drawn from a fixed vocabulary of real CSS syntax.
#[derive(Debug, Clone)]
struct SampleValue {
    property: &'static str,
    raw: String,
}

const PROPERTIES: &[&str] = &[
    "color",
    "margin",
    "opacity",
    "font-weight",
    "background-position",
    "content",
    "display",
    "width",
];

const RAW_TEMPLATES: &[&str] = &[
    "red",
    "#abc",
    "#AABBCC80",
    "rgb(1, 2, 3)",
    "rgba(10%, 20%, 30%, 0.25)",
    "hsl(120 50% 25%)",
    "transparent",
    "bold",
    "normal",
    "left",
    "center",
    "\"quoted text\"",
    "'It''s'",
    "url(img.png)",
    "url( 'x y.png' )",
    "calc(1px + 2EM)",
    "BLOCK",
    "inherit",
];

impl Arbitrary for SampleValue {
    fn arbitrary(g: &mut Gen) -> Self {
        let property = *g.choose(PROPERTIES).unwrap_or(&"width");
        let raw = if bool::arbitrary(g) {
            (*g.choose(RAW_TEMPLATES).unwrap_or(&"auto")).to_string()
        } else {
            let units = ["", "%", "px", "pt", "in", "em", "deg", "turn", "s", "ms", "dpi"];
            let unit = *g.choose(&units).unwrap_or(&"");
            let whole = i32::from(i16::arbitrary(g));
            let frac = u16::arbitrary(g) % 1000;
            format!("{whole}.{frac:03}{unit}")
        };
        Self { property, raw }
    }
}

fn kind_of(raw: &str) -> ValueKind {
    parse_component_values(raw)
        .iter()
        .find(|c| !c.is_whitespace())
        .map_or(ValueKind::Keyword, magpie_css::ComponentValue::value_kind)
}

#[quickcheck]
fn prop_normalize_is_idempotent(sample: SampleValue) -> bool {
    let once = normalize(sample.property, &sample.raw, kind_of(&sample.raw));
    let twice = normalize(sample.property, &once.text, once.kind);
    once == twice
}

#[quickcheck]
fn prop_normalize_ignores_ascii_case_outside_strings(sample: SampleValue) -> bool {
    // Quoted text and URLs are case-sensitive.
    if sample.raw.contains(['"', '\'']) || sample.raw.starts_with("url(") {
        return true;
    }
    let upper = sample.raw.to_ascii_uppercase();
    normalize(sample.property, &sample.raw, kind_of(&sample.raw))
        == normalize(sample.property, &upper, kind_of(&upper))
}
