//! Integration tests for the stylesheet reader.

use magpie_common::SourceLocation;
use magpie_css::parser::CSSParser;
use magpie_css::tokenizer::CSSTokenizer;
use magpie_css::{Stylesheet, ValueKind, parse_stylesheet};

fn parse_css(css: &str) -> Stylesheet {
    let mut tokenizer = CSSTokenizer::new(css);
    tokenizer.run();
    let mut parser = CSSParser::new(tokenizer);
    parser.parse_stylesheet()
}

#[test]
fn test_empty_stylesheet() {
    let sheet = parse_css("");
    assert!(sheet.is_empty());
    assert_eq!(sheet.declaration_count(), 0);
}

#[test]
fn test_simple_rule() {
    let sheet = parse_css(".a { color: red; margin: 0 auto }");
    assert_eq!(sheet.len(), 1);

    let selector = &sheet.selectors()[0];
    assert_eq!(selector.text, ".a");
    assert_eq!(selector.media, None);
    assert_eq!(selector.declarations.len(), 2);

    let color = &selector.declarations[0];
    assert_eq!(color.property, "color");
    assert_eq!(color.values.len(), 1);
    assert_eq!(color.values[0].raw, "red");
    assert_eq!(color.values[0].kind, ValueKind::Color);

    let margin = &selector.declarations[1];
    assert_eq!(margin.values.len(), 2);
    assert_eq!(margin.values[0].raw, "0");
    assert_eq!(margin.values[1].raw, "auto");
    assert_eq!(margin.to_string(), "margin: 0 auto");
}

#[test]
fn test_selector_list_is_one_selector() {
    let sheet = parse_css(".a,\n  .b   p { color: red }");
    assert_eq!(sheet.len(), 1);
    assert_eq!(sheet.selectors()[0].text, ".a, .b p");
}

#[test]
fn test_same_text_at_two_places_is_two_selectors() {
    let sheet = parse_css(".a { color: red }\n.a { color: red }");
    assert_eq!(sheet.len(), 2);
    let first = &sheet.selectors()[0];
    let second = &sheet.selectors()[1];
    assert_eq!(first.text, second.text);
    assert_ne!(first.identity(), second.identity());
    assert_eq!(first.location, SourceLocation::START);
    assert_eq!(second.location.line, 2);
    assert_eq!(second.identity(), ".a (2:1)");
}

#[test]
fn test_property_is_lowercased() {
    let sheet = parse_css(".a { COLOR: Red }");
    let decl = &sheet.selectors()[0].declarations[0];
    assert_eq!(decl.property, "color");
    // Raw text is kept as written.
    assert_eq!(decl.values[0].raw, "Red");
}

#[test]
fn test_important() {
    let sheet = parse_css(".a { color: red !important; margin: 0 ! IMPORTANT }");
    let decls = &sheet.selectors()[0].declarations;
    assert!(decls[0].important);
    assert_eq!(decls[0].values.len(), 1);
    assert!(decls[1].important);
    assert_eq!(decls[1].values.len(), 1);
    assert_eq!(decls[0].to_string(), "color: red !important");
}

#[test]
fn test_media_context() {
    let sheet = parse_css("@media screen and (max-width: 600px) { .a { color: red } }\n.b { color: red }");
    assert_eq!(sheet.len(), 2);
    let a = &sheet.selectors()[0];
    assert_eq!(a.media.as_deref(), Some("@media screen and (max-width: 600px)"));
    assert!(a.identity().starts_with("@media screen and (max-width: 600px) .a ("));
    assert_eq!(sheet.selectors()[1].media, None);
}

#[test]
fn test_nested_conditional_rules() {
    let sheet = parse_css("@supports (display: grid) { @media print { .a { color: red } } }");
    assert_eq!(sheet.len(), 1);
    assert_eq!(
        sheet.selectors()[0].media.as_deref(),
        Some("@supports (display: grid) @media print")
    );
}

#[test]
fn test_other_at_rules_are_skipped() {
    let sheet = parse_css(
        "@import url(a.css);\n\
         @font-face { font-family: x; src: url(x.woff) }\n\
         @keyframes spin { from { opacity: 0 } to { opacity: 1 } }\n\
         .a { color: red }",
    );
    assert_eq!(sheet.len(), 1);
    assert_eq!(sheet.selectors()[0].text, ".a");
}

#[test]
fn test_comma_separated_values() {
    let sheet = parse_css(".a { font-family: Arial, \"Helvetica Neue\", sans-serif }");
    let decl = &sheet.selectors()[0].declarations[0];
    let kinds: Vec<ValueKind> = decl.values.iter().map(|v| v.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ValueKind::Keyword,
            ValueKind::Separator,
            ValueKind::String,
            ValueKind::Separator,
            ValueKind::Keyword,
        ]
    );
    assert_eq!(decl.value_text(), "Arial, \"Helvetica Neue\", sans-serif");
}

#[test]
fn test_function_values_keep_raw_text() {
    let sheet = parse_css(".a { background: linear-gradient(to right, red 0%, blue 100%) }");
    let decl = &sheet.selectors()[0].declarations[0];
    assert_eq!(decl.values.len(), 1);
    assert_eq!(decl.values[0].raw, "linear-gradient(to right, red 0%, blue 100%)");
    assert_eq!(decl.values[0].kind, ValueKind::Function);
}

#[test]
fn test_trailing_comment_not_in_raw_value() {
    let sheet = parse_css(".a { color: red /* note */ ; }");
    let decl = &sheet.selectors()[0].declarations[0];
    assert_eq!(decl.values[0].raw, "red");
}

#[test]
fn test_malformed_declarations_are_skipped() {
    let sheet = parse_css(".a { color red; : blue; margin: ; padding: 1px }");
    let decls = &sheet.selectors()[0].declarations;
    assert_eq!(decls.len(), 1);
    assert_eq!(decls[0].property, "padding");
}

#[test]
fn test_rule_without_selector_is_skipped() {
    let sheet = parse_css("{ color: red } .a { color: blue }");
    assert_eq!(sheet.len(), 1);
    assert_eq!(sheet.selectors()[0].text, ".a");
}

#[test]
fn test_unterminated_rule_keeps_declarations() {
    let sheet = parse_stylesheet(".a { color: red");
    assert_eq!(sheet.len(), 1);
    assert_eq!(sheet.declaration_count(), 1);
}

#[test]
fn test_declaration_location() {
    let sheet = parse_css(".a {\n  color: red;\n}");
    let decl = &sheet.selectors()[0].declarations[0];
    assert_eq!(decl.location.line, 2);
    assert_eq!(decl.location.column, 3);
    assert_eq!(decl.selector, sheet.selectors()[0].id);
}
