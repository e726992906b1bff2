//! Integration tests for the CSS tokenizer.

use magpie_common::SourceLocation;
use magpie_css::tokenizer::{CSSToken, CSSTokenizer, LocatedToken};

/// Helper to tokenize a string and return the located tokens
fn tokenize_located(input: &str) -> Vec<LocatedToken> {
    let mut tokenizer = CSSTokenizer::new(input);
    tokenizer.run();
    tokenizer.into_tokens()
}

/// Helper to tokenize a string and return the bare tokens
fn tokenize(input: &str) -> Vec<CSSToken> {
    tokenize_located(input).into_iter().map(|t| t.token).collect()
}

#[test]
fn test_empty_input_is_eof() {
    let tokens = tokenize("");
    assert_eq!(tokens, vec![CSSToken::EOF]);
}

#[test]
fn test_whitespace() {
    let tokens = tokenize("   \t\n  ");
    assert_eq!(tokens.len(), 2); // whitespace + EOF
    assert!(matches!(tokens[0], CSSToken::Whitespace));
    assert!(matches!(tokens[1], CSSToken::EOF));
}

#[test]
fn test_ident_with_hyphen() {
    let tokens = tokenize("background-color");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        CSSToken::Ident(name) => assert_eq!(name, "background-color"),
        _ => panic!("Expected Ident token"),
    }
}

#[test]
fn test_function() {
    let tokens = tokenize("rgb(");
    match &tokens[0] {
        CSSToken::Function(name) => assert_eq!(name, "rgb"),
        _ => panic!("Expected Function token"),
    }
}

#[test]
fn test_at_keyword() {
    let tokens = tokenize("@media");
    assert_eq!(tokens[0], CSSToken::AtKeyword("media".to_string()));
}

#[test]
fn test_hash() {
    let tokens = tokenize("#ff0000");
    assert_eq!(tokens[0], CSSToken::Hash("ff0000".to_string()));
}

#[test]
fn test_numeric_tokens() {
    assert_eq!(tokenize("42")[0], CSSToken::Number(42.0));
    assert_eq!(tokenize("-1.5")[0], CSSToken::Number(-1.5));
    assert_eq!(tokenize("50%")[0], CSSToken::Percentage(50.0));
    assert_eq!(
        tokenize("12pt")[0],
        CSSToken::Dimension {
            value: 12.0,
            unit: "pt".to_string()
        }
    );
}

#[test]
fn test_strings() {
    assert_eq!(tokenize("\"hello\"")[0], CSSToken::String("hello".to_string()));
    assert_eq!(tokenize("'world'")[0], CSSToken::String("world".to_string()));
}

#[test]
fn test_unquoted_url() {
    assert_eq!(tokenize("url(a.png)")[0], CSSToken::Url("a.png".to_string()));
}

#[test]
fn test_quoted_url_is_function() {
    let tokens = tokenize("url(\"a.png\")");
    assert_eq!(tokens[0], CSSToken::Function("url".to_string()));
    assert_eq!(tokens[1], CSSToken::String("a.png".to_string()));
    assert_eq!(tokens[2], CSSToken::RightParen);
}

#[test]
fn test_comments_are_skipped() {
    let tokens = tokenize("/* a */color/* b */");
    assert_eq!(tokens, vec![CSSToken::Ident("color".to_string()), CSSToken::EOF]);
}

#[test]
fn test_punctuation() {
    let tokens = tokenize("{:;,}");
    assert_eq!(
        tokens,
        vec![
            CSSToken::LeftBrace,
            CSSToken::Colon,
            CSSToken::Semicolon,
            CSSToken::Comma,
            CSSToken::RightBrace,
            CSSToken::EOF,
        ]
    );
}

#[test]
fn test_spans_exclude_comments() {
    let tokens = tokenize_located("a /* x */ b");
    // a, ws, ws, b, EOF: the comment splits the whitespace run.
    let b = tokens
        .iter()
        .find(|t| t.token == CSSToken::Ident("b".to_string()))
        .expect("b token");
    assert_eq!(b.start.offset, 10);
    assert_eq!(b.end, 11);
}

#[test]
fn test_locations_track_lines() {
    let tokens = tokenize_located("a\n  b");
    let b = tokens
        .iter()
        .find(|t| t.token == CSSToken::Ident("b".to_string()))
        .expect("b token");
    assert_eq!(b.start, SourceLocation::new(4, 2, 3));
}
