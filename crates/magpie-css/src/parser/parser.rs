//! CSS Parser per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
//!
//! "The input to the parsing stage is a stream of tokens from the tokenization stage."
//!
//! The parser is error tolerant in the way CSS Syntax prescribes: a malformed
//! rule or declaration is dropped and parsing resumes at the next one. Every
//! drop is reported once through [`warn_once`].

use magpie_common::SourceLocation;
use magpie_common::warning::warn_once;

use crate::model::{SelectorId, Stylesheet};
use crate::tokenizer::{CSSToken, CSSTokenizer, LocatedToken};
use crate::values::{ColorValue, UnitCategory, ValueKind, unit_category};

/// Conditional group rules whose blocks hold style rules we read.
///
/// [CSS Conditional Rules Level 3](https://www.w3.org/TR/css-conditional-3/)
const CONDITIONAL_GROUP_RULES: &[&str] = &["media", "supports", "container", "layer"];

/// Returned by `peek` past the end of the token list.
static EOF_TOKEN: CSSToken = CSSToken::EOF;

/// [§ 5.4.7 Consume a component value](https://www.w3.org/TR/css-syntax-3/#consume-component-value)
///
/// A component value in a declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentValue {
    /// A preserved token.
    Token(CSSToken),
    /// A function with its contents.
    Function {
        /// The function name.
        name: String,
        /// The function arguments, whitespace included.
        value: Vec<ComponentValue>,
    },
    /// A `[...]`, `(...)` or `{...}` simple block.
    Block {
        /// The opening token character.
        token: char,
        /// The block contents.
        value: Vec<ComponentValue>,
    },
}

impl ComponentValue {
    /// Check if this is a whitespace token.
    #[must_use]
    pub const fn is_whitespace(&self) -> bool {
        matches!(self, Self::Token(CSSToken::Whitespace))
    }

    /// The kind a declaration value made of this component is read as.
    #[must_use]
    pub fn value_kind(&self) -> ValueKind {
        match self {
            Self::Token(token) => match token {
                CSSToken::Number(_) => ValueKind::Number,
                CSSToken::Percentage(_) => ValueKind::Percentage,
                CSSToken::Dimension { unit, .. } => match unit_category(unit) {
                    Some(UnitCategory::Length) => ValueKind::Length,
                    Some(UnitCategory::Angle) => ValueKind::Angle,
                    Some(UnitCategory::Time) => ValueKind::Time,
                    Some(UnitCategory::Frequency) => ValueKind::Frequency,
                    Some(UnitCategory::Resolution) => ValueKind::Resolution,
                    None => ValueKind::Dimension,
                },
                CSSToken::Hash(value) if ColorValue::from_hex(value).is_some() => ValueKind::Color,
                CSSToken::Ident(name) if ColorValue::is_named(name) => ValueKind::Color,
                CSSToken::String(_) => ValueKind::String,
                CSSToken::Url(_) => ValueKind::Url,
                CSSToken::Comma | CSSToken::Delim('/') => ValueKind::Separator,
                _ => ValueKind::Keyword,
            },
            Self::Function { name, .. } => match name.to_ascii_lowercase().as_str() {
                "rgb" | "rgba" | "hsl" | "hsla" => ValueKind::Color,
                "url" => ValueKind::Url,
                _ => ValueKind::Function,
            },
            Self::Block { .. } => ValueKind::Function,
        }
    }
}

/// A component value with the character span it was parsed from.
#[derive(Debug, Clone)]
struct Spanned {
    value: ComponentValue,
    start: usize,
    end: usize,
}

/// CSS parser
pub struct CSSParser {
    tokens: Vec<LocatedToken>,
    input: Vec<char>,
    position: usize,
}

impl CSSParser {
    /// Create a parser over a finished tokenizer's tokens and input.
    #[must_use]
    pub fn new(tokenizer: CSSTokenizer) -> Self {
        let input = tokenizer.input().to_vec();
        Self {
            tokens: tokenizer.into_tokens(),
            input,
            position: 0,
        }
    }

    /// [§ 5.3.3 Parse a stylesheet](https://www.w3.org/TR/css-syntax-3/#parse-stylesheet)
    pub fn parse_stylesheet(&mut self) -> Stylesheet {
        let mut stylesheet = Stylesheet::new();
        self.consume_list_of_rules(&mut stylesheet, None, true);
        stylesheet
    }

    /// Parse the whole input as a sequence of component values, whitespace
    /// included.
    pub fn parse_component_values(&mut self) -> Vec<ComponentValue> {
        let mut values = Vec::new();
        while !self.at_eof() {
            match self.consume_component_value() {
                Some(spanned) => values.push(spanned.value),
                None => break,
            }
        }
        values
    }

    /// [§ 5.4.1 Consume a list of rules](https://www.w3.org/TR/css-syntax-3/#consume-list-of-rules)
    ///
    /// Nested lists end at the `}` closing their block; the top level ends at EOF.
    fn consume_list_of_rules(
        &mut self,
        stylesheet: &mut Stylesheet,
        media: Option<&str>,
        top_level: bool,
    ) {
        loop {
            match self.peek() {
                CSSToken::Whitespace | CSSToken::Semicolon => self.advance(),
                CSSToken::EOF => return,
                CSSToken::RightBrace if !top_level => {
                    self.advance();
                    return;
                }
                CSSToken::RightBrace => {
                    warn_once("CSS", &format!("stray '}}' at {}", self.location()));
                    self.advance();
                }
                CSSToken::AtKeyword(_) => self.consume_at_rule(stylesheet, media),
                _ => self.consume_qualified_rule(stylesheet, media),
            }
        }
    }

    /// [§ 5.4.2 Consume an at-rule](https://www.w3.org/TR/css-syntax-3/#consume-at-rule)
    ///
    /// Conditional group rules are descended into; every other at-rule is
    /// skipped whole.
    fn consume_at_rule(&mut self, stylesheet: &mut Stylesheet, media: Option<&str>) {
        let location = self.location();
        let CSSToken::AtKeyword(name) = self.peek().clone() else {
            return;
        };
        self.advance();

        let prelude_start = self.offset();
        loop {
            match self.peek() {
                // "<semicolon-token>": "Return the at-rule."
                CSSToken::Semicolon => {
                    self.advance();
                    return;
                }
                CSSToken::EOF => return,
                CSSToken::LeftBrace => break,
                _ => {
                    let _ = self.consume_component_value();
                }
            }
        }
        let prelude = collapse_whitespace(&self.slice(prelude_start, self.offset()));
        self.advance(); // {

        if CONDITIONAL_GROUP_RULES.contains(&name.to_ascii_lowercase().as_str()) {
            let condition = format!("@{} {prelude}", name.to_ascii_lowercase());
            let context = match media {
                Some(outer) => format!("{outer} {}", condition.trim_end()),
                None => condition.trim_end().to_string(),
            };
            self.consume_list_of_rules(stylesheet, Some(&context), false);
        } else {
            warn_once("CSS", &format!("skipped @{name} rule at {location}"));
            self.skip_block_contents();
        }
    }

    /// [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-qualified-rule)
    fn consume_qualified_rule(&mut self, stylesheet: &mut Stylesheet, media: Option<&str>) {
        let location = self.location();
        let start = self.offset();

        loop {
            match self.peek() {
                // "<EOF-token>": "This is a parse error. Return nothing."
                CSSToken::EOF => {
                    warn_once("CSS", &format!("unterminated rule at {location}"));
                    return;
                }
                CSSToken::LeftBrace => break,
                _ => {
                    let _ = self.consume_component_value();
                }
            }
        }

        let text = selector_list_text(&self.slice(start, self.offset()));
        self.advance(); // {

        if text.is_empty() {
            warn_once("CSS", &format!("rule without a selector at {location}"));
            self.skip_block_contents();
            return;
        }

        let selector = stylesheet.add_selector(text, media.map(str::to_string), location);
        self.consume_list_of_declarations(stylesheet, selector);
    }

    /// [§ 5.4.5 Consume a list of declarations](https://www.w3.org/TR/css-syntax-3/#consume-list-of-declarations)
    ///
    /// Consumes up to and including the `}` closing the block.
    fn consume_list_of_declarations(&mut self, stylesheet: &mut Stylesheet, selector: SelectorId) {
        loop {
            match self.peek() {
                CSSToken::Whitespace | CSSToken::Semicolon => self.advance(),
                CSSToken::EOF => return,
                CSSToken::RightBrace => {
                    self.advance();
                    return;
                }
                CSSToken::Ident(_) => self.consume_declaration(stylesheet, selector),
                // Nested rules are not part of the flat object model.
                _ => {
                    warn_once("CSS", &format!("skipped invalid declaration at {}", self.location()));
                    self.skip_declaration();
                }
            }
        }
    }

    /// [§ 5.4.6 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-declaration)
    fn consume_declaration(&mut self, stylesheet: &mut Stylesheet, selector: SelectorId) {
        let location = self.location();
        let CSSToken::Ident(name) = self.peek().clone() else {
            return;
        };
        self.advance();
        self.skip_whitespace();

        // "If the next input token is anything other than a <colon-token>, this is a parse error.
        // Return nothing."
        if *self.peek() != CSSToken::Colon {
            warn_once("CSS", &format!("expected ':' after '{name}' at {location}"));
            self.skip_declaration();
            return;
        }
        self.advance();

        let mut values = Vec::new();
        while !matches!(
            self.peek(),
            CSSToken::EOF | CSSToken::Semicolon | CSSToken::RightBrace
        ) {
            match self.consume_component_value() {
                Some(spanned) if !spanned.value.is_whitespace() => values.push(spanned),
                Some(_) => {}
                None => break,
            }
        }

        // "If the last two non-<whitespace-token>s in the declaration's value are a
        // <delim-token> with the value "!" followed by an <ident-token> with a value
        // that is an ASCII case-insensitive match for "important", remove them."
        let important = is_important_suffix(&values);
        if important {
            values.truncate(values.len() - 2);
        }

        if values.is_empty() {
            warn_once("CSS", &format!("declaration '{name}' without a value at {location}"));
            return;
        }

        let values: Vec<(String, ValueKind)> = values
            .iter()
            .map(|v| (self.slice(v.start, v.end), v.value.value_kind()))
            .collect();
        stylesheet.add_declaration(selector, &name, &values, important, location);
    }

    /// [§ 5.4.7 Consume a component value](https://www.w3.org/TR/css-syntax-3/#consume-component-value)
    ///
    /// Returns `None` only at EOF.
    fn consume_component_value(&mut self) -> Option<Spanned> {
        let start = self.offset();
        let token = self.peek().clone();
        match token {
            CSSToken::EOF => None,
            CSSToken::Function(name) => {
                self.advance();
                let value = self.consume_until(&CSSToken::RightParen);
                Some(Spanned {
                    value: ComponentValue::Function { name, value },
                    start,
                    end: self.previous_end(),
                })
            }
            CSSToken::LeftBracket | CSSToken::LeftParen | CSSToken::LeftBrace => {
                self.advance();
                let (open, close) = match token {
                    CSSToken::LeftBracket => ('[', CSSToken::RightBracket),
                    CSSToken::LeftParen => ('(', CSSToken::RightParen),
                    _ => ('{', CSSToken::RightBrace),
                };
                let value = self.consume_until(&close);
                Some(Spanned {
                    value: ComponentValue::Block { token: open, value },
                    start,
                    end: self.previous_end(),
                })
            }
            token => {
                self.advance();
                Some(Spanned {
                    value: ComponentValue::Token(token),
                    start,
                    end: self.previous_end(),
                })
            }
        }
    }

    /// [§ 5.4.8 Consume a simple block](https://www.w3.org/TR/css-syntax-3/#consume-simple-block)
    ///
    /// Consumes component values up to and including `ending`, or to EOF.
    fn consume_until(&mut self, ending: &CSSToken) -> Vec<ComponentValue> {
        let mut value = Vec::new();
        loop {
            if self.peek() == ending {
                self.advance();
                return value;
            }
            match self.consume_component_value() {
                Some(spanned) => value.push(spanned.value),
                None => return value,
            }
        }
    }

    /// Skip the remains of a `{}` block whose `{` is already consumed.
    fn skip_block_contents(&mut self) {
        let _ = self.consume_until(&CSSToken::RightBrace);
    }

    /// Skip to the end of the current declaration, leaving `;` or `}` unconsumed.
    fn skip_declaration(&mut self) {
        loop {
            match self.peek() {
                CSSToken::EOF | CSSToken::Semicolon | CSSToken::RightBrace => return,
                CSSToken::LeftBrace => {
                    self.advance();
                    self.skip_block_contents();
                }
                _ => {
                    let _ = self.consume_component_value();
                }
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_whitespace() {
            self.advance();
        }
    }

    fn peek(&self) -> &CSSToken {
        self.tokens
            .get(self.position)
            .map_or(&EOF_TOKEN, |t| &t.token)
    }

    fn at_eof(&self) -> bool {
        self.peek().is_eof()
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    /// Location of the next token.
    fn location(&self) -> SourceLocation {
        self.tokens
            .get(self.position)
            .or_else(|| self.tokens.last())
            .map_or(SourceLocation::START, |t| t.start)
    }

    /// Character offset of the next token.
    fn offset(&self) -> usize {
        self.location().offset
    }

    /// Character offset one past the end of the last consumed token.
    fn previous_end(&self) -> usize {
        self.position
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(0, |t| t.end)
    }

    fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.input.len());
        let start = start.min(end);
        self.input[start..end].iter().collect()
    }
}

/// Check for a trailing `! important`.
fn is_important_suffix(values: &[Spanned]) -> bool {
    match values {
        [.., bang, ident] => {
            matches!(bang.value, ComponentValue::Token(CSSToken::Delim('!')))
                && matches!(&ident.value, ComponentValue::Token(CSSToken::Ident(i)) if i.eq_ignore_ascii_case("important"))
        }
        _ => false,
    }
}

/// Collapse runs of whitespace into single spaces and trim.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// [§ 5.1 Selector Lists](https://www.w3.org/TR/selectors-4/#selector-list)
///
/// "A selector list is a comma-separated list of selectors"
///
/// Normalizes the list's whitespace: each selector collapsed and trimmed,
/// entries joined by `, `. Commas inside parentheses (`:is(.a, .b)`) are kept.
fn selector_list_text(prelude: &str) -> String {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for c in prelude.chars() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(collapse_whitespace(&current));
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    parts.push(collapse_whitespace(&current));
    parts.retain(|p| !p.is_empty());
    parts.join(", ")
}

/// Tokenize and parse a stylesheet.
#[must_use]
pub fn parse_stylesheet(css: &str) -> Stylesheet {
    let mut tokenizer = CSSTokenizer::new(css);
    tokenizer.run();
    CSSParser::new(tokenizer).parse_stylesheet()
}

/// Tokenize and parse text as a list of component values.
#[must_use]
pub fn parse_component_values(text: &str) -> Vec<ComponentValue> {
    let mut tokenizer = CSSTokenizer::new(text);
    tokenizer.run();
    CSSParser::new(tokenizer).parse_component_values()
}
