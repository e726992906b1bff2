use magpie_common::SourceLocation;

use super::token::{CSSToken, LocatedToken};

/// [§ 4.3 Tokenizer Algorithms](https://www.w3.org/TR/css-syntax-3/#tokenizer-algorithms)
///
/// CSS tokenizer that records where every token starts and ends.
pub struct CSSTokenizer {
    /// The input being tokenized
    input: Vec<char>,
    /// Location of the next code point to consume. Its offset is the index
    /// into `input`.
    location: SourceLocation,
    /// Location before the most recent `consume`, for `reconsume`.
    previous: SourceLocation,
    /// Collected tokens
    tokens: Vec<LocatedToken>,
}

impl CSSTokenizer {
    /// Create a new CSS tokenizer with the given input.
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into().chars().collect(),
            location: SourceLocation::START,
            previous: SourceLocation::START,
            tokens: Vec::new(),
        }
    }

    /// Tokenize the whole input. The last collected token is always `EOF`.
    pub fn run(&mut self) {
        loop {
            // "Consume comments."
            self.consume_comments();
            let start = self.location;
            let token = self.consume_token();
            let is_eof = token.is_eof();
            self.tokens.push(LocatedToken {
                token,
                start,
                end: self.location.offset,
            });
            if is_eof {
                break;
            }
        }
    }

    /// Return the collected tokens.
    #[must_use]
    pub fn into_tokens(self) -> Vec<LocatedToken> {
        self.tokens
    }

    /// Return a reference to the collected tokens.
    #[must_use]
    pub fn tokens(&self) -> &[LocatedToken] {
        &self.tokens
    }

    /// Return the input as code points, for slicing raw text by token span.
    #[must_use]
    pub fn input(&self) -> &[char] {
        &self.input
    }

    /// [§ 4.3.1 Consume a token](https://www.w3.org/TR/css-syntax-3/#consume-token)
    fn consume_token(&mut self) -> CSSToken {
        // "Consume the next input code point."
        let Some(c) = self.consume() else {
            return CSSToken::EOF;
        };

        match c {
            // "whitespace"
            // "Consume as much whitespace as possible. Return a <whitespace-token>."
            c if is_whitespace(c) => {
                while self.peek().is_some_and(is_whitespace) {
                    let _ = self.consume();
                }
                CSSToken::Whitespace
            }

            // "U+0022 QUOTATION MARK (")" / "U+0027 APOSTROPHE (')"
            '"' | '\'' => self.consume_string_token(c),

            // "U+0023 NUMBER SIGN (#)"
            '#' => {
                // "If the next input code point is an ident code point or the next
                // two input code points are a valid escape..."
                if self.peek().is_some_and(is_ident_code_point)
                    || is_valid_escape(self.peek(), self.peek_at(1))
                {
                    CSSToken::Hash(self.consume_ident_sequence())
                } else {
                    CSSToken::Delim('#')
                }
            }

            '(' => CSSToken::LeftParen,
            ')' => CSSToken::RightParen,
            ',' => CSSToken::Comma,
            ':' => CSSToken::Colon,
            ';' => CSSToken::Semicolon,
            '[' => CSSToken::LeftBracket,
            ']' => CSSToken::RightBracket,
            '{' => CSSToken::LeftBrace,
            '}' => CSSToken::RightBrace,

            // "U+002B PLUS SIGN (+)" / "U+002E FULL STOP (.)"
            '+' | '.' => {
                // "If the input stream starts with a number, reconsume the current
                // input code point, consume a numeric token, and return it."
                self.reconsume();
                if self.would_start_number() {
                    self.consume_numeric_token()
                } else {
                    let _ = self.consume();
                    CSSToken::Delim(c)
                }
            }

            // "U+002D HYPHEN-MINUS (-)"
            '-' => {
                self.reconsume();
                if self.would_start_number() {
                    self.consume_numeric_token()
                } else if self.would_start_ident_sequence() {
                    self.consume_ident_like_token()
                } else {
                    let _ = self.consume();
                    CSSToken::Delim('-')
                }
            }

            // "U+0040 COMMERCIAL AT (@)"
            '@' => {
                // "If the next 3 input code points would start an ident sequence,
                // consume an ident sequence, create an <at-keyword-token>..."
                if self.would_start_ident_sequence() {
                    CSSToken::AtKeyword(self.consume_ident_sequence())
                } else {
                    CSSToken::Delim('@')
                }
            }

            // "U+005C REVERSE SOLIDUS (\)"
            '\\' => {
                if is_valid_escape(Some('\\'), self.peek()) {
                    self.reconsume();
                    self.consume_ident_like_token()
                } else {
                    // "This is a parse error."
                    CSSToken::Delim('\\')
                }
            }

            // "digit"
            c if c.is_ascii_digit() => {
                self.reconsume();
                self.consume_numeric_token()
            }

            // "ident-start code point"
            c if is_ident_start_code_point(c) => {
                self.reconsume();
                self.consume_ident_like_token()
            }

            // "anything else"
            c => CSSToken::Delim(c),
        }
    }

    /// [§ 4.3.2 Consume comments](https://www.w3.org/TR/css-syntax-3/#consume-comment)
    fn consume_comments(&mut self) {
        while self.peek() == Some('/') && self.peek_at(1) == Some('*') {
            let _ = self.consume(); // /
            let _ = self.consume(); // *

            loop {
                match self.consume() {
                    Some('*') if self.peek() == Some('/') => {
                        let _ = self.consume(); // /
                        break;
                    }
                    Some(_) => {}
                    None => break,
                }
            }
        }
    }

    /// [§ 4.3.4 Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    fn consume_string_token(&mut self, ending_code_point: char) -> CSSToken {
        let mut value = String::new();

        loop {
            match self.consume() {
                // "ending code point" / "EOF"
                Some(c) if c == ending_code_point => return CSSToken::String(value),
                None => return CSSToken::String(value),

                // "newline"
                // "This is a parse error. Reconsume the current input code point,
                // create a <bad-string-token>, and return it."
                Some('\n') => {
                    self.reconsume();
                    return CSSToken::BadString;
                }

                // "U+005C REVERSE SOLIDUS (\)"
                Some('\\') => match self.peek() {
                    None => {}
                    Some('\n') => {
                        let _ = self.consume();
                    }
                    Some(_) => value.push(self.consume_escaped_code_point()),
                },

                Some(c) => value.push(c),
            }
        }
    }

    /// [§ 4.3.3 Consume a numeric token](https://www.w3.org/TR/css-syntax-3/#consume-numeric-token)
    fn consume_numeric_token(&mut self) -> CSSToken {
        let value = self.consume_number();

        if self.would_start_ident_sequence() {
            let unit = self.consume_ident_sequence();
            CSSToken::Dimension { value, unit }
        } else if self.peek() == Some('%') {
            let _ = self.consume();
            CSSToken::Percentage(value)
        } else {
            CSSToken::Number(value)
        }
    }

    /// [§ 4.3.4 Consume an ident-like token](https://www.w3.org/TR/css-syntax-3/#consume-ident-like-token)
    fn consume_ident_like_token(&mut self) -> CSSToken {
        let string = self.consume_ident_sequence();

        if self.peek() != Some('(') {
            return CSSToken::Ident(string);
        }
        let _ = self.consume(); // (

        // "If string's value is an ASCII case-insensitive match for 'url'..."
        if string.eq_ignore_ascii_case("url") {
            while self.peek().is_some_and(is_whitespace) {
                let _ = self.consume();
            }
            // A quoted url is an ordinary function whose argument is a string.
            if !matches!(self.peek(), Some('"' | '\'')) {
                return self.consume_url_token();
            }
        }
        CSSToken::Function(string)
    }

    /// [§ 4.3.6 Consume a url token](https://www.w3.org/TR/css-syntax-3/#consume-url-token)
    ///
    /// Called after `url(` and any leading whitespace have been consumed.
    fn consume_url_token(&mut self) -> CSSToken {
        let mut value = String::new();

        loop {
            match self.consume() {
                Some(')') | None => return CSSToken::Url(value),
                Some(c) if is_whitespace(c) => {
                    while self.peek().is_some_and(is_whitespace) {
                        let _ = self.consume();
                    }
                    if matches!(self.peek(), Some(')') | None) {
                        let _ = self.consume();
                        return CSSToken::Url(value);
                    }
                    self.consume_bad_url_remnants();
                    return CSSToken::BadUrl;
                }
                Some('"' | '\'' | '(') => {
                    self.consume_bad_url_remnants();
                    return CSSToken::BadUrl;
                }
                Some('\\') => {
                    if is_valid_escape(Some('\\'), self.peek()) {
                        value.push(self.consume_escaped_code_point());
                    } else {
                        self.consume_bad_url_remnants();
                        return CSSToken::BadUrl;
                    }
                }
                Some(c) => value.push(c),
            }
        }
    }

    /// [§ 4.3.14 Consume the remnants of a bad url](https://www.w3.org/TR/css-syntax-3/#consume-remnants-of-bad-url)
    fn consume_bad_url_remnants(&mut self) {
        loop {
            match self.consume() {
                Some(')') | None => return,
                Some('\\') if is_valid_escape(Some('\\'), self.peek()) => {
                    let _ = self.consume_escaped_code_point();
                }
                Some(_) => {}
            }
        }
    }

    /// [§ 4.3.11 Consume an ident sequence](https://www.w3.org/TR/css-syntax-3/#consume-name)
    fn consume_ident_sequence(&mut self) -> String {
        let mut result = String::new();

        loop {
            match self.peek() {
                Some(c) if is_ident_code_point(c) => {
                    let _ = self.consume();
                    result.push(c);
                }
                Some('\\') if is_valid_escape(Some('\\'), self.peek_at(1)) => {
                    let _ = self.consume();
                    result.push(self.consume_escaped_code_point());
                }
                _ => return result,
            }
        }
    }

    /// [§ 4.3.12 Consume a number](https://www.w3.org/TR/css-syntax-3/#consume-number)
    fn consume_number(&mut self) -> f64 {
        let mut repr = String::new();

        if let Some(sign @ ('+' | '-')) = self.peek() {
            let _ = self.consume();
            repr.push(sign);
        }
        self.consume_digits(&mut repr);

        // "If the next 2 input code points are U+002E FULL STOP (.) followed by a digit..."
        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            let _ = self.consume();
            repr.push('.');
            self.consume_digits(&mut repr);
        }

        // "...(E) or (e), optionally followed by (-) or (+), followed by a digit..."
        if matches!(self.peek(), Some('e' | 'E')) {
            let has_sign = matches!(self.peek_at(1), Some('+' | '-'));
            let digit_at = if has_sign { 2 } else { 1 };
            if self.peek_at(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                for _ in 0..digit_at {
                    if let Some(c) = self.consume() {
                        repr.push(c);
                    }
                }
                self.consume_digits(&mut repr);
            }
        }

        repr.parse().unwrap_or(0.0)
    }

    fn consume_digits(&mut self, repr: &mut String) {
        while let Some(c) = self.peek().filter(char::is_ascii_digit) {
            let _ = self.consume();
            repr.push(c);
        }
    }

    /// [§ 4.3.7 Consume an escaped code point](https://www.w3.org/TR/css-syntax-3/#consume-escaped-code-point)
    ///
    /// Called with the reverse solidus already consumed.
    fn consume_escaped_code_point(&mut self) -> char {
        match self.consume() {
            Some(c) if c.is_ascii_hexdigit() => {
                let mut hex = c.to_string();
                // "Consume as many hex digits as possible, but no more than 5."
                while hex.len() < 6 {
                    match self.peek() {
                        Some(h) if h.is_ascii_hexdigit() => {
                            let _ = self.consume();
                            hex.push(h);
                        }
                        _ => break,
                    }
                }
                if self.peek().is_some_and(is_whitespace) {
                    let _ = self.consume();
                }
                // "If this number is zero, or is for a surrogate, or is greater than the
                // maximum allowed code point, return U+FFFD REPLACEMENT CHARACTER."
                u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|&cp| cp != 0)
                    .and_then(char::from_u32)
                    .unwrap_or('\u{FFFD}')
            }
            None => '\u{FFFD}',
            Some(c) => c,
        }
    }

    /// [§ 4.3.9 Check if three code points would start an ident sequence](https://www.w3.org/TR/css-syntax-3/#would-start-an-identifier)
    fn would_start_ident_sequence(&self) -> bool {
        match self.peek() {
            Some('-') => {
                let second = self.peek_at(1);
                second.is_some_and(is_ident_start_code_point)
                    || second == Some('-')
                    || is_valid_escape(second, self.peek_at(2))
            }
            Some('\\') => is_valid_escape(Some('\\'), self.peek_at(1)),
            Some(c) => is_ident_start_code_point(c),
            None => false,
        }
    }

    /// [§ 4.3.10 Check if three code points would start a number](https://www.w3.org/TR/css-syntax-3/#starts-with-a-number)
    fn would_start_number(&self) -> bool {
        let is_digit = |c: Option<char>| c.is_some_and(|c| c.is_ascii_digit());
        match self.peek() {
            Some('+' | '-') => {
                is_digit(self.peek_at(1)) || (self.peek_at(1) == Some('.') && is_digit(self.peek_at(2)))
            }
            Some('.') => is_digit(self.peek_at(1)),
            c => is_digit(c),
        }
    }

    /// Consume and return the next character.
    fn consume(&mut self) -> Option<char> {
        let c = self.input.get(self.location.offset).copied()?;
        self.previous = self.location;
        self.location = self.location.advance(c);
        Some(c)
    }

    /// Put back the last consumed character.
    fn reconsume(&mut self) {
        self.location = self.previous;
    }

    /// Peek at the next character without consuming it.
    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    /// Peek at a character at an offset from current position.
    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.location.offset + offset).copied()
    }
}

/// [§ 4.3.8 Check if two code points are a valid escape](https://www.w3.org/TR/css-syntax-3/#starts-with-a-valid-escape)
fn is_valid_escape(first: Option<char>, second: Option<char>) -> bool {
    first == Some('\\') && second.is_some_and(|c| c != '\n')
}

/// [§ 4.2 Definitions - whitespace](https://www.w3.org/TR/css-syntax-3/#whitespace)
fn is_whitespace(c: char) -> bool {
    matches!(c, '\n' | '\t' | ' ' | '\r' | '\x0C')
}

/// [§ 4.2 Definitions - ident-start code point](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
///
/// "A letter, a non-ASCII code point, or U+005F LOW LINE (_)."
fn is_ident_start_code_point(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

/// [§ 4.2 Definitions - ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
///
/// "An ident-start code point, a digit, or U+002D HYPHEN-MINUS (-)."
fn is_ident_code_point(c: char) -> bool {
    is_ident_start_code_point(c) || c.is_ascii_digit() || c == '-'
}
