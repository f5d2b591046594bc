//! The lexer, which classifies and extracts tokens from the source text
//!
//! Classification is carried out without consuming anything, and the result is cached until
//! one of the consuming operations moves the cursor. String and number extraction are
//! zero-copy wherever the source representation allows it.
use std::borrow::Cow;

use crate::coords::Coords;
use crate::cursor::Cursor;
use crate::errors::{ParserError, ParserErrorDetails, ParserErrorSource, ParserResult};
use crate::lexer_error;

/// Enumeration of valid JSON tokens
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Sentinel indicating that no classification has been carried out yet
    None,
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    Colon,
    Comma,
    Str,
    Num,
    True,
    False,
    Null,
    EndOfInput,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::None => write!(f, "none"),
            TokenKind::StartObject => write!(f, "'{{'"),
            TokenKind::EndObject => write!(f, "'}}'"),
            TokenKind::StartArray => write!(f, "'['"),
            TokenKind::EndArray => write!(f, "']'"),
            TokenKind::Colon => write!(f, "':'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Str => write!(f, "string"),
            TokenKind::Num => write!(f, "number"),
            TokenKind::True => write!(f, "'true'"),
            TokenKind::False => write!(f, "'false'"),
            TokenKind::Null => write!(f, "'null'"),
            TokenKind::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// The lexer wraps a [Cursor] and holds the cached classification of the token at the
/// current position
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    next: TokenKind,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer {
            cursor: Cursor::new(source),
            next: TokenKind::None,
        }
    }

    /// The current position within the input
    pub fn coords(&self) -> Coords {
        self.cursor.coords()
    }

    /// Classify the token at the current position without consuming it. The classification
    /// is cached until the next consume or skip moves the cursor
    pub fn next_token(&mut self) -> ParserResult<TokenKind> {
        if self.next == TokenKind::None {
            self.next = self.classify()?;
        }
        Ok(self.next)
    }

    fn classify(&mut self) -> ParserResult<TokenKind> {
        self.cursor.skip_whitespace();
        match self.cursor.current() {
            None => Ok(TokenKind::EndOfInput),
            Some('{') => Ok(TokenKind::StartObject),
            Some('}') => Ok(TokenKind::EndObject),
            Some('[') => Ok(TokenKind::StartArray),
            Some(']') => Ok(TokenKind::EndArray),
            Some(':') => Ok(TokenKind::Colon),
            Some(',') => Ok(TokenKind::Comma),
            Some('"') => Ok(TokenKind::Str),
            Some('t') => self.classify_literal("true", TokenKind::True),
            Some('f') => self.classify_literal("false", TokenKind::False),
            Some('n') => self.classify_literal("null", TokenKind::Null),
            Some(c) if c == '-' || c.is_ascii_digit() => Ok(TokenKind::Num),
            Some(c) => lexer_error!(
                ParserErrorDetails::InvalidCharacter(c),
                self.cursor.coords()
            ),
        }
    }

    /// Literals must match as whole tokens, so the character following a candidate match
    /// may not extend the word
    fn classify_literal(&self, literal: &str, kind: TokenKind) -> ParserResult<TokenKind> {
        let rest = self.cursor.rest();
        if rest.starts_with(literal) {
            match rest[literal.len()..].chars().next() {
                Some(c) if c.is_ascii_alphanumeric() => (),
                _ => return Ok(kind),
            }
        }
        let repr: String = rest.chars().take(literal.len() + 1).collect();
        lexer_error!(ParserErrorDetails::MatchFailed(repr), self.cursor.coords())
    }

    /// Consume a number token, validating it against the numeric grammar, and return the
    /// matched lexeme as a borrowed slice of the original input
    pub fn consume_number(&mut self) -> ParserResult<&'a str> {
        let found = self.next_token()?;
        if found != TokenKind::Num {
            return lexer_error!(
                ParserErrorDetails::TokenMismatch {
                    expected: TokenKind::Num,
                    found
                },
                self.cursor.coords()
            );
        }
        let start = self.cursor.offset();
        let coords = self.cursor.coords();
        if self.cursor.current() == Some('-') {
            self.cursor.advance();
        }
        match self.cursor.current() {
            // a leading zero may not be followed by further integer digits
            Some('0') => {
                self.cursor.advance();
                if self.at_digit() {
                    return Err(self.malformed_number(start, coords));
                }
            }
            Some(c) if c.is_ascii_digit() => {
                self.consume_digits();
            }
            _ => return Err(self.malformed_number(start, coords)),
        }
        if self.cursor.current() == Some('.') {
            self.cursor.advance();
            if self.consume_digits() == 0 {
                return Err(self.malformed_number(start, coords));
            }
        }
        if matches!(self.cursor.current(), Some('e' | 'E')) {
            self.cursor.advance();
            if matches!(self.cursor.current(), Some('+' | '-')) {
                self.cursor.advance();
            }
            if self.consume_digits() == 0 {
                return Err(self.malformed_number(start, coords));
            }
        }
        self.next = TokenKind::None;
        Ok(self.cursor.slice(start, self.cursor.offset()))
    }

    fn at_digit(&self) -> bool {
        matches!(self.cursor.current(), Some(c) if c.is_ascii_digit())
    }

    fn consume_digits(&mut self) -> usize {
        let mut count = 0;
        while self.at_digit() {
            self.cursor.advance();
            count += 1;
        }
        count
    }

    /// Soak up the remainder of a malformed numeric lexeme so that the resulting error
    /// carries the complete representation
    fn malformed_number(&mut self, start: usize, coords: Coords) -> ParserError {
        while matches!(self.cursor.current(),
            Some(c) if c.is_ascii_alphanumeric() || c == '.' || c == '+' || c == '-')
        {
            self.cursor.advance();
        }
        self.next = TokenKind::None;
        ParserError {
            source: ParserErrorSource::Lexer,
            details: ParserErrorDetails::InvalidNumericRepresentation(
                self.cursor.slice(start, self.cursor.offset()).to_string(),
            ),
            coords: Some(coords),
        }
    }

    /// Consume a string token and return its decoded content. A single forward scan locates
    /// the closing quote; escape-free content is returned as a borrowed slice of the input,
    /// and the first escape switches the scan over to a decoding buffer
    pub fn consume_string(&mut self) -> ParserResult<Cow<'a, str>> {
        let found = self.next_token()?;
        if found != TokenKind::Str {
            return lexer_error!(
                ParserErrorDetails::TokenMismatch {
                    expected: TokenKind::Str,
                    found
                },
                self.cursor.coords()
            );
        }
        self.cursor.advance();
        let start = self.cursor.offset();
        let mut decoded: Option<String> = None;
        loop {
            let coords = self.cursor.coords();
            match self.cursor.current() {
                Some('"') => {
                    let end = self.cursor.offset();
                    self.cursor.advance();
                    self.next = TokenKind::None;
                    return Ok(match decoded {
                        Some(buffer) => Cow::Owned(buffer),
                        None => Cow::Borrowed(self.cursor.slice(start, end)),
                    });
                }
                Some('\\') => {
                    let mut buffer = match decoded.take() {
                        Some(buffer) => buffer,
                        None => String::from(self.cursor.slice(start, self.cursor.offset())),
                    };
                    self.cursor.advance();
                    self.consume_escape(&mut buffer, coords)?;
                    decoded = Some(buffer);
                }
                Some(c) if c.is_control() => {
                    return lexer_error!(ParserErrorDetails::InvalidCharacter(c), coords);
                }
                Some(c) => {
                    self.cursor.advance();
                    if let Some(buffer) = decoded.as_mut() {
                        buffer.push(c);
                    }
                }
                None => {
                    return lexer_error!(ParserErrorDetails::EndOfInput, self.cursor.coords());
                }
            }
        }
    }

    /// Decode a single escape sequence into the supplied buffer. The preceding backslash
    /// has already been consumed
    fn consume_escape(&mut self, buffer: &mut String, coords: Coords) -> ParserResult<()> {
        match self.cursor.advance() {
            Some('"') => buffer.push('"'),
            Some('\\') => buffer.push('\\'),
            Some('/') => buffer.push('/'),
            Some('b') => buffer.push('\u{8}'),
            Some('f') => buffer.push('\u{c}'),
            Some('n') => buffer.push('\n'),
            Some('r') => buffer.push('\r'),
            Some('t') => buffer.push('\t'),
            Some('u') => {
                let c = self.consume_unicode_escape(coords)?;
                buffer.push(c);
            }
            Some(c) => {
                return lexer_error!(
                    ParserErrorDetails::InvalidEscapeSequence(format!("\\{}", c)),
                    coords
                );
            }
            None => {
                return lexer_error!(ParserErrorDetails::EndOfInput, self.cursor.coords());
            }
        }
        Ok(())
    }

    /// Decode a `\uXXXX` escape. A high surrogate must be followed by a second escape
    /// carrying the low surrogate, and the pair is combined into a single code point.
    /// Unpaired surrogates have no character representation and are rejected
    fn consume_unicode_escape(&mut self, coords: Coords) -> ParserResult<char> {
        let first = self.consume_hex4(coords)?;
        if (0xd800..=0xdbff).contains(&first) {
            if self.cursor.advance() != Some('\\') || self.cursor.advance() != Some('u') {
                return lexer_error!(
                    ParserErrorDetails::InvalidUnicodeEscapeSequence(format!("\\u{:04x}", first)),
                    coords
                );
            }
            let second = self.consume_hex4(coords)?;
            if !(0xdc00..=0xdfff).contains(&second) {
                return lexer_error!(
                    ParserErrorDetails::InvalidUnicodeEscapeSequence(format!(
                        "\\u{:04x}\\u{:04x}",
                        first, second
                    )),
                    coords
                );
            }
            let combined = 0x10000 + ((first - 0xd800) << 10) + (second - 0xdc00);
            match std::char::from_u32(combined) {
                Some(c) => Ok(c),
                None => lexer_error!(
                    ParserErrorDetails::InvalidUnicodeEscapeSequence(format!(
                        "\\u{:04x}\\u{:04x}",
                        first, second
                    )),
                    coords
                ),
            }
        } else if (0xdc00..=0xdfff).contains(&first) {
            lexer_error!(
                ParserErrorDetails::InvalidUnicodeEscapeSequence(format!("\\u{:04x}", first)),
                coords
            )
        } else {
            match std::char::from_u32(first) {
                Some(c) => Ok(c),
                None => lexer_error!(
                    ParserErrorDetails::InvalidUnicodeEscapeSequence(format!("\\u{:04x}", first)),
                    coords
                ),
            }
        }
    }

    /// Consume exactly four hex digits and return their value
    fn consume_hex4(&mut self, coords: Coords) -> ParserResult<u32> {
        let mut value = 0u32;
        for _ in 0..4 {
            match self.cursor.advance() {
                Some(c) => match c.to_digit(16) {
                    Some(digit) => value = value * 16 + digit,
                    None => {
                        return lexer_error!(
                            ParserErrorDetails::InvalidUnicodeEscapeSequence(format!(
                                "invalid hex digit '{}'",
                                c
                            )),
                            coords
                        );
                    }
                },
                None => {
                    return lexer_error!(ParserErrorDetails::EndOfInput, self.cursor.coords());
                }
            }
        }
        Ok(value)
    }

    /// Skip past the token at the current position, checking that it matches the expected
    /// [TokenKind] first
    pub fn skip_token(&mut self, expected: TokenKind) -> ParserResult<()> {
        let found = self.next_token()?;
        if found != expected {
            return lexer_error!(
                ParserErrorDetails::TokenMismatch { expected, found },
                self.cursor.coords()
            );
        }
        match found {
            TokenKind::Str => {
                self.consume_string()?;
            }
            TokenKind::Num => {
                self.consume_number()?;
            }
            TokenKind::True | TokenKind::Null => {
                self.cursor.advance_by(4);
                self.next = TokenKind::None;
            }
            TokenKind::False => {
                self.cursor.advance_by(5);
                self.next = TokenKind::None;
            }
            TokenKind::EndOfInput | TokenKind::None => (),
            _ => {
                self.cursor.advance();
                self.next = TokenKind::None;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;
    use std::fs::File;
    use std::io::{BufRead, BufReader};
    use std::path::PathBuf;

    use crate::errors::ParserErrorDetails;
    use crate::lexer::{Lexer, TokenKind};
    use crate::lines_from_relative_file;

    fn all_tokens(source: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(source);
        let mut tokens = vec![];
        loop {
            let kind = lexer.next_token().unwrap();
            tokens.push(kind);
            if kind == TokenKind::EndOfInput {
                return tokens;
            }
            lexer.skip_token(kind).unwrap();
        }
    }

    #[test]
    fn should_classify_basic_tokens() {
        assert_eq!(
            all_tokens("{}[],:"),
            [
                TokenKind::StartObject,
                TokenKind::EndObject,
                TokenKind::StartArray,
                TokenKind::EndArray,
                TokenKind::Comma,
                TokenKind::Colon,
                TokenKind::EndOfInput
            ]
        );
    }

    #[test]
    fn should_classify_literals() {
        assert_eq!(
            all_tokens("null true    false"),
            [
                TokenKind::Null,
                TokenKind::True,
                TokenKind::False,
                TokenKind::EndOfInput
            ]
        );
    }

    #[test]
    fn should_reject_run_together_literals() {
        let mut lexer = Lexer::new("truefalse");
        let result = lexer.next_token();
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err().details,
            ParserErrorDetails::MatchFailed(_)
        ));
    }

    #[test]
    fn should_reject_misspelt_literals() {
        let mut lexer = Lexer::new("farse");
        let result = lexer.next_token();
        assert!(result.is_err());
        println!("{:?}", result);
    }

    #[test]
    fn should_cache_the_classification() {
        let mut lexer = Lexer::new("[1]");
        assert_eq!(lexer.next_token().unwrap(), TokenKind::StartArray);
        assert_eq!(lexer.next_token().unwrap(), TokenKind::StartArray);
        lexer.skip_token(TokenKind::StartArray).unwrap();
        assert_eq!(lexer.next_token().unwrap(), TokenKind::Num);
    }

    #[test]
    fn should_skip_over_strings_and_numbers() {
        assert_eq!(
            all_tokens(r#"{"a": 1, "b": [2.5e3, "x\t"]}"#),
            [
                TokenKind::StartObject,
                TokenKind::Str,
                TokenKind::Colon,
                TokenKind::Num,
                TokenKind::Comma,
                TokenKind::Str,
                TokenKind::Colon,
                TokenKind::StartArray,
                TokenKind::Num,
                TokenKind::Comma,
                TokenKind::Str,
                TokenKind::EndArray,
                TokenKind::EndObject,
                TokenKind::EndOfInput
            ]
        );
    }

    #[test]
    fn should_consume_valid_numbers() {
        for source in [
            "0",
            "-0",
            "123",
            "-123",
            "0.123",
            "-0.5",
            "3.5",
            "0e3",
            "1e30",
            "1E30",
            "1e+2",
            "1e-2",
            "3.14e-10",
            "9223372036854775807",
        ] {
            let mut lexer = Lexer::new(source);
            assert_eq!(lexer.consume_number().unwrap(), source);
            assert_eq!(lexer.next_token().unwrap(), TokenKind::EndOfInput);
        }
    }

    #[test]
    fn should_return_the_exact_lexeme_within_a_document() {
        let mut lexer = Lexer::new("  -12.5e3 ,");
        assert_eq!(lexer.consume_number().unwrap(), "-12.5e3");
        assert_eq!(lexer.next_token().unwrap(), TokenKind::Comma);
    }

    #[test]
    fn should_reject_invalid_numbers() {
        for source in ["0123", "01", "-", "3.", "1e", "1e+", "-.5", "5.e2"] {
            let mut lexer = Lexer::new(source);
            let result = lexer.consume_number();
            assert!(result.is_err(), "expected a failure for '{}'", source);
            println!("{} -> {:?}", source, result.unwrap_err().details);
        }
    }

    #[test]
    fn should_borrow_escape_free_strings() {
        let mut lexer = Lexer::new("\"simple text\"");
        let value = lexer.consume_string().unwrap();
        assert_eq!(value, "simple text");
        assert!(matches!(value, Cow::Borrowed(_)));
    }

    #[test]
    fn should_decode_escaped_strings() {
        let mut lexer = Lexer::new(r#""tab\there \"quoted\" slash\/ back\\""#);
        let value = lexer.consume_string().unwrap();
        assert_eq!(value, "tab\there \"quoted\" slash/ back\\");
        assert!(matches!(value, Cow::Owned(_)));
    }

    #[test]
    fn should_decode_control_escapes() {
        let mut lexer = Lexer::new(r#""\b\f\n\r\t""#);
        let value = lexer.consume_string().unwrap();
        assert_eq!(value, "\u{8}\u{c}\n\r\t");
    }

    #[test]
    fn should_decode_unicode_escapes() {
        let mut lexer = Lexer::new(r#""\u0041\u00e9\u20ac""#);
        let value = lexer.consume_string().unwrap();
        assert_eq!(value, "A\u{e9}\u{20ac}");
        assert!(matches!(value, Cow::Owned(_)));
    }

    #[test]
    fn should_combine_surrogate_pairs() {
        let mut lexer = Lexer::new(r#""\ud83d\ude80""#);
        let value = lexer.consume_string().unwrap();
        assert_eq!(value, "\u{1f680}");
        assert_eq!(value.chars().count(), 1);
    }

    #[test]
    fn should_reject_unpaired_surrogates() {
        for source in [r#""\ud83d""#, r#""\ud83dA""#, r#""\udc00""#] {
            let mut lexer = Lexer::new(source);
            let result = lexer.consume_string();
            assert!(result.is_err(), "expected a failure for '{}'", source);
            assert!(matches!(
                result.unwrap_err().details,
                ParserErrorDetails::InvalidUnicodeEscapeSequence(_)
            ));
        }
    }

    #[test]
    fn should_reject_every_unescaped_control_character() {
        let disallowed = (0x00u32..0x20)
            .chain(std::iter::once(0x7f))
            .chain(0x80..0xa0)
            .map(|c| char::from_u32(c).unwrap());
        for c in disallowed {
            let source = format!("\"a{}b\"", c);
            let mut lexer = Lexer::new(&source);
            let result = lexer.consume_string();
            assert!(result.is_err(), "expected a failure for U+{:04X}", c as u32);
            assert!(matches!(
                result.unwrap_err().details,
                ParserErrorDetails::InvalidCharacter(_)
            ));
        }
    }

    #[test]
    fn should_reject_unknown_escapes() {
        let mut lexer = Lexer::new(r#""\x41""#);
        let result = lexer.consume_string();
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err().details,
            ParserErrorDetails::InvalidEscapeSequence(_)
        ));
    }

    #[test]
    fn should_report_end_of_input_within_a_string() {
        let mut lexer = Lexer::new("\"abc");
        let result = lexer.consume_string();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().details, ParserErrorDetails::EndOfInput);
    }

    #[test]
    fn should_mismatch_on_an_unexpected_skip() {
        let mut lexer = Lexer::new("[");
        let result = lexer.skip_token(TokenKind::Comma);
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err().details,
            ParserErrorDetails::TokenMismatch { .. }
        ));
    }

    #[test]
    fn should_report_coordinates_for_errors() {
        let mut lexer = Lexer::new("[\n  @]");
        lexer.skip_token(TokenKind::StartArray).unwrap();
        let error = lexer.next_token().unwrap_err();
        let coords = error.coords.unwrap();
        assert_eq!(coords.line, 2);
        assert_eq!(coords.column, 3);
    }

    #[test]
    fn should_lex_strings() {
        let lines = lines_from_relative_file!("fixtures/utf-8/strings.txt");
        for l in lines.flatten() {
            if !l.is_empty() {
                let mut lexer = Lexer::new(&l);
                assert_eq!(lexer.next_token().unwrap(), TokenKind::Str);
                let value = lexer.consume_string();
                assert!(value.is_ok(), "failed on '{}': {:?}", l, value);
                assert_eq!(lexer.next_token().unwrap(), TokenKind::EndOfInput);
            }
        }
    }

    #[test]
    fn should_lex_numbers() {
        let lines = lines_from_relative_file!("fixtures/utf-8/numbers.txt");
        for l in lines.flatten() {
            if !l.is_empty() {
                let mut lexer = Lexer::new(&l);
                let lexeme = lexer.consume_number();
                assert!(lexeme.is_ok(), "failed on '{}': {:?}", l, lexeme);
                assert_eq!(lexeme.unwrap(), l);
                assert_eq!(lexer.next_token().unwrap(), TokenKind::EndOfInput);
            }
        }
    }

    #[test]
    fn should_report_errors_for_invalid_numbers() {
        let lines = lines_from_relative_file!("fixtures/utf-8/invalid_numbers.txt");
        for l in lines.flatten() {
            if !l.is_empty() {
                let mut lexer = Lexer::new(&l);
                let result = lexer.consume_number();
                assert!(result.is_err(), "expected a failure for '{}'", l);
                println!("{} -> {:?}", l, result.unwrap_err().details);
            }
        }
    }

    #[test]
    fn should_handle_dodgy_strings() {
        let lines = lines_from_relative_file!("fixtures/utf-8/dodgy_strings.txt");
        for l in lines.flatten() {
            if !l.is_empty() {
                let mut lexer = Lexer::new(&l);
                let result = lexer.consume_string();
                assert!(result.is_err(), "expected a failure for '{}'", l);
                println!("{} -> {:?}", l, result.unwrap_err().details);
            }
        }
    }
}
