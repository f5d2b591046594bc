//! The recursive descent parser, which assembles a [JsonValue] tree from the token stream
//!
//! Separator discipline is strict: elements and members must be separated by single commas,
//! a separator directly followed by a closing bracket is a violation, and the top level of
//! a document is exactly one value followed by the end of the input.
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str;

use crate::decoders::{DecoderSelector, Encoding};
use crate::errors::{ParserError, ParserErrorDetails, ParserErrorSource, ParserResult};
use crate::lexer::{Lexer, TokenKind};
use crate::parser_error;
use crate::value::{JsonArray, JsonObject, JsonValue};

/// Main JSON parser struct
pub struct Parser {
    decoders: DecoderSelector,
    encoding: Encoding,
}

impl Default for Parser {
    fn default() -> Self {
        Self {
            decoders: Default::default(),
            encoding: Default::default(),
        }
    }
}

impl Parser {
    /// Create a new instance of the parser using a specific [Encoding]
    pub fn with_encoding(encoding: Encoding) -> Self {
        Self {
            decoders: Default::default(),
            encoding,
        }
    }

    /// Parse the contents of a file, producing a fully owned tree
    pub fn parse_file<PathLike: AsRef<Path>>(
        &self,
        path: PathLike,
    ) -> ParserResult<JsonValue<'static>> {
        match File::open(&path) {
            Ok(f) => {
                let mut reader = BufReader::new(f);
                let mut chars = self.decoders.new_decoder(&mut reader, self.encoding);
                self.parse(&mut chars)
            }
            Err(_) => {
                parser_error!(ParserErrorDetails::InvalidFile)
            }
        }
    }

    /// Parse a byte slice, validating it against the configured [Encoding] first. The
    /// resulting tree borrows directly from the supplied slice
    pub fn parse_bytes<'b>(&self, bytes: &'b [u8]) -> ParserResult<JsonValue<'b>> {
        if let Encoding::Ascii = self.encoding {
            if !bytes.is_ascii() {
                return parser_error!(ParserErrorDetails::NonAsciiInputDetected);
            }
        }
        match str::from_utf8(bytes) {
            Ok(source) => self.parse_str(source),
            Err(_) => parser_error!(ParserErrorDetails::NonUtf8InputDetected),
        }
    }

    /// Parse a borrowed string slice, producing a tree which borrows from the input
    pub fn parse_str<'b>(&self, source: &'b str) -> ParserResult<JsonValue<'b>> {
        if source.is_empty() {
            return parser_error!(ParserErrorDetails::ZeroLengthInput);
        }
        let mut lexer = Lexer::new(source);
        let value = self.parse_value(&mut lexer)?;
        match lexer.next_token()? {
            TokenKind::EndOfInput => Ok(value),
            _ => parser_error!(ParserErrorDetails::TrailingContent, lexer.coords()),
        }
    }

    /// Parse directly from a pre-decoded stream of characters, producing a fully owned tree
    pub fn parse(&self, chars: &mut impl Iterator<Item = char>) -> ParserResult<JsonValue<'static>> {
        let source: String = chars.collect();
        self.parse_str(&source).map(JsonValue::into_owned)
    }

    fn parse_value<'b>(&self, lexer: &mut Lexer<'b>) -> ParserResult<JsonValue<'b>> {
        match lexer.next_token()? {
            TokenKind::StartObject => self.parse_object(lexer),
            TokenKind::StartArray => self.parse_array(lexer),
            TokenKind::Str => Ok(JsonValue::String(lexer.consume_string()?)),
            TokenKind::Num => self.parse_number(lexer),
            TokenKind::True => {
                lexer.skip_token(TokenKind::True)?;
                Ok(JsonValue::Boolean(true))
            }
            TokenKind::False => {
                lexer.skip_token(TokenKind::False)?;
                Ok(JsonValue::Boolean(false))
            }
            TokenKind::Null => {
                lexer.skip_token(TokenKind::Null)?;
                Ok(JsonValue::Null)
            }
            TokenKind::EndOfInput => {
                parser_error!(ParserErrorDetails::EndOfInput, lexer.coords())
            }
            token => {
                parser_error!(ParserErrorDetails::UnexpectedToken(token), lexer.coords())
            }
        }
    }

    /// An object is just a list of comma separated KV pairs. Duplicate keys resolve to the
    /// last occurrence, which keeps the position established by the first
    fn parse_object<'b>(&self, lexer: &mut Lexer<'b>) -> ParserResult<JsonValue<'b>> {
        lexer.skip_token(TokenKind::StartObject)?;
        let mut members = JsonObject::new();
        if lexer.next_token()? == TokenKind::EndObject {
            lexer.skip_token(TokenKind::EndObject)?;
            return Ok(JsonValue::Object(members));
        }
        loop {
            let key = match lexer.next_token()? {
                TokenKind::Str => lexer.consume_string()?,
                TokenKind::EndOfInput => {
                    return parser_error!(ParserErrorDetails::EndOfInput, lexer.coords());
                }
                _ => return parser_error!(ParserErrorDetails::InvalidObject, lexer.coords()),
            };
            if lexer.next_token()? != TokenKind::Colon {
                return parser_error!(ParserErrorDetails::PairExpected, lexer.coords());
            }
            lexer.skip_token(TokenKind::Colon)?;
            let value = self.parse_value(lexer)?;
            match members.get_mut(&key) {
                Some(existing) => *existing = value,
                None => {
                    members.insert(key, value);
                }
            }
            match lexer.next_token()? {
                TokenKind::Comma => {
                    lexer.skip_token(TokenKind::Comma)?;
                    if lexer.next_token()? == TokenKind::EndObject {
                        return parser_error!(ParserErrorDetails::InvalidObject, lexer.coords());
                    }
                }
                TokenKind::EndObject => {
                    lexer.skip_token(TokenKind::EndObject)?;
                    return Ok(JsonValue::Object(members));
                }
                TokenKind::EndOfInput => {
                    return parser_error!(ParserErrorDetails::EndOfInput, lexer.coords());
                }
                token => {
                    return parser_error!(
                        ParserErrorDetails::UnexpectedToken(token),
                        lexer.coords()
                    );
                }
            }
        }
    }

    /// An array is just a list of comma separated values
    fn parse_array<'b>(&self, lexer: &mut Lexer<'b>) -> ParserResult<JsonValue<'b>> {
        lexer.skip_token(TokenKind::StartArray)?;
        let mut items = JsonArray::new();
        if lexer.next_token()? == TokenKind::EndArray {
            lexer.skip_token(TokenKind::EndArray)?;
            return Ok(JsonValue::Array(items));
        }
        loop {
            items.push(self.parse_value(lexer)?);
            match lexer.next_token()? {
                TokenKind::Comma => {
                    lexer.skip_token(TokenKind::Comma)?;
                    if lexer.next_token()? == TokenKind::EndArray {
                        return parser_error!(ParserErrorDetails::InvalidArray, lexer.coords());
                    }
                }
                TokenKind::EndArray => {
                    lexer.skip_token(TokenKind::EndArray)?;
                    return Ok(JsonValue::Array(items));
                }
                TokenKind::EndOfInput => {
                    return parser_error!(ParserErrorDetails::EndOfInput, lexer.coords());
                }
                token => {
                    return parser_error!(
                        ParserErrorDetails::UnexpectedToken(token),
                        lexer.coords()
                    );
                }
            }
        }
    }

    /// A lexeme with no fraction or exponent becomes an integer provided it fits, and
    /// anything else falls through to a float
    fn parse_number<'b>(&self, lexer: &mut Lexer<'b>) -> ParserResult<JsonValue<'b>> {
        let coords = lexer.coords();
        let lexeme = lexer.consume_number()?;
        if !lexeme.contains(|c| c == '.' || c == 'e' || c == 'E') {
            if let Some(value) = parse_integer(lexeme) {
                return Ok(JsonValue::Integer(value));
            }
        }
        match fast_float::parse(lexeme.as_bytes()) {
            Ok(value) => Ok(JsonValue::Float(value)),
            Err(_) => parser_error!(
                ParserErrorDetails::InvalidNumericRepresentation(lexeme.to_string()),
                coords
            ),
        }
    }
}

#[cfg(feature = "mixed_numerics")]
fn parse_integer(lexeme: &str) -> Option<i64> {
    lexical::parse::<i64, _>(lexeme.as_bytes()).ok()
}

#[cfg(not(feature = "mixed_numerics"))]
fn parse_integer(lexeme: &str) -> Option<i64> {
    lexeme.parse::<i64>().ok()
}
