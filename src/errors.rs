//! General error types shared across all stages of the crate
use std::fmt::{Display, Formatter};

use crate::coords::Coords;
use crate::lexer::TokenKind;

/// Global result type used throughout the parser stages
pub type ParserResult<T> = Result<T, ParserError>;

/// Enumeration of the various different stages that can produce an error
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParserErrorSource {
    /// The lexical analysis stage
    Lexer,
    /// The tree construction stage
    Parser,
    /// Container operations on a [crate::JsonValue]
    Value,
    /// The serialization stage
    Writer,
}

impl Display for ParserErrorSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParserErrorSource::Lexer => write!(f, "lexer"),
            ParserErrorSource::Parser => write!(f, "parser"),
            ParserErrorSource::Value => write!(f, "value"),
            ParserErrorSource::Writer => write!(f, "writer"),
        }
    }
}

/// A global enumeration of error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserErrorDetails {
    /// The input ended before a token or construct was complete
    EndOfInput,
    /// The input was empty
    ZeroLengthInput,
    /// A file could not be opened for parsing
    InvalidFile,
    /// Input which isn't valid UTF-8 was detected
    NonUtf8InputDetected,
    /// Input which isn't valid ASCII was detected
    NonAsciiInputDetected,
    /// A character with no role in the grammar was found
    InvalidCharacter(char),
    /// A literal failed to match one of `true`, `false` or `null`
    MatchFailed(String),
    /// A numeric lexeme violated the numeric grammar
    InvalidNumericRepresentation(String),
    /// An escape sequence other than the supported set was found
    InvalidEscapeSequence(String),
    /// A unicode escape sequence failed to decode to a valid code point
    InvalidUnicodeEscapeSequence(String),
    /// A structurally valid token appeared somewhere it isn't allowed
    UnexpectedToken(TokenKind),
    /// An object key was not followed by a colon
    PairExpected,
    /// The internal structure of an object didn't conform to the grammar
    InvalidObject,
    /// The internal structure of an array didn't conform to the grammar
    InvalidArray,
    /// Non-whitespace content was found after the top level value
    TrailingContent,
    /// A token of one kind was requested whilst another was classified
    TokenMismatch {
        expected: TokenKind,
        found: TokenKind,
    },
    /// An array operation was attempted against a non-array value
    NotAnArray,
    /// An object operation was attempted against a non-object value
    NotAnObject,
    /// The writer was asked to serialize a value with no representation
    UnwritableValue,
}

impl Display for ParserErrorDetails {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParserErrorDetails::EndOfInput => write!(f, "premature end of input"),
            ParserErrorDetails::ZeroLengthInput => write!(f, "zero length input"),
            ParserErrorDetails::InvalidFile => write!(f, "invalid file specified"),
            ParserErrorDetails::NonUtf8InputDetected => write!(f, "non UTF-8 input detected"),
            ParserErrorDetails::NonAsciiInputDetected => write!(f, "non ASCII input detected"),
            ParserErrorDetails::InvalidCharacter(c) => {
                write!(f, "invalid character found: '{}'", c)
            }
            ParserErrorDetails::MatchFailed(repr) => {
                write!(f, "failed to match a literal, found: '{}'", repr)
            }
            ParserErrorDetails::InvalidNumericRepresentation(repr) => {
                write!(f, "invalid number found: '{}'", repr)
            }
            ParserErrorDetails::InvalidEscapeSequence(repr) => {
                write!(f, "invalid escape sequence found: '{}'", repr)
            }
            ParserErrorDetails::InvalidUnicodeEscapeSequence(repr) => {
                write!(f, "invalid unicode escape sequence found: '{}'", repr)
            }
            ParserErrorDetails::UnexpectedToken(kind) => {
                write!(f, "unexpected token found: {}", kind)
            }
            ParserErrorDetails::PairExpected => {
                write!(f, "expected a key/value pair, colon missing")
            }
            ParserErrorDetails::InvalidObject => write!(f, "invalid object structure"),
            ParserErrorDetails::InvalidArray => write!(f, "invalid array structure"),
            ParserErrorDetails::TrailingContent => {
                write!(f, "trailing content found after the top level value")
            }
            ParserErrorDetails::TokenMismatch { expected, found } => {
                write!(f, "expected token {}, found {}", expected, found)
            }
            ParserErrorDetails::NotAnArray => write!(f, "value is not an array"),
            ParserErrorDetails::NotAnObject => write!(f, "value is not an object"),
            ParserErrorDetails::UnwritableValue => {
                write!(f, "value has no serializable representation")
            }
        }
    }
}

/// The general error structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserError {
    /// The originating stage for the error
    pub source: ParserErrorSource,
    /// The global error code for the error
    pub details: ParserErrorDetails,
    /// Optional input coordinates
    pub coords: Option<Coords>,
}

impl Display for ParserError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.coords {
            Some(coords) => write!(f, "{}: {} [{}]", self.source, self.details, coords),
            None => write!(f, "{}: {}", self.source, self.details),
        }
    }
}

impl std::error::Error for ParserError {}

/// Helper macro for the construction of errors originating within the lexer
#[macro_export]
macro_rules! lexer_error {
    ($details: expr) => {
        Err(ParserError {
            source: ParserErrorSource::Lexer,
            details: $details,
            coords: None,
        })
    };
    ($details: expr, $coords: expr) => {
        Err(ParserError {
            source: ParserErrorSource::Lexer,
            details: $details,
            coords: Some($coords),
        })
    };
}

/// Helper macro for the construction of errors originating within the parser
#[macro_export]
macro_rules! parser_error {
    ($details: expr) => {
        Err(ParserError {
            source: ParserErrorSource::Parser,
            details: $details,
            coords: None,
        })
    };
    ($details: expr, $coords: expr) => {
        Err(ParserError {
            source: ParserErrorSource::Parser,
            details: $details,
            coords: Some($coords),
        })
    };
}

/// Helper macro for the construction of errors relating to misuse of a value
#[macro_export]
macro_rules! value_error {
    ($details: expr) => {
        Err(ParserError {
            source: ParserErrorSource::Value,
            details: $details,
            coords: None,
        })
    };
}

/// Helper macro for the construction of errors originating within the writer
#[macro_export]
macro_rules! writer_error {
    ($details: expr) => {
        Err(ParserError {
            source: ParserErrorSource::Writer,
            details: $details,
            coords: None,
        })
    };
}
