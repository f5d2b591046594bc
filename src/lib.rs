//! A strict JSON lexer, parser and writer.
//!
//! Parsing produces a [JsonValue] tree which borrows from the source text wherever the
//! representation allows it, and the [Writer] turns trees back into text with byte-exact
//! output in both compact and pretty modes. The grammar is strict: no trailing separators,
//! no leading zeros, no unescaped control characters and nothing after the top level value.
//!
//! ```
//! use burin_json::{to_string_pretty, JsonValue, Parser};
//!
//! let parser = Parser::default();
//! let parsed = parser.parse_str("{\"tags\": [1, 2, 3]}").unwrap();
//! assert_eq!(parsed.get("tags").and_then(JsonValue::as_array).map(Vec::len), Some(3));
//! assert_eq!(to_string_pretty(&parsed).unwrap(), "{\n\t\"tags\": [\n\t\t1,\n\t\t2,\n\t\t3\n\t]\n}");
//! ```
pub mod coords;
pub mod cursor;
pub mod decoders;
pub mod errors;
pub mod lexer;
pub mod parser;
#[cfg(test)]
mod test_macros;
pub mod value;
pub mod writer;

pub use crate::decoders::Encoding;
pub use crate::parser::Parser;
pub use crate::value::{JsonArray, JsonObject, JsonValue};
pub use crate::writer::{to_string, to_string_pretty, Writer};
