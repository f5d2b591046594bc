//! The parser operates over a stream of `char`s produced by some flavour of iterator. When
//! reading from files or other byte sources, that iterator is a decoder which takes a stream
//! of bytes from the underlying source and converts it into a stream of `char`s, validating
//! the encoding as it goes.
//!
//! The [DecoderSelector] implemented within this module is used to instantiate new `char`
//! iterators, based on different encodings. (Currently only ASCII and UTF-8 are supported).
use chisel_decoders::{ascii::AsciiDecoder, utf8::Utf8Decoder};
use std::io::BufRead;

/// Enumeration of different supported encoding types
#[derive(Copy, Clone)]
pub enum Encoding {
    Utf8,
    Ascii,
}

#[cfg(feature = "default_utf8_encoding")]
impl Default for Encoding {
    fn default() -> Self {
        Self::Utf8
    }
}

#[cfg(not(feature = "default_utf8_encoding"))]
impl Default for Encoding {
    fn default() -> Self {
        Self::Ascii
    }
}

/// A struct that is essentially a factory for creating new instances of [char] iterators,
/// based on a specified encoding type
#[derive(Default)]
pub(crate) struct DecoderSelector {}

impl DecoderSelector {
    /// Create and return an instance of a given byte decoder / char iterator based on a specific
    /// encoding
    pub fn new_decoder<'a, Buffer: BufRead>(
        &'a self,
        buffer: &'a mut Buffer,
        encoding: Encoding,
    ) -> Box<dyn Iterator<Item = char> + 'a> {
        match encoding {
            Encoding::Ascii => Box::new(AsciiDecoder::new(buffer)),
            Encoding::Utf8 => Box::new(Utf8Decoder::new(buffer)),
        }
    }
}
