//! The JSON writer, which serializes values back into text
//!
//! Output is deterministic in both modes. Compact mode emits no inter-token whitespace at
//! all; pretty mode indents with one tab per nesting level, places every element on its own
//! line and splits even empty containers across two lines. Strings are escaped so that the
//! output always re-parses to an identical tree, which includes the unconditional escaping
//! of the forward slash.
use crate::errors::{ParserError, ParserErrorDetails, ParserErrorSource, ParserResult};
use crate::value::JsonValue;
use crate::writer_error;

/// Number of indent strings allocated up front for pretty output
const DEFAULT_INDENT_DEPTH: usize = 8;

/// A stateful writer over an owned output buffer
pub struct Writer {
    /// Accumulated output
    buffer: String,
    /// Whether pretty formatting is enabled
    pretty: bool,
    /// Current nesting depth
    depth: usize,
    /// Whether the writer sits at the start of a fresh line
    line_start: bool,
    /// Cache of indent strings, one per depth, grown on demand
    indents: Vec<String>,
}

impl Default for Writer {
    fn default() -> Self {
        Writer::new()
    }
}

impl Writer {
    /// Create a new writer producing compact output
    pub fn new() -> Self {
        Self::with_format(false)
    }

    /// Create a new writer producing pretty output
    pub fn pretty() -> Self {
        Self::with_format(true)
    }

    fn with_format(pretty: bool) -> Self {
        Writer {
            buffer: String::new(),
            pretty,
            depth: 0,
            line_start: true,
            indents: Vec::with_capacity(DEFAULT_INDENT_DEPTH),
        }
    }

    /// Serialize a complete value tree into the output buffer, depth first and in document
    /// order. The one value with no serializable representation is [JsonValue::Unspecified]
    pub fn write(&mut self, value: &JsonValue) -> ParserResult<()> {
        match value {
            JsonValue::Unspecified => writer_error!(ParserErrorDetails::UnwritableValue),
            JsonValue::Null => {
                self.write_null();
                Ok(())
            }
            JsonValue::Boolean(value) => {
                self.write_bool(*value);
                Ok(())
            }
            JsonValue::Integer(value) => {
                self.write_int(*value);
                Ok(())
            }
            JsonValue::Float(value) => {
                self.write_float(*value);
                Ok(())
            }
            JsonValue::String(value) => {
                self.write_string(value);
                Ok(())
            }
            JsonValue::Array(items) => {
                self.start_array();
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        self.write_separator();
                    }
                    self.write(item)?;
                }
                self.end_array();
                Ok(())
            }
            JsonValue::Object(members) => {
                self.start_object();
                for (index, (key, member)) in members.iter().enumerate() {
                    if index > 0 {
                        self.write_separator();
                    }
                    self.write_string(key);
                    self.write_key_separator();
                    self.write(member)?;
                }
                self.end_object();
                Ok(())
            }
        }
    }

    pub fn write_null(&mut self) {
        self.pad();
        self.buffer.push_str("null");
    }

    pub fn write_bool(&mut self, value: bool) {
        self.pad();
        self.buffer.push_str(if value { "true" } else { "false" });
    }

    /// Integers render in canonical base 10, with no decimal point or exponent
    pub fn write_int(&mut self, value: i64) {
        self.pad();
        let mut scratch = itoa::Buffer::new();
        self.buffer.push_str(scratch.format(value));
    }

    /// Floats render with the minimal digits that survive a round-trip, and always carry
    /// either a decimal point or an exponent so the kind is preserved on re-parse.
    /// Non-finite values have no representation and degrade to `null`
    pub fn write_float(&mut self, value: f64) {
        self.pad();
        if value.is_finite() {
            let mut scratch = dtoa::Buffer::new();
            self.buffer.push_str(scratch.format(value));
        } else {
            self.buffer.push_str("null");
        }
    }

    /// Strings which need no escaping are pushed through in a single copy
    pub fn write_string(&mut self, value: &str) {
        self.pad();
        self.buffer.push('"');
        if value.chars().any(needs_escape) {
            for c in value.chars() {
                self.push_escaped(c);
            }
        } else {
            self.buffer.push_str(value);
        }
        self.buffer.push('"');
    }

    fn push_escaped(&mut self, c: char) {
        match c {
            '"' => self.buffer.push_str("\\\""),
            '\\' => self.buffer.push_str("\\\\"),
            '/' => self.buffer.push_str("\\/"),
            '\u{8}' => self.buffer.push_str("\\b"),
            '\u{c}' => self.buffer.push_str("\\f"),
            '\n' => self.buffer.push_str("\\n"),
            '\r' => self.buffer.push_str("\\r"),
            '\t' => self.buffer.push_str("\\t"),
            c if c.is_control() => {
                self.buffer.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => self.buffer.push(c),
        }
    }

    /// Open an array
    pub fn start_array(&mut self) {
        self.open_container('[');
    }

    /// Close an array
    pub fn end_array(&mut self) {
        self.close_container(']');
    }

    /// Open an object
    pub fn start_object(&mut self) {
        self.open_container('{');
    }

    /// Close an object
    pub fn end_object(&mut self) {
        self.close_container('}');
    }

    /// Emit the separator between container entries
    pub fn write_separator(&mut self) {
        self.buffer.push(',');
        self.newline();
    }

    /// Emit the separator between a key and its value. The line stays open so the value
    /// continues beside its key
    pub fn write_key_separator(&mut self) {
        self.buffer.push(':');
        if self.pretty {
            self.buffer.push(' ');
        }
    }

    /// The accumulated output so far
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Consume the writer, returning the accumulated output
    pub fn into_string(self) -> String {
        self.buffer
    }

    fn open_container(&mut self, bracket: char) {
        self.pad();
        self.buffer.push(bracket);
        self.depth += 1;
        self.newline();
    }

    /// The closing bracket lands on its own line at the parent indent, unless nothing was
    /// written inside the container
    fn close_container(&mut self, bracket: char) {
        self.depth = self.depth.saturating_sub(1);
        if self.pretty {
            if !self.line_start {
                self.newline();
            }
            self.pad();
        }
        self.buffer.push(bracket);
    }

    fn newline(&mut self) {
        if self.pretty {
            self.buffer.push('\n');
            self.line_start = true;
        }
    }

    /// Emit the indent for the current depth when starting a fresh line in pretty mode
    fn pad(&mut self) {
        if self.pretty && self.line_start {
            if self.depth > 0 {
                self.ensure_indent(self.depth);
                self.buffer.push_str(&self.indents[self.depth - 1]);
            }
            self.line_start = false;
        }
    }

    fn ensure_indent(&mut self, depth: usize) {
        while self.indents.len() < depth {
            let next = self.indents.len() + 1;
            self.indents.push("\t".repeat(next));
        }
    }
}

/// Serialize a value tree to a compact string
pub fn to_string(value: &JsonValue) -> ParserResult<String> {
    let mut writer = Writer::new();
    writer.write(value)?;
    Ok(writer.into_string())
}

/// Serialize a value tree to a pretty printed string
pub fn to_string_pretty(value: &JsonValue) -> ParserResult<String> {
    let mut writer = Writer::pretty();
    writer.write(value)?;
    Ok(writer.into_string())
}

fn needs_escape(c: char) -> bool {
    matches!(c, '"' | '\\' | '/') || c.is_control()
}
