//! [`TextAppender`]: renders a [`Value`] back to JSON->URL text, per
//! spec.md §4.8.

use std::fmt;
use std::string::String;

use crate::encoder;
use crate::error::WriterError;
use crate::number::Number;
use crate::options::Options;
use crate::value::Value;

/// Writes [`Value`]s as JSON->URL text to any [`fmt::Write`] sink.
///
/// Generic over the sink (not over [`crate::factory::ValueFactory`]):
/// writing only ever consumes the crate's own [`Value`] enum, since a
/// caller using a foreign value model is expected to convert into `Value`
/// (or walk their own tree and call the lower-level [`encoder`] functions
/// directly) rather than have the factory's associated type threaded
/// through here too.
pub struct TextAppender<'w, W: fmt::Write> {
    w: &'w mut W,
    options: Options,
}

impl<'w, W: fmt::Write> TextAppender<'w, W> {
    pub fn new(w: &'w mut W, options: Options) -> Self {
        Self { w, options }
    }

    /// Append `v` as the entire document.
    pub fn add_value(&mut self, v: &Value) -> Result<(), WriterError> {
        self.write_value(v, 0)
    }

    fn separator(&self, depth: usize, name: bool) -> char {
        if self.options.wfu_composite && depth == 1 {
            if name { '=' } else { '&' }
        } else if name {
            ':'
        } else {
            ','
        }
    }

    fn write_value(&mut self, v: &Value, depth: usize) -> Result<(), WriterError> {
        match v {
            Value::EmptyComposite => self.raw("()"),
            Value::Array(items) => self.write_array(items, depth),
            Value::Object(entries) => self.write_object(entries, depth),
            Value::Null => self.write_null(),
            Value::Bool(b) => self.write_scalar(if *b { "true" } else { "false" }),
            Value::Number(n) => self.write_number(n),
            Value::String(s) => self.write_literal(s, false),
        }
    }

    /// Write a string in key or value position, per spec.md §4.7 step 1:
    /// an empty literal is elided if the role's `empty_unquoted_*` option
    /// allows it, otherwise it raises under `IMPLIED_STRING_LITERALS` or
    /// falls back to the explicit `''` spelling.
    fn write_literal(&mut self, s: &str, is_key: bool) -> Result<(), WriterError> {
        if s.is_empty() {
            let allowed = if is_key { self.options.empty_unquoted_key } else { self.options.empty_unquoted_value };
            if allowed {
                return Ok(());
            }
            if self.options.implied_string_literals {
                return Err(WriterError::ImpliedStringLiterals);
            }
            return self.raw("''");
        }
        let mut buf = String::new();
        if self.options.implied_string_literals {
            encoder::encode_implied_string_literal(&mut buf, s);
        } else {
            encoder::encode_literal_string_for(&mut buf, s, is_key);
        }
        self.raw(&buf)
    }

    /// Per spec.md §9's open question on the `IMPLIED_STRING_LITERALS` +
    /// `COERCE_NULL_TO_EMPTY_STRING` combination: coercion wins. Under
    /// `IMPLIED_STRING_LITERALS` the empty string's only valid spelling is
    /// zero bytes (a quoted `''` would decode back as two literal
    /// apostrophes, not emptiness, since that mode never treats a leading
    /// `'` as opening a quote) — so the coerced null is written as nothing
    /// at all there, and as `''` otherwise.
    fn write_null(&mut self) -> Result<(), WriterError> {
        if self.options.coerce_null_to_empty_string {
            if self.options.implied_string_literals { Ok(()) } else { self.raw("''") }
        } else if self.options.implied_string_literals {
            Err(WriterError::ImpliedStringLiterals)
        } else {
            self.raw("null")
        }
    }

    fn write_scalar(&mut self, text: &'static str) -> Result<(), WriterError> {
        if self.options.implied_string_literals {
            return Err(WriterError::ImpliedStringLiterals);
        }
        self.raw(text)
    }

    /// Write a number. Unlike [`Self::write_scalar`], `IMPLIED_STRING_LITERALS`
    /// does not reject this: per spec.md §4.8, a numeric `add` is always
    /// routed through the string-literal writer so its decimal text comes
    /// out percent-encoded if (and only if) that mode requires it, rather
    /// than being rejected outright the way a typed keyword is.
    fn write_number(&mut self, n: &Number) -> Result<(), WriterError> {
        if matches!(n, Number::OutOfRange) {
            return Err(WriterError::MalformedText);
        }
        let text = n.to_text();
        if self.options.implied_string_literals {
            let mut buf = String::new();
            encoder::encode_implied_string_literal(&mut buf, &text);
            self.raw(&buf)
        } else {
            self.raw(&text)
        }
    }

    fn write_array(&mut self, items: &[Value], depth: usize) -> Result<(), WriterError> {
        self.raw("(")?;
        let child_depth = depth + 1;
        let mut first = true;
        for item in items {
            if self.options.skip_nulls && item.is_null() {
                continue;
            }
            if !first {
                self.raw_char(self.separator(child_depth, false))?;
            }
            first = false;
            self.write_value(item, child_depth)?;
        }
        self.raw(")")
    }

    fn write_object(&mut self, entries: &crate::value::Object, depth: usize) -> Result<(), WriterError> {
        self.raw("(")?;
        let child_depth = depth + 1;
        let mut first = true;
        for (key, val) in entries {
            if self.options.skip_nulls && val.is_null() {
                continue;
            }
            if !first {
                self.raw_char(self.separator(child_depth, false))?;
            }
            first = false;
            self.write_literal(key, true)?;
            self.raw_char(self.separator(child_depth, true))?;
            self.write_value(val, child_depth)?;
        }
        self.raw(")")
    }

    fn raw(&mut self, s: &str) -> Result<(), WriterError> {
        self.w.write_str(s).map_err(|_| WriterError::Sink)
    }

    fn raw_char(&mut self, c: char) -> Result<(), WriterError> {
        self.w.write_char(c).map_err(|_| WriterError::Sink)
    }
}

/// Render `v` to a freshly allocated `String`.
pub fn to_string(v: &Value, options: Options) -> Result<String, WriterError> {
    let mut out = String::new();
    TextAppender::new(&mut out, options).add_value(v)?;
    Ok(out)
}
