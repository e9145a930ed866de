//! The composite parser: a non-recursive state machine driving
//! [`crate::builder::ResultBuilder`] over literal tokens produced by
//! [`crate::literal`], per spec.md §4.6.
//!
//! Recursion is replaced by an explicit `mode_stack`, one entry per
//! currently-open array or object, mirroring [`ResultBuilder`]'s own stacks
//! (spec.md §9's design note on avoiding recursive descent so that
//! `max_parse_depth` is a cheap stack-length check rather than a guard
//! against the host call stack).

use std::string::String;
use std::vec::Vec;

use crate::builder::ResultBuilder;
use crate::char_class;
use crate::error::{ParserError, SyntaxError};
use crate::factory::{ValueFactory, ValueKind};
use crate::literal::{self, LiteralValue};
use crate::number::BuildOptions;
use crate::options::{ImpliedComposite, Limits, Options};
use crate::percent;

/// The state of one currently-open composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Just opened via an explicit `(`; the first token hasn't yet revealed
    /// whether this is an array or an object.
    Undecided,
    /// An implied root whose kind is already fixed by `Parser::implied`;
    /// expect the first element directly (array form).
    ArrayStart,
    /// Same, object form: expect the first key directly.
    ObjectStart,
    /// An array with at least one element attached; expect a separator or
    /// `)`.
    ArrayAfterElement,
    /// An object that just read a key; expect a name-separator (or, under
    /// WFU at the implied root, a value-separator/end standing in for a
    /// missing value).
    ObjectExpectNameSep,
    /// An object with at least one `key:value` pair attached; expect a
    /// separator or `)`.
    ObjectAfterElement,
}

/// Parses JSON->URL text into values produced by a [`ValueFactory`].
pub struct Parser<F: ValueFactory> {
    factory: F,
    pub options: Options,
    pub limits: Limits,
    pub implied: ImpliedComposite,
    pub number_options: BuildOptions,
}

impl<F: ValueFactory> Parser<F> {
    #[must_use]
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            options: Options::default(),
            limits: Limits::default(),
            implied: ImpliedComposite::None,
            number_options: BuildOptions::default(),
        }
    }

    /// Parse `text`, accepting any top-level value shape.
    pub fn parse(&mut self, text: &str) -> Result<F::Value, ParserError> {
        self.parse_expecting(text, None)
    }

    /// Parse `text`, requiring the top-level value's shape to be one of
    /// `allowed` (the `canReturn` guard of spec.md §4.6). `None` accepts
    /// any shape.
    pub fn parse_expecting(&mut self, text: &str, allowed: Option<&[ValueKind]>) -> Result<F::Value, ParserError> {
        let bytes = text.as_bytes();
        if bytes.len() > self.limits.max_parse_chars {
            return Err(ParserError::new(SyntaxError::LimitMaxParseChars, self.limits.max_parse_chars));
        }

        let options = self.options;
        let limits = self.limits;
        let implied = self.implied;
        let number_options = self.number_options;
        let builder = ResultBuilder::new(&mut self.factory);

        let mut run = Run {
            builder,
            bytes,
            options,
            limits,
            implied,
            number_options,
            mode_stack: Vec::new(),
            value_count: 0,
        };
        let value = run.run()?;

        if let Some(allowed) = allowed {
            let kind = self.factory.classify(&value);
            if !allowed.contains(&kind) {
                return Err(ParserError::new(SyntaxError::ExpectType, bytes.len()));
            }
        }
        Ok(value)
    }

    #[must_use]
    pub fn into_factory(self) -> F {
        self.factory
    }
}

/// One `parse_expecting` call's worth of mutable state, borrowing the
/// factory through [`ResultBuilder`]'s blanket `&mut F` impl so the caller's
/// [`Parser`] keeps ownership of it across calls.
struct Run<'f, F: ValueFactory> {
    builder: ResultBuilder<&'f mut F>,
    bytes: &'f [u8],
    options: Options,
    limits: Limits,
    implied: ImpliedComposite,
    number_options: BuildOptions,
    mode_stack: Vec<Mode>,
    value_count: usize,
}

impl<'f, F: ValueFactory> Run<'f, F> {
    fn depth(&self) -> usize {
        self.mode_stack.len()
    }

    fn at_implied_root(&self) -> bool {
        self.implied != ImpliedComposite::None && self.depth() == 1
    }

    fn wfu_active(&self) -> bool {
        self.options.wfu_composite && self.at_implied_root()
    }

    fn is_struct_char(&self, b: u8) -> bool {
        char_class::is_struct_char(b, self.wfu_active())
    }

    fn value_sep(&self) -> u8 {
        if self.wfu_active() { crate::options::WFU_VALUE_SEP } else { b',' }
    }

    fn name_sep(&self) -> u8 {
        if self.wfu_active() { crate::options::WFU_NAME_SEP } else { b':' }
    }

    fn count_value(&mut self, offset: usize) -> Result<(), ParserError> {
        self.value_count += 1;
        if self.value_count > self.limits.max_parse_values {
            return Err(ParserError::new(SyntaxError::LimitMaxParseValues, offset));
        }
        Ok(())
    }

    fn push_depth(&mut self, mode: Mode, offset: usize) -> Result<(), ParserError> {
        if self.mode_stack.len() >= self.limits.max_parse_depth {
            return Err(ParserError::new(SyntaxError::LimitMaxParseDepth, offset));
        }
        self.mode_stack.push(mode);
        Ok(())
    }

    /// Entry point: drives the whole parse and returns the finished root
    /// value.
    fn run(&mut self) -> Result<F::Value, ParserError> {
        let mut pos = 0usize;

        match self.implied {
            ImpliedComposite::Array => {
                self.builder.begin_array();
                self.push_depth(Mode::ArrayStart, pos)?;
                self.count_value(pos)?;
            }
            ImpliedComposite::Object => {
                self.builder.begin_object();
                self.push_depth(Mode::ObjectStart, pos)?;
                self.count_value(pos)?;
            }
            ImpliedComposite::None => {
                if pos >= self.bytes.len() {
                    return Err(ParserError::new(SyntaxError::NoText, 0));
                }
            }
        }

        if self.implied != ImpliedComposite::None {
            if pos == self.bytes.len() {
                self.close_composite(pos)?;
                return Ok(self.builder.finish());
            }
            pos = self.parse_elements(pos)?;
        } else {
            pos = self.parse_value(pos)?;
        }

        if pos != self.bytes.len() {
            return Err(ParserError::new(SyntaxError::ExtraChars, pos));
        }

        Ok(self.builder.finish())
    }

    /// Parse one value (literal or an explicit composite) starting at
    /// `pos`, returning the position just past it.
    fn parse_value(&mut self, pos: usize) -> Result<usize, ParserError> {
        if pos < self.bytes.len() && self.bytes[pos] == b'(' {
            let pos = pos + 1;
            if pos < self.bytes.len() && self.bytes[pos] == b')' {
                self.count_value(pos)?;
                self.builder.add_empty_composite();
                return Ok(pos + 1);
            }
            self.push_depth(Mode::Undecided, pos)?;
            self.count_value(pos)?;
            self.parse_elements(pos)
        } else {
            self.parse_literal_value(pos)
        }
    }

    fn parse_literal_value(&mut self, pos: usize) -> Result<usize, ParserError> {
        let len = literal::literal_length(
            self.bytes,
            pos,
            self.bytes.len(),
            !self.options.empty_unquoted_value,
            self.wfu_active(),
        )
        .map_err(|(k, o)| ParserError::new(k, o))?;
        let stop = pos + len;
        let lv = literal::literal_to_value(self.bytes, pos, stop, self.options, self.options.empty_unquoted_value)
            .map_err(|(k, o)| ParserError::new(k, o))?;
        self.count_value(pos)?;
        self.push_literal(lv, pos)?;
        Ok(stop)
    }

    fn push_literal(&mut self, lv: LiteralValue, offset: usize) -> Result<(), ParserError> {
        let v = match lv {
            LiteralValue::String(s) => self.builder.factory_mut().from_string(s),
            LiteralValue::True => self.builder.factory_mut().from_bool(true),
            LiteralValue::False => self.builder.factory_mut().from_bool(false),
            LiteralValue::Null => self.builder.factory_mut().from_null(),
            LiteralValue::Number(nt) => {
                let num = nt.build(self.bytes, self.number_options);
                if matches!(num, crate::number::Number::OutOfRange) {
                    return Err(ParserError::new(SyntaxError::LimitInteger, offset));
                }
                self.builder.factory_mut().from_number(num)
            }
        };
        self.builder.add_literal(v);
        Ok(())
    }

    /// Decode an object key span: unlike a value literal, a key is always a
    /// string — `true`/`false`/`null`/numeric spellings are taken literally,
    /// never promoted.
    fn decode_key(&self, start: usize, stop: usize) -> Result<String, ParserError> {
        if start == stop {
            return if self.options.empty_unquoted_key {
                Ok(String::new())
            } else {
                Err(ParserError::new(SyntaxError::ExpectObjectKey, start))
            };
        }
        if self.bytes[start] == b'\'' {
            percent::decode(self.bytes, start + 1, stop, true)
                .map(|d| d.text)
                .map_err(|(k, o)| ParserError::new(k, o))
        } else {
            percent::decode(self.bytes, start, stop, false)
                .map(|d| d.text)
                .map_err(|(k, o)| ParserError::new(k, o))
        }
    }

    /// Drive the element loop of a composite whose `Mode` frame is on top
    /// of `mode_stack`, returning the position just past its close (its own
    /// `)` for an explicit composite, or end-of-input for the implied
    /// root).
    fn parse_elements(&mut self, mut pos: usize) -> Result<usize, ParserError> {
        loop {
            if pos == self.bytes.len() {
                return self.handle_end_of_input(pos);
            }

            match *self.mode_stack.last().expect("parse_elements called with an open frame") {
                Mode::Undecided => {
                    pos = self.parse_first_element(pos)?;
                }
                Mode::ArrayStart => {
                    pos = self.parse_value(pos)?;
                    self.builder.add_array_element(self.options.skip_nulls);
                    *self.mode_stack.last_mut().unwrap() = Mode::ArrayAfterElement;
                }
                Mode::ObjectStart => {
                    pos = self.parse_object_key(pos)?;
                }
                Mode::ArrayAfterElement => {
                    if self.bytes[pos] == b')' {
                        self.close_composite(pos)?;
                        return Ok(pos + 1);
                    }
                    if self.bytes[pos] != self.value_sep() {
                        return Err(ParserError::new(SyntaxError::ExpectStructChar, pos));
                    }
                    pos = self.parse_value(pos + 1)?;
                    self.builder.add_array_element(self.options.skip_nulls);
                }
                Mode::ObjectExpectNameSep => {
                    if self.bytes[pos] == self.name_sep() {
                        pos = self.parse_value(pos + 1)?;
                        self.builder.add_object_element(self.options.skip_nulls);
                        *self.mode_stack.last_mut().unwrap() = Mode::ObjectAfterElement;
                    } else if self.wfu_active() && self.is_struct_char(self.bytes[pos]) {
                        // WFU implied-object key with no value, e.g. `a&b=2`.
                        self.builder.add_missing_value();
                        self.builder.add_object_element(self.options.skip_nulls);
                        *self.mode_stack.last_mut().unwrap() = Mode::ObjectAfterElement;
                    } else {
                        return Err(ParserError::new(SyntaxError::ExpectObjectValue, pos));
                    }
                }
                Mode::ObjectAfterElement => {
                    if self.bytes[pos] == b')' {
                        self.close_composite(pos)?;
                        return Ok(pos + 1);
                    }
                    if self.bytes[pos] != self.value_sep() {
                        return Err(ParserError::new(SyntaxError::ExpectStructChar, pos));
                    }
                    pos = self.parse_object_key(pos + 1)?;
                }
            }
        }
    }

    fn handle_end_of_input(&mut self, pos: usize) -> Result<usize, ParserError> {
        if !self.at_implied_root() {
            return Err(ParserError::new(SyntaxError::StillOpen, pos));
        }
        if matches!(self.mode_stack.last(), Some(Mode::ObjectExpectNameSep)) && self.wfu_active() {
            self.builder.add_missing_value();
            self.builder.add_object_element(self.options.skip_nulls);
            *self.mode_stack.last_mut().unwrap() = Mode::ObjectAfterElement;
        }
        self.close_composite(pos)?;
        Ok(pos)
    }

    /// Parse the very first token inside a freshly opened, still
    /// `Mode::Undecided` explicit composite, resolving whether it is an
    /// array or an object.
    fn parse_first_element(&mut self, pos: usize) -> Result<usize, ParserError> {
        if self.bytes[pos] == b'(' {
            // A key must be a literal, so a leading `(` always means array.
            self.builder.begin_array();
            let pos = self.parse_value(pos)?;
            self.builder.add_array_element(self.options.skip_nulls);
            *self.mode_stack.last_mut().unwrap() = Mode::ArrayAfterElement;
            return Ok(pos);
        }

        let len = literal::literal_length(
            self.bytes,
            pos,
            self.bytes.len(),
            !self.options.empty_unquoted_key,
            self.wfu_active(),
        )
        .map_err(|(k, o)| ParserError::new(k, o))?;
        let key_stop = pos + len;

        if key_stop < self.bytes.len() && self.bytes[key_stop] == b':' {
            let key = self.decode_key(pos, key_stop)?;
            self.builder.begin_object();
            self.builder.add_object_key(key);
            let pos = self.parse_value(key_stop + 1)?;
            self.builder.add_object_element(self.options.skip_nulls);
            *self.mode_stack.last_mut().unwrap() = Mode::ObjectAfterElement;
            Ok(pos)
        } else {
            self.builder.begin_array();
            let pos = self.parse_literal_value(pos)?;
            self.builder.add_array_element(self.options.skip_nulls);
            *self.mode_stack.last_mut().unwrap() = Mode::ArrayAfterElement;
            Ok(pos)
        }
    }

    fn parse_object_key(&mut self, pos: usize) -> Result<usize, ParserError> {
        let len = literal::literal_length(
            self.bytes,
            pos,
            self.bytes.len(),
            !self.options.empty_unquoted_key,
            self.wfu_active(),
        )
        .map_err(|(k, o)| ParserError::new(k, o))?;
        let stop = pos + len;
        let key = self.decode_key(pos, stop)?;
        self.builder.add_object_key(key);
        *self.mode_stack.last_mut().unwrap() = Mode::ObjectExpectNameSep;
        Ok(stop)
    }

    /// Pop the finished composite's mode frame, finalizing its value onto
    /// the builder's value stack via `end_array`/`end_object`.
    fn close_composite(&mut self, offset: usize) -> Result<(), ParserError> {
        match self.mode_stack.pop() {
            Some(Mode::ArrayStart | Mode::ArrayAfterElement) => self.builder.end_array(),
            Some(Mode::ObjectStart | Mode::ObjectAfterElement) => self.builder.end_object(),
            Some(Mode::ObjectExpectNameSep) => return Err(ParserError::new(SyntaxError::ExpectObjectValue, offset)),
            Some(Mode::Undecided) | None => unreachable!("close_composite called on a frame with no elements yet"),
        }
        Ok(())
    }
}
