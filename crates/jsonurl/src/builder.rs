//! [`ResultBuilder`]: the stack-based adapter between [`crate::parser`] and
//! a [`ValueFactory`], per spec.md §4.5.
//!
//! Three explicit stacks replace recursion, per spec.md §9's design note:
//! `builder_stack` holds composites still being assembled, `value_stack`
//! holds finished children awaiting insertion into their parent, and
//! `key_stack` holds object keys awaiting their value.

use std::string::String;
use std::vec::Vec;

use crate::factory::{ValueFactory, ValueKind};

enum Frame<V> {
    Array(V),
    Object(V),
}

/// Accumulates a value under construction as [`crate::parser::ParserCore`]
/// drives it.
pub struct ResultBuilder<F: ValueFactory> {
    factory: F,
    builder_stack: Vec<Frame<F::Value>>,
    value_stack: Vec<F::Value>,
    key_stack: Vec<String>,
}

impl<F: ValueFactory> ResultBuilder<F> {
    #[must_use]
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            builder_stack: Vec::new(),
            value_stack: Vec::new(),
            key_stack: Vec::new(),
        }
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }

    pub fn begin_array(&mut self) {
        let v = self.factory.new_array();
        self.builder_stack.push(Frame::Array(v));
    }

    pub fn end_array(&mut self) {
        match self.builder_stack.pop() {
            Some(Frame::Array(v)) => self.value_stack.push(v),
            _ => unreachable!("endArray called without a matching array frame"),
        }
    }

    pub fn begin_object(&mut self) {
        let v = self.factory.new_object();
        self.builder_stack.push(Frame::Object(v));
    }

    pub fn end_object(&mut self) {
        match self.builder_stack.pop() {
            Some(Frame::Object(v)) => self.value_stack.push(v),
            _ => unreachable!("endObject called without a matching object frame"),
        }
    }

    pub fn add_empty_composite(&mut self) {
        let v = self.factory.empty_composite();
        self.value_stack.push(v);
    }

    pub fn add_literal(&mut self, v: F::Value) {
        self.value_stack.push(v);
    }

    pub fn add_object_key(&mut self, key: String) {
        self.key_stack.push(key);
    }

    /// Attach the most recently finished value as the next element of the
    /// array frame currently on top of `builder_stack`.
    pub fn add_array_element(&mut self, skip_nulls: bool) {
        let v = self.value_stack.pop().expect("an element value was just parsed");
        if skip_nulls && matches!(self.factory.classify(&v), ValueKind::Null) {
            return;
        }
        match self.builder_stack.last_mut() {
            Some(Frame::Array(arr)) => self.factory.push_element(arr, v),
            _ => unreachable!("addArrayElement called outside an array frame"),
        }
    }

    /// Attach the most recently finished value, keyed by the most recently
    /// pushed key, into the object frame currently on top of
    /// `builder_stack`.
    pub fn add_object_element(&mut self, skip_nulls: bool) {
        let v = self.value_stack.pop().expect("an element value was just parsed");
        let key = self.key_stack.pop().expect("addObjectKey precedes addObjectElement");
        if skip_nulls && matches!(self.factory.classify(&v), ValueKind::Null) {
            return;
        }
        match self.builder_stack.last_mut() {
            Some(Frame::Object(obj)) => self.factory.insert_entry(obj, key, v),
            _ => unreachable!("addObjectElement called outside an object frame"),
        }
    }

    /// WFU implied-object mode: a key appeared with no name-separator and
    /// no value. Supplies the empty string as its value.
    pub fn add_missing_value(&mut self) {
        let v = self.factory.from_string(String::new());
        self.value_stack.push(v);
    }

    /// The finished root value, once parsing has reached end of input at
    /// depth 0.
    pub fn finish(mut self) -> F::Value {
        self.value_stack.pop().expect("parser always leaves exactly one root value")
    }

    pub fn classify_top(&self) -> Option<ValueKind> {
        self.value_stack.last().map(|v| self.factory.classify(v))
    }
}
