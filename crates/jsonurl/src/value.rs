//! The built-in [`Value`] tagged union and its [`ValueFactory`] impl.

use std::fmt;
use std::string::String;

use indexmap::IndexMap;

use crate::factory::{ValueFactory, ValueKind};
use crate::number::Number;

/// An object's entries, in insertion order.
///
/// The specification leaves object key ordering unspecified (spec.md §3,
/// §9); this port preserves insertion order via [`indexmap::IndexMap`],
/// a strict superset of the unordered behavior described, as recommended
/// by the specification's own design notes.
pub type Object = IndexMap<String, Value>;

/// An array of values.
pub type Array = Vec<Value>;

/// A JSON->URL value: exactly the six tagged cases from spec.md §3, plus
/// the distinguished [`Value::EmptyComposite`] singleton that may coerce to
/// either an empty array or an empty object depending on context.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Array),
    Object(Object),
    /// `()`. Produced by the parser whenever it cannot yet tell whether an
    /// empty composite is an array or an object; [`ValueFactory::classify`]
    /// reports it as [`ValueKind::EmptyComposite`] so callers needing a
    /// concrete array/object can coerce it themselves.
    EmptyComposite,
}

impl Value {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_) | Self::EmptyComposite)
    }

    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_) | Self::EmptyComposite)
    }

    /// Coerce `EmptyComposite` to an empty array; leaves other variants
    /// untouched.
    #[must_use]
    pub fn coerce_empty_array(self) -> Self {
        match self {
            Self::EmptyComposite => Self::Array(Array::new()),
            other => other,
        }
    }

    /// Coerce `EmptyComposite` to an empty object; leaves other variants
    /// untouched.
    #[must_use]
    pub fn coerce_empty_object(self) -> Self {
        match self {
            Self::EmptyComposite => Self::Object(Object::new()),
            other => other,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Number(Number::Int(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<Object> for Value {
    fn from(v: Object) -> Self {
        Self::Object(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut appender = crate::appender::TextAppender::new(f, crate::options::Options::default());
        appender.add_value(self).map_err(|_| fmt::Error)
    }
}

/// The crate's batteries-included [`ValueFactory`] implementation,
/// producing the built-in [`Value`] enum.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFactory;

impl ValueFactory for StdFactory {
    type Value = Value;

    fn empty_composite(&mut self) -> Self::Value {
        Value::EmptyComposite
    }

    fn new_array(&mut self) -> Self::Value {
        Value::Array(Array::new())
    }

    fn push_element(&mut self, array: &mut Self::Value, val: Self::Value) {
        if let Value::Array(a) = array {
            a.push(val);
        }
    }

    fn new_object(&mut self) -> Self::Value {
        Value::Object(Object::new())
    }

    fn insert_entry(&mut self, obj: &mut Self::Value, key: String, val: Self::Value) {
        if let Value::Object(o) = obj {
            o.insert(key, val);
        }
    }

    fn from_bool(&mut self, b: bool) -> Self::Value {
        Value::Bool(b)
    }

    fn from_null(&mut self) -> Self::Value {
        Value::Null
    }

    fn from_number(&mut self, n: Number) -> Self::Value {
        Value::Number(n)
    }

    fn from_string(&mut self, s: String) -> Self::Value {
        Value::String(s)
    }

    fn classify(&self, v: &Self::Value) -> ValueKind {
        match v {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
            Value::EmptyComposite => ValueKind::EmptyComposite,
        }
    }
}
