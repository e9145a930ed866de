//! Abstraction over value construction, so the codec is not tied to any
//! particular value-model crate (spec.md §1's "out of scope" collaborator).

use std::string::String;

use crate::number::Number;

/// The classification of a value's shape, used by [`crate::parser`] to
/// enforce the caller's accepted top-level type set (`canReturn` in
/// spec.md §4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
    /// `()`, not yet known to be an array or an object.
    EmptyComposite,
}

/// Builds values as the parser recognizes them.
///
/// Implement this trait to parse directly into a foreign value model
/// (analogous to the source's `ValueFactory<V, Arr, ArrB, Obj, ObjB, Str,
/// Num, Bool, Null>`, collapsed here to a single associated `Value` type
/// since Rust's enum-based value model does not need separate
/// builder/instance types per spec.md §9's design note).
pub trait ValueFactory {
    /// The concrete value type this factory produces.
    type Value;

    /// Produce the distinguished `()` value.
    fn empty_composite(&mut self) -> Self::Value;

    /// Start a new, empty array value.
    fn new_array(&mut self) -> Self::Value;
    /// Append `val` to the end of `array` (which must be a value produced
    /// by [`new_array`](Self::new_array)).
    fn push_element(&mut self, array: &mut Self::Value, val: Self::Value);

    /// Start a new, empty object value.
    fn new_object(&mut self) -> Self::Value;
    /// Insert `key: val` into `obj` (which must be a value produced by
    /// [`new_object`](Self::new_object)). Re-inserting an existing key
    /// replaces its value, matching ordinary map semantics.
    fn insert_entry(&mut self, obj: &mut Self::Value, key: String, val: Self::Value);

    fn from_bool(&mut self, b: bool) -> Self::Value;
    fn from_null(&mut self) -> Self::Value;
    fn from_number(&mut self, n: Number) -> Self::Value;
    fn from_string(&mut self, s: String) -> Self::Value;

    /// Report which shape `v` has, for `canReturn` validation and for
    /// `SKIP_NULLS`/writer dispatch.
    fn classify(&self, v: &Self::Value) -> ValueKind;
}

/// Delegating impl so a parser can build a [`crate::builder::ResultBuilder`]
/// around a borrowed factory instead of taking ownership of it for the
/// duration of a single parse call.
impl<F: ValueFactory + ?Sized> ValueFactory for &mut F {
    type Value = F::Value;

    fn empty_composite(&mut self) -> Self::Value {
        (**self).empty_composite()
    }

    fn new_array(&mut self) -> Self::Value {
        (**self).new_array()
    }

    fn push_element(&mut self, array: &mut Self::Value, val: Self::Value) {
        (**self).push_element(array, val);
    }

    fn new_object(&mut self) -> Self::Value {
        (**self).new_object()
    }

    fn insert_entry(&mut self, obj: &mut Self::Value, key: String, val: Self::Value) {
        (**self).insert_entry(obj, key, val);
    }

    fn from_bool(&mut self, b: bool) -> Self::Value {
        (**self).from_bool(b)
    }

    fn from_null(&mut self) -> Self::Value {
        (**self).from_null()
    }

    fn from_number(&mut self, n: Number) -> Self::Value {
        (**self).from_number(n)
    }

    fn from_string(&mut self, s: String) -> Self::Value {
        (**self).from_string(s)
    }

    fn classify(&self, v: &Self::Value) -> ValueKind {
        (**self).classify(v)
    }
}
