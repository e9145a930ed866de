//! Parser/writer options and parse limits.

/// Behavior flags recognized by both the parser and the writer. All default
/// to `false`, matching spec.md §3.
///
/// A plain `Copy` struct of `bool`s (rather than a packed bitset) is used
/// deliberately: the specification's design notes (§9) observe the options
/// are "naturally a small bitset," but a struct of named fields is equally
/// cheap to pass by value and is far more self-documenting at call sites
/// than a bitmask, matching this crate's teacher's preference for named
/// `bool` fields on its own `ParserOptions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub struct Options {
    /// At depth 1 of an implied top-level composite, `&` acts as a value
    /// separator and `=` acts as a name separator.
    pub wfu_composite: bool,
    /// Every literal is a string; keywords and numbers are never
    /// recognized as such.
    pub implied_string_literals: bool,
    /// Allow a zero-length literal in key position.
    pub empty_unquoted_key: bool,
    /// Allow a zero-length literal in value position.
    pub empty_unquoted_value: bool,
    /// Drop `null` array/object elements on read and write.
    pub skip_nulls: bool,
    /// On write, emit `null` values as the empty string.
    pub coerce_null_to_empty_string: bool,
    /// Address-bar-query-friendly encoding variant. Reserved: parsed but
    /// not currently consulted by either the parser or the writer, per
    /// spec.md §9's open question.
    pub aqf: bool,
}

/// Parse-call-scoped limits guarding against adversarial input. Defaults
/// match spec.md §3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of source characters a single parse may consume.
    pub max_parse_chars: usize,
    /// Maximum composite nesting depth.
    pub max_parse_depth: usize,
    /// Maximum number of values (scalars and composites) a single parse may
    /// produce.
    pub max_parse_values: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_parse_chars: 8192,
            max_parse_depth: 16,
            max_parse_values: 1024,
        }
    }
}

/// Which top-level shape the input is expected to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImpliedComposite {
    /// No implied wrapper: the text must itself begin with `(` or be a
    /// standalone literal.
    #[default]
    None,
    /// The entire input is treated as the contents of an implied array.
    Array,
    /// The entire input is treated as the contents of an implied object.
    Object,
}

/// `application/x-www-form-urlencoded`-style separators used in place of
/// `,`/`:` at depth 1, when [`Options::wfu_composite`] is set and an
/// implied composite is in effect. Not part of the public surface; kept
/// internal because the only place it is consulted is [`crate::parser`].
pub(crate) const WFU_VALUE_SEP: u8 = b'&';
pub(crate) const WFU_NAME_SEP: u8 = b'=';
