//! Error taxonomy for the parser and writer.
//!
//! Every failure mode named in the specification's `MSG_*` table has a
//! matching [`SyntaxError`] variant. Parse errors are always reported with
//! the byte offset of the offending character; `line`/`column` are computed
//! lazily by [`ParserError::locate`] rather than on every error, since most
//! callers never inspect them.

use thiserror::Error;

/// An error produced while parsing JSON->URL text.
///
/// Carries the byte offset at which the problem was detected. Use
/// [`ParserError::locate`] to turn that offset into a 1-based line/column
/// pair against the original source text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at offset {offset}")]
pub struct ParserError {
    /// The specific syntax or limit violation.
    pub kind: SyntaxError,
    /// Byte offset into the source text where the error was detected.
    pub offset: usize,
}

impl ParserError {
    /// Construct an error at the given offset.
    #[must_use]
    pub fn new(kind: SyntaxError, offset: usize) -> Self {
        Self { kind, offset }
    }

    /// Compute the 1-based `(line, column)` of this error's offset within
    /// `source`. Lines are split on `\n`; a lone `\r` is not treated as a
    /// line break (matching the CharIterator contract in the specification,
    /// which counts CRLF as one newline and treats a lone CR as malformed
    /// input rather than a line terminator).
    #[must_use]
    pub fn locate(&self, source: &str) -> (usize, usize) {
        let mut line = 1usize;
        let mut col = 1usize;
        for (idx, ch) in source.char_indices() {
            if idx >= self.offset {
                break;
            }
            if ch == '\n' {
                line += 1;
                col = 1;
            } else {
                col += 1;
            }
        }
        (line, col)
    }
}

/// The specific kind of syntax or limit violation.
///
/// Variant names deliberately mirror the `MSG_*` constants in the
/// specification so that implementers porting tests from the source project
/// can match errors one-to-one.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    /// A byte that is not permitted in its current lexical context.
    #[error("unexpected character")]
    BadChar,
    /// A quoted string literal was not terminated before end of input.
    #[error("unterminated quoted string")]
    BadQuotedString,
    /// A `%` was not followed by two hex digits.
    #[error("invalid percent-encoding")]
    BadPercentEncoding,
    /// A percent-decoded byte sequence was not valid UTF-8.
    #[error("invalid UTF-8 byte sequence")]
    BadUtf8,
    /// The input was empty where a value was required.
    #[error("no text to parse")]
    NoText,
    /// A literal was expected but not found.
    #[error("expected a literal")]
    ExpectLiteral,
    /// The parsed value's type is not among the caller's accepted set.
    #[error("value type not permitted here")]
    ExpectType,
    /// A structural character (`(`, `)`, `,`, `:`, or WFU `&`/`=`) was
    /// expected.
    #[error("expected a structural character")]
    ExpectStructChar,
    /// An object key was expected.
    #[error("expected an object key")]
    ExpectObjectKey,
    /// An object value was expected after a key/name-separator.
    #[error("expected an object value")]
    ExpectObjectValue,
    /// End of input was reached with one or more composites still open.
    #[error("unexpected end of input: composite still open")]
    StillOpen,
    /// End of input was reached inside a quoted string.
    #[error("unexpected end of input: quoted string still open")]
    QuoteStillOpen,
    /// Trailing characters remained after a complete top-level value.
    #[error("unexpected extra characters after value")]
    ExtraChars,
    /// `maxParseChars` was exceeded.
    #[error("parse exceeded the maximum character limit")]
    LimitMaxParseChars,
    /// `maxParseValues` was exceeded.
    #[error("parse exceeded the maximum value count limit")]
    LimitMaxParseValues,
    /// `maxParseDepth` was exceeded.
    #[error("parse exceeded the maximum nesting depth limit")]
    LimitMaxParseDepth,
    /// A non-fractional integer literal overflowed and no overflow policy
    /// (or an exceeded boundary with no policy) was configured.
    #[error("integer literal exceeds configured limit")]
    LimitInteger,
}

/// An error produced while writing a `Value` as JSON->URL text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WriterError {
    /// A string contained a lone UTF-16 surrogate or an out-of-range code
    /// point and cannot be encoded.
    #[error("malformed surrogate pair or out-of-range code point in string")]
    MalformedText,
    /// `IMPLIED_STRING_LITERALS` is set but the value requires a keyword or
    /// a number, which that mode forbids emitting unambiguously.
    #[error("value cannot be represented under IMPLIED_STRING_LITERALS")]
    ImpliedStringLiterals,
    /// The factory/sink reported a failure (e.g. an I/O error from the
    /// underlying `core::fmt::Write` sink).
    #[error("writer sink error")]
    Sink,
}
