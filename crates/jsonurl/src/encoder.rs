//! String-literal writer strategies, per spec.md §4.7.
//!
//! A string's on-the-wire spelling depends on what it contains: plain text
//! goes out untouched, text with spaces prefers the WFU `+` convention over
//! quoting, and anything containing a structural or control character falls
//! back to a quoted, percent-escaped form.

use std::string::String;

use crate::char_class::{self, ENC_QSTRSAFE, ENC_STRSAFE, push_percent_encoded};
use crate::number::NumberText;

/// Which of the five spellings [`choose_strategy`] picked for a given
/// string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Written unquoted, byte-for-byte, with no percent-encoding at all.
    SafeAsIs,
    /// Written unquoted; every space becomes `+`.
    NoQuoteWithSpace,
    /// Written `'...'`; only the quote character itself needs escaping.
    QuoteNoSpace,
    /// Written `'...'`; quote and space both need escaping.
    QuoteWithSpace,
    /// Written `'...'`; every byte is percent-encoded, used for text
    /// containing control characters or other bytes unsafe in either
    /// context.
    FullEncoding,
}

/// Whether `s`, written raw, would be read back as something other than a
/// plain string — i.e. it would match a keyword or the number grammar.
/// Only matters in value position: a key is always a string regardless of
/// its spelling (spec.md §4.7 step 3), so keys never need quoting to
/// disambiguate from `true`/`false`/`null`/a number.
fn looks_like_keyword_or_number(s: &str) -> bool {
    s.is_empty()
        || s == "true"
        || s == "false"
        || s == "null"
        || NumberText::looks_like_number(s.as_bytes(), 0, s.len(), false)
}

/// Whether `b` blocks the "safe" verdict for `mask`. Space is excluded here
/// and tracked separately via `has_space`, since both unquoted and quoted
/// forms have a dedicated escape for it (`+` / `%20`) rather than treating
/// its presence as disqualifying the whole strategy.
fn byte_needs_escape(b: u8, mask: char_class::Mask) -> bool {
    if b >= 0x80 || b == b' ' {
        return false;
    }
    char_class::classify_byte(b) & mask == 0
}

/// Like [`byte_needs_escape`], but for the quoted forms, where an embedded
/// `'` also has a dedicated escape (`%27`) and so likewise never by itself
/// disqualifies the "safe" verdict.
fn quoted_byte_needs_escape(b: u8, mask: char_class::Mask) -> bool {
    b != b'\'' && byte_needs_escape(b, mask)
}

/// Decide how [`write_string`] should spell `s` in value position.
/// Equivalent to `choose_strategy_for(s, false)`; kept as the simple,
/// widely-used entry point since most callers write values, not keys.
#[must_use]
pub fn choose_strategy(s: &str) -> Strategy {
    choose_strategy_for(s, false)
}

/// Decide how [`write_string`] should spell `s`, per spec.md §4.7.
///
/// `is_key` matters only for the keyword/number-lookalike check (step 3):
/// an object key is always read back as a string regardless of its
/// spelling, so a key spelled `true` or `42` never needs quoting to
/// disambiguate it from the keyword or number grammars the way a value
/// would.
#[must_use]
pub fn choose_strategy_for(s: &str, is_key: bool) -> Strategy {
    // Step 4's "leading `'` forces FULL_ENCODING" / "any non-ASCII forces
    // FULL_ENCODING" bullets apply before the bitmask folding below, since
    // they are properties of the whole string rather than any one byte.
    if s.starts_with('\'') || s.bytes().any(|b| b >= 0x80) {
        return Strategy::FullEncoding;
    }

    let has_space = s.as_bytes().contains(&b' ');
    // An embedded (non-leading) apostrophe is ENC_STRSAFE (spec.md §4.1), so
    // it never disqualifies the unquoted forms, but like space it still has
    // its own dedicated escape (`%27`) rather than being copied raw — it
    // forces NO_QUOTE_WITH_SPACE over SAFE_ASIS the same way space does
    // (spec.md §8 scenario 5: `write("it's")` -> `it%27s`).
    let has_apostrophe = s.as_bytes().contains(&b'\'');
    let all_unquoted_safe = s.bytes().all(|b| !byte_needs_escape(b, ENC_STRSAFE));
    let all_quoted_safe = s.bytes().all(|b| !quoted_byte_needs_escape(b, ENC_QSTRSAFE));
    let ambiguous = !is_key && looks_like_keyword_or_number(s);

    if all_unquoted_safe && !has_space && !has_apostrophe && !ambiguous {
        Strategy::SafeAsIs
    } else if all_unquoted_safe && !ambiguous {
        Strategy::NoQuoteWithSpace
    } else if all_quoted_safe && !has_space {
        Strategy::QuoteNoSpace
    } else if all_quoted_safe && has_space {
        Strategy::QuoteWithSpace
    } else {
        Strategy::FullEncoding
    }
}

/// Write `s` to `out` using `strategy`.
pub fn write_string(out: &mut String, s: &str, strategy: Strategy) {
    match strategy {
        Strategy::SafeAsIs => out.push_str(s),
        Strategy::NoQuoteWithSpace => {
            let mut buf = [0u8; 4];
            for c in s.chars() {
                if c == ' ' {
                    out.push('+');
                } else if c == '\'' {
                    push_percent_encoded(out, b'\'');
                } else if c.is_ascii() && byte_needs_escape(c as u8, ENC_STRSAFE) {
                    for b in c.encode_utf8(&mut buf).as_bytes() {
                        push_percent_encoded(out, *b);
                    }
                } else {
                    out.push(c);
                }
            }
        }
        Strategy::QuoteNoSpace | Strategy::QuoteWithSpace => {
            out.push('\'');
            for c in s.chars() {
                if c == '\'' {
                    push_percent_encoded(out, b'\'');
                } else if c == ' ' {
                    push_percent_encoded(out, b' ');
                } else if c.is_ascii() && byte_needs_escape(c as u8, ENC_QSTRSAFE) {
                    let mut buf = [0u8; 4];
                    for b in c.encode_utf8(&mut buf).as_bytes() {
                        push_percent_encoded(out, *b);
                    }
                } else {
                    out.push(c);
                }
            }
            out.push('\'');
        }
        Strategy::FullEncoding => {
            out.push('\'');
            let mut buf = [0u8; 4];
            for c in s.chars() {
                for b in c.encode_utf8(&mut buf).as_bytes() {
                    push_percent_encoded(out, *b);
                }
            }
            out.push('\'');
        }
    }
}

/// Choose a strategy for `s` in value position and write it to `out` in one
/// step.
pub fn encode_literal_string(out: &mut String, s: &str) {
    write_string(out, s, choose_strategy(s));
}

/// Choose a strategy for `s` — in key or value position, per `is_key` — and
/// write it to `out` in one step.
pub fn encode_literal_string_for(out: &mut String, s: &str, is_key: bool) {
    write_string(out, s, choose_strategy_for(s, is_key));
}

/// Write `s` the way [`TextAppender`](crate::appender::TextAppender) must
/// when [`crate::options::Options::implied_string_literals`] is active:
/// every literal is unambiguously a string already (the reader never tries
/// keyword/number matching in that mode), so there is no need to quote one
/// that merely looks like a keyword or number. Quoting itself is not an
/// available escape hatch either — per spec.md §4.3 rule 2, a leading `'`
/// is not treated as opening a quoted literal when this option is active,
/// so emitting one here would round-trip as a literal apostrophe character
/// rather than delimit a string. The only safe spelling is therefore the
/// unquoted one, with every byte that is not safe raw in that context
/// (including `'` itself and any non-ASCII byte) percent-encoded, per
/// spec.md §4.7 step 2.
pub fn encode_implied_string_literal(out: &mut String, s: &str) {
    let mut buf = [0u8; 4];
    for c in s.chars() {
        if c == ' ' {
            out.push('+');
        } else if c == '\'' {
            push_percent_encoded(out, b'\'');
        } else if c.is_ascii() && !byte_needs_escape(c as u8, ENC_STRSAFE) {
            out.push(c);
        } else {
            for b in c.encode_utf8(&mut buf).as_bytes() {
                push_percent_encoded(out, *b);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_word_is_safe_as_is() {
        assert_eq!(choose_strategy("hello"), Strategy::SafeAsIs);
        let mut out = String::new();
        encode_literal_string(&mut out, "hello");
        assert_eq!(out, "hello");
    }

    #[test]
    fn keyword_lookalike_forces_quoting() {
        assert_eq!(choose_strategy("true"), Strategy::QuoteNoSpace);
        let mut out = String::new();
        encode_literal_string(&mut out, "true");
        assert_eq!(out, "'true'");
    }

    #[test]
    fn number_lookalike_forces_quoting() {
        assert_eq!(choose_strategy("42"), Strategy::QuoteNoSpace);
    }

    #[test]
    fn empty_string_is_quoted() {
        let mut out = String::new();
        encode_literal_string(&mut out, "");
        assert_eq!(out, "''");
    }

    #[test]
    fn space_prefers_plus_over_quoting() {
        assert_eq!(choose_strategy("hello world"), Strategy::NoQuoteWithSpace);
        let mut out = String::new();
        encode_literal_string(&mut out, "hello world");
        assert_eq!(out, "hello+world");
    }

    #[test]
    fn struct_chars_force_quoting() {
        assert_eq!(choose_strategy("a,b"), Strategy::QuoteNoSpace);
        let mut out = String::new();
        encode_literal_string(&mut out, "a,b");
        assert_eq!(out, "'a,b'");
    }

    #[test]
    fn struct_chars_with_space_quote_and_escape_space() {
        assert_eq!(choose_strategy("a, b"), Strategy::QuoteWithSpace);
        let mut out = String::new();
        encode_literal_string(&mut out, "a, b");
        assert_eq!(out, "'a,%20b'");
    }

    #[test]
    fn embedded_quote_is_percent_encoded() {
        // spec.md §8 scenario 5: write("it's") -> it%27s, not the quoted
        // "'it%27s'" — an embedded apostrophe alone doesn't force quoting.
        assert_eq!(choose_strategy("it's"), Strategy::NoQuoteWithSpace);
        let mut out = String::new();
        encode_literal_string(&mut out, "it's");
        assert_eq!(out, "it%27s");
    }

    #[test]
    fn control_char_forces_full_encoding() {
        assert_eq!(choose_strategy("a\u{07}b"), Strategy::FullEncoding);
        let mut out = String::new();
        encode_literal_string(&mut out, "a\u{07}b");
        assert_eq!(out, "'%61%07%62'");
    }

    #[test]
    fn non_ascii_forces_full_encoding() {
        // spec.md §8 scenario 6: write("€") -> %E2%82%AC.
        assert_eq!(choose_strategy("€"), Strategy::FullEncoding);
        let mut out = String::new();
        encode_literal_string(&mut out, "€");
        assert_eq!(out, "'%E2%82%AC'");
    }

    #[test]
    fn leading_quote_forces_full_encoding() {
        assert_eq!(choose_strategy("'hi"), Strategy::FullEncoding);
        let mut out = String::new();
        encode_literal_string(&mut out, "'hi");
        assert_eq!(out, "'%27hi'");
    }

    #[test]
    fn key_position_never_quotes_keyword_or_number_lookalikes() {
        assert_eq!(choose_strategy_for("true", true), Strategy::SafeAsIs);
        assert_eq!(choose_strategy_for("42", true), Strategy::SafeAsIs);
        let mut out = String::new();
        encode_literal_string_for(&mut out, "true", true);
        assert_eq!(out, "true");
    }

    #[test]
    fn value_position_still_quotes_keyword_or_number_lookalikes() {
        assert_eq!(choose_strategy_for("true", false), Strategy::QuoteNoSpace);
    }

    #[test]
    fn implied_string_literal_skips_keyword_quoting() {
        let mut out = String::new();
        encode_implied_string_literal(&mut out, "true");
        assert_eq!(out, "true");
    }

    #[test]
    fn implied_string_literal_percent_encodes_struct_and_quote_chars() {
        let mut out = String::new();
        encode_implied_string_literal(&mut out, "a,b'c");
        assert_eq!(out, "a%2Cb%27c");
    }

    #[test]
    fn implied_string_literal_turns_space_into_plus() {
        let mut out = String::new();
        encode_implied_string_literal(&mut out, "a b");
        assert_eq!(out, "a+b");
    }
}
