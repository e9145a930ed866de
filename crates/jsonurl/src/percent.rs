//! UTF-8 aware percent-decoding of literal text.
//!
//! [`decode`] applies these rules: `'` terminates a quoted string, `+`
//! decodes to a space, `%HH` decodes to one byte, and any other byte is
//! taken as the next byte of a UTF-8 sequence. UTF-8 reassembly is strict:
//! only the four legal RFC 3629 lead-byte prefixes are accepted, and every
//! lead byte's continuation bytes are required before the string is
//! considered valid.

use std::string::String;

use crate::error::SyntaxError;

/// Outcome of decoding a (quoted or unquoted) literal's character data.
pub struct Decoded {
    /// The decoded text.
    pub text: String,
    /// Number of source bytes consumed, *not including* a terminating quote
    /// for quoted strings (the caller accounts for that itself).
    pub consumed: usize,
}

/// Decode `src[start..stop]` as literal text.
///
/// When `quoted` is `true`, decoding stops at the first unescaped `'`
/// (which is not included in `consumed`); reaching `stop` first is
/// [`SyntaxError::BadQuotedString`]. When `quoted` is `false`, decoding
/// always runs to `stop`.
///
/// Does not allocate more than one `String`; always returns a freshly owned
/// buffer rather than writing into a caller-supplied one, favoring a simple
/// non-streaming API.
pub fn decode(src: &[u8], start: usize, stop: usize, quoted: bool) -> Result<Decoded, (SyntaxError, usize)> {
    let mut out = String::with_capacity(stop - start);
    let mut i = start;
    let mut utf8_scratch = [0u8; 4];

    while i < stop {
        let b = src[i];
        match b {
            b'\'' if quoted => {
                return Ok(Decoded {
                    text: out,
                    consumed: i - start,
                });
            }
            b'+' => {
                out.push(' ');
                i += 1;
            }
            b'%' => {
                if i + 3 > stop {
                    return Err((SyntaxError::BadPercentEncoding, i));
                }
                let hi = crate::char_class::hex_value(src[i + 1]);
                let lo = crate::char_class::hex_value(src[i + 2]);
                let (Some(hi), Some(lo)) = (hi, lo) else {
                    return Err((SyntaxError::BadPercentEncoding, i));
                };
                let byte = (hi << 4) | lo;
                i += 3;
                i = decode_utf8_byte(byte, src, i, stop, &mut out, &mut utf8_scratch, true)?;
            }
            _ if b < 0x80 => {
                out.push(b as char);
                i += 1;
            }
            _ => {
                i = decode_utf8_byte(b, src, i + 1, stop, &mut out, &mut utf8_scratch, false)?;
            }
        }
    }

    if quoted {
        return Err((SyntaxError::BadQuotedString, stop));
    }
    Ok(Decoded {
        text: out,
        consumed: stop - start,
    })
}

/// Given a lead byte already consumed (either a literal raw byte or the
/// decoded value of a `%HH` escape), pull in however many continuation
/// bytes it requires and push the resulting `char`.
///
/// `i` must point just past the lead byte. `via_percent` tracks whether
/// continuation bytes must themselves be percent-encoded: inside a literal,
/// once a multi-byte sequence begins with a raw (non-percent-encoded) lead
/// byte, its continuation bytes are also raw; if it began with `%HH`, its
/// continuations must also arrive as `%HH` triples (this matches how
/// producers always percent-encode non-ASCII text consistently byte-for-byte).
#[allow(clippy::too_many_arguments)]
fn decode_utf8_byte(
    lead: u8,
    src: &[u8],
    mut i: usize,
    stop: usize,
    out: &mut String,
    scratch: &mut [u8; 4],
    via_percent: bool,
) -> Result<usize, (SyntaxError, usize)> {
    let lead_start = i - if via_percent { 3 } else { 1 };
    let extra = if lead & 0x80 == 0 {
        scratch[0] = lead;
        out.push(lead as char);
        return Ok(i);
    } else if lead & 0xE0 == 0xC0 {
        scratch[0] = lead;
        1
    } else if lead & 0xF0 == 0xE0 {
        scratch[0] = lead;
        2
    } else if lead & 0xF8 == 0xF0 {
        scratch[0] = lead;
        3
    } else {
        return Err((SyntaxError::BadUtf8, lead_start));
    };

    for slot in 1..=extra {
        let cont = read_continuation_byte(src, &mut i, stop, via_percent, lead_start)?;
        if cont & 0xC0 != 0x80 {
            return Err((SyntaxError::BadUtf8, lead_start));
        }
        scratch[slot] = cont;
    }

    let s = core::str::from_utf8(&scratch[..=extra]).map_err(|_| (SyntaxError::BadUtf8, lead_start))?;
    out.push_str(s);
    Ok(i)
}

fn read_continuation_byte(
    src: &[u8],
    i: &mut usize,
    stop: usize,
    via_percent: bool,
    lead_start: usize,
) -> Result<u8, (SyntaxError, usize)> {
    if via_percent {
        if *i >= stop || src[*i] != b'%' || *i + 3 > stop {
            return Err((SyntaxError::BadUtf8, lead_start));
        }
        let hi = crate::char_class::hex_value(src[*i + 1]);
        let lo = crate::char_class::hex_value(src[*i + 2]);
        let (Some(hi), Some(lo)) = (hi, lo) else {
            return Err((SyntaxError::BadUtf8, lead_start));
        };
        *i += 3;
        Ok((hi << 4) | lo)
    } else {
        if *i >= stop {
            return Err((SyntaxError::BadUtf8, lead_start));
        }
        let b = src[*i];
        *i += 1;
        Ok(b)
    }
}
