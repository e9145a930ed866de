//! Number literal lexing and promotion.
//!
//! [`NumberText`] is a non-owning view recording the index spans of a
//! number's integer/fractional/exponent parts, mirroring the specification's
//! `NumberText` exactly. [`NumberText::build`] then materializes one of
//! [`Number`]'s variants following the promotion ladder in spec.md §4.4.

use std::string::String;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::Num;

/// How a number's exponent, if any, was spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExponentKind {
    None,
    JustValue,
    PositiveSign,
    NegativeSign,
}

/// A parsed-but-not-yet-materialized numeric literal.
///
/// All indices are byte offsets into the original source slice. Per the
/// specification's invariant: if [`parse`](NumberText::parse) returns
/// `Some`, the spans partition `[start, stop)` in order and every digit
/// span contains only ASCII `0-9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberText {
    pub start: usize,
    pub int_start: usize,
    pub int_stop: usize,
    pub fract_start: usize,
    pub fract_stop: usize,
    pub exp_start: usize,
    pub exp_stop: usize,
    pub stop: usize,
    pub exponent_kind: ExponentKind,
}

impl NumberText {
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.int_start > self.start
    }

    #[must_use]
    pub fn has_fraction(&self) -> bool {
        self.fract_stop > self.fract_start
    }

    #[must_use]
    pub fn has_integer(&self) -> bool {
        self.int_stop > self.int_start
    }

    #[must_use]
    pub fn is_non_fractional(&self) -> bool {
        self.has_integer() && !self.has_fraction() && self.exponent_kind != ExponentKind::NegativeSign
    }

    /// Attempt to match the number grammar
    /// `-? (0 | [1-9][0-9]*) ('.' [0-9]+)? ([eE] [+-]? [0-9]+)?`
    /// starting at `start`. Returns `None` without consuming anything if the
    /// text does not begin with a valid number at `start`.
    #[must_use]
    pub fn parse(text: &[u8], start: usize, stop: usize) -> Option<Self> {
        let mut i = start;
        if i >= stop {
            return None;
        }
        if text[i] == b'-' {
            i += 1;
        }
        let int_start = i;
        if i >= stop || !text[i].is_ascii_digit() {
            return None;
        }
        if text[i] == b'0' {
            i += 1;
        } else {
            while i < stop && text[i].is_ascii_digit() {
                i += 1;
            }
        }
        let int_stop = i;

        let mut fract_start = i;
        let mut fract_stop = i;
        if i < stop && text[i] == b'.' {
            let mut j = i + 1;
            let digits_start = j;
            while j < stop && text[j].is_ascii_digit() {
                j += 1;
            }
            if j == digits_start {
                return None;
            }
            fract_start = digits_start;
            fract_stop = j;
            i = j;
        }

        let mut exp_start = i;
        let mut exp_stop = i;
        let mut exponent_kind = ExponentKind::None;
        if i < stop && (text[i] == b'e' || text[i] == b'E') {
            let mut j = i + 1;
            let kind = if j < stop && text[j] == b'+' {
                j += 1;
                ExponentKind::PositiveSign
            } else if j < stop && text[j] == b'-' {
                j += 1;
                ExponentKind::NegativeSign
            } else {
                ExponentKind::JustValue
            };
            let digits_start = j;
            while j < stop && text[j].is_ascii_digit() {
                j += 1;
            }
            if j == digits_start {
                return None;
            }
            exp_start = digits_start;
            exp_stop = j;
            exponent_kind = kind;
            i = j;
        }

        Some(Self {
            start,
            int_start,
            int_stop,
            fract_start,
            fract_stop,
            exp_start,
            exp_stop,
            stop: i,
            exponent_kind,
        })
    }

    /// Like [`parse`](Self::parse) but does not record spans and rejects any
    /// number with a fractional part or a negative exponent when
    /// `non_fractional_only` is set. Used by the literal lexer when it only
    /// needs to know "is this a number" without materializing one.
    #[must_use]
    pub fn looks_like_number(text: &[u8], start: usize, stop: usize, non_fractional_only: bool) -> bool {
        match Self::parse(text, start, stop) {
            Some(nt) if nt.stop == stop => {
                if non_fractional_only {
                    nt.is_non_fractional()
                } else {
                    true
                }
            }
            _ => false,
        }
    }

    fn exp_value(&self, text: &[u8]) -> i64 {
        if self.exp_stop <= self.exp_start {
            return 0;
        }
        let digits = std::str::from_utf8(&text[self.exp_start..self.exp_stop]).unwrap_or("0");
        let value: i64 = digits.parse().unwrap_or(i64::MAX);
        if self.exponent_kind == ExponentKind::NegativeSign {
            -value
        } else {
            value
        }
    }

    /// Materialize this number per the promotion ladder in spec.md §4.4.
    #[must_use]
    pub fn build(&self, text: &[u8], opts: BuildOptions) -> Number {
        let full = std::str::from_utf8(&text[self.start..self.stop]).expect("pre-validated ASCII digit grammar");

        if self.has_fraction() || self.exponent_kind == ExponentKind::NegativeSign {
            return if opts.primitive_only {
                Number::Double(full.parse().unwrap_or(f64::NAN))
            } else {
                let mc_digits = opts.big_math.and_then(|bm| bm.math_context_digits);
                Number::Decimal(round_decimal(parse_big_decimal(full), mc_digits))
            };
        }

        let exp_value = self.exp_value(text);
        let digit_count = (self.int_stop - self.int_start) as i64 + exp_value;

        if fits_in_i64(text, self.int_start, self.int_stop, exp_value, self.is_negative()) {
            let mantissa: i64 = std::str::from_utf8(&text[self.int_start..self.int_stop])
                .unwrap()
                .parse()
                .unwrap_or(0);
            let mantissa = if self.is_negative() { -mantissa } else { mantissa };
            let scaled = mantissa.checked_mul(10i64.checked_pow(u32::try_from(exp_value.max(0)).unwrap_or(0)).unwrap_or(1));
            if let Some(scaled) = scaled {
                return Number::Int(scaled);
            }
        }

        if opts.primitive_only {
            return Number::Double(full.parse().unwrap_or(f64::NAN));
        }

        let Some(big_math) = opts.big_math else {
            return Number::Big(big_int_with_exponent(text, self.int_start, self.int_stop, exp_value, self.is_negative()));
        };

        let Some(boundary) = big_math.boundary.as_ref() else {
            return Number::Big(big_int_with_exponent(text, self.int_start, self.int_stop, exp_value, self.is_negative()));
        };

        let magnitude = digit_count;
        if magnitude <= boundary.digit_count {
            return Number::Big(big_int_with_exponent(text, self.int_start, self.int_stop, exp_value, self.is_negative()));
        }

        match big_math.overflow {
            Some(OverflowPolicy::Double) => Number::Double(full.parse().unwrap_or(f64::NAN)),
            Some(OverflowPolicy::BigDecimal) => {
                Number::Decimal(round_decimal(parse_big_decimal(full), big_math.math_context_digits))
            }
            Some(OverflowPolicy::Infinity) => {
                Number::Infinity { negative: self.is_negative() }
            }
            None => Number::OutOfRange,
        }
    }
}

fn parse_big_decimal(s: &str) -> BigDecimal {
    s.parse().unwrap_or_else(|_| BigDecimal::from(0))
}

fn round_decimal(d: BigDecimal, digits: Option<u64>) -> BigDecimal {
    match digits {
        Some(n) => d.with_prec(n),
        None => d,
    }
}

fn big_int_with_exponent(text: &[u8], int_start: usize, int_stop: usize, exp_value: i64, negative: bool) -> BigInt {
    let digits = std::str::from_utf8(&text[int_start..int_stop]).unwrap_or("0");
    let mut n = BigInt::from_str_radix(digits, 10).unwrap_or_default();
    if negative {
        n = -n;
    }
    if exp_value > 0 {
        let ten = BigInt::from(10);
        n *= ten.pow(u32::try_from(exp_value).unwrap_or(0));
    }
    n
}

/// Compare the decimal digits of an integer literal against `i64::MAX`
/// (with its magnitude's sign accounted for) without building a `BigInt`.
fn fits_in_i64(text: &[u8], int_start: usize, int_stop: usize, exp_value: i64, negative: bool) -> bool {
    if exp_value < 0 {
        return false;
    }
    let digit_len = (int_stop - int_start) as i64 + exp_value;
    const MAX_POS: &[u8] = b"9223372036854775807";
    const MAX_NEG: &[u8] = b"9223372036854775808";
    let bound = if negative { MAX_NEG } else { MAX_POS };
    if digit_len < bound.len() as i64 {
        return true;
    }
    if digit_len > bound.len() as i64 {
        return false;
    }
    // Equal length: compare digit-by-digit. exp_value zero-pads at the end,
    // so when exp_value > 0 the literal's own digits only occupy a prefix.
    let mut buf = [0u8; 19];
    let lit_len = int_stop - int_start;
    buf[..lit_len].copy_from_slice(&text[int_start..int_stop]);
    for slot in buf.iter_mut().skip(lit_len) {
        *slot = b'0';
    }
    buf.as_slice() <= bound
}

/// Knobs controlling how [`NumberText::build`] promotes out-of-`i64` values.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// If set, never produce `BigInt`/`BigDecimal`: fractional/overflowing
    /// values become `f64` instead.
    pub primitive_only: bool,
    pub big_math: Option<BigMathConfig>,
}

/// Configuration for arbitrary-precision promotion, mirroring the source's
/// `bigMath` collaborator.
#[derive(Debug, Clone, Copy, Default)]
pub struct BigMathConfig {
    /// Number of significant digits to round `BigDecimal` results to; `None`
    /// means unlimited precision.
    pub math_context_digits: Option<u64>,
    /// Maximum integer digit count before `overflow` is consulted. `None`
    /// means unlimited (always produce `BigInt`).
    pub boundary: Option<IntegerBoundary>,
    /// What to do when `boundary` is exceeded. `None` (with a boundary
    /// configured) means `MSG_LIMIT_INTEGER`.
    pub overflow: Option<OverflowPolicy>,
}

#[derive(Debug, Clone, Copy)]
pub struct IntegerBoundary {
    pub digit_count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowPolicy {
    Double,
    BigDecimal,
    Infinity,
}

/// A materialized JSON->URL number, following the promotion ladder described
/// in the specification. `OutOfRange` corresponds to `MSG_LIMIT_INTEGER`:
/// a boundary was configured with no overflow policy and the value exceeded
/// it.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Int(i64),
    Big(BigInt),
    Decimal(BigDecimal),
    Double(f64),
    Infinity { negative: bool },
    OutOfRange,
}

impl Number {
    /// Render this number back to its canonical decimal text form, used by
    /// the writer and by `Display`.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Number::Int(n) => n.to_string(),
            Number::Big(n) => n.to_string(),
            Number::Decimal(n) => n.to_string(),
            Number::Double(n) => {
                if n.is_infinite() {
                    if *n > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() }
                } else if n.is_nan() {
                    "NaN".to_string()
                } else {
                    n.to_string()
                }
            }
            Number::Infinity { negative } => {
                if *negative { "-Infinity".to_string() } else { "Infinity".to_string() }
            }
            Number::OutOfRange => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_all(s: &str) -> NumberText {
        let nt = NumberText::parse(s.as_bytes(), 0, s.len()).expect("should parse");
        assert_eq!(nt.stop, s.len(), "did not consume entire literal: {s}");
        nt
    }

    #[test]
    fn integer_fits_i64() {
        let nt = parse_all("42");
        let n = nt.build("42".as_bytes(), BuildOptions::default());
        assert_eq!(n, Number::Int(42));
    }

    #[test]
    fn negative_integer() {
        let nt = parse_all("-42");
        let n = nt.build("-42".as_bytes(), BuildOptions::default());
        assert_eq!(n, Number::Int(-42));
    }

    #[test]
    fn rejects_leading_zero_with_more_digits() {
        assert!(NumberText::parse(b"0123", 0, 4).map(|nt| nt.stop) != Some(4));
    }

    #[test]
    fn fraction_becomes_decimal_by_default() {
        let nt = parse_all("3.14");
        let n = nt.build("3.14".as_bytes(), BuildOptions::default());
        match n {
            Number::Decimal(d) => assert_eq!(d.to_string(), "3.14"),
            other => panic!("expected Decimal, got {other:?}"),
        }
    }

    #[test]
    fn fraction_becomes_double_when_primitive_only() {
        let nt = parse_all("3.14");
        let n = nt.build(
            "3.14".as_bytes(),
            BuildOptions {
                primitive_only: true,
                ..Default::default()
            },
        );
        assert_eq!(n, Number::Double(3.14));
    }

    #[test]
    fn max_i64_fits() {
        let s = "9223372036854775807";
        let nt = parse_all(s);
        let n = nt.build(s.as_bytes(), BuildOptions::default());
        assert_eq!(n, Number::Int(i64::MAX));
    }

    #[test]
    fn max_i64_plus_one_overflows_to_bigint_by_default() {
        let s = "9223372036854775808";
        let nt = parse_all(s);
        let n = nt.build(s.as_bytes(), BuildOptions::default());
        match n {
            Number::Big(b) => assert_eq!(b.to_string(), s),
            other => panic!("expected Big, got {other:?}"),
        }
    }

    #[test]
    fn overflow_without_boundary_policy_is_out_of_range() {
        let s = "9223372036854775808";
        let nt = parse_all(s);
        let n = nt.build(
            s.as_bytes(),
            BuildOptions {
                big_math: Some(BigMathConfig {
                    boundary: Some(IntegerBoundary { digit_count: 18 }),
                    ..Default::default()
                }),
                ..Default::default()
            },
        );
        assert_eq!(n, Number::OutOfRange);
    }

    #[test]
    fn overflow_with_infinity_policy() {
        let s = "9223372036854775808";
        let nt = parse_all(s);
        let n = nt.build(
            s.as_bytes(),
            BuildOptions {
                big_math: Some(BigMathConfig {
                    boundary: Some(IntegerBoundary { digit_count: 18 }),
                    overflow: Some(OverflowPolicy::Infinity),
                    ..Default::default()
                }),
                ..Default::default()
            },
        );
        assert_eq!(n, Number::Infinity { negative: false });
    }

    #[test]
    fn negative_overflow_infinity_is_negative() {
        let s = "-92233720368547758080";
        let nt = parse_all(s);
        let n = nt.build(
            s.as_bytes(),
            BuildOptions {
                big_math: Some(BigMathConfig {
                    boundary: Some(IntegerBoundary { digit_count: 18 }),
                    overflow: Some(OverflowPolicy::Infinity),
                    ..Default::default()
                }),
                ..Default::default()
            },
        );
        assert_eq!(n, Number::Infinity { negative: true });
    }

    #[test]
    fn exponent_scales_integer() {
        let s = "1e3";
        let nt = parse_all(s);
        let n = nt.build(s.as_bytes(), BuildOptions::default());
        assert_eq!(n, Number::Int(1000));
    }

    #[test]
    fn negative_exponent_forces_fraction_path() {
        let s = "1e-2";
        let nt = parse_all(s);
        let n = nt.build(s.as_bytes(), BuildOptions::default());
        match n {
            Number::Decimal(d) => assert_eq!(d.to_string(), "0.01"),
            other => panic!("expected Decimal, got {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_grammar() {
        assert!(NumberText::parse(b"-", 0, 1).is_none());
        assert!(NumberText::parse(b".5", 0, 2).is_none());
        assert!(NumberText::parse(b"1.", 0, 2).is_none());
        assert!(NumberText::parse(b"1e", 0, 2).is_none());
    }
}
