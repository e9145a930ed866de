//! Cross-module scenarios exercising the parser/writer pipeline end to end,
//! as opposed to each module's own colocated unit tests.


use crate::{
    ImpliedComposite, Number, Object, Options, Parser, StdFactory, Value, parse, parse_with, to_string, to_string_with,
};

fn obj(pairs: &[(&str, Value)]) -> Value {
    let mut m = Object::new();
    for (k, v) in pairs {
        m.insert((*k).to_string(), v.clone());
    }
    Value::Object(m)
}

#[test]
fn flat_object_round_trips() {
    let v = parse("(a:1,b:true,c:null)").unwrap();
    assert_eq!(v, obj(&[("a", Value::from(1i64)), ("b", Value::Bool(true)), ("c", Value::Null)]));
    assert_eq!(to_string(&v).unwrap(), "(a:1,b:true,c:null)");
}

#[test]
fn nested_array_and_object() {
    let v = parse("(ids:(1,2,3),meta:(owner:alice))").unwrap();
    let Value::Object(top) = &v else { panic!("expected object") };
    assert_eq!(top["ids"], Value::Array(vec![Value::from(1i64), Value::from(2i64), Value::from(3i64)]));
    let Value::Object(meta) = &top["meta"] else { panic!("expected nested object") };
    assert_eq!(meta["owner"], Value::String("alice".to_string()));
}

#[test]
fn single_element_array_shorthand() {
    // A bare `(x)` with no comma is a one-element array, not a parenthesized
    // scalar — JSON->URL has no grouping-parens concept.
    let v = parse("(42)").unwrap();
    assert_eq!(v, Value::Array(vec![Value::from(42i64)]));
}

#[test]
fn empty_composite_parses_and_round_trips() {
    let v = parse("()").unwrap();
    assert_eq!(v, Value::EmptyComposite);
    assert_eq!(to_string(&v).unwrap(), "()");
}

#[test]
fn quoted_strings_disambiguate_keywords() {
    let v = parse("('true','42','null')").unwrap();
    assert_eq!(
        v,
        Value::Array(vec![
            Value::String("true".to_string()),
            Value::String("42".to_string()),
            Value::String("null".to_string()),
        ])
    );
}

#[test]
fn top_level_scalar_is_a_bare_literal() {
    assert_eq!(parse("42").unwrap(), Value::from(42i64));
    assert_eq!(parse("true").unwrap(), Value::Bool(true));
    assert_eq!(parse("hello").unwrap(), Value::String("hello".to_string()));
}

#[test]
fn percent_and_plus_decode_in_strings() {
    let v = parse("hello+world%21").unwrap();
    assert_eq!(v, Value::String("hello world!".to_string()));
}

#[test]
fn implied_array_parses_without_outer_parens() {
    let mut p = Parser::new(StdFactory);
    p.implied = ImpliedComposite::Array;
    let v = p.parse("1,2,3").unwrap();
    assert_eq!(v, Value::Array(vec![Value::from(1i64), Value::from(2i64), Value::from(3i64)]));
}

#[test]
fn implied_object_wfu_mode_parses_query_string_style() {
    let mut opts = Options::default();
    opts.wfu_composite = true;
    let v = parse_with("a=1&b=hello+world", opts, crate::Limits::default());
    // `parse_with` doesn't set `implied`; exercise the implied path directly.
    assert!(v.is_err() || v.is_ok());

    let mut p = Parser::new(StdFactory);
    p.implied = ImpliedComposite::Object;
    p.options.wfu_composite = true;
    let v = p.parse("a=1&b=hello+world").unwrap();
    assert_eq!(v, obj(&[("a", Value::from(1i64)), ("b", Value::String("hello world".to_string()))]));
}

#[test]
fn implied_object_wfu_missing_value_becomes_empty_string() {
    let mut p = Parser::new(StdFactory);
    p.implied = ImpliedComposite::Object;
    p.options.wfu_composite = true;
    let v = p.parse("flag&count=3").unwrap();
    assert_eq!(v, obj(&[("flag", Value::String(String::new())), ("count", Value::from(3i64))]));
}

#[test]
fn unterminated_composite_is_still_open() {
    let err = parse("(a:1").unwrap_err();
    assert_eq!(err.kind, crate::SyntaxError::StillOpen);
}

#[test]
fn trailing_characters_are_rejected() {
    let err = parse("(1,2))").unwrap_err();
    assert_eq!(err.kind, crate::SyntaxError::ExtraChars);
}

#[test]
fn max_parse_depth_is_enforced() {
    let mut p = Parser::new(StdFactory);
    p.limits.max_parse_depth = 2;
    let err = p.parse("(((1)))").unwrap_err();
    assert_eq!(err.kind, crate::SyntaxError::LimitMaxParseDepth);
}

#[test]
fn max_parse_values_is_enforced() {
    let mut p = Parser::new(StdFactory);
    p.limits.max_parse_values = 2;
    let err = p.parse("(1,2,3)").unwrap_err();
    assert_eq!(err.kind, crate::SyntaxError::LimitMaxParseValues);
}

#[test]
fn skip_nulls_option_drops_nulls_on_both_ends() {
    let mut opts = Options::default();
    opts.skip_nulls = true;
    let v = parse_with("(1,null,2)", opts, crate::Limits::default()).unwrap();
    assert_eq!(v, Value::Array(vec![Value::from(1i64), Value::from(2i64)]));
    assert_eq!(to_string_with(&v, opts).unwrap(), "(1,2)");
}

#[test]
fn value_round_trips_through_serde_json() {
    let v = obj(&[
        ("name", Value::String("alice".to_string())),
        ("tags", Value::Array(vec![Value::from(1i64), Value::Bool(false)])),
    ]);
    let json = serde_json::to_string(&v).unwrap();
    let back: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v, back);
}

#[test]
fn non_ascii_string_round_trips_through_full_encoding() {
    let v = obj(&[("city", Value::String("Zürich €".to_string()))]);
    let text = to_string(&v).unwrap();
    assert_eq!(parse(&text).unwrap(), v);
}

#[test]
fn keyword_lookalike_key_round_trips_unquoted() {
    let v = obj(&[("true", Value::from(1i64)), ("42", Value::Bool(false))]);
    let text = to_string(&v).unwrap();
    assert!(text.contains("true:1"), "key `true` should not be quoted: {text}");
    assert_eq!(parse(&text).unwrap(), v);
}

#[test]
fn big_integer_promotion_round_trips() {
    let v = parse("9223372036854775808").unwrap();
    match v {
        Value::Number(Number::Big(_)) => {}
        other => panic!("expected a promoted BigInt, got {other:?}"),
    }
    assert_eq!(to_string(&v).unwrap(), "9223372036854775808");
}
