//! Black-box integration scenarios against the published crate surface,
//! table-driven with `rstest` where the teacher's own integration suite
//! favors that style over ad hoc `#[test]` functions.

use jsonurl::{Value, parse, to_string};
use rstest::rstest;

#[rstest]
#[case("1", Value::from(1i64))]
#[case("-7", Value::from(-7i64))]
#[case("true", Value::Bool(true))]
#[case("false", Value::Bool(false))]
#[case("null", Value::Null)]
#[case("hello", Value::String("hello".to_string()))]
#[case("'hello world'", Value::String("hello world".to_string()))]
fn scalar_round_trips(#[case] text: &str, #[case] expected: Value) {
    assert_eq!(parse(text).unwrap(), expected);
}

#[rstest]
#[case("(1,2,3)")]
#[case("(a:1,b:2)")]
#[case("(a:(1,2),b:(c:3))")]
#[case("()")]
fn documents_round_trip_through_writer(#[case] text: &str) {
    let v = parse(text).unwrap();
    let rendered = to_string(&v).unwrap();
    let reparsed = parse(&rendered).unwrap();
    assert_eq!(v, reparsed, "re-parsing {rendered:?} should reproduce the original value");
}

#[rstest]
#[case("(a:1")]
#[case("(1,2")]
#[case("'unterminated")]
#[case("(1,2))")]
#[case("(:1)")]
fn malformed_documents_are_rejected(#[case] text: &str) {
    assert!(parse(text).is_err(), "expected {text:?} to fail to parse");
}

#[test]
fn deeply_nested_array_within_default_limits() {
    let mut text = String::new();
    for _ in 0..10 {
        text.push('(');
    }
    text.push('1');
    for _ in 0..10 {
        text.push(')');
    }
    let v = parse(&text).unwrap();
    let mut depth = 0;
    let mut cur = &v;
    loop {
        match cur {
            Value::Array(items) if items.len() == 1 => {
                depth += 1;
                cur = &items[0];
            }
            Value::Number(_) => break,
            other => panic!("unexpected shape at depth {depth}: {other:?}"),
        }
    }
    assert_eq!(depth, 10);
}
