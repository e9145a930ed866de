#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use jsonurl::{Value, parse, to_string};
use libfuzzer_sys::fuzz_target;

const MAX_DEPTH: u8 = 5;

fn arbitrary_value(u: &mut Unstructured<'_>, depth: u8) -> arbitrary::Result<Value> {
    if depth >= MAX_DEPTH {
        return arbitrary_scalar(u);
    }
    match u.int_in_range(0..=5)? {
        0..=2 => arbitrary_scalar(u),
        3 => {
            let len = u.int_in_range(0..=4)?;
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(arbitrary_value(u, depth + 1)?);
            }
            Ok(Value::Array(items))
        }
        _ => {
            let len = u.int_in_range(0..=4)?;
            let mut obj = jsonurl::Object::new();
            for i in 0..len {
                let key = format!("k{i}");
                obj.insert(key, arbitrary_value(u, depth + 1)?);
            }
            Ok(Value::Object(obj))
        }
    }
}

fn arbitrary_scalar(u: &mut Unstructured<'_>) -> arbitrary::Result<Value> {
    Ok(match u.int_in_range(0..=3)? {
        0 => Value::Null,
        1 => Value::Bool(bool::arbitrary(u)?),
        2 => Value::from(i64::arbitrary(u)?),
        _ => Value::String(String::arbitrary(u)?),
    })
}

/// An empty array, an empty object, and `()` are indistinguishable on the
/// wire, so a byte-for-byte `Value` comparison after a round trip would
/// spuriously fail whenever an empty composite is involved.
fn is_empty_composite(v: &Value) -> bool {
    matches!(v, Value::EmptyComposite) || matches!(v, Value::Array(a) if a.is_empty()) || matches!(v, Value::Object(o) if o.is_empty())
}

fn values_equivalent(a: &Value, b: &Value) -> bool {
    match (a, b) {
        _ if is_empty_composite(a) && is_empty_composite(b) => true,
        (Value::Array(xs), Value::Array(ys)) => xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equivalent(x, y)),
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len() && xs.iter().all(|(k, v)| ys.get(k).is_some_and(|w| values_equivalent(v, w)))
        }
        _ => a == b,
    }
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(value) = arbitrary_value(&mut u, 0) else { return };
    let Ok(text) = to_string(&value) else { return };
    let reparsed = parse(&text).expect("writer output must always be re-parseable");
    assert!(values_equivalent(&value, &reparsed), "round trip mismatch through {text:?}");
});
