//! Structural equality
//!
//! Rules, in order:
//! 1. different `TypeTag`s are never equal
//! 2. primitives use strict equality (NaN != NaN, +0 == -0)
//! 3. functions and symbols compare by identity
//! 4. arrays, sets and maps compare element by element, in iteration order
//! 5. objects need the same key set and equal values per key
//!
//! Sets and maps are order-sensitive: the same entries inserted in a
//! different order compare unequal.

use crate::classify::classify;
use crate::value::{Object, Value};

pub fn compare(a: &Value, b: &Value) -> bool {
    if classify(a) != classify(b) {
        return false;
    }

    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => compare_seq(&x.snapshot(), &y.snapshot()),
        (Value::Set(x), Value::Set(y)) => compare_seq(&x.snapshot(), &y.snapshot()),
        (Value::Map(x), Value::Map(y)) => {
            let (x, y) = (x.snapshot(), y.snapshot());
            x.len() == y.len()
                && x
                    .iter()
                    .zip(&y)
                    .all(|((xk, xv), (yk, yv))| compare(xk, yk) && compare(xv, yv))
        }
        (Value::Object(x), Value::Object(y)) => compare_props(x, y),
        // Remaining pairs share a base or function tag: strict/identity equality
        (Value::Undefined, _)
        | (Value::Null, _)
        | (Value::Boolean(_), _)
        | (Value::String(_), _)
        | (Value::Symbol(_), _)
        | (Value::Function(_), _) => a == b,
        _ => false,
    }
}

fn compare_seq(a: &[Value], b: &[Value]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| compare(x, y))
}

fn compare_props(a: &Object, b: &Object) -> bool {
    let props = a.snapshot();
    if props.len() != b.len() {
        return false;
    }

    props
        .iter()
        .all(|(key, value)| b.get(key).is_some_and(|other| compare(value, &other)))
}
