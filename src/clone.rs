//! Deep cloning
//!
//! Recursion is unbounded and there is no visited set: a value that
//! contains itself overflows the stack. Only finite trees are supported.

use crate::value::{Array, Map, Object, Set, Value};

/// Structurally independent copy of `value`
///
/// - base values are returned as they are
/// - functions keep their identity
/// - sets and maps get new containers; map keys are shared, values cloned
/// - arrays and objects get new containers with every element cloned
pub fn clone_deep(value: &Value) -> Value {
    match value {
        Value::Undefined
        | Value::Null
        | Value::Boolean(_)
        | Value::Number(_)
        | Value::String(_)
        | Value::Symbol(_)
        | Value::Function(_) => value.clone(),
        Value::Set(set) => {
            let result = Set::new();
            for item in set.snapshot() {
                result.insert(clone_deep(&item));
            }
            Value::Set(result)
        }
        Value::Map(map) => {
            let result = Map::new();
            for (key, item) in map.snapshot() {
                result.insert(key, clone_deep(&item));
            }
            Value::Map(result)
        }
        Value::Array(array) => {
            Value::Array(Array::from_vec(array.snapshot().iter().map(clone_deep).collect()))
        }
        Value::Object(object) => Value::Object(Object::from_map(
            object
                .snapshot()
                .into_iter()
                .map(|(k, v)| (k, clone_deep(&v)))
                .collect(),
        )),
    }
}
