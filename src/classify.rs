//! Runtime type classification
//!
//! Every value maps to exactly one `TypeTag`, and every tag to one
//! `CoarseType` bucket. Both lookups are exhaustive matches.

use std::fmt;

use serde::Serialize;

use crate::value::Value;

/// Canonical runtime category of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    Boolean,
    Number,
    String,
    Undefined,
    Null,
    Array,
    Object,
    Function,
    Symbol,
    Set,
    Map,
}

/// Coarse bucket used to pick a copy/compare strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CoarseType {
    /// Primitives, null, undefined and symbols
    Base,
    /// Arrays and plain objects
    Object,
    /// Functions
    Func,
    /// Sets and maps
    Hash,
}

impl TypeTag {
    pub const ALL: [TypeTag; 11] = [
        TypeTag::Boolean,
        TypeTag::Number,
        TypeTag::String,
        TypeTag::Undefined,
        TypeTag::Null,
        TypeTag::Array,
        TypeTag::Object,
        TypeTag::Function,
        TypeTag::Symbol,
        TypeTag::Set,
        TypeTag::Map,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Boolean => "boolean",
            TypeTag::Number => "number",
            TypeTag::String => "string",
            TypeTag::Undefined => "undefined",
            TypeTag::Null => "null",
            TypeTag::Array => "array",
            TypeTag::Object => "object",
            TypeTag::Function => "function",
            TypeTag::Symbol => "symbol",
            TypeTag::Set => "set",
            TypeTag::Map => "map",
        }
    }

    pub fn coarse(&self) -> CoarseType {
        match self {
            TypeTag::Boolean
            | TypeTag::Number
            | TypeTag::String
            | TypeTag::Undefined
            | TypeTag::Null
            | TypeTag::Symbol => CoarseType::Base,
            TypeTag::Array | TypeTag::Object => CoarseType::Object,
            TypeTag::Function => CoarseType::Func,
            TypeTag::Set | TypeTag::Map => CoarseType::Hash,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CoarseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoarseType::Base => "base",
            CoarseType::Object => "object",
            CoarseType::Func => "func",
            CoarseType::Hash => "hash",
        }
    }
}

impl fmt::Display for CoarseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a value by its variant (never by shape)
pub fn classify(value: &Value) -> TypeTag {
    match value {
        Value::Undefined => TypeTag::Undefined,
        Value::Null => TypeTag::Null,
        Value::Boolean(_) => TypeTag::Boolean,
        Value::Number(_) => TypeTag::Number,
        Value::String(_) => TypeTag::String,
        Value::Symbol(_) => TypeTag::Symbol,
        Value::Array(_) => TypeTag::Array,
        Value::Object(_) => TypeTag::Object,
        Value::Function(_) => TypeTag::Function,
        Value::Set(_) => TypeTag::Set,
        Value::Map(_) => TypeTag::Map,
    }
}

pub fn coarse_classify(value: &Value) -> CoarseType {
    classify(value).coarse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn representative(tag: TypeTag) -> Value {
        match tag {
            TypeTag::Boolean => Value::from(true),
            TypeTag::Number => Value::from(1.5),
            TypeTag::String => Value::from("s"),
            TypeTag::Undefined => Value::Undefined,
            TypeTag::Null => Value::Null,
            TypeTag::Array => Value::array([1]),
            TypeTag::Object => Value::object([("a", 1)]),
            TypeTag::Function => Value::function(|_| Value::Undefined),
            TypeTag::Symbol => Value::symbol("s"),
            TypeTag::Set => Value::set([1]),
            TypeTag::Map => Value::map([(1, 2)]),
        }
    }

    #[test]
    fn every_tag_has_a_representative() {
        for tag in TypeTag::ALL {
            assert_eq!(classify(&representative(tag)), tag, "{tag}");
        }
    }

    #[test]
    fn shape_does_not_change_tag() {
        // An object that looks like an array is still an object
        let array_like = Value::object([("0", Value::from("a")), ("length", Value::from(1))]);
        assert_eq!(classify(&array_like), TypeTag::Object);
        assert_eq!(classify(&Value::array(Vec::<Value>::new())), TypeTag::Array);
    }

    #[test]
    fn coarse_buckets() {
        assert_eq!(coarse_classify(&Value::Null), CoarseType::Base);
        assert_eq!(coarse_classify(&Value::symbol("x")), CoarseType::Base);
        assert_eq!(coarse_classify(&Value::array([1])), CoarseType::Object);
        assert_eq!(coarse_classify(&Value::object([("a", 1)])), CoarseType::Object);
        assert_eq!(coarse_classify(&Value::function(|_| Value::Null)), CoarseType::Func);
        assert_eq!(coarse_classify(&Value::set([1])), CoarseType::Hash);
        assert_eq!(coarse_classify(&Value::map([(1, 1)])), CoarseType::Hash);
    }

    #[test]
    fn names_match_serde() {
        assert_eq!(TypeTag::Map.to_string(), "map");
        assert_eq!(serde_json::to_string(&TypeTag::Undefined).unwrap(), "\"undefined\"");
        assert_eq!(serde_json::to_string(&CoarseType::Func).unwrap(), "\"func\"");
    }
}
