//! Dynamic value model
//!
//! `Value` covers the eleven runtime categories the deep helpers work on.
//! Composite variants are shared handles over a lock, so two values can
//! point at the same container:
//! - `Value::clone()` copies the handle (aliasing, O(1))
//! - `clone_deep` copies the structure (see `crate::clone`)
//!
//! Equality and hashing follow SameValueZero: primitives by content
//! (NaN equals NaN, +0 equals -0), everything else by allocation identity.
//! Structural equality lives in `crate::compare`.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use parking_lot::RwLock;

/// Signature of a native function stored in a `Value::Function`
pub type NativeFn = dyn Fn(&[Value]) -> Value + Send + Sync;

/// A dynamically typed value
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    String(Arc<str>),
    Symbol(Symbol),
    Array(Array),
    Object(Object),
    Function(Function),
    Set(Set),
    Map(Map),
}

fn addr<T: ?Sized>(ptr: *const T) -> usize {
    ptr as *const () as usize
}

// ═══════════════════════════════════════════
// ATOMS
// ═══════════════════════════════════════════

/// Unique symbol, equal only to itself
#[derive(Clone)]
pub struct Symbol(Arc<Option<String>>);

impl Symbol {
    pub fn new(description: Option<&str>) -> Self {
        Self(Arc::new(description.map(str::to_string)))
    }

    pub fn description(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Native callable. Never cloned deeply: copies keep the same identity.
#[derive(Clone)]
pub struct Function {
    name: Option<Arc<str>>,
    inner: Arc<NativeFn>,
}

impl Function {
    pub fn new(f: impl Fn(&[Value]) -> Value + Send + Sync + 'static) -> Self {
        Self {
            name: None,
            inner: Arc::new(f),
        }
    }

    pub fn named(name: &str, f: impl Fn(&[Value]) -> Value + Send + Sync + 'static) -> Self {
        Self {
            name: Some(name.into()),
            inner: Arc::new(f),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.inner)(args)
    }

    /// Compares data addresses only (vtable pointers may differ per crate)
    pub fn ptr_eq(&self, other: &Self) -> bool {
        addr(Arc::as_ptr(&self.inner)) == addr(Arc::as_ptr(&other.inner))
    }
}

// ═══════════════════════════════════════════
// CONTAINERS
// ═══════════════════════════════════════════

/// Shared, growable list
#[derive(Clone, Default)]
pub struct Array(Arc<RwLock<Vec<Value>>>);

impl Array {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(items: Vec<Value>) -> Self {
        Self(Arc::new(RwLock::new(items)))
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn push(&self, value: impl Into<Value>) {
        self.0.write().push(value.into());
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.read().get(index).cloned()
    }

    /// Writes `index`, filling any gap with `Undefined`
    pub fn set(&self, index: usize, value: impl Into<Value>) {
        let mut items = self.0.write();
        if index >= items.len() {
            items.resize(index + 1, Value::Undefined);
        }
        items[index] = value.into();
    }

    /// Shallow copy of the current elements (lock released on return)
    pub fn snapshot(&self) -> Vec<Value> {
        self.0.read().clone()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Shared record of own properties, kept in insertion order
#[derive(Clone, Default)]
pub struct Object(Arc<RwLock<IndexMap<String, Value>>>);

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(props: IndexMap<String, Value>) -> Self {
        Self(Arc::new(RwLock::new(props)))
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.write().insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.read().get(key).cloned()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.read().contains_key(key)
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.0.write().shift_remove(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.0.read().keys().cloned().collect()
    }

    pub fn snapshot(&self) -> Vec<(String, Value)> {
        self.0
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Shared unique-element collection, iterated in insertion order
#[derive(Clone, Default)]
pub struct Set(Arc<RwLock<IndexSet<Value>>>);

impl Set {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns false if an equal (SameValueZero) element was already present
    pub fn insert(&self, value: impl Into<Value>) -> bool {
        self.0.write().insert(value.into())
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.0.read().contains(value)
    }

    pub fn snapshot(&self) -> Vec<Value> {
        self.0.read().iter().cloned().collect()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Shared key-value collection with unique keys, iterated in insertion order
#[derive(Clone, Default)]
pub struct Map(Arc<RwLock<IndexMap<Value, Value>>>);

impl Map {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replacing an existing key keeps its original position
    pub fn insert(&self, key: impl Into<Value>, value: impl Into<Value>) -> Option<Value> {
        self.0.write().insert(key.into(), value.into())
    }

    pub fn get(&self, key: &Value) -> Option<Value> {
        self.0.read().get(key).cloned()
    }

    pub fn snapshot(&self) -> Vec<(Value, Value)> {
        self.0
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

// ═══════════════════════════════════════════
// VALUE
// ═══════════════════════════════════════════

impl Value {
    pub fn array<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Value::Array(Array::from_vec(items.into_iter().map(Into::into).collect()))
    }

    pub fn object<I, K, V>(props: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Object(Object::from_map(
            props
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }

    pub fn set<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let set = Set::new();
        for item in items {
            set.insert(item);
        }
        Value::Set(set)
    }

    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        let map = Map::new();
        for (k, v) in entries {
            map.insert(k, v);
        }
        Value::Map(map)
    }

    pub fn symbol(description: &str) -> Self {
        Value::Symbol(Symbol::new(Some(description)))
    }

    pub fn function(f: impl Fn(&[Value]) -> Value + Send + Sync + 'static) -> Self {
        Value::Function(Function::new(f))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&Set> {
        match self {
            Value::Set(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// True when both values are the same allocation (or SameValueZero-equal primitives)
    pub fn ptr_eq(&self, other: &Value) -> bool {
        self == other
    }

    /// Lossy JSON view for logs and CLI output
    ///
    /// Undefined, functions and symbols become `null`; sets become arrays;
    /// maps become arrays of `[key, value]` pairs.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;

        match self {
            Value::Undefined | Value::Null | Value::Function(_) | Value::Symbol(_) => Json::Null,
            Value::Boolean(b) => Json::Bool(*b),
            Value::Number(n) => number_to_json(*n),
            Value::String(s) => Json::String(s.to_string()),
            Value::Array(a) => Json::Array(a.snapshot().iter().map(Value::to_json).collect()),
            Value::Object(o) => Json::Object(
                o.snapshot()
                    .into_iter()
                    .map(|(k, v)| (k, v.to_json()))
                    .collect(),
            ),
            Value::Set(s) => Json::Array(s.snapshot().iter().map(Value::to_json).collect()),
            Value::Map(m) => Json::Array(
                m.snapshot()
                    .iter()
                    .map(|(k, v)| Json::Array(vec![k.to_json(), v.to_json()]))
                    .collect(),
            ),
        }
    }
}

fn number_to_json(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        serde_json::Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Set(a), Value::Set(b)) => a.ptr_eq(b),
            (Value::Map(a), Value::Map(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Undefined | Value::Null => {}
            Value::Boolean(b) => b.hash(state),
            Value::Number(n) => {
                // +0/-0 and every NaN must land in the same bucket
                let bits = if *n == 0.0 {
                    0
                } else if n.is_nan() {
                    f64::NAN.to_bits()
                } else {
                    n.to_bits()
                };
                bits.hash(state);
            }
            Value::String(s) => s.hash(state),
            Value::Symbol(s) => addr(Arc::as_ptr(&s.0)).hash(state),
            Value::Function(f) => addr(Arc::as_ptr(&f.inner)).hash(state),
            Value::Array(a) => addr(Arc::as_ptr(&a.0)).hash(state),
            Value::Object(o) => addr(Arc::as_ptr(&o.0)).hash(state),
            Value::Set(s) => addr(Arc::as_ptr(&s.0)).hash(state),
            Value::Map(m) => addr(Arc::as_ptr(&m.0)).hash(state),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Symbol(s) => write!(f, "Symbol({})", s.description().unwrap_or("")),
            Value::Function(func) => write!(f, "[Function {}]", func.name().unwrap_or("(anonymous)")),
            Value::Array(a) => f.debug_list().entries(a.snapshot()).finish(),
            Value::Object(o) => f.debug_map().entries(o.snapshot()).finish(),
            Value::Set(s) => {
                f.write_str("Set ")?;
                f.debug_set().entries(s.snapshot()).finish()
            }
            Value::Map(m) => {
                f.write_str("Map ")?;
                f.debug_map().entries(m.snapshot()).finish()
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s.into())
    }
}

impl From<Array> for Value {
    fn from(a: Array) -> Self {
        Value::Array(a)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Value::Object(o)
    }
}

impl From<Set> for Value {
    fn from(s: Set) -> Self {
        Value::Set(s)
    }
}

impl From<Map> for Value {
    fn from(m: Map) -> Self {
        Value::Map(m)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Boolean(b),
            Json::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            Json::String(s) => Value::from(s),
            Json::Array(items) => Value::array(items.into_iter().map(Value::from)),
            Json::Object(props) => Value::object(props.into_iter().map(|(k, v)| (k, Value::from(v)))),
        }
    }
}
