//! Runtime values produced by extraction.
//!
//! The [`Value`] enum is the dynamic representation every pipeline step
//! produces and the comparator consumes. [`Key`] names a path segment or a
//! map key, keeping the textual/symbolic distinction that indifferent
//! access collapses.

use std::cmp::Ordering;
use std::fmt;

/// A path segment or map key.
///
/// Text keys and symbol keys are distinct unless a lookup runs in
/// indifferent mode, where both collapse to the textual form.
///
/// # Example
///
/// ```
/// use standout_sorter::Key;
///
/// assert_ne!(Key::str("name"), Key::sym("name"));
/// assert_eq!(Key::sym("name").normalized(), Key::str("name"));
/// assert_eq!(Key::from(2), Key::Int(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Textual key (`"name"`).
    Str(String),
    /// Symbolic key (`:name`).
    Sym(String),
    /// Integer key or list index. Negative indexes count from the end.
    Int(i64),
}

impl Key {
    /// Creates a textual key.
    pub fn str(name: impl Into<String>) -> Self {
        Key::Str(name.into())
    }

    /// Creates a symbolic key.
    pub fn sym(name: impl Into<String>) -> Self {
        Key::Sym(name.into())
    }

    /// Creates an index key.
    pub fn index(index: i64) -> Self {
        Key::Int(index)
    }

    /// Returns the key's name, if it is textual or symbolic.
    ///
    /// Named keys can also resolve to a method call when keyed lookup fails.
    pub fn name(&self) -> Option<&str> {
        match self {
            Key::Str(name) | Key::Sym(name) => Some(name),
            Key::Int(_) => None,
        }
    }

    /// Returns the canonical form used by indifferent lookup.
    pub fn normalized(&self) -> Key {
        match self {
            Key::Sym(name) => Key::Str(name.clone()),
            other => other.clone(),
        }
    }

    /// Converts a value into a key, if it has a key shape.
    pub fn from_value(value: &Value) -> Option<Key> {
        match value {
            Value::Str(s) => Some(Key::Str(s.clone())),
            Value::Sym(s) => Some(Key::Sym(s.clone())),
            Value::Number(Number::I64(n)) => Some(Key::Int(*n)),
            Value::Number(Number::U64(n)) => i64::try_from(*n).ok().map(Key::Int),
            _ => None,
        }
    }

    /// Returns the debug-style representation used in messages.
    pub fn inspect(&self) -> String {
        match self {
            Key::Str(name) => format!("{name:?}"),
            Key::Sym(name) => format!(":{name}"),
            Key::Int(n) => n.to_string(),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Str(name) | Key::Sym(name) => f.write_str(name),
            Key::Int(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Str(name.to_owned())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Str(name)
    }
}

impl From<&String> for Key {
    fn from(name: &String) -> Self {
        Key::Str(name.clone())
    }
}

impl From<i64> for Key {
    fn from(index: i64) -> Self {
        Key::Int(index)
    }
}

impl From<i32> for Key {
    fn from(index: i32) -> Self {
        Key::Int(i64::from(index))
    }
}

impl From<usize> for Key {
    /// Indexes past `i64::MAX` saturate; no list is that long.
    fn from(index: usize) -> Self {
        Key::Int(i64::try_from(index).unwrap_or(i64::MAX))
    }
}

/// A dynamic value derived from an item.
///
/// Maps keep insertion order and may mix textual, symbolic and integer
/// keys. The [`Display`](fmt::Display) impl is the generic string form used
/// when extraction falls back; [`Value::inspect`] is the quoted form used
/// in error messages.
///
/// # Example
///
/// ```
/// use standout_sorter::{Key, Value};
///
/// let record = Value::map([(Key::sym("name"), Value::from("Bob"))]);
/// assert_eq!(record.get(&Key::sym("name")), Some(&Value::from("Bob")));
/// assert_eq!(record.get(&Key::str("name")), None);
/// assert_eq!(record.get_indifferent(&Key::str("name")), Some(&Value::from("Bob")));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent or null.
    #[default]
    Nil,
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(Number),
    /// Text.
    Str(String),
    /// Symbol.
    Sym(String),
    /// Ordered list.
    List(Vec<Value>),
    /// Insertion-ordered map.
    Map(Vec<(Key, Value)>),
}

impl Value {
    /// Creates a symbol value.
    pub fn sym(name: impl Into<String>) -> Self {
        Value::Sym(name.into())
    }

    /// Creates a list value.
    pub fn list<V: Into<Value>>(items: impl IntoIterator<Item = V>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Creates a map value, keeping the given entry order.
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Key>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Returns `true` if this is `Nil`.
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Returns `true` if this is a `Str` value.
    pub fn is_str(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    /// Returns `true` if this is a `Number` value.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns `true` if this is a `Map` value.
    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Extracts the text, if this is a `Str` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the boolean, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extracts the list items, if this is a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up a key exactly as given.
    ///
    /// Maps match on key equality; lists accept integer keys.
    pub fn get(&self, key: &Key) -> Option<&Value> {
        match (self, key) {
            (Value::Map(entries), _) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            (Value::List(items), Key::Int(index)) => {
                list_index(items.len(), *index).map(|i| &items[i])
            }
            _ => None,
        }
    }

    /// Looks up a key with textual and symbolic keys treated as the same.
    pub fn get_indifferent(&self, key: &Key) -> Option<&Value> {
        match self {
            Value::Map(entries) => {
                let wanted = key.normalized();
                entries
                    .iter()
                    .find(|(k, _)| k.normalized() == wanted)
                    .map(|(_, v)| v)
            }
            _ => self.get(key),
        }
    }

    /// Returns the type name used in comparison errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "boolean",
            Value::Number(n) => n.type_name(),
            Value::Str(_) => "string",
            Value::Sym(_) => "symbol",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Returns the quoted, debug-style representation.
    ///
    /// ```
    /// use standout_sorter::{Key, Value};
    ///
    /// let v = Value::map([(Key::sym("tags"), Value::list(["a", "b"]))]);
    /// assert_eq!(v.inspect(), r#"{tags: ["a", "b"]}"#);
    /// assert_eq!(Value::Nil.inspect(), "nil");
    /// ```
    pub fn inspect(&self) -> String {
        match self {
            Value::Nil => "nil".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Str(s) => format!("{s:?}"),
            Value::Sym(s) => format!(":{s}"),
            Value::List(items) => {
                let inner: Vec<String> = items.iter().map(Value::inspect).collect();
                format!("[{}]", inner.join(", "))
            }
            Value::Map(entries) => {
                let inner: Vec<String> = entries
                    .iter()
                    .map(|(k, v)| match k {
                        Key::Sym(name) => format!("{name}: {}", v.inspect()),
                        other => format!("{} => {}", other.inspect(), v.inspect()),
                    })
                    .collect();
                format!("{{{}}}", inner.join(", "))
            }
        }
    }
}

/// Resolves a possibly negative index against a list length.
pub(crate) fn list_index(len: usize, index: i64) -> Option<usize> {
    if index >= 0 {
        let i = usize::try_from(index).ok()?;
        (i < len).then_some(i)
    } else {
        let back = usize::try_from(index.unsigned_abs()).ok()?;
        len.checked_sub(back)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Str(s) | Value::Sym(s) => f.write_str(s),
            Value::List(_) | Value::Map(_) => f.write_str(&self.inspect()),
        }
    }
}

/// Numeric value supporting all common numeric types.
///
/// Numbers are stored in one of three variants to preserve precision:
/// - `I64` for signed integers
/// - `U64` for unsigned integers
/// - `F64` for floating point
///
/// Comparisons between different numeric types are exact: integers are
/// never rounded through `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed types.
    ///
    /// Integers compare exactly against each other and against floats, so
    /// equality stays transitive above 2^53. Returns `None` when either side
    /// is NaN.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self.as_i128(), other.as_i128()) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            (Some(a), None) => compare_int_float(a, other.to_f64()),
            (None, Some(b)) => compare_int_float(b, self.to_f64()).map(Ordering::reverse),
            (None, None) => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }

    fn as_i128(self) -> Option<i128> {
        match self {
            Number::I64(n) => Some(i128::from(n)),
            Number::U64(n) => Some(i128::from(n)),
            Number::F64(_) => None,
        }
    }

    /// Returns the absolute value.
    pub fn abs(self) -> Number {
        match self {
            Number::I64(n) => Number::U64(n.unsigned_abs()),
            Number::U64(n) => Number::U64(n),
            Number::F64(n) => Number::F64(n.abs()),
        }
    }

    /// Returns the type name used in comparison errors.
    pub fn type_name(self) -> &'static str {
        match self {
            Number::I64(_) | Number::U64(_) => "integer",
            Number::F64(_) => "float",
        }
    }
}

// Bounds of every i64 and u64 value, both exact in f64.
const INT_FLOOR: f64 = -9_223_372_036_854_775_808.0;
const INT_CEILING: f64 = 18_446_744_073_709_551_616.0;

fn compare_int_float(int: i128, float: f64) -> Option<Ordering> {
    if float.is_nan() {
        return None;
    }
    if float >= INT_CEILING {
        return Some(Ordering::Less);
    }
    if float < INT_FLOOR {
        return Some(Ordering::Greater);
    }

    // In range, the truncated float is an integer that i128 holds exactly.
    let whole = float.trunc() as i128;
    Some(int.cmp(&whole).then_with(|| {
        let fract = float.fract();
        if fract > 0.0 {
            Ordering::Less
        } else if fract < 0.0 {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }))
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            Number::F64(n) => write!(f, "{n:?}"),
        }
    }
}

macro_rules! number_from {
    ($variant:ident as $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for Number {
                fn from(n: $source) -> Self {
                    Number::$variant(n as $target)
                }
            }

            impl From<$source> for Value {
                fn from(n: $source) -> Self {
                    Value::Number(Number::from(n))
                }
            }
        )+
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Str(s.clone())
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Str(s) => Value::Str(s),
            Key::Sym(s) => Value::Sym(s),
            Key::Int(n) => Value::Number(Number::I64(n)),
        }
    }
}

impl<V: Into<Value>> From<Vec<V>> for Value {
    fn from(items: Vec<V>) -> Self {
        Value::list(items)
    }
}

impl<V: Into<Value>> From<Option<V>> for Value {
    fn from(value: Option<V>) -> Self {
        value.map_or(Value::Nil, Into::into)
    }
}

impl From<&serde_json::Value> for Value {
    fn from(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Number(Number::I64(i))
                } else if let Some(u) = n.as_u64() {
                    Value::Number(Number::U64(u))
                } else {
                    Value::Number(Number::F64(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            serde_json::Value::String(s) => Value::Str(s.clone()),
            serde_json::Value::Array(items) => Value::List(items.iter().map(Value::from).collect()),
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .iter()
                    .map(|(k, v)| (Key::Str(k.clone()), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        Value::from(&json)
    }
}
