//! The extraction capability trait.
//!
//! [`Extract`] is how the pipeline asks an item what it can do: answer a
//! keyed lookup, answer a named call, or neither. Every method except
//! [`Extract::to_value`] has a default that reports "unsupported", so an
//! opaque type only needs to say what its own comparison value is.

use crate::value::{list_index, Key, Number, Value};

/// Positional and keyword arguments for a call step.
///
/// # Example
///
/// ```
/// use standout_sorter::{Args, Value};
///
/// let args = Args::new().arg("tags").kwarg("default", Value::list(Vec::<Value>::new()));
/// assert_eq!(args.get(0), Some(&Value::from("tags")));
/// assert!(args.keyword("default").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    /// Positional arguments, in order.
    pub positional: Vec<Value>,
    /// Keyword arguments, in the order they were given.
    pub keyword: Vec<(String, Value)>,
}

impl Args {
    /// Creates an empty argument list.
    pub fn new() -> Self {
        Args::default()
    }

    /// Appends a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Appends a keyword argument.
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keyword.push((name.into(), value.into()));
        self
    }

    /// Returns the positional argument at `index`.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    /// Returns the keyword argument named `name`.
    pub fn keyword(&self, name: &str) -> Option<&Value> {
        self.keyword
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    /// Returns `true` if there are no arguments at all.
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty()
    }
}

/// Capabilities an item exposes to extraction steps.
///
/// Implement this for your own item types, or derive it with
/// `#[derive(Extract)]` (feature `derive`), which exposes each named field
/// as a callable attribute.
///
/// # Manual Implementation
///
/// ```
/// use standout_sorter::{Args, Extract, Value};
///
/// struct Person {
///     first: String,
///     last: String,
/// }
///
/// impl Extract for Person {
///     fn to_value(&self) -> Value {
///         Value::from(format!("{} {}", self.first, self.last))
///     }
///
///     fn call(&self, name: &str, _args: &Args) -> Option<Value> {
///         match name {
///             "first" => Some(Value::from(&self.first)),
///             "last" => Some(Value::from(&self.last)),
///             _ => None,
///         }
///     }
/// }
///
/// let p = Person { first: "Ada".into(), last: "Lovelace".into() };
/// assert_eq!(p.call("last", &Args::new()), Some(Value::from("Lovelace")));
/// assert_eq!(p.call("age", &Args::new()), None);
/// assert_eq!(p.to_text(), "Ada Lovelace");
/// ```
pub trait Extract {
    /// Returns this item's own comparison value.
    fn to_value(&self) -> Value;

    /// Returns `true` if this item stands for an absent value.
    fn is_nil(&self) -> bool {
        false
    }

    /// Keyed lookup.
    ///
    /// `None` means the item is not keyed or the key is absent;
    /// `Some(Value::Nil)` means the key is present and holds nil.
    fn fetch(&self, _key: &Key) -> Option<Value> {
        None
    }

    /// Keyed lookup that treats textual and symbolic keys as the same.
    ///
    /// The default tries the textual form of a named key, then the
    /// symbolic form.
    fn fetch_indifferent(&self, key: &Key) -> Option<Value> {
        match key.name() {
            Some(name) => self
                .fetch(&Key::str(name))
                .or_else(|| self.fetch(&Key::sym(name))),
            None => self.fetch(key),
        }
    }

    /// Invokes a named operation.
    ///
    /// `None` means the item does not respond to `name`.
    fn call(&self, _name: &str, _args: &Args) -> Option<Value> {
        None
    }

    /// Returns the generic string form used when extraction falls back.
    fn to_text(&self) -> String {
        self.to_value().to_string()
    }
}

impl Extract for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }

    fn is_nil(&self) -> bool {
        Value::is_nil(self)
    }

    fn fetch(&self, key: &Key) -> Option<Value> {
        self.get(key).cloned()
    }

    fn fetch_indifferent(&self, key: &Key) -> Option<Value> {
        self.get_indifferent(key).cloned()
    }

    fn call(&self, name: &str, args: &Args) -> Option<Value> {
        builtin_call(self, name, args)
    }

    fn to_text(&self) -> String {
        self.to_string()
    }
}

/// The operations every [`Value`] answers.
///
/// `nil?` is only useful on direct [`Extract::call`]; call steps return nil
/// for a nil operand without asking it.
fn builtin_call(value: &Value, name: &str, args: &Args) -> Option<Value> {
    match (name, value) {
        ("length" | "size" | "len", Value::Str(s) | Value::Sym(s)) => {
            Some(Value::from(s.chars().count()))
        }
        ("length" | "size" | "len", Value::List(items)) => Some(Value::from(items.len())),
        ("length" | "size" | "len", Value::Map(entries)) => Some(Value::from(entries.len())),

        ("first", Value::List(items)) => Some(items.first().cloned().unwrap_or_default()),
        ("last", Value::List(items)) => Some(items.last().cloned().unwrap_or_default()),
        ("first", Value::Str(s)) => Some(s.chars().next().map_or(Value::Nil, |c| {
            Value::Str(c.to_string())
        })),
        ("last", Value::Str(s)) => Some(s.chars().last().map_or(Value::Nil, |c| {
            Value::Str(c.to_string())
        })),

        ("abs", Value::Number(n)) => Some(Value::Number(n.abs())),

        ("upcase", Value::Str(s)) => Some(Value::Str(s.to_uppercase())),
        ("downcase", Value::Str(s)) => Some(Value::Str(s.to_lowercase())),
        ("upcase", Value::Sym(s)) => Some(Value::Sym(s.to_uppercase())),
        ("downcase", Value::Sym(s)) => Some(Value::Sym(s.to_lowercase())),

        ("keys", Value::Map(entries)) => Some(Value::List(
            entries.iter().map(|(k, _)| Value::from(k.clone())).collect(),
        )),
        ("values", Value::Map(entries)) => Some(Value::List(
            entries.iter().map(|(_, v)| v.clone()).collect(),
        )),

        ("fetch", Value::Map(_) | Value::List(_)) => {
            let key = args.get(0).and_then(Key::from_value)?;
            value
                .get(&key)
                .cloned()
                .or_else(|| args.keyword("default").cloned())
        }

        ("to_s", _) => Some(Value::Str(value.to_string())),
        ("inspect", _) => Some(Value::Str(value.inspect())),
        ("nil?" | "is_nil", _) => Some(Value::Bool(value.is_nil())),

        _ => None,
    }
}

impl Extract for str {
    fn to_value(&self) -> Value {
        Value::Str(self.to_owned())
    }

    fn call(&self, name: &str, args: &Args) -> Option<Value> {
        builtin_call(&self.to_value(), name, args)
    }

    fn to_text(&self) -> String {
        self.to_owned()
    }
}

impl Extract for String {
    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }

    fn call(&self, name: &str, args: &Args) -> Option<Value> {
        self.as_str().call(name, args)
    }

    fn to_text(&self) -> String {
        self.clone()
    }
}

macro_rules! extract_scalar {
    ($($ty:ty),+) => {
        $(
            impl Extract for $ty {
                fn to_value(&self) -> Value {
                    Value::from(*self)
                }

                fn call(&self, name: &str, args: &Args) -> Option<Value> {
                    builtin_call(&self.to_value(), name, args)
                }
            }
        )+
    };
}

extract_scalar!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl Extract for Number {
    fn to_value(&self) -> Value {
        Value::Number(*self)
    }

    fn call(&self, name: &str, args: &Args) -> Option<Value> {
        builtin_call(&self.to_value(), name, args)
    }
}

impl<T: Extract> Extract for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Nil, Extract::to_value)
    }

    fn is_nil(&self) -> bool {
        self.as_ref().map_or(true, Extract::is_nil)
    }

    fn fetch(&self, key: &Key) -> Option<Value> {
        self.as_ref()?.fetch(key)
    }

    fn fetch_indifferent(&self, key: &Key) -> Option<Value> {
        self.as_ref()?.fetch_indifferent(key)
    }

    fn call(&self, name: &str, args: &Args) -> Option<Value> {
        self.as_ref()?.call(name, args)
    }

    fn to_text(&self) -> String {
        self.as_ref().map(Extract::to_text).unwrap_or_default()
    }
}

impl<T: Extract> Extract for Vec<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(Extract::to_value).collect())
    }

    fn fetch(&self, key: &Key) -> Option<Value> {
        match key {
            Key::Int(index) => list_index(self.len(), *index).map(|i| self[i].to_value()),
            _ => None,
        }
    }

    fn call(&self, name: &str, args: &Args) -> Option<Value> {
        builtin_call(&self.to_value(), name, args)
    }
}

impl<T: Extract + ?Sized> Extract for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }

    fn is_nil(&self) -> bool {
        (**self).is_nil()
    }

    fn fetch(&self, key: &Key) -> Option<Value> {
        (**self).fetch(key)
    }

    fn fetch_indifferent(&self, key: &Key) -> Option<Value> {
        (**self).fetch_indifferent(key)
    }

    fn call(&self, name: &str, args: &Args) -> Option<Value> {
        (**self).call(name, args)
    }

    fn to_text(&self) -> String {
        (**self).to_text()
    }
}

impl<T: Extract + ?Sized> Extract for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }

    fn is_nil(&self) -> bool {
        (**self).is_nil()
    }

    fn fetch(&self, key: &Key) -> Option<Value> {
        (**self).fetch(key)
    }

    fn fetch_indifferent(&self, key: &Key) -> Option<Value> {
        (**self).fetch_indifferent(key)
    }

    fn call(&self, name: &str, args: &Args) -> Option<Value> {
        (**self).call(name, args)
    }

    fn to_text(&self) -> String {
        (**self).to_text()
    }
}

// JSON objects only carry textual keys, so exact lookups with a symbolic
// key miss and indifferent lookups hit.
impl Extract for serde_json::Value {
    fn to_value(&self) -> Value {
        Value::from(self)
    }

    fn is_nil(&self) -> bool {
        self.is_null()
    }

    fn fetch(&self, key: &Key) -> Option<Value> {
        match (self, key) {
            (serde_json::Value::Object(entries), Key::Str(name)) => {
                entries.get(name).map(Value::from)
            }
            (serde_json::Value::Array(items), Key::Int(index)) => {
                list_index(items.len(), *index).map(|i| Value::from(&items[i]))
            }
            _ => None,
        }
    }

    fn fetch_indifferent(&self, key: &Key) -> Option<Value> {
        self.fetch(&key.normalized())
    }

    fn call(&self, name: &str, args: &Args) -> Option<Value> {
        builtin_call(&self.to_value(), name, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Opaque;

    impl Extract for Opaque {
        fn to_value(&self) -> Value {
            Value::from("#<Opaque>")
        }
    }

    #[test]
    fn opaque_items_support_nothing() {
        assert_eq!(Opaque.fetch(&Key::str("name")), None);
        assert_eq!(Opaque.fetch_indifferent(&Key::sym("name")), None);
        assert_eq!(Opaque.call("name", &Args::new()), None);
        assert!(!Opaque.is_nil());
        assert_eq!(Opaque.to_text(), "#<Opaque>");
    }

    #[test]
    fn value_builtin_lengths() {
        let args = Args::new();
        assert_eq!(Value::from("héllo").call("length", &args), Some(Value::from(5usize)));
        assert_eq!(Value::list([1, 2, 3]).call("size", &args), Some(Value::from(3usize)));
        assert_eq!(Value::map([("a", 1)]).call("len", &args), Some(Value::from(1usize)));
        assert_eq!(Value::from(3).call("length", &args), None);
    }

    #[test]
    fn value_builtin_first_last() {
        let args = Args::new();
        let list = Value::list(["x", "y"]);
        assert_eq!(list.call("first", &args), Some(Value::from("x")));
        assert_eq!(list.call("last", &args), Some(Value::from("y")));
        assert_eq!(Value::list(Vec::<Value>::new()).call("first", &args), Some(Value::Nil));
        assert_eq!(Value::from("abc").call("last", &args), Some(Value::from("c")));
    }

    #[test]
    fn value_builtin_fetch_with_default() {
        let map = Value::map([(Key::sym("tags"), Value::list(["a"]))]);

        let hit = Args::new().arg(Value::sym("tags"));
        assert_eq!(map.call("fetch", &hit), Some(Value::list(["a"])));

        let miss = Args::new().arg(Value::sym("other")).kwarg("default", "none");
        assert_eq!(map.call("fetch", &miss), Some(Value::from("none")));

        let miss_without_default = Args::new().arg(Value::sym("other"));
        assert_eq!(map.call("fetch", &miss_without_default), None);

        assert_eq!(map.call("fetch", &Args::new()), None);
    }

    #[test]
    fn value_builtin_generic_calls() {
        let args = Args::new();
        assert_eq!(Value::from(-4).call("abs", &args), Some(Value::from(4u64)));
        assert_eq!(Value::from("Ab").call("downcase", &args), Some(Value::from("ab")));
        assert_eq!(Value::sym("ab").call("upcase", &args), Some(Value::sym("AB")));
        assert_eq!(Value::from(7).call("to_s", &args), Some(Value::from("7")));
        assert_eq!(Value::from("q").call("inspect", &args), Some(Value::from("\"q\"")));
        assert_eq!(Value::Nil.call("nil?", &args), Some(Value::Bool(true)));
        assert_eq!(
            Value::map([(Key::sym("a"), 1)]).call("keys", &args),
            Some(Value::list([Value::sym("a")]))
        );
        assert_eq!(Value::from(1).call("frobnicate", &args), None);
    }

    #[test]
    fn default_indifferent_fetch_tries_both_families() {
        struct SymOnly;

        impl Extract for SymOnly {
            fn to_value(&self) -> Value {
                Value::Nil
            }

            fn fetch(&self, key: &Key) -> Option<Value> {
                (key == &Key::sym("name")).then(|| Value::from("found"))
            }
        }

        assert_eq!(SymOnly.fetch(&Key::str("name")), None);
        assert_eq!(
            SymOnly.fetch_indifferent(&Key::str("name")),
            Some(Value::from("found"))
        );
    }

    #[test]
    fn option_and_vec_delegate() {
        let none: Option<String> = None;
        assert!(none.is_nil());
        assert_eq!(none.to_value(), Value::Nil);
        assert_eq!(Some("x".to_string()).to_value(), Value::from("x"));

        let items = vec![10, 20, 30];
        assert_eq!(items.fetch(&Key::Int(-1)), Some(Value::from(30)));
        assert_eq!(items.call("length", &Args::new()), Some(Value::from(3usize)));
    }

    #[test]
    fn json_items_are_keyed_by_text() {
        let item = serde_json::json!({"name": "Bob", "tags": ["a", "b"]});

        assert_eq!(item.fetch(&Key::str("name")), Some(Value::from("Bob")));
        assert_eq!(item.fetch(&Key::sym("name")), None);
        assert_eq!(item.fetch_indifferent(&Key::sym("name")), Some(Value::from("Bob")));
        assert!(serde_json::Value::Null.is_nil());
    }

    #[test]
    fn references_and_boxes_delegate() {
        let text = "abc";
        assert_eq!(Extract::to_value(&text), Value::from("abc"));

        let boxed: Box<dyn Extract> = Box::new(Value::map([(Key::sym("k"), 1)]));
        assert_eq!(boxed.fetch(&Key::sym("k")), Some(Value::from(1)));
    }
}
