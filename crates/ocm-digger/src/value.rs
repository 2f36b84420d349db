//! Runtime values produced by the digger.
//!
//! The [`Value`] enum is what every lookup returns: scalars, lists, dynamic
//! maps (typically decoded API responses) and typed objects exposed through
//! the [`Inspect`] trait.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::inspect::Inspect;

/// A value extracted from an object graph.
///
/// Values are cheap to clone: typed objects are reference counted and the
/// remaining variants are plain data.
///
/// # Example
///
/// ```
/// use ocm_digger::{Number, Value};
///
/// assert_eq!(Value::from("mycluster"), Value::String("mycluster".into()));
/// assert_eq!(Value::from(3u32), Value::Number(Number::U64(3)));
/// assert!(Value::from(None::<String>).is_none());
/// ```
#[derive(Clone, Default)]
pub enum Value {
    /// Absent, null, or not resolvable.
    #[default]
    None,
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(Number),
    /// String value.
    String(String),
    /// Ordered list of values.
    List(Vec<Value>),
    /// Dynamic document with named entries.
    Map(BTreeMap<String, Value>),
    /// Typed object exposing its members through [`Inspect`].
    Object(Arc<dyn Inspect>),
}

impl Value {
    /// Wraps a typed object.
    pub fn object<T: Inspect>(object: T) -> Self {
        Value::Object(Arc::new(object))
    }

    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extracts the typed object, if present.
    pub fn as_object(&self) -> Option<&dyn Inspect> {
        match self {
            Value::Object(o) => Some(o.as_ref()),
            _ => None,
        }
    }

    /// Short name of the variant, used in log events.
    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Object(_) => "object",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            // Objects have no structural equality, only identity.
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::List(l) => f.debug_tuple("List").field(l).finish(),
            Value::Map(m) => f.debug_tuple("Map").field(m).finish(),
            Value::Object(o) => f.debug_tuple("Object").field(&o.type_name()).finish(),
        }
    }
}

/// Default text conversion.
///
/// `None` renders as an empty string; callers that need a placeholder for
/// absent values (such as tables) handle that case before formatting.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("map[")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}:{}", key, value)?;
                }
                f.write_str("]")
            }
            Value::Object(o) => f.write_str(&o.describe()),
        }
    }
}

/// Numeric value keeping the signedness of its source.
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
    /// Converts the number to f64.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{}", n),
            Number::U64(n) => write!(f, "{}", n),
            Number::F64(n) => write!(f, "{}", n),
        }
    }
}

macro_rules! number_from {
    ($variant:ident as $target:ty: $($source:ty),*) => {
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
        )*
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
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::None, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<Arc<dyn Inspect>> for Value {
    fn from(object: Arc<dyn Inspect>) -> Self {
        Value::Object(object)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::None,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Number(Number::I64(i))
                } else if let Some(u) = n.as_u64() {
                    Value::Number(Number::U64(u))
                } else {
                    n.as_f64().map_or(Value::None, |f| Value::Number(Number::F64(f)))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_scalars() {
        assert_eq!(Value::from("abc").to_string(), "abc");
        assert_eq!(Value::from(42i32).to_string(), "42");
        assert_eq!(Value::from(1.5f64).to_string(), "1.5");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::None.to_string(), "");
    }

    #[test]
    fn display_collections() {
        assert_eq!(Value::from(vec!["a", "b"]).to_string(), "[a b]");
        let map = Value::from(json!({"a": 1, "b": "x"}));
        assert_eq!(map.to_string(), "map[a:1 b:x]");
    }

    #[test]
    fn option_conversion() {
        assert_eq!(Value::from(Some("x")), Value::String("x".into()));
        assert!(Value::from(None::<&str>).is_none());
    }

    #[test]
    fn json_conversion() {
        let value = Value::from(json!({"id": "123", "nodes": {"compute": 3}, "gone": null}));
        let Value::Map(entries) = value else {
            panic!("expected a map");
        };
        assert_eq!(entries["id"], Value::from("123"));
        assert_eq!(entries["gone"], Value::None);
        let Value::Map(nodes) = &entries["nodes"] else {
            panic!("expected a nested map");
        };
        assert_eq!(nodes["compute"], Value::Number(Number::I64(3)));
    }

    #[test]
    fn extractors() {
        assert_eq!(Value::from("x").as_str(), Some("x"));
        assert_eq!(Value::from(2u8).as_number(), Some(Number::U64(2)));
        assert_eq!(Value::from(false).as_bool(), Some(false));
        assert_eq!(Value::None.as_str(), None);
        assert!(Value::None.as_object().is_none());
    }
}
