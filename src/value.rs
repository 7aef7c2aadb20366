//! Entry values of a KeyValues node.
//!
//! Every entry of a [`KeyValues`] node is either a scalar string or another
//! node. There are no numbers, booleans or lists in the format; callers parse
//! scalars themselves.
//!
//! ```rust
//! use keyvalues::{KeyValues, Value};
//!
//! let scalar = Value::from("studio/model.mdl");
//! assert_eq!(scalar.as_str(), Some("studio/model.mdl"));
//!
//! let node = Value::from(KeyValues::new("bodygroups"));
//! assert!(node.is_node());
//! ```

use crate::KeyValues;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The value stored under a key: a string or a nested node.
///
/// Cloning a `Value::Node` clones the handle, not the subtree; see
/// [`KeyValues::deep_clone`].
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    String(String),
    Node(KeyValues),
}

impl Value {
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_node(&self) -> bool {
        matches!(self, Value::Node(_))
    }

    /// Returns the string if this is a scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::Node(_) => None,
        }
    }

    /// Returns the node handle if this is a nested node.
    #[must_use]
    pub fn as_node(&self) -> Option<&KeyValues> {
        match self {
            Value::Node(node) => Some(node),
            Value::String(_) => None,
        }
    }

    #[must_use]
    pub fn into_node(self) -> Option<KeyValues> {
        match self {
            Value::Node(node) => Some(node),
            Value::String(_) => None,
        }
    }

    #[must_use]
    pub fn into_string(self) -> Option<String> {
        match self {
            Value::String(s) => Some(s),
            Value::Node(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Node(node) => write!(f, "{}", node),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<KeyValues> for Value {
    fn from(value: KeyValues) -> Self {
        Value::Node(value)
    }
}

impl From<&KeyValues> for Value {
    fn from(value: &KeyValues) -> Self {
        Value::Node(value.clone())
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Node(node) => node.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string, a scalar or a map of KeyValues entries")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value::String(value))
            }

            fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                crate::node::visit_entries(String::new(), map).map(Value::Node)
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}
