//! The KeyValues tree.
//!
//! A [`KeyValues`] is a handle to one named node holding an insertion-ordered
//! map of keys to [`Value`]s. Handles are cheap to clone and share the node
//! they point at. Ownership runs parent to child; the link back to the parent
//! is weak, so dropping the root drops the whole tree.
//!
//! A node has at most one parent at a time. Inserting a node that already
//! lives in some tree first removes it from its previous parent:
//!
//! ```rust
//! use keyvalues::KeyValues;
//!
//! let a = KeyValues::new("a");
//! let b = KeyValues::new("b");
//! let child = KeyValues::new("child");
//!
//! a.insert("child", &child).unwrap();
//! assert!(child.parent().unwrap().ptr_eq(&a));
//!
//! b.insert("moved", &child).unwrap();
//! assert!(child.parent().unwrap().ptr_eq(&b));
//! assert!(!a.contains_key("child"));
//! ```
//!
//! Handles are `!Send`: a tree belongs to one thread.

use crate::{Error, Result, StringifyOptions, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::str::FromStr;
use tracing::trace;

#[derive(Debug, Default)]
struct Node {
    name: String,
    children: IndexMap<String, Value>,
    parent: Weak<RefCell<Node>>,
}

/// A handle to one node of a KeyValues tree.
///
/// Equality is structural: two nodes are equal when their names and their
/// entries (keys, values and order) are equal. Parent links are ignored.
#[derive(Clone, Default)]
pub struct KeyValues {
    inner: Rc<RefCell<Node>>,
}

impl KeyValues {
    /// Creates an empty root node with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        KeyValues {
            inner: Rc::new(RefCell::new(Node {
                name: name.into(),
                ..Default::default()
            })),
        }
    }

    /// Parses a complete KeyValues document.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keyvalues::KeyValues;
    ///
    /// let kv = KeyValues::parse("\"root\"\n{\n\"key\" \"value\"\n}").unwrap();
    /// assert_eq!(kv.name(), "root");
    /// assert_eq!(kv.get_str("key").as_deref(), Some("value"));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`], [`Error::UnexpectedEof`] or
    /// [`Error::TrailingData`] when the text does not form exactly one document.
    pub fn parse(input: &str) -> Result<Self> {
        crate::de::parse_document(input)
    }

    /// Reads and parses a file.
    ///
    /// # Errors
    ///
    /// I/O failures surface as [`Error::Io`], anything else as in [`parse`](Self::parse).
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        crate::load(path)
    }

    /// Writes the default text form of this node to a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be written.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        crate::save(path, self)
    }

    /// Renders this node and its subtree as text.
    #[must_use]
    pub fn stringify(&self, options: &StringifyOptions) -> String {
        crate::ser::stringify(self, options)
    }

    #[must_use]
    pub fn name(&self) -> String {
        self.inner.borrow().name.clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.inner.borrow_mut().name = name.into();
    }

    /// The node this one is stored under, if any.
    #[must_use]
    pub fn parent(&self) -> Option<KeyValues> {
        self.inner
            .borrow()
            .parent
            .upgrade()
            .map(|inner| KeyValues { inner })
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent().is_none()
    }

    /// Returns `true` if both handles point at the same node.
    #[must_use]
    pub fn ptr_eq(&self, other: &KeyValues) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Returns the value stored under `key`.
    ///
    /// Nodes are returned as handles sharing the stored subtree.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.borrow().children.get(key).cloned()
    }

    /// Returns the scalar stored under `key`, or `None` if it is missing or a node.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.get(key).and_then(Value::into_string)
    }

    /// Returns the node stored under `key`, or `None` if it is missing or a scalar.
    #[must_use]
    pub fn get_node(&self, key: &str) -> Option<KeyValues> {
        self.get(key).and_then(Value::into_node)
    }

    /// Stores `value` under `key` and returns the value it replaced.
    ///
    /// An existing key keeps its position; a new key is appended. A node
    /// value is first detached from its current parent and then adopted by
    /// this node. Replaced node values lose their parent link.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keyvalues::KeyValues;
    ///
    /// let kv = KeyValues::new("root");
    /// kv.insert("a", "1").unwrap();
    /// kv.insert("b", "2").unwrap();
    /// let old = kv.insert("a", "3").unwrap();
    ///
    /// assert_eq!(old.unwrap().as_str(), Some("1"));
    /// assert_eq!(kv.keys(), vec!["a", "b"]);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cycle`] if the value is this node or one of its ancestors.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> Result<Option<Value>> {
        let key = key.into();
        let value = value.into();

        if let Value::Node(child) = &value {
            if child.ptr_eq(self) || self.has_ancestor(child) {
                return Err(Error::cycle(&key));
            }
            let already_here = self
                .inner
                .borrow()
                .children
                .get(&key)
                .and_then(Value::as_node)
                .is_some_and(|existing| existing.ptr_eq(child));
            if already_here {
                return Ok(Some(value.clone()));
            }
            child.detach();
            child.inner.borrow_mut().parent = Rc::downgrade(&self.inner);
            trace!(key = %key, parent = %self.name(), "Adopted node");
        }

        let previous = self.inner.borrow_mut().children.insert(key, value);
        if let Some(Value::Node(old)) = &previous {
            old.inner.borrow_mut().parent = Weak::new();
        }
        Ok(previous)
    }

    /// Removes `key`, preserving the order of the remaining entries.
    ///
    /// A removed node becomes a root.
    pub fn remove(&self, key: &str) -> Option<Value> {
        let removed = self.inner.borrow_mut().children.shift_remove(key);
        if let Some(Value::Node(node)) = &removed {
            node.inner.borrow_mut().parent = Weak::new();
        }
        removed
    }

    /// Removes every entry. Removed nodes become roots.
    pub fn clear(&self) {
        let children = std::mem::take(&mut self.inner.borrow_mut().children);
        for value in children.values() {
            if let Value::Node(node) = value {
                node.inner.borrow_mut().parent = Weak::new();
            }
        }
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.borrow().children.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().children.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().children.is_empty()
    }

    /// The keys in insertion order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.inner.borrow().children.keys().cloned().collect()
    }

    /// The values in insertion order.
    #[must_use]
    pub fn values(&self) -> Vec<Value> {
        self.inner.borrow().children.values().cloned().collect()
    }

    /// A snapshot of the entries in insertion order.
    ///
    /// The snapshot does not borrow the node, so the tree may be mutated
    /// while walking it.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.inner
            .borrow()
            .children
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Copies the whole subtree into fresh nodes. The copy is a root.
    #[must_use]
    pub fn deep_clone(&self) -> KeyValues {
        let copy = KeyValues::new(self.name());
        {
            let mut inner = copy.inner.borrow_mut();
            for (key, value) in self.entries() {
                let value = match value {
                    Value::String(s) => Value::String(s),
                    Value::Node(node) => {
                        let child = node.deep_clone();
                        child.inner.borrow_mut().parent = Rc::downgrade(&copy.inner);
                        Value::Node(child)
                    }
                };
                inner.children.insert(key, value);
            }
        }
        copy
    }

    /// Removes this node from its parent's entries, if it has a parent.
    fn detach(&self) {
        let Some(parent) = self.parent() else {
            return;
        };
        parent
            .inner
            .borrow_mut()
            .children
            .retain(|_, value| !value.as_node().is_some_and(|node| node.ptr_eq(self)));
        self.inner.borrow_mut().parent = Weak::new();
        trace!(parent = %parent.name(), "Detached node");
    }

    fn has_ancestor(&self, candidate: &KeyValues) -> bool {
        let mut current = self.parent();
        while let Some(node) = current {
            if node.ptr_eq(candidate) {
                return true;
            }
            current = node.parent();
        }
        false
    }

    /// Appends an entry without any re-parenting checks. Used by the parser,
    /// whose children are always freshly created.
    pub(crate) fn push_parsed(&self, key: String, value: Value) {
        if let Value::Node(child) = &value {
            child.inner.borrow_mut().parent = Rc::downgrade(&self.inner);
        }
        let previous = self.inner.borrow_mut().children.insert(key, value);
        if let Some(Value::Node(old)) = previous {
            old.inner.borrow_mut().parent = Weak::new();
        }
    }
}

impl PartialEq for KeyValues {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        let left = self.inner.borrow();
        let right = other.inner.borrow();
        left.name == right.name
            && left.children.len() == right.children.len()
            && left
                .children
                .iter()
                .zip(right.children.iter())
                .all(|(a, b)| a == b)
    }
}

impl fmt::Debug for KeyValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("KeyValues")
            .field("name", &inner.name)
            .field("children", &inner.children)
            .finish()
    }
}

impl fmt::Display for KeyValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stringify(&StringifyOptions::default()))
    }
}

impl FromStr for KeyValues {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        KeyValues::parse(s)
    }
}

impl IntoIterator for &KeyValues {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries().into_iter()
    }
}

impl Serialize for KeyValues {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        let inner = self.inner.borrow();
        let mut map = serializer.serialize_map(Some(inner.children.len()))?;
        for (k, v) in inner.children.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for KeyValues {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct KeyValuesVisitor;

        impl<'de> Visitor<'de> for KeyValuesVisitor {
            type Value = KeyValues;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of KeyValues entries")
            }

            fn visit_map<A>(self, map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                visit_entries(String::new(), map)
            }
        }

        deserializer.deserialize_map(KeyValuesVisitor)
    }
}

/// Builds a node from a serde map, naming nested nodes after their keys.
pub(crate) fn visit_entries<'de, A>(name: String, mut map: A) -> std::result::Result<KeyValues, A::Error>
where
    A: serde::de::MapAccess<'de>,
{
    let node = KeyValues::new(name);
    while let Some((key, value)) = map.next_entry::<String, Value>()? {
        if let Value::Node(child) = &value {
            child.set_name(key.clone());
        }
        node.push_parsed(key, value);
    }
    Ok(node)
}
