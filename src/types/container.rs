//! Ordered key-value container

use std::path::{Path, PathBuf};

use log::debug;

use super::{FromValue, Value};
use crate::error::AccessError;

/// Ordered mapping from string keys to [`Value`]s.
///
/// Keys are unique and keep their insertion order; overwriting an existing
/// key keeps its original position. Nested containers are owned by their
/// parent, so the tree can never contain a cycle.
#[derive(Debug, Clone, Default)]
pub struct DataContainer {
    name: String,
    file_path: Option<PathBuf>,
    pub(super) entries: Vec<(String, Value)>,
}

impl DataContainer {
    /// Create an empty, unnamed container
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        DataContainer {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Path this container was last loaded from or saved to
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub(crate) fn bind_path(&mut self, path: &Path) {
        self.file_path = Some(path.to_path_buf());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub(super) fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    /// Insert or overwrite. A new key goes to the end; an existing key is
    /// overwritten in place, whatever kind it held before.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(idx) => self.entries[idx].1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Overwrite an existing key. Returns false, leaving the container
    /// untouched, if the key is absent.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> bool {
        match self.position(key) {
            Some(idx) => {
                self.entries[idx].1 = value.into();
                true
            }
            None => {
                debug!("set: key {key:?} not found");
                false
            }
        }
    }

    /// Borrow the raw value stored under `key`
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn value_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Typed lookup. `None` if the key is absent or holds a different kind.
    pub fn get<T: FromValue>(&self, key: &str) -> Option<T> {
        self.try_get(key)
            .inspect_err(|e| debug!("get: {e}"))
            .ok()
    }

    /// Typed lookup into a caller-owned slot.
    ///
    /// Writes `out` and returns true only on an exact kind match; otherwise
    /// `out` is left as it was.
    pub fn get_into<T: FromValue>(&self, key: &str, out: &mut T) -> bool {
        match self.get(key) {
            Some(v) => {
                *out = v;
                true
            }
            None => false,
        }
    }

    /// Typed lookup that reports why it failed
    pub fn try_get<T: FromValue>(&self, key: &str) -> Result<T, AccessError> {
        let value = self.value(key).ok_or_else(|| AccessError::NotFound {
            key: key.to_string(),
        })?;
        T::from_value(value).ok_or_else(|| AccessError::KindMismatch {
            key: key.to_string(),
            expected: T::TAG,
            actual: value.tag(),
        })
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.value(key)?.as_str()
    }

    pub fn get_container(&self, key: &str) -> Option<&DataContainer> {
        self.value(key)?.as_container()
    }

    pub fn get_container_mut(&mut self, key: &str) -> Option<&mut DataContainer> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_container_mut())
    }

    /// Get a nested value by dot-separated path (e.g., "window.size").
    /// Every segment but the last must name a nested container.
    pub fn value_path(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.value(segments.next()?)?;
        for key in segments {
            current = current.as_container()?.value(key)?;
        }
        Some(current)
    }

    pub fn get_path<T: FromValue>(&self, path: &str) -> Option<T> {
        self.value_path(path)?.extract()
    }

    pub fn value_path_mut(&mut self, path: &str) -> Option<&mut Value> {
        match path.split_once('.') {
            Some((head, rest)) => self.get_container_mut(head)?.value_path_mut(rest),
            None => self.value_mut(path),
        }
    }

    /// Overwrite the value at a dotted path. Like [`set`](Self::set), never
    /// inserts: returns false if any segment is missing.
    pub fn set_path(&mut self, path: &str, value: impl Into<Value>) -> bool {
        match self.value_path_mut(path) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => {
                debug!("set_path: {path:?} not found");
                false
            }
        }
    }

    /// Remove the entry at a dotted path from the container holding it
    pub fn remove_path(&mut self, path: &str) -> Option<Value> {
        match path.rsplit_once('.') {
            Some((parent, key)) => self.value_path_mut(parent)?.as_container_mut()?.remove(key),
            None => self.remove(path),
        }
    }

    /// Top-level keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn get_keys(&self) -> Vec<String> {
        self.keys().map(str::to_string).collect()
    }

    /// Every leaf key in the tree, nested ones as dotted paths.
    /// Container-valued keys are expanded instead of listed.
    pub fn all_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        self.collect_keys("", &mut keys);
        keys
    }

    fn collect_keys(&self, prefix: &str, out: &mut Vec<String>) {
        for (key, value) in &self.entries {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };
            match value {
                Value::Container(inner) => inner.collect_keys(&path, out),
                _ => out.push(path),
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let idx = self.position(key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Structural equality: name, keys, order, kinds and values.
/// The bound file path is not part of a container's identity.
impl PartialEq for DataContainer {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.entries == other.entries
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for DataContainer {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut container = DataContainer::new();
        container.extend(iter);
        container
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for DataContainer {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, DateTime, Duration, Point, ValueTag};

    #[test]
    fn test_put_get_every_kind() {
        let mut dc = DataContainer::new();
        dc.put("shortv", 1i16);
        dc.put("intv", 2i32);
        dc.put("longv", 3i64);
        dc.put("ushortv", 4u16);
        dc.put("uintv", 5u32);
        dc.put("ulongv", 6u64);
        dc.put("floatv", 1.2f32);
        dc.put("doublev", 1.2f64);
        dc.put("boolv", true);
        dc.put("stringv", "Hello World");
        dc.put("datev", DateTime::new(2020, 5, 17, 8, 30, 0));
        dc.put("timespanv", Duration::new(0, 0, 0, 72, 0));
        dc.put("pointv", Point::new(22.0, 34.0));
        dc.put("colorv", Color::new(255, 123, 67));

        assert_eq!(dc.get::<i16>("shortv"), Some(1));
        assert_eq!(dc.get::<i32>("intv"), Some(2));
        assert_eq!(dc.get::<i64>("longv"), Some(3));
        assert_eq!(dc.get::<u16>("ushortv"), Some(4));
        assert_eq!(dc.get::<u32>("uintv"), Some(5));
        assert_eq!(dc.get::<u64>("ulongv"), Some(6));
        assert_eq!(dc.get::<f32>("floatv"), Some(1.2));
        assert_eq!(dc.get::<f64>("doublev"), Some(1.2));
        assert_eq!(dc.get::<bool>("boolv"), Some(true));
        assert_eq!(dc.get::<String>("stringv").as_deref(), Some("Hello World"));
        assert_eq!(
            dc.get::<DateTime>("datev"),
            Some(DateTime::new(2020, 5, 17, 8, 30, 0))
        );
        assert_eq!(
            dc.get::<Duration>("timespanv"),
            Some(Duration::new(0, 0, 0, 72, 0))
        );
        assert_eq!(dc.get::<Point>("pointv"), Some(Point::new(22.0, 34.0)));
        assert_eq!(dc.get::<Color>("colorv"), Some(Color::new(255, 123, 67)));
    }

    #[test]
    fn test_get_absent_key() {
        let dc = DataContainer::new();
        assert_eq!(dc.get::<i32>("missing"), None);
        assert_eq!(dc.get::<String>("missing"), None);
        assert_eq!(dc.get::<DataContainer>("missing"), None);
        assert!(matches!(
            dc.try_get::<i32>("missing"),
            Err(AccessError::NotFound { .. })
        ));
    }

    #[test]
    fn test_get_kind_mismatch_leaves_output() {
        let mut dc = DataContainer::new();
        dc.put("colorv", Color::new(255, 123, 67));

        let mut color = Color::default();
        assert!(dc.get_into("colorv", &mut color));
        assert_eq!(color, Color::new(255, 123, 67));

        let mut point = Point::new(-1.0, -2.0);
        assert!(!dc.get_into("colorv", &mut point));
        assert_eq!(point, Point::new(-1.0, -2.0));

        assert_eq!(
            dc.try_get::<Point>("colorv"),
            Err(AccessError::KindMismatch {
                key: "colorv".into(),
                expected: ValueTag::Point,
                actual: ValueTag::Color,
            })
        );
    }

    #[test]
    fn test_no_widening() {
        let mut dc = DataContainer::new();
        dc.put("n", 5i32);
        assert_eq!(dc.get::<i64>("n"), None);
        assert_eq!(dc.get::<i16>("n"), None);
        assert_eq!(dc.get::<u32>("n"), None);
    }

    #[test]
    fn test_put_overwrites_in_place() {
        let mut dc = DataContainer::new();
        dc.put("a", 1i32);
        dc.put("b", 2i32);
        dc.put("c", 3i32);
        dc.put("a", "now a string");

        assert_eq!(dc.get_keys(), vec!["a", "b", "c"]);
        assert_eq!(dc.get_str("a"), Some("now a string"));
        assert_eq!(dc.get::<i32>("a"), None);
    }

    #[test]
    fn test_set_existing_only() {
        let mut dc = DataContainer::new();
        dc.put("a", 1i32);

        assert!(dc.set("a", 10i32));
        assert_eq!(dc.get::<i32>("a"), Some(10));

        assert!(!dc.set("b", 2i32));
        assert!(!dc.contains_key("b"));
        assert_eq!(dc.get_keys(), vec!["a"]);
    }

    #[test]
    fn test_nested_container() {
        let mut inner = DataContainer::new();
        inner.put("x", 1i32);

        let mut outer = DataContainer::new();
        outer.put("inner", inner.clone());
        outer.put("after", true);

        assert_eq!(outer.get_keys(), vec!["inner", "after"]);
        assert_eq!(outer.get::<DataContainer>("inner"), Some(inner));
        assert_eq!(outer.get_container("inner").unwrap().get::<i32>("x"), Some(1));
        assert_eq!(outer.get_path::<i32>("inner.x"), Some(1));
        assert_eq!(outer.get_path::<i32>("after.x"), None);
        assert_eq!(outer.get_path::<i32>("inner.y"), None);
    }

    #[test]
    fn test_get_container_mut() {
        let mut outer = DataContainer::new();
        outer.put("inner", DataContainer::new());
        outer.get_container_mut("inner").unwrap().put("x", 9u16);
        assert_eq!(outer.get_path::<u16>("inner.x"), Some(9));
        assert!(outer.get_container_mut("missing").is_none());
    }

    #[test]
    fn test_all_keys() {
        let mut leaf = DataContainer::new();
        leaf.put("z", 1i32);
        let mut mid = DataContainer::new();
        mid.put("y", 1i32);
        mid.put("leaf", leaf);
        let mut root = DataContainer::new();
        root.put("x", 1i32);
        root.put("mid", mid);

        assert_eq!(root.all_keys(), vec!["x", "mid.y", "mid.leaf.z"]);
        assert_eq!(root.get_keys(), vec!["x", "mid"]);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut dc: DataContainer = [("a", 1i32), ("b", 2i32), ("c", 3i32)].into_iter().collect();
        assert_eq!(dc.remove("b"), Some(Value::Int32(2)));
        assert_eq!(dc.remove("b"), None);
        assert_eq!(dc.get_keys(), vec!["a", "c"]);
        assert_eq!(dc.len(), 2);

        dc.clear();
        assert!(dc.is_empty());
    }

    #[test]
    fn test_path_set_and_remove() {
        let mut bb = DataContainer::new();
        bb.put("BB1", 1i32);
        bb.put("BB2", 2i32);
        let mut b = DataContainer::new();
        b.put("BB", bb);
        let mut dc = DataContainer::new();
        dc.put("A", 0i32);
        dc.put("B", b);

        assert!(dc.set_path("B.BB.BB2", "two"));
        assert_eq!(dc.get_path::<String>("B.BB.BB2").as_deref(), Some("two"));
        assert!(!dc.set_path("B.BB.BB3", 3i32));
        assert!(!dc.set_path("A.x", 3i32));
        assert!(dc.value_path("B.BB.BB3").is_none());

        assert_eq!(dc.remove_path("B.BB.BB1"), Some(Value::Int32(1)));
        assert!(dc.value_path("B.BB.BB1").is_none());
        assert_eq!(dc.all_keys(), vec!["A", "B.BB.BB2"]);
        assert_eq!(dc.remove_path("B.BB.BB1"), None);
        assert_eq!(dc.remove_path("missing.BB1"), None);

        assert_eq!(dc.remove_path("A"), Some(Value::Int32(0)));
        assert_eq!(dc.get_keys(), vec!["B"]);
    }

    #[test]
    fn test_equality_ignores_path() {
        let mut a = DataContainer::with_name("cfg");
        a.put("k", 1i32);
        let mut b = a.clone();
        b.bind_path(Path::new("somewhere.dat"));
        assert_eq!(a, b);

        b.set_name("other");
        assert_ne!(a, b);
    }

    #[test]
    fn test_order_matters_for_equality() {
        let a: DataContainer = [("a", 1i32), ("b", 2i32)].into_iter().collect();
        let b: DataContainer = [("b", 2i32), ("a", 1i32)].into_iter().collect();
        assert_ne!(a, b);
    }
}
