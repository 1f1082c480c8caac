//! Fluent construction of data containers

use crate::types::{DataContainer, Value};
use log::debug;

/// Stages keys and values, then materializes them with [`build`].
///
/// `build` borrows the builder, so a builder can be extended after a build
/// and built again; each build reflects everything staged so far. Staging a
/// key that is already staged is ignored and the first value is kept.
///
/// ```
/// use datacontainer::{Color, DataContainerBuilder};
///
/// let dc = DataContainerBuilder::create("settings")
///     .data("volume", 7i32)
///     .data("accent", Color::new(255, 123, 67))
///     .sub_container("window", DataContainerBuilder::create("window").data("title", "main"))
///     .build();
///
/// assert_eq!(dc.get_keys(), ["volume", "accent", "window"]);
/// assert_eq!(dc.get_path::<String>("window.title").as_deref(), Some("main"));
/// ```
///
/// [`build`]: DataContainerBuilder::build
#[derive(Debug, Clone, Default)]
pub struct DataContainerBuilder {
    name: String,
    entries: Vec<(String, Value)>,
}

impl DataContainerBuilder {
    /// Start a builder for a container with the given name (may be empty)
    pub fn create(name: impl Into<String>) -> Self {
        DataContainerBuilder {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Stage a value. `&str` and `String` are staged as strings.
    pub fn data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.stage(key.into(), value.into());
        self
    }

    /// Stage a nested container built from `inner`. `None` stages nothing.
    pub fn sub_container(
        mut self,
        key: impl Into<String>,
        inner: impl Into<Option<DataContainerBuilder>>,
    ) -> Self {
        if let Some(inner) = inner.into() {
            let container = inner.build();
            self.stage(key.into(), Value::Container(container));
        }
        self
    }

    /// Number of staged keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Materialize the staged entries in staging order
    pub fn build(&self) -> DataContainer {
        let mut container = DataContainer::with_name(self.name.clone());
        for (key, value) in &self.entries {
            container.put(key.clone(), value.clone());
        }
        container
    }

    fn stage(&mut self, key: String, value: Value) {
        if self.entries.iter().any(|(k, _)| *k == key) {
            debug!("builder '{}': key '{}' already staged, ignoring", self.name, key);
            return;
        }
        self.entries.push((key, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Point, ValueTag};

    #[test]
    fn test_order_preserved() {
        let dc = DataContainerBuilder::create("")
            .data("a", 1i32)
            .data("b", 2i32)
            .build();
        assert_eq!(dc.get_keys(), ["a", "b"]);
    }

    #[test]
    fn test_nested() {
        let dc = DataContainerBuilder::create("outer")
            .sub_container("inner", DataContainerBuilder::create("in").data("x", 1i32))
            .build();

        let mut inner = DataContainer::new();
        assert!(dc.get_into("inner", &mut inner));
        assert_eq!(inner.name(), "in");
        assert_eq!(inner.get::<i32>("x"), Some(1));
    }

    #[test]
    fn test_str_is_string_kind() {
        let dc = DataContainerBuilder::create("").data("s", "text").build();
        assert_eq!(dc.value("s").map(Value::tag), Some(ValueTag::String));
    }

    #[test]
    fn test_none_sub_container_is_noop() {
        let builder = DataContainerBuilder::create("").sub_container("missing", None);
        assert!(builder.is_empty());
        assert!(!builder.build().contains_key("missing"));
    }

    #[test]
    fn test_duplicate_key_keeps_first() {
        let dc = DataContainerBuilder::create("")
            .data("k", 1i32)
            .data("other", true)
            .data("k", Point::new(1.0, 2.0))
            .build();
        assert_eq!(dc.get_keys(), ["k", "other"]);
        assert_eq!(dc.get::<i32>("k"), Some(1));
    }

    #[test]
    fn test_rebuild_reflects_later_staging() {
        let builder = DataContainerBuilder::create("r").data("a", 1u16);
        let first = builder.build();

        let builder = builder.data("b", 2u16);
        let second = builder.build();

        assert_eq!(first.get_keys(), ["a"]);
        assert_eq!(second.get_keys(), ["a", "b"]);
        assert_eq!(builder.build(), second);
    }

    #[test]
    fn test_built_containers_are_independent() {
        let builder = DataContainerBuilder::create("").data("n", 1i64);
        let mut first = builder.build();
        first.put("n", 5i64);
        assert_eq!(builder.build().get::<i64>("n"), Some(1));
    }
}
