//! Key-set operations between containers
//!
//! Keys are compared per level. Where both sides hold a container under the
//! same key, the operations that descend do so recursively; otherwise the
//! value of `self` is the one kept.

use log::trace;

use super::{DataContainer, Value};

impl DataContainer {
    /// Add the keys of `other` that are missing here, in `other`'s order.
    ///
    /// Existing values are kept; where both sides hold a container under the
    /// same key the two are merged recursively. Returns whether anything was
    /// added at any depth.
    pub fn merge(&mut self, other: &DataContainer) -> bool {
        let mut changed = false;
        for (key, value) in &other.entries {
            match self.position(key) {
                None => {
                    self.entries.push((key.clone(), value.clone()));
                    changed = true;
                }
                Some(idx) => {
                    if let (Value::Container(mine), Value::Container(theirs)) =
                        (&mut self.entries[idx].1, value)
                    {
                        changed |= mine.merge(theirs);
                    }
                }
            }
        }
        changed
    }

    /// Entries of `self`, then those of `other` whose key is absent here.
    /// The result is named after `self` and has no bound path.
    pub fn union(&self, other: &DataContainer) -> DataContainer {
        let mut result = DataContainer::with_name(self.name());
        for (key, value) in &self.entries {
            let value = match (value, other.value(key)) {
                (Value::Container(mine), Some(Value::Container(theirs))) => {
                    Value::Container(mine.union(theirs))
                }
                _ => value.clone(),
            };
            result.entries.push((key.clone(), value));
        }
        for (key, value) in &other.entries {
            if !self.contains_key(key) {
                result.entries.push((key.clone(), value.clone()));
            }
        }
        result
    }

    /// Entries of `self` whose key also exists in `other`, in `self`'s order
    pub fn intersect(&self, other: &DataContainer) -> DataContainer {
        let mut result = DataContainer::with_name(self.name());
        for (key, value) in &self.entries {
            let value = match (value, other.value(key)) {
                (_, None) => continue,
                (Value::Container(mine), Some(Value::Container(theirs))) => {
                    Value::Container(mine.intersect(theirs))
                }
                _ => value.clone(),
            };
            result.entries.push((key.clone(), value));
        }
        result
    }

    /// Top-level entries of `self` whose key is absent from `other`
    pub fn except(&self, other: &DataContainer) -> DataContainer {
        let mut result = DataContainer::with_name(self.name());
        result.entries = self
            .entries
            .iter()
            .filter(|(key, _)| !other.contains_key(key))
            .cloned()
            .collect();
        result
    }

    /// Whether both trees hold the same set of leaf keys.
    /// Order, names and values are not compared.
    pub fn is_identical(&self, other: &DataContainer) -> bool {
        let mut mine = self.all_keys();
        let mut theirs = other.all_keys();
        if mine.len() != theirs.len() {
            return false;
        }
        mine.sort_unstable();
        theirs.sort_unstable();
        mine == theirs
    }

    /// Drop every top-level key that `other` also has
    pub fn remove_all(&mut self, other: &DataContainer) {
        self.entries.retain(|(key, _)| !other.contains_key(key));
    }

    /// Drop keys absent from `other`, descending into containers held on
    /// both sides
    pub fn retain_common(&mut self, other: &DataContainer) {
        self.entries
            .retain_mut(|(key, value)| match (value, other.value(key)) {
                (_, None) => false,
                (Value::Container(mine), Some(Value::Container(theirs))) => {
                    mine.retain_common(theirs);
                    true
                }
                _ => true,
            });
    }

    /// Copy values from `changed` onto keys that already exist here.
    ///
    /// Keys missing here are skipped, never inserted. Returns whether any
    /// value changed at any depth.
    pub fn refresh(&mut self, changed: &DataContainer) -> bool {
        let mut updated = false;
        for (key, value) in &changed.entries {
            let Some(idx) = self.position(key) else {
                trace!("refresh: skipping unknown key {key:?}");
                continue;
            };
            match (&mut self.entries[idx].1, value) {
                (Value::Container(mine), Value::Container(theirs)) => {
                    updated |= mine.refresh(theirs);
                }
                (slot, value) => {
                    if *slot != *value {
                        *slot = value.clone();
                        updated = true;
                    }
                }
            }
        }
        updated
    }
}
