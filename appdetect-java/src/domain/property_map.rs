//! Property table of a descriptor

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

use appdetect_core::domain::Property;

/// Property name to value, in first-insertion order
///
/// Only grows: entries are added or overwritten, never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyMap {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from declared properties; the first declaration of a name wins
    pub fn from_properties(properties: &[Property]) -> Self {
        let mut map = Self::new();
        for property in properties {
            map.insert_if_absent(&property.name, &property.value);
        }
        map
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.index
            .get(name)
            .map(|&position| self.entries[position].1.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Add `name` unless it is already present. Returns whether it was added.
    pub fn insert_if_absent(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let name = name.into();
        if self.index.contains_key(&name) {
            return false;
        }
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push((name, value.into()));
        true
    }

    /// Set `name`, keeping its original position when it already exists
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        match self.index.get(&name) {
            Some(&position) => self.entries[position].1 = value.into(),
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, value.into()));
            }
        }
    }

    /// Absorb `other` without touching existing names
    pub fn absorb(&mut self, other: &PropertyMap) {
        for (name, value) in other.iter() {
            self.insert_if_absent(name, value);
        }
    }

    /// Absorb `other`, replacing existing values
    pub fn overwrite_from(&mut self, other: &PropertyMap) {
        for (name, value) in other.iter() {
            self.insert(name, value);
        }
    }

    /// Declared-property view, in table order
    pub fn to_properties(&self) -> Vec<Property> {
        self.iter()
            .map(|(name, value)| Property::new(name, value))
            .collect()
    }
}

impl Serialize for PropertyMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_declaration_wins() {
        let map = PropertyMap::from_properties(&[
            Property::new("a", "1"),
            Property::new("b", "2"),
            Property::new("a", "3"),
        ]);
        assert_eq!(map.get("a"), Some("1"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_absorb_never_overwrites() {
        let mut map = PropertyMap::from_properties(&[Property::new("a", "child")]);
        let parent = PropertyMap::from_properties(&[
            Property::new("a", "parent"),
            Property::new("b", "parent"),
        ]);
        map.absorb(&parent);
        assert_eq!(map.get("a"), Some("child"));
        assert_eq!(map.get("b"), Some("parent"));
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut map = PropertyMap::from_properties(&[Property::new("a", "1"), Property::new("b", "2")]);
        map.overwrite_from(&PropertyMap::from_properties(&[Property::new("a", "profile")]));
        let names: Vec<_> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(map.get("a"), Some("profile"));
    }

    #[test]
    fn test_serializes_as_ordered_map() {
        let map = PropertyMap::from_properties(&[Property::new("z", "1"), Property::new("a", "2")]);
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"z":"1","a":"2"}"#);
    }
}
