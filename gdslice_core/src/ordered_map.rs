use std::collections::HashMap;

use serde::Serialize;
use serde::Serializer;
use serde::ser::SerializeMap;

/// A string-keyed map that remembers the order keys were first inserted.
///
/// Inserting a key that already exists replaces its value but keeps its
/// original position. Serializes as a map whose entries follow that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedMap<V> {
	entries: HashMap<String, V>,
	keys: Vec<String>,
}

impl<V> Default for OrderedMap<V> {
	fn default() -> Self {
		Self {
			entries: HashMap::new(),
			keys: Vec::new(),
		}
	}
}

impl<V> OrderedMap<V> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert `value` under `key`, returning the value it replaced.
	pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
		let key = key.into();
		if !self.entries.contains_key(&key) {
			self.keys.push(key.clone());
		}

		self.entries.insert(key, value)
	}

	pub fn get(&self, key: &str) -> Option<&V> {
		self.entries.get(key)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	/// Keys in first-insertion order.
	pub fn keys(&self) -> &[String] {
		&self.keys
	}

	/// Entries in first-insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
		self.keys
			.iter()
			.filter_map(|key| self.entries.get(key).map(|value| (key.as_str(), value)))
	}

	pub fn len(&self) -> usize {
		self.keys.len()
	}

	pub fn is_empty(&self) -> bool {
		self.keys.is_empty()
	}
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut map = Self::new();
		for (key, value) in iter {
			map.insert(key, value);
		}
		map
	}
}

impl<V: Serialize> Serialize for OrderedMap<V> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.len()))?;
		for (key, value) in self.iter() {
			map.serialize_entry(key, value)?;
		}
		map.end()
	}
}
