use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap};

use crate::core::ResourceId;

/// Insertion-ordered storage behind a [`Registry`](super::Registry).
pub(crate) struct Table<T> {
	entries: IndexMap<ResourceId, Arc<T>, FxBuildHasher>,
	/// Instance address to entry index, for reverse lookups.
	by_instance: FxHashMap<usize, usize>,
}

impl<T> Table<T> {
	pub(crate) fn len(&self) -> usize {
		self.entries.len()
	}

	pub(crate) fn contains(&self, id: &ResourceId) -> bool {
		self.entries.contains_key(id)
	}

	pub(crate) fn get(&self, id: &ResourceId) -> Option<&Arc<T>> {
		self.entries.get(id)
	}

	pub(crate) fn id_of(&self, value: &T) -> Option<&ResourceId> {
		let index = *self.by_instance.get(&addr(value))?;
		self.entries.get_index(index).map(|(id, _)| id)
	}

	/// Appends a new entry. Callers check for an existing key first.
	pub(crate) fn push(&mut self, id: ResourceId, value: Arc<T>) {
		let index = self.entries.len();
		self.by_instance.insert(addr(&*value), index);
		self.entries.insert(id, value);
	}

	pub(crate) fn iter(&self) -> indexmap::map::Iter<'_, ResourceId, Arc<T>> {
		self.entries.iter()
	}
}

impl<T> Default for Table<T> {
	fn default() -> Self {
		Self {
			entries: IndexMap::with_hasher(FxBuildHasher),
			by_instance: FxHashMap::default(),
		}
	}
}

impl<T> Clone for Table<T> {
	fn clone(&self) -> Self {
		Self {
			entries: self.entries.clone(),
			by_instance: self.by_instance.clone(),
		}
	}
}

fn addr<T>(value: &T) -> usize {
	value as *const T as usize
}
