//! Per-kind registry store.
//!
//! # Mental Model
//!
//! 1. **Load phase:** entries are appended to a staging table behind a
//!    [`Mutex`]. `insert` is a check-then-insert under that lock, so two
//!    callers can never both observe an empty slot.
//! 2. **Freeze:** the staging table moves into an [`ArcSwapOption`] and the
//!    registry becomes read-only. Further inserts fail with
//!    [`RegistryError::RegistryFrozen`].
//! 3. **Consumption:** reads after freezing load the published table without
//!    taking any lock.
//!
//! # Invariants
//!
//! - A key is never overwritten.
//! - One instance is stored under at most one id, so [`Registry::id_of`] is a function.
//! - [`Registry::all`] yields entries in insertion order, every time.
//! - `published` is only ever set while holding the staging lock, so a reader
//!   that holds the lock and sees `published == None` may trust staging.

mod table;


use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use parking_lot::Mutex;

use self::table::Table;
use super::{RegistryError, RegistryKind, ResourceId};

/// Canonical store for every registered object of kind `T`.
pub struct Registry<T: RegistryKind> {
	staging: Mutex<Table<T>>,
	published: ArcSwapOption<Table<T>>,
}

impl<T: RegistryKind> Registry<T> {
	pub fn new() -> Self {
		Self {
			staging: Mutex::new(Table::default()),
			published: ArcSwapOption::empty(),
		}
	}

	/// Returns the registry label of `T`.
	pub fn label(&self) -> &'static str {
		T::LABEL
	}

	/// Inserts `value` under `id`, returning the shared instance now owned by the registry.
	pub fn insert(&self, id: ResourceId, value: T) -> Result<Arc<T>, RegistryError> {
		self.insert_arc(id, Arc::new(value))
	}

	/// Inserts an already shared instance under `id`.
	pub fn insert_arc(&self, id: ResourceId, value: Arc<T>) -> Result<Arc<T>, RegistryError> {
		let mut staging = self.staging.lock();
		if self.published.load().is_some() {
			return Err(RegistryError::RegistryFrozen {
				registry: T::LABEL,
				id,
			});
		}
		if staging.contains(&id) {
			return Err(RegistryError::DuplicateRegistration {
				registry: T::LABEL,
				id,
			});
		}
		if let Some(existing) = staging.id_of(&value) {
			return Err(RegistryError::DuplicateInstance {
				registry: T::LABEL,
				id,
				existing: existing.clone(),
			});
		}
		tracing::trace!(registry = T::LABEL, id = %id, "registered");
		staging.push(id, Arc::clone(&value));
		Ok(value)
	}

	/// Looks up an entry by its full id.
	pub fn get(&self, id: &ResourceId) -> Option<Arc<T>> {
		self.read(|table| table.get(id).cloned())
	}

	pub fn contains(&self, id: &ResourceId) -> bool {
		self.read(|table| table.contains(id))
	}

	/// Returns the full id `value` was registered under, by instance identity.
	pub fn id_of(&self, value: &T) -> Option<ResourceId> {
		self.read(|table| table.id_of(value).cloned())
	}

	/// Returns every entry in registration order.
	///
	/// After freezing this shares the published table; before, it copies the
	/// current staging table so the sequence stays stable while loading goes on.
	pub fn all(&self) -> Entries<T> {
		if let Some(table) = self.published.load_full() {
			return Entries { table };
		}
		let staging = self.staging.lock();
		match self.published.load_full() {
			Some(table) => Entries { table },
			None => Entries {
				table: Arc::new(staging.clone()),
			},
		}
	}

	pub fn len(&self) -> usize {
		self.read(Table::len)
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn is_frozen(&self) -> bool {
		self.published.load().is_some()
	}

	/// Publishes the current table and rejects all later inserts. Idempotent.
	pub fn freeze(&self) {
		let mut staging = self.staging.lock();
		if self.published.load().is_some() {
			return;
		}
		let table = std::mem::take(&mut *staging);
		tracing::debug!(registry = T::LABEL, entries = table.len(), "registry frozen");
		self.published.store(Some(Arc::new(table)));
	}

	fn read<R>(&self, f: impl FnOnce(&Table<T>) -> R) -> R {
		if let Some(table) = self.published.load().as_deref() {
			return f(table);
		}
		let staging = self.staging.lock();
		match self.published.load().as_deref() {
			Some(table) => f(table),
			None => f(&staging),
		}
	}
}

impl<T: RegistryKind> Default for Registry<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: RegistryKind> fmt::Debug for Registry<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Registry")
			.field("label", &T::LABEL)
			.field("len", &self.len())
			.field("frozen", &self.is_frozen())
			.finish()
	}
}

/// Finite, restartable view over a registry's entries in registration order.
pub struct Entries<T> {
	table: Arc<Table<T>>,
}

impl<T> Entries<T> {
	pub fn iter(&self) -> impl ExactSizeIterator<Item = (&ResourceId, &Arc<T>)> + '_ {
		self.table.iter()
	}

	pub fn ids(&self) -> impl ExactSizeIterator<Item = &ResourceId> + '_ {
		self.table.iter().map(|(id, _)| id)
	}

	pub fn len(&self) -> usize {
		self.table.len()
	}

	pub fn is_empty(&self) -> bool {
		self.table.len() == 0
	}
}

impl<T> Clone for Entries<T> {
	fn clone(&self) -> Self {
		Self {
			table: Arc::clone(&self.table),
		}
	}
}

impl<'a, T> IntoIterator for &'a Entries<T> {
	type Item = (&'a ResourceId, &'a Arc<T>);
	type IntoIter = indexmap::map::Iter<'a, ResourceId, Arc<T>>;

	fn into_iter(self) -> Self::IntoIter {
		self.table.iter()
	}
}
