//! The set of registries that make up one registry generation.
//!
//! A set is declared up front with every kind it carries, handed to the
//! bootstrap orchestrator, and frozen as a unit. Components receive it by
//! reference instead of reaching for a global.

use std::any::{Any, TypeId};
use std::fmt;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use super::{Registry, RegistryError, RegistryKind};

trait ErasedRegistry: Send + Sync {
	fn label(&self) -> &'static str;
	fn len(&self) -> usize;
	fn freeze(&self);
	fn is_frozen(&self) -> bool;
	fn as_any(&self) -> &dyn Any;
}

impl<T: RegistryKind> ErasedRegistry for Registry<T> {
	fn label(&self) -> &'static str {
		T::LABEL
	}

	fn len(&self) -> usize {
		Registry::len(self)
	}

	fn freeze(&self) {
		Registry::freeze(self)
	}

	fn is_frozen(&self) -> bool {
		Registry::is_frozen(self)
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

/// Typed collection of registries, one per declared kind.
pub struct RegistrySet {
	generation: &'static str,
	registries: IndexMap<TypeId, Box<dyn ErasedRegistry>, FxBuildHasher>,
}

impl RegistrySet {
	/// Starts declaring a set; `generation` names it in diagnostics (e.g., "static").
	pub fn builder(generation: &'static str) -> RegistrySetBuilder {
		RegistrySetBuilder {
			set: RegistrySet {
				generation,
				registries: IndexMap::with_hasher(FxBuildHasher),
			},
		}
	}

	pub fn generation(&self) -> &'static str {
		self.generation
	}

	/// Returns the registry for `T`, if this set declares it.
	pub fn registry<T: RegistryKind>(&self) -> Result<&Registry<T>, RegistryError> {
		self.registries
			.get(&TypeId::of::<T>())
			.and_then(|r| r.as_any().downcast_ref::<Registry<T>>())
			.ok_or(RegistryError::UnknownKind(T::LABEL))
	}

	pub fn has<T: RegistryKind>(&self) -> bool {
		self.registries.contains_key(&TypeId::of::<T>())
	}

	/// Registry labels with their entry counts, in declaration order.
	pub fn counts(&self) -> Vec<(&'static str, usize)> {
		self.registries.values().map(|r| (r.label(), r.len())).collect()
	}

	/// Entries across every registry in the set.
	pub fn total_len(&self) -> usize {
		self.registries.values().map(|r| r.len()).sum()
	}

	/// Freezes every registry in the set.
	pub fn freeze(&self) {
		for registry in self.registries.values() {
			registry.freeze();
		}
		tracing::info!(generation = self.generation, registries = self.registries.len(), "registry set frozen");
	}

	pub fn is_frozen(&self) -> bool {
		self.registries.values().all(|r| r.is_frozen())
	}
}

impl fmt::Debug for RegistrySet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RegistrySet")
			.field("generation", &self.generation)
			.field("registries", &self.counts())
			.finish()
	}
}

/// Declares the kinds carried by a [`RegistrySet`].
pub struct RegistrySetBuilder {
	set: RegistrySet,
}

impl RegistrySetBuilder {
	/// Declares a registry for `T`. Declaring the same kind twice keeps the first.
	pub fn kind<T: RegistryKind>(mut self) -> Self {
		self.set
			.registries
			.entry(TypeId::of::<T>())
			.or_insert_with(|| Box::new(Registry::<T>::new()));
		self
	}

	pub fn build(self) -> RegistrySet {
		self.set
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	struct Ore;
	struct Fluid;
	crate::registry_kind!(Ore => "ore", Fluid => "fluid");

	/// Registries are selected by type; undeclared kinds are unknown.
	#[test]
	fn registry_is_selected_by_type() {
		let set = RegistrySet::builder("static").kind::<Ore>().kind::<Ore>().build();
		assert!(set.registry::<Ore>().is_ok());
		assert!(matches!(
			set.registry::<Fluid>(),
			Err(RegistryError::UnknownKind("fluid"))
		));
		assert_eq!(set.counts(), vec![("ore", 0)]);
	}

	/// Freezing a set freezes every registry in it.
	#[test]
	fn freeze_covers_every_registry() {
		let set = RegistrySet::builder("static").kind::<Ore>().kind::<Fluid>().build();
		assert!(!set.is_frozen());
		set.freeze();
		assert!(set.is_frozen());
		assert!(set.registry::<Fluid>().unwrap().is_frozen());
	}
}
