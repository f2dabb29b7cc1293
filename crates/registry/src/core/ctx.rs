use std::sync::Arc;

use super::{Namespace, Registry, RegistryError, RegistryKind, RegistrySet, ResourceId};
use crate::bootstrap::Stage;
use crate::content::ContentDescriptor;

/// Everything a declaration needs while registering on behalf of one unit.
///
/// Inserts always target `registries`. Lookups fall back to `parent`, which
/// lets world-gen content read the frozen static generation while it fills a
/// separate one.
#[derive(Clone, Copy)]
pub struct RegisterCtx<'a> {
	registries: &'a RegistrySet,
	parent: Option<&'a RegistrySet>,
	unit: &'a ContentDescriptor,
	stage: Stage,
}

impl<'a> RegisterCtx<'a> {
	pub fn new(registries: &'a RegistrySet, unit: &'a ContentDescriptor, stage: Stage) -> Self {
		Self {
			registries,
			parent: None,
			unit,
			stage,
		}
	}

	/// Adds a read-only fallback generation for lookups.
	pub fn with_parent(mut self, parent: &'a RegistrySet) -> Self {
		self.parent = Some(parent);
		self
	}

	pub fn unit(&self) -> &'a ContentDescriptor {
		self.unit
	}

	pub fn namespace(&self) -> &'a Namespace {
		self.unit.namespace()
	}

	pub fn stage(&self) -> Stage {
		self.stage
	}

	pub fn registries(&self) -> &'a RegistrySet {
		self.registries
	}

	/// Builds `namespace:path` in the current unit's namespace.
	pub fn id(&self, path: &str) -> Result<ResourceId, RegistryError> {
		self.namespace().id(path)
	}

	/// The registry inserts of `T` go to.
	pub fn target<T: RegistryKind>(&self) -> Result<&'a Registry<T>, RegistryError> {
		self.registries.registry::<T>()
	}

	/// The registry lookups of `T` read from: the target set, then the parent.
	pub fn registry<T: RegistryKind>(&self) -> Result<&'a Registry<T>, RegistryError> {
		match (self.registries.registry::<T>(), self.parent) {
			(Ok(registry), _) => Ok(registry),
			(Err(_), Some(parent)) => parent.registry::<T>(),
			(Err(err), None) => Err(err),
		}
	}

	pub fn get<T: RegistryKind>(&self, id: &ResourceId) -> Option<Arc<T>> {
		self.registry::<T>().ok()?.get(id)
	}

	/// Like [`get`](Self::get), but a missing entry is an error.
	pub fn require<T: RegistryKind>(&self, id: &ResourceId) -> Result<Arc<T>, RegistryError> {
		self.registry::<T>()?
			.get(id)
			.ok_or_else(|| RegistryError::UnresolvedReference {
				registry: T::LABEL,
				id: id.clone(),
			})
	}
}
