//! Content units: descriptors, manifests and the host-facing unit contract.

mod manifest;

#[cfg(test)]
mod tests;

use std::fmt;

use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};

pub use self::manifest::{ContentManifest, ProviderEntry, UnitSection};
use crate::bootstrap::{EntryContext, Phase};
use crate::core::{Namespace, ProviderId, RegistryError};
use crate::provider::{ProviderCell, ProviderTable, RegistrationProvider};

/// One manifest line: run provider `id` during `phase`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDecl {
	pub id: ProviderId,
	#[serde(default)]
	pub phase: Phase,
}

/// Identity, metadata and provider manifest of one content unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDescriptor {
	namespace: Namespace,
	name: String,
	version: String,
	description: String,
	authors: Vec<String>,
	depends: Vec<Namespace>,
	providers: Vec<ProviderDecl>,
}

impl ContentDescriptor {
	/// Starts a descriptor for `namespace`; validation happens in [`DescriptorBuilder::build`].
	pub fn builder(namespace: &str) -> DescriptorBuilder {
		DescriptorBuilder {
			namespace: namespace.to_owned(),
			name: None,
			version: "0.0.0".to_owned(),
			description: String::new(),
			authors: Vec::new(),
			depends: Vec::new(),
			providers: Vec::new(),
		}
	}

	pub fn namespace(&self) -> &Namespace {
		&self.namespace
	}

	/// Display name; defaults to the namespace.
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn version(&self) -> &str {
		&self.version
	}

	pub fn description(&self) -> &str {
		&self.description
	}

	pub fn authors(&self) -> &[String] {
		&self.authors
	}

	/// Units that must load before this one.
	pub fn depends(&self) -> &[Namespace] {
		&self.depends
	}

	/// The full provider manifest, in declaration order.
	pub fn providers(&self) -> &[ProviderDecl] {
		&self.providers
	}

	/// Manifest entries that run during `phase`.
	pub fn providers_in(&self, phase: Phase) -> impl Iterator<Item = &ProviderDecl> + '_ {
		self.providers.iter().filter(move |decl| decl.phase == phase)
	}
}

impl fmt::Display for ContentDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} ({} {})", self.namespace, self.name, self.version)
	}
}

/// Builder for [`ContentDescriptor`].
#[derive(Debug, Clone)]
pub struct DescriptorBuilder {
	namespace: String,
	name: Option<String>,
	version: String,
	description: String,
	authors: Vec<String>,
	depends: Vec<String>,
	providers: Vec<(String, Phase)>,
}

impl DescriptorBuilder {
	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	pub fn version(mut self, version: impl Into<String>) -> Self {
		self.version = version.into();
		self
	}

	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = description.into();
		self
	}

	pub fn author(mut self, author: impl Into<String>) -> Self {
		self.authors.push(author.into());
		self
	}

	pub fn depends_on(mut self, namespace: impl Into<String>) -> Self {
		self.depends.push(namespace.into());
		self
	}

	/// Adds a manifest line.
	pub fn provider(mut self, id: impl Into<String>, phase: Phase) -> Self {
		self.providers.push((id.into(), phase));
		self
	}

	/// Validates the namespace, dependencies and manifest.
	pub fn build(self) -> Result<ContentDescriptor, RegistryError> {
		let namespace = Namespace::new(&self.namespace)?;
		let depends = self
			.depends
			.iter()
			.map(|dep| Namespace::new(dep))
			.collect::<Result<Vec<_>, _>>()?;

		let mut seen = IndexSet::with_capacity_and_hasher(self.providers.len(), FxBuildHasher);
		let mut providers = Vec::with_capacity(self.providers.len());
		for (id, phase) in &self.providers {
			let id = ProviderId::new(id)?;
			if !seen.insert(id.clone()) {
				return Err(RegistryError::DuplicateProvider {
					namespace,
					provider: id,
				});
			}
			providers.push(ProviderDecl { id, phase: *phase });
		}

		Ok(ContentDescriptor {
			name: self.name.unwrap_or_else(|| namespace.to_string()),
			namespace,
			version: self.version,
			description: self.description,
			authors: self.authors,
			depends,
			providers,
		})
	}
}

/// Binds namespaces to content units; a namespace can be bound once.
#[derive(Debug, Default)]
pub struct ContentRoster {
	bound: IndexSet<Namespace, FxBuildHasher>,
}

impl ContentRoster {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn bind(&mut self, descriptor: &ContentDescriptor) -> Result<(), RegistryError> {
		if !self.bound.insert(descriptor.namespace().clone()) {
			return Err(RegistryError::DuplicateNamespace(descriptor.namespace().clone()));
		}
		Ok(())
	}

	pub fn contains(&self, namespace: &Namespace) -> bool {
		self.bound.contains(namespace)
	}

	/// Bound namespaces in binding order.
	pub fn namespaces(&self) -> impl Iterator<Item = &Namespace> + '_ {
		self.bound.iter()
	}
}

/// The contract a host calls into for every content unit.
pub trait ContentUnit: Send + Sync {
	/// Namespace and metadata, read by UI and world-gen code.
	fn descriptor(&self) -> &ContentDescriptor;

	/// One-time setup, run once before the first load phase.
	fn main(&self, _entry: &mut EntryContext<'_>) -> Result<(), RegistryError> {
		Ok(())
	}

	/// Provider manifest the orchestrator discovers from.
	fn providers(&self) -> Vec<ProviderDecl> {
		self.descriptor().providers().to_vec()
	}

	/// Resolves a manifest id to its provider.
	fn provider(&self, id: &ProviderId) -> Option<&ProviderCell>;

	/// Every provider id this unit implements, manifested or not.
	fn implemented_providers(&self) -> Vec<ProviderId> {
		Vec::new()
	}
}

type EntryFn = Box<dyn Fn(&mut EntryContext<'_>) -> Result<(), RegistryError> + Send + Sync>;

/// A [`ContentUnit`] assembled from a descriptor, a provider table and an
/// optional entry closure.
pub struct ContentPack {
	descriptor: ContentDescriptor,
	providers: ProviderTable,
	entry: Option<EntryFn>,
}

impl ContentPack {
	pub fn new(descriptor: ContentDescriptor) -> Self {
		Self {
			descriptor,
			providers: ProviderTable::new(),
			entry: None,
		}
	}

	/// Adds a provider implementation under `id`.
	pub fn with_provider(
		mut self,
		id: &str,
		provider: impl RegistrationProvider,
	) -> Result<Self, RegistryError> {
		self.providers.insert(id, provider)?;
		Ok(self)
	}

	/// Sets the closure run as this unit's `main`.
	pub fn on_main(
		mut self,
		f: impl Fn(&mut EntryContext<'_>) -> Result<(), RegistryError> + Send + Sync + 'static,
	) -> Self {
		self.entry = Some(Box::new(f));
		self
	}

	pub fn provider_table(&self) -> &ProviderTable {
		&self.providers
	}
}

impl ContentUnit for ContentPack {
	fn descriptor(&self) -> &ContentDescriptor {
		&self.descriptor
	}

	fn main(&self, entry: &mut EntryContext<'_>) -> Result<(), RegistryError> {
		match &self.entry {
			Some(f) => f(entry),
			None => Ok(()),
		}
	}

	fn provider(&self, id: &ProviderId) -> Option<&ProviderCell> {
		self.providers.get(id)
	}

	fn implemented_providers(&self) -> Vec<ProviderId> {
		self.providers.ids().cloned().collect()
	}
}

impl fmt::Debug for ContentPack {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ContentPack")
			.field("descriptor", &self.descriptor)
			.field("providers", &self.providers)
			.field("has_main", &self.entry.is_some())
			.finish()
	}
}
