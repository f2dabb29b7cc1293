//! Namespaced, phase-sequenced content registration.
//!
//! Content units declare game objects through typed registration providers.
//! The [`Bootstrap`] orchestrator resolves each unit's provider manifest,
//! runs the providers phase by phase in a fixed unit order, and freezes every
//! [`Registry`] once the load phase ends.
//!
//! # Modules
//!
//! - [`core`] - identifiers, the per-kind [`Registry`] store and [`RegistrySet`]
//! - [`registrar`] - the single-use [`Registrar`] builder
//! - [`provider`] - the [`RegistrationProvider`] contract and its once-only cell
//! - [`content`] - [`ContentDescriptor`], [`ContentUnit`] and TOML manifests
//! - [`bootstrap`] - the [`Bootstrap`] orchestrator and its configuration

pub mod bootstrap;
pub mod content;
pub mod core;
pub mod provider;
pub mod registrar;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use bootstrap::{
	Bootstrap, BootstrapConfig, BootstrapError, BootstrapReport, BootstrapState, ConfigError,
	EntryContext, Environment, Phase, ProviderReport, Stage, WorldgenFn,
};
pub use content::{
	ContentDescriptor, ContentManifest, ContentPack, ContentRoster, ContentUnit, DescriptorBuilder,
	ProviderDecl,
};
pub use core::{
	BoxError, Entries, Namespace, ProviderId, RegisterCtx, Registry, RegistryError, RegistryKind,
	RegistrySet, RegistrySetBuilder, ResourceId,
};
pub use provider::{
	Declarations, FnProvider, ProviderCell, ProviderRun, ProviderTable, RegistrationProvider, provider_fn,
};
pub use registrar::Registrar;
