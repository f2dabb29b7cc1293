#![cfg_attr(doc, allow(rustdoc::private_intra_doc_links))]
//! Load-time bootstrap orchestration.
//!
//! # Mental Model
//!
//! 1. **Binding:** [`Bootstrap::add_unit`] binds each unit's namespace as soon
//!    as the unit is added, so namespace collisions surface before any content
//!    is registered.
//! 2. **Discovery:** the configured load order is applied, dependencies are
//!    checked against it, and every manifest provider id is resolved.
//! 3. **Entry:** each unit's `main` runs once, in order. Units may queue
//!    world-gen bootstrap functions here.
//! 4. **Phases:** `common`, then `client`, then `server` (filtered by the
//!    [`Environment`]). Every unit finishes a phase before the next begins.
//! 5. **Complete:** every registry in the static [`RegistrySet`] is frozen.
//!
//! # Failure Policy
//!
//! The first error aborts the whole bootstrap. No later unit, provider or
//! phase runs, and the state becomes [`BootstrapState::Failed`]. The partly
//! filled registries are frozen so nothing can be added to them afterwards.
//! Errors carry the unit namespace and the [`Stage`] they were raised in.
//!
//! # Invariants
//!
//! - Phase `N + 1` never starts before every unit finished phase `N`.
//!   - Tested by: `tests::phases_complete_across_units_before_advancing`
//! - Registries are frozen once the state is `Complete` or `Failed`.
//!   - Tested by: `tests::complete_bootstrap_freezes_registries`
//!   - Tested by: `tests::duplicate_in_a_second_provider_aborts_before_later_units`
//! - Late content goes into a separate generation via [`Bootstrap::run_worldgen`].
//!   - Tested by: `tests::worldgen_fills_a_separate_generation`

mod config;
mod phase;


use std::fmt;
use std::sync::Arc;

pub use self::config::{BootstrapConfig, ConfigError, Environment};
pub use self::phase::{Phase, Stage};
use crate::content::{ContentDescriptor, ContentRoster, ContentUnit};
use crate::core::{Namespace, ProviderId, RegisterCtx, RegistryError, RegistrySet};
use crate::provider::ProviderRun;

/// World-gen bootstrap function, run against a dynamic registry generation.
pub type WorldgenFn = Box<dyn Fn(&RegisterCtx<'_>) -> Result<(), RegistryError> + Send + Sync>;

/// Fatal bootstrap failure.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
	#[error("bootstrap aborted during {stage} for `{unit}`: {source}")]
	Unit {
		unit: Namespace,
		stage: Stage,
		#[source]
		source: RegistryError,
	},

	#[error("bootstrap has already run (state: {0:?})")]
	AlreadyRan(BootstrapState),

	#[error("bootstrap has not completed (state: {0:?})")]
	NotComplete(BootstrapState),
}

impl BootstrapError {
	fn unit(unit: &Namespace, stage: Stage, source: RegistryError) -> Self {
		Self::Unit {
			unit: unit.clone(),
			stage,
			source,
		}
	}

	/// The underlying registry error, for unit-level failures.
	pub fn registry_error(&self) -> Option<&RegistryError> {
		match self {
			Self::Unit { source, .. } => Some(source),
			_ => None,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapState {
	Pending,
	Discovery,
	Entry,
	Phase(Phase),
	Complete,
	Failed,
}

/// Host-facing context handed to [`ContentUnit::main`].
pub struct EntryContext<'a> {
	unit: &'a ContentDescriptor,
	environment: Environment,
	worldgen: &'a mut Vec<WorldgenFn>,
}

impl<'a> EntryContext<'a> {
	pub fn unit(&self) -> &'a ContentDescriptor {
		self.unit
	}

	pub fn environment(&self) -> Environment {
		self.environment
	}

	/// Queues a world-gen bootstrap function for [`Bootstrap::run_worldgen`].
	pub fn add_worldgen(
		&mut self,
		f: impl Fn(&RegisterCtx<'_>) -> Result<(), RegistryError> + Send + Sync + 'static,
	) {
		self.worldgen.push(Box::new(f));
	}
}

/// Registration counts for one provider run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderReport {
	pub unit: Namespace,
	pub phase: Phase,
	pub provider: ProviderId,
	pub kind: &'static str,
	/// Objects of `kind` declared by the provider.
	pub registered: usize,
	/// Objects registered from hooks or other side paths during the run.
	pub companions: usize,
}

/// What a bootstrap run registered, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
	pub runs: Vec<ProviderReport>,
}

impl BootstrapReport {
	/// Every object inserted during the run, companions included.
	pub fn total(&self) -> usize {
		self.runs.iter().map(|run| run.registered + run.companions).sum()
	}

	pub fn for_unit<'a>(&'a self, unit: &'a Namespace) -> impl Iterator<Item = &'a ProviderReport> + 'a {
		self.runs.iter().filter(move |run| &run.unit == unit)
	}
}

struct LoadedUnit {
	unit: Arc<dyn ContentUnit>,
	worldgen: Vec<WorldgenFn>,
}

impl LoadedUnit {
	fn namespace(&self) -> &Namespace {
		self.unit.descriptor().namespace()
	}
}

/// Drives discovery and registration for every content unit.
pub struct Bootstrap {
	config: BootstrapConfig,
	registries: RegistrySet,
	roster: ContentRoster,
	units: Vec<LoadedUnit>,
	state: BootstrapState,
	report: BootstrapReport,
}

impl Bootstrap {
	pub fn new(registries: RegistrySet, config: BootstrapConfig) -> Self {
		Self {
			config,
			registries,
			roster: ContentRoster::new(),
			units: Vec::new(),
			state: BootstrapState::Pending,
			report: BootstrapReport::default(),
		}
	}

	/// Adds a unit and binds its namespace immediately.
	pub fn add_unit(&mut self, unit: impl ContentUnit + 'static) -> Result<(), BootstrapError> {
		self.add_shared(Arc::new(unit))
	}

	pub fn add_shared(&mut self, unit: Arc<dyn ContentUnit>) -> Result<(), BootstrapError> {
		if self.state != BootstrapState::Pending {
			return Err(BootstrapError::AlreadyRan(self.state));
		}
		let descriptor = unit.descriptor();
		self.roster
			.bind(descriptor)
			.map_err(|err| BootstrapError::unit(descriptor.namespace(), Stage::Discovery, err))?;
		tracing::debug!(unit = %descriptor.namespace(), name = descriptor.name(), "content unit bound");
		self.units.push(LoadedUnit {
			unit,
			worldgen: Vec::new(),
		});
		Ok(())
	}

	pub fn state(&self) -> BootstrapState {
		self.state
	}

	pub fn registries(&self) -> &RegistrySet {
		&self.registries
	}

	pub fn report(&self) -> &BootstrapReport {
		&self.report
	}

	/// Descriptors in load order (the configured order once `run` has started).
	pub fn descriptors(&self) -> impl Iterator<Item = &ContentDescriptor> + '_ {
		self.units.iter().map(|loaded| loaded.unit.descriptor())
	}

	/// Looks up a unit's descriptor by namespace.
	pub fn descriptor(&self, namespace: &str) -> Option<&ContentDescriptor> {
		self.descriptors()
			.find(|descriptor| descriptor.namespace().as_str() == namespace)
	}

	/// Runs discovery, entry points and every load phase, then freezes the registries.
	pub fn run(&mut self) -> Result<&BootstrapReport, BootstrapError> {
		if self.state != BootstrapState::Pending {
			return Err(BootstrapError::AlreadyRan(self.state));
		}
		match self.run_inner() {
			Ok(()) => {
				self.registries.freeze();
				self.state = BootstrapState::Complete;
				tracing::info!(
					units = self.units.len(),
					registered = self.report.total(),
					"bootstrap complete"
				);
				Ok(&self.report)
			}
			Err(err) => {
				tracing::error!(state = ?self.state, error = %err, "bootstrap aborted");
				self.registries.freeze();
				self.state = BootstrapState::Failed;
				Err(err)
			}
		}
	}

	fn run_inner(&mut self) -> Result<(), BootstrapError> {
		self.state = BootstrapState::Discovery;
		self.apply_load_order()?;
		self.check_dependencies()?;
		self.resolve_manifests()?;

		self.state = BootstrapState::Entry;
		let environment = self.config.environment;
		for loaded in &mut self.units {
			let unit = Arc::clone(&loaded.unit);
			let descriptor = unit.descriptor();
			let mut entry = EntryContext {
				unit: descriptor,
				environment,
				worldgen: &mut loaded.worldgen,
			};
			unit.main(&mut entry)
				.map_err(|err| BootstrapError::unit(descriptor.namespace(), Stage::Entry, err))?;
		}

		for &phase in environment.phases() {
			self.state = BootstrapState::Phase(phase);
			let _span = tracing::info_span!("phase", %phase).entered();
			for loaded in &self.units {
				let descriptor = loaded.unit.descriptor();
				let stage = Stage::Phase(phase);
				for decl in loaded.unit.providers().into_iter().filter(|d| d.phase == phase) {
					let cell = loaded.unit.provider(&decl.id).ok_or_else(|| {
						BootstrapError::unit(
							descriptor.namespace(),
							stage,
							RegistryError::UnknownProvider {
								namespace: descriptor.namespace().clone(),
								provider: decl.id.clone(),
							},
						)
					})?;
					let ctx = RegisterCtx::new(&self.registries, descriptor, stage);
					let before = self.registries.total_len();
					let run = cell
						.initialize(ctx)
						.map_err(|err| BootstrapError::unit(descriptor.namespace(), stage, err))?;
					if let ProviderRun::Ran { registered } = run {
						self.report.runs.push(ProviderReport {
							unit: descriptor.namespace().clone(),
							phase,
							provider: decl.id.clone(),
							kind: cell.kind(),
							registered,
							companions: (self.registries.total_len() - before).saturating_sub(registered),
						});
					}
				}
			}
		}
		Ok(())
	}

	fn apply_load_order(&mut self) -> Result<(), BootstrapError> {
		if self.config.load_order.is_empty() {
			return Ok(());
		}
		for loaded in &self.units {
			if !self.config.load_order.contains(loaded.namespace()) {
				let ns = loaded.namespace();
				return Err(BootstrapError::unit(
					ns,
					Stage::Discovery,
					RegistryError::UnlistedUnit(ns.clone()),
				));
			}
		}
		for listed in &self.config.load_order {
			if !self.roster.contains(listed) {
				tracing::warn!(unit = %listed, "load order names a unit that was never added");
			}
		}
		let order = &self.config.load_order;
		self.units.sort_by_key(|loaded| {
			order
				.iter()
				.position(|ns| ns == loaded.namespace())
				.unwrap_or(usize::MAX)
		});
		Ok(())
	}

	fn check_dependencies(&self) -> Result<(), BootstrapError> {
		for (index, loaded) in self.units.iter().enumerate() {
			let namespace = loaded.namespace();
			for dependency in loaded.unit.descriptor().depends() {
				let position = self.units.iter().position(|other| other.namespace() == dependency);
				let err = match position {
					Some(position) if position < index => continue,
					Some(_) => RegistryError::DependencyOrder {
						namespace: namespace.clone(),
						dependency: dependency.clone(),
					},
					None => RegistryError::MissingDependency {
						namespace: namespace.clone(),
						dependency: dependency.clone(),
					},
				};
				return Err(BootstrapError::unit(namespace, Stage::Discovery, err));
			}
		}
		Ok(())
	}

	fn resolve_manifests(&self) -> Result<(), BootstrapError> {
		for loaded in &self.units {
			let namespace = loaded.namespace();
			let manifest = loaded.unit.providers();
			for decl in &manifest {
				let Some(cell) = loaded.unit.provider(&decl.id) else {
					return Err(BootstrapError::unit(
						namespace,
						Stage::Discovery,
						RegistryError::UnknownProvider {
							namespace: namespace.clone(),
							provider: decl.id.clone(),
						},
					));
				};
				tracing::trace!(unit = %namespace, provider = %decl.id, kind = cell.kind(), phase = %decl.phase, "provider resolved");
			}
			for id in loaded.unit.implemented_providers() {
				if !manifest.iter().any(|decl| decl.id == id) {
					tracing::warn!(unit = %namespace, provider = %id, "provider is not in the manifest and will not run");
				}
			}
		}
		Ok(())
	}

	/// Runs every queued world-gen function against `generation`, in unit order,
	/// then freezes and returns it.
	///
	/// Lookups inside the functions fall back to the frozen static registries.
	pub fn run_worldgen(&self, generation: RegistrySet) -> Result<RegistrySet, BootstrapError> {
		if self.state != BootstrapState::Complete {
			return Err(BootstrapError::NotComplete(self.state));
		}
		let _span = tracing::info_span!("worldgen", generation = generation.generation()).entered();
		for loaded in &self.units {
			let descriptor = loaded.unit.descriptor();
			let ctx = RegisterCtx::new(&generation, descriptor, Stage::Worldgen)
				.with_parent(&self.registries);
			for f in &loaded.worldgen {
				f(&ctx).map_err(|err| BootstrapError::unit(descriptor.namespace(), Stage::Worldgen, err))?;
			}
		}
		generation.freeze();
		Ok(generation)
	}
}

impl fmt::Debug for Bootstrap {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Bootstrap")
			.field("state", &self.state)
			.field("config", &self.config)
			.field("units", &self.roster.namespaces().collect::<Vec<_>>())
			.field("registries", &self.registries)
			.finish()
	}
}
