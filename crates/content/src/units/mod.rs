//! Reference content units.
//!
//! `woodland` registers trees, planks and wooden tools. `ironworks` depends on
//! it: its tags name woodland items and its world preset uses a woodland tree
//! decorator, so it must load second.

pub mod ironworks;
pub mod woodland;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use kiln_registry::{
	Bootstrap, BootstrapConfig, BootstrapError, ConfigError, ContentUnit, RegistryError, RegistrySet,
};

use crate::layout::{static_registries, worldgen_registries};

#[derive(Debug, thiserror::Error)]
pub enum UnitError {
	#[error(transparent)]
	Manifest(#[from] ConfigError),
	#[error(transparent)]
	Registry(#[from] RegistryError),
	#[error(transparent)]
	Bootstrap(#[from] BootstrapError),
}

/// Both reference units, dependencies first.
pub fn reference_units() -> Result<Vec<Arc<dyn ContentUnit>>, UnitError> {
	let woodland: Arc<dyn ContentUnit> = Arc::new(woodland::unit()?);
	let ironworks: Arc<dyn ContentUnit> = Arc::new(ironworks::unit()?);
	Ok(vec![woodland, ironworks])
}

/// A finished bootstrap plus the world-gen generation it produced.
#[derive(Debug)]
pub struct LoadedContent {
	pub bootstrap: Bootstrap,
	pub worldgen: RegistrySet,
}

/// Bootstraps the reference units into the standard layouts.
pub fn load(config: BootstrapConfig) -> Result<LoadedContent, UnitError> {
	let mut bootstrap = Bootstrap::new(static_registries(), config);
	for unit in reference_units()? {
		bootstrap.add_shared(unit)?;
	}
	bootstrap.run()?;
	let worldgen = bootstrap.run_worldgen(worldgen_registries())?;
	tracing::info!(counts = ?worldgen.counts(), "world-gen generation ready");
	Ok(LoadedContent { bootstrap, worldgen })
}
