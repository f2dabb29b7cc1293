//! Registry layouts.
//!
//! The static generation is filled during bootstrap and frozen with it. The
//! world-gen generation is built fresh for each world and filled by
//! [`Bootstrap::run_worldgen`](kiln_registry::Bootstrap::run_worldgen).

use kiln_registry::RegistrySet;

use crate::kinds::{
	Biome, Block, ChunkGeneratorCodec, DispenserBehavior, EntityType, Item, ItemTag, TreeDecoratorType,
	WorldPreset,
};

pub fn static_registries() -> RegistrySet {
	RegistrySet::builder("static")
		.kind::<Item>()
		.kind::<Block>()
		.kind::<EntityType>()
		.kind::<ChunkGeneratorCodec>()
		.kind::<TreeDecoratorType>()
		.kind::<DispenserBehavior>()
		.kind::<ItemTag>()
		.build()
}

pub fn worldgen_registries() -> RegistrySet {
	RegistrySet::builder("worldgen")
		.kind::<Biome>()
		.kind::<WorldPreset>()
		.build()
}
