//! Game object kinds and reference content for the kiln registry.
//!
//! - [`kinds`] - the element types a host game registers (items, blocks, ...)
//! - [`tools`] - tool factories over [`ToolMaterial`] data
//! - [`layout`] - registry layouts for the static and world-gen generations
//! - [`units`] - the `woodland` and `ironworks` reference units

pub mod kinds;
pub mod layout;
pub mod tools;
pub mod units;

pub use kinds::{
	Biome, Block, ChunkGeneratorCodec, DispenseAction, DispenserBehavior, EntityCategory, EntityType,
	Item, ItemTag, TreeDecoratorType, WorldPreset,
};
pub use layout::{static_registries, worldgen_registries};
pub use tools::{ItemCapabilities, ToolKind, ToolMaterial, ToolStats, can_mine, tool, tool_stats};
pub use units::{LoadedContent, UnitError, load, reference_units};
