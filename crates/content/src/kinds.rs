//! Element kinds of the host game.
//!
//! Each type owns one registry; see [`layout`](crate::layout) for which
//! generation declares it.

use kiln_registry::ResourceId;

use crate::tools::{ItemCapabilities, ToolStats};

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
	pub max_stack: u8,
	pub capabilities: ItemCapabilities,
	/// Present for tools built by [`tool`](crate::tools::tool).
	pub tool: Option<ToolStats>,
}

impl Item {
	pub const fn stackable(max_stack: u8) -> Self {
		Self {
			max_stack,
			capabilities: ItemCapabilities::empty(),
			tool: None,
		}
	}

	pub fn is_tool(&self) -> bool {
		self.tool.is_some()
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
	pub hardness: f32,
	pub resistance: f32,
	/// Capabilities a tool needs to harvest this block. Empty means any item.
	pub requires: ItemCapabilities,
	pub min_tier: u8,
}

impl Block {
	pub const fn new(hardness: f32, resistance: f32) -> Self {
		Self {
			hardness,
			resistance,
			requires: ItemCapabilities::empty(),
			min_tier: 0,
		}
	}

	pub fn mined_with(mut self, requires: ItemCapabilities, min_tier: u8) -> Self {
		self.requires = requires;
		self.min_tier = min_tier;
		self
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityCategory {
	Creature,
	Monster,
	Ambient,
	Misc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityType {
	pub category: EntityCategory,
	pub width: f32,
	pub height: f32,
}

/// Settings handle for a chunk generator; the terrain algorithm lives in the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkGeneratorCodec {
	pub sea_level: i32,
	pub min_y: i32,
	pub height: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreeDecoratorType {
	pub probability: f32,
	/// Block the decorator places.
	pub places: ResourceId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispenseAction {
	Drop,
	Place(ResourceId),
	UseOnBlock,
}

/// What a dispenser does with one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispenserBehavior {
	pub item: ResourceId,
	pub action: DispenseAction,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemTag {
	pub members: Vec<ResourceId>,
}

impl ItemTag {
	pub fn new(members: impl IntoIterator<Item = ResourceId>) -> Self {
		Self {
			members: members.into_iter().collect(),
		}
	}

	pub fn contains(&self, id: &ResourceId) -> bool {
		self.members.contains(id)
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Biome {
	pub temperature: f32,
	pub downfall: f32,
	pub decorators: Vec<ResourceId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldPreset {
	pub generator: ResourceId,
	pub biomes: Vec<ResourceId>,
}

kiln_registry::registry_kind!(
	Item => "item",
	Block => "block",
	EntityType => "entity_type",
	ChunkGeneratorCodec => "chunk_generator",
	TreeDecoratorType => "tree_decorator_type",
	DispenserBehavior => "dispenser_behavior",
	ItemTag => "item_tag",
	Biome => "biome",
	WorldPreset => "world_preset",
);
