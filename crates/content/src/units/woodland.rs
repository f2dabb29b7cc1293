//! Trees, planks, wooden tools and forest wildlife.

use kiln_registry::{
	ContentDescriptor, ContentPack, Declarations, Phase, RegistryError, provider_fn,
};

use crate::kinds::{Block, EntityCategory, EntityType, Item, TreeDecoratorType};
use crate::tools::{ItemCapabilities, ToolKind, ToolMaterial, tool};

pub const NAMESPACE: &str = "woodland";

pub fn unit() -> Result<ContentPack, RegistryError> {
	let descriptor = ContentDescriptor::builder(NAMESPACE)
		.name("Woodland")
		.version("1.2.0")
		.description("Trees, planks and forest wildlife.")
		.author("kiln")
		.provider("blocks", Phase::Common)
		.provider("items", Phase::Common)
		.provider("tree-decorators", Phase::Common)
		.provider("entities", Phase::Common)
		.build()?;

	ContentPack::new(descriptor)
		.with_provider("blocks", provider_fn::<Block, _>(blocks))?
		.with_provider("items", provider_fn::<Item, _>(items))?
		.with_provider("tree-decorators", provider_fn::<TreeDecoratorType, _>(tree_decorators))?
		.with_provider("entities", provider_fn::<EntityType, _>(entities))
}

fn blocks(decl: &mut Declarations<'_, Block>) -> Result<(), RegistryError> {
	decl.entry("oak_log", Block::new(2.0, 2.0).mined_with(ItemCapabilities::MINE_WOOD, 0))?;
	decl.entry("oak_planks", Block::new(2.0, 3.0).mined_with(ItemCapabilities::MINE_WOOD, 0))?;
	decl.entry("oak_leaves", Block::new(0.2, 0.2))?;
	Ok(())
}

fn items(decl: &mut Declarations<'_, Item>) -> Result<(), RegistryError> {
	// Block items share the block's id.
	for block in ["oak_log", "oak_planks"] {
		let id = decl.ctx().id(block)?;
		decl.ctx().require::<Block>(&id)?;
		decl.entry(block, Item::stackable(64))?;
	}
	decl.entry("stick", Item::stackable(64))?;
	for kind in ToolKind::ALL {
		decl.entry(&format!("wooden_{}", kind.as_str()), tool(&ToolMaterial::WOOD, kind))?;
	}
	Ok(())
}

fn tree_decorators(decl: &mut Declarations<'_, TreeDecoratorType>) -> Result<(), RegistryError> {
	let leaves = decl.ctx().id("oak_leaves")?;
	decl.ctx().require::<Block>(&leaves)?;
	decl.entry(
		"hanging_leaves",
		TreeDecoratorType {
			probability: 0.25,
			places: leaves,
		},
	)?;
	Ok(())
}

fn entities(decl: &mut Declarations<'_, EntityType>) -> Result<(), RegistryError> {
	decl.entry(
		"stag",
		EntityType {
			category: EntityCategory::Creature,
			width: 0.9,
			height: 1.6,
		},
	)?;
	decl.entry(
		"firefly",
		EntityType {
			category: EntityCategory::Ambient,
			width: 0.2,
			height: 0.2,
		},
	)?;
	Ok(())
}
