//! Ore, iron tools, tags over woodland items and the `industrial` world preset.
//!
//! The descriptor comes from `ironworks.toml`.

use kiln_registry::{
	ContentManifest, ContentPack, Declarations, EntryContext, Namespace, RegisterCtx, Registrar,
	RegistryError, ResourceId, provider_fn,
};

use super::{UnitError, woodland};
use crate::kinds::{
	Biome, Block, ChunkGeneratorCodec, DispenseAction, DispenserBehavior, Item, ItemTag,
	TreeDecoratorType, WorldPreset,
};
use crate::tools::{ItemCapabilities, ToolKind, ToolMaterial, tool};

pub const NAMESPACE: &str = "ironworks";

const MANIFEST: &str = include_str!("ironworks.toml");

pub fn unit() -> Result<ContentPack, UnitError> {
	let descriptor = ContentManifest::from_toml_str(MANIFEST)?.into_descriptor()?;
	let pack = ContentPack::new(descriptor)
		.with_provider("blocks", provider_fn::<Block, _>(blocks))?
		.with_provider("tools", provider_fn::<Item, _>(tools))?
		.with_provider("tags", provider_fn::<ItemTag, _>(tags))?
		.with_provider("generators", provider_fn::<ChunkGeneratorCodec, _>(generators))?
		.on_main(main);
	Ok(pack)
}

fn main(entry: &mut EntryContext<'_>) -> Result<(), RegistryError> {
	tracing::debug!(unit = %entry.unit().namespace(), environment = ?entry.environment(), "queueing world-gen");
	entry.add_worldgen(worldgen);
	Ok(())
}

fn blocks(decl: &mut Declarations<'_, Block>) -> Result<(), RegistryError> {
	decl.entry("iron_ore", Block::new(3.0, 3.0).mined_with(ItemCapabilities::MINE_STONE, 1))?;
	decl.entry("anvil", Block::new(5.0, 1200.0).mined_with(ItemCapabilities::MINE_STONE, 0))?;
	Ok(())
}

fn tools(decl: &mut Declarations<'_, Item>) -> Result<(), RegistryError> {
	decl.entry("iron_ingot", Item::stackable(64))?;
	for kind in ToolKind::ALL {
		let local = format!("iron_{}", kind.as_str());
		let item_id = decl.ctx().id(&local)?;
		let registrar = Registrar::of(move || tool(&ToolMaterial::IRON, kind)).and_then(move |ctx, item| {
			if !item.capabilities.contains(ItemCapabilities::DISPENSABLE) {
				return Ok(());
			}
			let behavior = format!("{}_dispense", item_id.path());
			Registrar::new(DispenserBehavior {
				item: item_id,
				action: DispenseAction::UseOnBlock,
			})
			.register(ctx, &behavior)
			.map(drop)
		});
		decl.register(&local, registrar)?;
	}
	Ok(())
}

/// Resolves `namespace:path` and checks the item exists.
fn item_ref(ctx: &RegisterCtx<'_>, namespace: &str, path: &str) -> Result<ResourceId, RegistryError> {
	let id = Namespace::new(namespace)?.id(path)?;
	ctx.require::<Item>(&id)?;
	Ok(id)
}

fn tags(decl: &mut Declarations<'_, ItemTag>) -> Result<(), RegistryError> {
	let ctx = *decl.ctx();
	decl.entry(
		"tool_handles",
		ItemTag::new([item_ref(&ctx, woodland::NAMESPACE, "stick")?]),
	)?;

	let mut pickaxes = Vec::new();
	for namespace in [woodland::NAMESPACE, NAMESPACE] {
		let prefix = if namespace == NAMESPACE { "iron" } else { "wooden" };
		pickaxes.push(item_ref(&ctx, namespace, &format!("{prefix}_pickaxe"))?);
	}
	decl.entry("pickaxes", ItemTag::new(pickaxes))?;
	Ok(())
}

fn generators(decl: &mut Declarations<'_, ChunkGeneratorCodec>) -> Result<(), RegistryError> {
	decl.entry(
		"ash_plains",
		ChunkGeneratorCodec {
			sea_level: 48,
			min_y: -64,
			height: 384,
		},
	)?;
	Ok(())
}

fn worldgen(ctx: &RegisterCtx<'_>) -> Result<(), RegistryError> {
	let generator = ctx.id("ash_plains")?;
	ctx.require::<ChunkGeneratorCodec>(&generator)?;
	let decorator = Namespace::new(woodland::NAMESPACE)?.id("hanging_leaves")?;
	ctx.require::<TreeDecoratorType>(&decorator)?;

	Registrar::new(Biome {
		temperature: 1.6,
		downfall: 0.0,
		decorators: vec![decorator],
	})
	.register(ctx, "ash_fields")?;
	Registrar::new(WorldPreset {
		generator,
		biomes: vec![ctx.id("ash_fields")?],
	})
	.register(ctx, "industrial")?;
	Ok(())
}
