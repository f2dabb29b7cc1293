use kiln_registry::{
	BootstrapConfig, BootstrapError, BootstrapState, Environment, Phase, RegistryError, ResourceId, Stage,
};
use pretty_assertions::assert_eq;

use super::{UnitError, ironworks, load};
use crate::kinds::{Biome, Block, DispenserBehavior, EntityType, Item, ItemTag, WorldPreset};
use crate::tools::can_mine;

fn id(s: &str) -> ResourceId {
	s.parse().unwrap()
}

/// Both reference units load, freeze, and produce a world-gen generation.
#[test]
fn reference_content_loads_end_to_end() {
	let loaded = load(BootstrapConfig::default()).unwrap();
	let boot = &loaded.bootstrap;
	assert_eq!(boot.state(), BootstrapState::Complete);

	let registries = boot.registries();
	assert_eq!(registries.registry::<Item>().unwrap().len(), 14);
	assert_eq!(registries.registry::<Block>().unwrap().len(), 5);
	assert_eq!(registries.registry::<EntityType>().unwrap().len(), 2);
	assert!(registries.is_frozen());

	let woodland = boot.report().for_unit(boot.descriptor("woodland").unwrap().namespace());
	assert_eq!(woodland.map(|run| run.registered).sum::<usize>(), 14);
	assert_eq!(boot.report().total(), 27);
	let companions: usize = boot.report().runs.iter().map(|run| run.companions).sum();
	assert_eq!(companions, 2);

	let preset = loaded
		.worldgen
		.registry::<WorldPreset>()
		.unwrap()
		.get(&id("ironworks:industrial"))
		.unwrap();
	assert_eq!(preset.generator, id("ironworks:ash_plains"));
	assert_eq!(preset.biomes, vec![id("ironworks:ash_fields")]);

	let biome = loaded
		.worldgen
		.registry::<Biome>()
		.unwrap()
		.get(&id("ironworks:ash_fields"))
		.unwrap();
	assert_eq!(biome.decorators, vec![id("woodland:hanging_leaves")]);
	assert!(loaded.worldgen.is_frozen());
}

/// Ironworks tags resolve members declared by woodland.
#[test]
fn tags_span_both_units() {
	let loaded = load(BootstrapConfig::default()).unwrap();
	let tags = loaded.bootstrap.registries().registry::<ItemTag>().unwrap();

	let pickaxes = tags.get(&id("ironworks:pickaxes")).unwrap();
	assert_eq!(
		pickaxes.members,
		vec![id("woodland:wooden_pickaxe"), id("ironworks:iron_pickaxe")]
	);
	assert!(tags.get(&id("ironworks:tool_handles")).unwrap().contains(&id("woodland:stick")));
}

/// Only dispensable iron tools register a dispenser behavior, in declaration order.
#[test]
fn dispensable_tools_get_companion_behaviors() {
	let loaded = load(BootstrapConfig::default()).unwrap();
	let behaviors = loaded.bootstrap.registries().registry::<DispenserBehavior>().unwrap();

	let entries = behaviors.all();
	let ids: Vec<String> = entries.ids().map(ToString::to_string).collect();
	assert_eq!(
		ids,
		vec!["ironworks:iron_shovel_dispense", "ironworks:iron_hoe_dispense"]
	);
	let shovel = behaviors.get(&id("ironworks:iron_shovel_dispense")).unwrap();
	assert_eq!(shovel.item, id("ironworks:iron_shovel"));
}

/// Tier and capability checks hold for tools and blocks read back from the registries.
#[test]
fn registered_tools_harvest_registered_blocks() {
	let loaded = load(BootstrapConfig::default()).unwrap();
	let registries = loaded.bootstrap.registries();
	let items = registries.registry::<Item>().unwrap();
	let blocks = registries.registry::<Block>().unwrap();

	let ore = blocks.get(&id("ironworks:iron_ore")).unwrap();
	let log = blocks.get(&id("woodland:oak_log")).unwrap();
	assert!(!can_mine(&items.get(&id("woodland:wooden_pickaxe")).unwrap(), &ore));
	assert!(can_mine(&items.get(&id("ironworks:iron_pickaxe")).unwrap(), &ore));
	assert!(can_mine(&items.get(&id("woodland:wooden_axe")).unwrap(), &log));
}

/// A client bootstrap skips server generators, so world-gen fails on the missing codec.
#[test]
fn client_environment_has_no_generators_for_worldgen() {
	let err = load(BootstrapConfig::default().with_environment(Environment::Client)).unwrap_err();
	match err {
		UnitError::Bootstrap(BootstrapError::Unit { unit, stage, source }) => {
			assert_eq!(unit.as_str(), "ironworks");
			assert_eq!(stage, Stage::Worldgen);
			assert!(matches!(
				source,
				RegistryError::UnresolvedReference {
					registry: "chunk_generator",
					..
				}
			));
		}
		other => panic!("expected a world-gen failure, got {other:?}"),
	}
}

/// A configured order that puts ironworks first is rejected during discovery.
#[test]
fn load_order_must_respect_dependencies() {
	let config = BootstrapConfig::from_toml_str(
		r#"
		environment = "server"
		load_order = ["ironworks", "woodland"]
		"#,
	)
	.unwrap();
	let err = load(config).unwrap_err();
	assert!(matches!(
		err,
		UnitError::Bootstrap(BootstrapError::Unit {
			stage: Stage::Discovery,
			source: RegistryError::DependencyOrder { .. },
			..
		})
	));
}

/// The ironworks descriptor is read from its bundled TOML manifest.
#[test]
fn ironworks_descriptor_comes_from_its_manifest() {
	let pack = ironworks::unit().unwrap();
	let descriptor = kiln_registry::ContentUnit::descriptor(&pack);
	assert_eq!(descriptor.name(), "Ironworks");
	assert_eq!(descriptor.depends()[0].as_str(), "woodland");
	let server: Vec<&str> = descriptor
		.providers_in(Phase::Server)
		.map(|decl| decl.id.as_str())
		.collect();
	assert_eq!(server, vec!["generators"]);
	assert_eq!(pack.provider_table().len(), 4);
}
