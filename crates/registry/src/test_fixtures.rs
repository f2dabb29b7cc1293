#![allow(dead_code)]

use crate::bootstrap::{Phase, Stage};
use crate::content::ContentDescriptor;
use crate::core::{RegisterCtx, RegistrySet};

#[derive(Debug, PartialEq)]
pub(crate) struct Item {
	pub max_stack: u8,
}

#[derive(Debug, PartialEq)]
pub(crate) struct Block {
	pub hardness: f32,
}

/// Companion kind registered from item hooks.
#[derive(Debug, PartialEq)]
pub(crate) struct Dispense {
	pub item: String,
}

crate::registry_kind!(Item => "item", Block => "block", Dispense => "dispense");

pub(crate) fn item(max_stack: u8) -> Item {
	Item { max_stack }
}

pub(crate) fn registries() -> RegistrySet {
	RegistrySet::builder("static")
		.kind::<Item>()
		.kind::<Block>()
		.kind::<Dispense>()
		.build()
}

pub(crate) fn descriptor(namespace: &str) -> ContentDescriptor {
	ContentDescriptor::builder(namespace)
		.build()
		.expect("fixture namespace is valid")
}

pub(crate) fn ctx<'a>(set: &'a RegistrySet, unit: &'a ContentDescriptor) -> RegisterCtx<'a> {
	RegisterCtx::new(set, unit, Stage::Phase(Phase::Common))
}

/// Installs a test subscriber so log output shows up with `--nocapture`.
pub(crate) fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_max_level(tracing::Level::DEBUG)
		.try_init();
}
