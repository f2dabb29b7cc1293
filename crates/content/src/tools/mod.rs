//! Tool factories.
//!
//! A tool is an ordinary [`Item`] carrying [`ToolStats`]. The stats come from
//! a [`ToolMaterial`] and a [`ToolKind`]; what the tool can do is an
//! [`ItemCapabilities`] set, checked against a block with [`can_mine`].


use crate::kinds::{Block, Item};

bitflags::bitflags! {
	/// What an item can be used for.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct ItemCapabilities: u32 {
		/// Harvests stone and ores.
		const MINE_STONE = 1 << 0;
		/// Harvests logs and planks.
		const MINE_WOOD = 1 << 1;
		/// Harvests soil and sand.
		const DIG = 1 << 2;
		/// Deals melee damage.
		const ATTACK = 1 << 3;
		/// Turns soil into farmland.
		const TILL = 1 << 4;
		/// Dispensers use the item on the block in front of them.
		const DISPENSABLE = 1 << 5;
		/// Survives fire and lava.
		const FIRE_RESISTANT = 1 << 6;
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
	Pickaxe,
	Axe,
	Shovel,
	Hoe,
	Sword,
}

impl ToolKind {
	pub const ALL: [ToolKind; 5] = [Self::Pickaxe, Self::Axe, Self::Shovel, Self::Hoe, Self::Sword];

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Pickaxe => "pickaxe",
			Self::Axe => "axe",
			Self::Shovel => "shovel",
			Self::Hoe => "hoe",
			Self::Sword => "sword",
		}
	}

	pub const fn capabilities(self) -> ItemCapabilities {
		match self {
			Self::Pickaxe => ItemCapabilities::MINE_STONE,
			Self::Axe => ItemCapabilities::MINE_WOOD.union(ItemCapabilities::ATTACK),
			Self::Shovel => ItemCapabilities::DIG.union(ItemCapabilities::DISPENSABLE),
			Self::Hoe => ItemCapabilities::TILL.union(ItemCapabilities::DISPENSABLE),
			Self::Sword => ItemCapabilities::ATTACK,
		}
	}

	const fn base_damage(self) -> f32 {
		match self {
			Self::Pickaxe => 1.0,
			Self::Axe => 6.0,
			Self::Shovel => 1.5,
			Self::Hoe => 0.0,
			Self::Sword => 3.0,
		}
	}

	const fn attack_speed(self) -> f32 {
		match self {
			Self::Pickaxe => -2.8,
			Self::Axe | Self::Shovel => -3.0,
			Self::Hoe => -1.0,
			Self::Sword => -2.4,
		}
	}
}

/// Material a family of tools is made of.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolMaterial {
	pub tier: u8,
	pub durability: u32,
	pub mining_speed: f32,
	pub attack_bonus: f32,
	pub enchantability: u8,
	pub fire_resistant: bool,
}

impl ToolMaterial {
	pub const WOOD: Self = Self {
		tier: 0,
		durability: 59,
		mining_speed: 2.0,
		attack_bonus: 0.0,
		enchantability: 15,
		fire_resistant: false,
	};

	pub const STONE: Self = Self {
		tier: 1,
		durability: 131,
		mining_speed: 4.0,
		attack_bonus: 1.0,
		enchantability: 5,
		fire_resistant: false,
	};

	pub const IRON: Self = Self {
		tier: 2,
		durability: 250,
		mining_speed: 6.0,
		attack_bonus: 2.0,
		enchantability: 14,
		fire_resistant: false,
	};
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolStats {
	pub kind: ToolKind,
	pub tier: u8,
	pub durability: u32,
	pub mining_speed: f32,
	pub attack_damage: f32,
	pub attack_speed: f32,
	pub enchantability: u8,
}

pub fn tool_stats(material: &ToolMaterial, kind: ToolKind) -> ToolStats {
	let mining_speed = match kind {
		ToolKind::Sword => 1.0,
		_ => material.mining_speed,
	};
	ToolStats {
		kind,
		tier: material.tier,
		durability: material.durability,
		mining_speed,
		attack_damage: kind.base_damage() + material.attack_bonus,
		attack_speed: kind.attack_speed(),
		enchantability: material.enchantability,
	}
}

/// Builds a single-stack tool item of `kind` made from `material`.
pub fn tool(material: &ToolMaterial, kind: ToolKind) -> Item {
	let mut capabilities = kind.capabilities();
	capabilities.set(ItemCapabilities::FIRE_RESISTANT, material.fire_resistant);
	Item {
		max_stack: 1,
		capabilities,
		tool: Some(tool_stats(material, kind)),
	}
}

/// Whether `item` harvests `block`.
pub fn can_mine(item: &Item, block: &Block) -> bool {
	if block.requires.is_empty() {
		return true;
	}
	let tier = item.tool.map_or(0, |stats| stats.tier);
	item.capabilities.contains(block.requires) && tier >= block.min_tier
}
