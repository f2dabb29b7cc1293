use std::fmt;

use serde::{Deserialize, Serialize};

/// Load phase a provider runs in. Phases run in declaration order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
	/// Content shared by every environment.
	#[default]
	Common,
	/// Content that only exists on a rendering client.
	Client,
	/// Content that only exists on a dedicated server.
	Server,
}

impl Phase {
	pub const ALL: [Phase; 3] = [Phase::Common, Phase::Client, Phase::Server];

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Common => "common",
			Self::Client => "client",
			Self::Server => "server",
		}
	}
}

impl fmt::Display for Phase {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Where in the bootstrap a piece of work happens; carried by every error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
	/// Namespace binding, load ordering and manifest resolution.
	Discovery,
	/// The per-unit `main` entry point.
	Entry,
	/// Provider initialization within one load phase.
	Phase(Phase),
	/// World-gen bootstrap functions filling a dynamic generation.
	Worldgen,
}

impl fmt::Display for Stage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Discovery => f.write_str("discovery"),
			Self::Entry => f.write_str("entry"),
			Self::Phase(phase) => write!(f, "{phase}"),
			Self::Worldgen => f.write_str("worldgen"),
		}
	}
}
