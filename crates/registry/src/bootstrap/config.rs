use serde::{Deserialize, Serialize};

use super::Phase;
use crate::core::Namespace;

/// Errors decoding or encoding TOML configuration and manifests.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("failed to parse {what}: {source}")]
	Parse {
		what: &'static str,
		#[source]
		source: toml::de::Error,
	},

	#[error("failed to serialize {what}: {source}")]
	Serialize {
		what: &'static str,
		#[source]
		source: toml::ser::Error,
	},
}

/// Which side of the game the bootstrap loads for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
	/// Rendering client connected to a remote server.
	Client,
	/// Dedicated server without a renderer.
	Server,
	/// Client with an embedded server; runs every phase.
	#[default]
	Integrated,
}

impl Environment {
	/// Phases run for this environment, in order.
	pub const fn phases(self) -> &'static [Phase] {
		match self {
			Self::Client => &[Phase::Common, Phase::Client],
			Self::Server => &[Phase::Common, Phase::Server],
			Self::Integrated => &Phase::ALL,
		}
	}
}

/// Orchestrator settings.
///
/// ```toml
/// environment = "server"
/// load_order = ["woodland", "ironworks"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BootstrapConfig {
	pub environment: Environment,
	/// Explicit unit order. When empty, units run in the order they were added;
	/// otherwise every added unit must appear here.
	pub load_order: Vec<Namespace>,
}

impl BootstrapConfig {
	pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
		toml::from_str(source).map_err(|source| ConfigError::Parse {
			what: "bootstrap config",
			source,
		})
	}

	pub fn with_environment(mut self, environment: Environment) -> Self {
		self.environment = environment;
		self
	}

	pub fn with_load_order(mut self, order: impl IntoIterator<Item = Namespace>) -> Self {
		self.load_order = order.into_iter().collect();
		self
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	/// Environment and load order parse from TOML.
	#[test]
	fn parses_environment_and_load_order() {
		let config = BootstrapConfig::from_toml_str(
			r#"
			environment = "server"
			load_order = ["woodland", "ironworks"]
			"#,
		)
		.unwrap();
		assert_eq!(config.environment, Environment::Server);
		assert_eq!(config.environment.phases(), &[Phase::Common, Phase::Server]);
		let order: Vec<&str> = config.load_order.iter().map(Namespace::as_str).collect();
		assert_eq!(order, vec!["woodland", "ironworks"]);
	}

	/// An empty config is the default and runs every phase.
	#[test]
	fn empty_config_runs_every_phase() {
		let config = BootstrapConfig::from_toml_str("").unwrap();
		assert_eq!(config, BootstrapConfig::default());
		assert_eq!(config.environment.phases(), &Phase::ALL);
	}

	/// An invalid namespace in the load order fails parsing.
	#[test]
	fn invalid_namespace_in_load_order_is_a_parse_error() {
		let err = BootstrapConfig::from_toml_str(r#"load_order = ["Woodland"]"#).unwrap_err();
		assert!(matches!(err, ConfigError::Parse { what: "bootstrap config", .. }));
	}
}
