//! TOML form of a content descriptor.
//!
//! ```toml
//! [unit]
//! namespace = "woodland"
//! name = "Woodland"
//! version = "1.2.0"
//! depends = ["base"]
//!
//! [[providers]]
//! id = "items"
//!
//! [[providers]]
//! id = "block-colors"
//! phase = "client"
//! ```

use serde::{Deserialize, Serialize};

use super::{ContentDescriptor, DescriptorBuilder};
use crate::bootstrap::{ConfigError, Phase};
use crate::core::RegistryError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentManifest {
	pub unit: UnitSection,
	#[serde(default)]
	pub providers: Vec<ProviderEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitSection {
	pub namespace: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(default = "default_version")]
	pub version: String,
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub description: String,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub authors: Vec<String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub depends: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderEntry {
	pub id: String,
	#[serde(default)]
	pub phase: Phase,
}

fn default_version() -> String {
	"0.0.0".to_owned()
}

impl ContentManifest {
	pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
		toml::from_str(source).map_err(|source| ConfigError::Parse {
			what: "content manifest",
			source,
		})
	}

	pub fn to_toml_string(&self) -> Result<String, ConfigError> {
		toml::to_string(self).map_err(|source| ConfigError::Serialize {
			what: "content manifest",
			source,
		})
	}

	/// Validates the manifest into a descriptor.
	pub fn into_descriptor(self) -> Result<ContentDescriptor, RegistryError> {
		let unit = self.unit;
		let mut builder: DescriptorBuilder = ContentDescriptor::builder(&unit.namespace)
			.version(unit.version)
			.description(unit.description);
		if let Some(name) = unit.name {
			builder = builder.name(name);
		}
		for author in unit.authors {
			builder = builder.author(author);
		}
		for dep in unit.depends {
			builder = builder.depends_on(dep);
		}
		for provider in self.providers {
			builder = builder.provider(provider.id, provider.phase);
		}
		builder.build()
	}
}

impl From<&ContentDescriptor> for ContentManifest {
	fn from(descriptor: &ContentDescriptor) -> Self {
		Self {
			unit: UnitSection {
				namespace: descriptor.namespace().to_string(),
				name: Some(descriptor.name().to_owned()),
				version: descriptor.version().to_owned(),
				description: descriptor.description().to_owned(),
				authors: descriptor.authors().to_vec(),
				depends: descriptor.depends().iter().map(ToString::to_string).collect(),
			},
			providers: descriptor
				.providers()
				.iter()
				.map(|decl| ProviderEntry {
					id: decl.id.to_string(),
					phase: decl.phase,
				})
				.collect(),
		}
	}
}
