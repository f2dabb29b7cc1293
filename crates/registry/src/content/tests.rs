use pretty_assertions::assert_eq;

use super::{ContentDescriptor, ContentManifest, ContentRoster};
use crate::bootstrap::Phase;
use crate::core::RegistryError;

/// The builder validates the namespace and defaults the name to it.
#[test]
fn builder_validates_namespace_and_defaults_name() {
	let descriptor = ContentDescriptor::builder("woodland")
		.version("1.2.0")
		.provider("items", Phase::Common)
		.provider("leaf-tints", Phase::Client)
		.build()
		.unwrap();

	assert_eq!(descriptor.name(), "woodland");
	assert_eq!(descriptor.version(), "1.2.0");
	let client: Vec<&str> = descriptor
		.providers_in(Phase::Client)
		.map(|decl| decl.id.as_str())
		.collect();
	assert_eq!(client, vec!["leaf-tints"]);

	assert!(matches!(
		ContentDescriptor::builder("Woodland").build(),
		Err(RegistryError::InvalidNamespace { .. })
	));
	assert!(matches!(
		ContentDescriptor::builder("").build(),
		Err(RegistryError::InvalidNamespace { .. })
	));
}

/// A manifest naming the same provider twice fails with `DuplicateProvider`.
#[test]
fn manifest_listing_a_provider_twice_is_rejected() {
	let err = ContentDescriptor::builder("woodland")
		.provider("items", Phase::Common)
		.provider("items", Phase::Server)
		.build()
		.unwrap_err();
	match err {
		RegistryError::DuplicateProvider { namespace, provider } => {
			assert_eq!(namespace.as_str(), "woodland");
			assert_eq!(provider.as_str(), "items");
		}
		other => panic!("expected DuplicateProvider, got {other:?}"),
	}
}

/// The roster binds a namespace once.
#[test]
fn roster_binds_each_namespace_once() {
	let mut roster = ContentRoster::new();
	let first = ContentDescriptor::builder("alpha").name("Alpha").build().unwrap();
	let second = ContentDescriptor::builder("alpha").name("Alpha Again").build().unwrap();

	roster.bind(&first).unwrap();
	let err = roster.bind(&second).unwrap_err();
	assert!(matches!(err, RegistryError::DuplicateNamespace(ref ns) if ns.as_str() == "alpha"));
	assert_eq!(roster.namespaces().count(), 1);
}

/// A TOML manifest converts to a descriptor and renders back to the same one.
#[test]
fn manifest_parses_into_descriptor() {
	let manifest = ContentManifest::from_toml_str(
		r#"
		[unit]
		namespace = "ironworks"
		name = "Ironworks"
		version = "0.3.1"
		authors = ["smith"]
		depends = ["woodland"]

		[[providers]]
		id = "items"

		[[providers]]
		id = "furnace-screens"
		phase = "client"
		"#,
	)
	.unwrap();

	let descriptor = manifest.clone().into_descriptor().unwrap();
	assert_eq!(descriptor.namespace().as_str(), "ironworks");
	assert_eq!(descriptor.name(), "Ironworks");
	assert_eq!(descriptor.authors(), ["smith".to_owned()]);
	assert_eq!(descriptor.depends()[0].as_str(), "woodland");
	assert_eq!(descriptor.providers()[0].phase, Phase::Common);
	assert_eq!(descriptor.providers()[1].phase, Phase::Client);

	let rendered = ContentManifest::from(&descriptor).to_toml_string().unwrap();
	let reparsed = ContentManifest::from_toml_str(&rendered).unwrap();
	assert_eq!(reparsed.into_descriptor().unwrap(), descriptor);
}

/// Provider ids in a manifest are validated on conversion.
#[test]
fn manifest_with_invalid_provider_id_fails_validation() {
	let manifest = ContentManifest::from_toml_str(
		r#"
		[unit]
		namespace = "ironworks"

		[[providers]]
		id = "Items"
		"#,
	)
	.unwrap();
	assert!(matches!(
		manifest.into_descriptor(),
		Err(RegistryError::InvalidProviderId { .. })
	));
}
