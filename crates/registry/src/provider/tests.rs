use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{Declarations, ProviderCell, ProviderRun, ProviderTable, RegistrationProvider, provider_fn};
use crate::core::{ProviderId, RegistryError};
use crate::registrar::Registrar;
use crate::test_fixtures::{Block, Item, ctx, descriptor, item, registries};

struct Tools {
	evaluations: Arc<AtomicUsize>,
}

impl RegistrationProvider for Tools {
	type Entry = Item;

	fn declare(&self, decl: &mut Declarations<'_, Item>) -> Result<(), RegistryError> {
		self.evaluations.fetch_add(1, Ordering::SeqCst);
		decl.entry("pickaxe", item(1))?;
		decl.register("shovel", Registrar::of(|| item(1)))?;
		Ok(())
	}
}

/// Declarations are evaluated on the first initialization only.
#[test]
fn provider_is_evaluated_once() {
	let set = registries();
	let alpha = descriptor("alpha");
	let evaluations = Arc::new(AtomicUsize::new(0));
	let cell = ProviderCell::new(
		ProviderId::new("tools").unwrap(),
		Tools {
			evaluations: Arc::clone(&evaluations),
		},
	);

	assert_eq!(
		cell.initialize(ctx(&set, &alpha)).unwrap(),
		ProviderRun::Ran { registered: 2 }
	);
	assert_eq!(
		cell.initialize(ctx(&set, &alpha)).unwrap(),
		ProviderRun::AlreadyInitialized
	);
	assert_eq!(evaluations.load(Ordering::SeqCst), 1);
	assert_eq!(set.registry::<Item>().unwrap().len(), 2);
	assert_eq!(cell.kind(), "item");
	assert!(cell.is_initialized());
}

/// Declarations can require entries of another kind through the context.
#[test]
fn declarations_can_read_other_kinds() {
	let set = registries();
	let alpha = descriptor("alpha");
	let blocks = ProviderCell::new(
		ProviderId::new("blocks").unwrap(),
		provider_fn::<Block, _>(|decl| {
			decl.entry("stone", Block { hardness: 1.5 })?;
			Ok(())
		}),
	);
	let items = ProviderCell::new(
		ProviderId::new("items").unwrap(),
		provider_fn::<Item, _>(|decl| {
			let stone = decl.ctx().id("stone")?;
			decl.ctx().require::<Block>(&stone)?;
			decl.entry("stone", item(64))?;
			Ok(())
		}),
	);

	blocks.initialize(ctx(&set, &alpha)).unwrap();
	items.initialize(ctx(&set, &alpha)).unwrap();
	assert_eq!(set.registry::<Item>().unwrap().len(), 1);
	assert_eq!(set.registry::<Block>().unwrap().len(), 1);
}

/// Registry errors raised by declarations are returned as they are.
#[test]
fn registry_errors_pass_through_unchanged() {
	let set = registries();
	let alpha = descriptor("alpha");
	let cell = ProviderCell::new(
		ProviderId::new("dupes").unwrap(),
		provider_fn::<Item, _>(|decl| {
			decl.entry("sword", item(1))?;
			decl.entry("sword", item(1))?;
			Ok(())
		}),
	);

	let err = cell.initialize(ctx(&set, &alpha)).unwrap_err();
	assert!(matches!(err, RegistryError::DuplicateRegistration { .. }));
	assert_eq!(err.resource_id().map(ToString::to_string).as_deref(), Some("alpha:sword"));
}

/// Foreign errors and panics are wrapped as `ProviderInitialization`.
#[test]
fn foreign_errors_and_panics_become_initialization_errors() {
	let set = registries();
	let alpha = descriptor("alpha");

	let failing = ProviderCell::new(
		ProviderId::new("failing").unwrap(),
		provider_fn::<Item, _>(|_| Err(RegistryError::declaration("texture atlas missing"))),
	);
	match failing.initialize(ctx(&set, &alpha)).unwrap_err() {
		RegistryError::ProviderInitialization { provider, source } => {
			assert_eq!(provider.as_str(), "failing");
			assert_eq!(source.to_string(), "texture atlas missing");
		}
		other => panic!("expected ProviderInitialization, got {other:?}"),
	}

	let panicking = ProviderCell::new(
		ProviderId::new("panicking").unwrap(),
		provider_fn::<Item, _>(|_| panic!("bad static initializer")),
	);
	match panicking.initialize(ctx(&set, &alpha)).unwrap_err() {
		RegistryError::ProviderInitialization { provider, source } => {
			assert_eq!(provider.as_str(), "panicking");
			assert!(source.to_string().contains("bad static initializer"));
		}
		other => panic!("expected ProviderInitialization, got {other:?}"),
	}
}

/// A provider table rejects reused and invalid ids.
#[test]
fn table_rejects_reused_ids() {
	let mut table = ProviderTable::new();
	table
		.insert("items", provider_fn::<Item, _>(|_| Ok(())))
		.unwrap();
	let err = table
		.insert("items", provider_fn::<Item, _>(|_| Ok(())))
		.unwrap_err();
	assert!(matches!(err, RegistryError::InvalidProviderId { .. }));
	assert!(matches!(
		table.insert("Items", provider_fn::<Item, _>(|_| Ok(()))),
		Err(RegistryError::InvalidProviderId { .. })
	));
	assert_eq!(table.len(), 1);
}
