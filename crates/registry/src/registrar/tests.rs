use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use pretty_assertions::assert_eq;

use super::Registrar;
use crate::core::RegistryError;
use crate::test_fixtures::{Dispense, Item, ctx, descriptor, item, registries};

/// Registering composes `namespace:local_id` and returns the stored instance.
#[test]
fn register_composes_namespace_and_returns_stored_instance() {
	let set = registries();
	let alpha = descriptor("alpha");
	let ctx = ctx(&set, &alpha);

	let sword = Registrar::of(|| item(1)).register(&ctx, "sword").unwrap();

	let found = set
		.registry::<Item>()
		.unwrap()
		.get(&"alpha:sword".parse().unwrap())
		.expect("alpha:sword should resolve");
	assert!(Arc::ptr_eq(&sword, &found));
}

/// A spent registrar reports reuse and inserts nothing.
#[test]
fn second_register_call_fails_without_reinserting() {
	let set = registries();
	let alpha = descriptor("alpha");
	let ctx = ctx(&set, &alpha);

	let mut registrar = Registrar::of(|| item(1));
	registrar.register(&ctx, "sword").unwrap();
	let err = registrar.register(&ctx, "sword_two").unwrap_err();

	match err {
		RegistryError::RegistrarReuse { id } => assert_eq!(id.to_string(), "alpha:sword"),
		other => panic!("expected RegistrarReuse, got {other:?}"),
	}
	assert_eq!(set.registry::<Item>().unwrap().len(), 1);
	assert_eq!(registrar.spent_on().map(ToString::to_string), Some("alpha:sword".to_owned()));
}

/// An invalid local id fails before the factory runs and leaves the registrar pending.
#[test]
fn invalid_id_is_rejected_before_the_factory_runs() {
	let set = registries();
	let alpha = descriptor("alpha");
	let ctx = ctx(&set, &alpha);
	let built = Rc::new(Cell::new(false));

	let flag = Rc::clone(&built);
	let mut registrar = Registrar::of(move || {
		flag.set(true);
		item(1)
	});
	let err = registrar.register(&ctx, "Sword").unwrap_err();

	assert!(matches!(err, RegistryError::InvalidId { ref id, .. } if id == "Sword"));
	assert!(!built.get(), "factory must not run for an invalid id");
	assert!(registrar.spent_on().is_none());
	assert!(set.registry::<Item>().unwrap().is_empty());
}

/// Configure steps run before insertion; hooks run afterwards in attach order.
#[test]
fn configure_runs_before_insertion_and_hooks_after_in_order() {
	let set = registries();
	let alpha = descriptor("alpha");
	let ctx = ctx(&set, &alpha);
	let order = Rc::new(std::cell::RefCell::new(Vec::new()));

	let (o1, o2, o3) = (Rc::clone(&order), Rc::clone(&order), Rc::clone(&order));
	let stored = Registrar::of(|| item(1))
		.configure(move |item| {
			o1.borrow_mut().push("configure");
			item.max_stack = 16;
		})
		.and_then(move |ctx, item| {
			o2.borrow_mut().push("first hook");
			let id = ctx.registry::<Item>()?.id_of(item).expect("inserted before hooks");
			assert_eq!(id.to_string(), "alpha:pearl");
			Ok(())
		})
		.and_then(move |_, _| {
			o3.borrow_mut().push("second hook");
			Ok(())
		})
		.register(&ctx, "pearl")
		.unwrap();

	assert_eq!(stored.max_stack, 16);
	assert_eq!(*order.borrow(), vec!["configure", "first hook", "second hook"]);
}

/// A hook can register a companion object of another kind.
#[test]
fn hook_can_register_a_companion_object() {
	let set = registries();
	let alpha = descriptor("alpha");
	let ctx = ctx(&set, &alpha);

	Registrar::of(|| item(1))
		.and_then(|ctx, _| {
			Registrar::new(Dispense {
				item: "alpha:flint".to_owned(),
			})
			.register(ctx, "flint_dispense")
			.map(drop)
		})
		.register(&ctx, "flint")
		.unwrap();

	let dispense = set
		.registry::<Dispense>()
		.unwrap()
		.get(&"alpha:flint_dispense".parse().unwrap())
		.unwrap();
	assert_eq!(dispense.item, "alpha:flint");
}

/// A duplicate key spends the registrar and keeps the first entry.
#[test]
fn duplicate_registration_spends_the_registrar() {
	let set = registries();
	let alpha = descriptor("alpha");
	let ctx = ctx(&set, &alpha);

	Registrar::new(item(1)).register(&ctx, "sword").unwrap();
	let mut again = Registrar::new(item(64));
	let err = again.register(&ctx, "sword").unwrap_err();

	assert!(matches!(err, RegistryError::DuplicateRegistration { registry: "item", .. }));
	assert!(matches!(
		again.register(&ctx, "sword"),
		Err(RegistryError::RegistrarReuse { .. })
	));
	assert_eq!(
		set.registry::<Item>()
			.unwrap()
			.get(&"alpha:sword".parse().unwrap())
			.unwrap()
			.max_stack,
		1
	);
}
