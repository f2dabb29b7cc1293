//! Single-use builder that finalizes one object and inserts it.
//!
//! Building is separated from registering: the factory and every
//! [`configure`](Registrar::configure) step run before the object is inserted,
//! so no other unit ever observes a partially configured object.
//!
//! # Lifecycle
//!
//! ```text
//! of(factory) -> configure* -> and_then* -> register(ctx, local_id) -> spent
//! ```
//!
//! The id is validated before the factory runs; an invalid id leaves the
//! registrar pending. Every other outcome of `register` spends it.

#[cfg(test)]
mod tests;

use std::fmt;
use std::sync::Arc;

use crate::core::{RegisterCtx, RegistryError, RegistryKind, ResourceId};

type Factory<T> = Box<dyn FnOnce() -> T>;
type Configure<T> = Box<dyn FnOnce(&mut T)>;
type Hook<T> = Box<dyn FnOnce(&RegisterCtx<'_>, &Arc<T>) -> Result<(), RegistryError>>;

struct Pending<T> {
	factory: Factory<T>,
	configure: Vec<Configure<T>>,
	hooks: Vec<Hook<T>>,
}

enum State<T> {
	Pending(Pending<T>),
	Spent(ResourceId),
}

/// In-flight registration of one object of kind `T`.
pub struct Registrar<T: RegistryKind> {
	state: State<T>,
}

impl<T: RegistryKind> Registrar<T> {
	/// Wraps a lazily constructed object. `factory` runs at most once, inside
	/// [`register`](Self::register).
	pub fn of(factory: impl FnOnce() -> T + 'static) -> Self {
		Self {
			state: State::Pending(Pending {
				factory: Box::new(factory),
				configure: Vec::new(),
				hooks: Vec::new(),
			}),
		}
	}

	/// Wraps an already constructed object.
	pub fn new(value: T) -> Self {
		Self::of(move || value)
	}

	/// Adjusts the built object before it becomes visible in the registry.
	pub fn configure(mut self, f: impl FnOnce(&mut T) + 'static) -> Self {
		if let State::Pending(pending) = &mut self.state {
			pending.configure.push(Box::new(f));
		}
		self
	}

	/// Attaches a post-registration hook.
	///
	/// Hooks run in attach order, after the object is inserted and before
	/// `register` returns. They may register companion objects through the
	/// context.
	pub fn and_then(
		mut self,
		hook: impl FnOnce(&RegisterCtx<'_>, &Arc<T>) -> Result<(), RegistryError> + 'static,
	) -> Self {
		if let State::Pending(pending) = &mut self.state {
			pending.hooks.push(Box::new(hook));
		}
		self
	}

	/// Builds the object and inserts it as `namespace:local_id`.
	///
	/// Returns the instance now owned by the registry.
	pub fn register(&mut self, ctx: &RegisterCtx<'_>, local_id: &str) -> Result<Arc<T>, RegistryError> {
		if let State::Spent(id) = &self.state {
			return Err(RegistryError::RegistrarReuse { id: id.clone() });
		}
		let id = ctx.id(local_id)?;
		let registry = ctx.target::<T>()?;

		let pending = match std::mem::replace(&mut self.state, State::Spent(id.clone())) {
			State::Pending(pending) => pending,
			State::Spent(id) => return Err(RegistryError::RegistrarReuse { id }),
		};

		let mut value = (pending.factory)();
		for configure in pending.configure {
			configure(&mut value);
		}

		let value = registry.insert(id, value)?;
		for hook in pending.hooks {
			hook(ctx, &value)?;
		}
		Ok(value)
	}

	/// Returns the id this registrar was spent on, if any.
	pub fn spent_on(&self) -> Option<&ResourceId> {
		match &self.state {
			State::Pending(_) => None,
			State::Spent(id) => Some(id),
		}
	}
}

impl<T: RegistryKind> fmt::Debug for Registrar<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut s = f.debug_struct("Registrar");
		s.field("kind", &T::LABEL);
		match &self.state {
			State::Pending(pending) => s
				.field("configure", &pending.configure.len())
				.field("hooks", &pending.hooks.len()),
			State::Spent(id) => s.field("spent_on", id),
		};
		s.finish()
	}
}
