//! Registration providers: typed declarations of one kind of object.
//!
//! A provider implements [`RegistrationProvider`] for exactly one element kind.
//! Content units wrap their providers in [`ProviderCell`]s, keyed by
//! [`ProviderId`] in a [`ProviderTable`], and list the ids they want run in
//! their manifest. The cell guarantees the declarations are evaluated once.

#[cfg(test)]
mod tests;

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::core::{ProviderId, RegisterCtx, RegistryError, RegistryKind};
use crate::registrar::Registrar;

/// Declares every object of one kind for one content unit.
pub trait RegistrationProvider: Send + Sync + 'static {
	/// The element kind every declaration produces.
	type Entry: RegistryKind;

	fn declare(&self, decl: &mut Declarations<'_, Self::Entry>) -> Result<(), RegistryError>;
}

/// Typed registration surface handed to [`RegistrationProvider::declare`].
pub struct Declarations<'a, T> {
	ctx: RegisterCtx<'a>,
	registered: usize,
	_kind: PhantomData<fn() -> T>,
}

impl<'a, T: RegistryKind> Declarations<'a, T> {
	pub fn new(ctx: RegisterCtx<'a>) -> Self {
		Self {
			ctx,
			registered: 0,
			_kind: PhantomData,
		}
	}

	/// The context, for cross-kind lookups and companion registrations.
	pub fn ctx(&self) -> &RegisterCtx<'a> {
		&self.ctx
	}

	/// Registers the object built by `registrar` as `namespace:local_id`.
	pub fn register(
		&mut self,
		local_id: &str,
		mut registrar: Registrar<T>,
	) -> Result<Arc<T>, RegistryError> {
		let value = registrar.register(&self.ctx, local_id)?;
		self.registered += 1;
		Ok(value)
	}

	/// Registers a plain value with no hooks.
	pub fn entry(&mut self, local_id: &str, value: T) -> Result<Arc<T>, RegistryError> {
		self.register(local_id, Registrar::new(value))
	}

	/// Number of objects declared so far.
	pub fn registered(&self) -> usize {
		self.registered
	}
}

/// Builds a provider from a closure.
pub fn provider_fn<T, F>(f: F) -> FnProvider<T, F>
where
	T: RegistryKind,
	F: Fn(&mut Declarations<'_, T>) -> Result<(), RegistryError> + Send + Sync + 'static,
{
	FnProvider {
		f,
		_kind: PhantomData,
	}
}

/// Provider backed by a closure; see [`provider_fn`].
pub struct FnProvider<T, F> {
	f: F,
	_kind: PhantomData<fn() -> T>,
}

impl<T, F> RegistrationProvider for FnProvider<T, F>
where
	T: RegistryKind,
	F: Fn(&mut Declarations<'_, T>) -> Result<(), RegistryError> + Send + Sync + 'static,
{
	type Entry = T;

	fn declare(&self, decl: &mut Declarations<'_, T>) -> Result<(), RegistryError> {
		(self.f)(decl)
	}
}

trait ErasedProvider: Send + Sync {
	fn kind(&self) -> &'static str;
	fn run(&self, ctx: RegisterCtx<'_>) -> Result<usize, RegistryError>;
}

impl<P: RegistrationProvider> ErasedProvider for P {
	fn kind(&self) -> &'static str {
		<P::Entry as RegistryKind>::LABEL
	}

	fn run(&self, ctx: RegisterCtx<'_>) -> Result<usize, RegistryError> {
		let mut decl = Declarations::<P::Entry>::new(ctx);
		self.declare(&mut decl)?;
		Ok(decl.registered())
	}
}

/// Outcome of [`ProviderCell::initialize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderRun {
	Ran { registered: usize },
	AlreadyInitialized,
}

/// A panic raised while a provider evaluated its declarations.
#[derive(Debug, thiserror::Error)]
#[error("panicked: {0}")]
pub struct ProviderPanic(String);

impl ProviderPanic {
	fn from_payload(payload: Box<dyn Any + Send>) -> Self {
		let message = match payload.downcast::<String>() {
			Ok(message) => *message,
			Err(payload) => match payload.downcast::<&'static str>() {
				Ok(message) => (*message).to_owned(),
				Err(_) => "non-string panic payload".to_owned(),
			},
		};
		Self(message)
	}
}

/// Provider instance plus its "already initialized" guard.
pub struct ProviderCell {
	id: ProviderId,
	provider: Box<dyn ErasedProvider>,
	initialized: AtomicBool,
}

impl ProviderCell {
	pub fn new(id: ProviderId, provider: impl RegistrationProvider) -> Self {
		Self {
			id,
			provider: Box::new(provider),
			initialized: AtomicBool::new(false),
		}
	}

	pub fn id(&self) -> &ProviderId {
		&self.id
	}

	/// Label of the registry this provider fills.
	pub fn kind(&self) -> &'static str {
		self.provider.kind()
	}

	pub fn is_initialized(&self) -> bool {
		self.initialized.load(Ordering::Acquire)
	}

	/// Evaluates the declarations on the first call; later calls do nothing.
	///
	/// Registry errors raised by declarations pass through unchanged. Foreign
	/// errors and panics become [`RegistryError::ProviderInitialization`].
	pub fn initialize(&self, ctx: RegisterCtx<'_>) -> Result<ProviderRun, RegistryError> {
		if self.initialized.swap(true, Ordering::AcqRel) {
			tracing::debug!(provider = %self.id, "provider already initialized");
			return Ok(ProviderRun::AlreadyInitialized);
		}

		let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.provider.run(ctx)));
		match outcome {
			Ok(Ok(registered)) => {
				tracing::debug!(
					provider = %self.id,
					kind = self.kind(),
					registered,
					"provider initialized"
				);
				Ok(ProviderRun::Ran { registered })
			}
			Ok(Err(RegistryError::Declaration(source))) => Err(RegistryError::ProviderInitialization {
				provider: self.id.clone(),
				source,
			}),
			Ok(Err(err)) => Err(err),
			Err(payload) => Err(RegistryError::ProviderInitialization {
				provider: self.id.clone(),
				source: Box::new(ProviderPanic::from_payload(payload)),
			}),
		}
	}
}

impl fmt::Debug for ProviderCell {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ProviderCell")
			.field("id", &self.id)
			.field("kind", &self.kind())
			.field("initialized", &self.is_initialized())
			.finish()
	}
}

/// A content unit's providers, keyed by id.
#[derive(Debug, Default)]
pub struct ProviderTable {
	cells: IndexMap<ProviderId, ProviderCell, FxBuildHasher>,
}

impl ProviderTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds `provider` under `id`. An id may only be used once per table.
	pub fn insert(&mut self, id: &str, provider: impl RegistrationProvider) -> Result<(), RegistryError> {
		let id = ProviderId::new(id)?;
		if self.cells.contains_key(&id) {
			return Err(RegistryError::InvalidProviderId {
				id: id.to_string(),
				reason: "already present in this provider table",
			});
		}
		self.cells.insert(id.clone(), ProviderCell::new(id, provider));
		Ok(())
	}

	pub fn get(&self, id: &ProviderId) -> Option<&ProviderCell> {
		self.cells.get(id)
	}

	pub fn ids(&self) -> impl Iterator<Item = &ProviderId> + '_ {
		self.cells.keys()
	}

	pub fn len(&self) -> usize {
		self.cells.len()
	}

	pub fn is_empty(&self) -> bool {
		self.cells.is_empty()
	}
}
