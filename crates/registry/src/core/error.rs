use super::id::{Namespace, ProviderId, ResourceId};

/// Boxed foreign error carried through provider initialization failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while declaring, validating or inserting registry content.
///
/// None of these are retried. The bootstrap orchestrator wraps them with the
/// offending unit and stage before aborting.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
	#[error("invalid namespace {candidate:?}: {reason}")]
	InvalidNamespace {
		candidate: String,
		reason: &'static str,
	},

	#[error("namespace `{0}` is already bound to another content unit")]
	DuplicateNamespace(Namespace),

	#[error("invalid id {id:?} in namespace `{namespace}`: {reason}")]
	InvalidId {
		namespace: Namespace,
		id: String,
		reason: &'static str,
	},

	#[error("malformed resource id {0:?}: expected `namespace:path`")]
	MalformedId(String),

	#[error("invalid provider id {id:?}: {reason}")]
	InvalidProviderId { id: String, reason: &'static str },

	#[error("`{namespace}` lists provider `{provider}` more than once")]
	DuplicateProvider {
		namespace: Namespace,
		provider: ProviderId,
	},

	#[error("`{namespace}` lists provider `{provider}` but does not implement it")]
	UnknownProvider {
		namespace: Namespace,
		provider: ProviderId,
	},

	#[error("duplicate registration of `{id}` in registry `{registry}`")]
	DuplicateRegistration { registry: &'static str, id: ResourceId },

	#[error("instance registered as `{existing}` cannot also be registered as `{id}` in `{registry}`")]
	DuplicateInstance {
		registry: &'static str,
		id: ResourceId,
		existing: ResourceId,
	},

	#[error("registrar for `{id}` was already used")]
	RegistrarReuse { id: ResourceId },

	#[error("registry `{registry}` is frozen; cannot insert `{id}`")]
	RegistryFrozen { registry: &'static str, id: ResourceId },

	#[error("registry `{0}` is not part of this registry set")]
	UnknownKind(&'static str),

	#[error("`{id}` is not registered in `{registry}`")]
	UnresolvedReference { registry: &'static str, id: ResourceId },

	#[error("provider `{provider}` failed to initialize: {source}")]
	ProviderInitialization {
		provider: ProviderId,
		#[source]
		source: BoxError,
	},

	/// Foreign failure raised from inside a declaration; the provider cell
	/// rewraps it as [`RegistryError::ProviderInitialization`].
	#[error("declaration failed: {0}")]
	Declaration(#[source] BoxError),

	#[error("`{namespace}` depends on `{dependency}`, which is not loaded")]
	MissingDependency {
		namespace: Namespace,
		dependency: Namespace,
	},

	#[error("`{namespace}` depends on `{dependency}`, which is ordered after it")]
	DependencyOrder {
		namespace: Namespace,
		dependency: Namespace,
	},

	#[error("content unit `{0}` is missing from the configured load order")]
	UnlistedUnit(Namespace),
}

impl RegistryError {
	/// Wraps a foreign error raised while evaluating a declaration.
	pub fn declaration(err: impl Into<BoxError>) -> Self {
		Self::Declaration(err.into())
	}

	/// Returns the resource id this error is about, when there is one.
	pub fn resource_id(&self) -> Option<&ResourceId> {
		match self {
			Self::DuplicateRegistration { id, .. }
			| Self::DuplicateInstance { id, .. }
			| Self::RegistrarReuse { id }
			| Self::RegistryFrozen { id, .. }
			| Self::UnresolvedReference { id, .. } => Some(id),
			_ => None,
		}
	}
}
