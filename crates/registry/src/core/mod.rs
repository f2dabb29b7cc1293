//! Shared registry infrastructure.

pub mod ctx;
pub mod error;
pub mod id;
pub mod kind;
pub mod registry;
pub mod set;

pub use ctx::RegisterCtx;
pub use error::{BoxError, RegistryError};
pub use id::{Namespace, ProviderId, ResourceId};
pub use kind::RegistryKind;
pub use registry::{Entries, Registry};
pub use set::{RegistrySet, RegistrySetBuilder};
