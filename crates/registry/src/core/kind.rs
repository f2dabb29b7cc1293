/// Marker for element types that own a registry.
///
/// The registry an object lands in is chosen by its static type: a
/// [`RegistrySet`](super::RegistrySet) holds at most one
/// [`Registry`](super::Registry) per implementor.
pub trait RegistryKind: Send + Sync + 'static {
	/// Human-readable registry label used in diagnostics (e.g., "item").
	const LABEL: &'static str;
}

/// Implements [`RegistryKind`] for one or more types.
///
/// ```
/// pub struct Item;
/// kiln_registry::registry_kind!(Item => "item");
/// ```
#[macro_export]
macro_rules! registry_kind {
	($($ty:ty => $label:literal),+ $(,)?) => {
		$(
			impl $crate::RegistryKind for $ty {
				const LABEL: &'static str = $label;
			}
		)+
	};
}
