//! Validated identifiers: namespaces, resource ids and provider ids.
//!
//! Every identifier segment shares one character set: lower-case ASCII
//! letters, digits, `_`, `.` and `-`, and at least one character.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::error::RegistryError;

/// Checks one identifier segment, returning the reason it is rejected.
pub(crate) fn check_segment(candidate: &str) -> Result<(), &'static str> {
	if candidate.is_empty() {
		return Err("must not be empty");
	}
	for c in candidate.chars() {
		if c.is_uppercase() {
			return Err("must not contain upper-case characters");
		}
		if !matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | '-') {
			return Err("may only contain [a-z0-9_.-]");
		}
	}
	Ok(())
}

/// Ownership scope for every identifier declared by one content unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Namespace(Arc<str>);

impl Namespace {
	/// Validates `candidate` and wraps it.
	pub fn new(candidate: &str) -> Result<Self, RegistryError> {
		check_segment(candidate).map_err(|reason| RegistryError::InvalidNamespace {
			candidate: candidate.to_owned(),
			reason,
		})?;
		Ok(Self(Arc::from(candidate)))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Builds the full id `self:path`, validating `path`.
	pub fn id(&self, path: &str) -> Result<ResourceId, RegistryError> {
		ResourceId::new(self, path)
	}
}

impl fmt::Display for Namespace {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl TryFrom<String> for Namespace {
	type Error = RegistryError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(&value)
	}
}

impl From<Namespace> for String {
	fn from(ns: Namespace) -> Self {
		ns.0.to_string()
	}
}

/// Full identifier of a registered object: `namespace:path`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceId {
	namespace: Namespace,
	path: Arc<str>,
}

impl ResourceId {
	/// Validates `path` and joins it to `namespace`.
	pub fn new(namespace: &Namespace, path: &str) -> Result<Self, RegistryError> {
		check_segment(path).map_err(|reason| RegistryError::InvalidId {
			namespace: namespace.clone(),
			id: path.to_owned(),
			reason,
		})?;
		Ok(Self {
			namespace: namespace.clone(),
			path: Arc::from(path),
		})
	}

	pub fn namespace(&self) -> &Namespace {
		&self.namespace
	}

	/// The local id within the namespace.
	pub fn path(&self) -> &str {
		&self.path
	}
}

impl fmt::Display for ResourceId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.namespace, self.path)
	}
}

impl FromStr for ResourceId {
	type Err = RegistryError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let (namespace, path) = s
			.split_once(':')
			.ok_or_else(|| RegistryError::MalformedId(s.to_owned()))?;
		Self::new(&Namespace::new(namespace)?, path)
	}
}

impl TryFrom<String> for ResourceId {
	type Error = RegistryError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl From<ResourceId> for String {
	fn from(id: ResourceId) -> Self {
		id.to_string()
	}
}

/// Names one registration provider within a content unit's manifest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProviderId(Arc<str>);

impl ProviderId {
	pub fn new(candidate: &str) -> Result<Self, RegistryError> {
		check_segment(candidate).map_err(|reason| RegistryError::InvalidProviderId {
			id: candidate.to_owned(),
			reason,
		})?;
		Ok(Self(Arc::from(candidate)))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for ProviderId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl TryFrom<String> for ProviderId {
	type Error = RegistryError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(&value)
	}
}

impl From<ProviderId> for String {
	fn from(id: ProviderId) -> Self {
		id.0.to_string()
	}
}
