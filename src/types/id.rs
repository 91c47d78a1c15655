// ABOUTME: Platform-assigned identifiers tagged with the resource they name.
// ABOUTME: A DeploymentId cannot be passed where a CertificateId is expected.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// A kind of platform resource that carries an identifier.
pub trait Resource {
    /// Name used in debug output and decode errors.
    const KIND: &'static str;
}

pub enum Deployment {}
pub enum Certificate {}

impl Resource for Deployment {
    const KIND: &'static str = "deployment";
}

impl Resource for Certificate {
    const KIND: &'static str = "certificate";
}

/// Opaque identifier issued by the platform for a resource of kind `R`.
///
/// Never empty; the platform's value is kept verbatim.
#[must_use = "IDs reference resources and should not be ignored"]
pub struct Id<R> {
    value: String,
    _resource: PhantomData<fn() -> R>,
}

pub type DeploymentId = Id<Deployment>;
pub type CertificateId = Id<Certificate>;

impl<R: Resource> Id<R> {
    /// Wrap a platform identifier. Returns `None` for an empty string.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.is_empty() {
            return None;
        }
        Some(Self {
            value,
            _resource: PhantomData,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl<R: Resource> fmt::Debug for Id<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", R::KIND, self.value)
    }
}

impl<R> fmt::Display for Id<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<R> Clone for Id<R> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R> PartialEq for Id<R> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<R> Eq for Id<R> {}

impl<R> Hash for Id<R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<R> Serialize for Id<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de, R: Resource> Deserialize<'de> for Id<R> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::new(value)
            .ok_or_else(|| serde::de::Error::custom(format!("empty {} id", R::KIND)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_plain_string() {
        let id = DeploymentId::new("dpl_123").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"dpl_123\"");
    }

    #[test]
    fn deserializes_from_plain_string() {
        let id: CertificateId = serde_json::from_str("\"cert_abc\"").unwrap();
        assert_eq!(id.as_str(), "cert_abc");
    }

    #[test]
    fn empty_id_is_rejected() {
        assert!(DeploymentId::new("").is_none());
        let err = serde_json::from_str::<CertificateId>("\"\"").unwrap_err();
        assert!(err.to_string().contains("empty certificate id"));
    }

    #[test]
    fn debug_names_the_resource() {
        let id = DeploymentId::new("dpl_1").unwrap();
        assert_eq!(format!("{id:?}"), "deployment:dpl_1");
        assert_eq!(id.to_string(), "dpl_1");
    }
}
