//! ContainerRuntime resource types.
//!
//! Only the fields read by the values compiler are modeled. The provider
//! configuration is kept as raw bytes and decoded lazily, so a resource with
//! an invalid payload still deserializes and the failure surfaces at compile
//! time as a decode error.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ExtensionError, Result};

/// A container runtime installation request for one worker pool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerRuntime {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    pub spec: ContainerRuntimeSpec,
}

/// Subset of Kubernetes object metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerRuntimeSpec {
    /// Runtime type, e.g. `gvisor`
    #[serde(rename = "type", default)]
    pub runtime_type: String,
    /// Directory on the node the runtime binaries are installed into
    pub binary_path: String,
    /// Worker pool the runtime is installed on
    pub worker_pool: WorkerPool,
    /// Provider specific configuration, decoded by the values compiler
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_config: Option<RawExtension>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkerPool {
    pub name: String,
    #[serde(default)]
    pub selector: LabelSelector,
}

/// Label selector of a worker pool. Only equality matches are supported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelector {
    #[serde(default)]
    pub match_labels: BTreeMap<String, String>,
}

/// Opaque embedded object, kept as the bytes it was supplied with.
///
/// In a resource document the field holds either an inline object, which is
/// stored as its JSON encoding, or a string holding a raw YAML/JSON document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawExtension {
    raw: Vec<u8>,
}

impl RawExtension {
    pub fn new(raw: impl Into<Vec<u8>>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }
}

impl From<&str> for RawExtension {
    fn from(raw: &str) -> Self {
        Self::new(raw.as_bytes())
    }
}

impl<'de> Deserialize<'de> for RawExtension {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(raw) => Ok(Self::new(raw)),
            value => serde_json::to_vec(&value)
                .map(Self::new)
                .map_err(serde::de::Error::custom),
        }
    }
}

impl Serialize for RawExtension {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match serde_json::from_slice::<serde_json::Value>(&self.raw) {
            Ok(value) => value.serialize(serializer),
            Err(_) => serializer.serialize_str(&String::from_utf8_lossy(&self.raw)),
        }
    }
}

impl ContainerRuntime {
    /// Parse a ContainerRuntime from a YAML (or JSON) document.
    pub fn from_yaml(document: &str) -> Result<Self> {
        let runtime: Self = serde_yaml::from_str(document)?;
        if runtime.spec.worker_pool.name.is_empty() {
            return Err(ExtensionError::ConfigError(
                "spec.workerPool.name must not be empty".to_string(),
            ));
        }
        Ok(runtime)
    }
}
