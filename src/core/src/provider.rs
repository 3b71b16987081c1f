//! gVisor provider configuration carried in `spec.providerConfig`.
//!
//! Payloads are YAML or JSON documents:
//!
//! ```yaml
//! apiVersion: gvisor.os.extensions.gardener.cloud/v1alpha1
//! kind: GVisorConfiguration
//! configFlags:
//!   net-raw: "true"
//! ```
//!
//! Unknown fields are ignored. A wrong `apiVersion` or `kind` is a decode
//! error, as is any flag that cannot be written as a single
//! `key = "value"` line. Flag values must be strings: `net-raw: true` is
//! rejected, `net-raw: "true"` is accepted.

use std::collections::HashMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ExtensionError, Result};

/// API version accepted for provider configurations.
pub const API_VERSION: &str = "gvisor.os.extensions.gardener.cloud/v1alpha1";

/// Kind accepted for provider configurations.
pub const KIND: &str = "GVisorConfiguration";

/// Decoded provider configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GVisorConfiguration {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    /// runsc flags, written into the runtime handler options
    #[serde(
        default,
        deserialize_with = "string_flags",
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub config_flags: HashMap<String, String>,
}

impl GVisorConfiguration {
    /// Decode a raw provider configuration payload.
    pub fn decode(raw: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(raw).map_err(|e| {
            ExtensionError::DecodeError(format!("provider config is not valid UTF-8: {}", e))
        })?;

        let config: Self = serde_yaml::from_str(text)
            .map_err(|e| ExtensionError::DecodeError(format!("invalid provider config: {}", e)))?;

        if config.api_version != API_VERSION || config.kind != KIND {
            return Err(ExtensionError::DecodeError(format!(
                "unsupported provider config {}/{} (expected {}/{})",
                config.api_version, config.kind, API_VERSION, KIND
            )));
        }

        for (key, value) in &config.config_flags {
            validate_flag(key, value)?;
        }

        Ok(config)
    }
}

/// `configFlags` as a string map. A null map is empty; non-string values fail.
fn string_flags<'de, D>(deserializer: D) -> std::result::Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<HashMap<String, serde_yaml::Value>>::deserialize(deserializer)?;
    raw.unwrap_or_default()
        .into_iter()
        .map(|(key, value)| match value {
            serde_yaml::Value::String(value) => Ok((key, value)),
            _ => Err(D::Error::custom(format!(
                "config flag '{}' must be a string",
                key
            ))),
        })
        .collect()
}

fn validate_flag(key: &str, value: &str) -> Result<()> {
    if key.is_empty() {
        return Err(ExtensionError::DecodeError(
            "config flag with empty name".to_string(),
        ));
    }
    if key
        .chars()
        .any(|c| c.is_whitespace() || c == '=' || c == '"')
    {
        return Err(ExtensionError::DecodeError(format!(
            "invalid config flag name '{}'",
            key
        )));
    }
    if value.contains(['"', '\n', '\r']) {
        return Err(ExtensionError::DecodeError(format!(
            "config flag '{}' has a value with a quote or line break",
            key
        )));
    }
    Ok(())
}
