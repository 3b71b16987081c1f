//! Container image reference parsing.
//!
//! Image vector entries resolve to references such as
//! `europe-docker.pkg.dev/gardener-project/releases/installer:v0.4.0`.

use crate::error::{ExtensionError, Result};

/// Registry used when a reference names none.
const DEFAULT_REGISTRY: &str = "docker.io";

/// Tag used when a reference carries neither tag nor digest.
const DEFAULT_TAG: &str = "latest";

/// Parsed image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    /// Registry hostname, optionally with port
    pub registry: String,
    /// Repository path below the registry
    pub repository: String,
    pub tag: Option<String>,
    /// Digest such as `sha256:...`
    pub digest: Option<String>,
}

impl ImageReference {
    /// Parse an image reference string.
    ///
    /// - `nginx` → `docker.io/library/nginx:latest`
    /// - `registry:5000/app` → `registry:5000/app:latest`
    /// - `ghcr.io/org/app:v1@sha256:abc` keeps both tag and digest
    pub fn parse(reference: &str) -> Result<Self> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(ExtensionError::ImageReferenceError(
                "empty image reference".to_string(),
            ));
        }

        let (name_tag, digest) = match reference.split_once('@') {
            Some((name_tag, digest)) => {
                if !digest.contains(':') {
                    return Err(ExtensionError::ImageReferenceError(format!(
                        "invalid digest in '{}': expected algorithm:hex",
                        reference
                    )));
                }
                (name_tag, Some(digest.to_string()))
            }
            None => (reference, None),
        };

        // A tag separator only counts after the last path component boundary,
        // otherwise `registry:5000/app` would be read as tag `5000/app`.
        let last_component = name_tag.rfind('/').map_or(0, |pos| pos + 1);
        let (name, tag) = match name_tag[last_component..].rfind(':') {
            Some(pos) => {
                let split = last_component + pos;
                (&name_tag[..split], Some(name_tag[split + 1..].to_string()))
            }
            None => (name_tag, None),
        };

        if tag.as_deref() == Some("") {
            return Err(ExtensionError::ImageReferenceError(format!(
                "empty tag in '{}'",
                reference
            )));
        }

        let (registry, repository) = split_registry(name, reference)?;

        let tag = if tag.is_none() && digest.is_none() {
            Some(DEFAULT_TAG.to_string())
        } else {
            tag
        };

        Ok(Self {
            registry,
            repository,
            tag,
            digest,
        })
    }

    /// Full reference string, `registry/repository[:tag][@digest]`.
    pub fn full_reference(&self) -> String {
        let mut s = format!("{}/{}", self.registry, self.repository);
        if let Some(tag) = &self.tag {
            s.push(':');
            s.push_str(tag);
        }
        if let Some(digest) = &self.digest {
            s.push('@');
            s.push_str(digest);
        }
        s
    }
}

fn split_registry(name: &str, reference: &str) -> Result<(String, String)> {
    if let Some((first, rest)) = name.split_once('/') {
        if first.contains('.') || first.contains(':') || first == "localhost" {
            if rest.is_empty() {
                return Err(ExtensionError::ImageReferenceError(format!(
                    "empty repository in '{}'",
                    reference
                )));
            }
            return Ok((first.to_string(), rest.to_string()));
        }
        return Ok((DEFAULT_REGISTRY.to_string(), name.to_string()));
    }
    Ok((DEFAULT_REGISTRY.to_string(), format!("library/{}", name)))
}

impl std::fmt::Display for ImageReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.full_reference())
    }
}
