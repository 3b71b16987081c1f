//! Image vector: the table of images this extension deploys.
//!
//! The default table is compiled in from `images.yaml`. Operators can point
//! `IMAGEVECTOR_OVERWRITE` at another file whose entries replace the
//! built-in ones by name.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ExtensionError, Result};
use crate::reference::ImageReference;

/// Environment variable naming an image vector override file.
pub const IMAGEVECTOR_OVERWRITE_ENV: &str = "IMAGEVECTOR_OVERWRITE";

const EMBEDDED_IMAGES: &str = include_str!("../images.yaml");

/// Resolves symbolic image names to concrete references.
///
/// The returned string is used verbatim in chart values.
pub trait ImageLookup: Send + Sync {
    fn find_image(&self, name: &str) -> Result<String>;
}

/// One image vector entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSource {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_repository: Option<String>,
    pub repository: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl ImageSource {
    /// Reference string for this entry. Tags of the form `sha256:...` are
    /// treated as digests.
    pub fn reference(&self) -> String {
        match self.tag.as_deref() {
            Some(tag) if tag.contains(':') => format!("{}@{}", self.repository, tag),
            Some(tag) => format!("{}:{}", self.repository, tag),
            None => self.repository.clone(),
        }
    }
}

/// Ordered set of image sources, unique by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageVector {
    #[serde(default)]
    pub images: Vec<ImageSource>,
}

impl ImageVector {
    /// Parse an image vector document.
    pub fn from_yaml(document: &str) -> Result<Self> {
        let vector: Self = serde_yaml::from_str(document)?;
        for (i, image) in vector.images.iter().enumerate() {
            if vector.images[..i].iter().any(|other| other.name == image.name) {
                return Err(ExtensionError::ConfigError(format!(
                    "duplicate image '{}' in image vector",
                    image.name
                )));
            }
        }
        Ok(vector)
    }

    /// The compiled-in image vector.
    pub fn embedded() -> Result<Self> {
        Self::from_yaml(EMBEDDED_IMAGES)
    }

    /// The compiled-in image vector with the override from
    /// `IMAGEVECTOR_OVERWRITE` applied, if that variable is set.
    pub fn load() -> Result<Self> {
        let vector = Self::embedded()?;
        match std::env::var_os(IMAGEVECTOR_OVERWRITE_ENV) {
            Some(path) if !path.is_empty() => vector.with_override_file(Path::new(&path)),
            _ => Ok(vector),
        }
    }

    /// Apply the entries of an override file.
    pub fn with_override_file(self, path: &Path) -> Result<Self> {
        let document = std::fs::read_to_string(path).map_err(|e| {
            ExtensionError::ConfigError(format!(
                "failed to read image vector override {}: {}",
                path.display(),
                e
            ))
        })?;
        tracing::debug!(path = %path.display(), "Applying image vector override");
        Ok(self.merge(Self::from_yaml(&document)?))
    }

    /// Replace entries by name; entries unknown to `self` are appended.
    pub fn merge(mut self, overrides: ImageVector) -> Self {
        for image in overrides.images {
            match self.images.iter_mut().find(|i| i.name == image.name) {
                Some(existing) => *existing = image,
                None => self.images.push(image),
            }
        }
        self
    }
}

impl ImageLookup for ImageVector {
    fn find_image(&self, name: &str) -> Result<String> {
        let source = self
            .images
            .iter()
            .find(|i| i.name == name)
            .ok_or_else(|| ExtensionError::LookupError {
                name: name.to_string(),
            })?;
        let reference = source.reference();
        ImageReference::parse(&reference)?;
        Ok(reference)
    }
}
