//! gVisor runtime extension - Core Types
//!
//! Resource types, provider configuration decoding, the image vector and
//! the error type shared by the chart compiler and the CLI.

pub mod error;
pub mod gvisor;
pub mod imagevector;
pub mod provider;
pub mod reference;
pub mod resource;

// Re-export commonly used types
pub use error::{ExtensionError, Result};
pub use imagevector::{ImageLookup, ImageSource, ImageVector};
pub use provider::GVisorConfiguration;
pub use reference::ImageReference;
pub use resource::{
    ContainerRuntime, ContainerRuntimeSpec, LabelSelector, ObjectMeta, RawExtension, WorkerPool,
};

/// Extension version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
