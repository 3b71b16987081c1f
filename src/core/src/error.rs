use thiserror::Error;

/// gVisor extension error types
#[derive(Error, Debug)]
pub enum ExtensionError {
    /// Provider configuration present but not decodable against the schema
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// Chart renderer failed
    #[error("Render error: {chart} - {message}")]
    RenderError { chart: String, message: String },

    /// Symbolic image name not present in the image vector
    #[error("Image lookup failed: {name}")]
    LookupError { name: String },

    /// Image reference could not be parsed
    #[error("Image reference error: {0}")]
    ImageReferenceError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<serde_json::Error> for ExtensionError {
    fn from(err: serde_json::Error) -> Self {
        ExtensionError::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for ExtensionError {
    fn from(err: serde_yaml::Error) -> Self {
        ExtensionError::SerializationError(err.to_string())
    }
}

/// Result type alias for extension operations
pub type Result<T> = std::result::Result<T, ExtensionError>;
