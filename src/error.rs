use thiserror::Error;

/// Main error type for propstore operations
#[derive(Debug, Error)]
pub enum PropstoreError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Property not found: {module}.{name}")]
    PropertyNotFound { module: String, name: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration loading error: {0}")]
    ConfigLoadError(#[from] config::ConfigError),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl PropstoreError {
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn property_not_found<S: Into<String>>(module: S, name: S) -> Self {
        Self::PropertyNotFound {
            module: module.into(),
            name: name.into(),
        }
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn unknown<S: Into<String>>(msg: S) -> Self {
        Self::Unknown(msg.into())
    }
}

/// Result type alias for propstore operations
pub type Result<T> = std::result::Result<T, PropstoreError>;

impl From<toml::ser::Error> for PropstoreError {
    fn from(error: toml::ser::Error) -> Self {
        Self::SerializationError(error.to_string())
    }
}
