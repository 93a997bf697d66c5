//! Custom error types for ionbrew

use std::fmt;

/// Main error type for ionbrew operations
#[derive(Debug)]
pub enum IonbrewError {
    /// Configuration related errors
    Config(String),
    /// Project descriptor loading/detection errors
    Project(String),
    /// Server backend start-up errors
    Backend(String),
    /// Local-network discovery errors
    Discovery(String),
    /// General I/O errors
    Io(std::io::Error),
    /// Serialization errors
    Serialization(String),
}

impl fmt::Display for IonbrewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IonbrewError::Config(msg) => write!(f, "Configuration error: {}", msg),
            IonbrewError::Project(msg) => write!(f, "Project error: {}", msg),
            IonbrewError::Backend(msg) => write!(f, "Dev server error: {}", msg),
            IonbrewError::Discovery(msg) => write!(f, "Discovery error: {}", msg),
            IonbrewError::Io(err) => write!(f, "I/O error: {}", err),
            IonbrewError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for IonbrewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IonbrewError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for IonbrewError {
    fn from(err: std::io::Error) -> Self {
        IonbrewError::Io(err)
    }
}

impl From<serde_json::Error> for IonbrewError {
    fn from(err: serde_json::Error) -> Self {
        IonbrewError::Serialization(err.to_string())
    }
}

/// Result type alias for ionbrew operations
pub type Result<T> = std::result::Result<T, IonbrewError>;
