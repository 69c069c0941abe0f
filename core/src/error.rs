//! Error taxonomy for generation and the registry.

use aigamedev_shared::ErrorKind;

/// Failure inside the pure generation step.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("description cannot be empty")]
    EmptyDescription,
}

/// Failure of a registry operation.
///
/// The `Display` text of each variant is what callers see through
/// `ai_game_dev_get_last_error`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Any operation before `init()`
    #[error("Library not initialized")]
    NotInitialized,

    /// Bad input to `create_game`
    #[error(transparent)]
    Validation(#[from] GenerationError),

    /// Configuration JSON could not be decoded
    #[error("Invalid configuration JSON: {0}")]
    ConfigParse(String),

    /// Unknown instance ID
    #[error("Invalid instance ID")]
    InvalidInstance(i32),

    /// Instance exists but has no completed result
    #[error("Game not yet generated")]
    NotReady(i32),

    /// Result could not be encoded
    #[error("Failed to serialize result: {0}")]
    Serialization(String),

    /// Every non-negative instance ID has been handed out
    #[error("Instance ID space exhausted")]
    IdsExhausted,
}

impl RegistryError {
    /// Wire category for the error envelope.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotInitialized => ErrorKind::NotInitialized,
            Self::Validation(_) => ErrorKind::Validation,
            Self::ConfigParse(_) => ErrorKind::ConfigParse,
            Self::InvalidInstance(_) => ErrorKind::InvalidInstance,
            Self::NotReady(_) => ErrorKind::NotReady,
            Self::Serialization(_) => ErrorKind::Serialization,
            Self::IdsExhausted => ErrorKind::Internal,
        }
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
