use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// The name is not part of the default parameter table.
    #[error("Parameter not found: {0}")]
    NotFound(String),

    #[error("Unknown traveler profile: {0}")]
    UnknownProfile(String),

    /// Neither instances nor the default table know this attribute.
    #[error("Attribute not configured: {0}")]
    AttributeNotConfigured(String),

    #[error("Invalid instance configuration: {0}")]
    InvalidInstance(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Whether the surrounding service should report this error to the end
    /// user (e.g. as an "invalid profile" response) rather than as an
    /// internal failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, AppError::UnknownProfile(_))
    }
}

impl From<derive_builder::UninitializedFieldError> for AppError {
    fn from(e: derive_builder::UninitializedFieldError) -> Self {
        AppError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
