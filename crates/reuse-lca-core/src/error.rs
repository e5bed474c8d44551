use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReuseLcaError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for ReuseLcaError {
    fn from(e: serde_json::Error) -> Self {
        ReuseLcaError::SerializationError(e.to_string())
    }
}
