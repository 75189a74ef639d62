use thiserror::Error;

use crate::validation::FieldError;

#[derive(Debug, Error)]
pub enum RefiError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("{}", join_messages(.0))]
    Validation(Vec<FieldError>),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl RefiError {
    /// Field-level failures carried by a `Validation` error, empty otherwise.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            RefiError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join(" | ")
}

impl From<serde_json::Error> for RefiError {
    fn from(e: serde_json::Error) -> Self {
        RefiError::SerializationError(e.to_string())
    }
}
