use thiserror::Error;

use super::validation::FieldError;
use crate::database::DatabaseError;

#[derive(Debug, Error)]
pub enum NoteError {
    #[error("invalid note fields: {}", summarize(.0))]
    Validation(Vec<FieldError>),

    #[error("note not found")]
    NotFound,

    #[error("note belongs to another user")]
    NotAllowed,

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.path.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
