use thiserror::Error;

use crate::model::RequiredField;

/// Failures reported by a document store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store lock poisoned")]
    Poisoned,
}

/// Errors surfaced by the project board.
///
/// Every store failure collapses into [`BoardError::Store`]; the board does
/// not distinguish network, permission, or not-found causes.
#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Store operation failed: {0}")]
    Store(#[from] StoreError),

    #[error("Missing required fields: {}", join_fields(.0))]
    Incomplete(Vec<RequiredField>),
}

fn join_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, BoardError>;
