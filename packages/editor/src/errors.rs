//! Error types for the editor

use scripta_common::CommonError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Storage error: {0}")]
    Storage(#[from] CommonError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("No saved script found")]
    NoSavedScript,
}
