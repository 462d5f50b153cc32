use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A referenced id (parent, country, template, ...) does not exist.
    #[error("Referenced {entity} with id {id} does not exist")]
    InvalidReference { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// Re-parenting would make a category its own ancestor.
    #[error("Cycle: {0}")]
    Cycle(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
