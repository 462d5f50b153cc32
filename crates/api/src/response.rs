//! Shared response body types for API handlers.

use serde::Serialize;

/// `{ "message": ... }` body returned by deletes and other actions that
/// have no resource to echo back.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
