//! Shared response bodies that are not a model serialized as-is.

use serde::Serialize;

/// `{ "message": ... }` acknowledgement body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Body returned by `DELETE /api/sketches/{id}`, whether or not the row existed.
pub const DELETED: MessageResponse = MessageResponse { message: "Deleted" };
