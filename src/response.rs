use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// `{ "message": ... }` body used for errors and plain acknowledgements.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
