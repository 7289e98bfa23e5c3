//! Response bodies shared by several resources.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Confirmation returned by delete operations.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Task deleted")]
    pub message: String,
}

impl MessageResponse {
    pub fn deleted(kind: &str) -> Self {
        Self {
            message: format!("{kind} deleted"),
        }
    }
}
