//! Command response and wire-level error types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Machine-readable failure category carried on declined responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandErrorCode {
    TableNotFound,
    TableOccupied,
    TableReserved,
    TableInactive,
    OrderNotFound,
    OrderAlreadyCompleted,
    OrderAlreadyCancelled,
    ItemNotFound,
    InvalidAmount,
    InvalidOperation,
    CustomerRequired,
    InternalError,
    StorageFull,
    OutOfMemory,
    StorageCorrupted,
    SystemBusy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandError {
    pub code: CommandErrorCode,
    pub message: String,
}

impl CommandError {
    pub fn new(code: CommandErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

/// Outcome of a submitted command. Validation failures come back as a
/// declined response, never as a panic or transport error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    pub command_id: Uuid,
    pub success: bool,
    /// Id of the entity the command created or targeted, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CommandError>,
}

impl CommandResponse {
    pub fn success(command_id: Uuid, entity_id: Option<String>) -> Self {
        Self {
            command_id,
            success: true,
            entity_id,
            error: None,
        }
    }

    pub fn error(command_id: Uuid, error: CommandError) -> Self {
        Self {
            command_id,
            success: false,
            entity_id: None,
            error: Some(error),
        }
    }

    /// Acknowledgement for a command that was already processed.
    pub fn duplicate(command_id: Uuid) -> Self {
        Self::success(command_id, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_serialization() {
        let err = CommandError::new(CommandErrorCode::TableOccupied, "table t1 has an open order");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "TABLE_OCCUPIED");
    }

    #[test]
    fn test_declined_response_shape() {
        let id = Uuid::new_v4();
        let resp = CommandResponse::error(
            id,
            CommandError::new(CommandErrorCode::OrderNotFound, "no such order"),
        );
        assert!(!resp.success);
        assert!(resp.entity_id.is_none());
        assert!(resp.error.is_some());
    }
}
