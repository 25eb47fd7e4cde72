use crate::message::ChatMessage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubatomicError {
    #[error("duplicate recursive parameter key: {0}")]
    DuplicateParameter(String),

    #[error("no setter registered for unresolved parameter: {0}")]
    MissingSetter(String),

    #[error("task not found: {0}")]
    TaskNotFound(String),

    #[error("command not found: {0}")]
    CommandNotFound(String),

    #[error("duplicate command registered: {0}")]
    DuplicateCommand(String),

    #[error("{message}")]
    UserFacing {
        message: String,
        /// Pre-rendered response (e.g. carrying a "create the missing team"
        /// button) shown instead of the bare message when present.
        prompt: Option<ChatMessage>,
    },

    #[error("chat surface error: {0}")]
    Surface(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl SubatomicError {
    /// Build a plain user-facing domain error ("team does not exist").
    pub fn user(message: impl Into<String>) -> Self {
        SubatomicError::UserFacing {
            message: message.into(),
            prompt: None,
        }
    }

    /// Build a user-facing domain error carrying a pre-rendered response.
    pub fn user_with_prompt(message: impl Into<String>, prompt: ChatMessage) -> Self {
        SubatomicError::UserFacing {
            message: message.into(),
            prompt: Some(prompt),
        }
    }

    /// Configuration faults indicate a bug in a command definition and are
    /// never converted into a user-facing response.
    pub fn is_configuration_fault(&self) -> bool {
        matches!(
            self,
            SubatomicError::DuplicateParameter(_)
                | SubatomicError::MissingSetter(_)
                | SubatomicError::DuplicateCommand(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SubatomicError>;
