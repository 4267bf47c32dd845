//! Quest Errors
//!
//! Every rejected operation reports one of these and leaves state untouched.

use std::path::PathBuf;

use super::state::QuestStatus;

/// Outcome of a rejected quest or objective operation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestError {
    #[error("Quest '{0}' not found")]
    NotFound(String),

    #[error("Cannot {action} quest '{quest_id}' while it is {from}")]
    InvalidTransition {
        quest_id: String,
        from: QuestStatus,
        action: &'static str,
    },

    #[error("Quest '{quest_id}' has unfinished prerequisites: {missing:?}")]
    PrerequisitesNotMet {
        quest_id: String,
        missing: Vec<String>,
    },

    #[error("Quest '{0}' is already registered")]
    DuplicateId(String),

    #[error("Quest '{0}' does not satisfy its completion policy yet")]
    PolicyNotSatisfied(String),

    #[error("Progress amount must be positive ({0})")]
    InvalidAmount(String),

    #[error("Quest '{quest_id}' has objective '{objective_id}' which does not exist")]
    ObjectiveNotFound {
        quest_id: String,
        objective_id: String,
    },

    #[error("Invalid definition for quest '{quest_id}': {reason}")]
    InvalidDefinition { quest_id: String, reason: String },
}

impl QuestError {
    /// True for rejections caused by the quest's current status, including
    /// an accept attempted before its prerequisites are done.
    pub fn is_invalid_transition(&self) -> bool {
        matches!(
            self,
            QuestError::InvalidTransition { .. } | QuestError::PrerequisitesNotMet { .. }
        )
    }
}

/// Failure while loading quest definition files
#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Invalid(#[from] QuestError),
}
