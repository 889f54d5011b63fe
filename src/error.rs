use thiserror::Error;

use crate::types::PhaseKind;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize/deserialize data: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No matching questions for unit '{unit}' and difficulty '{difficulty}'")]
    NoMatchingQuestions { unit: String, difficulty: String },

    #[error("Cannot {operation} while the session is {phase}")]
    InvalidTransition {
        operation: &'static str,
        phase: PhaseKind,
    },

    #[error("Option {index} is out of range for a question with {len} options")]
    OptionOutOfRange { index: usize, len: usize },

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),
}

impl QuizError {
    /// Errors caused by calling the engine in the wrong phase or with bad
    /// arguments. The session itself is untouched when these are returned.
    pub fn is_rejected_intent(&self) -> bool {
        matches!(
            self,
            QuizError::InvalidTransition { .. }
                | QuizError::OptionOutOfRange { .. }
                | QuizError::InvalidInput(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, QuizError>;
