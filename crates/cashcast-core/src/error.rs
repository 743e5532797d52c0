use cashcast_domain::RecurrenceError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid recurrence rule: {0}")]
    InvalidRecurrenceRule(String),
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Snapshot source failed: {0}")]
    Source(String),
}

impl From<RecurrenceError> for CoreError {
    fn from(err: RecurrenceError) -> Self {
        match err {
            RecurrenceError::InvalidRule(rule) => CoreError::InvalidRecurrenceRule(rule),
        }
    }
}
