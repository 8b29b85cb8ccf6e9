use crate::modules::transactions::core::state::TransactionStatus;
use crate::modules::transactions::use_cases::transaction_lifecycle::decision::DecideError;
use crate::shared::core::primitives::TransactionId;
use crate::shared::infrastructure::event_store::EventStoreError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransactionError {
    /// Transport failure or timeout. Retryable.
    #[error("connection error: {0}")]
    Connection(String),

    /// Operation issued on a transaction that is no longer open.
    #[error("transaction {id} is {status}, expected open")]
    InvalidState {
        id: TransactionId,
        status: TransactionStatus,
    },

    /// The store rejected the commit, or no longer knows the transaction (reclaimed or already
    /// finished). Retry only after re-evaluating intent.
    #[error("transaction {id} rejected by the store: {reason}")]
    Conflict { id: TransactionId, reason: String },
}

impl TransactionError {
    pub fn from_store(id: TransactionId, error: EventStoreError) -> Self {
        match error {
            EventStoreError::Unavailable(message) => TransactionError::Connection(message),
            rejection @ (EventStoreError::WrongExpectedVersion { .. }
            | EventStoreError::UnknownTransaction(_)) => TransactionError::Conflict {
                id,
                reason: rejection.to_string(),
            },
        }
    }

    pub fn from_rejection(id: TransactionId, reason: DecideError) -> Self {
        match reason {
            DecideError::NotOpen(status) => TransactionError::InvalidState { id, status },
            // Only rollback is refused this way, and rollback never surfaces an error.
            DecideError::CommitInFlight => TransactionError::InvalidState {
                id,
                status: TransactionStatus::Open,
            },
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, TransactionError::Connection(_))
    }
}
