// Port for the collaborator store that backs client-held transactions.
//
// Purpose
// - Describe the begin, write and commit capability the transaction core needs, without a transport.
//
// Boundaries
// - No wire format here. Network clients implement this trait in their own adapters.
//
// Testing guidance
// - Use the in memory implementation; it can simulate outages and conflicts deterministically.

use crate::modules::transactions::core::event_record::EventRecord;
use crate::shared::core::primitives::{CommitOutcome, ExpectedVersion, TransactionId};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EventStoreError {
    #[error("event store unavailable: {0}")]
    Unavailable(String),

    #[error("wrong expected version for stream {stream_id}: expected {expected}, actual {actual}")]
    WrongExpectedVersion {
        stream_id: String,
        expected: ExpectedVersion,
        actual: i64,
    },

    #[error("unknown transaction {0}")]
    UnknownTransaction(TransactionId),
}

#[async_trait]
pub trait TransactionalEventStore: Send + Sync {
    async fn begin_transaction(
        &self,
        stream_id: &str,
        expected_version: ExpectedVersion,
    ) -> Result<TransactionId, EventStoreError>;

    async fn transactional_write(
        &self,
        transaction_id: TransactionId,
        events: &[EventRecord],
    ) -> Result<(), EventStoreError>;

    async fn transactional_commit(
        &self,
        transaction_id: TransactionId,
    ) -> Result<CommitOutcome, EventStoreError>;

    /// Best-effort notice that the transaction was abandoned. Stores that reclaim
    /// transactions by timeout can keep the default.
    async fn transactional_rollback(
        &self,
        _transaction_id: TransactionId,
    ) -> Result<(), EventStoreError> {
        Ok(())
    }
}

pub mod in_memory;
