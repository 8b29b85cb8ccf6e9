// In memory implementation of the TransactionalEventStore port.
//
// Purpose
// - Support transaction tests and local runs without a store server.
//
// Responsibilities
// - Hand out monotonically increasing transaction ids, never reusing one.
// - Buffer transactional writes per id and append them to the stream on commit.
// - Enforce optimistic concurrency by checking the expected version at commit.
// - Simulate outages, transient failures and latency on demand.

use crate::modules::transactions::core::event_record::EventRecord;
use crate::shared::core::primitives::{CommitOutcome, ExpectedVersion, TransactionId};
use crate::shared::infrastructure::event_store::{EventStoreError, TransactionalEventStore};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEvent {
    pub event_number: i64,
    pub committed_at: i64,
    pub record: EventRecord,
}

#[derive(Debug)]
struct PendingTransaction {
    stream_id: String,
    expected_version: ExpectedVersion,
    events: Vec<EventRecord>,
}

#[derive(Debug, Default)]
struct Inner {
    last_id: i64,
    streams: HashMap<String, Vec<StoredEvent>>,
    transactions: HashMap<TransactionId, PendingTransaction>,
    rollbacks: Vec<TransactionId>,
}

#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    inner: Mutex<Inner>,
    offline: AtomicBool,
    failing_writes: AtomicUsize,
    failing_commits: AtomicUsize,
    delay_ms: AtomicU64,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&self) {
        self.offline.fetch_xor(true, Ordering::SeqCst);
    }

    /// The next `count` writes fail as if the connection dropped.
    pub fn fail_next_writes(&self, count: usize) {
        self.failing_writes.store(count, Ordering::SeqCst);
    }

    /// The next `count` commits fail as if the connection dropped.
    pub fn fail_next_commits(&self, count: usize) {
        self.failing_commits.store(count, Ordering::SeqCst);
    }

    pub fn set_delay_ms(&self, ms: u64) {
        self.delay_ms.store(ms, Ordering::SeqCst);
    }

    pub async fn read_stream(&self, stream_id: &str) -> Vec<StoredEvent> {
        let guard = self.inner.lock().await;
        guard.streams.get(stream_id).cloned().unwrap_or_default()
    }

    pub async fn stream_version(&self, stream_id: &str) -> i64 {
        let guard = self.inner.lock().await;
        guard.streams.get(stream_id).map(|v| v.len()).unwrap_or(0) as i64
    }

    pub async fn open_transactions(&self) -> usize {
        self.inner.lock().await.transactions.len()
    }

    pub async fn pending_events(&self, transaction_id: TransactionId) -> Option<Vec<EventRecord>> {
        let guard = self.inner.lock().await;
        guard
            .transactions
            .get(&transaction_id)
            .map(|t| t.events.clone())
    }

    /// Every rollback notice received, in arrival order. Only for tests and inspection; never pruned.
    pub async fn rollback_notifications(&self) -> Vec<TransactionId> {
        self.inner.lock().await.rollbacks.clone()
    }

    async fn simulate_network(&self) -> Result<(), EventStoreError> {
        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        if self.offline.load(Ordering::SeqCst) {
            return Err(EventStoreError::Unavailable("Event store offline".into()));
        }
        Ok(())
    }
}

fn consume_failure(counter: &AtomicUsize) -> bool {
    counter
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
}

#[async_trait::async_trait]
impl TransactionalEventStore for InMemoryEventStore {
    async fn begin_transaction(
        &self,
        stream_id: &str,
        expected_version: ExpectedVersion,
    ) -> Result<TransactionId, EventStoreError> {
        self.simulate_network().await?;
        let mut guard = self.inner.lock().await;
        guard.last_id += 1;
        let id = TransactionId::new(guard.last_id);
        guard.transactions.insert(
            id,
            PendingTransaction {
                stream_id: stream_id.to_string(),
                expected_version,
                events: Vec::new(),
            },
        );
        Ok(id)
    }

    async fn transactional_write(
        &self,
        transaction_id: TransactionId,
        events: &[EventRecord],
    ) -> Result<(), EventStoreError> {
        self.simulate_network().await?;
        if consume_failure(&self.failing_writes) {
            return Err(EventStoreError::Unavailable("Connection reset".into()));
        }
        let mut guard = self.inner.lock().await;
        let transaction = guard
            .transactions
            .get_mut(&transaction_id)
            .ok_or(EventStoreError::UnknownTransaction(transaction_id))?;
        transaction.events.extend_from_slice(events);
        Ok(())
    }

    async fn transactional_commit(
        &self,
        transaction_id: TransactionId,
    ) -> Result<CommitOutcome, EventStoreError> {
        self.simulate_network().await?;
        if consume_failure(&self.failing_commits) {
            return Err(EventStoreError::Unavailable("Connection reset".into()));
        }
        let mut guard = self.inner.lock().await;
        let Inner {
            streams,
            transactions,
            ..
        } = &mut *guard;
        let transaction = transactions
            .get(&transaction_id)
            .ok_or(EventStoreError::UnknownTransaction(transaction_id))?;
        let actual = streams
            .get(&transaction.stream_id)
            .map(|v| v.len())
            .unwrap_or(0) as i64;
        if !transaction.expected_version.matches(actual) {
            return Err(EventStoreError::WrongExpectedVersion {
                stream_id: transaction.stream_id.clone(),
                expected: transaction.expected_version,
                actual,
            });
        }
        let Some(transaction) = transactions.remove(&transaction_id) else {
            return Err(EventStoreError::UnknownTransaction(transaction_id));
        };
        let committed_at = Utc::now().timestamp_millis();
        let stream = streams.entry(transaction.stream_id).or_default();
        for record in transaction.events {
            let event_number = stream.len() as i64;
            stream.push(StoredEvent {
                event_number,
                committed_at,
                record,
            });
        }
        Ok(CommitOutcome {
            next_expected_version: stream.len() as i64,
        })
    }

    async fn transactional_rollback(
        &self,
        transaction_id: TransactionId,
    ) -> Result<(), EventStoreError> {
        self.simulate_network().await?;
        let mut guard = self.inner.lock().await;
        guard.rollbacks.push(transaction_id);
        guard
            .transactions
            .remove(&transaction_id)
            .map(|_| ())
            .ok_or(EventStoreError::UnknownTransaction(transaction_id))
    }
}
