// Per-transaction dispatcher: a single task that forwards queued operations to the store.
//
// Responsibilities
// - Execute writes and commits strictly in the order they were issued.
// - Re-check the lifecycle before every store call; a rollback issued after a queued write wins.
// - Mark a commit in flight before it reaches the store; rollback is refused until it settles.
// - Bound every store call by the operation timeout.
// - Deliver the rollback notice, then refuse whatever is still queued.

use crate::modules::transactions::core::event_record::EventRecord;
use crate::modules::transactions::core::events::TransactionEvent;
use crate::modules::transactions::core::evolve::evolve_in_place;
use crate::modules::transactions::core::state::{TransactionState, TransactionStatus};
use crate::modules::transactions::use_cases::transaction_lifecycle::command::TransactionCommand;
use crate::modules::transactions::use_cases::transaction_lifecycle::completion::Reply;
use crate::modules::transactions::use_cases::transaction_lifecycle::decide::{decide, ensure_open};
use crate::modules::transactions::use_cases::transaction_lifecycle::decision::Decision;
use crate::modules::transactions::use_cases::transaction_lifecycle::errors::TransactionError;
use crate::shared::core::primitives::{CommitOutcome, TransactionId};
use crate::shared::infrastructure::event_store::{EventStoreError, TransactionalEventStore};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

pub(crate) enum Dispatch {
    Write {
        events: Vec<EventRecord>,
        reply: Reply<()>,
    },
    Commit {
        reply: Reply<CommitOutcome>,
    },
    Rollback,
}

pub(crate) async fn with_timeout<T>(
    timeout: Duration,
    operation: impl Future<Output = Result<T, EventStoreError>>,
) -> Result<T, EventStoreError> {
    match tokio::time::timeout(timeout, operation).await {
        Ok(result) => result,
        Err(_) => Err(EventStoreError::Unavailable(format!(
            "operation timed out after {timeout:?}"
        ))),
    }
}

pub(crate) struct Dispatcher<TEventStore>
where
    TEventStore: TransactionalEventStore + ?Sized + 'static,
{
    pub(crate) id: TransactionId,
    pub(crate) store: Arc<TEventStore>,
    pub(crate) state: Arc<watch::Sender<TransactionState>>,
    pub(crate) operation_timeout: Duration,
    pub(crate) queue: mpsc::UnboundedReceiver<Dispatch>,
}

impl<TEventStore> Dispatcher<TEventStore>
where
    TEventStore: TransactionalEventStore + ?Sized + 'static,
{
    pub(crate) async fn run(mut self) {
        while let Some(dispatch) = self.queue.recv().await {
            match dispatch {
                Dispatch::Write { events, reply } => {
                    let result = self.write(events).await;
                    // The caller may have dropped its completion.
                    let _ = reply.send(result);
                }
                Dispatch::Commit { reply } => {
                    let result = self.commit().await;
                    let _ = reply.send(result);
                }
                Dispatch::Rollback => {
                    self.notify_rollback().await;
                    self.refuse_remaining().await;
                    return;
                }
            }
        }

        if self.state.borrow().status() == TransactionStatus::Open {
            tracing::warn!(
                transaction_id = %self.id,
                "transaction abandoned while open; the store reclaims it on timeout"
            );
        }
    }

    async fn write(&self, events: Vec<EventRecord>) -> Result<(), TransactionError> {
        ensure_open(self.id, &self.state.borrow(), TransactionCommand::Write)?;
        with_timeout(
            self.operation_timeout,
            self.store.transactional_write(self.id, &events),
        )
        .await
        .map_err(|error| TransactionError::from_store(self.id, error))?;

        tracing::debug!(transaction_id = %self.id, events = events.len(), "events written");
        self.state.send_modify(|state| {
            evolve_in_place(state, TransactionEvent::EventsWritten { events })
        });
        Ok(())
    }

    async fn commit(&self) -> Result<CommitOutcome, TransactionError> {
        // Check and mark under one lock so a concurrent rollback either wins or sees the commit.
        let mut rejection = None;
        self.state.send_if_modified(|state| {
            match decide(state, TransactionCommand::Commit) {
                Decision::Accepted => {
                    evolve_in_place(state, TransactionEvent::CommitStarted);
                    true
                }
                Decision::Rejected { reason } => {
                    rejection = Some(reason);
                    false
                }
            }
        });
        if let Some(reason) = rejection {
            return Err(TransactionError::from_rejection(self.id, reason));
        }

        let result = with_timeout(
            self.operation_timeout,
            self.store.transactional_commit(self.id),
        )
        .await
        .map_err(|error| TransactionError::from_store(self.id, error));

        match result {
            Ok(outcome) => {
                self.state.send_modify(|state| {
                    evolve_in_place(state, TransactionEvent::Committed { outcome })
                });
                tracing::info!(
                    transaction_id = %self.id,
                    next_expected_version = outcome.next_expected_version,
                    "transaction committed"
                );
                Ok(outcome)
            }
            Err(error) => {
                self.state
                    .send_modify(|state| evolve_in_place(state, TransactionEvent::CommitFailed));
                tracing::warn!(transaction_id = %self.id, %error, "commit failed; transaction stays open");
                Err(error)
            }
        }
    }

    async fn notify_rollback(&self) {
        let notified = with_timeout(
            self.operation_timeout,
            self.store.transactional_rollback(self.id),
        )
        .await;
        match notified {
            Ok(()) => tracing::debug!(transaction_id = %self.id, "store notified of rollback"),
            Err(error) => tracing::warn!(
                transaction_id = %self.id,
                %error,
                "rollback notification failed; the store reclaims the transaction on timeout"
            ),
        }
    }

    async fn refuse_remaining(&mut self) {
        self.queue.close();
        while let Some(dispatch) = self.queue.recv().await {
            let status = self.state.borrow().status();
            let refusal = TransactionError::InvalidState {
                id: self.id,
                status,
            };
            match dispatch {
                Dispatch::Write { reply, .. } => {
                    let _ = reply.send(Err(refusal));
                }
                Dispatch::Commit { reply } => {
                    let _ = reply.send(Err(refusal));
                }
                Dispatch::Rollback => {}
            }
        }
    }
}
