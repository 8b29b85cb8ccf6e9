// Transaction is the caller-owned handle of one open store transaction.
//
// Responsibilities
// - Check the lifecycle locally before queueing an operation; terminal transactions fail fast.
// - Queue writes and commits to the dispatcher and hand back a Completion.
// - Roll back synchronously: the client-side transition is authoritative, the store notice is best effort.
// - A rollback that arrives while a commit is at the store is ignored; the commit outcome decides.

use crate::modules::transactions::core::event_record::EventRecord;
use crate::modules::transactions::core::events::TransactionEvent;
use crate::modules::transactions::core::evolve::evolve_in_place;
use crate::modules::transactions::core::state::{TransactionState, TransactionStatus};
use crate::modules::transactions::use_cases::transaction_lifecycle::command::TransactionCommand;
use crate::modules::transactions::use_cases::transaction_lifecycle::completion::Completion;
use crate::modules::transactions::use_cases::transaction_lifecycle::decide::{decide, ensure_open};
use crate::modules::transactions::use_cases::transaction_lifecycle::decision::{DecideError, Decision};
use crate::modules::transactions::use_cases::transaction_lifecycle::dispatcher::Dispatch;
use crate::shared::core::primitives::{CommitOutcome, TransactionId};
use std::fmt;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

pub struct Transaction {
    id: TransactionId,
    stream_id: String,
    state: Arc<watch::Sender<TransactionState>>,
    queue: mpsc::UnboundedSender<Dispatch>,
}

impl Transaction {
    pub(crate) fn new(
        id: TransactionId,
        stream_id: String,
        state: Arc<watch::Sender<TransactionState>>,
        queue: mpsc::UnboundedSender<Dispatch>,
    ) -> Self {
        Self {
            id,
            stream_id,
            state,
            queue,
        }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn stream_id(&self) -> &str {
        &self.stream_id
    }

    pub fn status(&self) -> TransactionStatus {
        self.state.borrow().status()
    }

    pub fn state(&self) -> TransactionState {
        self.state.borrow().clone()
    }

    /// Events acknowledged by the store but not yet committed, in issue order.
    pub fn pending_events(&self) -> Vec<EventRecord> {
        self.state.borrow().pending().to_vec()
    }

    pub fn write(&self, events: impl IntoIterator<Item = EventRecord>) -> Completion<()> {
        if let Err(error) = ensure_open(self.id, &self.state.borrow(), TransactionCommand::Write) {
            return Completion::ready(Err(error));
        }
        let events: Vec<EventRecord> = events.into_iter().collect();
        tracing::debug!(transaction_id = %self.id, events = events.len(), "queueing write");
        let (reply, completion) = Completion::channel();
        self.dispatch(Dispatch::Write { events, reply });
        completion
    }

    pub fn commit(&self) -> Completion<CommitOutcome> {
        if let Err(error) = ensure_open(self.id, &self.state.borrow(), TransactionCommand::Commit) {
            return Completion::ready(Err(error));
        }
        tracing::debug!(transaction_id = %self.id, "queueing commit");
        let (reply, completion) = Completion::channel();
        self.dispatch(Dispatch::Commit { reply });
        completion
    }

    /// Never fails. Calling it on a terminal transaction is a no-op.
    pub fn rollback(&self) {
        let mut rejection = None;
        let rolled_back = self.state.send_if_modified(|state| {
            match decide(state, TransactionCommand::Rollback) {
                Decision::Accepted => {
                    evolve_in_place(state, TransactionEvent::RolledBack);
                    true
                }
                Decision::Rejected { reason } => {
                    rejection = Some(reason);
                    false
                }
            }
        });

        if rolled_back {
            tracing::info!(transaction_id = %self.id, stream_id = %self.stream_id, "transaction rolled back");
            self.dispatch(Dispatch::Rollback);
        } else if let Some(reason) = rejection {
            match reason {
                DecideError::CommitInFlight => tracing::info!(
                    transaction_id = %self.id,
                    "rollback ignored; the commit already reached the store"
                ),
                DecideError::NotOpen(_) => {
                    tracing::debug!(transaction_id = %self.id, %reason, "rollback ignored")
                }
            }
        }
    }

    fn dispatch(&self, dispatch: Dispatch) {
        // A refused send drops the reply, which resolves the completion with a connection error.
        if self.queue.send(dispatch).is_err() {
            tracing::debug!(transaction_id = %self.id, "dispatcher already stopped");
        }
    }
}

impl fmt::Debug for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transaction")
            .field("id", &self.id)
            .field("stream_id", &self.stream_id)
            .field("status", &self.status())
            .finish()
    }
}
