// Lifecycle facts observed for a transaction. Folded into TransactionState by evolve.

use crate::modules::transactions::core::event_record::EventRecord;
use crate::shared::core::primitives::CommitOutcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionEvent {
    EventsWritten { events: Vec<EventRecord> },
    CommitStarted,
    CommitFailed,
    Committed { outcome: CommitOutcome },
    RolledBack,
}
