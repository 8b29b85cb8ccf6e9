use crate::modules::transactions::core::event_record::EventRecord;
use crate::shared::core::primitives::CommitOutcome;
use std::fmt;

/// Client-side lifecycle of a transaction. `Open` owns the events forwarded so far;
/// `committing` is set while a commit is at the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionState {
    Open {
        pending: Vec<EventRecord>,
        committing: bool,
    },
    Committed { outcome: CommitOutcome },
    RolledBack,
}

impl TransactionState {
    pub fn open() -> Self {
        TransactionState::Open {
            pending: Vec::new(),
            committing: false,
        }
    }

    pub fn is_committing(&self) -> bool {
        matches!(self, TransactionState::Open { committing: true, .. })
    }

    pub fn status(&self) -> TransactionStatus {
        match self {
            TransactionState::Open { .. } => TransactionStatus::Open,
            TransactionState::Committed { .. } => TransactionStatus::Committed,
            TransactionState::RolledBack => TransactionStatus::RolledBack,
        }
    }

    pub fn pending(&self) -> &[EventRecord] {
        match self {
            TransactionState::Open { pending, .. } => pending,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    Open,
    Committed,
    RolledBack,
}

impl TransactionStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, TransactionStatus::Open)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionStatus::Open => write!(f, "open"),
            TransactionStatus::Committed => write!(f, "committed"),
            TransactionStatus::RolledBack => write!(f, "rolled back"),
        }
    }
}
