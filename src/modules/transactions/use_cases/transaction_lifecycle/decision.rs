use crate::modules::transactions::core::state::TransactionStatus;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("transaction is {0}, expected open")]
    NotOpen(TransactionStatus),

    #[error("a commit is in flight at the store")]
    CommitInFlight,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Decision {
    Accepted,
    Rejected { reason: DecideError },
}
