// Pure precondition check for every transaction command.
//
// Responsibilities
// - Accept write, commit and rollback only while the transaction is open.
// - Refuse rollback once a commit reached the store; its outcome decides the lifecycle.
// - Never perform input or output. Callers decide what a rejection means for them.

use crate::modules::transactions::core::state::TransactionState;
use crate::modules::transactions::use_cases::transaction_lifecycle::command::TransactionCommand;
use crate::modules::transactions::use_cases::transaction_lifecycle::decision::{
    DecideError, Decision,
};
use crate::modules::transactions::use_cases::transaction_lifecycle::errors::TransactionError;
use crate::shared::core::primitives::TransactionId;

pub fn decide(state: &TransactionState, command: TransactionCommand) -> Decision {
    match (state, command) {
        (TransactionState::Open { committing: true, .. }, TransactionCommand::Rollback) => {
            Decision::Rejected {
                reason: DecideError::CommitInFlight,
            }
        }
        (TransactionState::Open { .. }, _) => Decision::Accepted,
        (terminal, _) => Decision::Rejected {
            reason: DecideError::NotOpen(terminal.status()),
        },
    }
}

pub fn ensure_open(
    id: TransactionId,
    state: &TransactionState,
    command: TransactionCommand,
) -> Result<(), TransactionError> {
    match decide(state, command) {
        Decision::Accepted => Ok(()),
        Decision::Rejected { reason } => Err(TransactionError::from_rejection(id, reason)),
    }
}
