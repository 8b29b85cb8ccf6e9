use crate::modules::transactions::core::events::TransactionEvent;
use crate::modules::transactions::core::state::TransactionState;

/// Terminal states absorb every event.
pub fn evolve(state: TransactionState, event: TransactionEvent) -> TransactionState {
    match (state, event) {
        (
            TransactionState::Open {
                mut pending,
                committing,
            },
            TransactionEvent::EventsWritten { events },
        ) => {
            pending.extend(events);
            TransactionState::Open {
                pending,
                committing,
            }
        }
        (TransactionState::Open { pending, .. }, TransactionEvent::CommitStarted) => {
            TransactionState::Open {
                pending,
                committing: true,
            }
        }
        (TransactionState::Open { pending, .. }, TransactionEvent::CommitFailed) => {
            TransactionState::Open {
                pending,
                committing: false,
            }
        }
        (TransactionState::Open { .. }, TransactionEvent::Committed { outcome }) => {
            TransactionState::Committed { outcome }
        }
        (TransactionState::Open { .. }, TransactionEvent::RolledBack) => {
            TransactionState::RolledBack
        }
        (state, _) => state,
    }
}

/// Applies `event` to a state held behind a mutable reference, e.g. inside a watch channel.
pub fn evolve_in_place(state: &mut TransactionState, event: TransactionEvent) {
    let current = std::mem::replace(state, TransactionState::RolledBack);
    *state = evolve(current, event);
}
