// Crate entry point. Only declares and exposes modules; no logic here.

pub mod shared {
    pub mod core {
        pub mod primitives;
    }
    pub mod infrastructure {
        pub mod event_store;
    }
}

pub mod modules {
    pub mod transactions {
        pub mod core {
            pub mod event_record;
            pub mod events;
            pub mod evolve;
            pub mod state;
        }
        pub mod use_cases {
            pub mod transaction_lifecycle {
                pub mod command;
                pub mod completion;
                pub mod decide;
                pub mod decision;
                pub mod dispatcher;
                pub mod errors;
                pub mod handler;
                pub mod settings;
                pub mod transaction;
            }
        }
    }
}

pub mod shell;

pub use modules::transactions::core::event_record::EventRecord;
pub use modules::transactions::core::state::{TransactionState, TransactionStatus};
pub use modules::transactions::use_cases::transaction_lifecycle::completion::Completion;
pub use modules::transactions::use_cases::transaction_lifecycle::errors::TransactionError;
pub use modules::transactions::use_cases::transaction_lifecycle::handler::TransactionManager;
pub use modules::transactions::use_cases::transaction_lifecycle::settings::TransactionSettings;
pub use modules::transactions::use_cases::transaction_lifecycle::transaction::Transaction;
pub use shared::core::primitives::{CommitOutcome, ExpectedVersion, TransactionId};
pub use shared::infrastructure::event_store::{EventStoreError, TransactionalEventStore};
