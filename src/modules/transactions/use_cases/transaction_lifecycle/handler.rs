// TransactionManager starts store transactions and wires each one to its own dispatcher.
//
// Responsibilities
// - Ask the store for a fresh transaction id, bounded by the operation timeout.
// - Spawn the dispatcher that serializes the transaction's store calls.
// - Stay shareable: transactions share nothing but the store handle.

use crate::modules::transactions::core::state::TransactionState;
use crate::modules::transactions::use_cases::transaction_lifecycle::dispatcher::{
    Dispatcher, with_timeout,
};
use crate::modules::transactions::use_cases::transaction_lifecycle::errors::TransactionError;
use crate::modules::transactions::use_cases::transaction_lifecycle::settings::TransactionSettings;
use crate::modules::transactions::use_cases::transaction_lifecycle::transaction::Transaction;
use crate::shared::core::primitives::ExpectedVersion;
use crate::shared::infrastructure::event_store::{EventStoreError, TransactionalEventStore};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

pub struct TransactionManager<TEventStore>
where
    TEventStore: TransactionalEventStore + ?Sized + 'static,
{
    store: Arc<TEventStore>,
    settings: TransactionSettings,
}

impl<TEventStore> Clone for TransactionManager<TEventStore>
where
    TEventStore: TransactionalEventStore + ?Sized + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            settings: self.settings,
        }
    }
}

impl<TEventStore> TransactionManager<TEventStore>
where
    TEventStore: TransactionalEventStore + ?Sized + 'static,
{
    pub fn new(store: Arc<TEventStore>, settings: TransactionSettings) -> Self {
        Self { store, settings }
    }

    pub fn settings(&self) -> &TransactionSettings {
        &self.settings
    }

    pub async fn start(
        &self,
        stream_id: impl Into<String>,
        expected_version: ExpectedVersion,
    ) -> Result<Transaction, TransactionError> {
        let stream_id = stream_id.into();
        let id = with_timeout(
            self.settings.operation_timeout,
            self.store.begin_transaction(&stream_id, expected_version),
        )
        .await
        .map_err(|error| match error {
            EventStoreError::Unavailable(message) => TransactionError::Connection(message),
            other => TransactionError::Connection(format!(
                "store refused to begin a transaction: {other}"
            )),
        })?;

        let (state, _) = watch::channel(TransactionState::open());
        let state = Arc::new(state);
        let (queue, receiver) = mpsc::unbounded_channel();
        let dispatcher = Dispatcher {
            id,
            store: self.store.clone(),
            state: state.clone(),
            operation_timeout: self.settings.operation_timeout,
            queue: receiver,
        };
        tokio::spawn(dispatcher.run());

        tracing::info!(
            transaction_id = %id,
            stream_id = %stream_id,
            expected_version = %expected_version,
            "transaction started"
        );
        Ok(Transaction::new(id, stream_id, state, queue))
    }
}
