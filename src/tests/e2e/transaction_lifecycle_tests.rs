use crate::modules::transactions::core::state::TransactionStatus;
use crate::modules::transactions::use_cases::transaction_lifecycle::errors::TransactionError;
use crate::modules::transactions::use_cases::transaction_lifecycle::handler::TransactionManager;
use crate::modules::transactions::use_cases::transaction_lifecycle::settings::TransactionSettings;
use crate::shared::core::primitives::ExpectedVersion;
use crate::shared::infrastructure::event_store::in_memory::InMemoryEventStore;
use crate::tests::fixtures::events::event_record::make_event_records;
use std::sync::Arc;

fn setup() -> (Arc<InMemoryEventStore>, TransactionManager<InMemoryEventStore>) {
    let store = Arc::new(InMemoryEventStore::new());
    let manager = TransactionManager::new(store.clone(), TransactionSettings::default());
    (store, manager)
}

#[tokio::test]
async fn writes_three_events_commits_and_refuses_further_writes() {
    let (store, manager) = setup();
    let events = make_event_records(4);
    let transaction = manager
        .start("order-0001", ExpectedVersion::NoStream)
        .await
        .unwrap();

    transaction.write(events[..3].to_vec()).await.unwrap();
    let outcome = transaction.commit().await.unwrap();
    assert_eq!(outcome.next_expected_version, 3);
    assert_eq!(transaction.status(), TransactionStatus::Committed);

    let result = transaction.write(events[3..].to_vec()).await;
    assert_eq!(
        result,
        Err(TransactionError::InvalidState {
            id: transaction.id(),
            status: TransactionStatus::Committed,
        })
    );
    assert_eq!(transaction.status(), TransactionStatus::Committed);
    assert_eq!(store.stream_version("order-0001").await, 3);
}

#[tokio::test]
async fn retries_a_write_after_a_connection_error_and_commits() {
    let (store, manager) = setup();
    let events = make_event_records(2);
    let transaction = manager
        .start("order-0002", ExpectedVersion::Any)
        .await
        .unwrap();

    store.fail_next_writes(1);
    let result = transaction.write(events.clone()).await;
    assert!(matches!(result, Err(TransactionError::Connection(_))));
    assert_eq!(transaction.status(), TransactionStatus::Open);
    assert!(transaction.pending_events().is_empty());

    transaction.write(events.clone()).await.unwrap();
    assert_eq!(transaction.pending_events(), events);
    transaction.commit().await.unwrap();

    let stored: Vec<_> = store
        .read_stream("order-0002")
        .await
        .into_iter()
        .map(|e| e.record)
        .collect();
    assert_eq!(stored, events);
}

#[tokio::test]
async fn rolls_back_after_a_conflicting_commit_and_accepts_nothing_more() {
    let (store, manager) = setup();
    let transaction = manager
        .start("order-0003", ExpectedVersion::Exact(5))
        .await
        .unwrap();
    transaction.write(make_event_records(1)).await.unwrap();

    let result = transaction.commit().await;
    assert!(matches!(result, Err(TransactionError::Conflict { .. })));
    assert_eq!(transaction.status(), TransactionStatus::Open);

    transaction.rollback();
    assert_eq!(transaction.status(), TransactionStatus::RolledBack);
    assert!(matches!(
        transaction.write(make_event_records(1)).await,
        Err(TransactionError::InvalidState {
            status: TransactionStatus::RolledBack,
            ..
        })
    ));
    assert_eq!(transaction.status(), TransactionStatus::RolledBack);
    assert!(matches!(
        transaction.commit().await,
        Err(TransactionError::InvalidState {
            status: TransactionStatus::RolledBack,
            ..
        })
    ));
    assert_eq!(transaction.status(), TransactionStatus::RolledBack);
    assert!(store.read_stream("order-0003").await.is_empty());
}

#[tokio::test]
async fn keeps_interleaved_transactions_apart() {
    let (store, manager) = setup();
    let events = make_event_records(4);
    let first = manager.start("order-a", ExpectedVersion::Any).await.unwrap();
    let second = manager.start("order-b", ExpectedVersion::Any).await.unwrap();
    assert_ne!(first.id(), second.id());

    let (a, b) = tokio::join!(
        first.write([events[0].clone()]),
        second.write([events[1].clone()])
    );
    a.unwrap();
    b.unwrap();
    let (a, b) = tokio::join!(
        second.write([events[2].clone()]),
        first.write([events[3].clone()])
    );
    a.unwrap();
    b.unwrap();

    assert_eq!(
        first.pending_events(),
        vec![events[0].clone(), events[3].clone()]
    );
    assert_eq!(
        second.pending_events(),
        vec![events[1].clone(), events[2].clone()]
    );

    first.commit().await.unwrap();
    second.rollback();
    let stored: Vec<_> = store
        .read_stream("order-a")
        .await
        .into_iter()
        .map(|e| e.record)
        .collect();
    assert_eq!(stored, vec![events[0].clone(), events[3].clone()]);
    assert!(store.read_stream("order-b").await.is_empty());
}
