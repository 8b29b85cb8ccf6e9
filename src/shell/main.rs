use event_transactions::shared::infrastructure::event_store::in_memory::InMemoryEventStore;
use event_transactions::shell::config::load_settings;
use event_transactions::shell::telemetry::init_tracing;
use event_transactions::{EventRecord, ExpectedVersion, TransactionManager};
use serde_json::json;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let settings = load_settings()?;

    // In-memory store for now
    let store = Arc::new(InMemoryEventStore::new());
    let manager = TransactionManager::new(store.clone(), settings);

    let transaction = manager.start("order-0001", ExpectedVersion::NoStream).await?;
    transaction
        .write([
            EventRecord::new("OrderPlaced", json!({ "order_id": "order-0001" })),
            EventRecord::new("OrderPaid", json!({ "order_id": "order-0001", "total_cents": 4200 })),
        ])
        .await?;
    transaction
        .write([EventRecord::new("OrderShipped", json!({ "order_id": "order-0001" }))])
        .await?;
    let outcome = transaction.commit().await?;

    for stored in store.read_stream("order-0001").await {
        tracing::info!(
            event_number = stored.event_number,
            event_type = stored.record.event_type(),
            "committed event"
        );
    }
    tracing::info!(
        next_expected_version = outcome.next_expected_version,
        "done"
    );
    Ok(())
}
