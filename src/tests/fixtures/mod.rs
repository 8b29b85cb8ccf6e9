pub mod events {
    pub mod event_record;
}

pub mod stores {
    use crate::shared::core::primitives::TransactionId;
    use crate::shared::infrastructure::event_store::in_memory::InMemoryEventStore;
    use std::time::Duration;

    /// Rollback notices are delivered by the dispatcher task; poll until `count` arrived.
    pub async fn wait_for_rollback_notifications(
        store: &InMemoryEventStore,
        count: usize,
    ) -> Vec<TransactionId> {
        for _ in 0..200 {
            let notifications = store.rollback_notifications().await;
            if notifications.len() >= count {
                return notifications;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        store.rollback_notifications().await
    }
}
