// Shared test fixture for EventRecord.
// Compiled into the crate only during tests, exposed under `crate::tests::fixtures`.

use crate::modules::transactions::core::event_record::EventRecord;
use serde_json::{Value as Json, json};
use std::fs;
use uuid::Uuid;

pub struct EventRecordBuilder {
    event_type: String,
    data: Json,
    metadata: Json,
    event_id: Option<Uuid>,
    correlation_id: Option<Uuid>,
}

impl Default for EventRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl EventRecordBuilder {
    pub fn new() -> Self {
        let json_str =
            fs::read_to_string("./src/tests/fixtures/events/json/event_record.json").unwrap();
        let record: EventRecord = serde_json::from_str(&json_str).unwrap();
        Self {
            event_type: record.event_type().to_string(),
            data: record.data().clone(),
            metadata: record.metadata().clone(),
            event_id: Some(record.event_id()),
            correlation_id: record.correlation_id(),
        }
    }

    pub fn event_type(mut self, v: impl Into<String>) -> Self {
        self.event_type = v.into();
        self
    }

    pub fn data(mut self, v: Json) -> Self {
        self.data = v;
        self
    }

    pub fn metadata(mut self, v: Json) -> Self {
        self.metadata = v;
        self
    }

    /// Lets EventRecord generate a fresh id.
    pub fn fresh_id(mut self) -> Self {
        self.event_id = None;
        self
    }

    pub fn correlation_id(mut self, v: Uuid) -> Self {
        self.correlation_id = Some(v);
        self
    }

    pub fn build(self) -> EventRecord {
        let mut record = EventRecord::new(self.event_type, self.data).with_metadata(self.metadata);
        if let Some(event_id) = self.event_id {
            record = record.with_event_id(event_id);
        }
        if let Some(correlation_id) = self.correlation_id {
            record = record.with_correlation_id(correlation_id);
        }
        record
    }
}

/// `count` distinct records numbered through `data.sequence`, in order.
pub fn make_event_records(count: usize) -> Vec<EventRecord> {
    (0..count)
        .map(|sequence| {
            EventRecordBuilder::new()
                .fresh_id()
                .data(json!({ "order_id": "order-fixed-0001", "sequence": sequence }))
                .build()
        })
        .collect()
}

#[cfg(test)]
mod event_record_builder_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_delegates_to_new_and_parses_json() {
        let built = EventRecordBuilder::default().build();
        assert_eq!(
            built.event_id().to_string(),
            "0190f3a2-7c1e-7b3d-9a51-5d2c6e8f0a01"
        );
        assert_eq!(built.event_type(), "OrderPlaced");
        assert_eq!(built.data()["total_cents"], 4200);
        assert_eq!(built.metadata(), &json!({ "source": "checkout" }));
        assert_eq!(built.correlation_id(), None);
    }

    #[rstest]
    fn setters_override_all_fields_and_build_returns_inner() {
        let correlation_id = Uuid::now_v7();
        let custom = EventRecordBuilder::new()
            .event_type("OrderShipped")
            .data(json!({ "carrier": "ups" }))
            .metadata(json!({ "source": "warehouse" }))
            .correlation_id(correlation_id)
            .build();
        assert_eq!(custom.event_type(), "OrderShipped");
        assert_eq!(custom.data(), &json!({ "carrier": "ups" }));
        assert_eq!(custom.metadata(), &json!({ "source": "warehouse" }));
        assert_eq!(custom.correlation_id(), Some(correlation_id));
    }

    #[rstest]
    fn make_event_records_numbers_the_records() {
        let records = make_event_records(3);
        let sequences: Vec<_> = records.iter().map(|r| r.data()["sequence"].clone()).collect();
        assert_eq!(sequences, vec![json!(0), json!(1), json!(2)]);
        assert_ne!(records[0].event_id(), records[1].event_id());
    }
}
