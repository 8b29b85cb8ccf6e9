// EventRecord is the unit appended to a transaction.
//
// Purpose
// - Carry an opaque JSON payload plus the metadata the store needs to persist it.
//
// Boundaries
// - Immutable once built: fields are private, the `with_*` builders consume self.
// - No input or output here.

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    event_id: Uuid,
    event_type: String,
    data: Json,
    metadata: Json,
    correlation_id: Option<Uuid>,
}

impl EventRecord {
    pub fn new(event_type: impl Into<String>, data: Json) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            event_type: event_type.into(),
            data,
            metadata: Json::Null,
            correlation_id: None,
        }
    }

    pub fn with_event_id(mut self, event_id: Uuid) -> Self {
        self.event_id = event_id;
        self
    }

    pub fn with_metadata(mut self, metadata: Json) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_correlation_id(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = Some(correlation_id);
        self
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn data(&self) -> &Json {
        &self.data
    }

    pub fn metadata(&self) -> &Json {
        &self.metadata
    }

    pub fn correlation_id(&self) -> Option<Uuid> {
        self.correlation_id
    }
}
