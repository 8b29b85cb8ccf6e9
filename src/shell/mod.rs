// Composition root.
//
// Responsibilities
// - Read settings from the environment.
// - Install the tracing subscriber.
// - Wire a concrete store into the TransactionManager (see main.rs).

pub mod config;
pub mod telemetry;
