use std::time::Duration;

/// Store client default for a single operation.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(7);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionSettings {
    /// Upper bound for every store call. Expiry surfaces as a connection error.
    pub operation_timeout: Duration,
}

impl Default for TransactionSettings {
    fn default() -> Self {
        Self {
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }
}

impl TransactionSettings {
    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = timeout;
        self
    }
}
