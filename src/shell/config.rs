use crate::modules::transactions::use_cases::transaction_lifecycle::settings::TransactionSettings;
use anyhow::Context;
use std::time::Duration;

pub const OPERATION_TIMEOUT_ENV: &str = "EVENT_TX_OPERATION_TIMEOUT_MS";

/// Loads `.env` when present, then reads settings from the process environment.
pub fn load_settings() -> anyhow::Result<TransactionSettings> {
    let _ = dotenvy::dotenv();
    settings_from(std::env::var(OPERATION_TIMEOUT_ENV).ok().as_deref())
}

pub fn settings_from(operation_timeout_ms: Option<&str>) -> anyhow::Result<TransactionSettings> {
    let settings = TransactionSettings::default();
    let Some(raw) = operation_timeout_ms else {
        return Ok(settings);
    };
    let millis: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{OPERATION_TIMEOUT_ENV} must be a number of milliseconds, got {raw:?}"))?;
    anyhow::ensure!(millis > 0, "{OPERATION_TIMEOUT_ENV} must be greater than zero");
    Ok(settings.with_operation_timeout(Duration::from_millis(millis)))
}
