#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Invalid ledger key: {0}")]
    InvalidKey(String),
    #[error("Failed to read state for {key}: {message}")]
    Read { key: String, message: String },
    #[error("Failed to write state for {key}: {message}")]
    Write { key: String, message: String },
    #[error("Range scan failed: {0}")]
    Scan(String),
}

/// Half open `[start, end)` check in the ledger's native key order
pub(crate) fn key_in_range(key: &str, start: &str, end: &str) -> bool {
    key >= start && key < end
}
