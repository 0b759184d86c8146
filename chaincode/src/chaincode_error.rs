use local_ledger::LedgerError;

#[derive(Debug, thiserror::Error)]
pub enum ChaincodeError {
    #[error("Received unknown function {0} invocation")]
    UnknownFunction(String),
    #[error("Incorrect number of arguments. Expecting {expected}, received {received}")]
    BadArgumentCount { expected: usize, received: usize },
    #[error("{0} does not exist")]
    NotFound(String),
    #[error("Failed to parse annulation {key}: {message}")]
    ParseFailure { key: String, message: String },
    #[error("Ledger operation failed: {0}")]
    LedgerIOFailure(#[from] LedgerError),
    #[error("Failed to serialize payload: {0}")]
    Serialization(String),
    #[error("Invalid handler registry: {0}")]
    Registry(String),
}
