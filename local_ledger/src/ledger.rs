use async_trait::async_trait;
use bytes::Bytes;

use crate::LedgerError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: Bytes,
}

/// Cursor over a key range handed out by a [`Ledger`].
///
/// `close` releases whatever the cursor holds on to and must be safe to call from
/// `Drop`, so it is synchronous.
#[async_trait]
pub trait StateIterator: Send {
    async fn next(&mut self) -> Result<Option<KeyValue>, LedgerError>;

    fn close(&mut self);
}

/// Key/value world state the contract reads and writes.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Point lookup.  A missing key yields empty bytes.
    async fn get(&self, key: &str) -> Result<Bytes, LedgerError>;

    /// Writes or overwrites the value at `key`
    async fn put(&self, key: &str, value: Bytes) -> Result<(), LedgerError>;

    /// Ordered scan of every key in `[start, end)`
    async fn scan_range(&self, start: &str, end: &str) -> Result<RangeScan, LedgerError>;
}

/// Finite, non restartable sequence of key/value pairs.
///
/// The underlying cursor is released by `close`, or when the scan is dropped on an
/// early return.
pub struct RangeScan {
    cursor: Box<dyn StateIterator>,
    closed: bool,
}

impl RangeScan {
    pub fn new(cursor: Box<dyn StateIterator>) -> Self {
        Self {
            cursor,
            closed: false,
        }
    }

    /// Returns the next pair, or `None` once the range is exhausted or closed
    pub async fn next(&mut self) -> Result<Option<KeyValue>, LedgerError> {
        if self.closed {
            return Ok(None);
        }

        self.cursor.next().await
    }

    pub fn close(&mut self) {
        if self.closed {
            return;
        }

        self.cursor.close();
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Drop for RangeScan {
    fn drop(&mut self) {
        if !self.closed {
            tracing::debug!("Range scan dropped before close, releasing cursor");
            self.close();
        }
    }
}
